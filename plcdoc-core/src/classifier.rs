use crate::types::BlockCategory;
use tracing::debug;

/// Substring rules checked in order; the first hit decides the category.
const RULES: [(&[&str], BlockCategory); 7] = [
    (&["(OB)", "Organization Blocks"], BlockCategory::OB),
    (&["(FB)", "Function Blocks"], BlockCategory::FB),
    (&["(FC)", "Functions"], BlockCategory::FC),
    (&["(DB)", "Data Blocks"], BlockCategory::DB),
    (&["Safety"], BlockCategory::Safety),
    (&["(TC)", "(TB)", "Tool"], BlockCategory::Tools),
    (&["PLC tags"], BlockCategory::Tags),
];

/// Maps a source file name to the category of block it documents.
pub struct BlockClassifier;

impl Default for BlockClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, file_name: &str) -> BlockCategory {
        let category = RULES
            .iter()
            .find(|(needles, _)| needles.iter().any(|needle| file_name.contains(needle)))
            .map_or(BlockCategory::Other, |(_, category)| *category);

        debug!("📋 Classified {file_name} as {category}");
        category
    }
}
