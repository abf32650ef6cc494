use super::engine::RewriteRule;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

struct OperatorFamily {
    op: &'static str,
    func: &'static str,
    pattern: Regex,
}

// Priority order; two-character operators come before their one-character
// prefixes.
static FAMILIES: Lazy<Vec<OperatorFamily>> = Lazy::new(|| {
    [
        ("==", "EQ"),
        ("<>", "NE"),
        (">=", "GE"),
        ("<=", "LE"),
        (">", "GT"),
        ("<", "LT"),
    ]
    .into_iter()
    .map(|(op, func)| OperatorFamily {
        op,
        func,
        pattern: Regex::new(&format!(
            r"([^\s<>=!,;()]+)\s*{}\s*([^\s<>=!,;()]+)",
            regex::escape(op)
        ))
        .expect("comparison pattern"),
    })
    .collect()
});

/// Infix comparisons → `EQ|NE|GE|LE|GT|LT(lhs, rhs)`.
///
/// Only the first operator family present on the line is rewritten. Lines
/// carrying an address binding (` AT `) or an output assignment (` => `) are
/// declarations or call arguments, not comparisons.
pub struct ComparisonRule;

fn family_for(line: &str) -> Option<&'static OperatorFamily> {
    if line.contains(" AT ") || line.contains(" => ") {
        return None;
    }
    FAMILIES.iter().find(|family| line.contains(family.op))
}

impl RewriteRule for ComparisonRule {
    fn name(&self) -> &'static str {
        "Comparison"
    }

    fn matches(&self, line: &str) -> bool {
        family_for(line).is_some_and(|family| family.pattern.is_match(line))
    }

    fn rewrite(&self, line: &str) -> String {
        let Some(family) = family_for(line) else {
            return line.to_string();
        };
        family
            .pattern
            .replace_all(line, |caps: &Captures| {
                format!("{}({}, {})", family.func, &caps[1], &caps[2])
            })
            .into_owned()
    }
}
