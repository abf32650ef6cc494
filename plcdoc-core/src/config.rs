use crate::error::PlcDocError;
use serde::{Deserialize, Serialize};
use std::path::Path;

// Default value functions for serde
fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionConfig {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub rules: RulesConfig,
    #[serde(default)]
    pub chunker: ChunkerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// `Language:` values that get a `VAR ... END_VAR` interface wrapper
    /// instead of `INTERFACE ... END_INTERFACE`
    #[serde(default = "default_structured_text_languages")]
    pub structured_text_languages: Vec<String>,
    /// Emit `NETWORK n:` blocks that have a header but no body lines
    #[serde(default = "default_true")]
    pub emit_empty_networks: bool,
}

fn default_structured_text_languages() -> Vec<String> {
    vec!["SCL".to_string(), "ST".to_string()]
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            structured_text_languages: default_structured_text_languages(),
            emit_empty_networks: true,
        }
    }
}

impl RenderConfig {
    pub fn is_structured_text(&self, language: Option<&str>) -> bool {
        language.is_some_and(|lang| {
            self.structured_text_languages
                .iter()
                .any(|candidate| candidate == lang)
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Rewrite passes to run over each network line, in order
    #[serde(default = "default_pipeline")]
    pub pipeline: Vec<RuleConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Name of the rule
    pub name: String,
    /// Whether this rule is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl RuleConfig {
    fn enabled(name: &str) -> Self {
        Self {
            name: name.to_string(),
            enabled: true,
        }
    }
}

fn default_pipeline() -> Vec<RuleConfig> {
    ["Timer", "Counter", "Move", "Math", "Comparison"]
        .into_iter()
        .map(RuleConfig::enabled)
        .collect()
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            pipeline: default_pipeline(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SplitStrategy {
    /// Accumulate whole lines until the byte budget is reached
    Exact,
    /// Average-bytes-per-line estimate with a forced lettered re-split
    Estimated,
}

impl std::str::FromStr for SplitStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "exact" => Ok(SplitStrategy::Exact),
            "estimated" => Ok(SplitStrategy::Estimated),
            other => Err(format!("unknown split strategy '{other}' (expected exact or estimated)")),
        }
    }
}

fn default_max_file_size_mb() -> f64 {
    2.0
}

fn default_header_margin() -> f64 {
    0.85 // leave room for part headers/footers
}

fn default_line_size_inflation() -> f64 {
    1.2
}

fn default_strategy() -> SplitStrategy {
    SplitStrategy::Exact
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkerConfig {
    /// Hard size limit for a produced file, in MiB
    #[serde(default = "default_max_file_size_mb")]
    pub max_file_size_mb: f64,

    /// Fraction of the hard limit used as the working budget
    #[serde(default = "default_header_margin")]
    pub header_margin: f64,

    /// Multiplier on the average line size (estimated strategy only)
    #[serde(default = "default_line_size_inflation")]
    pub line_size_inflation: f64,

    #[serde(default = "default_strategy")]
    pub strategy: SplitStrategy,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: default_max_file_size_mb(),
            header_margin: default_header_margin(),
            line_size_inflation: default_line_size_inflation(),
            strategy: default_strategy(),
        }
    }
}

impl ChunkerConfig {
    /// Hard limit in bytes.
    pub fn max_file_size(&self) -> usize {
        (self.max_file_size_mb * 1024.0 * 1024.0) as usize
    }

    /// Working budget in bytes (hard limit scaled by the header margin).
    pub fn budget(&self) -> usize {
        (self.max_file_size_mb * 1024.0 * 1024.0 * self.header_margin) as usize
    }

    pub fn validate(&self) -> Result<(), PlcDocError> {
        if self.max_file_size_mb <= 0.0 || self.budget() == 0 {
            return Err(PlcDocError::InvalidBudget(self.max_file_size_mb));
        }
        Ok(())
    }
}

impl ConversionConfig {
    /// Load config from a YAML file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, PlcDocError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| PlcDocError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|source| PlcDocError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load config with fallback to default
    pub fn load_with_fallback(path: Option<&Path>) -> Self {
        match path {
            Some(p) => Self::load_from_file(p).unwrap_or_else(|e| {
                tracing::warn!("⚠️  {e}, using defaults");
                Self::default()
            }),
            None => Self::default(),
        }
    }
}
