//! Runtime configuration for dataset loading and similarity ranking.
//!
//! Users can tune the wire format and tie-break policy via YAML/JSON/TOML.

use serde::{Deserialize, Serialize};

use crate::patient::NA;

/// Complete Oncopeer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OncopeerConfig {
    /// Dataset wire format
    #[serde(default)]
    pub dataset: DatasetConfig,

    /// Ranking behaviour
    #[serde(default)]
    pub ranking: RankingConfig,
}

// ── Dataset ───────────────────────────────────────────────────────────────────

/// Tab-separated dataset format options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Column delimiter
    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    /// Token that marks a missing value
    #[serde(default = "default_missing_token")]
    pub missing_token: String,

    /// Name of the identifier column. Defaults to the first header column.
    #[serde(default)]
    pub id_column: Option<String>,
}

fn default_delimiter() -> char { '\t' }
fn default_missing_token() -> String { NA.to_string() }

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            missing_token: default_missing_token(),
            id_column: None,
        }
    }
}

impl DatasetConfig {
    /// Delimiter as the single byte the csv reader expects.
    pub fn delimiter_byte(&self) -> crate::Result<u8> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(|b| b.is_ascii())
            .ok_or_else(|| {
                crate::OncopeerError::Config(format!(
                    "delimiter {:?} is not a single ASCII character",
                    self.delimiter
                ))
            })
    }
}

// ── Ranking ───────────────────────────────────────────────────────────────────

/// How patients with equal similarity scores are ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Stable ascending sort on score, then reverse the whole sequence.
    /// Tied patients come out in reverse population order.
    #[default]
    StableReversed,
    /// Descending score, ties broken by ascending identifier.
    Identifier,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RankingConfig {
    #[serde(default)]
    pub tie_break: TieBreak,
}

// ── Helper Methods ─────────────────────────────────────────────────────────────

impl OncopeerConfig {
    /// Load from YAML file
    pub fn from_yaml(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load from JSON file
    pub fn from_json(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Load from TOML file
    pub fn from_toml(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save to YAML file
    pub fn to_yaml(&self, path: &str) -> anyhow::Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OncopeerConfig::default();
        assert_eq!(config.dataset.delimiter, '\t');
        assert_eq!(config.dataset.missing_token, "NA");
        assert!(config.dataset.id_column.is_none());
        assert_eq!(config.ranking.tie_break, TieBreak::StableReversed);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: OncopeerConfig = serde_yaml::from_str("ranking:\n  tie_break: identifier\n").unwrap();
        assert_eq!(config.ranking.tie_break, TieBreak::Identifier);
        assert_eq!(config.dataset.missing_token, "NA");
    }

    #[test]
    fn test_toml_dataset_section() {
        let config: OncopeerConfig = toml::from_str("[dataset]\ndelimiter = \",\"\nmissing_token = \"?\"\n").unwrap();
        assert_eq!(config.dataset.delimiter_byte().unwrap(), b',');
        assert_eq!(config.dataset.missing_token, "?");
        assert_eq!(config.ranking.tie_break, TieBreak::StableReversed);
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let config = DatasetConfig { delimiter: '§', ..Default::default() };
        assert!(config.delimiter_byte().is_err());
    }

    #[test]
    fn test_yaml_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("oncopeer.yaml");
        let path = path.to_str().unwrap();

        let mut config = OncopeerConfig::default();
        config.ranking.tie_break = TieBreak::Identifier;
        config.to_yaml(path).unwrap();

        let parsed = OncopeerConfig::from_yaml(path).unwrap();
        assert_eq!(parsed.ranking.tie_break, TieBreak::Identifier);
        assert_eq!(parsed.dataset.delimiter, '\t');
    }
}
