//! Run configuration.
//!
//! Loaded from a TOML file or from `ALLOT_*` environment variables layered
//! over defaults. Every section is optional in the file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::allotment::{SeatAllocator, UNALLOCATED_LABEL};
use crate::models::{CategorySet, DEFAULT_CATEGORIES};
use crate::normalize::InputNormalizer;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllotConfig {
    /// Input file locations
    pub inputs: InputConfig,

    /// Output file location
    pub output: OutputConfig,

    /// Allocation policy
    pub allotment: AllotmentConfig,

    /// Statistics view
    pub stats: StatsConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Input file locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub students: PathBuf,
    pub seats: PathBuf,
    pub preferences: PathBuf,
}

/// Output file location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: PathBuf,
}

/// Allocation policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllotmentConfig {
    /// Closed quota set for the run
    pub categories: Vec<String>,

    /// Institution text for students without a seat
    pub unallocated_label: String,
}

/// Statistics view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Number of institutions listed by volume
    pub top_institutions: usize,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            students: PathBuf::from("students.csv"),
            seats: PathBuf::from("seat.csv"),
            preferences: PathBuf::from("preference.csv"),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("college_allocation_results_submission.csv"),
        }
    }
}

impl Default for AllotmentConfig {
    fn default() -> Self {
        Self {
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            unallocated_label: UNALLOCATED_LABEL.to_string(),
        }
    }
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            top_institutions: 10,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

impl AllotConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from a variable lookup, over defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = lookup("ALLOT_STUDENTS") {
            config.inputs.students = v.into();
        }
        if let Some(v) = lookup("ALLOT_SEATS") {
            config.inputs.seats = v.into();
        }
        if let Some(v) = lookup("ALLOT_PREFERENCES") {
            config.inputs.preferences = v.into();
        }
        if let Some(v) = lookup("ALLOT_OUTPUT") {
            config.output.path = v.into();
        }
        if let Some(v) = lookup("ALLOT_CATEGORIES") {
            config.allotment.categories = v.split(',').map(|c| c.trim().to_string()).collect();
        }
        if let Some(v) = lookup("ALLOT_UNALLOCATED_LABEL") {
            config.allotment.unallocated_label = v;
        }
        if let Some(v) = lookup("ALLOT_TOP_INSTITUTIONS") {
            config.stats.top_institutions = v
                .trim()
                .parse()
                .with_context(|| format!("ALLOT_TOP_INSTITUTIONS is not a number: {v}"))?;
        }
        if let Some(v) = lookup("ALLOT_LOG_LEVEL") {
            config.logging.level = v;
        }
        if let Some(v) = lookup("ALLOT_LOG_FORMAT") {
            config.logging.format = v;
        }

        Ok(config)
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.allotment.categories.is_empty() {
            anyhow::bail!("allotment.categories must name at least one quota category");
        }

        let mut seen = HashSet::new();
        for cat in &self.allotment.categories {
            let name = cat.trim();
            if name.is_empty() {
                anyhow::bail!("allotment.categories contains an empty name");
            }
            if !seen.insert(name) {
                anyhow::bail!("allotment.categories lists '{name}' more than once");
            }
        }

        if self.stats.top_institutions == 0 {
            anyhow::bail!("stats.top_institutions must be greater than 0");
        }

        Ok(())
    }

    /// The closed quota set
    #[must_use]
    pub fn category_set(&self) -> CategorySet {
        CategorySet::new(self.allotment.categories.iter().cloned())
    }

    /// Normalizer for this configuration
    #[must_use]
    pub fn normalizer(&self) -> InputNormalizer {
        InputNormalizer::new(self.category_set())
    }

    /// Allocator for this configuration
    #[must_use]
    pub fn allocator(&self) -> SeatAllocator {
        SeatAllocator::new()
            .with_categories(self.category_set())
            .with_unallocated_label(self.allotment.unallocated_label.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = AllotConfig::default();
        assert_eq!(config.inputs.students, PathBuf::from("students.csv"));
        assert_eq!(config.inputs.seats, PathBuf::from("seat.csv"));
        assert_eq!(config.allotment.categories.len(), 6);
        assert_eq!(config.allotment.unallocated_label, "No College Available");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml() {
        let config = AllotConfig::from_toml_str(
            r#"
            [allotment]
            categories = ["GEN", "SC"]

            [output]
            path = "out/results.csv"
            "#,
        )
        .unwrap();

        assert_eq!(config.allotment.categories, vec!["GEN", "SC"]);
        assert_eq!(config.allotment.unallocated_label, "No College Available");
        assert_eq!(config.output.path, PathBuf::from("out/results.csv"));
        assert_eq!(config.inputs, InputConfig::default());
        assert!(config.category_set().contains("GEN"));
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = [
            ("ALLOT_SEATS", "data/seats.csv"),
            ("ALLOT_CATEGORIES", "SC, ST"),
            ("ALLOT_TOP_INSTITUTIONS", "3"),
        ]
        .into_iter()
        .collect();

        let config = AllotConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.inputs.seats, PathBuf::from("data/seats.csv"));
        assert_eq!(config.allotment.categories, vec!["SC", "ST"]);
        assert_eq!(config.stats.top_institutions, 3);
        assert_eq!(config.inputs.students, PathBuf::from("students.csv"));
    }

    #[test]
    fn test_from_lookup_bad_number() {
        let result = AllotConfig::from_lookup(|k| {
            (k == "ALLOT_TOP_INSTITUTIONS").then(|| "many".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_bad_categories() {
        let mut config = AllotConfig::default();
        config.allotment.categories = vec![];
        assert!(config.validate().is_err());

        config.allotment.categories = vec!["SC".into(), " SC ".into()];
        assert!(config.validate().is_err());

        config.allotment.categories = vec!["SC".into(), "  ".into()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_top() {
        let mut config = AllotConfig::default();
        config.stats.top_institutions = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("allot.toml");
        std::fs::write(&path, "[stats]\ntop_institutions = 5\n").unwrap();

        let config = AllotConfig::from_file(&path).unwrap();
        assert_eq!(config.stats.top_institutions, 5);

        let missing = AllotConfig::from_file(&dir.path().join("missing.toml"));
        assert!(missing.is_err());
    }

    #[test]
    fn test_allocator_uses_config() {
        let mut config = AllotConfig::default();
        config.allotment.unallocated_label = "Not Allotted".into();
        let allocator = config.allocator();
        assert_eq!(allocator.unallocated_label(), "Not Allotted");
        assert_eq!(allocator.categories().len(), 6);
        assert_eq!(config.normalizer().categories().len(), 6);
    }
}
