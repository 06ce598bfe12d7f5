//! Optional configuration file for a check run.
//!
//! # Example YAML
//!
//! ```yaml
//! pattern: '\.ya?ml$'
//! exclude:
//!   - node_modules
//!   - .git
//! follow_links: false
//! ```
//!
//! Every key is optional; command-line flags take precedence over the file.

use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Settings for discovering schema files.
///
/// # Examples
///
/// ```
/// # use hyperschema_loader::CheckConfig;
/// let config: CheckConfig = serde_yaml::from_str("exclude: [vendor]").unwrap();
/// assert!(config.pattern.is_none());
/// assert!(config.is_excluded("vendor"));
/// assert!(!config.follow_links);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    /// Regular expression matched against file names (not whole paths).
    pub pattern: Option<String>,
    /// Directory names that are never descended into.
    pub exclude: Vec<String>,
    /// Follow symbolic links while walking.
    pub follow_links: bool,
}

impl CheckConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::LoaderError::IoError) if the file cannot
    /// be read, or [`YamlError`](crate::LoaderError::YamlError) if parsing
    /// fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Returns `true` if a directory called `name` is excluded.
    pub fn is_excluded(&self, name: &str) -> bool {
        self.exclude.iter().any(|d| d == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_complete() {
        let yaml = r#"
pattern: '\.ya?ml$'
exclude:
  - node_modules
  - .git
follow_links: true
"#;
        let config: CheckConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.pattern.as_deref(), Some(r"\.ya?ml$"));
        assert_eq!(config.exclude, vec!["node_modules", ".git"]);
        assert!(config.follow_links);
        assert!(config.is_excluded(".git"));
        assert!(!config.is_excluded("schemas"));
    }

    #[test]
    fn test_empty_document_is_default() {
        let config: CheckConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, CheckConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jhs-check.yml");
        std::fs::write(&path, "pattern: user\n").unwrap();

        let config = CheckConfig::load(&path).unwrap();
        assert_eq!(config.pattern.as_deref(), Some("user"));
        assert!(config.exclude.is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let err = CheckConfig::load("/nonexistent/jhs-check.yml").unwrap_err();
        assert!(matches!(err, crate::LoaderError::IoError(_)));
    }

    #[test]
    fn test_load_invalid_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yml");
        std::fs::write(&path, "exclude: {nested: [}").unwrap();

        let err = CheckConfig::load(&path).unwrap_err();
        assert!(matches!(err, crate::LoaderError::YamlError(_)));
    }
}
