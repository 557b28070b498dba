//! mplsg configuration loading from `.mplsgrc.toml`.
//!
//! Configuration is optional; defaults apply when no file exists.
//!
//! # Example Configuration
//!
//! ```toml
//! [build]
//! quantifier_path_types = false
//! strict_destinations = true
//!
//! [output]
//! format = "json"
//! color = false
//! ```

use mplsg_core::BuildConfig;
use serde::Deserialize;
use std::path::Path;

/// Name of the config file looked up in the working directory.
pub const CONFIG_FILE: &str = ".mplsgrc.toml";

/// Root configuration structure.
#[derive(Debug, Deserialize, Default)]
pub struct MplsgConfig {
    /// Graph construction options.
    #[serde(default)]
    pub build: BuildConfig,

    /// Output formatting preferences.
    #[serde(default)]
    pub output: OutputSettings,
}

/// Output formatting preferences.
///
/// Command-line flags (e.g., `--format json`) override these settings.
#[derive(Debug, Deserialize, Default)]
pub struct OutputSettings {
    /// Default output format: `edges`, `json` or `stats`.
    #[serde(default)]
    pub format: Option<String>,

    /// Whether to use colored output. Defaults to on when stdout is a TTY.
    #[serde(default)]
    pub color: Option<bool>,
}

impl MplsgConfig {
    /// Load `.mplsgrc.toml` from the given directory.
    ///
    /// Missing or unparsable files yield defaults; parse errors are logged.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(CONFIG_FILE);
        if config_path.exists() {
            Self::load_file(&config_path)
        } else {
            Self::default()
        }
    }

    /// Load an explicit config file, falling back to defaults on error.
    pub fn load_file(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}", path.display(), e);
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", path.display(), e);
            }
        }
        Self::default()
    }

    /// Get the default output format, if configured.
    pub fn default_format(&self) -> Option<&str> {
        self.output.format.as_deref()
    }

    /// Configured color preference, or `None` to auto-detect.
    pub fn use_color(&self) -> Option<bool> {
        self.output.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = MplsgConfig::default();
        assert!(!config.build.quantifier_path_types);
        assert!(!config.build.strict_destinations);
        assert!(config.default_format().is_none());
        assert!(config.use_color().is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[build]
quantifier_path_types = true
strict_destinations = true

[output]
format = "json"
color = false
"#;
        let config: MplsgConfig = toml::from_str(toml_content).unwrap();
        assert!(config.build.quantifier_path_types);
        assert!(config.build.strict_destinations);
        assert_eq!(config.default_format(), Some("json"));
        assert_eq!(config.use_color(), Some(false));
    }

    #[test]
    fn test_partial_build_section() {
        let config: MplsgConfig = toml::from_str("[build]\nstrict_destinations = true\n").unwrap();
        assert!(config.build.strict_destinations);
        assert!(!config.build.quantifier_path_types);
    }

    #[test]
    fn test_load_missing_and_invalid() {
        let dir = TempDir::new().unwrap();
        let config = MplsgConfig::load(dir.path());
        assert!(config.default_format().is_none());

        std::fs::write(dir.path().join(CONFIG_FILE), "[output\nformat = ").unwrap();
        let config = MplsgConfig::load(dir.path());
        assert!(config.default_format().is_none());
    }

    #[test]
    fn test_load_from_directory() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "[output]\nformat = \"stats\"\n").unwrap();
        let config = MplsgConfig::load(dir.path());
        assert_eq!(config.default_format(), Some("stats"));
    }
}
