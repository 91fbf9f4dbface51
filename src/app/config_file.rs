//! Configuration file loading and parsing
//!
//! Loads configuration from `~/.config/svgview/config.toml`

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::classify::{Classifier, Rule, RuleSet, DEFAULT_ELEMENTS, DEFAULT_URI_SCHEMES};
use crate::error::Result;
use crate::panel::ControlOptions;
use crate::stream::{ReadLimits, DEFAULT_CHUNK_SIZE};

/// Main configuration file structure
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    /// Stream reading settings
    pub reader: ReaderConfig,
    /// Blocked-content rules
    pub classifier: ClassifierConfig,
    /// UI display settings
    pub ui: UiConfig,
}

/// Stream reading settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Bytes requested per read call
    pub chunk_size: usize,
    /// Largest document accepted, 0 for no limit
    pub max_bytes: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_bytes: 0,
        }
    }
}

impl ReaderConfig {
    pub fn limits(&self) -> ReadLimits {
        ReadLimits {
            chunk_size: self.chunk_size.max(1),
            max_bytes: (self.max_bytes > 0).then_some(self.max_bytes),
        }
    }
}

/// Blocked-content rule settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Include the built-in element list (script, foreignObject, ...)
    pub default_elements: bool,
    /// Include the built-in URI schemes (javascript, vbscript)
    pub default_uri_schemes: bool,
    /// Flag `on*=` event handler attributes
    pub event_attributes: bool,
    /// Flag `<animate>`/`<set>` targeting `href`
    pub animated_href: bool,
    /// Additional element names to flag
    pub extra_elements: Vec<String>,
    /// Additional URI schemes to flag
    pub uri_schemes: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            default_elements: true,
            default_uri_schemes: true,
            event_attributes: true,
            animated_href: true,
            extra_elements: Vec::new(),
            uri_schemes: Vec::new(),
        }
    }
}

impl ClassifierConfig {
    /// Build the rule set described by this section
    pub fn rule_set(&self) -> RuleSet {
        let mut rules = RuleSet::empty();
        if self.default_elements {
            rules.extend(DEFAULT_ELEMENTS.iter().map(|name| Rule::element(*name)));
        }
        rules.extend(
            self.extra_elements
                .iter()
                .map(|name| name.trim())
                .filter(|name| !name.is_empty())
                .map(Rule::element),
        );
        if self.event_attributes {
            rules.push(Rule::EventAttribute);
        }
        if self.default_uri_schemes {
            rules.extend(DEFAULT_URI_SCHEMES.iter().map(|s| Rule::uri_scheme(*s)));
        }
        rules.extend(
            self.uri_schemes
                .iter()
                .map(|s| s.trim().trim_end_matches(':'))
                .filter(|s| !s.is_empty())
                .map(Rule::uri_scheme),
        );
        if self.animated_href {
            rules.push(Rule::AnimatedHref);
        }
        rules
    }
}

/// UI display settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Syntax-highlight the document markup
    pub highlight: bool,
    /// syntect theme name
    pub theme: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            highlight: true,
            theme: "base16-ocean.dark".to_string(),
        }
    }
}

impl ConfigFile {
    /// Get the config directory path (~/.config/svgview)
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("svgview"))
    }

    /// Get the config file path (~/.config/svgview/config.toml)
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("config.toml"))
    }

    /// Load configuration from file
    ///
    /// Returns default config if file doesn't exist or can't be parsed
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| {
                if path.exists() {
                    fs::read_to_string(&path).ok()
                } else {
                    None
                }
            })
            .and_then(|content| match toml::from_str(&content) {
                Ok(config) => Some(config),
                Err(e) => {
                    log::warn!("ignoring malformed config file: {}", e);
                    None
                }
            })
            .unwrap_or_default()
    }

    /// Load configuration from a specific path (for testing)
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: ConfigFile = toml::from_str(&content)?;
        Ok(config)
    }

    /// Options for a preview control configured by this file
    pub fn control_options(&self) -> Result<ControlOptions> {
        Ok(ControlOptions {
            limits: self.reader.limits(),
            classifier: Classifier::new(&self.classifier.rule_set())?,
            ..ControlOptions::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = ConfigFile::default();
        assert_eq!(config.reader.chunk_size, 4096);
        assert_eq!(config.reader.max_bytes, 0);
        assert!(config.classifier.default_elements);
        assert!(config.classifier.event_attributes);
        assert!(config.classifier.extra_elements.is_empty());
        assert!(config.ui.highlight);
        assert_eq!(config.ui.theme, "base16-ocean.dark");
    }

    #[test]
    fn test_default_rules_match_standard_set() {
        let config = ConfigFile::default();
        assert_eq!(config.classifier.rule_set(), RuleSet::standard());
    }

    #[test]
    fn test_parse_partial_config() {
        let toml_content = r#"
[reader]
max_bytes = 1048576

[classifier]
extra_elements = ["use", " "]
uri_schemes = ["data:"]
"#;
        let config: ConfigFile = toml::from_str(toml_content).unwrap();
        assert_eq!(config.reader.chunk_size, 4096); // default
        assert_eq!(config.reader.limits().max_bytes, Some(1048576));

        let rules = config.classifier.rule_set();
        assert!(rules.rules().contains(&Rule::element("use")));
        assert!(rules.rules().contains(&Rule::uri_scheme("data")));
        assert!(rules.rules().contains(&Rule::element("script")));
        assert_eq!(rules.len(), RuleSet::standard().len() + 2);
    }

    #[test]
    fn test_disable_defaults() {
        let toml_content = r#"
[classifier]
default_elements = false
default_uri_schemes = false
event_attributes = false
animated_href = false
extra_elements = ["script"]
"#;
        let config: ConfigFile = toml::from_str(toml_content).unwrap();
        assert_eq!(
            config.classifier.rule_set(),
            RuleSet::empty().with(Rule::element("script"))
        );
    }

    #[test]
    fn test_unlimited_reader_and_zero_chunk() {
        let config: ConfigFile = toml::from_str("[reader]\nchunk_size = 0\n").unwrap();
        let limits = config.reader.limits();
        assert_eq!(limits.chunk_size, 1);
        assert_eq!(limits.max_bytes, None);
    }

    #[test]
    fn test_control_options_use_config() {
        let toml_content = r#"
[reader]
chunk_size = 512

[classifier]
default_elements = false
"#;
        let config: ConfigFile = toml::from_str(toml_content).unwrap();
        let options = config.control_options().unwrap();
        assert_eq!(options.limits.chunk_size, 512);
        assert!(!options.classifier.contains_blocked("<svg><script/></svg>"));
        assert!(options.classifier.contains_blocked(r#"<svg onload="x()"/>"#));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[ui]
highlight = false
"#
        )
        .unwrap();

        let config = ConfigFile::load_from(file.path()).unwrap();
        assert!(!config.ui.highlight);
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "invalid toml {{{{").unwrap();

        let result = ConfigFile::load_from(file.path());
        assert!(result.is_err());
    }
}
