use serde::{Deserialize, Serialize};

use crate::address::AssignmentPolicy;
use crate::filter::FilterExpression;

/// Top-level configuration structure that mirrors the YAML configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Display settings for address lists
    #[serde(default)]
    pub display: DisplayConfig,
    /// Limits applied when saving a user's assigned addresses
    #[serde(default)]
    pub assignment: AssignmentPolicy,
    /// Common address shortcuts offered by the advanced search panel
    #[serde(default)]
    pub presets: Vec<CommonIpPreset>,
}

/// Display settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Character budget before an address list is cut with an ellipsis
    #[serde(default = "default_max_length")]
    pub max_length: usize,
}

fn default_max_length() -> usize {
    50
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_length: default_max_length(),
        }
    }
}

/// A named common-address shortcut, e.g. an office prefix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommonIpPreset {
    pub label: String,
    /// Emitted verbatim as the `ipAddress` filter
    pub value: String,
}

/// Errors reported by [`Config::validate`]
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid display configuration: {0}")]
    InvalidDisplay(String),
    #[error("Invalid assignment configuration: {0}")]
    InvalidAssignment(String),
    #[error("Invalid preset configuration: {0}")]
    InvalidPreset(String),
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.display.max_length == 0 {
            return Err(ValidationError::InvalidDisplay(
                "max_length must be greater than zero".to_string(),
            ));
        }

        if self.assignment.max_addresses == 0 {
            return Err(ValidationError::InvalidAssignment(
                "max_addresses must be greater than zero".to_string(),
            ));
        }

        for preset in &self.presets {
            if preset.label.trim().is_empty() {
                return Err(ValidationError::InvalidPreset(format!(
                    "preset with value '{}' has an empty label",
                    preset.value
                )));
            }
            if let Err(e) = preset.value.parse::<FilterExpression>() {
                return Err(ValidationError::InvalidPreset(format!(
                    "preset '{}': {}",
                    preset.label, e
                )));
            }
        }

        Ok(())
    }

    /// Resolve a common choice given either a preset label or a literal value.
    pub fn resolve_common_choice(&self, choice: &str) -> String {
        let choice = choice.trim();
        self.presets
            .iter()
            .find(|preset| preset.label.eq_ignore_ascii_case(choice))
            .map(|preset| preset.value.clone())
            .unwrap_or_else(|| choice.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.display.max_length, 50);
        assert_eq!(config.assignment.max_addresses, 10);
        assert!(!config.assignment.allow_duplicates);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
display:
  max_length: 25
assignment:
  max_addresses: 3
  allow_duplicates: true
presets:
  - label: "Office LAN"
    value: "192.168.1."
  - label: "Unknown"
    value: "unknown"
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.display.max_length, 25);
        assert_eq!(config.assignment.max_addresses, 3);
        assert_eq!(config.presets.len(), 2);
        assert_eq!(config.resolve_common_choice("office lan"), "192.168.1.");
        assert_eq!(config.resolve_common_choice(" 10.0.0.7 "), "10.0.0.7");
    }

    #[test]
    fn test_validation_errors() {
        let mut config = Config::default();
        config.display.max_length = 0;
        assert!(matches!(config.validate(), Err(ValidationError::InvalidDisplay(_))));

        let mut config = Config::default();
        config.assignment.max_addresses = 0;
        assert!(matches!(config.validate(), Err(ValidationError::InvalidAssignment(_))));

        let mut config = Config::default();
        config.presets.push(CommonIpPreset { label: "Broken".into(), value: "range:1.1.1.1".into() });
        assert!(matches!(config.validate(), Err(ValidationError::InvalidPreset(_))));

        let mut config = Config::default();
        config.presets.push(CommonIpPreset { label: " ".into(), value: "10.".into() });
        assert!(matches!(config.validate(), Err(ValidationError::InvalidPreset(_))));
    }
}
