//! Classifier scoring configuration

use serde::{Deserialize, Serialize};

use crate::ClassifierError;

/// Weights applied per matching pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Weight added when a pattern matches the clause title
    pub title_weight: f64,

    /// Weight added when a pattern matches the clause body
    pub text_weight: f64,
}

impl ClassifierConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ClassifierError> {
        for (name, weight) in [("title_weight", self.title_weight), ("text_weight", self.text_weight)] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ClassifierError::Config(format!(
                    "{} must be a non-negative number, got {}",
                    name, weight
                )));
            }
        }
        if self.title_weight == 0.0 && self.text_weight == 0.0 {
            return Err(ClassifierError::Config(
                "title_weight and text_weight cannot both be 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ClassifierError> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| ClassifierError::Config(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ClassifierError> {
        toml::to_string_pretty(self)
            .map_err(|e| ClassifierError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            title_weight: 2.0,
            text_weight: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(ClassifierConfig::default().validate().is_ok());
    }

    #[test]
    fn test_negative_weight_rejected() {
        let config = ClassifierConfig {
            text_weight: -1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_nan_weight_rejected() {
        let config = ClassifierConfig {
            title_weight: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_toml() {
        let config = ClassifierConfig::from_toml("title_weight = 3.0").unwrap();
        assert_eq!(config.title_weight, 3.0);
        assert_eq!(config.text_weight, 1.0);
        assert_eq!(ClassifierConfig::from_toml(&config.to_toml().unwrap()).unwrap(), config);
    }
}
