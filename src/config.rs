//! Engine configuration file support.
//!
//! This module provides utilities for reading engine configuration from
//! TOML configuration files. The only tunable today is the table of default
//! coefficients of variation used when a nutrient has too little history
//! for a statistical estimate.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{EngineError, EngineResult};

/// Engine configuration from file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub variation: VariationDefaults,
}

/// Default coefficients of variation per nutrient.
///
/// The built-in values encode agronomic literature and are used verbatim
/// when no configuration file overrides them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariationDefaults {
    #[serde(default = "default_nutrient_coefficients")]
    pub nutrients: BTreeMap<String, Decimal>,
    #[serde(default = "default_generic_coefficient")]
    pub generic: Decimal,
}

fn default_nutrient_coefficients() -> BTreeMap<String, Decimal> {
    BTreeMap::from([
        ("Nitrógeno".to_string(), Decimal::new(5, 1)),
        ("Fósforo".to_string(), Decimal::new(3, 1)),
        ("Potasio".to_string(), Decimal::new(4, 1)),
        ("Cobre".to_string(), Decimal::new(25, 2)),
        ("Zinc".to_string(), Decimal::new(25, 2)),
    ])
}

fn default_generic_coefficient() -> Decimal {
    Decimal::new(3, 1)
}

impl Default for VariationDefaults {
    fn default() -> Self {
        Self {
            nutrients: default_nutrient_coefficients(),
            generic: default_generic_coefficient(),
        }
    }
}

impl VariationDefaults {
    /// Default coefficient for a nutrient, falling back to the generic
    /// value for names without a literature entry.
    pub fn for_nutrient(&self, name: &str) -> Decimal {
        self.nutrients.get(name).copied().unwrap_or(self.generic)
    }
}

impl EngineConfig {
    /// Load engine configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(EngineConfig)` if successful
    /// * `Err(EngineError::Configuration)` if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            EngineError::configuration(format!("Failed to read config file: {}", e))
        })?;

        let config: EngineConfig = toml::from_str(&content).map_err(|e| {
            EngineError::configuration(format!("Failed to parse config file: {}", e))
        })?;

        Ok(config)
    }

    /// Load engine configuration from the default location.
    ///
    /// Searches for `engine.toml` in:
    /// 1. Current directory
    /// 2. `config/` directory
    /// 3. Parent directory
    ///
    /// # Returns
    /// * `Ok(EngineConfig)` if found and parsed successfully
    /// * `Err(EngineError::Configuration)` if no config file found or parse error
    pub fn from_default_location() -> EngineResult<Self> {
        let search_paths = vec![
            PathBuf::from("engine.toml"),
            PathBuf::from("config/engine.toml"),
            PathBuf::from("../engine.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(EngineError::configuration(
            "No engine.toml found in standard locations".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::str::FromStr;

    fn d(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    #[test]
    fn test_literature_defaults_are_built_in() {
        let defaults = VariationDefaults::default();
        assert_eq!(defaults.for_nutrient("Nitrógeno"), d("0.5"));
        assert_eq!(defaults.for_nutrient("Fósforo"), d("0.3"));
        assert_eq!(defaults.for_nutrient("Potasio"), d("0.4"));
        assert_eq!(defaults.for_nutrient("Cobre"), d("0.25"));
        assert_eq!(defaults.for_nutrient("Zinc"), d("0.25"));
    }

    #[test]
    fn test_unlisted_nutrients_use_the_generic_default() {
        let defaults = VariationDefaults::default();
        assert_eq!(defaults.for_nutrient("Manganeso"), d("0.3"));
        assert_eq!(defaults.for_nutrient("Silicio"), d("0.3"));
    }

    #[test]
    fn test_parse_empty_config() {
        let config: EngineConfig = toml::from_str("").unwrap();
        assert_eq!(config.variation, VariationDefaults::default());
    }

    #[test]
    fn test_parse_overridden_table() {
        let toml = r#"
[variation]
generic = "0.2"

[variation.nutrients]
"Nitrógeno" = "0.6"
"#;

        let config: EngineConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.variation.for_nutrient("Nitrógeno"), d("0.6"));
        assert_eq!(config.variation.for_nutrient("Fósforo"), d("0.2"));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[variation]\ngeneric = \"0.35\"\n\n[variation.nutrients]\n\"Potasio\" = \"0.45\""
        )
        .unwrap();

        let config = EngineConfig::from_file(file.path()).unwrap();
        assert_eq!(config.variation.for_nutrient("Potasio"), d("0.45"));
        assert_eq!(config.variation.for_nutrient("Boro"), d("0.35"));
    }

    #[test]
    fn test_missing_file_is_a_configuration_error() {
        let result = EngineConfig::from_file("/nonexistent/engine.toml");
        assert!(matches!(result, Err(EngineError::Configuration { .. })));
    }
}
