//! Nutrient-keyed decimal maps supplied by external collaborators.
//!
//! Both types are ordered maps: every iteration is lexical by nutrient name,
//! which is the deterministic order the engine relies on for tie-breaking.
//! Validation happens at construction (including deserialization), so a held
//! value is always well-formed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{EngineError, EngineResult};

/// Measured or target nutrient levels keyed by nutrient name.
///
/// Two instances participate in a request: the *actual* levels from a
/// leaf-tissue analysis and the *ideal* levels from a crop objective.
/// Negative levels are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    into = "BTreeMap<String, Decimal>",
    try_from = "BTreeMap<String, Decimal>"
)]
pub struct NutrientLevels(BTreeMap<String, Decimal>);

impl NutrientLevels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(name, level)` pairs.
    ///
    /// # Arguments
    /// * `entries` - nutrient names with their decimal levels
    ///
    /// # Returns
    /// * `Err(EngineError::InvalidInput)` if any level is negative
    pub fn from_entries<N, I>(entries: I) -> EngineResult<Self>
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, Decimal)>,
    {
        let map: BTreeMap<String, Decimal> = entries
            .into_iter()
            .map(|(name, value)| (name.into(), value))
            .collect();
        Self::try_from(map)
    }

    /// Level for a nutrient, zero when absent.
    pub fn get(&self, name: &str) -> Decimal {
        self.0.get(name).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in lexical name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.0.iter().map(|(name, value)| (name.as_str(), *value))
    }

    /// Nutrient names in lexical order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl From<NutrientLevels> for BTreeMap<String, Decimal> {
    fn from(levels: NutrientLevels) -> Self {
        levels.0
    }
}

impl TryFrom<BTreeMap<String, Decimal>> for NutrientLevels {
    type Error = EngineError;

    fn try_from(map: BTreeMap<String, Decimal>) -> EngineResult<Self> {
        for (name, value) in &map {
            if *value < Decimal::ZERO {
                return Err(EngineError::invalid_input(format!(
                    "negative level {value} for nutrient '{name}'"
                )));
            }
        }
        Ok(Self(map))
    }
}

/// Coefficients of variation keyed by nutrient name.
///
/// Dimensionless weights, typically in [0, 1]. Unlike [`NutrientLevels`]
/// there is no zero default: a missing coefficient is meaningful and use
/// sites decide how to handle it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    into = "BTreeMap<String, Decimal>",
    try_from = "BTreeMap<String, Decimal>"
)]
pub struct VariationCoefficients(BTreeMap<String, Decimal>);

impl VariationCoefficients {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(name, coefficient)` pairs. Negative coefficients are
    /// rejected.
    pub fn from_entries<N, I>(entries: I) -> EngineResult<Self>
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, Decimal)>,
    {
        let map: BTreeMap<String, Decimal> = entries
            .into_iter()
            .map(|(name, value)| (name.into(), value))
            .collect();
        Self::try_from(map)
    }

    /// Coefficient for a nutrient, if known.
    pub fn get(&self, name: &str) -> Option<Decimal> {
        self.0.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in lexical name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.0.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

impl From<VariationCoefficients> for BTreeMap<String, Decimal> {
    fn from(coefficients: VariationCoefficients) -> Self {
        coefficients.0
    }
}

impl TryFrom<BTreeMap<String, Decimal>> for VariationCoefficients {
    type Error = EngineError;

    fn try_from(map: BTreeMap<String, Decimal>) -> EngineResult<Self> {
        for (name, value) in &map {
            if *value < Decimal::ZERO {
                return Err(EngineError::invalid_input(format!(
                    "negative coefficient of variation {value} for nutrient '{name}'"
                )));
            }
        }
        Ok(Self(map))
    }
}
