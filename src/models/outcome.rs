//! Derived engine outputs: adjustments, optimization results, assessments.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Required adjustment per nutrient, derived from sufficiency gaps.
///
/// Values are zero or positive; negative inputs clamp to zero at
/// construction. Every nutrient the calculation saw keeps its key, so
/// callers filter through [`AdjustmentMap::positive_entries`] before
/// optimizing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(into = "BTreeMap<String, Decimal>", from = "BTreeMap<String, Decimal>")]
pub struct AdjustmentMap(BTreeMap<String, Decimal>);

impl AdjustmentMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(name, adjustment)` pairs, clamping negatives to zero.
    pub fn from_entries<N, I>(entries: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, Decimal)>,
    {
        Self::from(
            entries
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect::<BTreeMap<String, Decimal>>(),
        )
    }

    /// Adjustment for a nutrient, zero when absent.
    pub fn get(&self, name: &str) -> Decimal {
        self.0.get(name).copied().unwrap_or(Decimal::ZERO)
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

    /// Nutrients that actually require correction.
    pub fn positive_entries(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.iter().filter(|(_, value)| *value > Decimal::ZERO)
    }

    /// Whether any nutrient requires correction.
    pub fn has_positive(&self) -> bool {
        self.positive_entries().next().is_some()
    }
}

impl From<BTreeMap<String, Decimal>> for AdjustmentMap {
    fn from(map: BTreeMap<String, Decimal>) -> Self {
        Self(
            map.into_iter()
                .map(|(name, value)| (name, value.max(Decimal::ZERO)))
                .collect(),
        )
    }
}

impl From<AdjustmentMap> for BTreeMap<String, Decimal> {
    fn from(adjustments: AdjustmentMap) -> Self {
        adjustments.0
    }
}

/// Result of a product optimization run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    /// Units of each product to apply.
    pub quantities: BTreeMap<String, Decimal>,
    /// Nutrient amounts the plan delivers.
    pub delivered: BTreeMap<String, Decimal>,
}

impl OptimizationResult {
    /// A plan that applies nothing: zero for every product and nutrient.
    pub fn all_zero<'a>(
        products: impl IntoIterator<Item = &'a str>,
        nutrients: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self {
            quantities: products
                .into_iter()
                .map(|name| (name.to_string(), Decimal::ZERO))
                .collect(),
            delivered: nutrients
                .into_iter()
                .map(|name| (name.to_string(), Decimal::ZERO))
                .collect(),
        }
    }

    /// True when no product has a positive quantity.
    pub fn is_empty_plan(&self) -> bool {
        self.quantities.values().all(|value| *value <= Decimal::ZERO)
    }
}

/// Per-nutrient Liebig assessment against a plant demand: sufficiency
/// percentage `p`, applied correction `i`, and corrected level `r`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutrientAssessment {
    pub sufficiency: Decimal,
    pub correction: Decimal,
    pub corrected: Decimal,
}
