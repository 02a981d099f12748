//! Catalog of fertilizer products and their nutrient contributions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{EngineError, EngineResult};

type ContributionTable = BTreeMap<String, BTreeMap<String, Decimal>>;

/// Per-product nutrient contributions, per unit of product.
///
/// Absence of a nutrient key means zero contribution. Products iterate in
/// lexical name order, which fixes the optimizer's variable ordering and
/// the greedy heuristic's tie-breaking. Negative contributions are rejected
/// at construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(into = "ContributionTable", try_from = "ContributionTable")]
pub struct ProductCatalog(ContributionTable);

impl ProductCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(product, [(nutrient, contribution)])` pairs.
    ///
    /// # Returns
    /// * `Err(EngineError::InvalidInput)` if any contribution is negative
    pub fn from_entries<P, N, C, I>(entries: I) -> EngineResult<Self>
    where
        P: Into<String>,
        N: Into<String>,
        C: IntoIterator<Item = (N, Decimal)>,
        I: IntoIterator<Item = (P, C)>,
    {
        let table: ContributionTable = entries
            .into_iter()
            .map(|(product, contributions)| {
                (
                    product.into(),
                    contributions
                        .into_iter()
                        .map(|(nutrient, value)| (nutrient.into(), value))
                        .collect(),
                )
            })
            .collect();
        Self::try_from(table)
    }

    /// Contribution of one unit of `product` to `nutrient`, zero when the
    /// product is unknown or does not carry that nutrient.
    pub fn contribution(&self, product: &str, nutrient: &str) -> Decimal {
        self.0
            .get(product)
            .and_then(|contributions| contributions.get(nutrient))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// All contributions of a product, if the product exists.
    pub fn contributions_of(&self, product: &str) -> Option<&BTreeMap<String, Decimal>> {
        self.0.get(product)
    }

    /// Product names in lexical order.
    pub fn product_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether any product has a positive contribution to `nutrient`.
    pub fn has_contributor(&self, nutrient: &str) -> bool {
        self.product_names()
            .any(|product| self.contribution(product, nutrient) > Decimal::ZERO)
    }

    /// Product with the highest positive per-unit contribution to
    /// `nutrient`, together with that contribution. Ties resolve to the
    /// lexically first product name; `None` when no product contributes.
    pub fn best_contributor(&self, nutrient: &str) -> Option<(&str, Decimal)> {
        let mut best: Option<(&str, Decimal)> = None;
        for product in self.product_names() {
            let contribution = self.contribution(product, nutrient);
            if contribution > Decimal::ZERO {
                match best {
                    Some((_, current)) if contribution <= current => {}
                    _ => best = Some((product, contribution)),
                }
            }
        }
        best
    }
}

impl From<ProductCatalog> for ContributionTable {
    fn from(catalog: ProductCatalog) -> Self {
        catalog.0
    }
}

impl TryFrom<ContributionTable> for ProductCatalog {
    type Error = EngineError;

    fn try_from(table: ContributionTable) -> EngineResult<Self> {
        for (product, contributions) in &table {
            for (nutrient, value) in contributions {
                if *value < Decimal::ZERO {
                    return Err(EngineError::invalid_input(format!(
                        "negative contribution {value} of product '{product}' to '{nutrient}'"
                    )));
                }
            }
        }
        Ok(Self(table))
    }
}
