//! Coefficient-of-variation estimation from historical samples.
//!
//! Statistics run in floating point; results come back to fixed-point
//! decimal at the boundary, quantized to two decimal places.

use std::collections::BTreeMap;

use log::debug;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::VariationDefaults;
use crate::error::{EngineError, EngineResult};
use crate::models::{reference_nutrients, VariationCoefficients};

/// Coefficient of variation for one nutrient's historical samples.
///
/// With fewer than two samples there is no spread to measure and the
/// literature default for the nutrient is returned. Otherwise the result
/// is `σ / μ` with the Bessel-corrected sample standard deviation,
/// quantized to two decimals.
///
/// # Errors
///
/// [`EngineError::ZeroMean`] when the samples average to zero, which
/// indicates degenerate measurement data.
pub fn estimate_cv(
    nutrient: &str,
    samples: &[Decimal],
    defaults: &VariationDefaults,
) -> EngineResult<Decimal> {
    if samples.len() < 2 {
        let default = defaults.for_nutrient(nutrient);
        debug!(
            "using default variation coefficient {} for '{}' ({} samples)",
            default,
            nutrient,
            samples.len()
        );
        return Ok(default);
    }

    // Exact zero check before any float conversion.
    let total: Decimal = samples.iter().copied().sum();
    if total.is_zero() {
        return Err(EngineError::zero_mean(nutrient));
    }

    let values: Vec<f64> = samples
        .iter()
        .map(|sample| sample.to_f64())
        .collect::<Option<_>>()
        .ok_or_else(|| {
            EngineError::invalid_input(format!("sample for '{nutrient}' exceeds numeric range"))
        })?;
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    if mean == 0.0 {
        return Err(EngineError::zero_mean(nutrient));
    }
    let variance = values
        .iter()
        .map(|value| (value - mean).powi(2))
        .sum::<f64>()
        / (n - 1.0);
    let cv = variance.sqrt() / mean;

    Decimal::from_f64(cv)
        .map(|cv| cv.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .ok_or_else(|| {
            EngineError::invalid_input(format!(
                "variation coefficient for '{nutrient}' is not representable"
            ))
        })
}

/// Variation coefficients for every nutrient in the reference table.
///
/// `history` is keyed by nutrient name; nutrients without history, or with
/// a single sample, fall back to their literature default. History for
/// names outside the reference table is ignored.
pub fn resolve_coefficients(
    history: &BTreeMap<String, Vec<Decimal>>,
    defaults: &VariationDefaults,
) -> EngineResult<VariationCoefficients> {
    let mut entries = Vec::new();
    for info in reference_nutrients() {
        let samples = history
            .get(&info.name)
            .map(Vec::as_slice)
            .unwrap_or_default();
        let cv = estimate_cv(&info.name, samples, defaults)?;
        entries.push((info.name.clone(), cv));
    }
    VariationCoefficients::from_entries(entries)
}
