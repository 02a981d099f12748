//! Conversion of sufficiency gaps into required adjustment quantities.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};
use crate::models::{AdjustmentMap, NutrientLevels, VariationCoefficients};
use crate::services::liebig::sufficiency;

/// Required adjustment per nutrient in the ideal profile.
///
/// Nutrients at or above their target get a zero adjustment. Deficient
/// nutrients get the unit gap `ideal - actual` weighted by a quantized
/// factor built from the sufficiency gap and the nutrient's coefficient of
/// variation. Every nutrient of the ideal profile is present in the output,
/// zero entries included; the optimizer filters to the positive ones.
///
/// # Arguments
///
/// * `actual` - Measured levels; missing nutrients count as zero.
/// * `ideal` - Target levels defining which nutrients are considered.
/// * `coefficients` - Variation coefficients, required for every
///   deficient nutrient.
///
/// # Errors
///
/// [`EngineError::InvalidInput`] when a deficient nutrient has no
/// variation coefficient.
pub fn compute_adjustments(
    actual: &NutrientLevels,
    ideal: &NutrientLevels,
    coefficients: &VariationCoefficients,
) -> EngineResult<AdjustmentMap> {
    let mut adjustments = Vec::with_capacity(ideal.len());
    for (name, target) in ideal.iter() {
        let current = actual.get(name);
        let adjustment = if current < target {
            let cv = coefficients.get(name).ok_or_else(|| {
                EngineError::invalid_input(format!("missing variation coefficient for '{name}'"))
            })?;
            let p = sufficiency(current, target);
            // The weight mixes scales: a 0-100 sufficiency gap times cv
            // divided by 100, applied to an absolute unit gap. Likely unit
            // inconsistency, pending confirmation from the agronomy side.
            // Do not rescale here.
            let weight = ((Decimal::ONE_HUNDRED - p) * cv / Decimal::ONE_HUNDRED)
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            (target - current) * weight
        } else {
            Decimal::ZERO
        };
        adjustments.push((name.to_string(), adjustment));
    }
    Ok(AdjustmentMap::from_entries(adjustments))
}
