//! Liebig's law of the minimum.
//!
//! Sufficiency percentages, identification of the limiting nutrient and
//! corrected levels. All percentages live on a 0-100 scale and stay
//! unquantized until a value crosses the crate boundary.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};
use crate::models::{NutrientAssessment, NutrientLevels, VariationCoefficients};

/// Sufficiency of `actual` against `ideal`, as a 0-100 percentage.
///
/// An ideal at or below zero yields zero instead of dividing.
pub fn sufficiency(actual: Decimal, ideal: Decimal) -> Decimal {
    if ideal > Decimal::ZERO {
        actual / ideal * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    }
}

/// Sufficiency percentage for every nutrient in the ideal profile.
///
/// The profile is keyed by the ideal set; nutrients absent from `actual`
/// count as fully missing.
///
/// # Errors
///
/// [`EngineError::EmptyTargetSet`] when `ideal` names no nutrients.
pub fn sufficiency_profile(
    actual: &NutrientLevels,
    ideal: &NutrientLevels,
) -> EngineResult<BTreeMap<String, Decimal>> {
    if ideal.is_empty() {
        return Err(EngineError::EmptyTargetSet);
    }
    Ok(ideal
        .iter()
        .map(|(name, target)| (name.to_string(), sufficiency(actual.get(name), target)))
        .collect())
}

/// The nutrient with the lowest sufficiency, with its percentage.
///
/// Ties resolve to the lexically smallest name, so the result is
/// deterministic for equal percentages.
///
/// # Errors
///
/// [`EngineError::EmptyTargetSet`] when the profile is empty.
pub fn limiting_nutrient(
    sufficiencies: &BTreeMap<String, Decimal>,
) -> EngineResult<(&str, Decimal)> {
    let mut limiting: Option<(&str, Decimal)> = None;
    for (name, value) in sufficiencies {
        match limiting {
            Some((_, current)) if *value >= current => {}
            _ => limiting = Some((name, *value)),
        }
    }
    limiting.ok_or(EngineError::EmptyTargetSet)
}

/// The nutrient whose measured level is furthest below its target.
///
/// Convenience composition of [`sufficiency_profile`] and
/// [`limiting_nutrient`].
///
/// # Errors
///
/// [`EngineError::EmptyTargetSet`] when `ideal` names no nutrients.
pub fn identify_limiting(
    actual: &NutrientLevels,
    ideal: &NutrientLevels,
) -> EngineResult<String> {
    let profile = sufficiency_profile(actual, ideal)?;
    let (name, _) = limiting_nutrient(&profile)?;
    Ok(name.to_string())
}

/// Correction factor `i` for a sufficiency percentage, quantized to two
/// decimals with midpoints rounded away from zero.
pub(crate) fn correction_factor(sufficiency: Decimal, cv: Decimal) -> Decimal {
    let gap = if sufficiency > Decimal::ONE_HUNDRED {
        sufficiency - Decimal::ONE_HUNDRED
    } else {
        Decimal::ONE_HUNDRED - sufficiency
    };
    (gap * cv / Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Corrected level `r`: the sufficiency pulled toward 100 by the
/// correction factor, quantized to two decimals.
pub(crate) fn corrected_level(sufficiency: Decimal, correction: Decimal) -> Decimal {
    let corrected = if sufficiency > Decimal::ONE_HUNDRED {
        sufficiency - correction
    } else {
        sufficiency + correction
    };
    corrected.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Assess every measured nutrient against a single plant demand level.
///
/// Only the limiting nutrient receives a non-zero correction; the rest
/// carry their sufficiency through unchanged.
///
/// # Arguments
///
/// * `levels` - Measured nutrient levels.
/// * `plant_demand` - Demand level shared by all nutrients.
/// * `coefficients` - Variation coefficients; only the limiting
///   nutrient's coefficient is required.
///
/// # Errors
///
/// [`EngineError::EmptyTargetSet`] when `levels` is empty, or
/// [`EngineError::InvalidInput`] when the limiting nutrient has no
/// variation coefficient.
pub fn assess_nutrients(
    levels: &NutrientLevels,
    plant_demand: Decimal,
    coefficients: &VariationCoefficients,
) -> EngineResult<BTreeMap<String, NutrientAssessment>> {
    if levels.is_empty() {
        return Err(EngineError::EmptyTargetSet);
    }
    let sufficiencies: BTreeMap<String, Decimal> = levels
        .iter()
        .map(|(name, value)| (name.to_string(), sufficiency(value, plant_demand)))
        .collect();
    let (limiting, _) = limiting_nutrient(&sufficiencies)?;
    let limiting = limiting.to_string();

    let mut assessments = BTreeMap::new();
    for (name, p) in &sufficiencies {
        let (correction, corrected) = if *name == limiting {
            let cv = coefficients.get(name).ok_or_else(|| {
                EngineError::invalid_input(format!("missing variation coefficient for '{name}'"))
            })?;
            let i = correction_factor(*p, cv);
            (i, corrected_level(*p, i))
        } else {
            (
                Decimal::new(0, 2),
                p.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
            )
        };
        assessments.insert(
            name.clone(),
            NutrientAssessment {
                sufficiency: *p,
                correction,
                corrected,
            },
        );
    }
    Ok(assessments)
}

/// Signed gap `actual - ideal` for every nutrient named on either side.
pub fn compute_balance(
    actual: &NutrientLevels,
    ideal: &NutrientLevels,
) -> BTreeMap<String, Decimal> {
    let mut names: BTreeSet<&str> = actual.names().collect();
    names.extend(ideal.names());
    names
        .into_iter()
        .map(|name| (name.to_string(), actual.get(name) - ideal.get(name)))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use proptest::prelude::*;

    use super::*;

    fn d(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    #[test]
    fn test_sufficiency_is_a_percentage() {
        assert_eq!(sufficiency(d("50"), d("100")), d("50"));
        assert_eq!(sufficiency(d("20"), d("50")), d("40"));
        assert_eq!(sufficiency(d("120"), d("100")), d("120"));
    }

    #[test]
    fn test_sufficiency_guards_against_zero_ideal() {
        assert_eq!(sufficiency(d("50"), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_sufficiency_keeps_full_precision() {
        let value = sufficiency(d("1"), d("3"));
        assert_eq!(
            value.round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero),
            d("33.3333")
        );
    }

    #[test]
    fn test_profile_covers_the_ideal_set() {
        let actual = NutrientLevels::from_entries([("Nitrógeno", d("50"))]).unwrap();
        let ideal =
            NutrientLevels::from_entries([("Nitrógeno", d("100")), ("Fósforo", d("50"))])
                .unwrap();
        let profile = sufficiency_profile(&actual, &ideal).unwrap();
        assert_eq!(profile["Nitrógeno"], d("50"));
        assert_eq!(profile["Fósforo"], Decimal::ZERO);
    }

    #[test]
    fn test_profile_rejects_an_empty_target_set() {
        let actual = NutrientLevels::from_entries([("Nitrógeno", d("50"))]).unwrap();
        let ideal = NutrientLevels::new();
        assert!(matches!(
            sufficiency_profile(&actual, &ideal),
            Err(EngineError::EmptyTargetSet)
        ));
    }

    #[test]
    fn test_limiting_nutrient_takes_the_minimum() {
        let actual = NutrientLevels::from_entries([
            ("Nitrógeno", d("50")),
            ("Fósforo", d("20")),
            ("Potasio", d("80")),
        ])
        .unwrap();
        let ideal = NutrientLevels::from_entries([
            ("Nitrógeno", d("100")),
            ("Fósforo", d("50")),
            ("Potasio", d("90")),
        ])
        .unwrap();
        let profile = sufficiency_profile(&actual, &ideal).unwrap();
        let (name, value) = limiting_nutrient(&profile).unwrap();
        assert_eq!(name, "Fósforo");
        assert_eq!(value, d("40"));
    }

    #[test]
    fn test_identify_limiting_prefers_the_lowest_percentage() {
        let actual =
            NutrientLevels::from_entries([("Alpha", d("50")), ("Beta", d("90"))]).unwrap();
        let ideal =
            NutrientLevels::from_entries([("Alpha", d("100")), ("Beta", d("100"))]).unwrap();
        assert_eq!(identify_limiting(&actual, &ideal).unwrap(), "Alpha");
    }

    #[test]
    fn test_limiting_ties_break_lexically() {
        let profile = BTreeMap::from([
            ("Boro".to_string(), d("40")),
            ("Azufre".to_string(), d("40")),
            ("Calcio".to_string(), d("90")),
        ]);
        let (name, _) = limiting_nutrient(&profile).unwrap();
        assert_eq!(name, "Azufre");
    }

    #[test]
    fn test_correction_factor_scales_the_gap() {
        assert_eq!(correction_factor(d("50"), d("0.5")), d("0.25"));
        assert_eq!(correction_factor(d("64"), d("0.3")), d("0.11"));
        assert_eq!(correction_factor(d("100"), d("0.5")), d("0.00"));
    }

    #[test]
    fn test_correction_factor_uses_the_surplus_gap_above_hundred() {
        assert_eq!(correction_factor(d("120"), d("0.5")), d("0.10"));
    }

    #[test]
    fn test_correction_midpoints_round_away_from_zero() {
        // (100 - 75) * 0.5 / 100 = 0.125, a two-decimal midpoint
        assert_eq!(correction_factor(d("75"), d("0.5")), d("0.13"));
    }

    #[test]
    fn test_corrected_level_moves_toward_hundred() {
        assert_eq!(corrected_level(d("40"), d("0.30")), d("40.30"));
        assert_eq!(corrected_level(d("120"), d("0.10")), d("119.90"));
    }

    #[test]
    fn test_assessment_corrects_only_the_limiting_nutrient() {
        let levels = NutrientLevels::from_entries([
            ("Nitrógeno", d("50")),
            ("Fósforo", d("20")),
            ("Potasio", d("80")),
        ])
        .unwrap();
        let coefficients = VariationCoefficients::from_entries([
            ("Nitrógeno", d("0.5")),
            ("Fósforo", d("0.3")),
            ("Potasio", d("0.4")),
        ])
        .unwrap();
        let assessments = assess_nutrients(&levels, d("100"), &coefficients).unwrap();

        let phosphorus = &assessments["Fósforo"];
        assert_eq!(phosphorus.sufficiency, d("20"));
        assert_eq!(phosphorus.correction, d("0.24"));
        assert_eq!(phosphorus.corrected, d("20.24"));

        let nitrogen = &assessments["Nitrógeno"];
        assert_eq!(nitrogen.correction, Decimal::ZERO);
        assert_eq!(nitrogen.corrected, d("50.00"));
    }

    #[test]
    fn test_assessment_requires_the_limiting_coefficient() {
        let levels =
            NutrientLevels::from_entries([("Nitrógeno", d("50")), ("Fósforo", d("20"))])
                .unwrap();
        let coefficients =
            VariationCoefficients::from_entries([("Nitrógeno", d("0.5"))]).unwrap();
        let result = assess_nutrients(&levels, d("100"), &coefficients);
        assert!(matches!(result, Err(EngineError::InvalidInput { .. })));
    }

    #[test]
    fn test_assessment_rejects_empty_levels() {
        let coefficients = VariationCoefficients::new();
        let result = assess_nutrients(&NutrientLevels::new(), d("100"), &coefficients);
        assert!(matches!(result, Err(EngineError::EmptyTargetSet)));
    }

    #[test]
    fn test_balance_spans_both_sides() {
        let actual =
            NutrientLevels::from_entries([("Nitrógeno", d("50")), ("Zinc", d("10"))]).unwrap();
        let ideal =
            NutrientLevels::from_entries([("Nitrógeno", d("100")), ("Cobre", d("20"))])
                .unwrap();
        let balance = compute_balance(&actual, &ideal);
        assert_eq!(balance["Nitrógeno"], d("-50"));
        assert_eq!(balance["Zinc"], d("10"));
        assert_eq!(balance["Cobre"], d("-20"));
    }

    proptest! {
        #[test]
        fn prop_same_level_is_fully_sufficient(value in 1u32..10_000) {
            let level = Decimal::from(value);
            prop_assert_eq!(sufficiency(level, level), Decimal::ONE_HUNDRED);
        }

        #[test]
        fn prop_sufficiency_is_monotonic_in_actual(
            low in 0u32..5_000,
            delta in 1u32..5_000,
            ideal in 1u32..10_000,
        ) {
            let ideal = Decimal::from(ideal);
            let lower = sufficiency(Decimal::from(low), ideal);
            let higher = sufficiency(Decimal::from(low + delta), ideal);
            prop_assert!(higher > lower);
        }
    }
}
