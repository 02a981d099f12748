//! Product-quantity optimization over positive nutrient adjustments.
//!
//! The optimizer minimizes total product units subject to covering every
//! required adjustment, then walks a fallback ladder when a solve fails:
//! alternative solver, relaxed requirements, and finally a greedy
//! heuristic that cannot fail. Solver arithmetic is floating point;
//! quantities come back to fixed-point decimal before leaving this module.

use std::collections::BTreeMap;

use log::{debug, warn};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::algorithms::{
    InteriorPointSolver, LinearProgramSolver, LpConstraint, LpProblem, SimplexSolver,
    SolverFailure,
};
use crate::error::{EngineError, EngineResult};
use crate::models::{AdjustmentMap, OptimizationResult, ProductCatalog};

/// Solver outputs below this threshold collapse to exactly zero.
const QUANTITY_EPSILON: f64 = 1e-6;

/// Right-hand-side scale applied on the relaxation rung of the ladder.
const RELAXATION_FACTOR: f64 = 0.8;

/// Finds minimal product quantities covering a set of required nutrient
/// adjustments.
pub struct LinearProgramOptimizer {
    primary: Box<dyn LinearProgramSolver>,
    alternative: Box<dyn LinearProgramSolver>,
}

impl Default for LinearProgramOptimizer {
    fn default() -> Self {
        Self {
            primary: Box::new(SimplexSolver),
            alternative: Box::new(InteriorPointSolver),
        }
    }
}

impl LinearProgramOptimizer {
    /// Optimizer with the stock solver pair: simplex first, interior-point
    /// as the alternative.
    pub fn new() -> Self {
        Self::default()
    }

    /// Optimizer with explicit solver backends, primarily for tests that
    /// need to force the fallback ladder.
    pub fn with_solvers(
        primary: Box<dyn LinearProgramSolver>,
        alternative: Box<dyn LinearProgramSolver>,
    ) -> Self {
        Self {
            primary,
            alternative,
        }
    }

    /// Compute product quantities whose contributions cover every positive
    /// adjustment, minimizing the total number of units.
    ///
    /// Required nutrients that no product contributes to are dropped from
    /// the solve with a warning. The result always carries one quantity per
    /// catalog product and one delivered amount per adjustment entry.
    ///
    /// # Errors
    ///
    /// * [`EngineError::NoProductsAvailable`] when there are positive
    ///   adjustments but the catalog is empty.
    /// * [`EngineError::InfeasibleRequirements`] when no product
    ///   contributes to any required nutrient.
    pub fn optimize(
        &self,
        adjustments: &AdjustmentMap,
        catalog: &ProductCatalog,
    ) -> EngineResult<OptimizationResult> {
        let required: Vec<(String, Decimal)> = adjustments
            .positive_entries()
            .map(|(name, value)| (name.to_string(), value))
            .collect();
        if required.is_empty() {
            return Ok(OptimizationResult::all_zero(
                catalog.product_names(),
                adjustments.names(),
            ));
        }
        if catalog.is_empty() {
            return Err(EngineError::NoProductsAvailable);
        }

        let mut coverable = Vec::with_capacity(required.len());
        for (nutrient, amount) in required {
            if catalog.has_contributor(&nutrient) {
                coverable.push((nutrient, amount));
            } else {
                warn!("no product contributes '{nutrient}', dropping it from the optimization");
            }
        }
        if coverable.is_empty() {
            return Err(EngineError::InfeasibleRequirements);
        }

        let products: Vec<String> = catalog.product_names().map(str::to_string).collect();
        let problem = formulate(&coverable, &products, catalog)?;
        let quantities = self.solve_with_fallbacks(&problem, &coverable, &products, catalog);
        let delivered = delivered_map(adjustments, &quantities, catalog);
        log_fulfillment(&coverable, &delivered);

        Ok(OptimizationResult {
            quantities,
            delivered,
        })
    }

    fn solve_with_fallbacks(
        &self,
        problem: &LpProblem,
        coverable: &[(String, Decimal)],
        products: &[String],
        catalog: &ProductCatalog,
    ) -> BTreeMap<String, Decimal> {
        match attempt(self.primary.as_ref(), problem, products) {
            Ok(quantities) => return quantities,
            Err(failure) => warn!(
                "{} solve failed ({failure}), retrying with {}",
                self.primary.name(),
                self.alternative.name()
            ),
        }
        match attempt(self.alternative.as_ref(), problem, products) {
            Ok(quantities) => return quantities,
            Err(failure) => warn!(
                "{} solve failed ({failure}), relaxing requirements to {}%",
                self.alternative.name(),
                RELAXATION_FACTOR * 100.0
            ),
        }
        match attempt(self.primary.as_ref(), &problem.relaxed(RELAXATION_FACTOR), products) {
            Ok(quantities) => return quantities,
            Err(failure) => warn!("relaxed solve failed ({failure}), using the greedy heuristic"),
        }
        greedy_allocation(coverable, products, catalog)
    }
}

fn attempt(
    solver: &dyn LinearProgramSolver,
    problem: &LpProblem,
    products: &[String],
) -> Result<BTreeMap<String, Decimal>, SolverFailure> {
    let solution = solver.solve(problem)?;
    finalize_quantities(products, &solution.values)
}

fn formulate(
    coverable: &[(String, Decimal)],
    products: &[String],
    catalog: &ProductCatalog,
) -> EngineResult<LpProblem> {
    let objective = vec![1.0; products.len()];
    let mut constraints = Vec::with_capacity(coverable.len());
    for (nutrient, amount) in coverable {
        let coefficients = products
            .iter()
            .map(|product| decimal_as_f64(catalog.contribution(product, nutrient)))
            .collect::<EngineResult<Vec<f64>>>()?;
        constraints.push(LpConstraint {
            coefficients,
            minimum: decimal_as_f64(*amount)?,
        });
    }
    Ok(LpProblem {
        objective,
        constraints,
    })
}

/// Quantize raw solver outputs: sub-epsilon values become exactly zero,
/// the rest round to two decimals with midpoints away from zero.
fn finalize_quantities(
    products: &[String],
    values: &[f64],
) -> Result<BTreeMap<String, Decimal>, SolverFailure> {
    let mut quantities = BTreeMap::new();
    for (product, value) in products.iter().zip(values) {
        let quantity = if *value < QUANTITY_EPSILON {
            Decimal::ZERO
        } else {
            Decimal::from_f64(*value)
                .map(|raw| raw.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
                .ok_or_else(|| {
                    SolverFailure::Numerical(format!("non-finite quantity for '{product}'"))
                })?
        };
        quantities.insert(product.clone(), quantity);
    }
    Ok(quantities)
}

/// Terminal fallback: cover each nutrient independently with its best
/// contributor, keeping the maximum quantity for products shared across
/// nutrients. Cannot fail.
fn greedy_allocation(
    coverable: &[(String, Decimal)],
    products: &[String],
    catalog: &ProductCatalog,
) -> BTreeMap<String, Decimal> {
    let mut quantities: BTreeMap<String, Decimal> = products
        .iter()
        .map(|product| (product.clone(), Decimal::ZERO))
        .collect();
    for (nutrient, amount) in coverable {
        if let Some((product, contribution)) = catalog.best_contributor(nutrient) {
            let needed = (*amount / contribution)
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            if let Some(quantity) = quantities.get_mut(product) {
                if needed > *quantity {
                    *quantity = needed;
                }
            }
        }
    }
    quantities
}

/// Exact delivered amounts for every nutrient of the adjustment map, from
/// the already-quantized product quantities.
fn delivered_map(
    adjustments: &AdjustmentMap,
    quantities: &BTreeMap<String, Decimal>,
    catalog: &ProductCatalog,
) -> BTreeMap<String, Decimal> {
    adjustments
        .names()
        .map(|nutrient| {
            let total = quantities
                .iter()
                .map(|(product, quantity)| *quantity * catalog.contribution(product, nutrient))
                .sum::<Decimal>();
            (nutrient.to_string(), total)
        })
        .collect()
}

fn log_fulfillment(coverable: &[(String, Decimal)], delivered: &BTreeMap<String, Decimal>) {
    for (nutrient, required) in coverable {
        if let Some(total) = delivered.get(nutrient) {
            let fulfillment = (total / required * Decimal::ONE_HUNDRED).round_dp(1);
            debug!("'{nutrient}': delivering {total} of {required} required ({fulfillment}%)");
        }
    }
}

fn decimal_as_f64(value: Decimal) -> EngineResult<f64> {
    value
        .to_f64()
        .ok_or_else(|| EngineError::invalid_input(format!("value {value} exceeds numeric range")))
}
