//! Human-readable application plans from optimization results.

use rust_decimal::Decimal;

use crate::models::{unit_for, OptimizationResult};

/// Render an optimization result as a line-oriented application plan for
/// a lot.
///
/// Lists every product with a positive quantity, or an explicit
/// no-products line, followed by the nutrients the plan delivers with
/// their reference units.
pub fn compose_recommendation(lot_id: i64, result: &OptimizationResult) -> String {
    let mut lines = vec![format!("Aplicar en el lote {lot_id}:")];

    let mut any_product = false;
    for (product, quantity) in &result.quantities {
        if *quantity > Decimal::ZERO {
            lines.push(format!("- {quantity} unidades de {product}"));
            any_product = true;
        }
    }
    if !any_product {
        lines.push("- No se requiere aplicación de productos adicionales".to_string());
    }

    lines.push("\nNutrientes aportados:".to_string());
    for (nutrient, amount) in &result.delivered {
        if *amount > Decimal::ZERO {
            let unit = unit_for(nutrient);
            lines.push(format!("- {nutrient}: {amount} {unit}"));
        }
    }

    lines.join("\n")
}
