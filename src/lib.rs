//! # Foliar Engine
//!
//! Fertilizer recommendation engine for foliar nutrient analysis.
//!
//! This crate turns measured leaf-tissue nutrient levels, ideal crop
//! targets and a catalog of fertilizer products into an application plan:
//! which products to apply, in what quantities, to correct the nutrient
//! deficiencies of an agricultural lot. It applies Liebig's Law of the
//! Minimum together with linear-programming optimization over the
//! products' nutrient contributions.
//!
//! ## Features
//!
//! - **Sufficiency Analysis**: Per-nutrient sufficiency percentages and
//!   identification of the limiting nutrient
//! - **Deficit Adjustments**: Sufficiency gaps weighted by per-nutrient
//!   coefficients of variation
//! - **Product Optimization**: Minimal-quantity product allocation via
//!   linear programming, with a solver fallback ladder ending in a greedy
//!   heuristic that cannot fail
//! - **Variation Estimation**: Coefficients of variation from historical
//!   samples, with literature defaults for short histories
//! - **Recommendations**: Human-readable application plans per lot
//!
//! ## Architecture
//!
//! - [`models`]: Validated value types crossing the engine boundary
//! - [`algorithms`]: Linear-program formulation and solver backends
//! - [`services`]: The engine's business logic, one module per concern
//! - [`config`]: Tunable defaults loaded from TOML
//!
//! The engine is synchronous and free of shared mutable state: every
//! operation is a pure function over the maps it receives, so concurrent
//! calls need no locking.

pub mod algorithms;
pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use config::{EngineConfig, VariationDefaults};
pub use error::{EngineError, EngineResult};
pub use models::{
    AdjustmentMap, NutrientAssessment, NutrientLevels, OptimizationResult, ProductCatalog,
    VariationCoefficients,
};
pub use services::{
    compose_recommendation, compute_adjustments, estimate_cv, identify_limiting,
    resolve_coefficients, LinearProgramOptimizer,
};
