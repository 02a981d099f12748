//! Service layer: the engine's business logic.
//!
//! Each service is a pure function (or stateless struct) over explicit
//! inputs, so the whole layer is safe to call concurrently without
//! locking.

pub mod adjustments;
pub mod liebig;
pub mod optimizer;
pub mod recommendation;
pub mod variation;

pub use adjustments::compute_adjustments;
pub use liebig::{
    assess_nutrients, compute_balance, identify_limiting, limiting_nutrient, sufficiency,
    sufficiency_profile,
};
pub use optimizer::LinearProgramOptimizer;
pub use recommendation::compose_recommendation;
pub use variation::{estimate_cv, resolve_coefficients};
