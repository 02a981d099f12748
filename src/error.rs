//! Error types for the nutrient optimization engine.
//!
//! Every fallible engine operation returns [`EngineResult`]. Solver-level
//! failures (infeasible, unbounded) are deliberately *not* part of this
//! taxonomy: they live in [`crate::algorithms::SolverFailure`] and drive the
//! optimizer's fallback ladder instead of surfacing to callers.

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Error type for engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// No ideal nutrient targets were supplied.
    #[error("no ideal nutrient targets were supplied")]
    EmptyTargetSet,

    /// The product catalog is empty while at least one nutrient needs
    /// correction.
    #[error("no products available for optimization, cannot generate a recommendation")]
    NoProductsAvailable,

    /// No available product contributes any of the required nutrients.
    #[error("available products cannot satisfy the nutrient requirements")]
    InfeasibleRequirements,

    /// Historical samples for a nutrient have a zero mean, so a coefficient
    /// of variation cannot be computed. Indicates degenerate input data.
    #[error("historical samples for '{nutrient}' have a zero mean")]
    ZeroMean { nutrient: String },

    /// Input data failed boundary validation.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// Configuration file could not be read or parsed.
    #[error("configuration error: {message}")]
    Configuration { message: String },
}

impl EngineError {
    /// Create a zero-mean error for a nutrient.
    pub fn zero_mean(nutrient: impl Into<String>) -> Self {
        Self::ZeroMean {
            nutrient: nutrient.into(),
        }
    }

    /// Create a boundary validation error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages_are_stable() {
        assert_eq!(
            EngineError::EmptyTargetSet.to_string(),
            "no ideal nutrient targets were supplied"
        );
        assert_eq!(
            EngineError::zero_mean("Nitrógeno").to_string(),
            "historical samples for 'Nitrógeno' have a zero mean"
        );
        assert_eq!(
            EngineError::invalid_input("negative level").to_string(),
            "invalid input: negative level"
        );
    }
}
