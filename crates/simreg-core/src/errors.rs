use thiserror::Error;

/// Errors that can occur while generating, fitting or scoring a regression
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    // Input validation errors
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Insufficient data for {statistic}: {got} observations (need at least {need})")]
    InsufficientData {
        statistic: &'static str,
        got: usize,
        need: usize,
    },

    #[error("Dimension mismatch: {left} has {left_len} elements, {right} has {right_len}")]
    DimensionMismatch {
        left: &'static str,
        left_len: usize,
        right: &'static str,
        right_len: usize,
    },

    // Numerical errors
    #[error("Degenerate input for {statistic}: {reason}")]
    DegenerateInput {
        statistic: &'static str,
        reason: &'static str,
    },
}

impl StatsError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        StatsError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    pub(crate) fn insufficient(statistic: &'static str, got: usize, need: usize) -> Self {
        StatsError::InsufficientData {
            statistic,
            got,
            need,
        }
    }

    pub(crate) fn degenerate(statistic: &'static str, reason: &'static str) -> Self {
        StatsError::DegenerateInput { statistic, reason }
    }
}

/// Result type for statistical operations
pub type StatsResult<T> = Result<T, StatsError>;
