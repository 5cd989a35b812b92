//! Boundary errors for the valuation engine.

use thiserror::Error;

/// Rejections raised before any valuation runs.
///
/// Missing market data never produces one of these; only holdings that would
/// corrupt the sums are refused.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Holding id must not be empty")]
    EmptyId,

    #[error("Duplicate holding id: {0}")]
    DuplicateId(String),

    #[error("Holding {id} has a negative amount: {amount}")]
    NegativeAmount { id: String, amount: f64 },

    #[error("Holding {id} has a non-finite amount")]
    NonFiniteAmount { id: String },

    #[error("Invalid category: {0:?}")]
    InvalidCategory(String),
}
