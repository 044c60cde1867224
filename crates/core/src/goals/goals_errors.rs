use thiserror::Error;

/// Reasons a submitted goal is rejected before any snapshot is written.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalValidationError {
    #[error("Invalid goal data. Required: goalTitle (string), amount (number), remaining (number)")]
    MissingTitle,

    #[error("Invalid goal data. Required: goalTitle (string), amount (number), remaining (number)")]
    NotANumber(&'static str),

    #[error("Amount must be positive and remaining must be non-negative")]
    NonPositiveAmount,

    #[error("Amount must be positive and remaining must be non-negative")]
    NegativeRemaining,

    #[error("Remaining amount cannot be greater than total amount")]
    RemainingExceedsAmount,
}
