use thiserror::Error;

/// Errors raised by the order session, pricing and navigation payloads.
///
/// None of these reach the user as a message: the UI treats them as a
/// disabled control or a redirect and logs them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// No stop with this id in the session.
    #[error("Unknown stop: {0}")]
    UnknownStop(String),
    /// The food id is not in the cart.
    #[error("Unknown food: {0}")]
    UnknownFood(String),
    /// Adding a stop would exceed the configured maximum.
    #[error("Stop limit of {0} reached")]
    StopLimitReached(usize),
    /// The mode id is not among the generated delivery modes.
    #[error("Delivery mode not available: {0}")]
    ModeNotAvailable(String),
    /// A required field was absent from incoming navigation state.
    #[error("Navigation state is missing {0}")]
    MissingNavigationField(&'static str),
    /// A carried total disagrees with the cart and the mode's fee.
    #[error("Total {actual} does not match food subtotal plus fee ({expected})")]
    TotalMismatch { expected: u64, actual: u64 },
    /// Summing prices went past the largest representable amount.
    #[error("Price total overflows")]
    PriceOverflow,
}

pub type DomainResult<T> = Result<T, DomainError>;
