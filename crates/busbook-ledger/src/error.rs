use busbook_types::{Coordinate, TypeError};

/// Errors produced by ledger operations.
///
/// Every variant is recoverable: the caller reports it and carries on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("invalid selection: {0}")]
    InvalidSelection(#[from] TypeError),

    #[error("seat already booked at {0}")]
    SeatAlreadyBooked(Coordinate),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("missing credentials: {field} must not be empty")]
    MissingCredentials { field: &'static str },

    #[error("passenger id {id:?} already holds a seat on this departure")]
    DuplicateCredentials { id: String },

    #[error("ledger lock poisoned")]
    Poisoned,
}

/// Result alias for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;
