use thiserror::Error;

/// Validation failures raised by the domain itself, before anything
/// touches the store.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("required field `{0}` is missing or blank")]
    MissingField(&'static str),
    #[error("price must be zero or more minor units, got {0}")]
    NegativePrice(i64),
    #[error("quantity must be a non-negative integer that fits a line item, got {0}")]
    QuantityOutOfRange(i64),
}
