use thiserror::Error;

/// A single record carried a date or amount that cannot be interpreted.
///
/// Raised per record; the classification engine recovers from it by
/// skipping the offending record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("Malformed date '{0}': expected DD/MM/YYYY")]
    MalformedDate(String),
    #[error("Date '{0}' is not a valid calendar day")]
    InvalidDate(String),
    #[error("Invalid amount: '{0}'")]
    InvalidAmount(String),
    #[error("Amount '{0}' overflows the category total")]
    AmountOverflow(String),
}
