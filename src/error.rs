use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeightError {
    /// `DivideType::Any` was requested on a noncommutative semiring.
    #[error("only explicit left or right division is defined for the noncommutative {semiring} semiring")]
    AmbiguousDivision { semiring: String },

    #[error("failed to transfer weight bytes: {0}")]
    Io(#[from] io::Error),

    /// The bytes read are not a valid value of the semiring's value type.
    #[error("invalid bit pattern for a {semiring} weight: {reason}")]
    InvalidBits { semiring: String, reason: String },
}

pub type Result<T> = std::result::Result<T, WeightError>;
