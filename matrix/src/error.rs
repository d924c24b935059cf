use std::{
    error::Error,
    fmt::{self, Display},
};

use rand_distr::uniform::Error as UniformError;

/// The result type used in the entire matrix module.
pub type Result<T> = std::result::Result<T, MatrixErr>;

/// A `(rows, cols)` pair.
pub type Shape = (usize, usize);

/// The matrix module's error type.
#[derive(Debug, Clone, PartialEq)]
pub enum MatrixErr {
    /// The operands of `op` violate its shape precondition.
    ShapeMismatch {
        op: &'static str,
        left: Shape,
        right: Shape,
    },
    /// The operation is declared but has no implementation.
    NotImplemented(&'static str),
    /// The bounds given for a random fill do not form a valid range.
    InvalidRange { low: f32, high: f32, reason: String },
}

impl Display for MatrixErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixErr::ShapeMismatch { op, left, right } => write!(
                f,
                "shape mismatch in {op}: left is {}x{}, right is {}x{}",
                left.0, left.1, right.0, right.1
            ),
            MatrixErr::NotImplemented(op) => write!(f, "{op} is not implemented"),
            MatrixErr::InvalidRange { low, high, reason } => {
                write!(f, "invalid range [{low}, {high}]: {reason}")
            }
        }
    }
}

impl Error for MatrixErr {}

impl MatrixErr {
    pub(crate) fn invalid_range(low: f32, high: f32, err: UniformError) -> Self {
        Self::InvalidRange {
            low,
            high,
            reason: err.to_string(),
        }
    }
}
