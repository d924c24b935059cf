use std::{
    error::Error,
    fmt::{self, Display},
};

use matrix::MatrixErr;

/// The result type used in the entire recurrent module.
pub type Result<T> = std::result::Result<T, LayerErr>;

/// The recurrent module's error type.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerErr {
    /// A matrix kernel rejected its operands.
    Matrix(MatrixErr),
    /// The input sequence doesn't have the amount of timesteps the cell was built for.
    SequenceLength { got: usize, expected: usize },
    /// The input rows don't have the width the layer was built for.
    InputWidth { got: usize, expected: usize },
}

impl Display for LayerErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayerErr::Matrix(e) => write!(f, "{e}"),
            LayerErr::SequenceLength { got, expected } => write!(
                f,
                "sequence length mismatch, got {got} timesteps and expected {expected}"
            ),
            LayerErr::InputWidth { got, expected } => write!(
                f,
                "input width mismatch, got {got} features and expected {expected}"
            ),
        }
    }
}

impl Error for LayerErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LayerErr::Matrix(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MatrixErr> for LayerErr {
    fn from(value: MatrixErr) -> Self {
        Self::Matrix(value)
    }
}
