pub mod activations;
pub mod error;
pub mod initialization;
mod matrix;

pub use activations::Activation;
pub use error::{MatrixErr, Result, Shape};
pub use matrix::Matrix;
