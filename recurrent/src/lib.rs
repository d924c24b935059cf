pub mod error;
pub mod layers;
mod sequential;

pub use error::{LayerErr, Result};
pub use layers::{Dense, DenseConfig, Gate, Layer, Lstm, LstmConfig};
pub use sequential::Sequential;
