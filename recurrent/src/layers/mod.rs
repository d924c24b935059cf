mod config;
mod dense;
mod gate;
mod layer;
mod lstm;

pub use config::{DenseConfig, LstmConfig};
pub use dense::Dense;
pub use gate::Gate;
pub use layer::Layer;
pub use lstm::Lstm;
