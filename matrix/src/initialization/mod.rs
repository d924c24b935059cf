//! Providers of initial values for newly constructed matrices.

mod constant;
mod random;
mod weight_gen;

pub use constant::ConstWeightGen;
pub use random::{DEFAULT_HIGH, DEFAULT_LOW, RandWeightGen};
pub(crate) use random::default_distribution;
pub use weight_gen::WeightGen;
