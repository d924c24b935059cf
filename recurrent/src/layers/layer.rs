use matrix::{Matrix, initialization::WeightGen};

use super::{Dense, DenseConfig, Lstm, LstmConfig};
use crate::Result;

#[derive(Clone, Debug)]
pub enum Layer {
    Lstm(Lstm),
    Dense(Dense),
}

impl Layer {
    pub fn lstm<W: WeightGen + ?Sized>(config: LstmConfig, weight_gen: &mut W) -> Self {
        Self::Lstm(Lstm::new(config, weight_gen))
    }

    pub fn dense<W: WeightGen + ?Sized>(config: DenseConfig, weight_gen: &mut W) -> Self {
        Self::Dense(Dense::new(config, weight_gen))
    }

    /// Width of the rows this layer outputs.
    pub fn output_size(&self) -> usize {
        match self {
            Layer::Lstm(l) => l.hidden_size(),
            Layer::Dense(l) => l.output_size(),
        }
    }

    pub fn forward(&mut self, x: &Matrix) -> Result<Matrix> {
        match self {
            Layer::Lstm(l) => l.forward(x),
            Layer::Dense(l) => l.forward(x),
        }
    }

    /// Restores the initial recurrent state, stateless layers are left untouched.
    pub fn reset(&mut self) {
        if let Layer::Lstm(l) = self {
            l.reset();
        }
    }
}
