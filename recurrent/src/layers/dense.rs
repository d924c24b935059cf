use log::debug;
use matrix::{Matrix, initialization::WeightGen};

use super::DenseConfig;
use crate::{LayerErr, Result};

/// Affine projection `y = x · W + b` applied to a whole sequence at once.
///
/// Since matrices don't broadcast, the bias is kept as a `[sequence_size, output_size]` matrix.
#[derive(Clone, Debug)]
pub struct Dense {
    config: DenseConfig,
    weights: Matrix,
    bias: Matrix,
}

impl Dense {
    /// Creates a new `Dense`.
    ///
    /// The weights and then the bias are drawn from `weight_gen`.
    ///
    /// # Arguments
    /// * `config` - The layer's dimensions.
    /// * `weight_gen` - The provider of initial weights.
    ///
    /// # Panics
    /// If any of the sizes in `config` is zero.
    pub fn new<W: WeightGen + ?Sized>(config: DenseConfig, weight_gen: &mut W) -> Self {
        let DenseConfig {
            input_size,
            output_size,
            sequence_size,
        } = config;

        let weights = Matrix::from_gen(input_size, output_size, weight_gen);
        let bias = Matrix::from_gen(sequence_size, output_size, weight_gen);

        debug!(input_size = input_size, output_size = output_size; "created dense layer");

        Self {
            config,
            weights,
            bias,
        }
    }

    pub fn output_size(&self) -> usize {
        self.config.output_size
    }

    /// Projects every row of `x`.
    ///
    /// # Arguments
    /// * `x` - A `[sequence_size, input_size]` matrix.
    ///
    /// # Returns
    /// A `[sequence_size, output_size]` matrix, or an error if `x` has the wrong width or the
    /// wrong amount of rows.
    pub fn forward(&self, x: &Matrix) -> Result<Matrix> {
        if x.cols() != self.config.input_size {
            return Err(LayerErr::InputWidth {
                got: x.cols(),
                expected: self.config.input_size,
            });
        }

        Ok(x.multiply(&self.weights)?.add(&self.bias)?)
    }
}
