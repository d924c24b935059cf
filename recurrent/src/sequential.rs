use log::debug;
use matrix::Matrix;

use crate::{Result, layers::Layer};

/// A stack of layers: each layer's output is the next layer's input.
#[derive(Clone, Debug)]
pub struct Sequential {
    layers: Vec<Layer>,
}

impl Sequential {
    /// Creates a new `Sequential`.
    ///
    /// # Arguments
    /// * `layers` - The layers the sequential is composed of.
    ///
    /// # Returns
    /// A new `Sequential` instance.
    pub fn new<I>(layers: I) -> Self
    where
        I: IntoIterator<Item = Layer>,
    {
        Self {
            layers: layers.into_iter().collect(),
        }
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Makes a forward pass through the stack.
    ///
    /// Recurrent layers keep their state afterwards, see [`Sequential::reset`].
    ///
    /// # Arguments
    /// * `x` - The input sequence.
    ///
    /// # Returns
    /// The output of the last layer (a copy of `x` for an empty stack), or the first error any
    /// layer raised.
    pub fn forward(&mut self, x: &Matrix) -> Result<Matrix> {
        let nlayers = self.layers.len();
        let mut y = x.clone();

        for (i, layer) in self.layers.iter_mut().enumerate() {
            debug!(layer = i, nlayers = nlayers; "forwarding layer");
            y = layer.forward(&y)?;
        }

        Ok(y)
    }

    /// Restores the initial state of every recurrent layer.
    pub fn reset(&mut self) {
        self.layers.iter_mut().for_each(Layer::reset);
    }
}
