use matrix::{Activation, Matrix, initialization::WeightGen};

use crate::Result;

/// One of the four gates of an LSTM cell: `act_fn(x_t · W_x + h_t · W_h + b)`.
#[derive(Clone, Debug)]
pub struct Gate {
    w_x: Matrix,
    w_h: Matrix,
    b: Matrix,
    act_fn: Activation,
}

impl Gate {
    /// Creates a new `Gate`.
    ///
    /// Both weight matrices are drawn from `weight_gen` (input weights first), the bias starts
    /// at zero.
    ///
    /// # Arguments
    /// * `input_size` - Width of `x_t`.
    /// * `hidden_size` - Width of `h_t` and of the gate's output.
    /// * `act_fn` - The nonlinearity applied to the pre-activation.
    /// * `weight_gen` - The provider of initial weights.
    ///
    /// # Panics
    /// If `input_size` or `hidden_size` is zero.
    pub fn new<W: WeightGen + ?Sized>(
        input_size: usize,
        hidden_size: usize,
        act_fn: Activation,
        weight_gen: &mut W,
    ) -> Self {
        Self {
            w_x: Matrix::from_gen(input_size, hidden_size, weight_gen),
            w_h: Matrix::from_gen(hidden_size, hidden_size, weight_gen),
            b: Matrix::zeros(1, hidden_size),
            act_fn,
        }
    }

    /// Computes the gate's activation for one timestep.
    ///
    /// # Arguments
    /// * `x_t` - The current input row, `[1, input_size]`.
    /// * `h_t` - The previous hidden state, `[1, hidden_size]`.
    ///
    /// # Returns
    /// A fresh `[1, hidden_size]` matrix, or the kernel's shape mismatch.
    pub fn forward(&self, x_t: &Matrix, h_t: &Matrix) -> Result<Matrix> {
        let mut z = x_t
            .multiply(&self.w_x)?
            .add(&h_t.multiply(&self.w_h)?)?
            .add(&self.b)?;

        z.activate_inplace(self.act_fn);
        Ok(z)
    }
}
