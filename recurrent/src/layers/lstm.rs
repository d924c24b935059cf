use log::{debug, trace};
use matrix::{
    Activation, Matrix,
    initialization::{RandWeightGen, WeightGen},
};

use super::{Gate, LstmConfig};
use crate::{LayerErr, Result};

/// An LSTM cell that runs a whole sequence per `forward` call.
///
/// The hidden state `h_t` and cell state `c_t` belong to the cell and survive between calls:
/// every `forward` picks up where the previous one left off, so it is **not** a pure function
/// of its input. Use [`Lstm::reset`] to go back to the state the cell was created with.
///
/// The cell state is squashed in place after every update, the next timestep's forget and
/// candidate combination sees `tanh(c_t)` rather than the raw sum.
#[derive(Clone, Debug)]
pub struct Lstm {
    config: LstmConfig,

    input_gate: Gate,
    forget_gate: Gate,
    cell_gate: Gate,
    output_gate: Gate,

    h_t: Matrix,
    c_t: Matrix,

    // State at construction, restored by `reset`
    h_0: Matrix,
    c_0: Matrix,
}

impl Lstm {
    /// Creates a new `Lstm`.
    ///
    /// Gate weights are drawn from `weight_gen` in input, forget, cell, output order, biases
    /// start at zero. The initial hidden and cell state are drawn from `weight_gen` as well,
    /// they start from noise and not from zero.
    ///
    /// # Arguments
    /// * `config` - The cell's dimensions.
    /// * `weight_gen` - The provider of initial weights and state.
    ///
    /// # Panics
    /// If any of the sizes in `config` is zero.
    pub fn new<W: WeightGen + ?Sized>(config: LstmConfig, weight_gen: &mut W) -> Self {
        let LstmConfig {
            input_size,
            hidden_size,
            sequence_size,
        } = config;

        assert!(sequence_size > 0, "sequence size must be positive");

        let mut gate = |act_fn| Gate::new(input_size, hidden_size, act_fn, weight_gen);
        let input_gate = gate(Activation::Sigmoid);
        let forget_gate = gate(Activation::Sigmoid);
        let cell_gate = gate(Activation::Tanh);
        let output_gate = gate(Activation::Sigmoid);

        let h_0 = Matrix::from_gen(1, hidden_size, weight_gen);
        let c_0 = Matrix::from_gen(1, hidden_size, weight_gen);

        debug!(
            input_size = input_size,
            hidden_size = hidden_size,
            sequence_size = sequence_size;
            "created lstm cell"
        );

        Self {
            config,
            input_gate,
            forget_gate,
            cell_gate,
            output_gate,
            h_t: h_0.clone(),
            c_t: c_0.clone(),
            h_0,
            c_0,
        }
    }

    /// Creates a new `Lstm` whose weights and initial state are sampled from `[0, 0.5]` by a
    /// generator seeded with `seed`.
    pub fn seeded(config: LstmConfig, seed: u64) -> Self {
        Self::new(config, &mut RandWeightGen::seeded(seed))
    }

    pub fn hidden_size(&self) -> usize {
        self.config.hidden_size
    }

    /// The current hidden state, `[1, hidden_size]`.
    pub fn hidden_state(&self) -> &Matrix {
        &self.h_t
    }

    /// The current cell state, `[1, hidden_size]`.
    pub fn cell_state(&self) -> &Matrix {
        &self.c_t
    }

    /// Restores the hidden and cell state the cell was created with.
    pub fn reset(&mut self) {
        self.h_t.clone_from(&self.h_0);
        self.c_t.clone_from(&self.c_0);
    }

    /// Runs the cell over every timestep of `sequence`.
    ///
    /// For each row `x_t`:
    /// ```text
    /// i_t = σ(x_t·W_ii + h_t·W_hi + b_i)
    /// f_t = σ(x_t·W_if + h_t·W_hf + b_f)
    /// g_t = tanh(x_t·W_ig + h_t·W_hg + b_g)
    /// o_t = σ(x_t·W_io + h_t·W_ho + b_o)
    /// c_t = tanh((c_t ⊙ f_t) + (i_t ⊙ g_t))
    /// h_t = o_t ⊙ c_t
    /// ```
    /// and `h_t` becomes the row of the output for that timestep.
    ///
    /// # Arguments
    /// * `sequence` - A `[sequence_size, input_size]` matrix, one timestep per row.
    ///
    /// # Returns
    /// A `[sequence_size, hidden_size]` matrix, or an error if the sequence has the wrong
    /// amount of rows or the wrong width.
    pub fn forward(&mut self, sequence: &Matrix) -> Result<Matrix> {
        let LstmConfig {
            hidden_size,
            sequence_size,
            ..
        } = self.config;

        if sequence.rows() != sequence_size {
            return Err(LayerErr::SequenceLength {
                got: sequence.rows(),
                expected: sequence_size,
            });
        }

        debug!(timesteps = sequence_size, hidden_size = hidden_size; "lstm forward");

        let mut output = Matrix::zeros(sequence_size, hidden_size);

        for t in 0..sequence_size {
            let x_t = sequence.row(t);

            let i_t = self.input_gate.forward(&x_t, &self.h_t)?;
            let f_t = self.forget_gate.forward(&x_t, &self.h_t)?;
            let g_t = self.cell_gate.forward(&x_t, &self.h_t)?;
            let o_t = self.output_gate.forward(&x_t, &self.h_t)?;

            let mut c_t = self.c_t.hadamard(&f_t)?.add(&i_t.hadamard(&g_t)?)?;
            c_t.tanh_inplace();

            self.h_t = o_t.hadamard(&c_t)?;
            self.c_t = c_t;

            output.set_row(t, &self.h_t)?;
            trace!(timestep = t; "lstm state updated");
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use matrix::{
        MatrixErr,
        activations::{sigmoid, tanh},
        initialization::ConstWeightGen,
    };
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn input(rows: usize, cols: usize, seed: u64) -> Matrix {
        Matrix::random(rows, cols, &mut StdRng::seed_from_u64(seed))
    }

    #[test]
    fn output_shape() {
        let mut lstm = Lstm::seeded(LstmConfig::new(4, 3, 5), 1);
        let out = lstm.forward(&input(5, 4, 2)).unwrap();

        assert_eq!(out.shape(), (5, 3));
    }

    #[test]
    fn state_starts_from_noise() {
        let lstm = Lstm::seeded(LstmConfig::new(4, 3, 5), 1);

        assert_eq!(lstm.hidden_state().shape(), (1, 3));
        assert_eq!(lstm.cell_state().shape(), (1, 3));
        assert!(lstm.hidden_state().iter().any(|v| v != 0.));
        assert!(lstm.cell_state().iter().any(|v| v != 0.));
    }

    #[test]
    fn forward_is_not_idempotent() {
        let mut lstm = Lstm::seeded(LstmConfig::new(4, 3, 5), 1);
        let x = input(5, 4, 2);

        let first = lstm.forward(&x).unwrap();
        let second = lstm.forward(&x).unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn reset_restores_determinism() {
        let mut lstm = Lstm::seeded(LstmConfig::new(4, 3, 5), 1);
        let x = input(5, 4, 2);

        let first = lstm.forward(&x).unwrap();
        lstm.reset();
        let second = lstm.forward(&x).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn same_seed_same_output() {
        let config = LstmConfig::new(6, 4, 3);
        let x = input(3, 6, 9);

        let a = Lstm::seeded(config, 11).forward(&x).unwrap();
        let b = Lstm::seeded(config, 11).forward(&x).unwrap();
        let c = Lstm::seeded(config, 12).forward(&x).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn last_output_row_is_hidden_state() {
        let mut lstm = Lstm::seeded(LstmConfig::new(4, 3, 5), 1);
        let out = lstm.forward(&input(5, 4, 2)).unwrap();

        assert_eq!(&out.row(4), lstm.hidden_state());
    }

    #[test]
    fn wrong_sequence_length() {
        let mut lstm = Lstm::seeded(LstmConfig::new(4, 3, 5), 1);
        let before = lstm.hidden_state().clone();

        let err = lstm.forward(&input(4, 4, 2)).unwrap_err();

        assert_eq!(err, LayerErr::SequenceLength { got: 4, expected: 5 });
        assert_eq!(lstm.hidden_state(), &before);
    }

    #[test]
    fn wrong_input_width() {
        let mut lstm = Lstm::seeded(LstmConfig::new(4, 3, 5), 1);
        let err = lstm.forward(&input(5, 2, 2)).unwrap_err();

        assert!(matches!(
            err,
            LayerErr::Matrix(MatrixErr::ShapeMismatch { op: "multiply", .. })
        ));
    }

    #[test]
    #[should_panic]
    fn zero_sequence_size_panics() {
        Lstm::seeded(LstmConfig::new(4, 3, 0), 1);
    }

    #[test]
    fn matches_hand_computed_steps() {
        // every weight, the initial hidden state and the initial cell state are `w`
        let w = 0.1;
        let mut lstm = Lstm::new(LstmConfig::new(2, 3, 2), &mut ConstWeightGen::new(w));
        let x = Matrix::from_shape_vec((2, 2), vec![1., 2., -1., 0.5]).unwrap();

        let out = lstm.forward(&x).unwrap();

        let mut h = w;
        let mut c = w;
        for (t, (x0, x1)) in [(1., 2.), (-1., 0.5)].into_iter().enumerate() {
            let z = w * (x0 + x1) + 3. * w * h;
            let (i, f, g, o) = (sigmoid(z), sigmoid(z), tanh(z), sigmoid(z));

            // the stored cell state is squashed, so the next step reads tanh(c)
            c = tanh(c * f + i * g);
            h = o * c;

            for j in 0..3 {
                let got = out.get(t, j).unwrap();
                assert!((got - h).abs() < 1e-5, "t = {t}, got {got}, expected {h}");
            }
        }

        assert!(lstm.cell_state().iter().all(|v| (v - c).abs() < 1e-5));
    }
}
