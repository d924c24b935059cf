use ndarray::{Array2, Axis, s};
use rand::Rng;
use rand_distr::Distribution;
use rayon::prelude::*;

use crate::{
    MatrixErr, Result, Shape,
    activations::{self, Activation},
    initialization::{self, WeightGen},
};

/// A fixed-shape, row-major 2-D container of `f32` values.
///
/// The shape is decided at construction and never changes. Algebra operations (`multiply`,
/// `hadamard`, `add`) are pure and always allocate a fresh result; only the `*_inplace`
/// activation transforms mutate the matrix they are called on.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    data: Array2<f32>,
}

impl Matrix {
    /// Creates a new matrix filled with uniform samples from `[0, 0.5]`.
    ///
    /// # Arguments
    /// * `rows` - The amount of rows.
    /// * `cols` - The amount of columns.
    /// * `rng` - The random number generator to sample from.
    ///
    /// # Panics
    /// If `rows` or `cols` is zero.
    pub fn random<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Self {
        Self::sampled(rows, cols, &initialization::default_distribution(), rng)
    }

    /// Creates a new matrix filled with uniform samples from `[low, high]`.
    ///
    /// # Arguments
    /// * `rows` - The amount of rows.
    /// * `cols` - The amount of columns.
    /// * `low` - The inclusive lower limit.
    /// * `high` - The inclusive upper limit.
    /// * `rng` - The random number generator to sample from.
    ///
    /// # Returns
    /// An error if the range is invalid (low > high or non finite bounds).
    ///
    /// # Panics
    /// If `rows` or `cols` is zero.
    pub fn random_in<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        low: f32,
        high: f32,
        rng: &mut R,
    ) -> Result<Self> {
        let distribution = rand_distr::Uniform::new_inclusive(low, high)
            .map_err(|e| MatrixErr::invalid_range(low, high, e))?;

        Ok(Self::sampled(rows, cols, &distribution, rng))
    }

    /// Creates a new matrix with every element set to zero.
    ///
    /// # Panics
    /// If `rows` or `cols` is zero.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        assert_non_empty(rows, cols);

        Self {
            data: Array2::zeros((rows, cols)),
        }
    }

    /// Wraps a single row of values into a `[1, values.len()]` matrix.
    ///
    /// # Panics
    /// If `values` is empty.
    pub fn from_row(values: Vec<f32>) -> Self {
        let cols = values.len();
        assert_non_empty(1, cols);

        let data = Array2::from_shape_fn((1, cols), |(_, j)| values[j]);
        Self { data }
    }

    /// Creates a matrix from row-major values.
    ///
    /// # Returns
    /// An error if `values` doesn't hold exactly `rows * cols` elements.
    ///
    /// # Panics
    /// If `rows` or `cols` is zero.
    pub fn from_shape_vec((rows, cols): Shape, values: Vec<f32>) -> Result<Self> {
        assert_non_empty(rows, cols);

        let len = values.len();
        let data = Array2::from_shape_vec((rows, cols), values).map_err(|_| {
            MatrixErr::ShapeMismatch {
                op: "from_shape_vec",
                left: (rows, cols),
                right: (1, len),
            }
        })?;

        Ok(Self { data })
    }

    /// Creates a new matrix whose values are drawn from a weight generator.
    ///
    /// Values are consumed in row-major order.
    ///
    /// # Panics
    /// If `rows` or `cols` is zero, or if `weight_gen` doesn't yield exactly `rows * cols` values.
    pub fn from_gen<W: WeightGen + ?Sized>(rows: usize, cols: usize, weight_gen: &mut W) -> Self {
        assert_non_empty(rows, cols);

        let values = weight_gen.sample(rows * cols);
        assert_eq!(
            values.len(),
            rows * cols,
            "weight generator yielded {} values for a {rows}x{cols} matrix",
            values.len()
        );

        let mut data = Array2::zeros((rows, cols));
        data.iter_mut().zip(values).for_each(|(d, v)| *d = v);

        Self { data }
    }

    /// Creates a matrix of `rows` rows by sampling `distribution`.
    fn sampled<D, R>(rows: usize, cols: usize, distribution: &D, rng: &mut R) -> Self
    where
        D: Distribution<f32>,
        R: Rng + ?Sized,
    {
        assert_non_empty(rows, cols);

        let data = Array2::from_shape_simple_fn((rows, cols), || distribution.sample(rng));
        Self { data }
    }

    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    pub fn shape(&self) -> Shape {
        self.data.dim()
    }

    /// Returns the element at row `i`, column `j`, or `None` if it is out of bounds.
    pub fn get(&self, i: usize, j: usize) -> Option<f32> {
        self.data.get((i, j)).copied()
    }

    /// Iterates the elements in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.data.iter().copied()
    }

    /// Copies the elements into a row-major vec.
    pub fn to_vec(&self) -> Vec<f32> {
        self.iter().collect()
    }

    /// Copies row `i` into a new `[1, cols]` matrix.
    ///
    /// # Panics
    /// If `i` is out of bounds.
    pub fn row(&self, i: usize) -> Matrix {
        Self {
            data: self.data.slice(s![i..i + 1, ..]).to_owned(),
        }
    }

    /// Overwrites row `i` with the single row of `row`.
    ///
    /// # Returns
    /// An error if `row` is not shaped `[1, cols]`.
    ///
    /// # Panics
    /// If `i` is out of bounds.
    pub fn set_row(&mut self, i: usize, row: &Matrix) -> Result<()> {
        if row.shape() != (1, self.cols()) {
            return Err(MatrixErr::ShapeMismatch {
                op: "set_row",
                left: self.shape(),
                right: row.shape(),
            });
        }

        self.data.row_mut(i).assign(&row.data.row(0));
        Ok(())
    }

    /// Standard matrix product `self · rhs`.
    ///
    /// Each output element is accumulated in `f32` over `k = 0..self.cols()` in order. Output
    /// rows are independent and get computed in parallel.
    ///
    /// # Returns
    /// A `[self.rows(), rhs.cols()]` matrix, or an error if `self.cols() != rhs.rows()`.
    pub fn multiply(&self, rhs: &Matrix) -> Result<Matrix> {
        if self.cols() != rhs.rows() {
            return Err(MatrixErr::ShapeMismatch {
                op: "multiply",
                left: self.shape(),
                right: rhs.shape(),
            });
        }

        let rhs = &rhs.data;
        let mut out = Array2::zeros((self.rows(), rhs.ncols()));

        out.axis_iter_mut(Axis(0))
            .into_par_iter()
            .zip(self.data.axis_iter(Axis(0)))
            .for_each(|(mut out_row, lhs_row)| {
                // k-outer keeps the per-element summation order while walking `rhs` by rows
                for (&a, rhs_row) in lhs_row.iter().zip(rhs.rows()) {
                    out_row.zip_mut_with(&rhs_row, |o, &b| *o += a * b);
                }
            });

        Ok(Self { data: out })
    }

    /// Elementwise (Hadamard) product.
    ///
    /// # Returns
    /// A new matrix, or an error if the shapes differ.
    pub fn hadamard(&self, rhs: &Matrix) -> Result<Matrix> {
        self.check_same_shape("hadamard", rhs)?;

        Ok(Self {
            data: &self.data * &rhs.data,
        })
    }

    /// Elementwise sum.
    ///
    /// # Returns
    /// A new matrix, or an error if the shapes differ.
    pub fn add(&self, rhs: &Matrix) -> Result<Matrix> {
        self.check_same_shape("add", rhs)?;

        Ok(Self {
            data: &self.data + &rhs.data,
        })
    }

    /// Replicates a single-row matrix into `rows` rows.
    ///
    /// The replication rule hasn't been decided, so this always fails.
    pub fn broadcast(&self, _rows: usize) -> Result<Matrix> {
        Err(MatrixErr::NotImplemented("broadcast"))
    }

    /// Overwrites every element `x` with `sigmoid(x)`.
    pub fn sigmoid_inplace(&mut self) {
        self.data.mapv_inplace(activations::sigmoid);
    }

    /// Overwrites every element `x` with the saturating `tanh(x)`.
    pub fn tanh_inplace(&mut self) {
        self.data.mapv_inplace(activations::tanh);
    }

    /// Overwrites every element with `act_fn` applied to it.
    pub fn activate_inplace(&mut self, act_fn: Activation) {
        self.data.mapv_inplace(|x| act_fn.f(x));
    }

    fn check_same_shape(&self, op: &'static str, rhs: &Matrix) -> Result<()> {
        if self.shape() != rhs.shape() {
            return Err(MatrixErr::ShapeMismatch {
                op,
                left: self.shape(),
                right: rhs.shape(),
            });
        }

        Ok(())
    }
}

fn assert_non_empty(rows: usize, cols: usize) {
    assert!(
        rows > 0 && cols > 0,
        "matrix dimensions must be positive, got {rows}x{cols}"
    );
}
