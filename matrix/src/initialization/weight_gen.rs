/// A `WeightGen` generates values for the initial state of a matrix.
pub trait WeightGen {
    /// Samples exactly `n` values.
    ///
    /// # Arguments
    /// * `n` - The amount of values to generate.
    ///
    /// # Returns
    /// A vec of length `n`.
    fn sample(&mut self, n: usize) -> Vec<f32>;
}

impl<W: WeightGen + ?Sized> WeightGen for &mut W {
    fn sample(&mut self, n: usize) -> Vec<f32> {
        (**self).sample(n)
    }
}

impl<W: WeightGen + ?Sized> WeightGen for Box<W> {
    fn sample(&mut self, n: usize) -> Vec<f32> {
        (**self).sample(n)
    }
}
