use super::WeightGen;

/// A weight generator that always generates the same value.
#[derive(Debug, Clone, Copy)]
pub struct ConstWeightGen {
    value: f32,
}

impl ConstWeightGen {
    /// Creates a new `ConstWeightGen` weight generator.
    ///
    /// # Arguments
    /// * `value` - The value to always generate.
    pub fn new(value: f32) -> Self {
        Self { value }
    }

    /// A generator of the additive identity, used for biases.
    pub fn zero() -> Self {
        Self::new(0.)
    }
}

impl WeightGen for ConstWeightGen {
    fn sample(&mut self, n: usize) -> Vec<f32> {
        vec![self.value; n]
    }
}
