/// Inputs above this magnitude saturate `tanh` to exactly `±1`.
pub const TANH_SATURATION: f32 = 3.0;

/// The logistic sigmoid `1 / (1 + e^(-x))`.
///
/// The exponential is evaluated in `f64` and the result narrowed to `f32`, no clamping is
/// applied at extreme magnitudes.
pub fn sigmoid(x: f32) -> f32 {
    let x = x as f64;
    (1. / (1. + (-x).exp())) as f32
}

/// Hyperbolic tangent with hard saturation outside of `[-3, 3]`.
///
/// Returns exactly `1` for `x > 3` and exactly `-1` for `x < -3`, the closed form
/// `(e^x - e^-x) / (e^x + e^-x)` otherwise.
pub fn tanh(x: f32) -> f32 {
    if x > TANH_SATURATION {
        return 1.;
    }

    if x < -TANH_SATURATION {
        return -1.;
    }

    let x = x as f64;
    let (pos, neg) = (x.exp(), (-x).exp());
    ((pos - neg) / (pos + neg)) as f32
}

/// The elementwise nonlinearities a gate can apply to its pre-activation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activation {
    Sigmoid,
    Tanh,
}

impl Activation {
    pub fn f(&self, x: f32) -> f32 {
        match self {
            Activation::Sigmoid => sigmoid(x),
            Activation::Tanh => tanh(x),
        }
    }
}
