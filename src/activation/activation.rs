use std::f64::consts::E;

/// The sigmoid activation `1 / (1 + e^-x)`, applied at both the hidden and
/// output layers. Range (0, 1); extreme inputs saturate toward 0 or 1,
/// which is acceptable behavior here, not an error.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + E.powf(-x))
}

/// Derivative of the sigmoid with respect to the pre-activation sum,
/// `f(x) * (1 - f(x))`.
pub fn sigmoid_prime(x: f64) -> f64 {
    let fx = sigmoid(x);
    fx * (1.0 - fx)
}
