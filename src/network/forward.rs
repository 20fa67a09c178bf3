use crate::activation::activation::sigmoid;
use crate::error::Error;
use crate::network::network::Network;

/// Everything one forward pass produces. `predict` callers only see the
/// output vector; the trainer additionally needs the hidden activations and
/// both pre-activation sum vectors for the gradient formulas.
#[derive(Debug, Clone)]
pub(crate) struct ForwardTrace {
    pub hidden_pre: Vec<f64>,
    pub hidden: Vec<f64>,
    pub output_pre: Vec<f64>,
    pub output: Vec<f64>,
}

impl Network {
    /// Runs one forward pass and returns the output vector by value.
    ///
    /// Holds no state between calls: the same input against the same weights
    /// always produces the identical output vector.
    pub fn predict(&self, input: &[f64]) -> Result<Vec<f64>, Error> {
        Ok(self.forward_trace(input)?.output)
    }

    /// Forward pass retaining the intermediate values.
    ///
    /// The hidden vector is computed exactly once and shared by every output
    /// unit; only the input length can fail validation.
    pub(crate) fn forward_trace(&self, input: &[f64]) -> Result<ForwardTrace, Error> {
        if input.len() != self.n_in() {
            return Err(Error::ShapeMismatch {
                what: "input length",
                expected: self.n_in(),
                found: input.len(),
            });
        }

        let kj = self.weights_kj();
        let ji = self.weights_ji();

        let mut hidden_pre = vec![0.0; self.n_hid()];
        let mut hidden = vec![0.0; self.n_hid()];
        for h in 0..self.n_hid() {
            let mut sum = 0.0;
            for k in 0..self.n_in() {
                sum += input[k] * kj.data[k][h];
            }
            hidden_pre[h] = sum;
            hidden[h] = sigmoid(sum);
        }

        let mut output_pre = vec![0.0; self.n_out()];
        let mut output = vec![0.0; self.n_out()];
        for o in 0..self.n_out() {
            let mut sum = 0.0;
            for h in 0..self.n_hid() {
                sum += ji.data[h][o] * hidden[h];
            }
            output_pre[o] = sum;
            output[o] = sigmoid(sum);
        }

        Ok(ForwardTrace {
            hidden_pre,
            hidden,
            output_pre,
            output,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::matrix::Matrix;

    fn tiny_network() -> Network {
        let kj = Matrix::from_rows(vec![
            vec![0.5, -0.25, 0.1],
            vec![0.2, 0.4, -0.3],
        ])
        .unwrap();
        let ji = Matrix::from_rows(vec![vec![0.3], vec![-0.2], vec![0.6]]).unwrap();
        Network::from_weights(2, 3, kj, ji).unwrap()
    }

    #[test]
    fn matches_hand_computed_sums() {
        let net = tiny_network();
        let output = net.predict(&[1.0, 0.5]).unwrap();

        let h0 = sigmoid(1.0 * 0.5 + 0.5 * 0.2);
        let h1 = sigmoid(1.0 * -0.25 + 0.5 * 0.4);
        let h2 = sigmoid(1.0 * 0.1 + 0.5 * -0.3);
        let expected = sigmoid(0.3 * h0 + -0.2 * h1 + 0.6 * h2);

        assert_eq!(output.len(), 1);
        assert!((output[0] - expected).abs() < 1e-12);
    }

    #[test]
    fn reproduces_xor_gate_with_known_weights() {
        // A weight set known to carve out the XOR decision boundary.
        let kj = Matrix::from_rows(vec![
            vec![67.14, 46.64, -56.08],
            vec![95.28, -4.05, 92.80],
        ])
        .unwrap();
        let ji = Matrix::from_rows(vec![vec![93.16], vec![-64.53], vec![-44.31]]).unwrap();
        let net = Network::from_weights(2, 3, kj, ji).unwrap();

        for (input, expected) in [
            ([0.0, 0.0], 0.0),
            ([0.0, 1.0], 1.0),
            ([1.0, 0.0], 1.0),
            ([1.0, 1.0], 0.0),
        ] {
            let output = net.predict(&input).unwrap();
            assert!(
                (output[0] - expected).abs() < 0.01,
                "predict({:?}) = {}, want ~{}",
                input,
                output[0],
                expected
            );
        }
    }

    #[test]
    fn trace_is_consistent_with_itself() {
        let net = tiny_network();
        let trace = net.forward_trace(&[0.3, -0.7]).unwrap();

        for (pre, act) in trace.hidden_pre.iter().zip(trace.hidden.iter()) {
            assert_eq!(sigmoid(*pre), *act);
        }
        for (pre, act) in trace.output_pre.iter().zip(trace.output.iter()) {
            assert_eq!(sigmoid(*pre), *act);
        }
    }

    #[test]
    fn repeated_prediction_is_identical() {
        let net = Network::random(5, 4, 3, 2.0);
        let input = [0.1, 0.9, -0.4, 0.0, 1.0];
        assert_eq!(net.predict(&input).unwrap(), net.predict(&input).unwrap());
    }

    #[test]
    fn rejects_wrong_input_length() {
        let net = tiny_network();
        assert!(matches!(
            net.predict(&[1.0, 2.0, 3.0]),
            Err(Error::ShapeMismatch { expected: 2, found: 3, .. })
        ));
    }
}
