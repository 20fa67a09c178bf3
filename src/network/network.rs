use serde::{Serialize, Deserialize};

use crate::error::Error;
use crate::math::matrix::Matrix;

/// A three-layer feedforward network: `n_in` input units, `n_hid` hidden
/// units, `n_out` output units, sigmoid activation at both computed layers.
///
/// `weights_kj` (input k → hidden j, shape `n_in x n_hid`) and `weights_ji`
/// (hidden j → output i, shape `n_hid x n_out`) are owned by the instance
/// and keep their shape for its whole lifetime; training only rewrites
/// their numeric contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    n_in: usize,
    n_hid: usize,
    n_out: usize,
    weights_kj: Matrix,
    weights_ji: Matrix,
}

impl Network {
    /// Creates a network with every weight drawn independently, uniform in
    /// [-range/2, +range/2). No entry is left at zero by construction intent;
    /// dimensions must be positive.
    pub fn random(n_in: usize, n_hid: usize, n_out: usize, range: f64) -> Network {
        assert!(n_in > 0, "input count must be positive");
        assert!(n_hid > 0, "hidden count must be positive");
        assert!(n_out > 0, "output count must be positive");

        Network {
            n_in,
            n_hid,
            n_out,
            weights_kj: Matrix::uniform(n_in, n_hid, range),
            weights_ji: Matrix::uniform(n_hid, n_out, range),
        }
    }

    /// Adopts caller-supplied weight matrices. The output count is inferred
    /// from `weights_ji`. Any disagreement with the declared dimensions is
    /// rejected; matrices are never truncated or padded to fit.
    pub fn from_weights(
        n_in: usize,
        n_hid: usize,
        weights_kj: Matrix,
        weights_ji: Matrix,
    ) -> Result<Network, Error> {
        if weights_kj.rows != n_in {
            return Err(Error::ShapeMismatch {
                what: "input-to-hidden weight rows",
                expected: n_in,
                found: weights_kj.rows,
            });
        }
        if weights_kj.cols != n_hid {
            return Err(Error::ShapeMismatch {
                what: "input-to-hidden weight columns",
                expected: n_hid,
                found: weights_kj.cols,
            });
        }
        if weights_ji.rows != n_hid {
            return Err(Error::ShapeMismatch {
                what: "hidden-to-output weight rows",
                expected: n_hid,
                found: weights_ji.rows,
            });
        }

        let n_out = weights_ji.cols;
        for (what, dim) in [
            ("input count", n_in),
            ("hidden count", n_hid),
            ("output count", n_out),
        ] {
            if dim == 0 {
                return Err(Error::ShapeMismatch {
                    what,
                    expected: 1,
                    found: 0,
                });
            }
        }

        Ok(Network {
            n_in,
            n_hid,
            n_out,
            weights_kj,
            weights_ji,
        })
    }

    pub fn n_in(&self) -> usize {
        self.n_in
    }

    pub fn n_hid(&self) -> usize {
        self.n_hid
    }

    pub fn n_out(&self) -> usize {
        self.n_out
    }

    pub fn weights_kj(&self) -> &Matrix {
        &self.weights_kj
    }

    pub fn weights_ji(&self) -> &Matrix {
        &self.weights_ji
    }

    pub(crate) fn weights_kj_mut(&mut self) -> &mut Matrix {
        &mut self.weights_kj
    }

    pub(crate) fn weights_ji_mut(&mut self) -> &mut Matrix {
        &mut self.weights_ji
    }

    /// Serializes the whole model (dimensions and both matrices) to a
    /// pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<(), Error> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))
    }

    /// Deserializes a model from a JSON file previously written by
    /// `save_json`. Dimensions are re-validated against the matrices, so a
    /// hand-edited snapshot cannot smuggle in a shape violation.
    pub fn load_json(path: &str) -> Result<Network, Error> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let loaded: Network = serde_json::from_reader(reader)
            .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?;

        if loaded.weights_ji.cols != loaded.n_out {
            return Err(Error::ShapeMismatch {
                what: "hidden-to-output weight columns",
                expected: loaded.n_out,
                found: loaded.weights_ji.cols,
            });
        }
        Network::from_weights(
            loaded.n_in,
            loaded.n_hid,
            loaded.weights_kj,
            loaded.weights_ji,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_allocates_declared_shapes() {
        let net = Network::random(4, 3, 2, 1.0);
        assert_eq!(net.weights_kj().shape(), (4, 3));
        assert_eq!(net.weights_ji().shape(), (3, 2));
        assert_eq!((net.n_in(), net.n_hid(), net.n_out()), (4, 3, 2));
    }

    #[test]
    fn from_weights_infers_output_count() {
        let net = Network::from_weights(2, 3, Matrix::zeros(2, 3), Matrix::zeros(3, 5)).unwrap();
        assert_eq!(net.n_out(), 5);
    }

    #[test]
    fn from_weights_rejects_disagreeing_shapes() {
        // Wrong kj rows.
        assert!(matches!(
            Network::from_weights(2, 3, Matrix::zeros(4, 3), Matrix::zeros(3, 1)),
            Err(Error::ShapeMismatch { expected: 2, found: 4, .. })
        ));
        // Wrong kj columns.
        assert!(matches!(
            Network::from_weights(2, 3, Matrix::zeros(2, 2), Matrix::zeros(3, 1)),
            Err(Error::ShapeMismatch { expected: 3, found: 2, .. })
        ));
        // Wrong ji rows.
        assert!(matches!(
            Network::from_weights(2, 3, Matrix::zeros(2, 3), Matrix::zeros(2, 1)),
            Err(Error::ShapeMismatch { expected: 3, found: 2, .. })
        ));
        // Zero output units.
        assert!(matches!(
            Network::from_weights(2, 3, Matrix::zeros(2, 3), Matrix::zeros(3, 0)),
            Err(Error::ShapeMismatch { found: 0, .. })
        ));
    }

    #[test]
    fn json_snapshot_round_trips() {
        let net = Network::random(3, 4, 2, 0.5);
        let path = std::env::temp_dir().join(format!("letternet-snap-{}.json", std::process::id()));
        let path = path.to_str().unwrap().to_string();

        net.save_json(&path).unwrap();
        let reloaded = Network::load_json(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(net.weights_kj(), reloaded.weights_kj());
        assert_eq!(net.weights_ji(), reloaded.weights_ji());
    }
}
