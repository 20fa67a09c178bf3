use rand::prelude::*;
use serde::{Serialize, Deserialize};

use crate::error::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        }
    }

    /// Every entry drawn independently, uniform in [-range/2, +range/2).
    pub fn uniform(rows: usize, cols: usize, range: f64) -> Matrix {
        let mut rng = rand::thread_rng();
        let mut res = Matrix::zeros(rows, cols);

        for i in 0..rows {
            for j in 0..cols {
                res.data[i][j] = rng.gen::<f64>() * range - range / 2.0;
            }
        }

        res
    }

    /// Builds a matrix from row vectors. Rows must all have the same length.
    pub fn from_rows(data: Vec<Vec<f64>>) -> Result<Matrix, Error> {
        let rows = data.len();
        let cols = data.first().map_or(0, |row| row.len());

        for row in &data {
            if row.len() != cols {
                return Err(Error::ShapeMismatch {
                    what: "matrix row length",
                    expected: cols,
                    found: row.len(),
                });
            }
        }

        Ok(Matrix { rows, cols, data })
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }
}
