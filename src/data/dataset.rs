use std::fs;
use std::path::Path;

use crate::error::Error;
use crate::persist::weights::parse_record;

/// An ordered, shape-checked collection of (input, target) training pairs.
/// Immutable once handed to the trainer; examples are visited in insertion
/// order every epoch.
#[derive(Debug, Clone)]
pub struct TrainingSet {
    n_in: usize,
    n_out: usize,
    inputs: Vec<Vec<f64>>,
    targets: Vec<Vec<f64>>,
}

impl TrainingSet {
    pub fn new(n_in: usize, n_out: usize) -> TrainingSet {
        TrainingSet {
            n_in,
            n_out,
            inputs: Vec::new(),
            targets: Vec::new(),
        }
    }

    pub fn n_in(&self) -> usize {
        self.n_in
    }

    pub fn n_out(&self) -> usize {
        self.n_out
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// Appends one example. Vectors of the wrong length are rejected, never
    /// truncated or padded.
    pub fn push(&mut self, input: Vec<f64>, target: Vec<f64>) -> Result<(), Error> {
        if input.len() != self.n_in {
            return Err(Error::ShapeMismatch {
                what: "example input length",
                expected: self.n_in,
                found: input.len(),
            });
        }
        if target.len() != self.n_out {
            return Err(Error::ShapeMismatch {
                what: "example target length",
                expected: self.n_out,
                found: target.len(),
            });
        }
        self.inputs.push(input);
        self.targets.push(target);
        Ok(())
    }

    /// Reads one sample file and appends it with the given target vector.
    pub fn push_sample_file(
        &mut self,
        path: impl AsRef<Path>,
        target: Vec<f64>,
    ) -> Result<(), Error> {
        let input = read_sample(path, self.n_in)?;
        self.push(input, target)
    }

    pub fn input(&self, index: usize) -> &[f64] {
        &self.inputs[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[f64], &[f64])> {
        self.inputs
            .iter()
            .map(Vec::as_slice)
            .zip(self.targets.iter().map(Vec::as_slice))
    }

    /// The 4-example XOR set: `{(0,0)→0, (0,1)→1, (1,0)→1, (1,1)→0}`.
    pub fn xor() -> TrainingSet {
        let mut set = TrainingSet::new(2, 1);
        for (input, target) in [
            (vec![0.0, 0.0], vec![0.0]),
            (vec![0.0, 1.0], vec![1.0]),
            (vec![1.0, 0.0], vec![1.0]),
            (vec![1.0, 1.0], vec![0.0]),
        ] {
            set.push(input, target)
                .expect("fixture shapes are correct by construction");
        }
        set
    }
}

/// Reads a sample file: a single line of exactly `n_in` comma-separated real
/// values (a trailing separator is tolerated). Everything past the first
/// line is ignored.
pub fn read_sample(path: impl AsRef<Path>, n_in: usize) -> Result<Vec<f64>, Error> {
    let text = fs::read_to_string(path)?;
    let line = text.lines().next().unwrap_or("");
    parse_record(line, n_in)
}
