//! Flat delimited persistence for weight matrices.
//!
//! A weight record is a single line: every input-to-hidden entry in
//! row-major order (input-major, hidden-minor), then every hidden-to-output
//! entry in row-major order (hidden-major, output-minor), each value
//! followed by a comma. Values are written with Rust's shortest
//! round-trippable `f64` formatting, so `decode(encode(w)) == w` exactly.

use std::fs;
use std::path::Path;

use crate::error::Error;
use crate::math::matrix::Matrix;
use crate::network::network::Network;

/// Serializes both weight matrices into one delimited record.
pub fn encode(kj: &Matrix, ji: &Matrix) -> String {
    let mut record = String::new();
    for row in kj.data.iter().chain(ji.data.iter()) {
        for value in row {
            record.push_str(&value.to_string());
            record.push(',');
        }
    }
    record
}

/// Parses a record back into the (input-to-hidden, hidden-to-output) pair
/// for the declared dimensions.
pub fn decode(
    text: &str,
    n_in: usize,
    n_hid: usize,
    n_out: usize,
) -> Result<(Matrix, Matrix), Error> {
    let values = parse_record(text, n_in * n_hid + n_hid * n_out)?;

    let mut it = values.into_iter();
    let kj: Vec<Vec<f64>> = (0..n_in)
        .map(|_| it.by_ref().take(n_hid).collect())
        .collect();
    let ji: Vec<Vec<f64>> = (0..n_hid)
        .map(|_| it.by_ref().take(n_out).collect())
        .collect();

    Ok((Matrix::from_rows(kj)?, Matrix::from_rows(ji)?))
}

/// Writes the network's weight record to a file.
pub fn save_weights(network: &Network, path: impl AsRef<Path>) -> Result<(), Error> {
    fs::write(path, encode(network.weights_kj(), network.weights_ji()))?;
    Ok(())
}

/// Reads a weight record and builds a network with the declared dimensions.
/// The shape checks of `Network::from_weights` always run on the result.
pub fn load_weights(
    path: impl AsRef<Path>,
    n_in: usize,
    n_hid: usize,
    n_out: usize,
) -> Result<Network, Error> {
    let text = fs::read_to_string(path)?;
    let (kj, ji) = decode(&text, n_in, n_hid, n_out)?;
    Network::from_weights(n_in, n_hid, kj, ji)
}

/// Splits a delimited record into exactly `expected` real values.
///
/// One empty final token (from a trailing separator) is ignored; any other
/// count disagreement is a `Format` error, and a token that is not a valid
/// real number is a `Parse` error carrying its position.
///
/// Sample files share this record syntax, so the dataset reader reuses this
/// parser.
pub(crate) fn parse_record(text: &str, expected: usize) -> Result<Vec<f64>, Error> {
    let mut tokens: Vec<&str> = text.trim_end().split(',').collect();
    if tokens.last() == Some(&"") {
        tokens.pop();
    }

    if tokens.len() != expected {
        return Err(Error::Format {
            expected,
            found: tokens.len(),
        });
    }

    tokens
        .iter()
        .enumerate()
        .map(|(position, token)| {
            token.trim().parse::<f64>().map_err(|_| Error::Parse {
                token: token.to_string(),
                position,
            })
        })
        .collect()
}
