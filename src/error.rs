use std::fmt;

/// All failure conditions surfaced by this crate.
///
/// Loading and saving abort on the first error; nothing is truncated,
/// padded, or silently recovered. Training failures (`NonConvergence`,
/// `Cancelled`) carry the last measured aggregate error so callers can
/// decide whether a partial result is usable.
#[derive(Debug)]
pub enum Error {
    /// A matrix or vector dimension disagrees with the network's declared
    /// dimensions. `what` names the offending axis.
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    /// A token in a weight or sample record is not a valid real number.
    Parse { token: String, position: usize },
    /// A record's token count disagrees with the expected shape product.
    Format { expected: usize, found: usize },
    /// A label index does not fit in the configured bit width.
    LabelOverflow { index: usize, width: usize },
    /// Training exhausted its epoch cap (or diverged to a non-finite
    /// aggregate error) before reaching the target error.
    NonConvergence { epochs: usize, error: f64 },
    /// Training was stopped cooperatively before reaching the target error.
    Cancelled { epoch: usize, error: f64 },
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ShapeMismatch {
                what,
                expected,
                found,
            } => {
                write!(f, "shape mismatch: {} expected {}, found {}", what, expected, found)
            }
            Error::Parse { token, position } => {
                write!(f, "token {} ('{}') is not a valid real number", position + 1, token)
            }
            Error::Format { expected, found } => {
                write!(f, "expected {} values, found {}", expected, found)
            }
            Error::LabelOverflow { index, width } => {
                write!(f, "label index {} does not fit in {} bits", index, width)
            }
            Error::NonConvergence { epochs, error } => {
                write!(f, "no convergence after {} epochs (error {})", epochs, error)
            }
            Error::Cancelled { epoch, error } => {
                write!(f, "training cancelled at epoch {} (error {})", epoch, error)
            }
            Error::Io(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}
