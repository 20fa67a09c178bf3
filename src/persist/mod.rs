pub mod weights;

pub use weights::{decode, encode, load_weights, save_weights};
