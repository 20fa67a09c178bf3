pub mod activation;
pub mod data;
pub mod error;
pub mod math;
pub mod network;
pub mod persist;
pub mod train;

// Convenience re-exports
pub use activation::activation::{sigmoid, sigmoid_prime};
pub use data::dataset::TrainingSet;
pub use error::Error;
pub use math::matrix::Matrix;
pub use network::network::Network;
pub use train::epoch_stats::EpochStats;
pub use train::train_config::TrainConfig;
pub use train::trainer::train;
