use std::sync::mpsc;
use std::sync::{Arc, atomic::AtomicBool};

use crate::train::epoch_stats::EpochStats;

/// Configuration for a `train` run.
///
/// # Fields
/// - `target_error`  — training stops once the epoch's aggregate error
///                     (Euclidean norm over every example and output) drops
///                     to this value or below
/// - `learning_rate` — step-size multiplier λ applied to the negative
///                     gradient on every weight update
/// - `max_epochs`    — hard cap; exhausting it surfaces `NonConvergence`
///                     instead of looping forever
/// - `progress_tx`   — optional channel sender; one `EpochStats` is sent per
///                     completed epoch. If the receiver is dropped the run
///                     is cancelled (clean shutdown).
/// - `stop_flag`     — optional atomic flag; when set to `true` from another
///                     thread the run is cancelled at the next epoch boundary
pub struct TrainConfig {
    pub target_error: f64,
    pub learning_rate: f64,
    pub max_epochs: usize,
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl TrainConfig {
    /// Creates a minimal `TrainConfig` with no progress channel and no stop flag.
    pub fn new(target_error: f64, learning_rate: f64, max_epochs: usize) -> Self {
        TrainConfig {
            target_error,
            learning_rate,
            max_epochs,
            progress_tx: None,
            stop_flag: None,
        }
    }
}
