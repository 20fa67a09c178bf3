use serde::{Serialize, Deserialize};

/// Per-epoch training statistics emitted by `train`.
///
/// When a `progress_tx` channel is configured in `TrainConfig`, the training
/// loop sends one `EpochStats` value at the end of every completed epoch.
/// Receivers (e.g. a printing thread in a binary) use this to report
/// progress without the trainer itself ever touching stdout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Epoch cap for this run.
    pub max_epochs: usize,
    /// Euclidean norm of the per-example, per-output errors of this epoch.
    pub aggregate_error: f64,
    /// Wall-clock duration of this single epoch in milliseconds.
    pub elapsed_ms: u64,
}
