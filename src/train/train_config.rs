use serde::{Deserialize, Serialize};

/// Settings for a training run driven by the `dense-mlp` binary.
///
/// # Fields
/// - `learning_rate` — step size passed to every `Network::train` call
/// - `iterations`    — number of in-order passes over the dataset
/// - `seed`          — optional RNG seed for reproducible initialization
/// - `log_every`     — emit a progress line every this many passes (`0` disables)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub learning_rate: f64,
    pub iterations: usize,
    pub seed: Option<u64>,
    pub log_every: usize,
}

impl TrainConfig {
    pub fn new(learning_rate: f64, iterations: usize) -> Self {
        TrainConfig {
            learning_rate,
            iterations,
            ..TrainConfig::default()
        }
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            learning_rate: 0.1,
            iterations: 1000,
            seed: None,
            log_every: 100,
        }
    }
}
