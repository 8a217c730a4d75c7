use crate::{error::Result, network::network::Network};

/// Plain online gradient descent: no momentum, no batching.
#[derive(Debug, Clone, Copy)]
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }

    /// Applies one update for a single sample and returns the network output
    /// observed before the update.
    pub fn step(&self, network: &mut Network, input: &[f64], target: &[f64]) -> Result<Vec<f64>> {
        Ok(network.train_step(input, target, self.learning_rate)?.to_vec())
    }
}
