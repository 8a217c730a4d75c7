//! Mutation-based helpers that sit beside gradient descent: parameter
//! perturbation, copying, and crossover over a population of networks.

use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use tracing::debug;

use crate::{
    error::{NetworkError, Result},
    math::matrix::Matrix,
    network::network::Network,
};

impl Network {
    /// Perturbs every weight and bias by `uniform(offset, offset + range) * factor`.
    pub fn randomize<R: Rng + ?Sized>(&mut self, factor: f64, rng: &mut R) {
        for layer in &mut self.layers {
            layer.randomize(factor, rng);
        }
    }

    /// Copies all parameters from `other`, which must share this network's topology.
    pub fn load_from(&mut self, other: &Network) -> Result<()> {
        check_topology(self, other)?;
        for (layer, source) in self.layers.iter_mut().zip(&other.layers) {
            layer.set_parameters(source.weights().clone(), source.biases().clone())?;
        }
        Ok(())
    }
}

/// Breeds a new network from `population`.
///
/// Every weight and bias is copied from the same position in a uniformly
/// chosen member, then shifted by `uniform(-1, 1) * factor`. The child takes
/// the topology and activation range of `population[0]`.
pub fn crossover_mutate<R: Rng + ?Sized>(population: &[Network], factor: f64, rng: &mut R) -> Result<Network> {
    let template = population
        .first()
        .ok_or_else(|| NetworkError::invalid("crossover needs a non-empty population"))?;
    for member in &population[1..] {
        check_topology(template, member)?;
    }

    let noise = Uniform::new_inclusive(-1.0, 1.0);
    let mut child = template.clone();

    for (idx, layer) in child.layers.iter_mut().enumerate() {
        let mut weights = Matrix::zeros(layer.size(), layer.input_size());
        let mut biases = Matrix::zeros(layer.size(), 1);

        for i in 0..layer.size() {
            for j in 0..layer.input_size() {
                let parent = &population[rng.gen_range(0..population.len())];
                let w = parent.layers[idx].weights().get(i, j);
                weights.set(i, j, w + noise.sample(rng) * factor);
            }
            let parent = &population[rng.gen_range(0..population.len())];
            let b = parent.layers[idx].biases().get(i, 0);
            biases.set(i, 0, b + noise.sample(rng) * factor);
        }

        layer.set_parameters(weights, biases)?;
    }

    debug!(population = population.len(), factor, "bred network by crossover");
    Ok(child)
}

fn check_topology(a: &Network, b: &Network) -> Result<()> {
    if a.input_size() != b.input_size() || a.layers.len() != b.layers.len() {
        return Err(NetworkError::mismatch(
            "topology",
            (a.layers.len(), a.input_size()),
            (b.layers.len(), b.input_size()),
        ));
    }
    for (la, lb) in a.layers.iter().zip(&b.layers) {
        if la.weights().shape() != lb.weights().shape() {
            return Err(NetworkError::mismatch("topology", la.weights().shape(), lb.weights().shape()));
        }
    }
    Ok(())
}
