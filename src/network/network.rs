use rand::Rng;
use tracing::{debug, trace};

use crate::{
    activation::activation::ActivationRange,
    error::{NetworkError, Result},
    layers::dense::Layer,
    math::matrix::Matrix,
};

/// Feed-forward network: a flat, ordered sequence of fully-connected layers.
#[derive(Debug, Clone)]
pub struct Network {
    input_size: usize,
    range: ActivationRange,
    pub(crate) layers: Vec<Layer>,
}

impl Network {
    /// Builds a network with the default `[0, 1]` activation range.
    ///
    /// `widths` lists the output width of every layer, input side first.
    pub fn new<R: Rng + ?Sized>(input_size: usize, widths: &[usize], rng: &mut R) -> Result<Network> {
        Network::with_range(input_size, widths, ActivationRange::default(), rng)
    }

    pub fn with_range<R: Rng + ?Sized>(
        input_size: usize,
        widths: &[usize],
        range: ActivationRange,
        rng: &mut R,
    ) -> Result<Network> {
        if widths.is_empty() {
            return Err(NetworkError::invalid("network needs at least one layer"));
        }
        if input_size == 0 {
            return Err(NetworkError::invalid("input width must be positive"));
        }
        if let Some(i) = widths.iter().position(|&w| w == 0) {
            return Err(NetworkError::invalid(format!("layer {i} has zero width")));
        }
        let range = ActivationRange::new(range.min, range.max)?;

        let mut layers = Vec::with_capacity(widths.len());
        let mut fan_in = input_size;
        for &size in widths {
            layers.push(Layer::new(size, fan_in, range, rng)?);
            fan_in = size;
        }

        debug!(input_size, ?widths, min = range.min, max = range.max, "built network");

        Ok(Network {
            input_size,
            range,
            layers,
        })
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn output_size(&self) -> usize {
        self.layers.last().map_or(0, Layer::size)
    }

    pub fn range(&self) -> ActivationRange {
        self.range
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Output width of every layer, input side first.
    pub fn widths(&self) -> Vec<usize> {
        self.layers.iter().map(Layer::size).collect()
    }

    /// Forward pass on a flat input vector.
    pub fn feed(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        Ok(self.feed_matrix(&Matrix::from_array(input))?.to_vec())
    }

    /// Forward pass on a `[input_size x 1]` column; each layer records its input.
    pub fn feed_matrix(&mut self, input: &Matrix) -> Result<Matrix> {
        let mut current = input.clone();
        for layer in &mut self.layers {
            current = layer.feed(&current)?;
        }
        Ok(current)
    }

    /// One step of online gradient descent on a single `(input, target)` pair.
    pub fn train(&mut self, input: &[f64], target: &[f64], learning_rate: f64) -> Result<()> {
        self.train_step(input, target, learning_rate).map(|_| ())
    }

    /// Runs forward and backward passes and commits the updates. Returns the
    /// output observed before the update.
    pub(crate) fn train_step(&mut self, input: &[f64], target: &[f64], lr: f64) -> Result<Matrix> {
        self.check_target(target)?;
        let activations = self.forward_trace(&Matrix::from_array(input))?;
        let output = activations[activations.len() - 1].clone();
        let error = Matrix::from_array(target).subtract(&output)?;

        let deltas = self.backward(&activations, error)?;

        // Every new parameter pair is computed before any is committed.
        let updates = self
            .layers
            .iter()
            .zip(deltas.iter())
            .zip(activations.iter())
            .map(|((layer, delta), layer_input)| layer.compute_update(delta, layer_input, lr))
            .collect::<Result<Vec<_>>>()?;

        for (layer, (weights, biases)) in self.layers.iter_mut().zip(updates) {
            layer.weights = weights;
            layer.biases = biases;
        }

        trace!(lr, ?target, output = ?output.to_vec(), "train step");
        Ok(output)
    }

    /// Rejects a target of the wrong width before any layer state is touched.
    fn check_target(&self, target: &[f64]) -> Result<()> {
        if target.len() != self.output_size() {
            return Err(NetworkError::mismatch(
                "target",
                (target.len(), 1),
                (self.output_size(), 1),
            ));
        }
        Ok(())
    }

    /// Forward pass returning `[input, out_0, out_1, ..., out_last]`.
    fn forward_trace(&mut self, input: &Matrix) -> Result<Vec<Matrix>> {
        let mut activations = Vec::with_capacity(self.layers.len() + 1);
        activations.push(input.clone());
        for layer in &mut self.layers {
            let next = layer.feed(&activations[activations.len() - 1])?;
            activations.push(next);
        }
        Ok(activations)
    }

    /// Computes every layer's delta from the current (pre-update) weights.
    ///
    /// `activations` is the trace produced by `forward_trace`; `error` is
    /// `target - output`. The returned deltas are indexed like `layers`.
    pub(crate) fn backward(&self, activations: &[Matrix], error: Matrix) -> Result<Vec<Matrix>> {
        let n = self.layers.len();
        let mut deltas = Vec::with_capacity(n);

        let last = &self.layers[n - 1];
        let mut delta = error.multiply_each(&last.derivative(&activations[n]))?;

        for i in (0..n - 1).rev() {
            let next_weights = &self.layers[i + 1].weights;
            let propagated = next_weights.transpose().multiply(&delta)?;
            let next_delta = propagated.multiply_each(&self.layers[i].derivative(&activations[i + 1]))?;
            deltas.push(delta);
            delta = next_delta;
        }
        deltas.push(delta);
        deltas.reverse();

        Ok(deltas)
    }

    /// Deltas for one `(input, target)` pair without applying an update.
    pub fn deltas(&mut self, input: &[f64], target: &[f64]) -> Result<Vec<Matrix>> {
        self.check_target(target)?;
        let activations = self.forward_trace(&Matrix::from_array(input))?;
        let output = &activations[activations.len() - 1];
        let error = Matrix::from_array(target).subtract(output)?;
        self.backward(&activations, error)
    }
}
