use rand::distributions::{Distribution, Uniform};
use rand::Rng;

use crate::{
    activation::activation::{ActivationRange, Sigmoid},
    error::{NetworkError, Result},
    math::matrix::Matrix,
};

/// One fully-connected layer: `weights [outputs x inputs]`, `biases [outputs x 1]`.
#[derive(Debug, Clone)]
pub struct Layer {
    pub(crate) weights: Matrix,
    pub(crate) biases: Matrix,
    pub(crate) activator: Sigmoid,
    last_input: Option<Matrix>,
}

impl Layer {
    /// Creates a layer with weights and biases drawn from `uniform(min, max)`.
    ///
    /// Fails with `InvalidConstruction` unless `range.min < range.max`.
    pub fn new<R: Rng + ?Sized>(
        size: usize,
        input_size: usize,
        range: ActivationRange,
        rng: &mut R,
    ) -> Result<Layer> {
        let mut layer = Layer {
            weights: Matrix::zeros(size, input_size),
            biases: Matrix::zeros(size, 1),
            activator: Sigmoid::new(range)?,
            last_input: None,
        };
        layer.initialize_random(rng);
        Ok(layer)
    }

    pub fn activator(&self) -> &Sigmoid {
        &self.activator
    }

    pub fn weights(&self) -> &Matrix {
        &self.weights
    }

    pub fn biases(&self) -> &Matrix {
        &self.biases
    }

    pub fn input_size(&self) -> usize {
        self.weights.cols()
    }

    pub fn size(&self) -> usize {
        self.weights.rows()
    }

    /// Input recorded by the most recent successful `feed`.
    pub fn last_input(&self) -> Option<&Matrix> {
        self.last_input.as_ref()
    }

    /// Replaces both parameter matrices. Shapes must match the current ones.
    pub fn set_parameters(&mut self, weights: Matrix, biases: Matrix) -> Result<()> {
        if weights.shape() != self.weights.shape() {
            return Err(NetworkError::mismatch("set_parameters", self.weights.shape(), weights.shape()));
        }
        if biases.shape() != self.biases.shape() {
            return Err(NetworkError::mismatch("set_parameters", self.biases.shape(), biases.shape()));
        }
        self.weights = weights;
        self.biases = biases;
        Ok(())
    }

    /// `activation(weights · input + biases)` for a `[inputs x 1]` column.
    pub fn feed(&mut self, input: &Matrix) -> Result<Matrix> {
        let z = self.weights.multiply(input)?.add(&self.biases)?;
        let a = z.map(|x| self.activator.function(x));
        self.last_input = Some(input.clone());
        Ok(a)
    }

    /// Derivative of the activation evaluated at a cached output of this layer.
    pub fn derivative(&self, output: &Matrix) -> Matrix {
        output.map(|y| self.activator.derivative_from_output(y))
    }

    /// Computes the updated `(weights, biases)` for one gradient step without
    /// touching the layer.
    ///
    /// `delta` is the layer's error signal `[outputs x 1]`, `input` the
    /// column this layer consumed during the forward pass.
    pub fn compute_update(&self, delta: &Matrix, input: &Matrix, lr: f64) -> Result<(Matrix, Matrix)> {
        let weights_adjustment = delta.multiply(&input.transpose())?.scale(lr);
        let weights = self.weights.add(&weights_adjustment)?;
        let biases = self.biases.add(&delta.scale(lr))?;
        Ok((weights, biases))
    }

    /// Redraws every weight and bias from `uniform(offset, offset + range)`.
    pub fn initialize_random<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let (low, high) = self.init_bounds();
        self.weights = Matrix::random_uniform(self.weights.rows(), self.weights.cols(), low, high, rng);
        self.biases = Matrix::random_uniform(self.biases.rows(), 1, low, high, rng);
    }

    /// Adds an independent `uniform(offset, offset + range) * factor` term to
    /// every weight and bias.
    pub fn randomize<R: Rng + ?Sized>(&mut self, factor: f64, rng: &mut R) {
        let (low, high) = self.init_bounds();
        let dist = Uniform::new(low, high);
        self.weights = self.weights.map(|x| x + dist.sample(rng) * factor);
        self.biases = self.biases.map(|x| x + dist.sample(rng) * factor);
    }

    fn init_bounds(&self) -> (f64, f64) {
        let low = self.activator.offset();
        (low, low + self.activator.range())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fixed_layer() -> Layer {
        let mut rng = StdRng::seed_from_u64(1);
        let mut layer = Layer::new(2, 3, ActivationRange::default(), &mut rng).unwrap();
        layer
            .set_parameters(
                Matrix::from_rows(vec![vec![0.1, 0.2, 0.3], vec![-0.4, 0.5, -0.6]]).unwrap(),
                Matrix::from_array(&[0.05, -0.05]),
            )
            .unwrap();
        layer
    }

    #[test]
    fn test_feed_computes_sigmoid_of_affine() {
        let mut layer = fixed_layer();
        let input = Matrix::from_array(&[1.0, 2.0, 3.0]);
        let out = layer.feed(&input).unwrap();

        let z0: f64 = 0.1 + 0.4 + 0.9 + 0.05;
        let z1: f64 = -0.4 + 1.0 - 1.8 - 0.05;
        assert_eq!(out.shape(), (2, 1));
        assert!((out.get(0, 0) - 1.0 / (1.0 + (-z0).exp())).abs() < 1e-12);
        assert!((out.get(1, 0) - 1.0 / (1.0 + (-z1).exp())).abs() < 1e-12);
        assert_eq!(layer.last_input(), Some(&input));
    }

    #[test]
    fn test_feed_wrong_width_leaves_cache_untouched() {
        let mut layer = fixed_layer();
        assert!(layer.feed(&Matrix::from_array(&[1.0, 2.0])).is_err());
        assert!(layer.last_input().is_none());
    }

    #[test]
    fn test_initialize_random_respects_range() {
        let mut rng = StdRng::seed_from_u64(3);
        let range = ActivationRange::new(-1.0, 1.0).unwrap();
        let layer = Layer::new(4, 6, range, &mut rng).unwrap();
        assert_eq!(layer.weights().shape(), (4, 6));
        assert_eq!(layer.biases().shape(), (4, 1));
        let all = layer.weights().to_vec().into_iter().chain(layer.biases().to_vec());
        assert!(all.into_iter().all(|x| (-1.0..1.0).contains(&x)));
    }

    #[test]
    fn test_randomize_moves_parameters_within_factor() {
        let mut layer = fixed_layer();
        let before = layer.weights().clone();
        let mut rng = StdRng::seed_from_u64(9);
        layer.randomize(0.01, &mut rng);
        let diffs = layer.weights().subtract(&before).unwrap().to_vec();
        assert!(diffs.iter().all(|d| (0.0..0.01).contains(d)));
        assert!(diffs.iter().any(|&d| d > 0.0));
    }

    #[test]
    fn test_compute_update_is_outer_product_step() {
        let layer = fixed_layer();
        let delta = Matrix::from_array(&[0.5, -1.0]);
        let input = Matrix::from_array(&[1.0, 0.0, 2.0]);
        let (w, b) = layer.compute_update(&delta, &input, 0.1).unwrap();
        assert!((w.get(0, 2) - (0.3 + 0.1 * 0.5 * 2.0)).abs() < 1e-12);
        assert!((w.get(1, 0) - (-0.4 - 0.1)).abs() < 1e-12);
        assert!((w.get(1, 1) - 0.5).abs() < 1e-12);
        assert!((b.get(1, 0) - (-0.05 - 0.1)).abs() < 1e-12);
        // the layer itself is unchanged until the caller commits
        assert_eq!(layer.weights().get(0, 2), 0.3);
    }

    #[test]
    fn test_new_rejects_invalid_range() {
        let mut rng = StdRng::seed_from_u64(2);
        for (min, max) in [(1.0, 0.0), (0.5, 0.5), (f64::NAN, 1.0)] {
            let res = Layer::new(2, 2, ActivationRange { min, max }, &mut rng);
            assert!(matches!(res, Err(NetworkError::InvalidConstruction(_))), "[{min}, {max}]");
        }
    }

    #[test]
    fn test_set_parameters_rejects_wrong_shape() {
        let mut layer = fixed_layer();
        assert!(layer.set_parameters(Matrix::zeros(3, 2), Matrix::zeros(2, 1)).is_err());
        assert_eq!(layer.weights().get(0, 0), 0.1);
    }
}
