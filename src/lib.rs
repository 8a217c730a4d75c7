pub mod error;
pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod train;

// Convenience re-exports
pub use error::{NetworkError, Result};
pub use math::matrix::Matrix;
pub use activation::activation::{ActivationRange, Sigmoid};
pub use layers::dense::Layer;
pub use network::network::Network;
pub use network::evolve::crossover_mutate;
pub use network::spec::NetworkSpec;
pub use loss::mse::MseLoss;
pub use optim::sgd::Sgd;
pub use train::{train_network, TrainConfig};
