pub mod activation;

pub use activation::{ActivationRange, Sigmoid};
