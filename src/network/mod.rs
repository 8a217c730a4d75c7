pub mod evolve;
pub mod network;
pub mod spec;

pub use evolve::crossover_mutate;
pub use network::Network;
pub use spec::NetworkSpec;
