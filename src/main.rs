// Builds a network from a JSON spec (or a built-in 2-3-1 default) and trains
// it on XOR. Run with:
//   cargo run -- path/to/spec.json
//   RUST_LOG=debug cargo run
use dense_mlp::{train_network, NetworkSpec, Sgd, TrainConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn default_spec() -> NetworkSpec {
    NetworkSpec {
        name: "xor".to_string(),
        input_size: 2,
        layers: vec![3, 1],
        range: Default::default(),
        training: TrainConfig {
            seed: Some(1),
            log_every: 2_000,
            ..TrainConfig::new(0.5, 20_000)
        },
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let spec = match std::env::args().nth(1) {
        Some(path) => NetworkSpec::load_json(&path)?,
        None => default_spec(),
    };
    let config = &spec.training;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut network = spec.build(&mut rng)?;
    info!(name = %spec.name, layers = ?spec.layers, "training on XOR");

    let inputs = vec![
        vec![0.0, 0.0],
        vec![0.0, 1.0],
        vec![1.0, 0.0],
        vec![1.0, 1.0],
    ];
    let expected_outputs = vec![vec![0.0], vec![1.0], vec![1.0], vec![0.0]];

    let optimizer = Sgd::new(config.learning_rate);
    for iteration in 0..config.iterations {
        let loss = train_network(&mut network, &inputs, &expected_outputs, &optimizer)?;
        if config.log_every > 0 && iteration % config.log_every == 0 {
            info!(iteration, loss, "progress");
        }
    }

    for input in &inputs {
        let output = network.feed(input)?;
        info!(?input, output = output[0], "prediction");
    }

    Ok(())
}
