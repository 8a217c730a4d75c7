use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::activation::activation::ActivationRange;
use crate::error::Result;
use crate::network::network::Network;
use crate::train::train_config::TrainConfig;

/// A serializable description of a network architecture plus the settings
/// used to train it. Holds no weights.
///
/// Example:
/// ```json
/// {
///   "name": "xor",
///   "input_size": 2,
///   "layers": [3, 1],
///   "range": { "min": 0.0, "max": 1.0 },
///   "training": { "learning_rate": 0.5, "iterations": 20000 }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSpec {
    /// Human-readable name, used in log output.
    pub name: String,
    /// Width of the raw input vector.
    pub input_size: usize,
    /// Output width of every layer, input side first.
    pub layers: Vec<usize>,
    /// Activation output interval; defaults to `[0, 1]`.
    #[serde(default)]
    pub range: ActivationRange,
    #[serde(default)]
    pub training: TrainConfig,
}

impl NetworkSpec {
    /// Builds a freshly initialized network matching this spec.
    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Network> {
        let range = ActivationRange::new(self.range.min, self.range.max)?;
        Network::with_range(self.input_size, &self.layers, range, rng)
    }

    /// Captures the architecture of an existing network.
    pub fn from_network(name: impl Into<String>, network: &Network, training: TrainConfig) -> NetworkSpec {
        NetworkSpec {
            name: name.into(),
            input_size: network.input_size(),
            layers: network.widths(),
            range: network.range(),
            training,
        }
    }

    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a `NetworkSpec` from a JSON file.
    pub fn load_json(path: &str) -> Result<NetworkSpec> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_json_str(json: &str) -> Result<NetworkSpec> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NetworkError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_minimal_json_uses_defaults() {
        let spec = NetworkSpec::from_json_str(r#"{"name":"tiny","input_size":2,"layers":[3,1]}"#).unwrap();
        assert_eq!(spec.range, ActivationRange::default());
        assert_eq!(spec.training, TrainConfig::default());

        let net = spec.build(&mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(net.input_size(), 2);
        assert_eq!(net.widths(), vec![3, 1]);
    }

    #[test]
    fn test_build_validates_range() {
        let spec = NetworkSpec::from_json_str(
            r#"{"name":"bad","input_size":2,"layers":[1],"range":{"min":1.0,"max":-1.0}}"#,
        )
        .unwrap();
        assert!(matches!(
            spec.build(&mut StdRng::seed_from_u64(1)),
            Err(NetworkError::InvalidConstruction(_))
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(NetworkSpec::from_json_str("{\"name\":"), Err(NetworkError::Json(_))));
    }

    #[test]
    fn test_save_and_load_file() {
        let mut rng = StdRng::seed_from_u64(2);
        let net = Network::with_range(3, &[4, 2], ActivationRange::new(-1.0, 1.0).unwrap(), &mut rng).unwrap();
        let spec = NetworkSpec::from_network("saved", &net, TrainConfig::default());

        let path = std::env::temp_dir().join(format!("dense-mlp-spec-{}.json", std::process::id()));
        let path = path.to_str().unwrap();
        spec.save_json(path).unwrap();
        let loaded = NetworkSpec::load_json(path).unwrap();
        std::fs::remove_file(path).unwrap();

        assert_eq!(loaded.name, "saved");
        assert_eq!(loaded.layers, vec![4, 2]);
        assert_eq!(loaded.range, ActivationRange { min: -1.0, max: 1.0 });
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            NetworkSpec::load_json("/nonexistent/dense-mlp/spec.json"),
            Err(NetworkError::Io(_))
        ));
    }
}
