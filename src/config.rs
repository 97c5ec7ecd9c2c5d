//! This module provides the configuration of a random network and its assembly.
//!
//! # Examples
//!
//! ```rust
//! use spiking_network::config::NetworkConfig;
//!
//! let config: NetworkConfig = serde_json::from_str(
//!     r#"{"num_neurons": 100, "inhibitory_fraction": 0.2, "mean_degree": 10.0, "mean_strength": 2.0, "seed": 42}"#,
//! ).unwrap();
//! let network = config.network().unwrap();
//!
//! assert_eq!(network.num_neurons(), 100);
//! assert_eq!(network.neurons().iter().filter(|n| n.kind() == "FS").count(), 20);
//! ```
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SNNError;
use crate::network::Network;
use crate::random::RandomNumbers;
use crate::MIN_LINK_STRENGTH;

/// The parameters of a random network.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// The number of neurons.
    pub num_neurons: usize,
    /// The share of inhibitory (fast-spiking) neurons.
    pub inhibitory_fraction: f64,
    /// The mean out-degree of the neurons.
    pub mean_degree: f64,
    /// The mean strength of the links.
    pub mean_strength: f64,
    /// The seed of the random number generator, 0 for a non-deterministic network.
    #[serde(default)]
    pub seed: u64,
    /// Number of neurons per type, overriding the inhibitory fraction when not empty.
    #[serde(default)]
    pub neuron_types: BTreeMap<String, usize>,
}

impl NetworkConfig {
    /// Create a network configuration with the specified parameters.
    /// The function returns an error for an inhibitory fraction out of [0, 1], a negative mean degree or a mean
    /// strength too small to create any link.
    pub fn build(
        num_neurons: usize,
        inhibitory_fraction: f64,
        mean_degree: f64,
        mean_strength: f64,
        seed: u64,
    ) -> Result<Self, SNNError> {
        let config = NetworkConfig {
            num_neurons,
            inhibitory_fraction,
            mean_degree,
            mean_strength,
            seed,
            neuron_types: BTreeMap::new(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Declare the number of neurons of each type.
    pub fn with_neuron_types(mut self, neuron_types: BTreeMap<String, usize>) -> Self {
        self.neuron_types = neuron_types;
        self
    }

    /// Check the parameters of the configuration.
    pub fn validate(&self) -> Result<(), SNNError> {
        if !(0.0..=1.0).contains(&self.inhibitory_fraction) {
            return Err(SNNError::InvalidArgument(format!(
                "inhibitory fraction must be in [0, 1], got {}",
                self.inhibitory_fraction
            )));
        }
        if !(self.mean_degree >= 0.0) || !self.mean_degree.is_finite() {
            return Err(SNNError::InvalidArgument(format!(
                "mean degree must be non-negative, got {}",
                self.mean_degree
            )));
        }
        if !(2.0 * self.mean_strength > MIN_LINK_STRENGTH) || !self.mean_strength.is_finite() {
            return Err(SNNError::InvalidArgument(format!(
                "mean strength must be larger than {}, got {}",
                MIN_LINK_STRENGTH / 2.0,
                self.mean_strength
            )));
        }
        Ok(())
    }

    /// Assemble the network: size the population, assign the neuron types and draw the links.
    pub fn network(&self) -> Result<Network, SNNError> {
        self.validate()?;
        let mut rng = RandomNumbers::new(self.seed);
        let mut network = Network::new();

        network.resize(self.num_neurons, self.inhibitory_fraction, &mut rng)?;
        if !self.neuron_types.is_empty() {
            network.set_default_params(&self.neuron_types, 0, &mut rng)?;
        }
        let num_links = network.random_connect(self.mean_degree, self.mean_strength, &mut rng)?;

        log::info!(
            "Network assembled with {} neurons and {} links",
            network.num_neurons(),
            num_links
        );
        Ok(network)
    }

    /// Save the configuration as JSON.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), SNNError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)
            .map_err(|e| SNNError::IOError(e.to_string()))?;
        writer.flush()?;
        Ok(())
    }

    /// Load and validate a configuration from JSON.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, SNNError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let config: NetworkConfig =
            serde_json::from_reader(reader).map_err(|e| SNNError::IOError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neuron::Neuron;

    #[test]
    fn test_build_invalid() {
        assert!(matches!(
            NetworkConfig::build(10, -0.1, 1.0, 1.0, 0),
            Err(SNNError::InvalidArgument(_))
        ));
        assert!(matches!(
            NetworkConfig::build(10, 0.1, -1.0, 1.0, 0),
            Err(SNNError::InvalidArgument(_))
        ));
        assert!(matches!(
            NetworkConfig::build(10, 0.1, 1.0, 0.0, 0),
            Err(SNNError::InvalidArgument(_))
        ));
        assert!(NetworkConfig::build(10, 0.1, 0.0, 1.0, 0).is_ok());
    }

    #[test]
    fn test_network_is_reproducible() {
        let config = NetworkConfig::build(50, 0.2, 5.0, 1.0, 99).unwrap();
        let network1 = config.network().unwrap();
        let network2 = config.network().unwrap();
        assert_eq!(network1.neurons(), network2.neurons());
        assert!(network1.links().eq(network2.links()));
    }

    #[test]
    fn test_network_with_neuron_types() {
        let types = BTreeMap::from([("CH".to_string(), 3), ("LTS".to_string(), 2)]);
        let config = NetworkConfig::build(10, 0.5, 2.0, 1.0, 5)
            .unwrap()
            .with_neuron_types(types);
        let network = config.network().unwrap();
        let count = |name: &str| network.neurons().iter().filter(|n| n.is_type(name)).count();
        assert_eq!(count("CH"), 3);
        assert_eq!(count("LTS"), 2);
        assert_eq!(count("RS"), 5);
        assert_eq!(count("FS"), 0);
    }

    #[test]
    fn test_json_defaults() {
        let config: NetworkConfig = serde_json::from_str(
            r#"{"num_neurons": 3, "inhibitory_fraction": 0.0, "mean_degree": 1.0, "mean_strength": 1.0}"#,
        )
        .unwrap();
        assert_eq!(config.seed, 0);
        assert!(config.neuron_types.is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = NetworkConfig::build(20, 0.25, 3.0, 1.5, 1)
            .unwrap()
            .with_neuron_types(BTreeMap::from([("FS".to_string(), 4)]));
        config.save_to(&path).unwrap();
        assert_eq!(NetworkConfig::load_from(&path).unwrap(), config);

        assert!(matches!(
            NetworkConfig::load_from(dir.path().join("missing.json")),
            Err(SNNError::IOError(_))
        ));
    }

    #[test]
    fn test_load_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"num_neurons": 3, "inhibitory_fraction": 2.0, "mean_degree": 1.0, "mean_strength": 1.0}"#,
        )
        .unwrap();
        assert!(matches!(
            NetworkConfig::load_from(&path),
            Err(SNNError::InvalidArgument(_))
        ));
    }
}
