//! This crate provides tools for simulating sparse networks of spiking point-neurons, advanced synchronously one tick at a time.
//!
//! # Creating Networks
//!
//! ## From Scratch
//!
//! ```rust
//! use spiking_network::network::Network;
//! use spiking_network::random::RandomNumbers;
//!
//! // Init a network of 4 neurons, 20% of them inhibitory
//! let mut rng = RandomNumbers::new(42);
//! let mut network = Network::new();
//! network.resize(4, 0.2, &mut rng).unwrap();
//!
//! // Add links to the network
//! assert!(network.add_link(0, 1, 1.0));
//! assert!(network.add_link(1, 2, 0.5));
//! assert!(!network.add_link(3, 3, 0.25)); // no self-loop
//! assert!(!network.add_link(0, 1, 2.0)); // no duplicate
//!
//! assert_eq!(network.num_neurons(), 4);
//! assert_eq!(network.num_links(), 2);
//! ```
//!
//! ## At Random
//!
//! ```rust
//! use spiking_network::network::Network;
//! use spiking_network::random::RandomNumbers;
//!
//! // Create a random network with 200 neurons and about 20 outgoing links per neuron
//! let mut rng = RandomNumbers::new(42);
//! let mut network = Network::new();
//! network.resize(200, 0.25, &mut rng).unwrap();
//! let num_links = network.random_connect(20.0, 4.0, &mut rng).unwrap();
//!
//! assert_eq!(network.num_links(), num_links);
//! ```
//!
//! # Simulating Networks
//!
//! ```rust
//! use spiking_network::network::Network;
//! use spiking_network::random::RandomNumbers;
//!
//! let mut rng = RandomNumbers::new(7);
//! let mut network = Network::new();
//! network.resize(100, 0.2, &mut rng).unwrap();
//! network.random_connect(10.0, 2.0, &mut rng).unwrap();
//!
//! for _ in 0..100 {
//!     let thalamic = rng.normal_vec(network.num_neurons(), 0.0, 5.0).unwrap();
//!     let fired = network.step(&thalamic).unwrap();
//!     assert!(fired.len() <= network.num_neurons());
//! }
//! ```

pub mod config;
pub mod error;
pub mod izhikevich;
pub mod network;
pub mod neuron;
pub mod random;

/// The smallest strength a link can be created with.
pub const MIN_LINK_STRENGTH: f64 = 1e-6;
/// The factor applied to the strength of a link whose target is inhibitory, at insertion time.
pub const INHIBITORY_LINK_SCALE: f64 = -2.0;
/// The gain applied to the summed weights of excitatory firing neighbors.
pub const EXCITATORY_GAIN: f64 = 0.5;
/// The gain applied to the external input of an inhibitory neuron (excitatory neurons use 1).
pub const INHIBITORY_INPUT_GAIN: f64 = 0.4;
/// The canonical excitatory (regular-spiking) neuron type.
pub const EXCITATORY_TYPE: &str = "RS";
/// The canonical inhibitory (fast-spiking) neuron type.
pub const INHIBITORY_TYPE: &str = "FS";
/// Minimum number of neurons to compute the synaptic inputs in parallel.
pub const MIN_NEURONS_PAR: usize = 1000;
