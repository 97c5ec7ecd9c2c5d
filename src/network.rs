//! Network (with neurons and links) structure and its synchronous simulation.
//!
//! A network owns a population of neurons, indexed by their ID, the links between them, and a cache of the
//! outgoing links of every neuron. It is advanced one tick at a time by [`Network::step`].
//!
//! # Examples
//!
//! ```rust
//! use spiking_network::network::Network;
//! use spiking_network::random::RandomNumbers;
//!
//! let mut rng = RandomNumbers::new(42);
//! let mut network = Network::new();
//! network.resize(3, 0.0, &mut rng).unwrap();
//! network.add_link(0, 1, 2.0);
//! network.add_link(0, 2, 3.0);
//! assert_eq!(network.degree(0), (2, 5.0));
//!
//! // Neuron 0 fires during the first tick
//! network.set_values(&[35.0], 0).unwrap();
//! let fired = network.step(&[0.0, 0.0, 0.0]).unwrap();
//! assert!(fired.contains(&0));
//! assert_eq!(fired.len(), 1);
//! ```
use std::collections::BTreeSet;

use rayon::prelude::*;

use crate::error::SNNError;
use crate::izhikevich::Izhikevich;
use crate::neuron::Neuron;
use crate::random::RandomNumbers;
use crate::{
    EXCITATORY_GAIN, INHIBITORY_INPUT_GAIN, INHIBITORY_LINK_SCALE, MIN_LINK_STRENGTH,
    MIN_NEURONS_PAR,
};

mod adjacency;
mod links;
pub mod population;
pub mod report;

use adjacency::AdjacencyCache;
use links::LinkStore;

pub use links::{Link, LinkRejection};

/// A population of spiking neurons connected by a sparse, directed and weighted graph.
#[derive(Debug, Clone)]
pub struct Network<N: Neuron = Izhikevich> {
    neurons: Vec<N>,
    links: LinkStore,
    // One entry per neuron, always the same length as `neurons`.
    adjacency: AdjacencyCache,
}

impl<N: Neuron> Default for Network<N> {
    fn default() -> Self {
        Self::with_neurons(Vec::new())
    }
}

impl Network {
    /// Create an empty network of Izhikevich neurons.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<N: Neuron> Network<N> {
    /// Create a network with the provided neurons and without any link.
    pub fn with_neurons(neurons: Vec<N>) -> Self {
        let adjacency = AdjacencyCache::with_len(neurons.len());
        Network {
            neurons,
            links: LinkStore::new(),
            adjacency,
        }
    }

    /// The number of neurons in the network.
    pub fn num_neurons(&self) -> usize {
        self.neurons.len()
    }

    /// The number of links in the network.
    pub fn num_links(&self) -> usize {
        self.links.len()
    }

    /// A slice of the neurons, indexed by ID.
    pub fn neurons(&self) -> &[N] {
        &self.neurons
    }

    /// A reference to a specific neuron in the network.
    /// Returns `None` if the neuron is not found.
    pub fn neuron(&self, id: usize) -> Option<&N> {
        self.neurons.get(id)
    }

    /// A mutable reference to a specific neuron in the network.
    /// Returns `None` if the neuron is not found.
    ///
    /// Changing the type of a neuron does not rescale the weights of the links already targeting it.
    pub fn neuron_mut(&mut self, id: usize) -> Option<&mut N> {
        self.neurons.get_mut(id)
    }

    /// Add a link from source to target.
    /// Returns false, leaving the network untouched, if the link is a self-loop, if an endpoint is out of range,
    /// if the strength is below [`MIN_LINK_STRENGTH`] or if the link already exists.
    pub fn add_link(&mut self, source_id: usize, target_id: usize, strength: f64) -> bool {
        self.try_add_link(source_id, target_id, strength).is_ok()
    }

    /// Add a link from source to target, with the reason of the rejection on failure.
    /// On success, returns the stored weight: the strength, multiplied by [`INHIBITORY_LINK_SCALE`] if the target
    /// is inhibitory.
    pub fn try_add_link(
        &mut self,
        source_id: usize,
        target_id: usize,
        strength: f64,
    ) -> Result<f64, LinkRejection> {
        if source_id == target_id {
            return Err(LinkRejection::SelfLoop);
        }
        if source_id >= self.num_neurons() || target_id >= self.num_neurons() {
            return Err(LinkRejection::OutOfRange);
        }
        if !(strength >= MIN_LINK_STRENGTH) {
            return Err(LinkRejection::WeakStrength);
        }

        let weight = if self.neurons[target_id].is_inhibitory() {
            strength * INHIBITORY_LINK_SCALE
        } else {
            strength
        };
        if !self.links.insert(source_id, target_id, weight) {
            return Err(LinkRejection::Duplicate);
        }
        self.adjacency.invalidate(source_id);
        Ok(weight)
    }

    /// Remove the link from source to target and return its weight, if any.
    pub fn remove_link(&mut self, source_id: usize, target_id: usize) -> Option<f64> {
        let weight = self.links.remove(source_id, target_id)?;
        self.adjacency.invalidate(source_id);
        Some(weight)
    }

    /// Remove all links from the network.
    pub fn clear_links(&mut self) {
        self.links.clear();
        self.adjacency.invalidate_all();
    }

    /// Returns the weight of the link from source to target, if any.
    pub fn link(&self, source_id: usize, target_id: usize) -> Option<f64> {
        self.links.weight(source_id, target_id)
    }

    /// An iterator over all links, ordered by source then target.
    pub fn links(&self) -> impl Iterator<Item = Link> + '_ {
        self.links.iter()
    }

    /// The (target, weight) pairs of the links leaving the neuron, ordered by target.
    /// The list is materialized on first request and reused until the links of the neuron change.
    /// A neuron out of range has no neighbors.
    pub fn neighbors(&self, id: usize) -> &[(usize, f64)] {
        self.adjacency
            .get_or_init(id, || self.links.outgoing(id).collect())
            .unwrap_or(&[])
    }

    /// Returns true if the neighbors of the neuron are currently cached.
    pub fn is_cached(&self, id: usize) -> bool {
        self.adjacency.is_cached(id)
    }

    /// The number of links leaving the neuron and the sum of their weights.
    pub fn degree(&self, id: usize) -> (usize, f64) {
        let neighbors = self.neighbors(id);
        (
            neighbors.len(),
            neighbors.iter().fold(0.0, |total, (_, weight)| total + weight),
        )
    }

    /// Replace all links by a random graph.
    ///
    /// Every neuron draws its out-degree from a Poisson distribution with mean `mean_degree` and tries its targets
    /// in the order of a fresh random permutation of all neurons, each attempt with a strength drawn uniformly in
    /// `[MIN_LINK_STRENGTH, 2 * mean_strength)`, until enough links were accepted or all neurons were tried.
    /// Returns the total number of links created, which can be lower than the sum of the drawn degrees.
    ///
    /// The function returns an error, before removing any link, if the mean degree is negative or not finite, or if
    /// `2 * mean_strength` does not exceed [`MIN_LINK_STRENGTH`].
    pub fn random_connect(
        &mut self,
        mean_degree: f64,
        mean_strength: f64,
        rng: &mut RandomNumbers,
    ) -> Result<usize, SNNError> {
        let max_strength = 2.0 * mean_strength;
        if !(max_strength > MIN_LINK_STRENGTH) || !max_strength.is_finite() {
            return Err(SNNError::InvalidArgument(format!(
                "mean link strength must be larger than {}, got {}",
                MIN_LINK_STRENGTH / 2.0,
                mean_strength
            )));
        }
        let degrees = rng.poisson_vec(self.num_neurons(), mean_degree)?;

        self.clear_links();

        let mut node_ids: Vec<usize> = (0..self.num_neurons()).collect();
        // Without self-loops, a neuron accepts at most one link per other neuron.
        let max_degree = self.num_neurons().saturating_sub(1);
        let mut num_links = 0;
        for (source_id, &degree) in degrees.iter().enumerate() {
            rng.shuffle(&mut node_ids);
            let degree = usize::try_from(degree).map_or(max_degree, |d| d.min(max_degree));
            let strengths = rng.uniform_double_vec(degree, MIN_LINK_STRENGTH, max_strength)?;

            let mut accepted = 0;
            for &target_id in node_ids.iter() {
                if accepted == strengths.len() {
                    break;
                }
                if self.add_link(source_id, target_id, strengths[accepted]) {
                    accepted += 1;
                }
            }
            num_links += accepted;
        }

        log::debug!(
            "Random graph with {} links over {} neurons (drawn degrees: {})",
            num_links,
            self.num_neurons(),
            degrees.iter().sum::<u64>()
        );
        Ok(num_links)
    }

    /// Advance all neurons by one tick and return the IDs of the neurons which were firing at the start of the tick.
    ///
    /// First, every firing neuron is recorded and reset. Only then, every neuron receives its external input
    /// (scaled by [`INHIBITORY_INPUT_GAIN`] for inhibitory neurons) plus the weights of its firing neighbors
    /// (excitatory ones scaled by [`EXCITATORY_GAIN`]), and is advanced.
    /// The function returns an error if the external input does not have one value per neuron.
    pub fn step(&mut self, external_input: &[f64]) -> Result<BTreeSet<usize>, SNNError> {
        if external_input.len() != self.num_neurons() {
            return Err(SNNError::InvalidArgument(format!(
                "expected {} external inputs, got {}",
                self.num_neurons(),
                external_input.len()
            )));
        }

        let mut fired = vec![false; self.num_neurons()];
        for (id, neuron) in self.neurons.iter_mut().enumerate() {
            if neuron.firing() {
                fired[id] = true;
                neuron.reset();
            }
        }

        let inputs: Vec<f64> = if self.num_neurons() >= MIN_NEURONS_PAR {
            (0..self.num_neurons())
                .into_par_iter()
                .map(|id| self.combined_input(id, external_input[id], &fired))
                .collect()
        } else {
            (0..self.num_neurons())
                .map(|id| self.combined_input(id, external_input[id], &fired))
                .collect()
        };

        for (neuron, input) in self.neurons.iter_mut().zip(inputs) {
            neuron.input(input);
            neuron.step();
        }

        let firing_set: BTreeSet<usize> = fired
            .iter()
            .enumerate()
            .filter_map(|(id, &f)| f.then_some(id))
            .collect();
        log::trace!("{} neurons fired", firing_set.len());
        Ok(firing_set)
    }

    fn combined_input(&self, id: usize, external_input: f64, fired: &[bool]) -> f64 {
        let (excitatory, inhibitory) = self.firing_neighbors_input(id, fired);
        let gain = if self.neurons[id].is_inhibitory() {
            INHIBITORY_INPUT_GAIN
        } else {
            1.0
        };
        gain * external_input + EXCITATORY_GAIN * excitatory + inhibitory
    }

    // Sums of the weights towards the fired neighbors, split by the type of the neighbor.
    fn firing_neighbors_input(&self, id: usize, fired: &[bool]) -> (f64, f64) {
        self.neighbors(id)
            .iter()
            .filter(|(neighbor_id, _)| fired[*neighbor_id])
            .fold((0.0, 0.0), |(excitatory, inhibitory), &(neighbor_id, weight)| {
                if self.neurons[neighbor_id].is_inhibitory() {
                    (excitatory, inhibitory + weight)
                } else {
                    (excitatory + weight, inhibitory)
                }
            })
    }
}
