//! Module implementing the ordered store of directed, weighted links.
//!
//! Links are keyed by `(source_id, target_id)` and kept in that total order, so that all links leaving a given
//! neuron form one contiguous range, found in logarithmic time.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Represents a directed link between two neurons in a network.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct Link {
    source_id: usize,
    target_id: usize,
    /// Link weight, already signed and scaled according to the target type at insertion.
    weight: f64,
}

impl Link {
    /// Returns the ID of the source neuron.
    pub fn source_id(&self) -> usize {
        self.source_id
    }

    /// Returns the ID of the target neuron.
    pub fn target_id(&self) -> usize {
        self.target_id
    }

    /// Returns the weight of the link.
    pub fn weight(&self) -> f64 {
        self.weight
    }
}

/// The reason why a link was not added to a network.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum LinkRejection {
    /// Source and target are the same neuron.
    SelfLoop,
    /// Source or target is not a neuron of the network.
    OutOfRange,
    /// The strength is below the minimum link strength (or NaN).
    WeakStrength,
    /// A link with the same source and target already exists.
    Duplicate,
}

impl fmt::Display for LinkRejection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LinkRejection::SelfLoop => write!(f, "Self-loops are not allowed"),
            LinkRejection::OutOfRange => write!(f, "Source or target neuron out of range"),
            LinkRejection::WeakStrength => write!(f, "Link strength below the minimum"),
            LinkRejection::Duplicate => write!(f, "Link already exists"),
        }
    }
}

/// The links of a network, ordered by source then target.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct LinkStore {
    links: BTreeMap<(usize, usize), f64>,
}

impl LinkStore {
    pub fn new() -> Self {
        LinkStore::default()
    }

    /// Returns the number of links.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Returns the weight of the link from source to target, if any.
    pub fn weight(&self, source_id: usize, target_id: usize) -> Option<f64> {
        self.links.get(&(source_id, target_id)).copied()
    }

    /// Insert a link, unless one already exists for the same (source, target) pair.
    /// Returns true if the link was inserted.
    pub fn insert(&mut self, source_id: usize, target_id: usize, weight: f64) -> bool {
        match self.links.entry((source_id, target_id)) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(weight);
                true
            }
        }
    }

    /// Remove the link from source to target and return its weight, if any.
    pub fn remove(&mut self, source_id: usize, target_id: usize) -> Option<f64> {
        self.links.remove(&(source_id, target_id))
    }

    pub fn clear(&mut self) {
        self.links.clear();
    }

    /// An iterator over the (target, weight) pairs of the links leaving the source, by increasing target.
    pub fn outgoing(&self, source_id: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.links
            .range((source_id, 0)..=(source_id, usize::MAX))
            .map(|(&(_, target_id), &weight)| (target_id, weight))
    }

    /// An iterator over all links, by increasing (source, target).
    pub fn iter(&self) -> impl Iterator<Item = Link> + '_ {
        self.links
            .iter()
            .map(|(&(source_id, target_id), &weight)| Link {
                source_id,
                target_id,
                weight,
            })
    }

    /// Remove every link with an endpoint at or above the provided bound.
    /// Returns the sources below the bound which lost at least one link.
    pub fn remove_beyond(&mut self, bound: usize) -> BTreeSet<usize> {
        let mut sources = BTreeSet::new();
        self.links.retain(|&(source_id, target_id), _| {
            if source_id < bound && target_id < bound {
                return true;
            }
            if source_id < bound {
                sources.insert(source_id);
            }
            false
        });
        sources
    }
}
