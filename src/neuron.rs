//! This module provides the `Neuron` trait, the capability a network requires from the units it owns.
//!
//! The network never looks inside the dynamics of a neuron: it reads the firing state, delivers an input current,
//! advances one tick and assigns named types and parameters. Types are looked up in a registry owned by the
//! implementation, see [`Neuron::type_exists`].

use crate::error::SNNError;

/// A single spiking unit advanced one discrete tick at a time.
pub trait Neuron: Default + Send + Sync {
    /// The static parameters of the neuron, assigned in bulk by the network.
    type Params;

    /// Returns true if the type registry knows the provided type name.
    fn type_exists(name: &str) -> bool;

    /// The column labels of [`Neuron::formatted_params`], tab separated.
    fn params_header() -> String;

    /// Returns true if the neuron has crossed its threshold.
    fn firing(&self) -> bool;

    /// Reset the state of a neuron which just fired.
    fn reset(&mut self);

    /// Set the input current for the next tick.
    fn input(&mut self, current: f64);

    /// Advance the neuron dynamics by one tick.
    fn step(&mut self);

    /// Returns the membrane potential.
    fn potential(&self) -> f64;

    /// Set the membrane potential.
    fn set_potential(&mut self, potential: f64);

    /// Returns the recovery variable.
    fn recovery(&self) -> f64;

    /// Returns true if the neuron type is inhibitory.
    fn is_inhibitory(&self) -> bool;

    /// Returns true if the neuron is of the provided type.
    fn is_type(&self, name: &str) -> bool;

    /// Set the type of the neuron and draw its parameters from the type defaults, jittered by a noise sample in [0, 1).
    fn set_default_params(&mut self, name: &str, noise: f64) -> Result<(), SNNError>;

    /// Set the type of the neuron, keeping its parameters.
    fn set_type(&mut self, name: &str) -> Result<(), SNNError>;

    /// Set the parameters of the neuron, keeping its type.
    fn set_params(&mut self, params: &Self::Params);

    /// The static parameters of the neuron, tab separated.
    fn formatted_params(&self) -> String;

    /// The current state of the neuron (potential, recovery and input), tab separated.
    fn formatted_values(&self) -> String;
}
