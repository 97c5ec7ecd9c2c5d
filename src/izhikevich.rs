//! Module implementing the Izhikevich neuron model and its registry of named types.
//!
//! The dynamics are those of the simple model of Izhikevich (2003):
//! `v' = 0.04 v^2 + 5 v + 140 - u + I` and `u' = a (b v - u)`, with `v <- c` and `u <- u + d` once `v` exceeds
//! [`FIRING_THRESHOLD`]. The potential is integrated in two half-steps for numerical stability.
//!
//! # Examples
//!
//! ```rust
//! use spiking_network::izhikevich::Izhikevich;
//! use spiking_network::neuron::Neuron;
//!
//! let mut neuron = Izhikevich::default();
//! neuron.set_default_params("FS", 0.5).unwrap();
//! assert!(neuron.is_inhibitory());
//! assert!(neuron.is_type("FS"));
//!
//! // A strong input current eventually makes the neuron fire
//! let mut fired = false;
//! for _ in 0..20 {
//!     neuron.input(20.0);
//!     neuron.step();
//!     if neuron.firing() {
//!         fired = true;
//!         neuron.reset();
//!     }
//! }
//! assert!(fired);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::SNNError;
use crate::neuron::Neuron;
use crate::EXCITATORY_TYPE;

/// The potential above which a neuron fires (mV).
pub const FIRING_THRESHOLD: f64 = 30.0;
/// The potential of a freshly initialized neuron (mV).
pub const RESTING_POTENTIAL: f64 = -65.0;

/// The four parameters of the Izhikevich model.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct IzhikevichParams {
    /// Time scale of the recovery variable.
    pub a: f64,
    /// Sensitivity of the recovery variable to the potential.
    pub b: f64,
    /// After-spike reset value of the potential.
    pub c: f64,
    /// After-spike increment of the recovery variable.
    pub d: f64,
}

impl IzhikevichParams {
    pub const fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        IzhikevichParams { a, b, c, d }
    }
}

/// A named neuron type of the registry.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct NeuronType {
    pub name: &'static str,
    pub params: IzhikevichParams,
    pub inhibitory: bool,
}

/// The registry of known neuron types.
pub const NEURON_TYPES: [NeuronType; 7] = [
    // regular spiking
    NeuronType { name: "RS", params: IzhikevichParams::new(0.02, 0.2, -65.0, 8.0), inhibitory: false },
    // intrinsically bursting
    NeuronType { name: "IB", params: IzhikevichParams::new(0.02, 0.2, -55.0, 4.0), inhibitory: false },
    // chattering
    NeuronType { name: "CH", params: IzhikevichParams::new(0.02, 0.2, -50.0, 2.0), inhibitory: false },
    // fast spiking
    NeuronType { name: "FS", params: IzhikevichParams::new(0.1, 0.2, -65.0, 2.0), inhibitory: true },
    // low-threshold spiking
    NeuronType { name: "LTS", params: IzhikevichParams::new(0.02, 0.25, -65.0, 2.0), inhibitory: true },
    // thalamo-cortical
    NeuronType { name: "TC", params: IzhikevichParams::new(0.02, 0.25, -65.0, 0.05), inhibitory: false },
    // resonator
    NeuronType { name: "RZ", params: IzhikevichParams::new(0.1, 0.26, -65.0, 2.0), inhibitory: false },
];

/// Returns the registered type with the provided name, if any.
pub fn neuron_type(name: &str) -> Option<&'static NeuronType> {
    NEURON_TYPES.iter().find(|t| t.name == name)
}

/// Represents an Izhikevich neuron.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Izhikevich {
    // The registered name of the neuron type.
    kind: String,
    inhibitory: bool,
    params: IzhikevichParams,
    potential: f64,
    recovery: f64,
    current: f64,
}

impl Default for Izhikevich {
    /// A regular-spiking neuron at rest, without any jitter on its parameters.
    fn default() -> Self {
        let params = NEURON_TYPES[0].params;
        Izhikevich {
            kind: EXCITATORY_TYPE.to_string(),
            inhibitory: false,
            params,
            potential: RESTING_POTENTIAL,
            recovery: params.b * RESTING_POTENTIAL,
            current: 0.0,
        }
    }
}

impl Izhikevich {
    /// Returns the parameters of the neuron.
    pub fn params(&self) -> &IzhikevichParams {
        &self.params
    }

    /// Returns the type name of the neuron.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Returns the input current of the last tick.
    pub fn current(&self) -> f64 {
        self.current
    }
}

impl Neuron for Izhikevich {
    type Params = IzhikevichParams;

    fn type_exists(name: &str) -> bool {
        neuron_type(name).is_some()
    }

    fn params_header() -> String {
        "Type\ta\tb\tc\td\tInhibitory".to_string()
    }

    fn firing(&self) -> bool {
        self.potential > FIRING_THRESHOLD
    }

    fn reset(&mut self) {
        self.potential = self.params.c;
        self.recovery += self.params.d;
    }

    fn input(&mut self, current: f64) {
        self.current = current;
    }

    fn step(&mut self) {
        let IzhikevichParams { a, b, .. } = self.params;
        for _ in 0..2 {
            let v = self.potential;
            self.potential += 0.5 * (0.04 * v * v + 5.0 * v + 140.0 - self.recovery + self.current);
        }
        self.recovery += a * (b * self.potential - self.recovery);
    }

    fn potential(&self) -> f64 {
        self.potential
    }

    fn set_potential(&mut self, potential: f64) {
        self.potential = potential;
    }

    fn recovery(&self) -> f64 {
        self.recovery
    }

    fn is_inhibitory(&self) -> bool {
        self.inhibitory
    }

    fn is_type(&self, name: &str) -> bool {
        self.kind == name
    }

    /// Excitatory types jitter the reset parameters `c` and `d`, inhibitory types the recovery parameters `a` and `b`.
    /// The state of the neuron is set back to rest.
    fn set_default_params(&mut self, name: &str, noise: f64) -> Result<(), SNNError> {
        let neuron_type =
            neuron_type(name).ok_or_else(|| SNNError::UnknownNeuronType(name.to_string()))?;
        let mut params = neuron_type.params;
        if neuron_type.inhibitory {
            params.a *= 1.0 - 0.8 * noise;
            params.b *= 1.0 + 0.25 * noise;
        } else {
            let r2 = noise * noise;
            params.c += 15.0 * r2;
            params.d *= 1.0 - 0.75 * r2;
        }

        self.kind = neuron_type.name.to_string();
        self.inhibitory = neuron_type.inhibitory;
        self.params = params;
        self.potential = RESTING_POTENTIAL;
        self.recovery = params.b * RESTING_POTENTIAL;
        self.current = 0.0;
        Ok(())
    }

    fn set_type(&mut self, name: &str) -> Result<(), SNNError> {
        let neuron_type =
            neuron_type(name).ok_or_else(|| SNNError::UnknownNeuronType(name.to_string()))?;
        self.kind = neuron_type.name.to_string();
        self.inhibitory = neuron_type.inhibitory;
        Ok(())
    }

    fn set_params(&mut self, params: &IzhikevichParams) {
        self.params = *params;
    }

    fn formatted_params(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}\t{}",
            self.kind,
            self.params.a,
            self.params.b,
            self.params.c,
            self.params.d,
            self.inhibitory as u8
        )
    }

    fn formatted_values(&self) -> String {
        format!("{}\t{}\t{}", self.potential, self.recovery, self.current)
    }
}
