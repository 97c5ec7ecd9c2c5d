//! Module writing human-readable reports of a network: trajectories of representative neurons and parameters.
//!
//! Trajectories follow, for every declared neuron type present in the network, the first neuron of that type.
//! If the declared counts do not cover the whole population, the first regular-spiking neuron is followed as well.
use std::collections::BTreeMap;
use std::io::Write;
use std::iter;

use itertools::Itertools;

use crate::error::SNNError;
use crate::neuron::Neuron;
use crate::EXCITATORY_TYPE;

use super::Network;

impl<N: Neuron> Network<N> {
    /// Write one line per neuron with its parameters, out-degree and total outgoing weight, after a header line.
    pub fn write_params<W: Write>(&self, out: &mut W) -> Result<(), SNNError> {
        writeln!(out, "{}\tdegree\tvalence", N::params_header())?;
        for (id, neuron) in self.neurons.iter().enumerate() {
            let (degree, valence) = self.degree(id);
            writeln!(out, "{}\t{}\t{}", neuron.formatted_params(), degree, valence)?;
        }
        Ok(())
    }

    /// Write the header of the trajectory columns: `<Type>.v`, `<Type>.u` and `<Type>.I` for each followed type.
    pub fn write_header<W: Write>(
        &self,
        types: &BTreeMap<String, usize>,
        out: &mut W,
    ) -> Result<(), SNNError> {
        let columns = self.followed_neurons(types).into_iter().flat_map(|(name, _)| {
            ["v", "u", "I"]
                .into_iter()
                .map(move |var| format!("{}.{}", name, var))
        });
        writeln!(out, "{}", iter::once(String::new()).chain(columns).join("\t"))?;
        Ok(())
    }

    /// Write the trajectory line of a tick: the tick index, then the current values of each followed neuron.
    pub fn write_trajectory<W: Write>(
        &self,
        time: usize,
        types: &BTreeMap<String, usize>,
        out: &mut W,
    ) -> Result<(), SNNError> {
        let values = self
            .followed_neurons(types)
            .into_iter()
            .map(|(_, neuron)| neuron.formatted_values());
        writeln!(out, "{}", iter::once(time.to_string()).chain(values).join("\t"))?;
        Ok(())
    }

    fn followed_neurons<'a>(&'a self, types: &'a BTreeMap<String, usize>) -> Vec<(&'a str, &'a N)> {
        let first_of = move |name: &str| self.neurons.iter().find(|neuron| neuron.is_type(name));

        let mut followed: Vec<(&str, &N)> = types
            .keys()
            .filter_map(|name| first_of(name).map(|neuron| (name.as_str(), neuron)))
            .collect();

        let total = types.values().fold(0_usize, |acc, &count| acc.saturating_add(count));
        if total < self.num_neurons() {
            if let Some(neuron) = first_of(EXCITATORY_TYPE) {
                followed.push((EXCITATORY_TYPE, neuron));
            }
        }
        followed
    }
}
