//! Module managing the population of a network: its size and the types and parameters of its neurons.
use std::collections::BTreeMap;

use crate::error::SNNError;
use crate::neuron::Neuron;
use crate::random::RandomNumbers;
use crate::{EXCITATORY_TYPE, INHIBITORY_TYPE};

use super::Network;

impl<N: Neuron> Network<N> {
    /// Grow or shrink the population to `num_neurons` neurons.
    ///
    /// New neurons get default parameters: a share `inhibitory_fraction` of them (rounded to the nearest integer)
    /// are fast-spiking, the rest regular-spiking, see [`Network::set_default_params`].
    /// Shrinking removes the trailing neurons along with every link from or to them.
    /// The function returns an error if the inhibitory fraction is not in [0, 1].
    pub fn resize(
        &mut self,
        num_neurons: usize,
        inhibitory_fraction: f64,
        rng: &mut RandomNumbers,
    ) -> Result<(), SNNError> {
        if !(0.0..=1.0).contains(&inhibitory_fraction) {
            return Err(SNNError::InvalidArgument(format!(
                "inhibitory fraction must be in [0, 1], got {}",
                inhibitory_fraction
            )));
        }

        let old_num_neurons = self.num_neurons();
        if num_neurons < old_num_neurons {
            for source_id in self.links.remove_beyond(num_neurons) {
                self.adjacency.invalidate(source_id);
            }
        }
        self.neurons.resize_with(num_neurons, N::default);
        self.adjacency.resize(num_neurons);
        log::debug!(
            "Population resized from {} to {} neurons",
            old_num_neurons,
            num_neurons
        );

        if num_neurons <= old_num_neurons {
            return Ok(());
        }
        let num_added = num_neurons - old_num_neurons;
        let num_inhibitory = (inhibitory_fraction * num_added as f64 + 0.5) as usize;
        let types = BTreeMap::from([(INHIBITORY_TYPE.to_string(), num_inhibitory)]);
        self.set_default_params(&types, old_num_neurons, rng)
    }

    /// Assign default parameters to the neurons from `start` to the end of the population.
    ///
    /// The types are processed by lexicographic order of their name: each consumes the next `count` neurons,
    /// by increasing ID. Unknown types are skipped. Neurons left over after all types are regular-spiking.
    /// Every neuron gets its own noise sample, drawn uniformly in [0, 1) before any assignment.
    /// The function returns an error if `start` is beyond the population.
    pub fn set_default_params(
        &mut self,
        types: &BTreeMap<String, usize>,
        start: usize,
        rng: &mut RandomNumbers,
    ) -> Result<(), SNNError> {
        if start > self.num_neurons() {
            return Err(SNNError::OutOfRange(format!(
                "start {} beyond a population of {} neurons",
                start,
                self.num_neurons()
            )));
        }
        let noise = rng.uniform_double_vec(self.num_neurons() - start, 0.0, 1.0)?;

        let mut slots = self.neurons[start..].iter_mut().zip(noise);
        for (name, &count) in types {
            if !N::type_exists(name) {
                log::warn!("Unknown neuron type {} skipped", name);
                continue;
            }
            for (neuron, r) in slots.by_ref().take(count) {
                neuron.set_default_params(name, r)?;
            }
        }
        for (neuron, r) in slots {
            neuron.set_default_params(EXCITATORY_TYPE, r)?;
        }
        Ok(())
    }

    /// Set the types and parameters of the neurons from `start`, one per provided parameter set.
    ///
    /// The function returns an error, without modifying any neuron, if there are fewer types than parameter sets,
    /// if the neurons do not fit in the population or if a type is unknown.
    pub fn set_types_params<S: AsRef<str>>(
        &mut self,
        types: &[S],
        params: &[N::Params],
        start: usize,
    ) -> Result<(), SNNError> {
        if types.len() < params.len() {
            return Err(SNNError::InvalidArgument(format!(
                "{} types for {} parameter sets",
                types.len(),
                params.len()
            )));
        }
        self.check_range(start, params.len())?;
        for name in &types[..params.len()] {
            let name: &str = name.as_ref();
            if !N::type_exists(name) {
                return Err(SNNError::UnknownNeuronType(name.to_string()));
            }
        }

        for ((neuron, name), params) in self.neurons[start..].iter_mut().zip(types).zip(params) {
            neuron.set_type(name.as_ref())?;
            neuron.set_params(params);
        }
        Ok(())
    }

    /// Set the potentials of the neurons from `start`, one per provided value.
    /// The function returns an error, without modifying any neuron, if the values do not fit in the population.
    pub fn set_values(&mut self, potentials: &[f64], start: usize) -> Result<(), SNNError> {
        self.check_range(start, potentials.len())?;
        for (neuron, &potential) in self.neurons[start..].iter_mut().zip(potentials) {
            neuron.set_potential(potential);
        }
        Ok(())
    }

    /// The potentials of all neurons, by ID.
    pub fn potentials(&self) -> Vec<f64> {
        self.neurons.iter().map(|neuron| neuron.potential()).collect()
    }

    /// The recovery variables of all neurons, by ID.
    pub fn recoveries(&self) -> Vec<f64> {
        self.neurons.iter().map(|neuron| neuron.recovery()).collect()
    }

    fn check_range(&self, start: usize, len: usize) -> Result<(), SNNError> {
        match start.checked_add(len) {
            Some(end) if end <= self.num_neurons() => Ok(()),
            _ => Err(SNNError::OutOfRange(format!(
                "neurons {}..{}+{} beyond a population of {} neurons",
                start,
                start,
                len,
                self.num_neurons()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::izhikevich::{Izhikevich, IzhikevichParams};

    fn count_type(network: &Network, name: &str) -> usize {
        network
            .neurons()
            .iter()
            .filter(|neuron| neuron.is_type(name))
            .count()
    }

    #[test]
    fn test_resize_from_empty() {
        let mut rng = RandomNumbers::new(42);
        let mut network = Network::new();
        network.resize(10, 0.2, &mut rng).unwrap();

        assert_eq!(network.num_neurons(), 10);
        assert_eq!(count_type(&network, "FS"), 2);
        assert_eq!(count_type(&network, "RS"), 8);
        assert!(network.neurons()[..2].iter().all(|n| n.is_type("FS")));
        assert!(network.neurons()[2..].iter().all(|n| n.is_type("RS")));
    }

    #[test]
    fn test_resize_grow_and_shrink() {
        let mut rng = RandomNumbers::new(42);
        let mut network = Network::new();
        network.resize(4, 0.0, &mut rng).unwrap();
        let params = network.neurons()[..4].to_vec();

        // 0.5 * 3 = 1.5 rounds to 2 inhibitory neurons
        network.resize(7, 0.5, &mut rng).unwrap();
        assert_eq!(network.neurons()[..4], params[..]);
        assert!(network.neurons()[4..6].iter().all(|n| n.is_type("FS")));
        assert!(network.neurons()[6].is_type("RS"));

        network.add_link(0, 1, 1.0);
        network.add_link(0, 6, 1.0);
        network.add_link(6, 0, 1.0);
        assert_eq!(network.neighbors(0).len(), 2);

        network.resize(5, 0.5, &mut rng).unwrap();
        assert_eq!(network.num_neurons(), 5);
        assert_eq!(network.neurons()[..4], params[..]);
        assert_eq!(network.num_links(), 1);
        assert_eq!(network.neighbors(0), &[(1, 1.0)]);
        assert!(network.neighbors(6).is_empty());

        // Growing again does not resurrect the removed links
        network.resize(7, 0.0, &mut rng).unwrap();
        assert!(network.neighbors(6).is_empty());
        assert_eq!(network.num_links(), 1);
    }

    #[test]
    fn test_resize_invalid_fraction() {
        let mut rng = RandomNumbers::new(42);
        let mut network = Network::new();
        assert!(matches!(
            network.resize(10, 1.5, &mut rng),
            Err(SNNError::InvalidArgument(_))
        ));
        assert_eq!(network.num_neurons(), 0);
    }

    #[test]
    fn test_set_default_params_order() {
        let mut rng = RandomNumbers::new(42);
        let mut network = Network::new();
        network.resize(10, 0.0, &mut rng).unwrap();

        let types = BTreeMap::from([
            ("RZ".to_string(), 1),
            ("XX".to_string(), 4),
            ("CH".to_string(), 2),
            ("FS".to_string(), 3),
        ]);
        network.set_default_params(&types, 1, &mut rng).unwrap();

        let kinds: Vec<&str> = network.neurons().iter().map(|n| n.kind()).collect();
        assert_eq!(
            kinds,
            vec!["RS", "CH", "CH", "FS", "FS", "FS", "RZ", "RS", "RS", "RS"]
        );
    }

    #[test]
    fn test_set_default_params_overflow() {
        let mut rng = RandomNumbers::new(42);
        let mut network = Network::new();
        network.resize(3, 0.0, &mut rng).unwrap();

        let types = BTreeMap::from([("FS".to_string(), 5), ("LTS".to_string(), 5)]);
        network.set_default_params(&types, 0, &mut rng).unwrap();
        assert_eq!(count_type(&network, "FS"), 3);

        assert!(network.set_default_params(&types, 3, &mut rng).is_ok());
        assert!(matches!(
            network.set_default_params(&types, 4, &mut rng),
            Err(SNNError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_set_default_params_is_reproducible() {
        let build = || {
            let mut rng = RandomNumbers::new(11);
            let mut network = Network::new();
            network.resize(20, 0.3, &mut rng).unwrap();
            network
        };
        assert_eq!(build().neurons(), build().neurons());
    }

    #[test]
    fn test_set_types_params() {
        let mut network: Network<Izhikevich> = Network::with_neurons(vec![Izhikevich::default(); 4]);
        let params = vec![
            IzhikevichParams::new(0.1, 0.2, -65.0, 2.0),
            IzhikevichParams::new(0.02, 0.25, -65.0, 0.05),
        ];
        network.set_types_params(&["FS", "TC"], &params, 2).unwrap();
        assert!(network.neurons()[2].is_type("FS"));
        assert!(network.neurons()[2].is_inhibitory());
        assert_eq!(network.neurons()[3].params(), &params[1]);
        assert!(network.neurons()[1].is_type("RS"));

        assert!(matches!(
            network.set_types_params(&["FS", "TC"], &params, 3),
            Err(SNNError::OutOfRange(_))
        ));
        assert!(matches!(
            network.set_types_params(&["FS"], &params, 0),
            Err(SNNError::InvalidArgument(_))
        ));
        assert_eq!(
            network.set_types_params(&["FS", "XX"], &params, 0),
            Err(SNNError::UnknownNeuronType("XX".to_string()))
        );
        assert!(network.neurons()[0].is_type("RS"));
    }

    #[test]
    fn test_set_values() {
        let mut network: Network<Izhikevich> = Network::with_neurons(vec![Izhikevich::default(); 3]);
        network.set_values(&[-70.0, -60.0], 1).unwrap();
        assert_eq!(network.potentials(), vec![-65.0, -70.0, -60.0]);
        assert_eq!(network.recoveries(), vec![-13.0; 3]);

        assert!(matches!(
            network.set_values(&[0.0, 0.0], 2),
            Err(SNNError::OutOfRange(_))
        ));
        assert!(matches!(
            network.set_values(&[0.0], usize::MAX),
            Err(SNNError::OutOfRange(_))
        ));
        assert_eq!(network.potentials(), vec![-65.0, -70.0, -60.0]);
    }
}
