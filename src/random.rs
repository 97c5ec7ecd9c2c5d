//! Module implementing the source of randomness shared by graph generation and parameter initialization.
//!
//! # Examples
//!
//! ```rust
//! use spiking_network::random::RandomNumbers;
//!
//! // Two sources with the same (non-zero) seed produce the same draws
//! let mut rng1 = RandomNumbers::new(42);
//! let mut rng2 = RandomNumbers::new(42);
//! assert_eq!(rng1.uniform_double(0.0, 1.0), rng2.uniform_double(0.0, 1.0));
//! assert_eq!(rng1.poisson_vec(5, 3.0), rng2.poisson_vec(5, 3.0));
//!
//! // A negative standard deviation is rejected
//! assert!(rng1.normal(0.0, -1.0).is_err());
//! ```

use rand::distributions::{Distribution, Uniform};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Normal, Poisson};

use crate::error::SNNError;

/// A seeded pseudo-random engine producing uniform, normal and Poisson draws.
///
/// The engine is owned by the caller and passed explicitly to every operation that needs randomness.
#[derive(Debug, Clone)]
pub struct RandomNumbers {
    rng: ChaCha8Rng,
}

impl RandomNumbers {
    /// Create a new source of random numbers.
    /// A non-zero seed makes the whole sequence of draws reproducible, a zero seed initializes the engine from the OS entropy.
    pub fn new(seed: u64) -> Self {
        let rng = if seed > 0 {
            ChaCha8Rng::seed_from_u64(seed)
        } else {
            ChaCha8Rng::from_entropy()
        };
        RandomNumbers { rng }
    }

    /// Draw a number uniformly in the half-open interval [lower, upper).
    /// If both bounds coincide, that bound is returned.
    /// The function returns an error if the bounds are not finite or if lower exceeds upper.
    pub fn uniform_double(&mut self, lower: f64, upper: f64) -> Result<f64, SNNError> {
        let dist = uniform_dist(lower, upper)?;
        Ok(match dist {
            Some(dist) => dist.sample(&mut self.rng),
            None => lower,
        })
    }

    /// Draw n independent numbers uniformly in [lower, upper).
    pub fn uniform_double_vec(
        &mut self,
        n: usize,
        lower: f64,
        upper: f64,
    ) -> Result<Vec<f64>, SNNError> {
        let dist = uniform_dist(lower, upper)?;
        Ok(match dist {
            Some(dist) => dist.sample_iter(&mut self.rng).take(n).collect(),
            None => vec![lower; n],
        })
    }

    /// Draw a number from a normal distribution.
    /// The function returns an error if the standard deviation is negative.
    pub fn normal(&mut self, mean: f64, sd: f64) -> Result<f64, SNNError> {
        Ok(normal_dist(mean, sd)?.sample(&mut self.rng))
    }

    /// Draw n independent numbers from a normal distribution.
    /// The function returns an error if the standard deviation is negative.
    pub fn normal_vec(&mut self, n: usize, mean: f64, sd: f64) -> Result<Vec<f64>, SNNError> {
        let dist = normal_dist(mean, sd)?;
        Ok(dist.sample_iter(&mut self.rng).take(n).collect())
    }

    /// Draw a non-negative integer from a Poisson distribution.
    /// A zero mean always yields zero; a negative or non-finite mean is an error.
    pub fn poisson(&mut self, mean: f64) -> Result<u64, SNNError> {
        Ok(match poisson_dist(mean)? {
            Some(dist) => dist.sample(&mut self.rng) as u64,
            None => 0,
        })
    }

    /// Draw n independent non-negative integers from a Poisson distribution.
    pub fn poisson_vec(&mut self, n: usize, mean: f64) -> Result<Vec<u64>, SNNError> {
        Ok(match poisson_dist(mean)? {
            Some(dist) => dist
                .sample_iter(&mut self.rng)
                .take(n)
                .map(|k| k as u64)
                .collect(),
            None => vec![0; n],
        })
    }

    /// Shuffle the slice in place with a uniformly random permutation.
    pub fn shuffle<T>(&mut self, values: &mut [T]) {
        values.shuffle(&mut self.rng);
    }
}

// Returns None for the degenerate interval [x, x).
fn uniform_dist(lower: f64, upper: f64) -> Result<Option<Uniform<f64>>, SNNError> {
    if !lower.is_finite() || !upper.is_finite() || !(upper - lower).is_finite() {
        return Err(SNNError::InvalidArgument(format!(
            "uniform bounds must be finite, got [{}, {})",
            lower, upper
        )));
    }
    if lower > upper {
        return Err(SNNError::InvalidArgument(format!(
            "uniform lower bound {} exceeds upper bound {}",
            lower, upper
        )));
    }
    if lower == upper {
        return Ok(None);
    }
    Ok(Some(Uniform::new(lower, upper)))
}

fn normal_dist(mean: f64, sd: f64) -> Result<Normal<f64>, SNNError> {
    if sd < 0.0 {
        return Err(SNNError::InvalidArgument(format!(
            "standard deviation must be non-negative, got {}",
            sd
        )));
    }
    Normal::new(mean, sd)
        .map_err(|e| SNNError::InvalidArgument(format!("invalid normal distribution: {}", e)))
}

// Returns None for a zero mean.
fn poisson_dist(mean: f64) -> Result<Option<Poisson<f64>>, SNNError> {
    if !mean.is_finite() || mean < 0.0 {
        return Err(SNNError::InvalidArgument(format!(
            "Poisson mean must be finite and non-negative, got {}",
            mean
        )));
    }
    if mean == 0.0 {
        return Ok(None);
    }
    Poisson::new(mean)
        .map(Some)
        .map_err(|e| SNNError::InvalidArgument(format!("invalid Poisson distribution: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_sequences_are_reproducible() {
        let mut rng1 = RandomNumbers::new(1234);
        let mut rng2 = RandomNumbers::new(1234);
        assert_eq!(
            rng1.uniform_double_vec(10, -1.0, 1.0).unwrap(),
            rng2.uniform_double_vec(10, -1.0, 1.0).unwrap()
        );
        assert_eq!(
            rng1.normal_vec(10, 0.0, 2.0).unwrap(),
            rng2.normal_vec(10, 0.0, 2.0).unwrap()
        );
        assert_eq!(
            rng1.poisson_vec(10, 4.0).unwrap(),
            rng2.poisson_vec(10, 4.0).unwrap()
        );

        let mut values1: Vec<usize> = (0..20).collect();
        let mut values2: Vec<usize> = (0..20).collect();
        rng1.shuffle(&mut values1);
        rng2.shuffle(&mut values2);
        assert_eq!(values1, values2);
    }

    #[test]
    fn test_different_seeds_differ() {
        let mut rng1 = RandomNumbers::new(1);
        let mut rng2 = RandomNumbers::new(2);
        assert_ne!(
            rng1.uniform_double_vec(8, 0.0, 1.0).unwrap(),
            rng2.uniform_double_vec(8, 0.0, 1.0).unwrap()
        );
    }

    #[test]
    fn test_uniform_double() {
        let mut rng = RandomNumbers::new(42);
        let values = rng.uniform_double_vec(1000, 1e-6, 2.0).unwrap();
        assert_eq!(values.len(), 1000);
        assert!(values.iter().all(|&x| (1e-6..2.0).contains(&x)));

        assert_eq!(rng.uniform_double(3.0, 3.0), Ok(3.0));
        assert_eq!(rng.uniform_double_vec(2, 3.0, 3.0), Ok(vec![3.0, 3.0]));
        assert!(matches!(
            rng.uniform_double(1.0, 0.0),
            Err(SNNError::InvalidArgument(_))
        ));
        assert!(matches!(
            rng.uniform_double(0.0, f64::INFINITY),
            Err(SNNError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_normal_negative_sd() {
        let mut rng = RandomNumbers::new(42);
        for mean in [-10.0, 0.0, 3.5] {
            assert!(matches!(
                rng.normal(mean, -1.0),
                Err(SNNError::InvalidArgument(_))
            ));
            assert!(matches!(
                rng.normal_vec(3, mean, -1.0),
                Err(SNNError::InvalidArgument(_))
            ));
        }
        assert_eq!(rng.normal(2.5, 0.0), Ok(2.5));
    }

    #[test]
    fn test_normal_moments() {
        let mut rng = RandomNumbers::new(42);
        let values = rng.normal_vec(10_000, 5.0, 2.0).unwrap();
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        let var = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / values.len() as f64;
        assert!((mean - 5.0).abs() < 0.1);
        assert!((var.sqrt() - 2.0).abs() < 0.1);
    }

    #[test]
    fn test_poisson() {
        let mut rng = RandomNumbers::new(42);
        assert_eq!(rng.poisson(0.0), Ok(0));
        assert_eq!(rng.poisson_vec(4, 0.0), Ok(vec![0; 4]));
        assert!(matches!(rng.poisson(-1.0), Err(SNNError::InvalidArgument(_))));
        assert!(matches!(
            rng.poisson_vec(2, f64::NAN),
            Err(SNNError::InvalidArgument(_))
        ));
        assert!(matches!(
            rng.poisson(f64::INFINITY),
            Err(SNNError::InvalidArgument(_))
        ));
        assert!(matches!(
            rng.poisson_vec(3, f64::INFINITY),
            Err(SNNError::InvalidArgument(_))
        ));

        let values = rng.poisson_vec(10_000, 6.0).unwrap();
        let mean = values.iter().sum::<u64>() as f64 / values.len() as f64;
        assert!((mean - 6.0).abs() < 0.2);
    }
}
