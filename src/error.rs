//! Error module for the spiking network library.
use std::error::Error;
use std::fmt;

/// Error types for the library.
#[derive(Debug, PartialEq)]
pub enum SNNError {
    /// Error for invalid arguments, e.g., a negative standard deviation or mismatched lengths.
    InvalidArgument(String),
    /// Error for out of range access, e.g., a start index beyond the population.
    OutOfRange(String),
    /// Error for a neuron type missing from the type registry.
    UnknownNeuronType(String),
    /// Error for I/O operations.
    IOError(String),
}

impl fmt::Display for SNNError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SNNError::InvalidArgument(e) => write!(f, "Invalid argument: {}", e),
            SNNError::OutOfRange(e) => write!(f, "Index out of range: {}", e),
            SNNError::UnknownNeuronType(e) => write!(f, "Unknown neuron type: {}", e),
            SNNError::IOError(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl Error for SNNError {}

impl From<std::io::Error> for SNNError {
    fn from(e: std::io::Error) -> Self {
        SNNError::IOError(e.to_string())
    }
}
