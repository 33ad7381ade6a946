//! Contract between the witness-generation driver and a witness calculator.
//!
//! A calculator backend is handed an opaque bytecode buffer (a compiled
//! circuit module) by a [`CalculatorFactory`] and turns an
//! [`InputAssignment`] into the binary `.wtns` encoding of the computed
//! witness. Both the bytecode format and the witness encoding belong to the
//! backend; callers move bytes around without interpreting them.

pub mod fixture;
pub mod input;

pub use input::{InputAssignment, SignalValue};

use thiserror::Error;

/// Failures surfaced by calculator backends.
#[derive(Debug, Error)]
pub enum CalculatorError {
    /// The bytecode buffer is not something this backend understands.
    #[error("invalid bytecode: {0}")]
    InvalidBytecode(String),

    /// The bytecode container is recognized but its version is not supported.
    #[error("unsupported bytecode version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    /// The input assignment lacks a signal the circuit requires.
    #[error("no assignment for signal `{0}`")]
    MissingSignal(String),

    /// A signal is assigned but its value does not fit the circuit's shape.
    #[error("signal `{name}`: {reason}")]
    InvalidAssignment { name: String, reason: String },

    /// Any other backend-specific failure.
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// A calculator instance bound to one compiled circuit.
///
/// Instances are stateful and single-flight: one call runs to completion
/// before the next begins, and a failed call leaves the instance in an
/// unspecified state.
pub trait WitnessCalculator {
    /// Computes the witness for `inputs` and returns it in the backend's
    /// binary `.wtns` encoding.
    ///
    /// `mode` is an opaque flags value owned by the backend; callers with no
    /// opinion pass 0. Fails if the assignment is incomplete or inconsistent
    /// with the circuit.
    fn calculate_wtns_bin(
        &mut self,
        inputs: &InputAssignment,
        mode: u32,
    ) -> Result<Vec<u8>, CalculatorError>;
}

/// Builds calculator instances from compiled circuit bytecode.
pub trait CalculatorFactory {
    /// Parses and validates `bytecode`, returning a calculator bound to it.
    ///
    /// Validation depth is backend-defined; at minimum a backend is expected
    /// to reject buffers whose magic or version it does not recognize.
    fn build(&self, bytecode: &[u8]) -> Result<Box<dyn WitnessCalculator>, CalculatorError>;
}
