//! Simulated quantum circuit backend
//!
//! Each draw of `k` bits builds a `k`-qubit circuit with a Hadamard gate on
//! every qubit, measures the register once, and reads the measured bit string
//! as a big-endian binary number.

use crate::circuit::{Circuit, CircuitSimulator};
use crate::error::{Error, Result};
use crate::qrng::{check_width, BitSource};
use std::sync::Mutex;
use tracing::debug;

/// Backend that measures a simulated uniform superposition
pub struct SimulatorBackend {
    simulator: Mutex<CircuitSimulator>,
}

impl SimulatorBackend {
    /// Create a simulator backend seeded from OS entropy
    pub fn new() -> Self {
        Self {
            simulator: Mutex::new(CircuitSimulator::new()),
        }
    }

    /// Create a simulator backend with reproducible measurements
    pub fn with_seed(seed: u64) -> Self {
        Self {
            simulator: Mutex::new(CircuitSimulator::with_seed(seed)),
        }
    }

    /// Run one shot of a `num_qubits` uniform superposition circuit
    pub fn measure(&self, num_qubits: usize) -> Result<String> {
        let circuit = Circuit::uniform_superposition(num_qubits);
        let mut simulator = self
            .simulator
            .lock()
            .map_err(|_| Error::EntropySource("simulator lock poisoned".to_string()))?;
        simulator
            .run(&circuit)
            .map_err(|e| Error::EntropySource(e.to_string()))
    }
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl BitSource for SimulatorBackend {
    fn name(&self) -> &'static str {
        "simulator"
    }

    fn description(&self) -> &'static str {
        "Simulated Hadamard-and-measure quantum circuit"
    }

    fn bytes(&self, n: usize) -> Result<Vec<u8>> {
        (0..n).map(|_| self.draw_bits(8).map(|b| b as u8)).collect()
    }

    fn draw_bits(&self, k: u32) -> Result<u64> {
        check_width(k)?;
        if k == 0 {
            return Ok(0);
        }

        let measurement = self.measure(k as usize)?;
        debug!(qubits = k, %measurement, "measured register");

        u64::from_str_radix(&measurement, 2).map_err(|e| {
            Error::EntropySource(format!("unreadable measurement '{}': {}", measurement, e))
        })
    }
}
