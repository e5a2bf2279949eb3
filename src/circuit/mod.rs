//! Quantum circuit model
//!
//! A small circuit description (Hadamard, Pauli-X, measurement) that the
//! simulator executes and the SVG renderer draws. The circuit used for number
//! generation puts every qubit into uniform superposition and measures it.

pub mod simulator;
pub mod svg;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

pub use simulator::CircuitSimulator;

/// A single-qubit operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "gate", content = "qubit")]
pub enum Gate {
    /// Hadamard gate
    H(usize),
    /// Pauli-X (NOT) gate
    X(usize),
    /// Computational-basis measurement into the classical bit of the same index
    Measure(usize),
}

impl Gate {
    /// Qubit the gate acts on
    pub fn qubit(&self) -> usize {
        match *self {
            Gate::H(q) | Gate::X(q) | Gate::Measure(q) => q,
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::H(q) => write!(f, "h q[{}]", q),
            Gate::X(q) => write!(f, "x q[{}]", q),
            Gate::Measure(q) => write!(f, "measure q[{}]", q),
        }
    }
}

/// An ordered list of gates over a fixed qubit register
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Circuit {
    num_qubits: usize,
    gates: Vec<Gate>,
}

impl Circuit {
    /// Create an empty circuit on `num_qubits` qubits, all starting in |0>
    pub fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            gates: Vec::new(),
        }
    }

    /// H on every qubit followed by a measurement of every qubit
    pub fn uniform_superposition(num_qubits: usize) -> Self {
        let mut circuit = Self::new(num_qubits);
        circuit.h_all().measure_all();
        circuit
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Whether any qubit is measured
    pub fn is_measured(&self) -> bool {
        self.gates.iter().any(|g| matches!(g, Gate::Measure(_)))
    }

    /// Append a gate, checking its qubit index
    pub fn push(&mut self, gate: Gate) -> Result<&mut Self> {
        if gate.qubit() >= self.num_qubits {
            return Err(Error::Circuit(format!(
                "{} is out of range for a {}-qubit circuit",
                gate, self.num_qubits
            )));
        }
        self.gates.push(gate);
        Ok(self)
    }

    pub fn h(&mut self, qubit: usize) -> Result<&mut Self> {
        self.push(Gate::H(qubit))
    }

    pub fn x(&mut self, qubit: usize) -> Result<&mut Self> {
        self.push(Gate::X(qubit))
    }

    pub fn measure(&mut self, qubit: usize) -> Result<&mut Self> {
        self.push(Gate::Measure(qubit))
    }

    /// Hadamard on every qubit
    pub fn h_all(&mut self) -> &mut Self {
        self.gates.extend((0..self.num_qubits).map(Gate::H));
        self
    }

    /// Measure every qubit
    pub fn measure_all(&mut self) -> &mut Self {
        self.gates.extend((0..self.num_qubits).map(Gate::Measure));
        self
    }
}
