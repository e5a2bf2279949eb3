//! Circuit simulator
//!
//! The circuits built here only contain single-qubit gates, so the register
//! never becomes entangled and each qubit is tracked as its own pair of real
//! amplitudes `(a0, a1)` for `a0|0> + a1|1>`. That keeps a 64-qubit register
//! at 64 pairs instead of 2^64 amplitudes.

use crate::circuit::{Circuit, Gate};
use crate::error::{Error, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::FRAC_1_SQRT_2;

/// Amplitudes of a single qubit
#[derive(Debug, Clone, Copy, PartialEq)]
struct Qubit {
    a0: f64,
    a1: f64,
}

impl Qubit {
    const ZERO: Qubit = Qubit { a0: 1.0, a1: 0.0 };

    fn hadamard(self) -> Self {
        Qubit {
            a0: (self.a0 + self.a1) * FRAC_1_SQRT_2,
            a1: (self.a0 - self.a1) * FRAC_1_SQRT_2,
        }
    }

    fn flip(self) -> Self {
        Qubit {
            a0: self.a1,
            a1: self.a0,
        }
    }

    /// Probability of reading 1
    fn p1(&self) -> f64 {
        let norm = self.a0 * self.a0 + self.a1 * self.a1;
        (self.a1 * self.a1 / norm).clamp(0.0, 1.0)
    }
}

/// Single-shot simulator for `Circuit`s
pub struct CircuitSimulator<R = StdRng> {
    rng: R,
}

impl CircuitSimulator<StdRng> {
    /// Simulator seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Simulator with reproducible measurement outcomes
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for CircuitSimulator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> CircuitSimulator<R> {
    /// Simulator driven by a caller-provided RNG
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Execute one shot and return the classical register as a bit string
    ///
    /// Bits are written most significant first: the character at position 0
    /// is the classical bit of the highest-indexed qubit. Unmeasured bits
    /// read as `0`.
    pub fn run(&mut self, circuit: &Circuit) -> Result<String> {
        if !circuit.is_measured() {
            return Err(Error::Circuit(
                "circuit has no measurements, nothing to read out".to_string(),
            ));
        }

        let mut qubits = vec![Qubit::ZERO; circuit.num_qubits()];
        let mut clbits = vec![false; circuit.num_qubits()];

        for gate in circuit.gates() {
            match *gate {
                Gate::H(q) => qubits[q] = qubits[q].hadamard(),
                Gate::X(q) => qubits[q] = qubits[q].flip(),
                Gate::Measure(q) => {
                    let outcome = self.rng.gen_bool(qubits[q].p1());
                    // Collapse onto the observed basis state
                    qubits[q] = if outcome { Qubit::ZERO.flip() } else { Qubit::ZERO };
                    clbits[q] = outcome;
                }
            }
        }

        Ok(clbits
            .iter()
            .rev()
            .map(|&bit| if bit { '1' } else { '0' })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_hadamard_gives_even_odds() {
        let q = Qubit::ZERO.hadamard();
        assert_relative_eq!(q.p1(), 0.5, epsilon = 1e-12);
        // H is its own inverse
        let back = q.hadamard();
        assert_relative_eq!(back.a0, 1.0, epsilon = 1e-12);
        assert_relative_eq!(back.a1, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_measure_without_gates_reads_zero() {
        let mut circuit = Circuit::new(5);
        circuit.measure_all();
        let mut sim = CircuitSimulator::with_seed(1);
        assert_eq!(sim.run(&circuit).unwrap(), "00000");
    }

    #[test]
    fn test_x_on_every_qubit_reads_ones() {
        let mut circuit = Circuit::new(4);
        for q in 0..4 {
            circuit.x(q).unwrap();
        }
        circuit.measure_all();
        let mut sim = CircuitSimulator::with_seed(1);
        assert_eq!(sim.run(&circuit).unwrap(), "1111");
    }

    #[test]
    fn test_bit_order_is_msb_first() {
        let mut circuit = Circuit::new(3);
        circuit.x(0).unwrap();
        circuit.measure_all();
        let mut sim = CircuitSimulator::with_seed(1);
        assert_eq!(sim.run(&circuit).unwrap(), "001");
    }

    #[test]
    fn test_superposition_has_requested_width() {
        let mut sim = CircuitSimulator::with_seed(7);
        for n in [1, 8, 33, 64] {
            let bits = sim.run(&Circuit::uniform_superposition(n)).unwrap();
            assert_eq!(bits.len(), n);
            assert!(bits.chars().all(|c| c == '0' || c == '1'));
        }
    }

    #[test]
    fn test_superposition_is_balanced() {
        let mut sim = CircuitSimulator::with_seed(42);
        let circuit = Circuit::uniform_superposition(1);
        let ones = (0..10_000)
            .filter(|_| sim.run(&circuit).unwrap() == "1")
            .count();
        assert!((4_700..=5_300).contains(&ones), "got {} ones", ones);
    }

    #[test]
    fn test_seeded_runs_reproducible() {
        let circuit = Circuit::uniform_superposition(16);
        let mut a = CircuitSimulator::with_seed(9);
        let mut b = CircuitSimulator::with_seed(9);
        for _ in 0..20 {
            assert_eq!(a.run(&circuit).unwrap(), b.run(&circuit).unwrap());
        }
    }

    #[test]
    fn test_with_rng_matches_with_seed() {
        let circuit = Circuit::uniform_superposition(8);
        let mut a = CircuitSimulator::with_rng(StdRng::seed_from_u64(3));
        let mut b = CircuitSimulator::with_seed(3);
        assert_eq!(a.run(&circuit).unwrap(), b.run(&circuit).unwrap());
    }

    #[test]
    fn test_unmeasured_circuit_is_error() {
        let mut circuit = Circuit::new(2);
        circuit.h_all();
        let mut sim = CircuitSimulator::with_seed(1);
        assert!(matches!(sim.run(&circuit), Err(Error::Circuit(_))));
    }
}
