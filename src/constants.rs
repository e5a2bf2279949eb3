//! Centralized constants for the qrange crate
//!
//! Constants shared between the backends, the renderers and the CLI.

/// External API endpoints
pub mod api {
    /// ANU QRNG free tier
    pub const ANU_FREE_URL: &str = "https://qrng.anu.edu.au/API/jsonI.php";

    /// ANU QRNG paid tier (requires API key)
    pub const ANU_PAID_URL: &str = "https://api.quantumnumbers.anu.edu.au";
}

/// Artifact naming
pub mod artifacts {
    /// Circuit diagram file name for `n` qubits
    pub fn circuit_file_name(num_qubits: usize) -> String {
        format!("quantum_circuit_{}_qubits.svg", num_qubits)
    }

    /// Benchmark histogram file name for `iterations` samples
    pub fn benchmark_file_name(iterations: usize) -> String {
        format!("benchmark_quantum_{}.html", iterations)
    }
}

/// Limits
pub mod limits {
    /// Widest value a single draw may produce
    pub const MAX_BITS_PER_DRAW: u32 = 64;

    /// Largest range the benchmark will bin
    pub const MAX_HISTOGRAM_BINS: u128 = 1_000_000;
}
