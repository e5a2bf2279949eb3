//! Default configuration values
//!
//! Named constants for all tunable parameters

/// Default inclusive minimum
pub const DEFAULT_MIN: i64 = 0;

/// Default inclusive maximum
pub const DEFAULT_MAX: i64 = 100;

/// Default qubit count for the rendered circuit diagram
pub const DEFAULT_QUBITS: usize = 4;

/// Default number of benchmark samples
pub const DEFAULT_ITERATIONS: usize = 1000;

/// Default bit source
pub const DEFAULT_BACKEND: &str = "simulator";

/// Default output format
pub const DEFAULT_FORMAT: &str = "text";

/// Default retry cap (0 = retry until a draw is accepted)
pub const DEFAULT_MAX_ATTEMPTS: u64 = 0;

/// Default directory for circuit diagrams and histograms
pub const DEFAULT_IMAGE_DIR: &str = "images";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "qrange";
