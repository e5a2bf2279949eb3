//! Human-readable text output formatter

use crate::error::Result;
use crate::format::OutputFormatter;
use crate::generation::Generation;

/// Text formatter - prints just the number
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable text"
    }

    fn format(&self, generation: &Generation) -> Result<String> {
        Ok(format!("Generated random number: {}", generation.value))
    }
}
