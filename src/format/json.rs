//! JSON output formatter

use crate::error::Result;
use crate::format::OutputFormatter;
use crate::generation::Generation;

/// JSON formatter - outputs the full generation record as pretty-printed JSON
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Full JSON record"
    }

    fn format(&self, generation: &Generation) -> Result<String> {
        Ok(serde_json::to_string_pretty(generation)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::test_support::generation;

    #[test]
    fn test_json_format() {
        let output = JsonFormatter.format(&generation()).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["value"], 4);
        assert_eq!(parsed["attempts"], 2);
        assert_eq!(parsed["bit_width"], 4);
        assert_eq!(parsed["backend"], "simulator");
        assert_eq!(parsed["range"]["min"], 1);
        assert_eq!(parsed["range"]["max"], 10);
        assert!(parsed.get("id").is_some());
        assert!(parsed.get("timestamp").is_some());
    }

    #[test]
    fn test_json_formatter_info() {
        assert_eq!(JsonFormatter.name(), "json");
        assert!(!JsonFormatter.description().is_empty());
    }
}
