//! Config command handler
//!
//! View and modify configuration settings.

use crate::config::Config;
use crate::error::{Error, Result};
use clap::Args;

/// Config command arguments
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Configuration key (e.g., "defaults.backend")
    pub key: Option<String>,

    /// Value to set (if not provided, shows current value)
    pub value: Option<String>,

    /// Show config file path
    #[arg(long)]
    pub path: bool,

    /// Reset config to defaults
    #[arg(long)]
    pub reset: bool,
}

/// Run the config command
pub fn run(args: ConfigArgs) -> Result<()> {
    if args.path {
        println!("{}", Config::config_path()?.display());
        return Ok(());
    }

    if args.reset {
        Config::default().save()?;
        println!("Configuration reset to defaults");
        return Ok(());
    }

    let mut config = Config::load()?;

    match (&args.key, &args.value) {
        // No arguments: show all config
        (None, None) => print!("{}", render_config(&config)),

        // Key only: show that value
        (Some(key), None) => match config.get(key) {
            Some(value) => println!("{}", value),
            None => {
                return Err(Error::Config(format!(
                    "Unknown config key: {}\n\nAvailable keys:\n  {}",
                    key,
                    Config::available_keys().join("\n  ")
                )));
            }
        },

        // Key and value: set the value
        (Some(key), Some(value)) => {
            config.set(key, value)?;
            config.save()?;
            println!("{} = {}", key, value);
        }

        // Value without key: not valid
        (None, Some(_)) => {
            return Err(Error::Config(
                "Must specify a key to set a value".to_string(),
            ));
        }
    }

    Ok(())
}

/// Display all configuration values, masking secrets
fn render_config(config: &Config) -> String {
    let mut out = String::new();

    out.push_str("[defaults]\n");
    out.push_str(&format!("min = {}\n", config.defaults.min));
    out.push_str(&format!("max = {}\n", config.defaults.max));
    out.push_str(&format!("qubits = {}\n", config.defaults.qubits));
    out.push_str(&format!("iterations = {}\n", config.defaults.iterations));
    out.push_str(&format!("backend = \"{}\"\n", config.defaults.backend));
    out.push_str(&format!("format = \"{}\"\n\n", config.defaults.format));

    out.push_str("[sampler]\n");
    let cap = match config.sampler.max_attempts {
        0 => " # unlimited".to_string(),
        _ => String::new(),
    };
    out.push_str(&format!("max_attempts = {}{}\n\n", config.sampler.max_attempts, cap));

    out.push_str("[output]\n");
    out.push_str(&format!(
        "image_dir = \"{}\"\n\n",
        config.output.image_dir.display()
    ));

    out.push_str("[api_keys]\n");
    if config.api_keys.anu.is_empty() {
        out.push_str("anu = \"\" # not configured\n");
    } else {
        out.push_str("anu = \"***\" # configured\n");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_config_masks_key() {
        let mut config = Config::default();
        config.api_keys.anu = "secret".to_string();

        let rendered = render_config(&config);

        assert!(rendered.contains("[defaults]"));
        assert!(rendered.contains("max = 100"));
        assert!(rendered.contains("max_attempts = 0 # unlimited"));
        assert!(rendered.contains("anu = \"***\""));
        assert!(!rendered.contains("secret"));
    }
}
