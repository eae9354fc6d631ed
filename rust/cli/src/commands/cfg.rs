//! Configuration command handler.
//!
//! This module implements the `cfg` command, which displays the resolved
//! configuration with the source of every value (default, environment, or
//! configuration file).
//!
//! # Example Output
//!
//! ```json
//! {
//!   "max_turns": {
//!     "value": 6,
//!     "source": "default"
//!   },
//!   ...
//! }
//! ```

use crate::config::ConfigResolved;
use crate::error::CliError;
use std::io::Write;

/// Handle the cfg command.
///
/// Writes the already-resolved configuration as pretty JSON.
///
/// # Errors
///
/// Returns `CliError::Io` if writing to the output stream fails.
pub fn handle_cfg_command(resolved: &ConfigResolved, out: &mut dyn Write) -> Result<(), CliError> {
    let ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "data_file": {
            "value": config.data_file,
            "source": sources.data_file,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "max_turns": {
            "value": config.max_turns,
            "source": sources.max_turns,
        },
        "max_turns_cap": {
            "value": config.max_turns_cap,
            "source": sources.max_turns_cap,
        },
        "minimum_reserve": {
            "value": config.minimum_reserve,
            "source": sources.minimum_reserve,
        },
        "spin_cost": {
            "value": config.spin_cost,
            "source": sources.spin_cost,
        },
        "round_log": {
            "value": config.round_log,
            "source": sources.round_log,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
