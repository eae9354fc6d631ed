//! Command handler modules for the casino CLI.
//!
//! Each command lives in its own module with the same shape:
//!
//! - Public handler function: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Module-private helpers specific to that command
//! - Dependency injection: output streams (`&mut dyn Write`), input
//!   (`&mut dyn BufRead`) and the player store (`&mut dyn PlayerStore`) are
//!   passed in, so handlers run the same against files or memory
//! - Error propagation through the `CliError` enum

mod blackjack;
mod cfg;
mod player;
mod report;
mod slots;
mod strategy;

pub use blackjack::{BlackjackRequest, handle_blackjack_command};
pub use cfg::handle_cfg_command;
pub use player::handle_player_command;
pub use report::handle_report_command;
pub use slots::{SlotsRequest, handle_slots_command};
pub use strategy::{
    SearchLimits, handle_catalog_command, handle_optimize_command, handle_simulate_command,
};
