//! # Casino CLI Library
//!
//! Command-line front end for the casino engine: player management,
//! interactive Blackjack and slot sessions, the betting-strategy optimizer
//! and aggregate reports.
//!
//! ## Main Entry Point
//!
//! [`run`] parses the arguments, resolves configuration, opens the player
//! store and dispatches to a subcommand. [`run_with_input`] does the same
//! with an explicit input stream for the interactive games.
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::io;
//! let args = vec!["casino", "optimize", "--balance", "1000", "--turns", "4"];
//! let code = casino_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `player`: register, list, show, update, remove, history
//! - `blackjack`: play one round against the dealer
//! - `slots`: spin the slot machine
//! - `catalog`: show the bet catalog
//! - `optimize`: best-case betting sequence for a balance
//! - `simulate`: optimize on a player's balance and replay the path
//! - `report`: balance, ranking, losses or games report
//! - `cfg`: display the resolved configuration

use clap::Parser;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::debug;

pub mod cli;
mod commands;
pub mod config;
mod error;
mod exit_code;
pub mod formatters;
pub mod io_utils;
mod logging;
pub mod ui;
pub mod validation;

use cli::{CasinoCli, Commands};
use commands::{
    BlackjackRequest, SearchLimits, SlotsRequest, handle_blackjack_command, handle_catalog_command,
    handle_cfg_command, handle_optimize_command, handle_player_command, handle_report_command,
    handle_simulate_command, handle_slots_command,
};

use casino_engine::deck::Shoe;
use casino_engine::slots::SlotMachine;
use casino_engine::store::JsonFileStore;
pub use error::CliError;

const COMMANDS: &[&str] = &[
    "player",
    "blackjack",
    "slots",
    "catalog",
    "optimize",
    "simulate",
    "report",
    "cfg",
];

/// Main entry point for the CLI application.
///
/// Reads interactive input from the process stdin.
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors, `130` when input closes in
/// the middle of a Blackjack round
///
/// # Example
///
/// ```
/// use std::io;
/// let args = vec!["casino", "catalog"];
/// let code = casino_cli::run(args, &mut io::stdout(), &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let stdin = std::io::stdin();
    let mut stdin_lock = stdin.lock();
    run_with_input(args, out, err, &mut stdin_lock)
}

/// [`run`] with an explicit input stream for turn and spin prompts.
pub fn run_with_input<I, S>(
    args: I,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match CasinoCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version should print to stdout and exit 0
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    let _ = write_usage(err, &e.to_string());
                    exit_code::ERROR
                }
            };
        }
    };

    logging::init_logging(cli.verbose);

    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            let _ = ui::write_error(err, &CliError::Config(e.to_string()).to_string());
            return exit_code::ERROR;
        }
    };
    let cfg = &resolved.config;
    let data_path = cli
        .data
        .clone()
        .unwrap_or_else(|| PathBuf::from(&cfg.data_file));
    debug!(data = %data_path.display(), "player store");
    let mut store = JsonFileStore::new(&data_path);
    let limits = SearchLimits::from(cfg);

    let result = match cli.cmd {
        Commands::Cfg => handle_cfg_command(&resolved, out),
        Commands::Player { action } => handle_player_command(action, &mut store, out),
        Commands::Blackjack {
            id,
            stake,
            seed,
            log,
        } => {
            let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);
            debug!(seed, "blackjack shoe");
            let request = BlackjackRequest {
                player_id: id,
                stake,
                seed: Some(seed),
                log: log.or_else(|| cfg.round_log.as_ref().map(PathBuf::from)),
            };
            handle_blackjack_command(
                request,
                Shoe::new_with_seed(seed),
                &mut store,
                out,
                err,
                stdin,
            )
        }
        Commands::Slots { id, spins, seed } => {
            let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);
            debug!(seed, "slot machine");
            handle_slots_command(
                SlotsRequest {
                    player_id: id,
                    spins,
                },
                SlotMachine::with_cost(seed, cfg.spin_cost),
                &mut store,
                out,
                err,
                stdin,
            )
        }
        Commands::Catalog => handle_catalog_command(out),
        Commands::Optimize(args) => handle_optimize_command(args, limits, &store, out),
        Commands::Simulate {
            id,
            turns,
            reserve,
            apply,
        } => handle_simulate_command(&id, turns, reserve, apply, limits, &mut store, out),
        Commands::Report { kind } => handle_report_command(kind, &store, out),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(CliError::Interrupted(msg)) => {
            let _ = writeln!(err, "\nInterrupted: {}", msg);
            exit_code::INTERRUPTED
        }
        Err(e) => {
            let _ = writeln!(err, "Error: {}", e);
            exit_code::ERROR
        }
    }
}

fn write_usage(err: &mut dyn Write, clap_error: &str) -> std::io::Result<()> {
    writeln!(err, "{}", clap_error)?;
    writeln!(err)?;
    writeln!(err, "Casino CLI")?;
    writeln!(err, "Usage: casino <command> [options]\n")?;
    writeln!(err, "Commands:")?;
    for c in COMMANDS {
        writeln!(err, "  {}", c)?;
    }
    writeln!(err, "\nFor full help, run: casino --help")
}
