//! Bet catalog display, strategy optimization and simulation.

use crate::cli::OptimizeArgs;
use crate::config::Config;
use crate::error::CliError;
use crate::formatters::{format_catalog, format_money, format_signed, format_strategy};
use crate::validation::{normalize_player_id, validate_balance, validate_reserve, validate_turns};
use casino_engine::Chips;
use casino_engine::catalog::{by_expected_gain, default_catalog, validate_catalog};
use casino_engine::optimizer::{Optimizer, SearchOptions, Strategy, simulate};
use casino_engine::session::apply_simulation;
use casino_engine::store::PlayerStore;
use std::io::Write;

/// Search defaults and the accepted turn range, taken from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    pub max_turns: u32,
    pub max_turns_cap: u32,
    pub minimum_reserve: Chips,
}

impl From<&Config> for SearchLimits {
    fn from(config: &Config) -> Self {
        Self {
            max_turns: config.max_turns,
            max_turns_cap: config.max_turns_cap,
            minimum_reserve: config.minimum_reserve,
        }
    }
}

impl SearchLimits {
    fn options(
        &self,
        turns: Option<u32>,
        reserve: Option<Chips>,
        prune: bool,
    ) -> Result<SearchOptions, CliError> {
        Ok(SearchOptions {
            max_turns: validate_turns(turns.unwrap_or(self.max_turns), self.max_turns_cap)?,
            minimum_reserve: validate_reserve(reserve.unwrap_or(self.minimum_reserve))?,
            prune,
        })
    }
}

pub fn handle_catalog_command(out: &mut dyn Write) -> Result<(), CliError> {
    let catalog = default_catalog();
    write!(out, "{}", format_catalog(&by_expected_gain(&catalog)))?;
    Ok(())
}

/// Handle the optimize command.
///
/// The starting balance is `--balance`, the current balance of the player
/// named by `--id`, or, with both, part of that player's balance. The player
/// record is only read.
pub fn handle_optimize_command(
    args: OptimizeArgs,
    limits: SearchLimits,
    store: &dyn PlayerStore,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let options = limits.options(args.turns, args.reserve, !args.exhaustive)?;
    let balance = args.balance.map(validate_balance).transpose()?;
    let (label, balance) = match (&args.id, balance) {
        (Some(id), requested) => {
            let player = store.get(&normalize_player_id(id)?)?;
            let label = format!("{} ({})", player.name, player.id);
            match requested {
                Some(b) if b > player.current_balance => {
                    return Err(CliError::InvalidInput(format!(
                        "--balance {} exceeds the current balance of {} ({})",
                        b,
                        label,
                        format_money(player.current_balance)
                    )));
                }
                Some(b) => (label, b),
                None => (label, player.current_balance),
            }
        }
        (None, Some(balance)) => ("explicit balance".to_string(), balance),
        (None, None) => {
            return Err(CliError::InvalidInput(
                "either --id or --balance is required".to_string(),
            ));
        }
    };

    let strategy = search(options, balance)?;
    writeln!(
        out,
        "Best-case strategy for {} from {} | up to {} turns | reserve {}",
        label,
        format_money(balance),
        options.max_turns,
        format_money(options.minimum_reserve)
    )?;
    write!(out, "{}", format_strategy(&strategy))?;
    writeln!(
        out,
        "Explored {} states ({} pruned)",
        strategy.stats.nodes, strategy.stats.pruned
    )?;
    Ok(())
}

/// Handle the simulate command.
///
/// Optimizes on the player's current balance and replays the path. Without
/// `apply` the projection is only printed; with it the result and one
/// activity line per step are recorded on the player.
pub fn handle_simulate_command(
    id: &str,
    turns: Option<u32>,
    reserve: Option<Chips>,
    apply: bool,
    limits: SearchLimits,
    store: &mut dyn PlayerStore,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let options = limits.options(turns, reserve, true)?;
    let player_id = normalize_player_id(id)?;
    let player = store.get(&player_id)?;
    let strategy = search(options, player.current_balance)?;

    writeln!(
        out,
        "Simulating for {} ({}) from {}",
        player.name,
        player.id,
        format_money(player.current_balance)
    )?;
    write!(out, "{}", format_strategy(&strategy))?;

    if apply {
        let (saved, sim) = apply_simulation(store, &player_id, &strategy.path)?;
        writeln!(
            out,
            "Simulation applied: {} -> {} ({})",
            format_money(sim.starting_balance),
            format_money(saved.current_balance),
            format_signed(sim.applied_delta)
        )?;
    } else {
        let sim = simulate(&strategy.path, player.current_balance);
        writeln!(
            out,
            "Projected balance: {} ({})",
            format_money(sim.final_balance),
            format_signed(sim.applied_delta)
        )?;
        writeln!(out, "Run with --apply to record this simulation.")?;
    }
    Ok(())
}

fn search(options: SearchOptions, balance: Chips) -> Result<Strategy, CliError> {
    let catalog = default_catalog();
    validate_catalog(&catalog)?;
    Ok(Optimizer::new(&catalog, options).search(balance))
}
