//! Command-line argument definitions.
//!
//! The [`CasinoCli`] parser and its [`Commands`] enum are kept apart from the
//! handlers so they can be inspected and tested without running anything.

use casino_engine::Chips;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "casino",
    version,
    about = "Text-console casino: Blackjack, slots and a betting strategy optimizer"
)]
pub struct CasinoCli {
    /// Player data file (overrides CASINO_DATA and the config file)
    #[arg(long, global = true, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Raise log verbosity (-v info, -vv debug); CASINO_LOG takes precedence
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage registered players
    Player {
        #[command(subcommand)]
        action: PlayerCommand,
    },
    /// Play one interactive round of Blackjack
    Blackjack {
        #[arg(long)]
        id: String,
        #[arg(long)]
        stake: Chips,
        #[arg(long)]
        seed: Option<u64>,
        /// Append the settled round to a JSONL file
        #[arg(long, value_name = "FILE")]
        log: Option<PathBuf>,
    },
    /// Play the slot machine
    Slots {
        #[arg(long)]
        id: String,
        /// Number of spins to play without prompting
        #[arg(long)]
        spins: Option<u32>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show the bet catalog ordered by expected gain
    Catalog,
    /// Find the most profitable best-case betting sequence
    Optimize(OptimizeArgs),
    /// Optimize on a player's balance and replay the path
    Simulate {
        #[arg(long)]
        id: String,
        #[arg(long)]
        turns: Option<u32>,
        #[arg(long)]
        reserve: Option<Chips>,
        /// Record the simulated result on the player
        #[arg(long)]
        apply: bool,
    },
    /// Aggregate reports over all players
    Report {
        #[arg(value_enum)]
        kind: ReportKind,
    },
    /// Display the resolved configuration and where each value came from
    Cfg,
}

#[derive(Args, Debug, Clone)]
pub struct OptimizeArgs {
    /// Use a registered player's current balance
    #[arg(long, required_unless_present = "balance")]
    pub id: Option<String>,
    /// Use an explicit starting balance; with --id, at most the player's balance
    #[arg(long, required_unless_present = "id")]
    pub balance: Option<Chips>,
    #[arg(long)]
    pub turns: Option<u32>,
    #[arg(long)]
    pub reserve: Option<Chips>,
    /// Disable bound pruning and walk the whole tree
    #[arg(long)]
    pub exhaustive: bool,
}

#[derive(Subcommand, Debug)]
pub enum PlayerCommand {
    /// Register a new player
    Register {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        balance: Chips,
    },
    /// List all players
    List,
    /// Show one player
    Show {
        #[arg(long)]
        id: String,
    },
    /// Rename a player or overwrite the current balance
    Update {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        balance: Option<Chips>,
    },
    /// Delete a player
    Remove {
        #[arg(long)]
        id: String,
    },
    /// Print a player's recent activity
    History {
        #[arg(long)]
        id: String,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportKind {
    /// Players by current balance
    Balance,
    /// Players by net result since registration
    Ranking,
    /// Players by number of recorded losses
    Losses,
    /// Participation per game
    Games,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Balance => "balance",
            ReportKind::Ranking => "ranking",
            ReportKind::Losses => "losses",
            ReportKind::Games => "games",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_subcommand_parses() {
        let commands = vec![
            vec!["casino", "cfg"],
            vec!["casino", "catalog"],
            vec!["casino", "player", "list"],
            vec![
                "casino", "player", "register", "--id", "a1", "--name", "Ana", "--balance", "500",
            ],
            vec!["casino", "player", "update", "--id", "a1", "--balance", "10"],
            vec!["casino", "player", "history", "--id", "a1"],
            vec!["casino", "blackjack", "--id", "a1", "--stake", "50", "--seed", "3"],
            vec!["casino", "slots", "--id", "a1", "--spins", "2"],
            vec!["casino", "optimize", "--balance", "1000", "--turns", "3"],
            vec!["casino", "optimize", "--id", "a1", "--exhaustive"],
            vec!["casino", "simulate", "--id", "a1", "--apply"],
            vec!["casino", "report", "ranking"],
            vec!["casino", "--data", "x.json", "-vv", "player", "list"],
        ];
        for args in commands {
            let result = CasinoCli::try_parse_from(&args);
            assert!(result.is_ok(), "failed to parse: {:?}", args);
        }
    }

    #[test]
    fn optimize_needs_a_starting_point() {
        assert!(CasinoCli::try_parse_from(["casino", "optimize"]).is_err());
        let cli = CasinoCli::try_parse_from(["casino", "optimize", "--id", "a", "--balance", "5"])
            .unwrap();
        match cli.cmd {
            Commands::Optimize(args) => {
                assert_eq!(args.id.as_deref(), Some("a"));
                assert_eq!(args.balance, Some(5));
            }
            other => panic!("expected optimize, got {:?}", other),
        }
    }

    #[test]
    fn global_flags_work_after_the_subcommand() {
        let cli =
            CasinoCli::try_parse_from(["casino", "catalog", "--data", "p.json", "-v"]).unwrap();
        assert_eq!(cli.data, Some(PathBuf::from("p.json")));
        assert_eq!(cli.verbose, 1);
        assert!(matches!(cli.cmd, Commands::Catalog));
    }

    #[test]
    fn report_kind_is_parsed_from_its_name() {
        let cli = CasinoCli::try_parse_from(["casino", "report", "games"]).unwrap();
        match cli.cmd {
            Commands::Report { kind } => assert_eq!(kind, ReportKind::Games),
            other => panic!("unexpected {:?}", other),
        }
        assert!(CasinoCli::try_parse_from(["casino", "report", "nope"]).is_err());
    }
}
