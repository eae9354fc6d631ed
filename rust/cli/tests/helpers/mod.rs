//! Shared helpers for the integration tests.
//!
//! - `cli_runner`: [`cli_runner::CliRunner`] runs the CLI in process against
//!   a player file inside its own temporary directory and captures stdout,
//!   stderr and the exit code.
//!
//! ```rust,ignore
//! let cli = CliRunner::new();
//! let res = cli.run(&["player", "register", "--id", "a1", "--name", "Ana", "--balance", "500"]);
//! assert_eq!(res.exit_code, 0);
//! ```

pub mod cli_runner;
