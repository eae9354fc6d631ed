//! # Blackjack Command
//!
//! One interactive round of Blackjack against the house dealer.
//!
//! The player is dealt two cards and sees one dealer card. Decisions are
//! read line by line from the input stream (`h` hit, `s` stand, `q` quit).
//! Standing lets the dealer draw to 17, then the round is settled and the
//! balance change is written to the player record together with one
//! activity line. Quitting before the end settles nothing.

use crate::error::CliError;
use crate::formatters::{format_hand, format_money, format_signed};
use crate::io_utils::read_stdin_line;
use crate::ui;
use crate::validation::{ParseResult, normalize_player_id, parse_turn_action};
use casino_engine::Chips;
use casino_engine::deck::Shoe;
use casino_engine::game::{Outcome, Phase, TurnAction};
use casino_engine::logger::{RoundLogger, RoundRecord};
use casino_engine::session::Session;
use casino_engine::store::PlayerStore;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Parameters of one round as resolved from flags and configuration.
#[derive(Debug)]
pub struct BlackjackRequest {
    pub player_id: String,
    pub stake: Chips,
    /// Seed the shoe was shuffled with; recorded in the round log
    pub seed: Option<u64>,
    pub log: Option<PathBuf>,
}

/// Handle the blackjack command.
///
/// # Arguments
///
/// * `request` - Player, stake, seed and optional round log
/// * `shoe` - Shoe to deal from (seeded by the caller)
/// * `store` - Player store the result is written to
/// * `out` - Output stream for the table display
/// * `err` - Error stream for rejected input
/// * `stdin` - Input stream for turn decisions
///
/// # Returns
///
/// * `Ok(())` when the round was settled or the player quit
/// * `Err(CliError::Interrupted)` when input ends during the player turn
/// * `Err(CliError::Engine)` for an unknown player or an invalid stake
pub fn handle_blackjack_command(
    request: BlackjackRequest,
    shoe: Shoe,
    store: &mut dyn PlayerStore,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let player_id = normalize_player_id(&request.player_id)?;
    let mut session = Session::start(&*store, &player_id, request.stake, shoe)?;

    writeln!(
        out,
        "Blackjack: {} | balance {} | stake {}",
        session.player_name(),
        format_money(session.balance()),
        format_money(request.stake)
    )?;
    show_table(&session, out)?;

    while session.phase() == Phase::PlayerTurn {
        ui::prompt(out, "Hit or stand? (h/s/q): ")?;
        let Some(input) = read_stdin_line(stdin) else {
            return Err(CliError::Interrupted(
                "input closed before the round finished; nothing was settled".to_string(),
            ));
        };
        match parse_turn_action(&input) {
            ParseResult::Action(action) => {
                let engine = session.act(action)?;
                if action == TurnAction::Hit {
                    let drawn = engine
                        .player()
                        .last()
                        .map(|c| c.to_string())
                        .unwrap_or_default();
                    writeln!(
                        out,
                        "You drew {}: {}",
                        drawn,
                        format_hand(engine.player().cards())
                    )?;
                    if engine.player_outcome() == Some(Outcome::Bust) {
                        writeln!(out, "Bust!")?;
                    }
                }
            }
            ParseResult::Quit => {
                writeln!(out, "Round abandoned; the stake was not settled.")?;
                return Ok(());
            }
            ParseResult::Invalid(msg) => ui::write_error(err, &msg)?,
        }
    }

    let engine = session.engine();
    if engine.player_outcome() == Some(Outcome::Blackjack) {
        writeln!(out, "Blackjack!")?;
    }
    if engine.dealer_outcome().is_some() {
        writeln!(out, "Dealer hand: {}", format_hand(engine.dealer().cards()))?;
        if engine.dealer_outcome() == Some(Outcome::Bust) {
            writeln!(out, "Dealer busts!")?;
        }
    }
    let player_cards = engine.player().cards().to_vec();
    let dealer_cards = engine.dealer().cards().to_vec();

    let receipt = session.settle(store)?;
    writeln!(
        out,
        "Result: {} | {} | New balance: {}",
        receipt.settlement.result.as_str(),
        format_signed(receipt.delta),
        format_money(receipt.new_balance)
    )?;

    // the balance is already saved, so a log failure only warns
    if let Some(path) = &request.log {
        let logged = RoundLogger::open(path).and_then(|mut logger| {
            let record = RoundRecord::from_receipt(
                logger.next_id(),
                &player_id,
                request.seed,
                &player_cards,
                &dealer_cards,
                &receipt,
            );
            logger.write(&record)
        });
        if let Err(e) = logged {
            ui::display_warning(
                err,
                &format!("round not logged to {}: {}", path.display(), e),
            )?;
        }
    }
    Ok(())
}

fn show_table(session: &Session, out: &mut dyn Write) -> Result<(), CliError> {
    let engine = session.engine();
    writeln!(out, "Your hand: {}", format_hand(engine.player().cards()))?;
    // the full dealer hand is shown once the round is over
    if let Some(up) = engine.dealer_upcard()
        && !engine.is_round_over()
    {
        writeln!(out, "Dealer shows: {} [?]", up)?;
    }
    Ok(())
}
