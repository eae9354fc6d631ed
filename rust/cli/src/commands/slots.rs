//! Slot machine sessions.
//!
//! Each spin costs a fixed amount and pays the first matching paytable row.
//! With `--spins N` the session plays N spins unattended; otherwise the
//! player is asked before every spin. The session also ends when the balance
//! no longer covers a spin. Balance and activity are saved once at the end.

use crate::error::CliError;
use crate::formatters::{format_money, format_signed};
use crate::io_utils::read_stdin_line;
use crate::ui;
use crate::validation::{normalize_player_id, parse_yes_no};
use casino_engine::session::apply_spins;
use casino_engine::slots::{SlotMachine, Spin, format_reels};
use casino_engine::store::PlayerStore;
use std::io::{BufRead, Write};

#[derive(Debug)]
pub struct SlotsRequest {
    pub player_id: String,
    /// Play this many spins without prompting
    pub spins: Option<u32>,
}

pub fn handle_slots_command(
    request: SlotsRequest,
    mut machine: SlotMachine,
    store: &mut dyn PlayerStore,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let player_id = normalize_player_id(&request.player_id)?;
    let player = store.get(&player_id)?;
    let mut balance = player.current_balance;
    let mut played: Vec<Spin> = Vec::new();

    writeln!(
        out,
        "Slots: {} | balance {} | {} per spin",
        player.name,
        format_money(balance),
        format_money(machine.cost())
    )?;

    loop {
        if !machine.can_play(balance) {
            writeln!(
                out,
                "Not enough balance for another spin ({} needed).",
                format_money(machine.cost())
            )?;
            break;
        }
        match request.spins {
            Some(n) if played.len() as u32 >= n => break,
            Some(_) => {}
            None => {
                ui::prompt(
                    out,
                    &format!("Spin for {}? (y/n): ", format_money(machine.cost())),
                )?;
                // end of input ends the session like an explicit "n"
                let Some(answer) = read_stdin_line(stdin) else {
                    break;
                };
                match parse_yes_no(&answer) {
                    Some(true) => {}
                    Some(false) => break,
                    None => {
                        ui::write_error(err, "Please answer y or n")?;
                        continue;
                    }
                }
            }
        }

        let spin = machine.spin(balance)?;
        balance = spin.balance_after;
        writeln!(out, "[ {} ]", format_reels(&spin.reels))?;
        if spin.prize > 0 {
            writeln!(out, "You win {}!", format_money(spin.prize))?;
        } else {
            writeln!(out, "No prize.")?;
        }
        writeln!(out, "Balance: {}", format_money(balance))?;
        played.push(spin);
    }

    if played.is_empty() {
        writeln!(out, "No spins played.")?;
        return Ok(());
    }
    let saved = apply_spins(store, &player_id, &played)?;
    let net: i64 = played.iter().map(Spin::net).sum();
    writeln!(
        out,
        "Spins: {} | Net: {} | Final balance: {}",
        played.len(),
        format_signed(net),
        format_money(saved.current_balance)
    )?;
    Ok(())
}
