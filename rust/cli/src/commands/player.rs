//! Player management: register, list, show, update, remove and history.

use crate::cli::PlayerCommand;
use crate::error::CliError;
use crate::formatters::{format_money, format_signed};
use crate::validation::{normalize_player_id, validate_balance, validate_player_name};
use casino_engine::player::Player;
use casino_engine::store::PlayerStore;
use std::io::Write;

pub fn handle_player_command(
    action: PlayerCommand,
    store: &mut dyn PlayerStore,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    match action {
        PlayerCommand::Register { id, name, balance } => {
            let id = normalize_player_id(&id)?;
            let name = validate_player_name(&name)?;
            let balance = validate_balance(balance)?;
            let player = Player::new(id, name, balance);
            store.register(player.clone())?;
            writeln!(out, "Player registered: {}", player)?;
        }
        PlayerCommand::List => list_players(store, out)?,
        PlayerCommand::Show { id } => {
            let player = store.get(&normalize_player_id(&id)?)?;
            writeln!(out, "{}", player)?;
            writeln!(out, "Initial balance: {}", format_money(player.initial_balance))?;
            writeln!(out, "Net result: {}", format_signed(player.net_result()))?;
            writeln!(out, "Recorded activities: {}", player.history.len())?;
        }
        PlayerCommand::Update { id, name, balance } => {
            if name.is_none() && balance.is_none() {
                return Err(CliError::InvalidInput(
                    "nothing to update: pass --name and/or --balance".to_string(),
                ));
            }
            let balance = balance.map(validate_balance).transpose()?;
            let player = store.modify(&normalize_player_id(&id)?, name, balance)?;
            writeln!(out, "Player updated: {}", player)?;
        }
        PlayerCommand::Remove { id } => {
            let removed = store.remove(&normalize_player_id(&id)?)?;
            writeln!(out, "Player removed: {} ({})", removed.name, removed.id)?;
        }
        PlayerCommand::History { id } => {
            let player = store.get(&normalize_player_id(&id)?)?;
            writeln!(out, "Activity for {} ({}):", player.name, player.id)?;
            if player.history.is_empty() {
                writeln!(out, "No activity recorded.")?;
            }
            for (i, line) in player.history.iter().enumerate() {
                writeln!(out, "{:>3}. {}", i + 1, line)?;
            }
        }
    }
    Ok(())
}

fn list_players(store: &dyn PlayerStore, out: &mut dyn Write) -> Result<(), CliError> {
    let players = store.load_all()?;
    if players.is_empty() {
        writeln!(out, "No players registered.")?;
        return Ok(());
    }
    writeln!(
        out,
        "{:<12} {:<25} {:>12} {:>12}",
        "ID", "NAME", "BALANCE", "NET"
    )?;
    writeln!(out, "{}", "-".repeat(64))?;
    for p in &players {
        writeln!(
            out,
            "{:<12} {:<25} {:>12} {:>12}",
            p.id,
            p.name.chars().take(24).collect::<String>(),
            format_money(p.current_balance),
            format_signed(p.net_result())
        )?;
    }
    writeln!(out, "{} player(s)", players.len())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use casino_engine::errors::CasinoError;
    use casino_engine::store::MemoryStore;

    fn run(store: &mut MemoryStore, action: PlayerCommand) -> Result<String, CliError> {
        let mut out = Vec::new();
        handle_player_command(action, store, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn register_normalizes_the_id() {
        let mut store = MemoryStore::new();
        let out = run(
            &mut store,
            PlayerCommand::Register {
                id: " ana1 ".into(),
                name: "Ana".into(),
                balance: 1000,
            },
        )
        .unwrap();
        assert!(out.contains("ID: ANA1"));
        assert_eq!(store.get("ANA1").unwrap().current_balance, 1000);
    }

    #[test]
    fn duplicate_and_negative_registrations_fail() {
        let mut store = MemoryStore::with_players(vec![Player::new("ANA1", "Ana", 10)]);
        let dup = run(
            &mut store,
            PlayerCommand::Register {
                id: "ana1".into(),
                name: "Other".into(),
                balance: 5,
            },
        );
        assert!(matches!(
            dup,
            Err(CliError::Engine(CasinoError::DuplicatePlayer { .. }))
        ));
        let neg = run(
            &mut store,
            PlayerCommand::Register {
                id: "bo".into(),
                name: "Bo".into(),
                balance: -1,
            },
        );
        assert!(matches!(neg, Err(CliError::InvalidInput(_))));
        let huge = run(
            &mut store,
            PlayerCommand::Register {
                id: "cy".into(),
                name: "Cy".into(),
                balance: i64::MAX,
            },
        );
        assert!(matches!(huge, Err(CliError::InvalidInput(_))));
        assert!(store.get("CY").is_err());
    }

    #[test]
    fn update_rejects_balances_out_of_range() {
        let mut store = MemoryStore::with_players(vec![Player::new("A", "Ana", 10)]);
        for balance in [-1, casino_engine::MAX_BALANCE + 1] {
            let r = run(
                &mut store,
                PlayerCommand::Update {
                    id: "a".into(),
                    name: None,
                    balance: Some(balance),
                },
            );
            assert!(matches!(r, Err(CliError::InvalidInput(_))));
        }
        assert_eq!(store.get("A").unwrap().current_balance, 10);
    }

    #[test]
    fn list_shows_every_player() {
        let mut store = MemoryStore::with_players(vec![
            Player::new("A", "Ana", 10),
            Player::new("B", "Bo", 20),
        ]);
        let out = run(&mut store, PlayerCommand::List).unwrap();
        assert!(out.contains("Ana"));
        assert!(out.contains("Bo"));
        assert!(out.contains("2 player(s)"));

        let out = run(&mut MemoryStore::new(), PlayerCommand::List).unwrap();
        assert_eq!(out.trim(), "No players registered.");
    }

    #[test]
    fn update_requires_a_field() {
        let mut store = MemoryStore::with_players(vec![Player::new("A", "Ana", 10)]);
        let r = run(
            &mut store,
            PlayerCommand::Update {
                id: "a".into(),
                name: None,
                balance: None,
            },
        );
        assert!(matches!(r, Err(CliError::InvalidInput(_))));

        run(
            &mut store,
            PlayerCommand::Update {
                id: "a".into(),
                name: Some("Anita".into()),
                balance: Some(99),
            },
        )
        .unwrap();
        let p = store.get("A").unwrap();
        assert_eq!((p.name.as_str(), p.current_balance, p.initial_balance), ("Anita", 99, 10));
    }

    #[test]
    fn remove_and_history() {
        let mut p = Player::new("A", "Ana", 10);
        p.append_activity("Slots: lost $100 with BAR | BAR | BAR");
        let mut store = MemoryStore::with_players(vec![p]);

        let out = run(&mut store, PlayerCommand::History { id: "a".into() }).unwrap();
        assert!(out.contains("  1. Slots: lost $100"));

        run(&mut store, PlayerCommand::Remove { id: "a".into() }).unwrap();
        let r = run(&mut store, PlayerCommand::Show { id: "a".into() });
        assert!(matches!(
            r,
            Err(CliError::Engine(CasinoError::PlayerNotFound { .. }))
        ));
    }
}
