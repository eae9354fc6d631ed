//! # Report Command
//!
//! Aggregate views over every registered player.
//!
//! Game and win/loss counts are derived from the activity lines kept on each
//! player, so they cover only the most recent activities. Lines start with
//! the game name (`Blackjack:` or `Slots:`) and carry `won $N` or `lost $N`;
//! simulation lines are not games and are ignored.

use crate::cli::ReportKind;
use crate::error::CliError;
use crate::formatters::{format_money, format_signed};
use crate::ui;
use casino_engine::player::Player;
use casino_engine::store::PlayerStore;
use std::collections::HashSet;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Game {
    Blackjack,
    Slots,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verdict {
    Won,
    Lost,
    Even,
}

/// Game and verdict of one activity line; `None` for non-game lines.
fn classify(line: &str) -> Option<(Game, Verdict)> {
    let game = if line.starts_with("Blackjack:") {
        Game::Blackjack
    } else if line.starts_with("Slots:") {
        Game::Slots
    } else {
        return None;
    };
    let verdict = if line.contains("won $") {
        Verdict::Won
    } else if line.contains("lost $") {
        Verdict::Lost
    } else {
        Verdict::Even
    };
    Some((game, verdict))
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Tally {
    blackjack: usize,
    slots: usize,
    wins: usize,
    losses: usize,
}

fn tally(player: &Player) -> Tally {
    let mut t = Tally::default();
    for (game, verdict) in player.history.iter().filter_map(|l| classify(l)) {
        match game {
            Game::Blackjack => t.blackjack += 1,
            Game::Slots => t.slots += 1,
        }
        match verdict {
            Verdict::Won => t.wins += 1,
            Verdict::Lost => t.losses += 1,
            Verdict::Even => {}
        }
    }
    t
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

fn name_col(name: &str) -> String {
    name.chars().take(24).collect()
}

pub fn handle_report_command(
    kind: ReportKind,
    store: &dyn PlayerStore,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let players = store.load_all()?;
    let title = match kind {
        ReportKind::Balance => "PLAYERS BY BALANCE",
        ReportKind::Ranking => "PLAYER RANKING BY NET RESULT",
        ReportKind::Losses => "PLAYERS WITH THE MOST LOSSES",
        ReportKind::Games => "GAME PARTICIPATION",
    };
    ui::write_banner(out, title)?;
    if players.is_empty() {
        writeln!(out, "No players registered.")?;
        return Ok(());
    }
    match kind {
        ReportKind::Balance => balance_report(&players, out)?,
        ReportKind::Ranking => ranking_report(&players, out)?,
        ReportKind::Losses => losses_report(&players, out)?,
        ReportKind::Games => games_report(&players, out)?,
    }
    writeln!(out, "{}", "=".repeat(60))?;
    Ok(())
}

fn balance_report(players: &[Player], out: &mut dyn Write) -> Result<(), CliError> {
    let mut sorted: Vec<&Player> = players.iter().collect();
    sorted.sort_by(|a, b| b.current_balance.cmp(&a.current_balance));

    writeln!(out, "{:<6} {:<25} {:<12} {:>14}", "POS", "NAME", "ID", "BALANCE")?;
    writeln!(out, "{}", "-".repeat(60))?;
    for (i, p) in sorted.iter().enumerate() {
        writeln!(
            out,
            "{:<6} {:<25} {:<12} {:>14}",
            i + 1,
            name_col(&p.name),
            p.id,
            format_money(p.current_balance)
        )?;
    }

    let total = players
        .iter()
        .map(|p| p.current_balance)
        .fold(0, i64::saturating_add);
    writeln!(out)?;
    writeln!(out, "Total balance: {}", format_money(total))?;
    writeln!(
        out,
        "Average balance: ${:.2}",
        total as f64 / players.len() as f64
    )?;
    if let Some(top) = sorted.first() {
        writeln!(
            out,
            "Richest player: {} ({})",
            top.name,
            format_money(top.current_balance)
        )?;
    }
    Ok(())
}

fn ranking_report(players: &[Player], out: &mut dyn Write) -> Result<(), CliError> {
    let mut sorted: Vec<&Player> = players.iter().collect();
    sorted.sort_by(|a, b| b.net_result().cmp(&a.net_result()));

    writeln!(
        out,
        "{:<6} {:<25} {:<12} {:>12} {:<8}",
        "RANK", "NAME", "ID", "NET", "STATUS"
    )?;
    writeln!(out, "{}", "-".repeat(66))?;
    for (i, p) in sorted.iter().enumerate() {
        let net = p.net_result();
        let status = match net {
            n if n > 0 => "WINNER",
            n if n < 0 => "LOSER",
            _ => "EVEN",
        };
        writeln!(
            out,
            "{:<6} {:<25} {:<12} {:>12} {:<8}",
            i + 1,
            name_col(&p.name),
            p.id,
            format_signed(net),
            status
        )?;
    }

    let winners = players.iter().filter(|p| p.net_result() > 0).count();
    let losers = players.iter().filter(|p| p.net_result() < 0).count();
    writeln!(out)?;
    writeln!(out, "Net winners: {}", winners)?;
    writeln!(out, "Net losers: {}", losers)?;
    writeln!(out, "Unchanged: {}", players.len() - winners - losers)?;
    if let Some(best) = sorted.first() {
        writeln!(
            out,
            "Best player: {} ({})",
            best.name,
            format_signed(best.net_result())
        )?;
    }
    Ok(())
}

fn losses_report(players: &[Player], out: &mut dyn Write) -> Result<(), CliError> {
    let mut rows: Vec<(&Player, Tally)> = players
        .iter()
        .map(|p| (p, tally(p)))
        .filter(|(_, t)| t.wins + t.losses > 0)
        .collect();
    if rows.is_empty() {
        writeln!(out, "No players with recorded games.")?;
        return Ok(());
    }
    rows.sort_by(|a, b| b.1.losses.cmp(&a.1.losses));

    writeln!(
        out,
        "{:<25} {:<12} {:>7} {:>7} {:>9}",
        "NAME", "ID", "LOSSES", "WINS", "LOSS %"
    )?;
    writeln!(out, "{}", "-".repeat(64))?;
    for (p, t) in &rows {
        writeln!(
            out,
            "{:<25} {:<12} {:>7} {:>7} {:>8.1}%",
            name_col(&p.name),
            p.id,
            t.losses,
            t.wins,
            percent(t.losses, t.wins + t.losses)
        )?;
    }

    let losses: usize = rows.iter().map(|(_, t)| t.losses).sum();
    let wins: usize = rows.iter().map(|(_, t)| t.wins).sum();
    writeln!(out)?;
    writeln!(out, "Total losses: {}", losses)?;
    writeln!(out, "Total wins: {}", wins)?;
    let (worst, t) = &rows[0];
    writeln!(out, "Most losses: {} ({})", worst.name, t.losses)?;
    Ok(())
}

fn games_report(players: &[Player], out: &mut dyn Write) -> Result<(), CliError> {
    let mut blackjack = 0;
    let mut slots = 0;
    let mut blackjack_players = HashSet::new();
    let mut slots_players = HashSet::new();
    for p in players {
        let t = tally(p);
        if t.blackjack > 0 {
            blackjack += t.blackjack;
            blackjack_players.insert(p.id.as_str());
        }
        if t.slots > 0 {
            slots += t.slots;
            slots_players.insert(p.id.as_str());
        }
    }

    for (label, count, unique) in [
        ("Blackjack", blackjack, blackjack_players.len()),
        ("Slots", slots, slots_players.len()),
    ] {
        writeln!(out, "{}:", label)?;
        writeln!(out, "  Rounds played: {}", count)?;
        writeln!(out, "  Unique players: {}", unique)?;
        let avg = if unique == 0 {
            0.0
        } else {
            count as f64 / unique as f64
        };
        writeln!(out, "  Rounds per player: {:.1}", avg)?;
    }

    let total = blackjack + slots;
    writeln!(out)?;
    if total == 0 {
        writeln!(out, "No games recorded.")?;
    } else if blackjack > slots {
        writeln!(
            out,
            "Most popular: Blackjack ({:.1}% of rounds)",
            percent(blackjack, total)
        )?;
    } else if slots > blackjack {
        writeln!(
            out,
            "Most popular: Slots ({:.1}% of rounds)",
            percent(slots, total)
        )?;
    } else {
        writeln!(out, "Most popular: tie between Blackjack and Slots")?;
    }
    Ok(())
}
