use serde::{Deserialize, Serialize};
use tracing::info;

use crate::deck::Shoe;
use crate::engine::Engine;
use crate::errors::CasinoError;
use crate::game::{Phase, TurnAction};
use crate::optimizer::{simulate, BetOutcome, Simulation};
use crate::player::{validate_balance, Player};
use crate::rules::Settlement;
use crate::slots::Spin;
use crate::store::PlayerStore;
use crate::Chips;

/// Loads the collection, lets `f` change one player, and writes it back.
/// The caller sees either the whole change or none of it; nothing is written
/// when `f` fails.
fn with_player_mut<T>(
    store: &mut dyn PlayerStore,
    player_id: &str,
    f: impl FnOnce(&mut Player) -> Result<T, CasinoError>,
) -> Result<(Player, T), CasinoError> {
    let mut players = store.load_all()?;
    let player = players
        .iter_mut()
        .find(|p| p.id == player_id)
        .ok_or_else(|| CasinoError::PlayerNotFound {
            id: player_id.to_string(),
        })?;
    let out = f(player)?;
    let updated = player.clone();
    store.save_all(&players)?;
    Ok((updated, out))
}

/// Applies a balance change and records one activity line in a single write.
///
/// A change that would move the balance outside `0..=MAX_BALANCE` fails with
/// [`CasinoError::BalanceOutOfRange`] and leaves the player untouched.
pub fn apply_settlement(
    store: &mut dyn PlayerStore,
    player_id: &str,
    delta: Chips,
    description: &str,
) -> Result<Player, CasinoError> {
    let (player, ()) = with_player_mut(store, player_id, |p| {
        p.credit(delta)?;
        p.append_activity(description);
        Ok(())
    })?;
    info!(
        player = %player.id,
        delta,
        balance = player.current_balance,
        "settlement applied"
    );
    Ok(player)
}

/// Replays a strategy path against the player's current balance and stores
/// the result together with one activity line per applied step.
pub fn apply_simulation(
    store: &mut dyn PlayerStore,
    player_id: &str,
    path: &[BetOutcome],
) -> Result<(Player, Simulation), CasinoError> {
    with_player_mut(store, player_id, |p| {
        let sim = simulate(path, p.current_balance);
        validate_balance(sim.final_balance)?;
        for step in &path[..sim.steps_applied] {
            p.append_activity(format!("[SIMULATION] {}: ${}", step.bet.name, step.delta));
        }
        p.append_activity("Strategy simulation applied");
        p.current_balance = sim.final_balance;
        Ok(sim)
    })
}

/// Stores the net result of a run of slot spins with one activity line per
/// spin, in a single write.
pub fn apply_spins(
    store: &mut dyn PlayerStore,
    player_id: &str,
    spins: &[Spin],
) -> Result<Player, CasinoError> {
    let net = spins
        .iter()
        .map(Spin::net)
        .fold(0, Chips::saturating_add);
    let (player, ()) = with_player_mut(store, player_id, |p| {
        p.credit(net)?;
        for spin in spins {
            p.append_activity(spin.describe());
        }
        Ok(())
    })?;
    info!(
        player = %player.id,
        spins = spins.len(),
        net,
        balance = player.current_balance,
        "slot session saved"
    );
    Ok(player)
}

/// What the caller gets back once a round is paid out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub settlement: Settlement,
    pub delta: Chips,
    pub new_balance: Chips,
    pub description: String,
}

/// One Blackjack round bound to a registered player.
///
/// # Examples
///
/// ```
/// use casino_engine::cards::{Card, Rank};
/// use casino_engine::deck::Shoe;
/// use casino_engine::player::Player;
/// use casino_engine::session::Session;
/// use casino_engine::store::{MemoryStore, PlayerStore};
///
/// let mut store = MemoryStore::with_players(vec![Player::new("ANA", "Ana", 1000)]);
/// // player A, dealer 10, player K, dealer Q: natural against 20
/// let order = [Rank::Ace, Rank::Ten, Rank::King, Rank::Queen]
///     .into_iter()
///     .map(Card::new)
///     .collect();
/// let session = Session::start(&store, "ANA", 100, Shoe::stacked(order, 1)).unwrap();
/// let receipt = session.settle(&mut store).unwrap();
///
/// assert_eq!(receipt.delta, 150);
/// assert_eq!(store.get("ANA").unwrap().current_balance, 1150);
/// ```
#[derive(Debug)]
pub struct Session {
    player_id: String,
    player_name: String,
    balance: Chips,
    engine: Engine,
}

impl Session {
    /// Looks the player up, checks the stake, and deals the opening cards.
    ///
    /// # Errors
    ///
    /// [`CasinoError::PlayerNotFound`], [`CasinoError::InvalidBetAmount`] or
    /// [`CasinoError::InsufficientFunds`].
    pub fn start(
        store: &dyn PlayerStore,
        player_id: &str,
        stake: Chips,
        shoe: Shoe,
    ) -> Result<Self, CasinoError> {
        let player = store.get(player_id)?;
        let mut engine = Engine::new(shoe);
        engine.start_with_balance(stake, player.current_balance)?;
        Ok(Self {
            player_id: player.id,
            player_name: player.name,
            balance: player.current_balance,
            engine,
        })
    }

    pub fn act(&mut self, action: TurnAction) -> Result<&Engine, CasinoError> {
        self.engine.act(action)?;
        Ok(&self.engine)
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn phase(&self) -> Phase {
        self.engine.phase()
    }

    pub fn player_id(&self) -> &str {
        &self.player_id
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    /// Balance when the session started, before this round's result.
    pub fn balance(&self) -> Chips {
        self.balance
    }

    /// Pays the round out and persists it. Consumes the session.
    pub fn settle(mut self, store: &mut dyn PlayerStore) -> Result<Receipt, CasinoError> {
        let settlement = self.engine.settle()?;
        let current = store.get(&self.player_id)?.current_balance;
        let description = format!(
            "{} | balance ${}",
            settlement.description,
            current.saturating_add(settlement.delta)
        );
        let player = apply_settlement(store, &self.player_id, settlement.delta, &description)?;
        Ok(Receipt {
            delta: settlement.delta,
            settlement,
            new_balance: player.current_balance,
            description,
        })
    }
}
