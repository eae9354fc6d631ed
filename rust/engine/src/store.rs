//! Player persistence.
//!
//! The store is a whole-collection abstraction: implementors only load and
//! overwrite the full list of players. Lookups and updates are provided on
//! top of that, re-fetching the collection and writing it back by id.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::CasinoError;
use crate::player::{validate_balance, Player};
use crate::Chips;

pub trait PlayerStore {
    fn load_all(&self) -> Result<Vec<Player>, CasinoError>;

    fn save_all(&mut self, players: &[Player]) -> Result<(), CasinoError>;

    fn find(&self, id: &str) -> Result<Option<Player>, CasinoError> {
        Ok(self.load_all()?.into_iter().find(|p| p.id == id))
    }

    fn get(&self, id: &str) -> Result<Player, CasinoError> {
        self.find(id)?
            .ok_or_else(|| CasinoError::PlayerNotFound { id: id.to_string() })
    }

    /// Replaces the stored record with the same id.
    fn update(&mut self, player: &Player) -> Result<(), CasinoError> {
        let mut players = self.load_all()?;
        let slot = players
            .iter_mut()
            .find(|p| p.id == player.id)
            .ok_or_else(|| CasinoError::PlayerNotFound {
                id: player.id.clone(),
            })?;
        *slot = player.clone();
        self.save_all(&players)
    }

    fn register(&mut self, player: Player) -> Result<(), CasinoError> {
        let mut players = self.load_all()?;
        if players.iter().any(|p| p.id == player.id) {
            return Err(CasinoError::DuplicatePlayer { id: player.id });
        }
        validate_balance(player.initial_balance)?;
        players.push(player);
        self.save_all(&players)
    }

    fn remove(&mut self, id: &str) -> Result<Player, CasinoError> {
        let mut players = self.load_all()?;
        let pos = players
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| CasinoError::PlayerNotFound { id: id.to_string() })?;
        let removed = players.remove(pos);
        self.save_all(&players)?;
        Ok(removed)
    }

    /// Renames a player and/or overwrites the current balance.
    fn modify(
        &mut self,
        id: &str,
        name: Option<String>,
        balance: Option<Chips>,
    ) -> Result<Player, CasinoError> {
        let mut player = self.get(id)?;
        if let Some(n) = name.filter(|n| !n.trim().is_empty()) {
            player.name = n;
        }
        if let Some(b) = balance {
            player.current_balance = validate_balance(b)?;
        }
        self.update(&player)?;
        Ok(player)
    }
}

/// Players kept as a pretty-printed JSON array on disk.
/// A missing file reads as an empty collection.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PlayerStore for JsonFileStore {
    fn load_all(&self) -> Result<Vec<Player>, CasinoError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let players: Vec<Player> = serde_json::from_str(&content)?;
        Ok(players)
    }

    fn save_all(&mut self, players: &[Player]) -> Result<(), CasinoError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let f = File::create(&self.path)?;
        let mut w = BufWriter::new(f);
        serde_json::to_writer_pretty(&mut w, players)?;
        w.write_all(b"\n")?;
        w.flush()?;
        debug!(path = %self.path.display(), players = players.len(), "players saved");
        Ok(())
    }
}

/// In-memory store, used by tests and embedders that persist elsewhere.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    players: Vec<Player>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_players(players: Vec<Player>) -> Self {
        Self { players }
    }
}

impl PlayerStore for MemoryStore {
    fn load_all(&self) -> Result<Vec<Player>, CasinoError> {
        Ok(self.players.clone())
    }

    fn save_all(&mut self, players: &[Player]) -> Result<(), CasinoError> {
        self.players = players.to_vec();
        Ok(())
    }
}
