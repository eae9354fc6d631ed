use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::rules::RoundResult;
use crate::session::Receipt;
use crate::Chips;

/// Record of one settled Blackjack round.
/// Serialized one per line (JSONL) for later inspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Unique identifier for this round (format: YYYYMMDD-NNNNNN)
    pub round_id: String,
    pub player_id: String,
    /// Seed the shoe was shuffled with, when known
    pub seed: Option<u64>,
    pub stake: Chips,
    pub player_cards: Vec<Card>,
    pub dealer_cards: Vec<Card>,
    pub result: RoundResult,
    pub delta: Chips,
    /// Timestamp when the round was settled (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
}

impl RoundRecord {
    pub fn from_receipt(
        round_id: String,
        player_id: &str,
        seed: Option<u64>,
        player_cards: &[Card],
        dealer_cards: &[Card],
        receipt: &Receipt,
    ) -> Self {
        Self {
            round_id,
            player_id: player_id.to_string(),
            seed,
            stake: receipt.settlement.stake,
            player_cards: player_cards.to_vec(),
            dealer_cards: dealer_cards.to_vec(),
            result: receipt.settlement.result,
            delta: receipt.delta,
            ts: None,
        }
    }
}

pub fn format_round_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

pub struct RoundLogger {
    writer: Option<BufWriter<std::fs::File>>,
    date: String,
    seq: u32,
}

impl RoundLogger {
    /// Opens `path` for appending, creating parent directories as needed.
    pub fn open<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let date = Utc::now().format("%Y%m%d").to_string();
        let seq = last_seq(path.as_ref(), &date)?;
        let f = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date,
            seq,
        })
    }

    /// A logger that numbers rounds but writes nothing.
    pub fn disabled(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_round_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &RoundRecord) -> std::io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }
}

/// Highest sequence number already used for `date` in the file at `path`.
/// Lines that are not round records are skipped.
fn last_seq(path: &Path, date: &str) -> std::io::Result<u32> {
    let text = match std::fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e),
    };
    let prefix = format!("{}-", date);
    Ok(text
        .lines()
        .filter_map(|l| serde_json::from_str::<RoundRecord>(l).ok())
        .filter_map(|r| r.round_id.strip_prefix(&prefix)?.parse::<u32>().ok())
        .max()
        .unwrap_or(0))
}
