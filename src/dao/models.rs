use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier assigned by the store to every saved snapshot.
///
/// Identifiers strictly increase with insertion order and are never reused, so the
/// latest snapshot is always the one with the greatest id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(i64);

impl RecordId {
    /// Wrap a raw row identifier.
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw row identifier.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Player state as submitted by the game client, in structured form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Where the player stands (coordinates, island, ...).
    pub player_position: Value,
    /// Items carried by the player.
    pub inventory: Value,
    /// Progress through the quest lines.
    pub quest_progress: Value,
    /// Reputation with each faction.
    pub faction_standings: Value,
    /// Collected echo crystals.
    pub echo_crystals: Value,
}

impl GameSnapshot {
    /// Build a snapshot, defaulting missing echo crystals to an empty sequence.
    pub fn new(
        player_position: Value,
        inventory: Value,
        quest_progress: Value,
        faction_standings: Value,
        echo_crystals: Option<Value>,
    ) -> Self {
        Self {
            player_position,
            inventory,
            quest_progress,
            faction_standings,
            echo_crystals: echo_crystals.unwrap_or_else(empty_echo_crystals),
        }
    }
}

/// Value stored for echo crystals when the client does not send any.
pub fn empty_echo_crystals() -> Value {
    Value::Array(Vec::new())
}

/// Snapshot fields serialized to JSON text, exactly as they sit in storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedGameState {
    /// `player_position` column.
    pub player_position: String,
    /// `inventory` column.
    pub inventory: String,
    /// `quest_progress` column.
    pub quest_progress: String,
    /// `faction_standings` column.
    pub faction_standings: String,
    /// `echo_crystals` column, `[]` unless the client sent crystals.
    pub echo_crystals: String,
}

/// Row read back from storage, fields still in their serialized form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredGameState {
    /// Identifier assigned on insertion.
    pub id: RecordId,
    /// Serialized snapshot fields.
    pub state: EncodedGameState,
}

/// Row read back from storage with every field decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct GameStateRecord {
    /// Identifier assigned on insertion.
    pub id: RecordId,
    /// Decoded snapshot.
    pub snapshot: GameSnapshot,
}
