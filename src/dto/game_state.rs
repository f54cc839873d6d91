use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::dao::models::{GameSnapshot, StoredGameState};

/// Snapshot submitted by the game client on `POST /save`.
///
/// Every field accepts an arbitrary JSON value. The first four are required; an
/// explicit `null` counts as present and is stored as-is.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SaveGameRequest {
    /// Where the player stands.
    #[serde(default, deserialize_with = "present")]
    #[validate(required(message = "missing required field `playerPosition`"))]
    #[schema(value_type = Object)]
    pub player_position: Option<Value>,
    /// Items carried by the player.
    #[serde(default, deserialize_with = "present")]
    #[validate(required(message = "missing required field `inventory`"))]
    #[schema(value_type = Object)]
    pub inventory: Option<Value>,
    /// Progress through the quest lines.
    #[serde(default, deserialize_with = "present")]
    #[validate(required(message = "missing required field `questProgress`"))]
    #[schema(value_type = Object)]
    pub quest_progress: Option<Value>,
    /// Reputation with each faction.
    #[serde(default, deserialize_with = "present")]
    #[validate(required(message = "missing required field `factionStandings`"))]
    #[schema(value_type = Object)]
    pub faction_standings: Option<Value>,
    /// Defaults to an empty list when omitted.
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<Object>)]
    pub echo_crystals: Option<Value>,
}

/// Distinguish an explicit `null` (present) from a missing key (`#[serde(default)]`).
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl SaveGameRequest {
    /// Check required fields and turn the request into a snapshot.
    pub fn into_snapshot(self) -> Result<GameSnapshot, ValidationErrors> {
        self.validate()?;
        // Validation guarantees every required field is `Some`.
        Ok(GameSnapshot::new(
            self.player_position.unwrap_or_default(),
            self.inventory.unwrap_or_default(),
            self.quest_progress.unwrap_or_default(),
            self.faction_standings.unwrap_or_default(),
            self.echo_crystals,
        ))
    }
}

/// Acknowledgement returned once a snapshot has been stored.
#[derive(Debug, Serialize, ToSchema)]
pub struct SaveGameResponse {
    /// Always "success".
    pub status: String,
}

impl SaveGameResponse {
    /// Acknowledgement for a stored snapshot.
    pub fn success() -> Self {
        Self {
            status: "success".to_string(),
        }
    }
}

/// Latest snapshot returned on `GET /load`.
///
/// Fields carry the stored JSON text verbatim; the client parses them. When nothing
/// has been saved yet every field is absent and the body is `{}`.
#[derive(Debug, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoadGameResponse {
    /// Stored `player_position` JSON text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_position: Option<String>,
    /// Stored `inventory` JSON text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory: Option<String>,
    /// Stored `quest_progress` JSON text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quest_progress: Option<String>,
    /// Stored `faction_standings` JSON text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faction_standings: Option<String>,
    /// Stored `echo_crystals` JSON text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub echo_crystals: Option<String>,
}

impl LoadGameResponse {
    /// Response used when the store holds no snapshot.
    pub fn empty() -> Self {
        Self::default()
    }
}

impl From<StoredGameState> for LoadGameResponse {
    fn from(stored: StoredGameState) -> Self {
        let state = stored.state;
        Self {
            player_position: Some(state.player_position),
            inventory: Some(state.inventory),
            quest_progress: Some(state.quest_progress),
            faction_standings: Some(state.faction_standings),
            echo_crystals: Some(state.echo_crystals),
        }
    }
}
