//! Encode/decode boundary between structured snapshots and their stored JSON text.

use serde_json::Value;

use crate::dao::{
    models::{EncodedGameState, GameSnapshot, GameStateRecord, RecordId, StoredGameState},
    storage::{StorageError, StorageResult},
};

/// Serialize every snapshot field independently into JSON text.
pub fn encode_snapshot(snapshot: &GameSnapshot) -> StorageResult<EncodedGameState> {
    Ok(EncodedGameState {
        player_position: encode_field("playerPosition", &snapshot.player_position)?,
        inventory: encode_field("inventory", &snapshot.inventory)?,
        quest_progress: encode_field("questProgress", &snapshot.quest_progress)?,
        faction_standings: encode_field("factionStandings", &snapshot.faction_standings)?,
        echo_crystals: encode_field("echoCrystals", &snapshot.echo_crystals)?,
    })
}

/// Parse every stored column back into structured form.
pub fn decode_state(stored: StoredGameState) -> StorageResult<GameStateRecord> {
    let StoredGameState { id, state } = stored;
    let snapshot = GameSnapshot {
        player_position: decode_field(id, "playerPosition", &state.player_position)?,
        inventory: decode_field(id, "inventory", &state.inventory)?,
        quest_progress: decode_field(id, "questProgress", &state.quest_progress)?,
        faction_standings: decode_field(id, "factionStandings", &state.faction_standings)?,
        echo_crystals: decode_field(id, "echoCrystals", &state.echo_crystals)?,
    };
    Ok(GameStateRecord { id, snapshot })
}

fn encode_field(field: &'static str, value: &Value) -> StorageResult<String> {
    serde_json::to_string(value).map_err(|source| StorageError::Encode { field, source })
}

fn decode_field(id: RecordId, field: &'static str, text: &str) -> StorageResult<Value> {
    serde_json::from_str(text).map_err(|source| StorageError::Corrupted { id, field, source })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn snapshot() -> GameSnapshot {
        GameSnapshot::new(
            json!({"x": 1, "y": 2}),
            json!(["sword", {"name": "potion", "count": 3}]),
            json!({"step": 1, "flags": [true, false, null]}),
            json!({"town": 0, "pirates": -12.5}),
            None,
        )
    }

    #[test]
    fn encodes_each_field_as_standalone_json() {
        let encoded = encode_snapshot(&snapshot()).unwrap();
        assert_eq!(encoded.player_position, r#"{"x":1,"y":2}"#);
        assert_eq!(encoded.echo_crystals, "[]");
    }

    #[test]
    fn decoding_restores_the_submitted_values() {
        let original = snapshot();
        let stored = StoredGameState {
            id: RecordId::new(4),
            state: encode_snapshot(&original).unwrap(),
        };

        let record = decode_state(stored).unwrap();
        assert_eq!(record.id, RecordId::new(4));
        assert_eq!(record.snapshot, original);
    }

    #[test]
    fn corrupted_column_names_the_field() {
        let mut state = encode_snapshot(&snapshot()).unwrap();
        state.quest_progress = "{not json".into();

        let err = decode_state(StoredGameState {
            id: RecordId::new(9),
            state,
        })
        .unwrap_err();

        match err {
            StorageError::Corrupted { id, field, .. } => {
                assert_eq!(id, RecordId::new(9));
                assert_eq!(field, "questProgress");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
