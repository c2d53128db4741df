//! Progress save format.
//!
//! The blob is a flat JSON object with the keys `score`, `level`, `rank`, `highScore` and
//! `unlockedRewards`. There is no version field and no migration: loading is field-by-field
//! and best-effort, so a missing or mistyped field falls back to its default while the rest
//! of the save survives. A blob that is not a JSON object at all loads as a fresh game.

use serde::Serialize;
use serde_json::{Map, Value};

use super::state::ProgressState;
use super::store::StoreError;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SaveData<'a> {
    score: u64,
    level: u32,
    rank: &'a str,
    high_score: u64,
    unlocked_rewards: &'a [String],
}

/// Encode all five progress fields.
pub fn serialize(state: &ProgressState) -> Result<String, StoreError> {
    let data = SaveData {
        score: state.score,
        level: state.level,
        rank: &state.rank,
        high_score: state.high_score,
        unlocked_rewards: &state.unlocked_rewards,
    };
    Ok(serde_json::to_string(&data)?)
}

/// Fields recovered from a save. `None` means absent or unusable.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PersistedFields {
    pub score: Option<u64>,
    pub level: Option<u32>,
    pub rank: Option<String>,
    pub high_score: Option<u64>,
    pub unlocked_rewards: Option<Vec<String>>,
}

impl PersistedFields {
    /// Fill the gaps with defaults. Always yields a valid state.
    pub fn into_state(self, default_rank: &str) -> ProgressState {
        let mut state = ProgressState::new(default_rank);
        if let Some(score) = self.score {
            state.score = score;
        }
        if let Some(level) = self.level {
            state.level = level;
        }
        if let Some(rank) = self.rank {
            state.rank = rank;
        }
        if let Some(high_score) = self.high_score {
            state.high_score = high_score;
        }
        if let Some(rewards) = self.unlocked_rewards {
            state.unlocked_rewards = rewards;
        }
        state.high_score = state.high_score.max(state.score);
        state
    }
}

/// Decode a save. Never fails; anything unreadable comes back as absent.
pub fn deserialize(blob: &str) -> PersistedFields {
    let object = match serde_json::from_str::<Value>(blob) {
        Ok(Value::Object(object)) => object,
        Ok(other) => {
            log::warn!("progress save is not an object ({}), ignoring it", kind(&other));
            return PersistedFields::default();
        }
        Err(e) => {
            log::warn!("progress save could not be parsed, ignoring it: {e}");
            return PersistedFields::default();
        }
    };

    PersistedFields {
        score: object.get("score").and_then(Value::as_u64),
        level: object
            .get("level")
            .and_then(Value::as_u64)
            .and_then(|l| u32::try_from(l).ok())
            .filter(|&l| l >= 1),
        rank: object
            .get("rank")
            .and_then(Value::as_str)
            .filter(|r| !r.is_empty())
            .map(str::to_string),
        high_score: object.get("highScore").and_then(Value::as_u64),
        unlocked_rewards: reward_ids(&object),
    }
}

/// All-or-nothing: one non-string entry discards the list.
fn reward_ids(object: &Map<String, Value>) -> Option<Vec<String>> {
    let items = object.get("unlockedRewards")?.as_array()?;
    let mut ids: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        let id = item.as_str()?;
        if !ids.iter().any(|seen| seen == id) {
            ids.push(id.to_string());
        }
    }
    Some(ids)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
