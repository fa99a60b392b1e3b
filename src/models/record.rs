//! Raw stats record as returned by the upstream game API.
//!
//! The upstream schema is a flat object whose keys are a mode prefix
//! concatenated with a fixed suffix (`sumo_duel_` + `wins`). All key
//! construction goes through [`field`] so the convention lives in one place.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field suffixes of the upstream key vocabulary.
pub mod keys {
    pub const WINS: &str = "wins";
    pub const LOSSES: &str = "losses";
    pub const KILLS: &str = "kills";
    pub const DEATHS: &str = "deaths";
    pub const MELEE_HITS: &str = "melee_hits";
    pub const MELEE_SWINGS: &str = "melee_swings";
    pub const BOW_HITS: &str = "bow_hits";
    pub const BOW_SHOTS: &str = "bow_shots";

    pub const COINS: &str = "coins";
    pub const CHESTS: &str = "duels_chests";
    pub const BEST_WINSTREAK: &str = "best_overall_winstreak";
    pub const CURRENT_WINSTREAK: &str = "current_winstreak";

    /// Key holding the prestige counter for a division, e.g.
    /// `all_modes_gold_title_prestige`.
    pub fn title_prestige(division_name: &str) -> String {
        format!("all_modes_{}_title_prestige", division_name.to_lowercase())
    }
}

/// A flat key-value stats object. Never mutated after construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatsRecord(Map<String, Value>);

impl StatsRecord {
    pub fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Build a record from any JSON document.
    ///
    /// `null` and non-object documents become an empty record.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            Value::Null => Self::default(),
            other => {
                tracing::warn!(
                    "Expected a JSON object for stats record, got {}; treating as empty",
                    json_kind(&other)
                );
                Self::default()
            }
        }
    }

    /// Build a record from the object found at a dotted path, e.g.
    /// `player.stats.Duels`. A missing path yields an empty record.
    pub fn from_path(value: &Value, path: &str) -> Self {
        match traverse(value, path) {
            Some(found) => Self::from_value(found.clone()),
            None => {
                tracing::debug!("No stats found at path {}", path);
                Self::default()
            }
        }
    }

    /// Pick the stats record out of a posted document.
    ///
    /// An explicit `path` always wins. Without one, a full player response
    /// (top-level `player` key) is read at `default_path` and anything else
    /// is taken as the stats object itself.
    pub fn from_document(value: Value, path: Option<&str>, default_path: &str) -> Self {
        match path {
            Some(path) => Self::from_path(&value, path),
            None if value.get("player").is_some_and(Value::is_object) => {
                Self::from_path(&value, default_path)
            }
            None => Self::from_value(value),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Whether the key exists at all. A present `null` counts as present.
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Counter value of a top-level key, absent as `None`.
    pub fn count(&self, key: &str) -> Option<u64> {
        self.get(key).map(|v| default_zero(Some(v)))
    }
}

impl From<Map<String, Value>> for StatsRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Coerce a stat value to a counter. Anything that is not a finite,
/// non-negative number reads as 0.
pub fn default_zero(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::Number(n)) => {
            if let Some(u) = n.as_u64() {
                u
            } else {
                match n.as_f64() {
                    Some(f) if f.is_finite() && f > 0.0 => f.round() as u64,
                    _ => 0,
                }
            }
        }
        _ => 0,
    }
}

/// Read `<prefix><suffix>` from the record as a counter.
pub fn field(record: &StatsRecord, prefix: &str, suffix: &str) -> u64 {
    default_zero(record.get(&field_key(prefix, suffix)))
}

/// Whether `<prefix><suffix>` is present in the record.
pub fn has_field(record: &StatsRecord, prefix: &str, suffix: &str) -> bool {
    record.contains(&field_key(prefix, suffix))
}

pub fn field_key(prefix: &str, suffix: &str) -> String {
    format!("{prefix}{suffix}")
}

/// Follow a dotted path through nested objects.
pub fn traverse<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(value);
    }
    path.split('.')
        .try_fold(value, |current, segment| current.as_object()?.get(segment))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
