//! Derived statistics models.

use serde::{Deserialize, Serialize};

/// Division label shown when no prestige key is present.
pub const NO_DIVISION: &str = "-";

/// Color of [`NO_DIVISION`].
pub const NO_DIVISION_COLOR: &str = "gray";

/// Most-played mode shown when no mode has any plays.
pub const NO_MODE: &str = "-";

/// A resolved division.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Division {
    /// Name plus roman numeral, e.g. "Gold III"
    pub label: String,
    pub color: String,
}

impl Division {
    pub fn none() -> Self {
        Self {
            label: NO_DIVISION.to_string(),
            color: NO_DIVISION_COLOR.to_string(),
        }
    }

    pub fn is_none(&self) -> bool {
        self.label == NO_DIVISION
    }
}

/// Kill and death totals across every mode except Bridge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KillDeathTotals {
    pub kills: u64,
    pub deaths: u64,
}

/// Everything the dashboard derives from one stats record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedStats {
    pub division_label: String,
    pub division_color: String,

    pub total_kills: u64,
    pub total_deaths: u64,

    /// `None` when neither operand exists in the record
    pub kill_death_ratio: Option<f64>,
    pub win_loss_ratio: Option<f64>,

    /// Melee hits per swing
    pub melee_accuracy: Option<f64>,

    /// Arrow hits per shot
    pub arrow_accuracy: Option<f64>,

    pub most_played_mode_name: String,
}

impl DerivedStats {
    pub fn division(&self) -> Division {
        Division {
            label: self.division_label.clone(),
            color: self.division_color.clone(),
        }
    }

    pub fn has_most_played(&self) -> bool {
        self.most_played_mode_name != NO_MODE
    }
}

/// One row of the per-mode table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeRow {
    pub key_prefix: String,
    pub name: String,
    pub kills: Option<u64>,
    pub deaths: Option<u64>,
    pub kill_death_ratio: Option<f64>,
    pub wins: Option<u64>,
    pub losses: Option<u64>,
    pub win_loss_ratio: Option<f64>,
    pub melee_accuracy: Option<f64>,
    pub arrow_accuracy: Option<f64>,

    /// Set on the most-played mode's row
    pub highlighted: bool,
}

/// Derived stats plus the per-mode table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuelsReport {
    pub stats: DerivedStats,
    pub modes: Vec<ModeRow>,
}
