//! Statistics calculation engine.
//!
//! Computes derived metrics from a raw Duels stats record:
//! - Division resolution from title-prestige counters
//! - Kill/death totals across modes
//! - Win/loss, kill/death and accuracy ratios
//! - Most-played mode selection and the per-mode table
//!
//! Every function here is total: missing data resolves to a sentinel.

mod roman;

pub use roman::romanize;

use crate::lookup;
use crate::models::record::{default_zero, field, field_key, has_field, keys};
use crate::models::{
    DerivedStats, Division, DivisionDescriptor, DuelsReport, KillDeathTotals, ModeDescriptor,
    ModeRow, StatsRecord, StatsSchema, NO_MODE,
};

/// Resolve the highest division whose title-prestige key is present.
pub fn resolve_division(record: &StatsRecord, divisions: &[DivisionDescriptor]) -> Division {
    for division in divisions.iter().rev() {
        let key = keys::title_prestige(&division.name);
        if record.contains(&key) {
            let numeral = romanize(default_zero(record.get(&key)));
            let label = if numeral.is_empty() {
                division.name.clone()
            } else {
                format!("{} {}", division.name, numeral)
            };
            return Division {
                label,
                color: division.color.clone(),
            };
        }
    }

    Division::none()
}

/// Sum every per-mode kill and death counter, skipping Bridge modes.
///
/// The bare `kills`/`deaths` keys are skipped too. A key that matches the
/// deaths rule is never also counted as kills.
pub fn aggregate_kills_deaths(record: &StatsRecord) -> KillDeathTotals {
    let mut totals = KillDeathTotals::default();

    for (key, value) in record.iter() {
        if key.contains("bridge") {
            continue;
        }
        if key.contains(keys::DEATHS) && key != keys::DEATHS {
            totals.deaths = totals.deaths.saturating_add(default_zero(Some(value)));
        } else if key.contains(keys::KILLS) && key != keys::KILLS {
            totals.kills = totals.kills.saturating_add(default_zero(Some(value)));
        }
    }

    totals
}

/// Ratio for display. A zero denominator returns the numerator itself.
///
/// Absent operands are read as 0 through [`default_zero`] before they get here.
pub fn compute_ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        numerator as f64
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Ratio of two prefixed fields, `None` when neither is in the record.
pub fn ratio_of(
    record: &StatsRecord,
    prefix: &str,
    numerator: &str,
    denominator: &str,
) -> Option<f64> {
    if !has_field(record, prefix, numerator) && !has_field(record, prefix, denominator) {
        return None;
    }
    Some(compute_ratio(
        field(record, prefix, numerator),
        field(record, prefix, denominator),
    ))
}

/// Total games (wins + losses) of one mode.
pub fn mode_plays(record: &StatsRecord, mode: &ModeDescriptor) -> u64 {
    field(record, &mode.key_prefix, keys::WINS)
        .saturating_add(field(record, &mode.key_prefix, keys::LOSSES))
}

/// Display name of the mode with the most games, or [`NO_MODE`].
///
/// Ties keep the earlier mode. The overall row is never a candidate.
pub fn select_most_played(record: &StatsRecord, modes: &[ModeDescriptor]) -> String {
    lookup::most_played(modes, |mode| mode_plays(record, mode))
        .map(|mode| mode.display_name.clone())
        .unwrap_or_else(|| NO_MODE.to_string())
}

/// Derive the dashboard summary from a record.
pub fn derive_stats(record: &StatsRecord, schema: &StatsSchema) -> DerivedStats {
    let division = resolve_division(record, &schema.divisions);
    let totals = aggregate_kills_deaths(record);
    let most_played = select_most_played(record, &schema.modes);

    tracing::debug!(
        "Derived {} stats from {} fields: division={}, most_played={}",
        schema.title,
        record.len(),
        division.label,
        most_played
    );

    DerivedStats {
        division_label: division.label,
        division_color: division.color,
        total_kills: totals.kills,
        total_deaths: totals.deaths,
        kill_death_ratio: Some(compute_ratio(totals.kills, totals.deaths)),
        win_loss_ratio: ratio_of(record, "", keys::WINS, keys::LOSSES),
        melee_accuracy: ratio_of(record, "", keys::MELEE_HITS, keys::MELEE_SWINGS),
        arrow_accuracy: ratio_of(record, "", keys::BOW_HITS, keys::BOW_SHOTS),
        most_played_mode_name: most_played,
    }
}

/// Table rows for every mode with at least one game, in schema order.
pub fn mode_rows(record: &StatsRecord, schema: &StatsSchema, most_played: &str) -> Vec<ModeRow> {
    schema
        .modes
        .iter()
        .filter(|mode| mode_plays(record, mode) > 0)
        .map(|mode| {
            let prefix = mode.key_prefix.as_str();
            let count = |suffix: &str| record.count(&field_key(prefix, suffix));
            ModeRow {
                key_prefix: mode.key_prefix.clone(),
                name: mode.display_name.clone(),
                kills: count(keys::KILLS),
                deaths: count(keys::DEATHS),
                kill_death_ratio: ratio_of(record, prefix, keys::KILLS, keys::DEATHS),
                wins: count(keys::WINS),
                losses: count(keys::LOSSES),
                win_loss_ratio: ratio_of(record, prefix, keys::WINS, keys::LOSSES),
                melee_accuracy: ratio_of(record, prefix, keys::MELEE_HITS, keys::MELEE_SWINGS),
                arrow_accuracy: ratio_of(record, prefix, keys::BOW_HITS, keys::BOW_SHOTS),
                highlighted: mode.display_name == most_played,
            }
        })
        .collect()
}

/// Summary and table together.
pub fn build_report(record: &StatsRecord, schema: &StatsSchema) -> DuelsReport {
    let stats = derive_stats(record, schema);
    let modes = mode_rows(record, schema, &stats.most_played_mode_name);
    DuelsReport { stats, modes }
}
