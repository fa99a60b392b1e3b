//! Dashboard view model.
//!
//! Lays derived stats out as an accordion: a header of summary boxes, two
//! columns of labelled stat pairs and a per-mode table. A record with no
//! data collapses to the title alone.

use serde::{Deserialize, Serialize};

use crate::calculate;
use crate::models::record::keys;
use crate::models::{DuelsReport, ModeRow, StatsRecord, StatsSchema};

/// Placeholder for a value that is not in the record.
pub const ABSENT: &str = "-";

/// Color applied to the most-played mode name.
const MODE_COLOR: &str = "white";

/// Color applied to the "no mode" placeholder.
const NO_MODE_COLOR: &str = "gray";

/// A titled summary box in the accordion header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderBox {
    pub title: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// A labelled value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatPair {
    pub title: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// An entry of a stat column. Spacers separate groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnEntry {
    Pair(StatPair),
    Spacer,
}

/// A row of the per-mode table, already formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub id: String,
    pub cells: Vec<String>,
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeTable {
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
}

/// Expanded accordion content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccordionBody {
    pub left: Vec<ColumnEntry>,
    pub right: Vec<ColumnEntry>,
    pub table: ModeTable,
}

/// The whole stats card. `header` and `body` are absent for an empty record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Accordion {
    pub title: String,
    pub header: Option<Vec<HeaderBox>>,
    pub body: Option<AccordionBody>,
}

const TABLE_COLUMNS: [&str; 9] = [
    "Mode", "Kills", "Deaths", "KD", "Wins", "Losses", "WL", "Melee HM", "Arrow HM",
];

/// Build the accordion for a record.
pub fn build_view(record: &StatsRecord, schema: &StatsSchema) -> Accordion {
    if record.is_empty() {
        return Accordion {
            title: schema.title.clone(),
            header: None,
            body: None,
        };
    }

    let report = calculate::build_report(record, schema);
    Accordion {
        title: schema.title.clone(),
        header: Some(header(record, &report)),
        body: Some(body(record, &report)),
    }
}

fn header(record: &StatsRecord, report: &DuelsReport) -> Vec<HeaderBox> {
    let stats = &report.stats;
    let mode_color = if stats.has_most_played() {
        MODE_COLOR
    } else {
        NO_MODE_COLOR
    };

    vec![
        HeaderBox {
            title: "Division".to_string(),
            value: stats.division_label.clone(),
            color: Some(stats.division_color.clone()),
        },
        HeaderBox {
            title: "Wins".to_string(),
            value: format_count(record.count(keys::WINS)),
            color: None,
        },
        HeaderBox {
            title: "WL".to_string(),
            value: format_ratio(stats.win_loss_ratio),
            color: None,
        },
        HeaderBox {
            title: "Most Played".to_string(),
            value: stats.most_played_mode_name.clone(),
            color: Some(mode_color.to_string()),
        },
    ]
}

fn body(record: &StatsRecord, report: &DuelsReport) -> AccordionBody {
    let stats = &report.stats;
    let count = |key: &str| format_count(record.count(key));

    let left = vec![
        pair_colored("Coins", count(keys::COINS), "gold"),
        pair("Loot Chests", count(keys::CHESTS)),
        ColumnEntry::Spacer,
        ColumnEntry::Spacer,
        pair("Kills", format_count(Some(stats.total_kills))),
        pair("Deaths", format_count(Some(stats.total_deaths))),
        pair("Kill/Death Ratio", format_ratio(stats.kill_death_ratio)),
        ColumnEntry::Spacer,
        pair("Melee Swings", count(keys::MELEE_SWINGS)),
        pair("Melee Hits", count(keys::MELEE_HITS)),
        pair("Melee Hit Accuracy", format_percentage(stats.melee_accuracy)),
    ];

    let right = vec![
        pair("Best Winstreak", count(keys::BEST_WINSTREAK)),
        pair("Current Winstreak", count(keys::CURRENT_WINSTREAK)),
        pair_colored(
            "Overall Division",
            stats.division_label.clone(),
            &stats.division_color,
        ),
        ColumnEntry::Spacer,
        pair("Wins", count(keys::WINS)),
        pair("Losses", count(keys::LOSSES)),
        pair("Win/Loss Ratio", format_ratio(stats.win_loss_ratio)),
        ColumnEntry::Spacer,
        pair("Arrows Shot", count(keys::BOW_SHOTS)),
        pair("Arrows Hit", count(keys::BOW_HITS)),
        pair("Arrow Hit Accuracy", format_percentage(stats.arrow_accuracy)),
    ];

    AccordionBody {
        left,
        right,
        table: ModeTable {
            columns: TABLE_COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows: report.modes.iter().map(table_row).collect(),
        },
    }
}

fn table_row(row: &ModeRow) -> TableRow {
    TableRow {
        id: row.key_prefix.clone(),
        cells: vec![
            row.name.clone(),
            format_count(row.kills),
            format_count(row.deaths),
            format_ratio(row.kill_death_ratio),
            format_count(row.wins),
            format_count(row.losses),
            format_ratio(row.win_loss_ratio),
            format_ratio(row.melee_accuracy),
            format_ratio(row.arrow_accuracy),
        ],
        highlighted: row.highlighted,
    }
}

fn pair(title: &str, value: String) -> ColumnEntry {
    ColumnEntry::Pair(StatPair {
        title: title.to_string(),
        value,
        color: None,
    })
}

fn pair_colored(title: &str, value: String, color: &str) -> ColumnEntry {
    ColumnEntry::Pair(StatPair {
        title: title.to_string(),
        value,
        color: Some(color.to_string()),
    })
}

/// Counter with thousands separators.
pub fn format_count(value: Option<u64>) -> String {
    let Some(value) = value else {
        return ABSENT.to_string();
    };

    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Ratio rounded to two decimals.
pub fn format_ratio(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => ABSENT.to_string(),
    }
}

/// Fraction shown as a percentage with two decimals.
pub fn format_percentage(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}%", v * 100.0),
        None => ABSENT.to_string(),
    }
}

/// Render the accordion as plain text.
pub fn render_text(view: &Accordion) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== {} ===\n", view.title));

    if let Some(header) = &view.header {
        let line = header
            .iter()
            .map(|b| format!("{}: {}", b.title, b.value))
            .collect::<Vec<_>>()
            .join(" | ");
        out.push_str(&line);
        out.push('\n');
    }

    let Some(body) = &view.body else {
        return out;
    };

    out.push('\n');
    let rows = body.left.len().max(body.right.len());
    for i in 0..rows {
        let left = body.left.get(i).map(column_text).unwrap_or_default();
        let right = body.right.get(i).map(column_text).unwrap_or_default();
        let line = format!("{:<40}{}", left, right);
        out.push_str(line.trim_end());
        out.push('\n');
    }

    if !body.table.rows.is_empty() {
        out.push('\n');
        let mut widths: Vec<usize> = body.table.columns.iter().map(|c| c.len()).collect();
        for row in &body.table.rows {
            for (w, cell) in widths.iter_mut().zip(&row.cells) {
                *w = (*w).max(cell.chars().count());
            }
        }

        out.push_str(&format!("  {}\n", table_line(&body.table.columns, &widths)));
        for row in &body.table.rows {
            let marker = if row.highlighted { "* " } else { "  " };
            out.push_str(&format!("{}{}\n", marker, table_line(&row.cells, &widths)));
        }
    }

    out
}

fn column_text(entry: &ColumnEntry) -> String {
    match entry {
        ColumnEntry::Pair(p) => format!("{}: {}", p.title, p.value),
        ColumnEntry::Spacer => String::new(),
    }
}

fn table_line(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample() -> StatsRecord {
        StatsRecord::from_value(json!({
            "coins": 125000,
            "wins": 1500,
            "losses": 500,
            "melee_hits": 300,
            "melee_swings": 1200,
            "sumo_duel_wins": 1000,
            "sumo_duel_losses": 300,
            "sumo_duel_kills": 1000,
            "sumo_duel_deaths": 300,
            "classic_duel_wins": 500,
            "classic_duel_losses": 200,
            "all_modes_gold_title_prestige": 2,
        }))
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(None), "-");
        assert_eq!(format_count(Some(0)), "0");
        assert_eq!(format_count(Some(999)), "999");
        assert_eq!(format_count(Some(1000)), "1,000");
        assert_eq!(format_count(Some(1234567)), "1,234,567");
    }

    #[test]
    fn test_format_ratio_and_percentage() {
        assert_eq!(format_ratio(Some(2.5)), "2.50");
        assert_eq!(format_ratio(Some(1.0 / 3.0)), "0.33");
        assert_eq!(format_ratio(None), "-");
        assert_eq!(format_percentage(Some(0.25)), "25.00%");
        assert_eq!(format_percentage(None), "-");
    }

    #[test]
    fn test_empty_record_is_title_only() {
        let view = build_view(&StatsRecord::default(), &StatsSchema::builtin());
        assert_eq!(view.title, "Duels");
        assert!(view.header.is_none());
        assert!(view.body.is_none());
        assert_eq!(render_text(&view), "=== Duels ===\n");
    }

    #[test]
    fn test_header_boxes() {
        let view = build_view(&sample(), &StatsSchema::builtin());
        let header = view.header.unwrap();

        assert_eq!(
            header[0],
            HeaderBox {
                title: "Division".to_string(),
                value: "Gold II".to_string(),
                color: Some("gold".to_string()),
            }
        );
        assert_eq!(header[1].value, "1,500");
        assert_eq!(header[2].value, "3.00");
        assert_eq!(header[3].value, "Sumo 1v1");
        assert_eq!(header[3].color.as_deref(), Some("white"));
    }

    #[test]
    fn test_no_mode_is_gray() {
        let record = StatsRecord::from_value(json!({"coins": 10}));
        let view = build_view(&record, &StatsSchema::builtin());
        let header = view.header.unwrap();

        assert_eq!(header[3].value, "-");
        assert_eq!(header[3].color.as_deref(), Some("gray"));
        assert!(view.body.unwrap().table.rows.is_empty());
    }

    #[test]
    fn test_body_columns() {
        let view = build_view(&sample(), &StatsSchema::builtin());
        let body = view.body.unwrap();

        assert_eq!(body.left.len(), 11);
        assert_eq!(body.right.len(), 11);
        assert_eq!(
            body.left[0],
            ColumnEntry::Pair(StatPair {
                title: "Coins".to_string(),
                value: "125,000".to_string(),
                color: Some("gold".to_string()),
            })
        );
        assert_eq!(body.left[1], pair("Loot Chests", "-".to_string()));
        assert_eq!(body.left[2], ColumnEntry::Spacer);
        assert_eq!(body.left[10], pair("Melee Hit Accuracy", "25.00%".to_string()));
        assert_eq!(body.right[10], pair("Arrow Hit Accuracy", "-".to_string()));
    }

    #[test]
    fn test_table_rows() {
        let view = build_view(&sample(), &StatsSchema::builtin());
        let table = view.body.unwrap().table;

        assert_eq!(table.columns.len(), 9);
        let ids: Vec<&str> = table.rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["sumo_duel_", "classic_duel_", ""]);

        let sumo = &table.rows[0];
        assert!(sumo.highlighted);
        assert_eq!(
            sumo.cells,
            vec!["Sumo 1v1", "1,000", "300", "3.33", "1,000", "300", "3.33", "-", "-"]
        );
    }

    #[test]
    fn test_render_text() {
        let view = build_view(&sample(), &StatsSchema::builtin());
        let text = render_text(&view);

        assert!(text.starts_with("=== Duels ===\n"));
        assert!(text.contains("Division: Gold II | Wins: 1,500 | WL: 3.00 | Most Played: Sumo 1v1"));
        assert!(text.contains("Coins: 125,000"));
        assert!(text.contains("* Sumo 1v1"));
        assert!(text.contains("  Classic 1v1"));
    }

    #[test]
    fn test_view_serialization() {
        let view = build_view(&sample(), &StatsSchema::builtin());
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["title"], "Duels");
        assert_eq!(json["body"]["left"][2]["kind"], "spacer");
        assert_eq!(json["body"]["left"][0]["kind"], "pair");
        assert_eq!(json["body"]["left"][0]["title"], "Coins");
    }
}
