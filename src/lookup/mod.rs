//! Lookup helpers shared across the player page.
//!
//! - Player rank resolution from the `player` object
//! - Generic most-played selection over any list of game modes
//! - Guild member rank resolution

use serde_json::Value;

use crate::models::{GuildMember, GuildRank, ModeDescriptor, PlayerRankFields, NO_RANK};

/// Ranks that mean "no rank" in the upstream API.
const PLACEHOLDER_RANKS: [&str; 2] = ["NONE", "NORMAL"];

/// Something that can be picked as the most played entry.
///
/// Entries with an empty id are aggregates and never picked.
pub trait ModeId {
    fn mode_id(&self) -> &str;
}

impl ModeId for ModeDescriptor {
    fn mode_id(&self) -> &str {
        &self.key_prefix
    }
}

/// The entry with the most plays. Ties keep the first entry; `None` when no
/// candidate has any plays.
pub fn most_played<'a, T, F>(items: &'a [T], plays: F) -> Option<&'a T>
where
    T: ModeId,
    F: Fn(&T) -> u64,
{
    let mut best: Option<&'a T> = None;
    let mut most_plays = 0;

    for item in items {
        if item.mode_id().is_empty() {
            continue;
        }
        let count = plays(item);
        if count > most_plays {
            most_plays = count;
            best = Some(item);
        }
    }

    best
}

/// Resolve the displayed rank id of a player, from `NONE` up to `ADMIN`.
pub fn player_rank(fields: &PlayerRankFields) -> String {
    [
        &fields.rank,
        &fields.monthly_package_rank,
        &fields.new_package_rank,
        &fields.package_rank,
    ]
    .into_iter()
    .flatten()
    .find(|rank| !PLACEHOLDER_RANKS.contains(&rank.as_str()))
    .cloned()
    .unwrap_or_else(|| NO_RANK.to_string())
}

/// [`player_rank`] over a raw `player` JSON object. Non-string rank fields are ignored.
pub fn player_rank_from_value(player: &Value) -> String {
    let text = |key: &str| player.get(key).and_then(Value::as_str).map(str::to_string);
    player_rank(&PlayerRankFields {
        rank: text("rank"),
        monthly_package_rank: text("monthlyPackageRank"),
        new_package_rank: text("newPackageRank"),
        package_rank: text("packageRank"),
    })
}

/// The `player` object of a full player response, or the document itself.
pub fn player_object(document: &Value) -> &Value {
    match document.get("player") {
        Some(player) if player.is_object() => player,
        _ => document,
    }
}

/// Resolve a member's rank against the guild's rank list.
pub fn guild_member_rank(member: &GuildMember, ranks: Option<&[GuildRank]>) -> GuildRank {
    if member.rank == "Guild Master" || member.rank == "GUILDMASTER" {
        return GuildRank {
            name: "Guild Master".to_string(),
            tag: Some("GM".to_string()),
            priority: 1000,
        };
    }

    let wanted = member.rank.to_lowercase();
    if let Some(rank) = ranks
        .unwrap_or_default()
        .iter()
        .find(|rank| rank.name.to_lowercase() == wanted)
    {
        return rank.clone();
    }

    GuildRank {
        name: capitalize(&member.rank),
        tag: None,
        priority: 999,
    }
}

/// Uppercase the first character and lowercase the rest.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
