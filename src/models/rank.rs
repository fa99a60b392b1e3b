//! Player and guild rank models.

use serde::{Deserialize, Serialize};

/// Rank id of a player without any purchased or staff rank.
pub const NO_RANK: &str = "NONE";

/// The rank fields of a `player` object, in lookup priority order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRankFields {
    /// Staff rank (ADMIN, MODERATOR, ...)
    #[serde(default)]
    pub rank: Option<String>,
    #[serde(default)]
    pub monthly_package_rank: Option<String>,
    #[serde(default)]
    pub new_package_rank: Option<String>,
    #[serde(default)]
    pub package_rank: Option<String>,
}

/// A rank defined by a guild.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildRank {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    /// Higher is more senior
    pub priority: i64,
}

/// An entry of a guild's `members` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildMember {
    pub rank: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
}
