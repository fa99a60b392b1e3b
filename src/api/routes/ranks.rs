use axum::body::Bytes;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::routes::duels::parse_document;
use crate::api::ApiError;
use crate::lookup;
use crate::models::{GuildMember, GuildRank};

#[derive(Debug, Serialize)]
pub struct PlayerRankResponse {
    pub rank: String,
}

/// Resolve the rank of a posted `player` object or full player response.
pub async fn player_rank(body: Bytes) -> Result<Json<PlayerRankResponse>, ApiError> {
    let document = parse_document(&body)?;

    Ok(Json(PlayerRankResponse {
        rank: lookup::player_rank_from_value(lookup::player_object(&document)),
    }))
}

#[derive(Debug, Deserialize)]
pub struct GuildMemberRankRequest {
    pub member: GuildMember,
    #[serde(default)]
    pub ranks: Option<Vec<GuildRank>>,
}

pub async fn guild_member_rank(body: Bytes) -> Result<Json<GuildRank>, ApiError> {
    let document = parse_document(&body)?;
    let request: GuildMemberRankRequest = serde_json::from_value(document)
        .map_err(|e| ApiError::BadRequest(format!("Invalid guild member request: {}", e)))?;

    Ok(Json(lookup::guild_member_rank(
        &request.member,
        request.ranks.as_deref(),
    )))
}

#[cfg(test)]
mod tests {
    use crate::api::build_router;
    use crate::api::state::AppState;
    use crate::models::StatsSchema;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::util::ServiceExt;

    async fn post_json(uri: &str, body: &str) -> (StatusCode, Value) {
        let app = build_router(AppState::new(StatsSchema::builtin(), "player.stats.Duels", "*"));
        let resp = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_player_rank_endpoint() {
        let (status, json) = post_json(
            "/api/player/rank",
            r#"{"player": {"monthlyPackageRank": "NONE", "newPackageRank": "MVP_PLUS"}}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["rank"], "MVP_PLUS");
    }

    #[tokio::test]
    async fn test_player_rank_bare_object() {
        let (status, json) = post_json("/api/player/rank", r#"{"rank": "NORMAL"}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["rank"], "NONE");
    }

    #[tokio::test]
    async fn test_guild_member_rank_endpoint() {
        let body = r#"{
            "member": {"rank": "officer", "uuid": "abc"},
            "ranks": [{"name": "Officer", "tag": "OFC", "priority": 4}]
        }"#;
        let (status, json) = post_json("/api/guild/member-rank", body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["name"], "Officer");
        assert_eq!(json["tag"], "OFC");
        assert_eq!(json["priority"], 4);
    }

    #[tokio::test]
    async fn test_guild_member_rank_without_ranks() {
        let (status, json) =
            post_json("/api/guild/member-rank", r#"{"member": {"rank": "GUILDMASTER"}}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["name"], "Guild Master");
        assert_eq!(json["priority"], 1000);
    }

    #[tokio::test]
    async fn test_guild_member_rank_invalid_json() {
        let (status, json) = post_json("/api/guild/member-rank", "{not json").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_guild_member_rank_without_content_type() {
        let app = build_router(AppState::new(StatsSchema::builtin(), "player.stats.Duels", "*"));
        let resp = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/guild/member-rank")
                    .body(Body::from(r#"{"member": {"rank": "MEMBER"}}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["name"], "Member");
    }

    #[tokio::test]
    async fn test_guild_member_rank_bad_request() {
        let (status, json) = post_json("/api/guild/member-rank", r#"{"ranks": []}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }
}
