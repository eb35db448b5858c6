//! Request and response bodies of the scoreboard REST API.
//!
//! Field names follow the server's camelCase JSON.

use serde::{Deserialize, Serialize};

/// `POST /api/players/search`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub game_name: String,
}

/// `PUT /api/players/update-score`
///
/// Exactly one of `player_name` / `nickname` identifies the player,
/// selected by `display_type` (`0` name, `1` nickname).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScoreRequest {
    pub game_name: String,
    pub player_name: Option<String>,
    pub nickname: Option<String>,
    pub new_score: u32,
    pub display_type: u8,
}

/// `POST /api/players/add-member`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddMemberRequest {
    pub name: String,
    pub nickname: Option<String>,
    pub department: String,
}

/// `DELETE /api/players/delete-member`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteMemberRequest {
    pub name: String,
}

/// `POST /api/auth/login`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Error body some endpoints return alongside a non-2xx status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
}
