//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// `GET /health` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponseDto {
    pub status: String,
    /// Number of live connections in the registry
    pub connected_users: usize,
    /// Process uptime in seconds
    pub uptime: f64,
}

/// Online user entry returned by `GET /api/online`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnlineUserDto {
    pub user_id: String,
    pub user_name: String,
    pub user_role: String,
    /// RFC 3339 (UTC)
    pub joined_at: String,
}
