use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SyncError;

/// One user as served by the snapshot endpoint.
///
/// Only `id`, `initials` and `lastLogin` are required; the rest is optional
/// and unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    pub initials: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<u32>,
    pub last_login: DateTime<Utc>,
    /// Rank 1 is drawn as the featured hot-air balloon
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
}

impl UserRecord {
    pub fn new(id: impl Into<String>, initials: impl Into<String>, last_login: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            initials: initials.into(),
            name: None,
            team: None,
            last_login,
            rank: None,
        }
    }
}

/// Decode a full snapshot body (a JSON array of user records).
pub fn parse_snapshot(body: &str) -> Result<Vec<UserRecord>, SyncError> {
    Ok(serde_json::from_str(body)?)
}
