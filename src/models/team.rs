use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A grouping label for tasks. Team membership never affects task
/// visibility; tasks reference a team purely for grouping and filtering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub team_id: String,
    pub name: String,
    /// Display color, hex string like "#ff8800".
    pub color: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTeamRequest {
    pub name: String,
    pub color: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTeamRequest {
    pub name: Option<String>,
    pub color: Option<String>,
}

/// Team display data attached to tasks during enrichment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamInfo {
    pub name: String,
    pub color: String,
}
