use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Permission level granted by a share. `Admin` carries no extra
/// capability over `Edit` in the core logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SharePermission {
    View,
    Edit,
    Admin,
}

impl SharePermission {
    pub fn allows_mutation(self) -> bool {
        matches!(self, SharePermission::Edit | SharePermission::Admin)
    }
}

/// A grant of access on a task. At most one share exists per
/// (task_id, grantee_id) pair; re-sharing updates the permission in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskShare {
    pub share_id: String,
    pub task_id: String,
    pub grantee_id: String,
    pub granter_id: String,
    pub permission: SharePermission,
    pub created_at: DateTime<Utc>,
}

/// Request payload for sharing a task by email.
#[derive(Debug, Deserialize)]
pub struct ShareTaskRequest {
    pub email: String,
    pub permission: Option<SharePermission>,
}
