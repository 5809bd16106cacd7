use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::share::SharePermission;
use crate::models::team::TeamInfo;
use crate::models::user::CreatorInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Completed,
}

impl TaskStatus {
    /// Parses a filter parameter. `None` for unrecognized values.
    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "todo" => Some(TaskStatus::Todo),
            "in-progress" => Some(TaskStatus::InProgress),
            "completed" => Some(TaskStatus::Completed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "low" => Some(TaskPriority::Low),
            "medium" => Some(TaskPriority::Medium),
            "high" => Some(TaskPriority::High),
            _ => None,
        }
    }
}

/// A unit of work. Owned exclusively by its creator; visible to the owner
/// and to share grantees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub task_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<DateTime<Utc>>,
    /// Absent means a personal task.
    pub team_id: Option<String>,
    /// Owner; immutable after creation.
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Non-null iff `status == Completed`.
    pub completed_at: Option<DateTime<Utc>>,
}

/// Request payload for creating a task.
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<DateTime<Utc>>,
    pub team_id: Option<String>,
    /// Grantee emails given an `edit` share at creation time. Emails that
    /// resolve to no account, or to the owner, are skipped silently.
    pub shared_with: Option<Vec<String>>,
}

/// Distinguishes an absent field from an explicit null: absent means
/// "leave unchanged", null means "clear".
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Request payload for updating a task. Only supplied fields are applied;
/// the owner cannot be changed. `due_date` and `team_id` accept an
/// explicit null to clear the value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    #[serde(default, deserialize_with = "double_option")]
    pub due_date: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "double_option")]
    pub team_id: Option<Option<String>>,
}

/// Raw query-string filters, all optional and conjunctive. `status` and
/// `priority` accept the sentinel "all" to disable the filter.
#[derive(Debug, Default, Deserialize)]
pub struct TaskFilters {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub team_id: Option<String>,
    pub search: Option<String>,
    /// "today" or "overdue".
    pub due_date: Option<String>,
}

/// A share grantee with display data, as attached during enrichment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GranteeInfo {
    pub user_id: String,
    pub display_name: String,
    pub email: String,
    pub photo_url: Option<String>,
    pub permission: SharePermission,
}

/// A task with display data attached: creator profile, current grantees,
/// and team label when one is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedTask {
    #[serde(flatten)]
    pub task: Task,
    pub creator: CreatorInfo,
    pub shared_with: Vec<GranteeInfo>,
    pub team: Option<TeamInfo>,
}
