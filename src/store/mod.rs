pub mod memory;
pub mod mongo;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Task, TaskShare, Team, User};

pub use memory::MemoryStore;
pub use mongo::MongoStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] mongodb::bson::ser::Error),
}

/// The persistence boundary. Every operation the engines need is declared
/// here so the service can run against MongoDB in production and against
/// an in-memory map store in tests, selected at startup.
#[async_trait]
pub trait Store: Send + Sync {
    // ── users ──────────────────────────────────────────────────────────
    async fn insert_user(&self, user: &User) -> Result<(), StoreError>;
    async fn find_user(&self, user_id: &str) -> Result<Option<User>, StoreError>;
    async fn find_user_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<User>, StoreError>;
    /// Lookup by lowercased email.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    async fn update_user_profile(
        &self,
        user_id: &str,
        display_name: &str,
        photo_url: Option<&str>,
    ) -> Result<(), StoreError>;

    // ── tasks ──────────────────────────────────────────────────────────
    /// Inserts a task together with its initial shares as one unit.
    async fn create_task(&self, task: &Task, shares: &[TaskShare]) -> Result<(), StoreError>;
    async fn find_task(&self, task_id: &str) -> Result<Option<Task>, StoreError>;
    async fn replace_task(&self, task: &Task) -> Result<(), StoreError>;
    /// Deletes a task and all of its shares as one unit. Returns whether
    /// the task existed.
    async fn delete_task_with_shares(&self, task_id: &str) -> Result<bool, StoreError>;
    /// Tasks owned by the user plus tasks shared with them.
    async fn tasks_visible_to(&self, user_id: &str) -> Result<Vec<Task>, StoreError>;

    // ── shares ─────────────────────────────────────────────────────────
    /// Inserts, or updates permission and granter in place when a share
    /// for (task_id, grantee_id) already exists.
    async fn upsert_share(&self, share: &TaskShare) -> Result<(), StoreError>;
    /// Returns whether a share was actually removed.
    async fn delete_share(&self, task_id: &str, grantee_id: &str) -> Result<bool, StoreError>;
    async fn shares_for_task(&self, task_id: &str) -> Result<Vec<TaskShare>, StoreError>;

    // ── teams ──────────────────────────────────────────────────────────
    async fn insert_team(&self, team: &Team) -> Result<(), StoreError>;
    async fn find_team(&self, team_id: &str) -> Result<Option<Team>, StoreError>;
    async fn replace_team(&self, team: &Team) -> Result<(), StoreError>;
    async fn delete_team(&self, team_id: &str) -> Result<bool, StoreError>;
    async fn teams_created_by(&self, user_id: &str) -> Result<Vec<Team>, StoreError>;
}
