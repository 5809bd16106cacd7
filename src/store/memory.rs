use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::models::{Task, TaskShare, Team, User};
use crate::store::{Store, StoreError};

#[derive(Default)]
struct Inner {
    users: HashMap<String, User>,
    tasks: HashMap<String, Task>,
    /// Keyed by (task_id, grantee_id) so the one-share-per-pair invariant
    /// holds by construction.
    shares: HashMap<(String, String), TaskShare>,
    teams: HashMap<String, Team>,
}

/// Map-backed store. Used by the test suite and by `STORE_BACKEND=memory`.
/// Multi-step operations run under a single lock, so create-with-shares
/// and delete-with-shares are atomic here.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_user(&self, user: &User) -> Result<(), StoreError> {
        let mut inner = self.inner.write().unwrap();
        inner.users.insert(user.user_id.clone(), user.clone());
        Ok(())
    }

    async fn find_user(&self, user_id: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().unwrap();
        Ok(inner.users.get(user_id).cloned())
    }

    async fn find_user_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().unwrap();
        Ok(inner
            .users
            .values()
            .find(|u| u.external_id == external_id)
            .cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().unwrap();
        Ok(inner.users.values().find(|u| u.email == email).cloned())
    }

    async fn update_user_profile(
        &self,
        user_id: &str,
        display_name: &str,
        photo_url: Option<&str>,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.write().unwrap();
        if let Some(user) = inner.users.get_mut(user_id) {
            user.display_name = display_name.to_string();
            user.photo_url = photo_url.map(String::from);
        }
        Ok(())
    }

    async fn create_task(&self, task: &Task, shares: &[TaskShare]) -> Result<(), StoreError> {
        let mut inner = self.inner.write().unwrap();
        inner.tasks.insert(task.task_id.clone(), task.clone());
        for share in shares {
            inner.shares.insert(
                (share.task_id.clone(), share.grantee_id.clone()),
                share.clone(),
            );
        }
        Ok(())
    }

    async fn find_task(&self, task_id: &str) -> Result<Option<Task>, StoreError> {
        let inner = self.inner.read().unwrap();
        Ok(inner.tasks.get(task_id).cloned())
    }

    async fn replace_task(&self, task: &Task) -> Result<(), StoreError> {
        let mut inner = self.inner.write().unwrap();
        inner.tasks.insert(task.task_id.clone(), task.clone());
        Ok(())
    }

    async fn delete_task_with_shares(&self, task_id: &str) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().unwrap();
        let existed = inner.tasks.remove(task_id).is_some();
        inner.shares.retain(|(tid, _), _| tid != task_id);
        Ok(existed)
    }

    async fn tasks_visible_to(&self, user_id: &str) -> Result<Vec<Task>, StoreError> {
        let inner = self.inner.read().unwrap();
        let mut tasks: Vec<Task> = inner
            .tasks
            .values()
            .filter(|t| t.created_by == user_id)
            .cloned()
            .collect();
        for ((task_id, grantee_id), _) in inner.shares.iter() {
            if grantee_id == user_id {
                if let Some(task) = inner.tasks.get(task_id) {
                    // Owned tasks are already collected; a share granted
                    // back to the owner must not emit the task twice.
                    if task.created_by != user_id {
                        tasks.push(task.clone());
                    }
                }
            }
        }
        Ok(tasks)
    }

    async fn upsert_share(&self, share: &TaskShare) -> Result<(), StoreError> {
        let mut inner = self.inner.write().unwrap();
        let key = (share.task_id.clone(), share.grantee_id.clone());
        match inner.shares.get_mut(&key) {
            Some(existing) => {
                existing.permission = share.permission;
                existing.granter_id = share.granter_id.clone();
            }
            None => {
                inner.shares.insert(key, share.clone());
            }
        }
        Ok(())
    }

    async fn delete_share(&self, task_id: &str, grantee_id: &str) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().unwrap();
        let key = (task_id.to_string(), grantee_id.to_string());
        Ok(inner.shares.remove(&key).is_some())
    }

    async fn shares_for_task(&self, task_id: &str) -> Result<Vec<TaskShare>, StoreError> {
        let inner = self.inner.read().unwrap();
        Ok(inner
            .shares
            .values()
            .filter(|s| s.task_id == task_id)
            .cloned()
            .collect())
    }

    async fn insert_team(&self, team: &Team) -> Result<(), StoreError> {
        let mut inner = self.inner.write().unwrap();
        inner.teams.insert(team.team_id.clone(), team.clone());
        Ok(())
    }

    async fn find_team(&self, team_id: &str) -> Result<Option<Team>, StoreError> {
        let inner = self.inner.read().unwrap();
        Ok(inner.teams.get(team_id).cloned())
    }

    async fn replace_team(&self, team: &Team) -> Result<(), StoreError> {
        let mut inner = self.inner.write().unwrap();
        inner.teams.insert(team.team_id.clone(), team.clone());
        Ok(())
    }

    async fn delete_team(&self, team_id: &str) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().unwrap();
        Ok(inner.teams.remove(team_id).is_some())
    }

    async fn teams_created_by(&self, user_id: &str) -> Result<Vec<Team>, StoreError> {
        let inner = self.inner.read().unwrap();
        Ok(inner
            .teams
            .values()
            .filter(|t| t.created_by == user_id)
            .cloned()
            .collect())
    }
}
