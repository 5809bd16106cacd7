use async_trait::async_trait;
use futures_util::StreamExt;
use mongodb::bson::{doc, to_bson, Bson, Document};
use mongodb::{options::ClientOptions, Client, Collection, Database};

use crate::models::{Task, TaskShare, Team, User};
use crate::store::{Store, StoreError};

/// MongoDB-backed store. Collections: `users`, `tasks`, `task_shares`,
/// `teams`.
pub struct MongoStore {
    pub client: Client,
    pub db: Database,
}

impl MongoStore {
    pub async fn init(uri: &str, db_name: &str) -> Self {
        let client_options = ClientOptions::parse(uri)
            .await
            .expect("Failed to parse MongoDB connection string");
        let client = Client::with_options(client_options).expect("Failed to initialize client");
        let db = client.database(db_name);
        MongoStore { client, db }
    }

    fn users(&self) -> Collection<User> {
        self.db.collection("users")
    }

    fn tasks(&self) -> Collection<Task> {
        self.db.collection("tasks")
    }

    fn shares(&self) -> Collection<TaskShare> {
        self.db.collection("task_shares")
    }

    fn teams(&self) -> Collection<Team> {
        self.db.collection("teams")
    }
}

async fn drain<T>(mut cursor: mongodb::Cursor<T>) -> Result<Vec<T>, StoreError>
where
    T: serde::de::DeserializeOwned + Send + Sync + Unpin,
{
    let mut items = Vec::new();
    while let Some(item) = cursor.next().await {
        items.push(item?);
    }
    Ok(items)
}

#[async_trait]
impl Store for MongoStore {
    async fn insert_user(&self, user: &User) -> Result<(), StoreError> {
        self.users().insert_one(user).await?;
        Ok(())
    }

    async fn find_user(&self, user_id: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users().find_one(doc! { "user_id": user_id }).await?)
    }

    async fn find_user_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<User>, StoreError> {
        Ok(self
            .users()
            .find_one(doc! { "external_id": external_id })
            .await?)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users().find_one(doc! { "email": email }).await?)
    }

    async fn update_user_profile(
        &self,
        user_id: &str,
        display_name: &str,
        photo_url: Option<&str>,
    ) -> Result<(), StoreError> {
        let photo: Bson = match photo_url {
            Some(url) => Bson::String(url.to_string()),
            None => Bson::Null,
        };
        self.users()
            .update_one(
                doc! { "user_id": user_id },
                doc! { "$set": { "display_name": display_name, "photo_url": photo } },
            )
            .await?;
        Ok(())
    }

    async fn create_task(&self, task: &Task, shares: &[TaskShare]) -> Result<(), StoreError> {
        self.tasks().insert_one(task).await?;
        if !shares.is_empty() {
            self.shares().insert_many(shares).await?;
        }
        Ok(())
    }

    async fn find_task(&self, task_id: &str) -> Result<Option<Task>, StoreError> {
        Ok(self.tasks().find_one(doc! { "task_id": task_id }).await?)
    }

    async fn replace_task(&self, task: &Task) -> Result<(), StoreError> {
        self.tasks()
            .replace_one(doc! { "task_id": &task.task_id }, task)
            .await?;
        Ok(())
    }

    async fn delete_task_with_shares(&self, task_id: &str) -> Result<bool, StoreError> {
        let result = self.tasks().delete_one(doc! { "task_id": task_id }).await?;
        self.shares()
            .delete_many(doc! { "task_id": task_id })
            .await?;
        Ok(result.deleted_count == 1)
    }

    async fn tasks_visible_to(&self, user_id: &str) -> Result<Vec<Task>, StoreError> {
        let shares = drain(
            self.shares()
                .find(doc! { "grantee_id": user_id })
                .await?,
        )
        .await?;
        let shared_ids: Vec<String> = shares.into_iter().map(|s| s.task_id).collect();
        let filter = doc! {
            "$or": [
                { "created_by": user_id },
                { "task_id": { "$in": shared_ids } },
            ]
        };
        drain(self.tasks().find(filter).await?).await
    }

    async fn upsert_share(&self, share: &TaskShare) -> Result<(), StoreError> {
        let permission = to_bson(&share.permission)?;
        let created_at = to_bson(&share.created_at)?;
        let update: Document = doc! {
            "$set": {
                "permission": permission,
                "granter_id": &share.granter_id,
            },
            "$setOnInsert": {
                "share_id": &share.share_id,
                "task_id": &share.task_id,
                "grantee_id": &share.grantee_id,
                "created_at": created_at,
            },
        };
        self.shares()
            .update_one(
                doc! { "task_id": &share.task_id, "grantee_id": &share.grantee_id },
                update,
            )
            .upsert(true)
            .await?;
        Ok(())
    }

    async fn delete_share(&self, task_id: &str, grantee_id: &str) -> Result<bool, StoreError> {
        let result = self
            .shares()
            .delete_one(doc! { "task_id": task_id, "grantee_id": grantee_id })
            .await?;
        Ok(result.deleted_count == 1)
    }

    async fn shares_for_task(&self, task_id: &str) -> Result<Vec<TaskShare>, StoreError> {
        drain(self.shares().find(doc! { "task_id": task_id }).await?).await
    }

    async fn insert_team(&self, team: &Team) -> Result<(), StoreError> {
        self.teams().insert_one(team).await?;
        Ok(())
    }

    async fn find_team(&self, team_id: &str) -> Result<Option<Team>, StoreError> {
        Ok(self.teams().find_one(doc! { "team_id": team_id }).await?)
    }

    async fn replace_team(&self, team: &Team) -> Result<(), StoreError> {
        self.teams()
            .replace_one(doc! { "team_id": &team.team_id }, team)
            .await?;
        Ok(())
    }

    async fn delete_team(&self, team_id: &str) -> Result<bool, StoreError> {
        let result = self.teams().delete_one(doc! { "team_id": team_id }).await?;
        Ok(result.deleted_count == 1)
    }

    async fn teams_created_by(&self, user_id: &str) -> Result<Vec<Team>, StoreError> {
        drain(self.teams().find(doc! { "created_by": user_id }).await?).await
    }
}
