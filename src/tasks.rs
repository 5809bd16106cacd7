// src/tasks.rs

use actix_web::{web, HttpRequest, HttpResponse};
use chrono::{DateTime, Duration, Utc};
use log::info;
use uuid::Uuid;

use crate::app_state::AppState;
use crate::auth::require_user;
use crate::error::ApiError;
use crate::models::{
    CreateTaskRequest, CreatorInfo, EnrichedTask, GranteeInfo, SharePermission, Task, TaskFilters,
    TaskPriority, TaskShare, TaskStatus, TeamInfo, UpdateTaskRequest,
};
use crate::policy;
use crate::store::Store;

// ─── FILTERS ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueFilter {
    Today,
    Overdue,
}

/// Validated form of the query-string filters. `status`/`priority` are
/// `None` when absent or given as the sentinel "all"; `search` is held
/// lowercased.
#[derive(Debug, Default)]
pub struct ParsedFilters {
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub team_id: Option<String>,
    pub search: Option<String>,
    pub due: Option<DueFilter>,
}

pub fn parse_filters(filters: &TaskFilters) -> Result<ParsedFilters, ApiError> {
    let mut parsed = ParsedFilters {
        team_id: filters.team_id.clone(),
        search: filters.search.as_ref().map(|s| s.to_lowercase()),
        ..Default::default()
    };
    if let Some(status) = filters.status.as_deref() {
        if status != "all" {
            parsed.status = Some(
                TaskStatus::from_param(status)
                    .ok_or_else(|| ApiError::Validation(format!("unknown status '{}'", status)))?,
            );
        }
    }
    if let Some(priority) = filters.priority.as_deref() {
        if priority != "all" {
            parsed.priority = Some(TaskPriority::from_param(priority).ok_or_else(|| {
                ApiError::Validation(format!("unknown priority '{}'", priority))
            })?);
        }
    }
    if let Some(due) = filters.due_date.as_deref() {
        parsed.due = Some(match due {
            "today" => DueFilter::Today,
            "overdue" => DueFilter::Overdue,
            other => {
                return Err(ApiError::Validation(format!(
                    "unknown due_date filter '{}'",
                    other
                )))
            }
        });
    }
    Ok(parsed)
}

/// Midnight of `now`'s calendar day on the service clock.
fn start_of_day(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive()
        .and_hms_opt(0, 0, 0)
        .expect("midnight is a valid time")
        .and_utc()
}

/// All filters apply conjunctively. Due-date buckets: "today" is the
/// half-open interval [start of day, start of next day) regardless of
/// status; "overdue" is strictly before start of day and not completed.
pub fn matches_filters(task: &Task, filters: &ParsedFilters, now: DateTime<Utc>) -> bool {
    if let Some(status) = filters.status {
        if task.status != status {
            return false;
        }
    }
    if let Some(priority) = filters.priority {
        if task.priority != priority {
            return false;
        }
    }
    if let Some(team_id) = &filters.team_id {
        if task.team_id.as_deref() != Some(team_id.as_str()) {
            return false;
        }
    }
    if let Some(needle) = &filters.search {
        let in_title = task.title.to_lowercase().contains(needle);
        let in_description = task.description.to_lowercase().contains(needle);
        if !in_title && !in_description {
            return false;
        }
    }
    if let Some(due_filter) = filters.due {
        let due = match task.due_date {
            Some(due) => due,
            None => return false,
        };
        let day_start = start_of_day(now);
        match due_filter {
            DueFilter::Today => {
                if due < day_start || due >= day_start + Duration::days(1) {
                    return false;
                }
            }
            DueFilter::Overdue => {
                if due >= day_start || task.status == TaskStatus::Completed {
                    return false;
                }
            }
        }
    }
    true
}

// ─── ENRICHMENT ────────────────────────────────────────────────────────────

async fn enrich(store: &dyn Store, task: Task) -> Result<EnrichedTask, ApiError> {
    let creator = match store.find_user(&task.created_by).await? {
        Some(user) => CreatorInfo::from(&user),
        None => CreatorInfo::unknown(),
    };

    let shares = store.shares_for_task(&task.task_id).await?;
    let mut shared_with = Vec::with_capacity(shares.len());
    for share in &shares {
        let grantee = store.find_user(&share.grantee_id).await?;
        let profile = grantee
            .as_ref()
            .map(CreatorInfo::from)
            .unwrap_or_else(CreatorInfo::unknown);
        shared_with.push(GranteeInfo {
            user_id: share.grantee_id.clone(),
            display_name: profile.display_name,
            email: profile.email,
            photo_url: profile.photo_url,
            permission: share.permission,
        });
    }

    let team = match &task.team_id {
        Some(team_id) => store.find_team(team_id).await?.map(|t| TeamInfo {
            name: t.name,
            color: t.color,
        }),
        None => None,
    };

    Ok(EnrichedTask {
        task,
        creator,
        shared_with,
        team,
    })
}

// ─── QUERY ENGINE ──────────────────────────────────────────────────────────

/// Every task visible to the user (owned or shared with them), filtered
/// conjunctively and enriched for presentation. No ordering is imposed.
pub async fn list_tasks(
    store: &dyn Store,
    user_id: &str,
    filters: &TaskFilters,
) -> Result<Vec<EnrichedTask>, ApiError> {
    let parsed = parse_filters(filters)?;
    let now = Utc::now();
    let candidates = store.tasks_visible_to(user_id).await?;

    let mut result = Vec::new();
    for task in candidates {
        if matches_filters(&task, &parsed, now) {
            result.push(enrich(store, task).await?);
        }
    }
    Ok(result)
}

/// Single-task form: the enriched task iff it exists and the user may view
/// it; `NotFound` otherwise, whether the task is missing or merely hidden.
pub async fn get_task(
    store: &dyn Store,
    task_id: &str,
    user_id: &str,
) -> Result<EnrichedTask, ApiError> {
    let task = store.find_task(task_id).await?.ok_or(ApiError::NotFound)?;
    let shares = store.shares_for_task(task_id).await?;
    if !policy::can_view(&task, &shares, user_id) {
        return Err(ApiError::NotFound);
    }
    enrich(store, task).await
}

// ─── MUTATION ENGINE ───────────────────────────────────────────────────────

pub async fn create_task(
    store: &dyn Store,
    owner_id: &str,
    req: CreateTaskRequest,
) -> Result<EnrichedTask, ApiError> {
    if req.title.trim().is_empty() {
        return Err(ApiError::Validation("title must not be empty".to_string()));
    }

    let now = Utc::now();
    let status = req.status.unwrap_or(TaskStatus::Todo);
    let task = Task {
        task_id: Uuid::new_v4().to_string(),
        title: req.title,
        description: req.description.unwrap_or_default(),
        status,
        priority: req.priority.unwrap_or(TaskPriority::Medium),
        due_date: req.due_date,
        team_id: req.team_id,
        created_by: owner_id.to_string(),
        created_at: now,
        updated_at: now,
        completed_at: match status {
            TaskStatus::Completed => Some(now),
            _ => None,
        },
    };

    // Initial shares: one edit grant per email that resolves to an
    // existing user other than the owner. Everything else is skipped
    // without error.
    let mut shares = Vec::new();
    for email in req.shared_with.unwrap_or_default() {
        let grantee = match store.find_user_by_email(&email.to_lowercase()).await? {
            Some(user) if user.user_id != owner_id => user,
            _ => continue,
        };
        shares.push(TaskShare {
            share_id: Uuid::new_v4().to_string(),
            task_id: task.task_id.clone(),
            grantee_id: grantee.user_id,
            granter_id: owner_id.to_string(),
            permission: SharePermission::Edit,
            created_at: now,
        });
    }

    store.create_task(&task, &shares).await?;
    info!("Task created: {}", task.task_id);
    enrich(store, task).await
}

pub async fn update_task(
    store: &dyn Store,
    task_id: &str,
    requester_id: &str,
    req: UpdateTaskRequest,
) -> Result<EnrichedTask, ApiError> {
    let mut task = store.find_task(task_id).await?.ok_or(ApiError::NotFound)?;
    let shares = store.shares_for_task(task_id).await?;
    if !policy::can_mutate(&task, &shares, requester_id) {
        return Err(ApiError::NotFound);
    }

    let now = Utc::now();
    if let Some(title) = req.title {
        if title.trim().is_empty() {
            return Err(ApiError::Validation("title must not be empty".to_string()));
        }
        task.title = title;
    }
    if let Some(description) = req.description {
        task.description = description;
    }
    if let Some(priority) = req.priority {
        task.priority = priority;
    }
    if let Some(due_date) = req.due_date {
        task.due_date = due_date;
    }
    if let Some(team_id) = req.team_id {
        task.team_id = team_id;
    }
    if let Some(status) = req.status {
        task.status = status;
        // Completion bookkeeping runs only when the update supplies a
        // status: completed stamps the update time, todo/in-progress
        // clear the stamp.
        task.completed_at = match status {
            TaskStatus::Completed => Some(now),
            TaskStatus::Todo | TaskStatus::InProgress => None,
        };
    }
    task.updated_at = now;

    store.replace_task(&task).await?;
    enrich(store, task).await
}

/// Returns whether a deletion occurred. Missing task and non-owner
/// requester produce the same `false`, so callers cannot distinguish them.
pub async fn delete_task(
    store: &dyn Store,
    task_id: &str,
    requester_id: &str,
) -> Result<bool, ApiError> {
    let task = match store.find_task(task_id).await? {
        Some(task) => task,
        None => return Ok(false),
    };
    if !policy::can_delete(&task, requester_id) {
        return Ok(false);
    }
    let deleted = store.delete_task_with_shares(task_id).await?;
    if deleted {
        info!("Task deleted: {}", task_id);
    }
    Ok(deleted)
}

// ─── HANDLERS ──────────────────────────────────────────────────────────────

pub async fn list_tasks_handler(
    req: HttpRequest,
    data: web::Data<AppState>,
    query: web::Query<TaskFilters>,
) -> Result<HttpResponse, ApiError> {
    let user = require_user(&req, data.store.as_ref()).await?;
    let tasks = list_tasks(data.store.as_ref(), &user.user_id, &query).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

pub async fn create_task_handler(
    req: HttpRequest,
    data: web::Data<AppState>,
    payload: web::Json<CreateTaskRequest>,
) -> Result<HttpResponse, ApiError> {
    let user = require_user(&req, data.store.as_ref()).await?;
    let task = create_task(data.store.as_ref(), &user.user_id, payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(task))
}

pub async fn get_task_handler(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let user = require_user(&req, data.store.as_ref()).await?;
    let task = get_task(data.store.as_ref(), &path, &user.user_id).await?;
    Ok(HttpResponse::Ok().json(task))
}

pub async fn update_task_handler(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<UpdateTaskRequest>,
) -> Result<HttpResponse, ApiError> {
    let user = require_user(&req, data.store.as_ref()).await?;
    let task = update_task(
        data.store.as_ref(),
        &path,
        &user.user_id,
        payload.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(task))
}

pub async fn delete_task_handler(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let user = require_user(&req, data.store.as_ref()).await?;
    if delete_task(data.store.as_ref(), &path, &user.user_id).await? {
        Ok(HttpResponse::Ok().json(serde_json::json!({ "status": "deleted" })))
    } else {
        Err(ApiError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Team;
    use crate::store::MemoryStore;
    use chrono::TimeZone;

    async fn seed_user(store: &MemoryStore, name: &str) -> String {
        let user = crate::models::User {
            user_id: Uuid::new_v4().to_string(),
            external_id: format!("ext-{}", name),
            email: format!("{}@example.com", name),
            display_name: name.to_string(),
            photo_url: None,
            created_at: Utc::now(),
        };
        store.insert_user(&user).await.unwrap();
        user.user_id
    }

    fn new_task(title: &str) -> CreateTaskRequest {
        CreateTaskRequest {
            title: title.to_string(),
            description: None,
            status: None,
            priority: None,
            due_date: None,
            team_id: None,
            shared_with: None,
        }
    }

    fn filters() -> TaskFilters {
        TaskFilters::default()
    }

    #[tokio::test]
    async fn create_then_get_round_trips_with_defaults() {
        let store = MemoryStore::new();
        let alice = seed_user(&store, "alice").await;

        let mut req = new_task("Write report");
        req.description = Some("quarterly numbers".to_string());
        let created = create_task(&store, &alice, req).await.unwrap();

        let fetched = get_task(&store, &created.task.task_id, &alice).await.unwrap();
        assert_eq!(fetched.task.title, "Write report");
        assert_eq!(fetched.task.description, "quarterly numbers");
        assert_eq!(fetched.task.status, TaskStatus::Todo);
        assert_eq!(fetched.task.priority, TaskPriority::Medium);
        assert_eq!(fetched.task.completed_at, None);
        assert_eq!(fetched.task.created_by, alice);
        assert_eq!(fetched.creator.display_name, "alice");
    }

    #[tokio::test]
    async fn empty_title_is_rejected() {
        let store = MemoryStore::new();
        let alice = seed_user(&store, "alice").await;
        let err = create_task(&store, &alice, new_task("   ")).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn create_with_emails_grants_edit_and_skips_unresolvable() {
        let store = MemoryStore::new();
        let alice = seed_user(&store, "alice").await;
        let bob = seed_user(&store, "bob").await;

        let mut req = new_task("Shared task");
        req.shared_with = Some(vec![
            "bob@example.com".to_string(),
            "ALICE@example.com".to_string(),   // owner: skipped
            "nobody@example.com".to_string(),  // unknown: skipped
        ]);
        let created = create_task(&store, &alice, req).await.unwrap();

        let shares = store.shares_for_task(&created.task.task_id).await.unwrap();
        assert_eq!(shares.len(), 1);
        assert_eq!(shares[0].grantee_id, bob);
        assert_eq!(shares[0].permission, SharePermission::Edit);
        assert_eq!(shares[0].granter_id, alice);

        // The grantee sees the task, enriched with themselves in the list.
        let seen = get_task(&store, &created.task.task_id, &bob).await.unwrap();
        assert_eq!(seen.shared_with.len(), 1);
        assert_eq!(seen.shared_with[0].email, "bob@example.com");
    }

    #[tokio::test]
    async fn get_task_hides_existence_from_strangers() {
        let store = MemoryStore::new();
        let alice = seed_user(&store, "alice").await;
        let mallory = seed_user(&store, "mallory").await;
        let created = create_task(&store, &alice, new_task("Private")).await.unwrap();

        let err = get_task(&store, &created.task.task_id, &mallory).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[tokio::test]
    async fn completing_sets_timestamp_and_reopening_clears_it() {
        let store = MemoryStore::new();
        let alice = seed_user(&store, "alice").await;
        let created = create_task(&store, &alice, new_task("Finish me")).await.unwrap();
        let id = created.task.task_id.clone();

        let done = update_task(
            &store,
            &id,
            &alice,
            UpdateTaskRequest {
                status: Some(TaskStatus::Completed),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert!(done.task.completed_at.is_some());

        // An update that carries no status leaves the stamp untouched.
        let retitled = update_task(
            &store,
            &id,
            &alice,
            UpdateTaskRequest {
                title: Some("Finished".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert!(retitled.task.completed_at.is_some());

        let reopened = update_task(
            &store,
            &id,
            &alice,
            UpdateTaskRequest {
                status: Some(TaskStatus::Todo),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(reopened.task.completed_at, None);
    }

    #[tokio::test]
    async fn explicit_null_clears_due_date_and_team_but_absence_does_not() {
        let store = MemoryStore::new();
        let alice = seed_user(&store, "alice").await;

        let mut req = new_task("Scheduled");
        req.due_date = Some(Utc::now());
        req.team_id = Some("team-1".to_string());
        let created = create_task(&store, &alice, req).await.unwrap();
        let id = created.task.task_id.clone();

        // A field left out of the payload is untouched.
        let retitle: UpdateTaskRequest =
            serde_json::from_value(serde_json::json!({ "title": "Still scheduled" })).unwrap();
        let updated = update_task(&store, &id, &alice, retitle).await.unwrap();
        assert!(updated.task.due_date.is_some());
        assert_eq!(updated.task.team_id.as_deref(), Some("team-1"));

        // An explicit null clears it.
        let clear: UpdateTaskRequest =
            serde_json::from_value(serde_json::json!({ "due_date": null, "team_id": null }))
                .unwrap();
        let cleared = update_task(&store, &id, &alice, clear).await.unwrap();
        assert_eq!(cleared.task.due_date, None);
        assert_eq!(cleared.task.team_id, None);
    }

    #[tokio::test]
    async fn update_by_non_editor_reports_not_found() {
        let store = MemoryStore::new();
        let alice = seed_user(&store, "alice").await;
        let mallory = seed_user(&store, "mallory").await;
        let created = create_task(&store, &alice, new_task("Mine")).await.unwrap();

        let err = update_task(
            &store,
            &created.task.task_id,
            &mallory,
            UpdateTaskRequest {
                title: Some("Stolen".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[tokio::test]
    async fn delete_cascades_shares_and_hides_from_former_grantees() {
        let store = MemoryStore::new();
        let alice = seed_user(&store, "alice").await;
        let bob = seed_user(&store, "bob").await;

        let mut req = new_task("Doomed");
        req.shared_with = Some(vec!["bob@example.com".to_string()]);
        let created = create_task(&store, &alice, req).await.unwrap();
        let id = created.task.task_id.clone();

        // Grantees cannot delete.
        assert!(!delete_task(&store, &id, &bob).await.unwrap());
        assert!(store.find_task(&id).await.unwrap().is_some());

        assert!(delete_task(&store, &id, &alice).await.unwrap());
        assert!(store.shares_for_task(&id).await.unwrap().is_empty());
        for user in [&alice, &bob] {
            let err = get_task(&store, &id, user).await.unwrap_err();
            assert!(matches!(err, ApiError::NotFound));
        }
        // A second delete is a no-op.
        assert!(!delete_task(&store, &id, &alice).await.unwrap());
    }

    #[tokio::test]
    async fn list_tasks_shows_owned_and_shared_only() {
        let store = MemoryStore::new();
        let alice = seed_user(&store, "alice").await;
        let bob = seed_user(&store, "bob").await;
        let carol = seed_user(&store, "carol").await;

        create_task(&store, &alice, new_task("Alice's own")).await.unwrap();
        let mut shared = new_task("Shared with bob");
        shared.shared_with = Some(vec!["bob@example.com".to_string()]);
        create_task(&store, &alice, shared).await.unwrap();

        assert_eq!(list_tasks(&store, &alice, &filters()).await.unwrap().len(), 2);
        let bobs = list_tasks(&store, &bob, &filters()).await.unwrap();
        assert_eq!(bobs.len(), 1);
        assert_eq!(bobs[0].task.title, "Shared with bob");
        assert!(list_tasks(&store, &carol, &filters()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn task_reshared_back_to_its_owner_is_listed_once() {
        let store = MemoryStore::new();
        let alice = seed_user(&store, "alice").await;
        let bob = seed_user(&store, "bob").await;

        let mut req = new_task("Boomerang");
        req.shared_with = Some(vec!["bob@example.com".to_string()]);
        let created = create_task(&store, &alice, req).await.unwrap();

        // A grantee may share with anyone but themselves, including the
        // owner; the owner's visible set must stay a set.
        crate::sharing::share_task(
            &store,
            &created.task.task_id,
            &bob,
            "alice@example.com",
            SharePermission::View,
        )
        .await
        .unwrap();

        let visible = list_tasks(&store, &alice, &filters()).await.unwrap();
        assert_eq!(visible.len(), 1);
        let stats = crate::stats::user_stats(&store, &alice).await.unwrap();
        assert_eq!(stats.active, 1);
    }

    #[tokio::test]
    async fn list_tasks_filters_by_status_and_search() {
        let store = MemoryStore::new();
        let alice = seed_user(&store, "alice").await;

        let mut groceries = new_task("Buy groceries");
        groceries.description = Some("milk and eggs".to_string());
        create_task(&store, &alice, groceries).await.unwrap();
        let report = create_task(&store, &alice, new_task("Write report")).await.unwrap();
        update_task(
            &store,
            &report.task.task_id,
            &alice,
            UpdateTaskRequest {
                status: Some(TaskStatus::Completed),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let mut by_status = filters();
        by_status.status = Some("completed".to_string());
        let completed = list_tasks(&store, &alice, &by_status).await.unwrap();
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].task.title, "Write report");

        let mut sentinel = filters();
        sentinel.status = Some("all".to_string());
        assert_eq!(list_tasks(&store, &alice, &sentinel).await.unwrap().len(), 2);

        let mut by_search = filters();
        by_search.search = Some("MILK".to_string());
        let found = list_tasks(&store, &alice, &by_search).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].task.title, "Buy groceries");
    }

    #[tokio::test]
    async fn unknown_filter_values_are_rejected() {
        let store = MemoryStore::new();
        let alice = seed_user(&store, "alice").await;
        let mut bad = filters();
        bad.status = Some("archived".to_string());
        let err = list_tasks(&store, &alice, &bad).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn enrichment_falls_back_when_creator_is_missing() {
        let store = MemoryStore::new();
        let alice = seed_user(&store, "alice").await;
        let bob = seed_user(&store, "bob").await;

        let mut req = new_task("Orphan-to-be");
        req.shared_with = Some(vec!["bob@example.com".to_string()]);
        let created = create_task(&store, &alice, req).await.unwrap();

        // Simulate a missing creator record by re-inserting the task under
        // an owner id with no user document.
        let mut task = store.find_task(&created.task.task_id).await.unwrap().unwrap();
        task.created_by = "gone".to_string();
        store.replace_task(&task).await.unwrap();

        let seen = get_task(&store, &task.task_id, &bob).await.unwrap();
        assert_eq!(seen.creator, CreatorInfo::unknown());
    }

    #[tokio::test]
    async fn team_label_is_attached_when_set() {
        let store = MemoryStore::new();
        let alice = seed_user(&store, "alice").await;
        let team = Team {
            team_id: "team-1".to_string(),
            name: "Platform".to_string(),
            color: "#3366ff".to_string(),
            created_by: alice.clone(),
            created_at: Utc::now(),
        };
        store.insert_team(&team).await.unwrap();

        let mut req = new_task("Team task");
        req.team_id = Some("team-1".to_string());
        let created = create_task(&store, &alice, req).await.unwrap();
        let team_info = created.team.unwrap();
        assert_eq!(team_info.name, "Platform");
        assert_eq!(team_info.color, "#3366ff");

        let mut by_team = filters();
        by_team.team_id = Some("team-1".to_string());
        assert_eq!(list_tasks(&store, &alice, &by_team).await.unwrap().len(), 1);
        by_team.team_id = Some("team-2".to_string());
        assert!(list_tasks(&store, &alice, &by_team).await.unwrap().is_empty());
    }

    // ── pure filter matching, fixed clocks ────────────────────────────

    fn bare_task(due: Option<DateTime<Utc>>, status: TaskStatus) -> Task {
        Task {
            task_id: "t".to_string(),
            title: "t".to_string(),
            description: String::new(),
            status,
            priority: TaskPriority::Medium,
            due_date: due,
            team_id: None,
            created_by: "u".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            completed_at: None,
        }
    }

    fn due_filter(f: DueFilter) -> ParsedFilters {
        ParsedFilters {
            due: Some(f),
            ..Default::default()
        }
    }

    #[test]
    fn due_today_uses_half_open_day_interval() {
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 12, 0, 0).unwrap();
        let before_midnight = Utc.with_ymd_and_hms(2024, 1, 1, 23, 0, 0).unwrap();
        let after_midnight = Utc.with_ymd_and_hms(2024, 1, 2, 1, 0, 0).unwrap();
        let next_day = Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap();

        let f = due_filter(DueFilter::Today);
        assert!(!matches_filters(&bare_task(Some(before_midnight), TaskStatus::Todo), &f, now));
        assert!(matches_filters(&bare_task(Some(after_midnight), TaskStatus::Todo), &f, now));
        assert!(!matches_filters(&bare_task(Some(next_day), TaskStatus::Todo), &f, now));
        assert!(!matches_filters(&bare_task(None, TaskStatus::Todo), &f, now));
        // Status is irrelevant for "today".
        assert!(matches_filters(
            &bare_task(Some(after_midnight), TaskStatus::Completed),
            &f,
            now
        ));
    }

    #[test]
    fn overdue_excludes_completed_and_todays_tasks() {
        let now = Utc.with_ymd_and_hms(2024, 1, 3, 9, 0, 0).unwrap();
        let past_due = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let due_today = Utc.with_ymd_and_hms(2024, 1, 3, 8, 0, 0).unwrap();

        let f = due_filter(DueFilter::Overdue);
        assert!(matches_filters(
            &bare_task(Some(past_due), TaskStatus::InProgress),
            &f,
            now
        ));
        assert!(!matches_filters(
            &bare_task(Some(past_due), TaskStatus::Completed),
            &f,
            now
        ));
        assert!(!matches_filters(&bare_task(Some(due_today), TaskStatus::Todo), &f, now));
    }
}
