// src/sharing.rs

use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Utc;
use log::info;
use regex::Regex;
use uuid::Uuid;

use crate::app_state::AppState;
use crate::auth::require_user;
use crate::error::ApiError;
use crate::models::{SharePermission, ShareTaskRequest, TaskShare};
use crate::policy;
use crate::store::Store;

fn email_shape() -> &'static Regex {
    static SHAPE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    SHAPE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"))
}

fn validate_email(email: &str) -> Result<(), ApiError> {
    if email_shape().is_match(email) {
        Ok(())
    } else {
        Err(ApiError::Validation(format!("malformed email '{}'", email)))
    }
}

/// Grants (or re-grants at a new level) access on a task. Requires only
/// view access on the task: a viewer may re-share. The (task, grantee)
/// pair is unique; sharing again updates permission and granter in place.
pub async fn share_task(
    store: &dyn Store,
    task_id: &str,
    requester_id: &str,
    grantee_email: &str,
    permission: SharePermission,
) -> Result<TaskShare, ApiError> {
    validate_email(grantee_email)?;

    let task = store.find_task(task_id).await?.ok_or(ApiError::NotFound)?;
    let shares = store.shares_for_task(task_id).await?;
    if !policy::can_view(&task, &shares, requester_id) {
        return Err(ApiError::NotFound);
    }

    let grantee = store
        .find_user_by_email(&grantee_email.to_lowercase())
        .await?
        .ok_or(ApiError::UserNotFound)?;
    if grantee.user_id == requester_id {
        return Err(ApiError::InvalidShare);
    }

    let share = TaskShare {
        share_id: Uuid::new_v4().to_string(),
        task_id: task_id.to_string(),
        grantee_id: grantee.user_id.clone(),
        granter_id: requester_id.to_string(),
        permission,
        created_at: Utc::now(),
    };
    store.upsert_share(&share).await?;
    info!(
        "Task {} shared with {} at {:?}",
        task_id, grantee.user_id, permission
    );

    // Return the stored record (an upsert keeps the original row).
    let stored = store
        .shares_for_task(task_id)
        .await?
        .into_iter()
        .find(|s| s.grantee_id == grantee.user_id);
    Ok(stored.unwrap_or(share))
}

/// Revokes a grant. Idempotent; reports whether a record was removed.
pub async fn remove_share(
    store: &dyn Store,
    task_id: &str,
    grantee_id: &str,
) -> Result<bool, ApiError> {
    Ok(store.delete_share(task_id, grantee_id).await?)
}

/// All share records for a task. Caller authorization is the invoking
/// layer's concern; the HTTP handlers gate this behind view access.
pub async fn list_shares(store: &dyn Store, task_id: &str) -> Result<Vec<TaskShare>, ApiError> {
    Ok(store.shares_for_task(task_id).await?)
}

// ─── HANDLERS ──────────────────────────────────────────────────────────────

async fn require_view(
    store: &dyn Store,
    task_id: &str,
    user_id: &str,
) -> Result<(), ApiError> {
    let task = store.find_task(task_id).await?.ok_or(ApiError::NotFound)?;
    let shares = store.shares_for_task(task_id).await?;
    if !policy::can_view(&task, &shares, user_id) {
        return Err(ApiError::NotFound);
    }
    Ok(())
}

pub async fn share_task_handler(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<ShareTaskRequest>,
) -> Result<HttpResponse, ApiError> {
    let user = require_user(&req, data.store.as_ref()).await?;
    let permission = payload.permission.unwrap_or(SharePermission::Edit);
    let share = share_task(
        data.store.as_ref(),
        &path,
        &user.user_id,
        &payload.email,
        permission,
    )
    .await?;
    Ok(HttpResponse::Ok().json(share))
}

pub async fn list_shares_handler(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let user = require_user(&req, data.store.as_ref()).await?;
    require_view(data.store.as_ref(), &path, &user.user_id).await?;
    let shares = list_shares(data.store.as_ref(), &path).await?;
    Ok(HttpResponse::Ok().json(shares))
}

pub async fn remove_share_handler(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, ApiError> {
    let (task_id, grantee_id) = path.into_inner();
    let user = require_user(&req, data.store.as_ref()).await?;
    require_view(data.store.as_ref(), &task_id, &user.user_id).await?;
    let removed = remove_share(data.store.as_ref(), &task_id, &grantee_id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "removed": removed })))
}
