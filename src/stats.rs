// src/stats.rs

use actix_web::{web, HttpRequest, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::app_state::AppState;
use crate::auth::require_user;
use crate::error::ApiError;
use crate::models::{Task, TaskFilters, TaskStatus};
use crate::store::Store;
use crate::tasks::{list_tasks, matches_filters, DueFilter, ParsedFilters};

/// Read-only summary over a user's visible task set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    pub active: usize,
    pub completed: usize,
    pub due_today: usize,
    pub overdue: usize,
}

pub fn compute_stats(tasks: &[Task], now: DateTime<Utc>) -> UserStats {
    let today = ParsedFilters {
        due: Some(DueFilter::Today),
        ..Default::default()
    };
    let overdue = ParsedFilters {
        due: Some(DueFilter::Overdue),
        ..Default::default()
    };

    let mut stats = UserStats {
        active: 0,
        completed: 0,
        due_today: 0,
        overdue: 0,
    };
    for task in tasks {
        if task.status == TaskStatus::Completed {
            stats.completed += 1;
        } else {
            stats.active += 1;
        }
        if task.status != TaskStatus::Completed && matches_filters(task, &today, now) {
            stats.due_today += 1;
        }
        if matches_filters(task, &overdue, now) {
            stats.overdue += 1;
        }
    }
    stats
}

/// Fold over the unfiltered visible set for the user.
pub async fn user_stats(store: &dyn Store, user_id: &str) -> Result<UserStats, ApiError> {
    let tasks = list_tasks(store, user_id, &TaskFilters::default()).await?;
    let tasks: Vec<Task> = tasks.into_iter().map(|t| t.task).collect();
    Ok(compute_stats(&tasks, Utc::now()))
}

/// GET /tasks/stats
pub async fn user_stats_handler(
    req: HttpRequest,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let user = require_user(&req, data.store.as_ref()).await?;
    let stats = user_stats(data.store.as_ref(), &user.user_id).await?;
    Ok(HttpResponse::Ok().json(stats))
}
