// src/teams.rs

use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Utc;
use log::info;
use uuid::Uuid;

use crate::app_state::AppState;
use crate::auth::require_user;
use crate::error::ApiError;
use crate::models::{CreateTeamRequest, Team, UpdateTeamRequest};
use crate::store::Store;

/// Loads a team iff the requester created it; `NotFound` otherwise, same
/// as for tasks.
async fn find_owned_team(
    store: &dyn Store,
    team_id: &str,
    user_id: &str,
) -> Result<Team, ApiError> {
    let team = store.find_team(team_id).await?.ok_or(ApiError::NotFound)?;
    if team.created_by != user_id {
        return Err(ApiError::NotFound);
    }
    Ok(team)
}

pub async fn create_team(
    req: HttpRequest,
    data: web::Data<AppState>,
    payload: web::Json<CreateTeamRequest>,
) -> Result<HttpResponse, ApiError> {
    let user = require_user(&req, data.store.as_ref()).await?;
    if payload.name.trim().is_empty() {
        return Err(ApiError::Validation("name must not be empty".to_string()));
    }

    let team = Team {
        team_id: Uuid::new_v4().to_string(),
        name: payload.name.clone(),
        color: payload.color.clone(),
        created_by: user.user_id,
        created_at: Utc::now(),
    };
    data.store.insert_team(&team).await?;
    info!("Team created: {}", team.team_id);
    Ok(HttpResponse::Ok().json(team))
}

pub async fn list_teams(
    req: HttpRequest,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let user = require_user(&req, data.store.as_ref()).await?;
    let teams = data.store.teams_created_by(&user.user_id).await?;
    Ok(HttpResponse::Ok().json(teams))
}

pub async fn get_team(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let user = require_user(&req, data.store.as_ref()).await?;
    let team = find_owned_team(data.store.as_ref(), &path, &user.user_id).await?;
    Ok(HttpResponse::Ok().json(team))
}

pub async fn update_team(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<UpdateTeamRequest>,
) -> Result<HttpResponse, ApiError> {
    let user = require_user(&req, data.store.as_ref()).await?;
    let mut team = find_owned_team(data.store.as_ref(), &path, &user.user_id).await?;

    if let Some(name) = &payload.name {
        if name.trim().is_empty() {
            return Err(ApiError::Validation("name must not be empty".to_string()));
        }
        team.name = name.clone();
    }
    if let Some(color) = &payload.color {
        team.color = color.clone();
    }
    data.store.replace_team(&team).await?;
    Ok(HttpResponse::Ok().json(team))
}

pub async fn delete_team(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let user = require_user(&req, data.store.as_ref()).await?;
    find_owned_team(data.store.as_ref(), &path, &user.user_id).await?;
    data.store.delete_team(&path).await?;
    info!("Team deleted: {}", path.as_str());
    Ok(HttpResponse::Ok().json(serde_json::json!({ "status": "deleted" })))
}
