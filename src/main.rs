// src/main.rs

mod app_state;
mod auth;
mod config;
mod error;
mod models;
mod policy;
mod sharing;
mod stats;
mod store;
mod tasks;
mod teams;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use actix_cors::Cors;
use actix_web::{
    body::{BoxBody, MessageBody},
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http,
    middleware::Logger,
    web, App, Error, HttpMessage, HttpResponse, HttpServer,
};
use env_logger::Env;
use futures::future::{ok, Ready};

use crate::app_state::AppState;
use crate::auth::{me, verify_token, Identity};
use crate::sharing::{list_shares_handler, remove_share_handler, share_task_handler};
use crate::stats::user_stats_handler;
use crate::store::{MemoryStore, MongoStore, Store};
use crate::tasks::{
    create_task_handler, delete_task_handler, get_task_handler, list_tasks_handler,
    update_task_handler,
};
use crate::teams::{create_team, delete_team, get_team, list_teams, update_team};

#[derive(Debug)]
pub struct Authentication {
    pub jwt_secret: String,
}

impl<S, B> Transform<S, ServiceRequest> for Authentication
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Transform = AuthMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthMiddleware {
            service,
            jwt_secret: self.jwt_secret.clone(),
        })
    }
}

pub struct AuthMiddleware<S> {
    service: S,
    jwt_secret: String,
}

impl<S, B> Service<ServiceRequest> for AuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Extract "Bearer <token>" from the Authorization header if present
        if let Some(auth_header) = req.headers().get(http::header::AUTHORIZATION) {
            if let Ok(auth_str) = auth_header.to_str() {
                if auth_str.starts_with("Bearer ") {
                    let token = auth_str.trim_start_matches("Bearer ").trim().to_string();
                    match verify_token(&token, &self.jwt_secret) {
                        Ok(claims) => {
                            req.extensions_mut().insert(Identity::from(claims));
                        }
                        Err(e) => {
                            let (req_parts, _payload) = req.into_parts();
                            let resp = HttpResponse::Unauthorized()
                                .body(format!("Invalid token: {}", e))
                                .map_into_boxed_body();
                            let srv_resp = ServiceResponse::new(req_parts, resp);
                            return Box::pin(async move { Ok(srv_resp) });
                        }
                    }
                }
            }
        }

        let fut = self.service.call(req);
        Box::pin(async move {
            let res = fut.await?;
            Ok(res.map_into_boxed_body())
        })
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = config::Config::from_env();
    let store: Arc<dyn Store> = match config.store_backend.as_str() {
        "memory" => Arc::new(MemoryStore::new()),
        _ => {
            let uri = config
                .mongo_uri
                .clone()
                .expect("MONGO_URI must be set for the mongo store backend");
            Arc::new(MongoStore::init(&uri, &config.database_name).await)
        }
    };

    println!("Server running at http://0.0.0.0:8080");
    println!("Allowed CORS Origin: {}", config.frontend_origin);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&config.frontend_origin)
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                http::header::CONTENT_TYPE,
                http::header::ACCEPT,
                http::header::AUTHORIZATION,
            ])
            .supports_credentials()
            .max_age(3600);

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .wrap(Authentication {
                jwt_secret: config.jwt_secret.clone(),
            })
            .app_data(web::Data::new(AppState {
                store: store.clone(),
                config: config.clone(),
            }))
            .service(web::scope("/auth").route("/me", web::get().to(me)))
            // TASKS
            .service(
                web::scope("/tasks")
                    .route("", web::get().to(list_tasks_handler))
                    .route("", web::post().to(create_task_handler))
                    .route("/stats", web::get().to(user_stats_handler))
                    .service(
                        web::scope("/{task_id}")
                            .route("", web::get().to(get_task_handler))
                            .route("", web::put().to(update_task_handler))
                            .route("", web::delete().to(delete_task_handler))
                            .service(
                                web::scope("/shares")
                                    .route("", web::get().to(list_shares_handler))
                                    .route("", web::post().to(share_task_handler))
                                    .route("/{user_id}", web::delete().to(remove_share_handler)),
                            ),
                    ),
            )
            // TEAMS
            .service(
                web::scope("/teams")
                    .route("", web::get().to(list_teams))
                    .route("", web::post().to(create_team))
                    .service(
                        web::scope("/{team_id}")
                            .route("", web::get().to(get_team))
                            .route("", web::put().to(update_team))
                            .route("", web::delete().to(delete_team)),
                    ),
            )
    })
    .bind("0.0.0.0:8080")?
    .run()
    .await
}
