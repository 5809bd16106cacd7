use std::env;

#[derive(Clone)]
pub struct Config {
    /// "mongo" (default) or "memory".
    pub store_backend: String,
    pub mongo_uri: Option<String>,
    pub database_name: String,
    pub jwt_secret: String,
    pub frontend_origin: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self {
            store_backend: env::var("STORE_BACKEND").unwrap_or_else(|_| "mongo".to_string()),
            mongo_uri: env::var("MONGO_URI").ok(),
            database_name: env::var("DATABASE_NAME").unwrap_or_else(|_| "taskhub".to_string()),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            frontend_origin: env::var("FRONTEND_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
        }
    }
}
