use actix_web::{web, HttpMessage, HttpRequest, HttpResponse};
use chrono::Utc;
use jsonwebtoken::{decode, DecodingKey, Validation};
use log::info;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::app_state::AppState;
use crate::error::ApiError;
use crate::models::User;
use crate::store::Store;

/// Claims minted by the external identity provider. The provider has
/// already authenticated the principal; `sub` is its opaque stable
/// identifier for them.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
    pub exp: usize,
}

/// The verified identity the middleware stashes in request extensions.
#[derive(Debug, Clone)]
pub struct Identity {
    pub external_id: String,
    pub email: String,
    pub display_name: String,
    pub photo_url: Option<String>,
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Identity {
            external_id: claims.sub,
            email: claims.email.to_lowercase(),
            display_name: claims.name,
            photo_url: claims.picture,
        }
    }
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, String> {
    match decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    ) {
        Ok(token_data) => Ok(token_data.claims),
        Err(e) => Err(format!("Token decode error: {}", e)),
    }
}

/// Resolves the request's verified identity to a local user record,
/// creating it on first authentication and refreshing display name/photo
/// on later ones.
pub async fn require_user(req: &HttpRequest, store: &dyn Store) -> Result<User, ApiError> {
    let identity = match req.extensions().get::<Identity>() {
        Some(identity) => identity.clone(),
        None => return Err(ApiError::Unauthorized),
    };
    sync_identity(store, &identity).await
}

pub async fn sync_identity(store: &dyn Store, identity: &Identity) -> Result<User, ApiError> {
    if let Some(mut user) = store.find_user_by_external_id(&identity.external_id).await? {
        if user.display_name != identity.display_name || user.photo_url != identity.photo_url {
            store
                .update_user_profile(
                    &user.user_id,
                    &identity.display_name,
                    identity.photo_url.as_deref(),
                )
                .await?;
            user.display_name = identity.display_name.clone();
            user.photo_url = identity.photo_url.clone();
        }
        return Ok(user);
    }

    let user = User {
        user_id: Uuid::new_v4().to_string(),
        external_id: identity.external_id.clone(),
        email: identity.email.clone(),
        display_name: identity.display_name.clone(),
        photo_url: identity.photo_url.clone(),
        created_at: Utc::now(),
    };
    store.insert_user(&user).await?;
    info!("User created on first authentication: {}", user.user_id);
    Ok(user)
}

/// GET /auth/me
pub async fn me(req: HttpRequest, data: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let user = require_user(&req, data.store.as_ref()).await?;
    Ok(HttpResponse::Ok().json(user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn identity(external_id: &str, name: &str) -> Identity {
        Identity {
            external_id: external_id.to_string(),
            email: format!("{}@example.com", external_id),
            display_name: name.to_string(),
            photo_url: None,
        }
    }

    #[test]
    fn verify_token_uses_the_configured_secret() {
        let claims = Claims {
            sub: "ext-1".to_string(),
            email: "alice@example.com".to_string(),
            name: "Alice".to_string(),
            picture: None,
            exp: (Utc::now() + chrono::Duration::hours(1)).timestamp() as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"configured-secret"),
        )
        .unwrap();

        let verified = verify_token(&token, "configured-secret").unwrap();
        assert_eq!(verified.sub, "ext-1");
        assert!(verify_token(&token, "other-secret").is_err());
    }

    #[tokio::test]
    async fn first_authentication_creates_a_user() {
        let store = MemoryStore::new();
        let user = sync_identity(&store, &identity("ext-1", "Alice")).await.unwrap();
        assert_eq!(user.external_id, "ext-1");
        assert_eq!(user.email, "ext-1@example.com");
        let found = store.find_user(&user.user_id).await.unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn later_authentications_refresh_the_profile() {
        let store = MemoryStore::new();
        let first = sync_identity(&store, &identity("ext-1", "Alice")).await.unwrap();

        let mut updated = identity("ext-1", "Alice Cooper");
        updated.photo_url = Some("https://img.example/alice.png".to_string());
        let second = sync_identity(&store, &updated).await.unwrap();

        assert_eq!(second.user_id, first.user_id);
        assert_eq!(second.display_name, "Alice Cooper");
        let stored = store.find_user(&first.user_id).await.unwrap().unwrap();
        assert_eq!(stored.display_name, "Alice Cooper");
        assert_eq!(
            stored.photo_url.as_deref(),
            Some("https://img.example/alice.png")
        );
    }
}
