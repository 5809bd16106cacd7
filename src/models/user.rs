use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A local user record, synced from the external identity provider on
/// every authenticated request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    /// Opaque stable identifier issued by the identity provider.
    pub external_id: String,
    /// Stored lowercased; unique.
    pub email: String,
    pub display_name: String,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Display data attached to tasks during enrichment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreatorInfo {
    pub display_name: String,
    pub email: String,
    pub photo_url: Option<String>,
}

impl CreatorInfo {
    /// Placeholder used when the creator record is missing.
    pub fn unknown() -> Self {
        Self {
            display_name: "Unknown".to_string(),
            email: String::new(),
            photo_url: None,
        }
    }
}

impl From<&User> for CreatorInfo {
    fn from(user: &User) -> Self {
        Self {
            display_name: user.display_name.clone(),
            email: user.email.clone(),
            photo_url: user.photo_url.clone(),
        }
    }
}
