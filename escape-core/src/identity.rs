use async_trait::async_trait;
use escape_shared::{Category, Masked};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const GUEST_EMAIL: &str = "guest@escape.app";

/// The current user record. The booking core only ever reads the id; the
/// rest belongs to the identity/social surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: Masked<String>,
    pub avatar: String,
    // serde defaults backfill records persisted before these fields existed
    #[serde(default)]
    pub interests: Vec<Category>,
    #[serde(default)]
    pub favorites: Vec<Uuid>,
    #[serde(default)]
    pub following: Vec<String>,
}

impl User {
    /// The anonymous identity used until signup/login promotes it
    pub fn guest() -> Self {
        Self {
            id: "u_guest".to_string(),
            name: "Guest User".to_string(),
            email: Masked(GUEST_EMAIL.to_string()),
            avatar: String::new(),
            interests: Vec::new(),
            favorites: Vec::new(),
            following: Vec::new(),
        }
    }

    pub fn is_guest(&self) -> bool {
        self.email.0 == GUEST_EMAIL
    }

    /// Flip the favorite flag for an experience; returns the new state
    pub fn toggle_favorite(&mut self, experience_id: Uuid) -> bool {
        if let Some(pos) = self.favorites.iter().position(|id| *id == experience_id) {
            self.favorites.remove(pos);
            false
        } else {
            self.favorites.push(experience_id);
            true
        }
    }

    /// Flip the follow flag for a host; returns the new state
    pub fn toggle_follow(&mut self, host_name: &str) -> bool {
        if let Some(pos) = self.following.iter().position(|h| h == host_name) {
            self.following.remove(pos);
            false
        } else {
            self.following.push(host_name.to_string());
            true
        }
    }
}

pub fn generate_user_id() -> String {
    format!("u_{}", Uuid::new_v4().simple())
}

/// Minimal shape check before an identity mutation is accepted
pub fn validate_email(email: &str) -> crate::CoreResult<()> {
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();

    if local.is_empty() || domain.is_empty() {
        return Err(crate::CoreError::ValidationError(format!(
            "invalid email address: {email}"
        )));
    }
    Ok(())
}

/// Process-external key-value persistence for the user record:
/// load-on-init, save-on-mutate.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn load(&self) -> Result<Option<User>, Box<dyn std::error::Error + Send + Sync>>;

    async fn save(&self, user: &User) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
