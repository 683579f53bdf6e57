use std::time::{Duration, Instant};

use crate::global_constants::LOG_TAG_SESSION;

#[derive(Clone)]
pub struct Session {
    pub user_id: String,
    id_token: String,
    expires_at: Option<Instant>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user_id)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

impl Session {
    pub fn build(user_id: String, id_token: String, lifetime: Option<Duration>) -> Self {
        log::debug!(
            "{} building session for user {} (lifetime {:?})",
            LOG_TAG_SESSION,
            user_id,
            lifetime
        );

        Self {
            user_id,
            id_token,
            expires_at: lifetime.map(|lifetime| Instant::now() + lifetime),
        }
    }

    pub fn id_token(&self) -> &str {
        &self.id_token
    }

    pub fn is_valid(&self) -> bool {
        if self.id_token.is_empty() {
            return false;
        }
        match self.expires_at {
            Some(expires_at) => Instant::now() < expires_at,
            None => true,
        }
    }
}
