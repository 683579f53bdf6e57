use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::core::interfaces::adapters::AuthenticationProvider;
use crate::core::models::{AuthError, DemoCredentials, Session};
use crate::global_constants::LOG_TAG_SESSION;

#[derive(Default)]
struct CachedSession {
    session: Option<Session>,
    /// Bumped on every invalidation so a sign-in that started earlier cannot
    /// restore a session the user already dropped.
    generation: u64,
}

/// Sole owner of the current [`Session`]. Everyone else gets clones.
pub struct SessionManager {
    provider: Arc<dyn AuthenticationProvider>,
    credentials: DemoCredentials,
    cached: Mutex<CachedSession>,
    /// Serializes exchanges only; never taken by readers.
    sign_in_lock: tokio::sync::Mutex<()>,
}

impl SessionManager {
    pub fn new(provider: Arc<dyn AuthenticationProvider>, credentials: DemoCredentials) -> Self {
        Self {
            provider,
            credentials,
            cached: Mutex::new(CachedSession::default()),
            sign_in_lock: tokio::sync::Mutex::new(()),
        }
    }

    fn lock_cached(&self) -> MutexGuard<'_, CachedSession> {
        self.cached.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn valid_cached_session(&self) -> Option<Session> {
        self.lock_cached()
            .session
            .as_ref()
            .filter(|session| session.is_valid())
            .cloned()
    }

    /// Returns the cached session when still valid, otherwise signs in once.
    /// Concurrent callers queue on the exchange and reuse its result.
    pub async fn ensure_session(&self) -> Result<Session, AuthError> {
        if let Some(session) = self.valid_cached_session() {
            log::debug!(
                "{} reusing session for user {}",
                LOG_TAG_SESSION,
                session.user_id
            );
            return Ok(session);
        }

        let _exchange = self.sign_in_lock.lock().await;

        if let Some(session) = self.valid_cached_session() {
            log::debug!(
                "{} session established while waiting, reusing it",
                LOG_TAG_SESSION
            );
            return Ok(session);
        }

        let generation = self.lock_cached().generation;
        log::info!(
            "{} signing in as {}",
            LOG_TAG_SESSION,
            self.credentials.email
        );

        match self.provider.sign_in(&self.credentials).await {
            Ok(session) => {
                log::info!("{} signed in as user {}", LOG_TAG_SESSION, session.user_id);
                let mut cached = self.lock_cached();
                if cached.generation == generation {
                    cached.session = Some(session.clone());
                } else {
                    log::info!(
                        "{} signed out during the exchange, not caching the session",
                        LOG_TAG_SESSION
                    );
                }
                Ok(session)
            }
            Err(error) => {
                log::error!("{} sign-in failed: {}", LOG_TAG_SESSION, error);
                Err(error)
            }
        }
    }

    pub fn invalidate(&self) {
        let mut cached = self.lock_cached();
        cached.generation += 1;
        if cached.session.take().is_some() {
            log::info!("{} session invalidated", LOG_TAG_SESSION);
        }
    }

    pub fn has_valid_session(&self) -> bool {
        self.valid_cached_session().is_some()
    }
}
