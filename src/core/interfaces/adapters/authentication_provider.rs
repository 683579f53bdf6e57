use async_trait::async_trait;

use crate::core::models::{AuthError, DemoCredentials, Session};

#[async_trait]
pub trait AuthenticationProvider: Send + Sync {
    async fn sign_in(&self, credentials: &DemoCredentials) -> Result<Session, AuthError>;
}
