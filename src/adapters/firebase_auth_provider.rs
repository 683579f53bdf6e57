use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::interfaces::adapters::AuthenticationProvider;
use crate::core::models::{AuthError, DemoCredentials, FirebaseSettings, Session};
use crate::global_constants::LOG_TAG_FIREBASE_AUTH;

const SIGN_IN_PATH: &str = "/v1/accounts:signInWithPassword";
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    id_token: String,
    local_id: String,
    #[serde(default)]
    expires_in: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Email/password sign-in against the Firebase Auth REST API.
pub struct FirebaseAuthProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl FirebaseAuthProvider {
    pub fn new(client: reqwest::Client, settings: &FirebaseSettings) -> Self {
        Self {
            client,
            base_url: settings.auth_base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
        }
    }

    fn construct_sign_in_url(&self) -> String {
        format!(
            "{}{}?key={}",
            self.base_url,
            SIGN_IN_PATH,
            urlencoding::encode(&self.api_key)
        )
    }

    fn session_lifetime(expires_in: Option<&str>) -> Option<Duration> {
        expires_in
            .and_then(|seconds| seconds.trim().parse::<u64>().ok())
            .map(|seconds| Duration::from_secs(seconds).saturating_sub(TOKEN_EXPIRY_MARGIN))
    }

    fn rejection_message(status: reqwest::StatusCode, body: &str) -> String {
        serde_json::from_str::<ErrorEnvelope>(body)
            .map(|envelope| envelope.error.message)
            .unwrap_or_else(|_| format!("HTTP {}", status))
    }
}

#[async_trait]
impl AuthenticationProvider for FirebaseAuthProvider {
    async fn sign_in(&self, credentials: &DemoCredentials) -> Result<Session, AuthError> {
        log::info!("{} signing in {}", LOG_TAG_FIREBASE_AUTH, credentials.email);

        let response = self
            .client
            .post(self.construct_sign_in_url())
            .json(&SignInRequest {
                email: &credentials.email,
                password: &credentials.password,
                return_secure_token: true,
            })
            .send()
            .await
            .map_err(|error| AuthError::Network(error.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|error| AuthError::Network(error.to_string()))?;

        log::debug!("{} response status {}", LOG_TAG_FIREBASE_AUTH, status);

        if status.is_server_error() {
            return Err(AuthError::Network(Self::rejection_message(status, &body)));
        }
        if !status.is_success() {
            return Err(AuthError::Rejected(Self::rejection_message(status, &body)));
        }

        let parsed: SignInResponse = serde_json::from_str(&body)
            .map_err(|error| AuthError::MalformedResponse(error.to_string()))?;

        Ok(Session::build(
            parsed.local_id,
            parsed.id_token,
            Self::session_lifetime(parsed.expires_in.as_deref()),
        ))
    }
}
