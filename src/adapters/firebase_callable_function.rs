use async_trait::async_trait;
use serde_json::{json, Value};

use crate::core::interfaces::adapters::CallableFunction;
use crate::core::models::{FirebaseSettings, RemoteError, RemoteErrorCategory, Session};
use crate::global_constants::LOG_TAG_FIREBASE_FUNCTIONS;

/// HTTPS callable functions: `{"data": ..}` in, `{"result": ..}` or `{"error": ..}` out.
pub struct FirebaseCallableFunction {
    client: reqwest::Client,
    base_url: String,
}

impl FirebaseCallableFunction {
    pub fn new(client: reqwest::Client, settings: &FirebaseSettings) -> Self {
        Self {
            client,
            base_url: settings.functions_base_url.trim_end_matches('/').to_string(),
        }
    }

    fn construct_function_url(&self, function_name: &str) -> String {
        format!("{}/{}", self.base_url, function_name)
    }

    fn map_error_body(status: reqwest::StatusCode, error: &Value) -> RemoteError {
        let category = error["status"]
            .as_str()
            .map(RemoteErrorCategory::from_status_code)
            .unwrap_or_else(|| RemoteErrorCategory::from_http_status(status.as_u16()));
        let message = error["message"]
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status));

        RemoteError::new(category, message)
    }

    fn unwrap_envelope(status: reqwest::StatusCode, body: &str) -> Result<Value, RemoteError> {
        let envelope: Value = match serde_json::from_str(body) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                return Err(RemoteError::new(
                    RemoteErrorCategory::from_http_status(status.as_u16()),
                    format!("HTTP {}", status),
                ));
            }
            Err(error) => {
                return Err(RemoteError::new(
                    RemoteErrorCategory::Service,
                    format!("response is not a callable envelope: {}", error),
                ));
            }
        };

        if let Some(error) = envelope.get("error") {
            return Err(Self::map_error_body(status, error));
        }
        if !status.is_success() {
            return Err(RemoteError::new(
                RemoteErrorCategory::from_http_status(status.as_u16()),
                format!("HTTP {}", status),
            ));
        }

        envelope.get("result").cloned().ok_or_else(|| {
            RemoteError::new(
                RemoteErrorCategory::Service,
                "response envelope has no result",
            )
        })
    }
}

#[async_trait]
impl CallableFunction for FirebaseCallableFunction {
    async fn call(
        &self,
        function_name: &str,
        data: Value,
        session: &Session,
    ) -> Result<Value, RemoteError> {
        let url = self.construct_function_url(function_name);
        log::info!("{} calling {}", LOG_TAG_FIREBASE_FUNCTIONS, url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(session.id_token())
            .json(&json!({ "data": data }))
            .send()
            .await
            .map_err(|error| RemoteError::new(RemoteErrorCategory::Network, error.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|error| RemoteError::new(RemoteErrorCategory::Network, error.to_string()))?;

        log::debug!(
            "{} {} answered {} with {} bytes",
            LOG_TAG_FIREBASE_FUNCTIONS,
            function_name,
            status,
            body.len()
        );

        Self::unwrap_envelope(status, &body)
    }
}
