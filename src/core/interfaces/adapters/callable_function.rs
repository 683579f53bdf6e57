use async_trait::async_trait;

use crate::core::models::{RemoteError, Session};

/// An authenticated cloud function reachable by name.
///
/// `data` goes out as the call envelope's payload; the returned value is the
/// loosely typed `result` the function produced.
#[async_trait]
pub trait CallableFunction: Send + Sync {
    async fn call(
        &self,
        function_name: &str,
        data: serde_json::Value,
        session: &Session,
    ) -> Result<serde_json::Value, RemoteError>;
}
