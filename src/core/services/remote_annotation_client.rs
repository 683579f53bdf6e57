use std::sync::Arc;

use crate::core::interfaces::adapters::CallableFunction;
use crate::core::models::{
    AnnotateImageResponse, AnnotationError, AnnotationRequest, AnnotationResult, ParseError,
    RemoteError, RemoteErrorCategory, Session,
};
use crate::global_constants::LOG_TAG_ANNOTATION;

pub struct RemoteAnnotationClient {
    function: Arc<dyn CallableFunction>,
    function_name: String,
}

impl RemoteAnnotationClient {
    pub fn new(function: Arc<dyn CallableFunction>, function_name: String) -> Self {
        Self {
            function,
            function_name,
        }
    }

    /// Sends `request` as a JSON string and pulls the full text out of the reply.
    pub async fn call(
        &self,
        request: &AnnotationRequest,
        session: &Session,
    ) -> Result<AnnotationResult, AnnotationError> {
        let request_json = serde_json::to_string(request).map_err(|error| {
            RemoteError::new(RemoteErrorCategory::InvalidArgument, error.to_string())
        })?;

        log::info!(
            "{} calling {} with a {} byte request",
            LOG_TAG_ANNOTATION,
            self.function_name,
            request_json.len()
        );

        let payload = self
            .function
            .call(
                &self.function_name,
                serde_json::Value::String(request_json),
                session,
            )
            .await
            .inspect_err(|error| log::error!("{} {}", LOG_TAG_ANNOTATION, error))?;

        let full_text = Self::extract_full_text(payload)
            .inspect_err(|error| log::error!("{} unusable response: {}", LOG_TAG_ANNOTATION, error))?;

        log::info!(
            "{} annotation complete, {} characters recognized",
            LOG_TAG_ANNOTATION,
            full_text.chars().count()
        );

        Ok(AnnotationResult { full_text })
    }

    /// Normalizes the loosely typed payload into [`AnnotateImageResponse`]s,
    /// then walks `[0].fullTextAnnotation.text`.
    pub fn extract_full_text(payload: serde_json::Value) -> Result<String, ParseError> {
        let responses: Vec<AnnotateImageResponse> = serde_json::from_value(payload)
            .map_err(|error| ParseError::Malformed(error.to_string()))?;

        let first = responses
            .into_iter()
            .next()
            .ok_or(ParseError::EmptyResponse)?;

        first
            .full_text_annotation
            .ok_or(ParseError::MissingFullTextAnnotation)?
            .text
            .ok_or(ParseError::MissingText)
    }
}
