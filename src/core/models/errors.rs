use thiserror::Error;

use crate::global_constants::{FAILURE_AUTHENTICATION_FAILED, FAILURE_TASK_FAILED};

/// Sign-in exchange with the authentication provider failed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuthError {
    #[error("sign-in rejected: {0}")]
    Rejected(String),

    #[error("authentication provider unreachable: {0}")]
    Network(String),

    #[error("unexpected sign-in response: {0}")]
    MalformedResponse(String),
}

/// Local image processing failed before anything was sent.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EncodingError {
    #[error("image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    #[error("jpeg compression failed: {0}")]
    Compression(String),

    #[error("encoder task aborted: {0}")]
    Aborted(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteErrorCategory {
    Network,
    Unauthenticated,
    PermissionDenied,
    QuotaExceeded,
    InvalidArgument,
    NotFound,
    Service,
    Unknown,
}

impl RemoteErrorCategory {
    /// Maps a canonical callable status code (`"RESOURCE_EXHAUSTED"`, ...) to a category.
    pub fn from_status_code(status: &str) -> Self {
        match status {
            "UNAUTHENTICATED" => Self::Unauthenticated,
            "PERMISSION_DENIED" => Self::PermissionDenied,
            "RESOURCE_EXHAUSTED" => Self::QuotaExceeded,
            "INVALID_ARGUMENT" | "FAILED_PRECONDITION" | "OUT_OF_RANGE" => Self::InvalidArgument,
            "NOT_FOUND" => Self::NotFound,
            "UNAVAILABLE" | "DEADLINE_EXCEEDED" => Self::Network,
            "INTERNAL" | "DATA_LOSS" | "UNIMPLEMENTED" | "ABORTED" | "CANCELLED" => Self::Service,
            _ => Self::Unknown,
        }
    }

    /// Fallback when the response carried no recognizable error body.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            401 => Self::Unauthenticated,
            403 => Self::PermissionDenied,
            404 => Self::NotFound,
            400 => Self::InvalidArgument,
            429 => Self::QuotaExceeded,
            500..=599 => Self::Service,
            _ => Self::Unknown,
        }
    }
}

/// The call to the annotation endpoint itself failed.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("annotation call failed ({category:?}): {message}")]
pub struct RemoteError {
    pub category: RemoteErrorCategory,
    pub message: String,
}

impl RemoteError {
    pub fn new(category: RemoteErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
        }
    }
}

/// The call succeeded but the payload did not have the expected shape.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("response payload is not an array of annotations: {0}")]
    Malformed(String),

    #[error("response array is empty")]
    EmptyResponse,

    #[error("first annotation has no fullTextAnnotation")]
    MissingFullTextAnnotation,

    #[error("fullTextAnnotation has no text")]
    MissingText,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnnotationError {
    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Everything that can end a submission in `Failed`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorkflowError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl From<AnnotationError> for WorkflowError {
    fn from(error: AnnotationError) -> Self {
        match error {
            AnnotationError::Remote(remote) => Self::Remote(remote),
            AnnotationError::Parse(parse) => Self::Parse(parse),
        }
    }
}

impl WorkflowError {
    pub fn user_message(&self) -> &'static str {
        match self {
            WorkflowError::Auth(_) => FAILURE_AUTHENTICATION_FAILED,
            WorkflowError::Encoding(_) | WorkflowError::Remote(_) | WorkflowError::Parse(_) => {
                FAILURE_TASK_FAILED
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_and_parse_errors_share_user_message() {
        let remote = WorkflowError::from(RemoteError::new(RemoteErrorCategory::Network, "offline"));
        let parse = WorkflowError::from(ParseError::MissingFullTextAnnotation);

        assert_eq!(remote.user_message(), "task failed");
        assert_eq!(parse.user_message(), "task failed");
        assert_ne!(remote, parse);
    }

    #[test]
    fn test_annotation_error_keeps_its_kind_when_widened() {
        let widened: WorkflowError = AnnotationError::from(ParseError::MissingText).into();

        assert!(matches!(widened, WorkflowError::Parse(ParseError::MissingText)));
    }

    #[test]
    fn test_auth_error_has_its_own_user_message() {
        let error = WorkflowError::from(AuthError::Rejected("INVALID_PASSWORD".to_string()));

        assert_eq!(error.user_message(), "authentication failed");
    }

    #[test]
    fn test_status_codes_map_to_coarse_categories() {
        assert_eq!(
            RemoteErrorCategory::from_status_code("RESOURCE_EXHAUSTED"),
            RemoteErrorCategory::QuotaExceeded
        );
        assert_eq!(
            RemoteErrorCategory::from_status_code("UNAUTHENTICATED"),
            RemoteErrorCategory::Unauthenticated
        );
        assert_eq!(
            RemoteErrorCategory::from_status_code("INTERNAL"),
            RemoteErrorCategory::Service
        );
        assert_eq!(
            RemoteErrorCategory::from_status_code("SOMETHING_NEW"),
            RemoteErrorCategory::Unknown
        );
        assert_eq!(
            RemoteErrorCategory::from_http_status(503),
            RemoteErrorCategory::Service
        );
    }
}
