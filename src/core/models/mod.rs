mod annotation;
mod app_settings;
mod errors;
mod selected_image;
mod session;

pub use annotation::{
    AnnotateImageResponse, AnnotationOptions, AnnotationRequest, AnnotationResult, FeatureRequest,
    FeatureType, ImageContext, ImagePayload, LanguageHint, LanguageHintKind,
};
pub use app_settings::{AppSettings, DemoCredentials, EncoderSettings, FirebaseSettings};
pub use errors::{
    AnnotationError, AuthError, EncodingError, ParseError, RemoteError, RemoteErrorCategory,
    WorkflowError,
};
pub use selected_image::{PickOutcome, SelectedImage};
pub use session::Session;
