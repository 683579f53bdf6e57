mod annotation_request_builder;
mod image_encoder;
mod image_source;
mod remote_annotation_client;
mod session_manager;

pub use annotation_request_builder::AnnotationRequestBuilder;
pub use image_encoder::ImageEncoder;
pub use image_source::ImageSource;
pub use remote_annotation_client::RemoteAnnotationClient;
pub use session_manager::SessionManager;
