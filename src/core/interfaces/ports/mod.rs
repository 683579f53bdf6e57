mod image_picker;
mod workflow_view;

pub use image_picker::ImagePicker;
pub use workflow_view::WorkflowView;
