use serde::{Deserialize, Serialize};

use crate::global_constants::{ENGLISH_HINT_CODE, HANDWRITTEN_HINT_CODE};

/// Checkbox state on the main screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnnotationOptions {
    pub use_english_hint: bool,
    pub use_handwritten_hint: bool,
}

impl AnnotationOptions {
    pub fn is_enabled(&self, kind: LanguageHintKind) -> bool {
        match kind {
            LanguageHintKind::English => self.use_english_hint,
            LanguageHintKind::Handwritten => self.use_handwritten_hint,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeatureType {
    TextDetection,
    DocumentTextDetection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LanguageHintKind {
    English,
    Handwritten,
}

impl LanguageHintKind {
    /// Order of hints on the wire, whatever the table order.
    pub const REQUEST_ORDER: [LanguageHintKind; 2] =
        [LanguageHintKind::English, LanguageHintKind::Handwritten];
}

/// One row of the hint table: which toggle enables which code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageHint {
    pub kind: LanguageHintKind,
    pub code: String,
}

impl LanguageHint {
    pub fn default_table() -> Vec<LanguageHint> {
        vec![
            LanguageHint {
                kind: LanguageHintKind::English,
                code: ENGLISH_HINT_CODE.to_string(),
            },
            LanguageHint {
                kind: LanguageHintKind::Handwritten,
                code: HANDWRITTEN_HINT_CODE.to_string(),
            },
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagePayload {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRequest {
    #[serde(rename = "type")]
    pub feature_type: FeatureType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageContext {
    pub language_hints: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationRequest {
    pub image: ImagePayload,
    pub features: Vec<FeatureRequest>,
    pub image_context: ImageContext,
}

impl AnnotationRequest {
    pub fn language_hints(&self) -> &[String] {
        &self.image_context.language_hints
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationResult {
    pub full_text: String,
}

/// Strict shape of one element of the `annotateImage` response array.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotateImageResponse {
    #[serde(default)]
    pub full_text_annotation: Option<FullTextAnnotation>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FullTextAnnotation {
    #[serde(default)]
    pub text: Option<String>,
}
