use crate::core::models::{
    AnnotationOptions, AnnotationRequest, FeatureRequest, FeatureType, ImageContext,
    ImagePayload, LanguageHint, LanguageHintKind,
};
use crate::global_constants::LOG_TAG_REQUEST;

/// Assembles `annotateImage` payloads from the configured feature and hint tables.
#[derive(Debug, Clone)]
pub struct AnnotationRequestBuilder {
    features: Vec<FeatureType>,
    language_hints: Vec<LanguageHint>,
}

impl AnnotationRequestBuilder {
    pub fn new(features: Vec<FeatureType>, language_hints: Vec<LanguageHint>) -> Self {
        Self {
            features,
            language_hints,
        }
    }

    pub fn build(&self, encoded_image: String, options: &AnnotationOptions) -> AnnotationRequest {
        let language_hints: Vec<String> = LanguageHintKind::REQUEST_ORDER
            .into_iter()
            .filter(|kind| options.is_enabled(*kind))
            .filter_map(|kind| self.code_for(kind))
            .collect();

        let request = AnnotationRequest {
            image: ImagePayload {
                content: encoded_image,
            },
            features: self
                .features
                .iter()
                .map(|feature_type| FeatureRequest {
                    feature_type: *feature_type,
                })
                .collect(),
            image_context: ImageContext { language_hints },
        };

        log::debug!(
            "{} features={:?} language_hints={:?}",
            LOG_TAG_REQUEST,
            self.features,
            request.language_hints()
        );
        request
    }

    fn code_for(&self, kind: LanguageHintKind) -> Option<String> {
        self.language_hints
            .iter()
            .find(|hint| hint.kind == kind)
            .map(|hint| hint.code.clone())
    }
}

impl Default for AnnotationRequestBuilder {
    fn default() -> Self {
        Self::new(vec![FeatureType::TextDetection], LanguageHint::default_table())
    }
}
