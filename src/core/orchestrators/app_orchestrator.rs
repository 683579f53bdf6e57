use std::sync::Arc;

use futures::channel::mpsc::{self, UnboundedReceiver};
use futures::StreamExt;

use crate::core::interfaces::ports::WorkflowView;
use crate::core::orchestrators::{
    WorkflowController, WorkflowEvent, WorkflowRuntime, WorkflowServices,
};
use crate::global_constants::LOG_TAG_WORKFLOW;

/// Owns the controller and routes every event through it. Background work
/// (sign-in, annotation calls) reports back on `events`.
pub struct AppOrchestrator {
    controller: WorkflowController,
    runtime: WorkflowRuntime,
    view: Arc<dyn WorkflowView>,
    events: UnboundedReceiver<WorkflowEvent>,
}

impl AppOrchestrator {
    pub fn build(services: WorkflowServices, view: Arc<dyn WorkflowView>) -> Self {
        let (sender, receiver) = mpsc::unbounded();
        let runtime = WorkflowRuntime::new(Arc::new(services), Arc::clone(&view), sender);

        Self {
            controller: WorkflowController::new(),
            runtime,
            view,
            events: receiver,
        }
    }

    pub fn controller(&self) -> &WorkflowController {
        &self.controller
    }

    pub fn is_signed_in(&self) -> bool {
        self.runtime.services().session_manager.has_valid_session()
    }

    pub async fn dispatch(&mut self, event: WorkflowEvent) {
        let commands = self.controller.update(event);
        for command in commands {
            self.runtime.execute(command).await;
        }
        self.view.render(&self.controller);
    }

    /// Next completion from background work. `None` once every sender is gone,
    /// which cannot happen while the runtime is alive.
    pub async fn next_event(&mut self) -> Option<WorkflowEvent> {
        self.events.next().await
    }

    /// Processes background events until `is_done` holds.
    pub async fn run_until(&mut self, is_done: impl Fn(&WorkflowController) -> bool) {
        while !is_done(&self.controller) {
            let Some(event) = self.next_event().await else {
                log::warn!("{} event channel closed", LOG_TAG_WORKFLOW);
                return;
            };
            self.dispatch(event).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::interfaces::adapters::{AuthenticationProvider, CallableFunction};
    use crate::core::interfaces::ports::ImagePicker;
    use crate::core::models::{
        AuthError, DemoCredentials, RemoteError, RemoteErrorCategory, Session,
    };
    use crate::core::orchestrators::WorkflowState;
    use crate::core::services::{
        AnnotationRequestBuilder, ImageEncoder, ImageSource, RemoteAnnotationClient,
        SessionManager,
    };
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::collections::VecDeque;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct MockAuthenticationProvider {
        sign_in_count: AtomicUsize,
        fail: bool,
        never_answers: bool,
    }

    #[async_trait]
    impl AuthenticationProvider for MockAuthenticationProvider {
        async fn sign_in(&self, _credentials: &DemoCredentials) -> Result<Session, AuthError> {
            self.sign_in_count.fetch_add(1, Ordering::SeqCst);
            if self.never_answers {
                std::future::pending::<()>().await;
            }
            if self.fail {
                return Err(AuthError::Rejected("INVALID_PASSWORD".to_string()));
            }
            Ok(Session::build("user-1".to_string(), "token".to_string(), None))
        }
    }

    struct ScriptedCallableFunction {
        responses: Mutex<VecDeque<Result<Value, RemoteError>>>,
        call_count: AtomicUsize,
        last_data: Mutex<Option<Value>>,
    }

    impl ScriptedCallableFunction {
        fn new(responses: Vec<Result<Value, RemoteError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                call_count: AtomicUsize::new(0),
                last_data: Mutex::new(None),
            }
        }

        fn get_call_count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CallableFunction for ScriptedCallableFunction {
        async fn call(
            &self,
            _function_name: &str,
            data: Value,
            _session: &Session,
        ) -> Result<Value, RemoteError> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            *self.last_data.lock().unwrap() = Some(data);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(RemoteError::new(RemoteErrorCategory::Unknown, "script ran out")))
        }
    }

    struct MockImagePicker {
        path: Option<PathBuf>,
    }

    #[async_trait]
    impl ImagePicker for MockImagePicker {
        async fn pick_image_file(&self) -> anyhow::Result<Option<PathBuf>> {
            Ok(self.path.clone())
        }
    }

    #[derive(Default)]
    struct RecordingView {
        notices: Mutex<Vec<String>>,
        rendered_states: Mutex<Vec<String>>,
    }

    impl RecordingView {
        fn get_notices(&self) -> Vec<String> {
            self.notices.lock().unwrap().clone()
        }
    }

    impl WorkflowView for RecordingView {
        fn show_notice(&self, notice: &str) {
            self.notices.lock().unwrap().push(notice.to_string());
        }

        fn render(&self, controller: &WorkflowController) {
            self.rendered_states
                .lock()
                .unwrap()
                .push(controller.state().to_string());
        }
    }

    struct Harness {
        orchestrator: AppOrchestrator,
        auth: Arc<MockAuthenticationProvider>,
        function: Arc<ScriptedCallableFunction>,
        view: Arc<RecordingView>,
        _image_dir: tempfile::TempDir,
    }

    fn create_harness(
        fail_sign_in: bool,
        picker_returns_image: bool,
        responses: Vec<Result<Value, RemoteError>>,
    ) -> Harness {
        let auth = MockAuthenticationProvider {
            sign_in_count: AtomicUsize::new(0),
            fail: fail_sign_in,
            never_answers: false,
        };
        build_harness(auth, picker_returns_image, responses)
    }

    fn build_harness(
        auth: MockAuthenticationProvider,
        picker_returns_image: bool,
        responses: Vec<Result<Value, RemoteError>>,
    ) -> Harness {
        let image_dir = tempfile::tempdir().unwrap();
        let image_path = image_dir.path().join("page.png");
        image::RgbImage::new(16, 12).save(&image_path).unwrap();

        let auth = Arc::new(auth);
        let function = Arc::new(ScriptedCallableFunction::new(responses));
        let view = Arc::new(RecordingView::default());
        let picker = MockImagePicker {
            path: picker_returns_image.then_some(image_path),
        };

        let services = WorkflowServices {
            session_manager: SessionManager::new(auth.clone(), DemoCredentials::default()),
            image_source: ImageSource::new(Arc::new(picker)),
            encoder: ImageEncoder::default(),
            request_builder: AnnotationRequestBuilder::default(),
            annotation_client: RemoteAnnotationClient::new(
                function.clone(),
                "annotateImage".to_string(),
            ),
        };

        Harness {
            orchestrator: AppOrchestrator::build(services, view.clone()),
            auth,
            function,
            view,
            _image_dir: image_dir,
        }
    }

    fn hello_world() -> Result<Value, RemoteError> {
        Ok(json!([{ "fullTextAnnotation": { "text": "Hello World" } }]))
    }

    fn is_settled(controller: &WorkflowController) -> bool {
        !controller.is_submitting()
    }

    async fn pick_image(harness: &mut Harness) {
        harness.orchestrator.dispatch(WorkflowEvent::PickRequested).await;
        harness
            .orchestrator
            .run_until(|controller| controller.selected_image().is_some())
            .await;
    }

    #[tokio::test]
    async fn test_started_signs_in_and_announces_it() {
        let mut harness = create_harness(false, true, vec![]);

        harness.orchestrator.dispatch(WorkflowEvent::Started).await;
        let event = harness.orchestrator.next_event().await.unwrap();
        harness.orchestrator.dispatch(event).await;

        assert_eq!(harness.auth.sign_in_count.load(Ordering::SeqCst), 1);
        assert!(harness.orchestrator.is_signed_in());
        assert_eq!(harness.view.get_notices(), vec!["Sign in success."]);
        assert_eq!(harness.orchestrator.controller().state(), &WorkflowState::Idle);
    }

    #[tokio::test]
    async fn test_transport_failure_then_retry_resolves_hello_world() {
        let mut harness = create_harness(
            false,
            true,
            vec![
                Err(RemoteError::new(RemoteErrorCategory::Network, "offline")),
                hello_world(),
            ],
        );

        harness.orchestrator.dispatch(WorkflowEvent::Started).await;
        pick_image(&mut harness).await;
        assert_eq!(
            harness.orchestrator.controller().state(),
            &WorkflowState::ImageSelected
        );

        harness.orchestrator.dispatch(WorkflowEvent::SubmitRequested).await;
        harness.orchestrator.dispatch(WorkflowEvent::SubmitRequested).await;
        harness.orchestrator.run_until(is_settled).await;

        assert_eq!(
            harness.orchestrator.controller().state().to_string(),
            "Failed(task failed)"
        );
        assert_eq!(harness.function.get_call_count(), 1);
        assert!(harness
            .view
            .get_notices()
            .contains(&"Annotation already in progress.".to_string()));
        assert!(harness.view.get_notices().contains(&"Task failed.".to_string()));

        harness.orchestrator.dispatch(WorkflowEvent::SubmitRequested).await;
        harness.orchestrator.run_until(is_settled).await;

        assert_eq!(
            harness.orchestrator.controller().state(),
            &WorkflowState::Resolved("Hello World".to_string())
        );
        assert_eq!(harness.function.get_call_count(), 2);
        assert_eq!(harness.auth.sign_in_count.load(Ordering::SeqCst), 1);
        assert_eq!(
            harness.view.get_notices().last().map(String::as_str),
            Some("Annotation complete!")
        );
    }

    #[tokio::test]
    async fn test_submission_sends_stringified_request_with_hints() {
        let mut harness = create_harness(false, true, vec![hello_world()]);

        pick_image(&mut harness).await;
        harness
            .orchestrator
            .dispatch(WorkflowEvent::OptionsChanged(
                crate::core::models::AnnotationOptions {
                    use_english_hint: true,
                    use_handwritten_hint: true,
                },
            ))
            .await;
        harness.orchestrator.dispatch(WorkflowEvent::SubmitRequested).await;
        harness.orchestrator.run_until(is_settled).await;

        let data = harness.function.last_data.lock().unwrap().clone().unwrap();
        let request: Value = serde_json::from_str(data.as_str().unwrap()).unwrap();
        assert_eq!(request["imageContext"]["languageHints"], json!(["en", "handwrit"]));
        assert_eq!(request["features"], json!([{ "type": "TEXT_DETECTION" }]));
        assert!(!request["image"]["content"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_pick_leaves_state_unchanged() {
        let mut harness = create_harness(false, false, vec![]);

        harness.orchestrator.dispatch(WorkflowEvent::PickRequested).await;
        let event = harness.orchestrator.next_event().await.unwrap();
        harness.orchestrator.dispatch(event).await;

        assert_eq!(harness.orchestrator.controller().state(), &WorkflowState::Idle);
        assert!(harness.orchestrator.controller().selected_image().is_none());
        assert!(harness.view.get_notices().is_empty());
    }

    #[tokio::test]
    async fn test_sign_out_forces_new_sign_in_for_next_submission() {
        let mut harness = create_harness(false, true, vec![hello_world()]);

        harness.orchestrator.dispatch(WorkflowEvent::Started).await;
        let event = harness.orchestrator.next_event().await.unwrap();
        harness.orchestrator.dispatch(event).await;
        pick_image(&mut harness).await;

        harness.orchestrator.dispatch(WorkflowEvent::SignOutRequested).await;
        harness.orchestrator.dispatch(WorkflowEvent::SubmitRequested).await;
        harness.orchestrator.run_until(is_settled).await;

        assert_eq!(harness.auth.sign_in_count.load(Ordering::SeqCst), 2);
        assert!(harness.view.get_notices().contains(&"Signed out.".to_string()));
        assert_eq!(
            harness.orchestrator.controller().state(),
            &WorkflowState::Resolved("Hello World".to_string())
        );
    }

    #[tokio::test]
    async fn test_failed_sign_in_fails_submission_without_calling_function() {
        let mut harness = create_harness(true, true, vec![hello_world()]);

        pick_image(&mut harness).await;
        harness.orchestrator.dispatch(WorkflowEvent::SubmitRequested).await;
        harness.orchestrator.run_until(is_settled).await;

        assert_eq!(
            harness.orchestrator.controller().state().to_string(),
            "Failed(authentication failed)"
        );
        assert_eq!(harness.function.get_call_count(), 0);
        assert_eq!(harness.view.get_notices(), vec!["Authentication failed."]);
    }

    #[tokio::test]
    async fn test_every_dispatch_renders() {
        let mut harness = create_harness(false, false, vec![]);

        harness.orchestrator.dispatch(WorkflowEvent::SubmitRequested).await;

        assert_eq!(
            *harness.view.rendered_states.lock().unwrap(),
            vec!["Idle".to_string()]
        );
        assert_eq!(harness.view.get_notices(), vec!["Load a picture first."]);
    }

    #[tokio::test]
    async fn test_commands_stay_responsive_while_sign_in_hangs() {
        let auth = MockAuthenticationProvider {
            sign_in_count: AtomicUsize::new(0),
            fail: false,
            never_answers: true,
        };
        let mut harness = build_harness(auth, true, vec![]);

        harness.orchestrator.dispatch(WorkflowEvent::Started).await;
        while harness.auth.sign_in_count.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }

        assert!(!harness.orchestrator.is_signed_in());
        let signed_out = tokio::time::timeout(
            std::time::Duration::from_secs(2),
            harness.orchestrator.dispatch(WorkflowEvent::SignOutRequested),
        )
        .await;
        assert!(signed_out.is_ok());
        assert_eq!(harness.view.get_notices(), vec!["Signed out."]);

        pick_image(&mut harness).await;
        assert_eq!(
            harness.orchestrator.controller().state(),
            &WorkflowState::ImageSelected
        );
    }
}
