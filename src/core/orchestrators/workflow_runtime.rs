use std::sync::Arc;

use futures::channel::mpsc::UnboundedSender;
use uuid::Uuid;

use crate::core::interfaces::ports::WorkflowView;
use crate::core::models::{AnnotationOptions, AnnotationResult, SelectedImage, WorkflowError};
use crate::core::orchestrators::{WorkflowCommand, WorkflowEvent};
use crate::core::services::{
    AnnotationRequestBuilder, ImageEncoder, ImageSource, RemoteAnnotationClient, SessionManager,
};
use crate::global_constants::LOG_TAG_RUNTIME;

pub struct WorkflowServices {
    pub session_manager: SessionManager,
    pub image_source: ImageSource,
    pub encoder: ImageEncoder,
    pub request_builder: AnnotationRequestBuilder,
    pub annotation_client: RemoteAnnotationClient,
}

impl WorkflowServices {
    /// ensure session → encode → build → call, for one submission.
    pub async fn run_annotation(
        &self,
        image: SelectedImage,
        options: AnnotationOptions,
    ) -> Result<AnnotationResult, WorkflowError> {
        let request_id = Uuid::new_v4();
        log::info!(
            "{} [{}] annotating {:?}",
            LOG_TAG_RUNTIME,
            request_id,
            image.source
        );

        let session = self.session_manager.ensure_session().await?;
        let encoded = self.encoder.encode_in_background(image).await?;
        let request = self.request_builder.build(encoded, &options);
        let result = self.annotation_client.call(&request, &session).await;

        match &result {
            Ok(_) => log::info!("{} [{}] annotation succeeded", LOG_TAG_RUNTIME, request_id),
            Err(error) => log::error!(
                "{} [{}] annotation failed: {:?}",
                LOG_TAG_RUNTIME,
                request_id,
                error
            ),
        }

        result.map_err(WorkflowError::from)
    }
}

/// Carries out controller commands and feeds completions back as events.
pub struct WorkflowRuntime {
    services: Arc<WorkflowServices>,
    view: Arc<dyn WorkflowView>,
    events: UnboundedSender<WorkflowEvent>,
}

impl WorkflowRuntime {
    pub fn new(
        services: Arc<WorkflowServices>,
        view: Arc<dyn WorkflowView>,
        events: UnboundedSender<WorkflowEvent>,
    ) -> Self {
        Self {
            services,
            view,
            events,
        }
    }

    pub fn services(&self) -> &WorkflowServices {
        &self.services
    }

    pub async fn execute(&self, command: WorkflowCommand) {
        match command {
            WorkflowCommand::EnsureSession => self.spawn_sign_in(),
            WorkflowCommand::InvalidateSession => {
                self.services.session_manager.invalidate();
            }
            WorkflowCommand::LaunchPicker { ticket } => {
                // The picker owns the screen until it resolves.
                let outcome = self.services.image_source.pick_image().await;
                send_event(&self.events, WorkflowEvent::ImagePicked { ticket, outcome });
            }
            WorkflowCommand::RunAnnotation {
                submission,
                image,
                options,
            } => self.spawn_annotation(submission, image, options),
            WorkflowCommand::Notify(notice) => self.view.show_notice(&notice),
        }
    }

    fn spawn_sign_in(&self) {
        let services = Arc::clone(&self.services);
        let events = self.events.clone();

        tokio::spawn(async move {
            let result = services
                .session_manager
                .ensure_session()
                .await
                .map(|session| session.user_id);
            send_event(&events, WorkflowEvent::SignInCompleted(result));
        });
    }

    fn spawn_annotation(&self, submission: u64, image: SelectedImage, options: AnnotationOptions) {
        let services = Arc::clone(&self.services);
        let events = self.events.clone();

        log::debug!("{} spawning submission {}", LOG_TAG_RUNTIME, submission);

        tokio::spawn(async move {
            let result = services.run_annotation(image, options).await;
            send_event(&events, WorkflowEvent::CallResolved { submission, result });
        });
    }
}

fn send_event(events: &UnboundedSender<WorkflowEvent>, event: WorkflowEvent) {
    if let Err(error) = events.unbounded_send(event) {
        log::warn!(
            "{} dropping event, workflow loop is gone: {:?}",
            LOG_TAG_RUNTIME,
            error.into_inner()
        );
    }
}
