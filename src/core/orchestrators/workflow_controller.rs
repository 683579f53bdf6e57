use crate::core::models::{
    AnnotationOptions, AnnotationResult, AuthError, PickOutcome, SelectedImage, WorkflowError,
};
use crate::global_constants::{
    LOG_TAG_WORKFLOW, NOTICE_ANNOTATION_COMPLETE, NOTICE_AUTHENTICATION_FAILED,
    NOTICE_IMAGE_LOAD_FAILED, NOTICE_NO_IMAGE_SELECTED, NOTICE_SIGNED_OUT,
    NOTICE_SIGN_IN_SUCCESS, NOTICE_SUBMISSION_IN_FLIGHT, NOTICE_TASK_FAILED,
};

#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowState {
    Idle,
    ImageSelected,
    Submitting,
    Resolved(String),
    Failed(WorkflowError),
}

impl std::fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkflowState::Idle => write!(f, "Idle"),
            WorkflowState::ImageSelected => write!(f, "ImageSelected"),
            WorkflowState::Submitting => write!(f, "Submitting"),
            WorkflowState::Resolved(_) => write!(f, "Resolved"),
            WorkflowState::Failed(error) => write!(f, "Failed({})", error.user_message()),
        }
    }
}

pub enum WorkflowEvent {
    Started,
    SignInCompleted(Result<String, AuthError>),
    SignOutRequested,
    PickRequested,
    ImagePicked {
        ticket: u64,
        outcome: PickOutcome,
    },
    OptionsChanged(AnnotationOptions),
    SubmitRequested,
    CallResolved {
        submission: u64,
        result: Result<AnnotationResult, WorkflowError>,
    },
}

impl std::fmt::Debug for WorkflowEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkflowEvent::Started => write!(f, "Started"),
            WorkflowEvent::SignInCompleted(result) => {
                write!(f, "SignInCompleted({:?})", result.is_ok())
            }
            WorkflowEvent::SignOutRequested => write!(f, "SignOutRequested"),
            WorkflowEvent::PickRequested => write!(f, "PickRequested"),
            WorkflowEvent::ImagePicked { ticket, outcome } => {
                let outcome_name = match outcome {
                    PickOutcome::Selected(_) => "Selected",
                    PickOutcome::Cancelled => "Cancelled",
                    PickOutcome::Failed(_) => "Failed",
                };
                write!(f, "ImagePicked({}, {})", ticket, outcome_name)
            }
            WorkflowEvent::OptionsChanged(options) => write!(f, "OptionsChanged({:?})", options),
            WorkflowEvent::SubmitRequested => write!(f, "SubmitRequested"),
            WorkflowEvent::CallResolved { submission, result } => {
                write!(f, "CallResolved({}, {:?})", submission, result.is_ok())
            }
        }
    }
}

#[derive(Debug, Clone)]
pub enum WorkflowCommand {
    EnsureSession,
    InvalidateSession,
    LaunchPicker {
        ticket: u64,
    },
    RunAnnotation {
        submission: u64,
        image: SelectedImage,
        options: AnnotationOptions,
    },
    Notify(String),
}

struct InFlightSubmission {
    id: u64,
    image: SelectedImage,
}

/// The single-screen state machine. Performs no I/O: every event yields the
/// commands the runtime must carry out.
pub struct WorkflowController {
    state: WorkflowState,
    selected_image: Option<SelectedImage>,
    options: AnnotationOptions,
    last_pick_ticket: u64,
    pending_pick: Option<u64>,
    last_submission: u64,
    in_flight: Option<InFlightSubmission>,
}

impl Default for WorkflowController {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkflowController {
    pub fn new() -> Self {
        Self {
            state: WorkflowState::Idle,
            selected_image: None,
            options: AnnotationOptions::default(),
            last_pick_ticket: 0,
            pending_pick: None,
            last_submission: 0,
            in_flight: None,
        }
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn selected_image(&self) -> Option<&SelectedImage> {
        self.selected_image.as_ref()
    }

    pub fn options(&self) -> AnnotationOptions {
        self.options
    }

    pub fn is_picking(&self) -> bool {
        self.pending_pick.is_some()
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn can_submit(&self) -> bool {
        self.selected_image.is_some() && !self.is_submitting()
    }

    pub fn update(&mut self, event: WorkflowEvent) -> Vec<WorkflowCommand> {
        log::debug!("{} received event: {:?}", LOG_TAG_WORKFLOW, event);

        let commands = match event {
            WorkflowEvent::Started => self.handle_started(),
            WorkflowEvent::SignInCompleted(result) => self.handle_sign_in_completed(result),
            WorkflowEvent::SignOutRequested => self.handle_sign_out_requested(),
            WorkflowEvent::PickRequested => self.handle_pick_requested(),
            WorkflowEvent::ImagePicked { ticket, outcome } => {
                self.handle_image_picked(ticket, outcome)
            }
            WorkflowEvent::OptionsChanged(options) => self.handle_options_changed(options),
            WorkflowEvent::SubmitRequested => self.handle_submit_requested(),
            WorkflowEvent::CallResolved { submission, result } => {
                self.handle_call_resolved(submission, result)
            }
        };

        log::debug!(
            "{} state={} commands={}",
            LOG_TAG_WORKFLOW,
            self.state,
            commands.len()
        );
        commands
    }

    fn handle_started(&mut self) -> Vec<WorkflowCommand> {
        log::info!("{} starting, establishing session", LOG_TAG_WORKFLOW);
        vec![WorkflowCommand::EnsureSession]
    }

    fn handle_sign_in_completed(&mut self, result: Result<String, AuthError>) -> Vec<WorkflowCommand> {
        match result {
            Ok(user_id) => {
                log::info!("{} signed in as {}", LOG_TAG_WORKFLOW, user_id);
                vec![WorkflowCommand::Notify(NOTICE_SIGN_IN_SUCCESS.to_string())]
            }
            Err(error) => {
                log::warn!(
                    "{} sign-in failed, will retry before next submission: {}",
                    LOG_TAG_WORKFLOW,
                    error
                );
                vec![WorkflowCommand::Notify(
                    NOTICE_AUTHENTICATION_FAILED.to_string(),
                )]
            }
        }
    }

    fn handle_sign_out_requested(&mut self) -> Vec<WorkflowCommand> {
        log::info!("{} sign-out requested", LOG_TAG_WORKFLOW);
        vec![
            WorkflowCommand::InvalidateSession,
            WorkflowCommand::Notify(NOTICE_SIGNED_OUT.to_string()),
        ]
    }

    fn handle_pick_requested(&mut self) -> Vec<WorkflowCommand> {
        self.last_pick_ticket += 1;
        let ticket = self.last_pick_ticket;

        if let Some(superseded) = self.pending_pick.replace(ticket) {
            log::info!(
                "{} pick {} superseded by pick {}",
                LOG_TAG_WORKFLOW,
                superseded,
                ticket
            );
        }

        vec![WorkflowCommand::LaunchPicker { ticket }]
    }

    fn handle_image_picked(&mut self, ticket: u64, outcome: PickOutcome) -> Vec<WorkflowCommand> {
        if self.pending_pick != Some(ticket) {
            log::warn!(
                "{} ignoring stale pick {} (pending: {:?})",
                LOG_TAG_WORKFLOW,
                ticket,
                self.pending_pick
            );
            return Vec::new();
        }
        self.pending_pick = None;

        match outcome {
            PickOutcome::Cancelled => {
                log::info!("{} pick {} cancelled, nothing changes", LOG_TAG_WORKFLOW, ticket);
                Vec::new()
            }
            PickOutcome::Failed(reason) => {
                log::error!("{} pick {} failed: {}", LOG_TAG_WORKFLOW, ticket, reason);
                vec![WorkflowCommand::Notify(NOTICE_IMAGE_LOAD_FAILED.to_string())]
            }
            PickOutcome::Selected(image) => {
                log::info!(
                    "{} image selected: {:?} ({}x{})",
                    LOG_TAG_WORKFLOW,
                    image.source,
                    image.width(),
                    image.height()
                );
                self.selected_image = Some(image);

                // The in-flight call still holds the gate; its result is dropped on arrival.
                if !self.is_submitting() {
                    self.state = WorkflowState::ImageSelected;
                }
                Vec::new()
            }
        }
    }

    fn handle_options_changed(&mut self, options: AnnotationOptions) -> Vec<WorkflowCommand> {
        log::info!("{} options changed: {:?}", LOG_TAG_WORKFLOW, options);
        self.options = options;
        Vec::new()
    }

    fn handle_submit_requested(&mut self) -> Vec<WorkflowCommand> {
        if self.is_submitting() {
            log::warn!(
                "{} submission rejected, one is already in flight",
                LOG_TAG_WORKFLOW
            );
            return vec![WorkflowCommand::Notify(
                NOTICE_SUBMISSION_IN_FLIGHT.to_string(),
            )];
        }

        let Some(image) = self.selected_image.clone() else {
            log::warn!("{} submission rejected, no image selected", LOG_TAG_WORKFLOW);
            return vec![WorkflowCommand::Notify(NOTICE_NO_IMAGE_SELECTED.to_string())];
        };

        self.last_submission += 1;
        let submission = self.last_submission;

        log::info!(
            "{} submission {} started with {:?}",
            LOG_TAG_WORKFLOW,
            submission,
            self.options
        );

        self.in_flight = Some(InFlightSubmission {
            id: submission,
            image: image.clone(),
        });
        self.state = WorkflowState::Submitting;

        vec![WorkflowCommand::RunAnnotation {
            submission,
            image,
            options: self.options,
        }]
    }

    fn handle_call_resolved(
        &mut self,
        submission: u64,
        result: Result<AnnotationResult, WorkflowError>,
    ) -> Vec<WorkflowCommand> {
        let Some(in_flight) = self.in_flight.take_if(|in_flight| in_flight.id == submission) else {
            log::warn!(
                "{} ignoring result for unknown submission {}",
                LOG_TAG_WORKFLOW,
                submission
            );
            return Vec::new();
        };

        let image_replaced = self
            .selected_image
            .as_ref()
            .is_some_and(|current| !current.is_same_as(&in_flight.image));

        if image_replaced {
            log::info!(
                "{} submission {} finished after a new pick, discarding its result",
                LOG_TAG_WORKFLOW,
                submission
            );
            self.state = WorkflowState::ImageSelected;
            return Vec::new();
        }

        match result {
            Ok(annotation) => {
                log::info!("{} submission {} resolved", LOG_TAG_WORKFLOW, submission);
                self.state = WorkflowState::Resolved(annotation.full_text);
                vec![WorkflowCommand::Notify(NOTICE_ANNOTATION_COMPLETE.to_string())]
            }
            Err(error) => {
                log::error!(
                    "{} submission {} failed: {:?}",
                    LOG_TAG_WORKFLOW,
                    submission,
                    error
                );
                let notice = match error {
                    WorkflowError::Auth(_) => NOTICE_AUTHENTICATION_FAILED,
                    _ => NOTICE_TASK_FAILED,
                };
                self.state = WorkflowState::Failed(error);
                vec![WorkflowCommand::Notify(notice.to_string())]
            }
        }
    }
}
