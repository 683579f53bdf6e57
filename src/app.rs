use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::adapters::{FirebaseAuthProvider, FirebaseCallableFunction};
use crate::core::interfaces::ports::ImagePicker;
use crate::core::models::{AnnotationOptions, AppSettings};
use crate::core::orchestrators::{AppOrchestrator, WorkflowEvent, WorkflowServices, WorkflowState};
use crate::core::services::{
    AnnotationRequestBuilder, ImageEncoder, ImageSource, RemoteAnnotationClient, SessionManager,
};
use crate::global_constants::{
    COMMAND_PROMPT, LOG_TAG_APP, NOTICE_IMAGE_LOAD_FAILED, STARTUP_BANNER,
};
use crate::ports::{print_prompt, FixedPathImagePicker, TerminalImagePicker, TerminalInput};
use crate::presentation::{describe_status, TerminalCommand, TerminalView};

enum LoopInput {
    Background(Option<WorkflowEvent>),
    Line(Option<String>),
}

pub struct CloudOcrApp {
    orchestrator: AppOrchestrator,
}

impl CloudOcrApp {
    pub fn build(settings: &AppSettings, picker: Arc<dyn ImagePicker>, view: TerminalView) -> Result<Self> {
        log::info!("{} Initializing application", LOG_TAG_APP);

        let services = build_services(settings, picker)?;
        Ok(Self {
            orchestrator: AppOrchestrator::build(services, Arc::new(view)),
        })
    }

    /// Reads commands until `quit` or end of input, while background results
    /// keep flowing into the screen.
    pub async fn run_interactive(settings: &AppSettings) -> Result<()> {
        let input = Arc::new(TerminalInput::from_stdin());
        let picker = Arc::new(TerminalImagePicker::new(Arc::clone(&input)));
        let mut app = Self::build(settings, picker, TerminalView::new())?;

        println!("{}", STARTUP_BANNER);
        app.orchestrator.dispatch(WorkflowEvent::Started).await;

        loop {
            print_prompt(COMMAND_PROMPT)?;

            let next = tokio::select! {
                event = app.orchestrator.next_event() => LoopInput::Background(event),
                line = input.next_line() => LoopInput::Line(line?),
            };

            match next {
                LoopInput::Background(Some(event)) => app.orchestrator.dispatch(event).await,
                LoopInput::Background(None) => break,
                LoopInput::Line(None) => {
                    log::info!("{} End of input, shutting down", LOG_TAG_APP);
                    break;
                }
                LoopInput::Line(Some(line)) if line.trim().is_empty() => {}
                LoopInput::Line(Some(line)) => match line.parse::<TerminalCommand>() {
                    Ok(TerminalCommand::Quit) => break,
                    Ok(command) => app.handle_command(command).await,
                    Err(message) => println!("{}", message),
                },
            }
        }

        println!();
        Ok(())
    }

    /// Annotates `image` once and returns the recognized text.
    pub async fn run_once(
        settings: &AppSettings,
        image: PathBuf,
        options: AnnotationOptions,
    ) -> Result<String> {
        let picker = Arc::new(FixedPathImagePicker::new(image.clone()));
        let mut app = Self::build(settings, picker, TerminalView::for_one_shot())?;
        let orchestrator = &mut app.orchestrator;

        orchestrator.dispatch(WorkflowEvent::Started).await;
        orchestrator.dispatch(WorkflowEvent::OptionsChanged(options)).await;
        orchestrator.dispatch(WorkflowEvent::PickRequested).await;
        orchestrator
            .run_until(|controller| !controller.is_picking())
            .await;

        if orchestrator.controller().selected_image().is_none() {
            anyhow::bail!("{} {}", NOTICE_IMAGE_LOAD_FAILED, image.display());
        }

        orchestrator.dispatch(WorkflowEvent::SubmitRequested).await;
        orchestrator
            .run_until(|controller| !controller.is_submitting())
            .await;

        match orchestrator.controller().state() {
            WorkflowState::Resolved(text) => Ok(text.clone()),
            WorkflowState::Failed(error) => {
                Err(anyhow::Error::new(error.clone()).context(error.user_message()))
            }
            other => anyhow::bail!("annotation ended in unexpected state {}", other),
        }
    }

    async fn handle_command(&mut self, command: TerminalCommand) {
        match command {
            TerminalCommand::Status => {
                let signed_in = self.orchestrator.is_signed_in();
                println!("{}", describe_status(self.orchestrator.controller(), signed_in));
            }
            TerminalCommand::Help => println!("{}", STARTUP_BANNER),
            command => {
                let options = self.orchestrator.controller().options();
                if let Some(event) = command_to_event(command, options) {
                    self.orchestrator.dispatch(event).await;
                }
            }
        }
    }
}

fn command_to_event(command: TerminalCommand, options: AnnotationOptions) -> Option<WorkflowEvent> {
    match command {
        TerminalCommand::Load => Some(WorkflowEvent::PickRequested),
        TerminalCommand::English(enabled) => Some(WorkflowEvent::OptionsChanged(AnnotationOptions {
            use_english_hint: enabled,
            ..options
        })),
        TerminalCommand::Handwritten(enabled) => {
            Some(WorkflowEvent::OptionsChanged(AnnotationOptions {
                use_handwritten_hint: enabled,
                ..options
            }))
        }
        TerminalCommand::Annotate => Some(WorkflowEvent::SubmitRequested),
        TerminalCommand::SignOut => Some(WorkflowEvent::SignOutRequested),
        TerminalCommand::Status | TerminalCommand::Help | TerminalCommand::Quit => None,
    }
}

fn build_services(settings: &AppSettings, picker: Arc<dyn ImagePicker>) -> Result<WorkflowServices> {
    let client = reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")?;

    let auth_provider = Arc::new(FirebaseAuthProvider::new(client.clone(), &settings.firebase));
    let callable_function = Arc::new(FirebaseCallableFunction::new(client, &settings.firebase));

    Ok(WorkflowServices {
        session_manager: SessionManager::new(auth_provider, settings.credentials.clone()),
        image_source: ImageSource::new(picker),
        encoder: ImageEncoder::from_settings(&settings.encoder),
        request_builder: AnnotationRequestBuilder::new(
            settings.request.features.clone(),
            settings.request.language_hints.clone(),
        ),
        annotation_client: RemoteAnnotationClient::new(
            callable_function,
            settings.firebase.annotate_function.clone(),
        ),
    })
}
