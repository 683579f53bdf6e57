use std::sync::{Mutex, PoisonError};

use crate::core::interfaces::ports::WorkflowView;
use crate::core::orchestrators::{WorkflowController, WorkflowState};
use crate::global_constants::LOG_TAG_TERMINAL;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Interactive,
    /// Notices go to stderr and screens are not drawn, so stdout carries only the text.
    OneShot,
}

/// Prints notices as one-liners and the screen whenever the state changes.
#[derive(Default)]
pub struct TerminalView {
    mode: ViewMode,
    last_rendered: Mutex<Option<WorkflowState>>,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_one_shot() -> Self {
        Self {
            mode: ViewMode::OneShot,
            ..Self::default()
        }
    }
}

impl WorkflowView for TerminalView {
    fn show_notice(&self, notice: &str) {
        match self.mode {
            ViewMode::Interactive => println!("» {}", notice),
            ViewMode::OneShot => eprintln!("» {}", notice),
        }
    }

    fn render(&self, controller: &WorkflowController) {
        if self.mode == ViewMode::OneShot {
            return;
        }

        let mut last_rendered = self
            .last_rendered
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if last_rendered.as_ref() == Some(controller.state()) {
            return;
        }

        log::debug!("{} rendering {}", LOG_TAG_TERMINAL, controller.state());
        println!("{}", describe_state(controller));
        *last_rendered = Some(controller.state().clone());
    }
}

pub fn describe_state(controller: &WorkflowController) -> String {
    match controller.state() {
        WorkflowState::Idle => "No picture loaded.".to_string(),
        WorkflowState::ImageSelected => match controller.selected_image() {
            Some(image) => format!(
                "Picture ready: {} ({}x{})",
                image.source.display(),
                image.width(),
                image.height()
            ),
            None => "Picture ready.".to_string(),
        },
        WorkflowState::Submitting => "Annotating...".to_string(),
        WorkflowState::Resolved(text) => format!("Recognized text:\n{}", text),
        WorkflowState::Failed(error) => format!("Annotation failed: {}", error.user_message()),
    }
}

pub fn describe_status(controller: &WorkflowController, signed_in: bool) -> String {
    let options = controller.options();
    let picture = controller
        .selected_image()
        .map(|image| image.source.display().to_string())
        .unwrap_or_else(|| "none".to_string());

    format!(
        "state: {}\nsession: {}\npicture: {}\nenglish hint: {}\nhandwritten hint: {}\nready to annotate: {}",
        controller.state(),
        if signed_in { "signed in" } else { "signed out" },
        picture,
        on_off(options.use_english_hint),
        on_off(options.use_handwritten_hint),
        if controller.can_submit() { "yes" } else { "no" }
    )
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}
