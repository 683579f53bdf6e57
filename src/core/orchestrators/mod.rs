pub mod app_orchestrator;
pub mod workflow_controller;
pub mod workflow_runtime;

pub use app_orchestrator::AppOrchestrator;
pub use workflow_controller::{WorkflowCommand, WorkflowController, WorkflowEvent, WorkflowState};
pub use workflow_runtime::{WorkflowRuntime, WorkflowServices};
