use crate::core::orchestrators::WorkflowController;

/// Whatever shows the screen to the user.
pub trait WorkflowView: Send + Sync {
    /// Short-lived message, the equivalent of a toast.
    fn show_notice(&self, notice: &str);

    fn render(&self, controller: &WorkflowController);
}
