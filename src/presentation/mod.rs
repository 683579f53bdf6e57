mod terminal_command;
mod terminal_view;

pub use terminal_command::TerminalCommand;
pub use terminal_view::{describe_status, TerminalView};
