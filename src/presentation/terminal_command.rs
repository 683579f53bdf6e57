use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalCommand {
    Load,
    English(bool),
    Handwritten(bool),
    Annotate,
    Status,
    SignOut,
    Help,
    Quit,
}

impl FromStr for TerminalCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or_default().to_ascii_lowercase();
        let argument = words.next().map(str::to_ascii_lowercase);

        if words.next().is_some() {
            return Err(format!("too many arguments: {}", line.trim()));
        }

        match (command.as_str(), argument.as_deref()) {
            ("load" | "pick", None) => Ok(TerminalCommand::Load),
            ("english", Some(toggle)) => parse_toggle(toggle).map(TerminalCommand::English),
            ("handwritten", Some(toggle)) => parse_toggle(toggle).map(TerminalCommand::Handwritten),
            ("annotate" | "submit", None) => Ok(TerminalCommand::Annotate),
            ("status", None) => Ok(TerminalCommand::Status),
            ("signout", None) => Ok(TerminalCommand::SignOut),
            ("help" | "?", None) => Ok(TerminalCommand::Help),
            ("quit" | "exit", None) => Ok(TerminalCommand::Quit),
            ("english" | "handwritten", None) => Err(format!("usage: {} on|off", command)),
            ("", _) => Err("empty command".to_string()),
            _ => Err(format!("unknown command: {}", line.trim())),
        }
    }
}

fn parse_toggle(toggle: &str) -> Result<bool, String> {
    match toggle {
        "on" | "yes" | "true" => Ok(true),
        "off" | "no" | "false" => Ok(false),
        other => Err(format!("expected on or off, got {}", other)),
    }
}
