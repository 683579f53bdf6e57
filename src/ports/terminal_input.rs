use std::io::Write;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tokio::sync::Mutex;

use crate::global_constants::LOG_TAG_TERMINAL;

type BoxedLines = Lines<Box<dyn AsyncBufRead + Unpin + Send>>;

/// Line reader shared by the command loop and the picker prompt.
pub struct TerminalInput {
    lines: Mutex<BoxedLines>,
}

impl TerminalInput {
    pub fn from_stdin() -> Self {
        log::debug!("{} reading commands from stdin", LOG_TAG_TERMINAL);
        Self::from_reader(BufReader::new(tokio::io::stdin()))
    }

    pub fn from_reader(reader: impl AsyncBufRead + Unpin + Send + 'static) -> Self {
        let boxed: Box<dyn AsyncBufRead + Unpin + Send> = Box::new(reader);
        Self {
            lines: Mutex::new(boxed.lines()),
        }
    }

    /// `None` at end of input. Safe to drop mid-read inside `select!`.
    pub async fn next_line(&self) -> Result<Option<String>> {
        let mut lines = self.lines.lock().await;
        lines
            .next_line()
            .await
            .context("Failed to read from terminal")
    }

    pub async fn prompt_line(&self, prompt: &str) -> Result<Option<String>> {
        print_prompt(prompt)?;
        self.next_line().await
    }
}

pub fn print_prompt(prompt: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{}", prompt).context("Failed to write prompt")?;
    stdout.flush().context("Failed to flush prompt")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lines_are_returned_in_order_then_none() {
        let input = TerminalInput::from_reader(BufReader::new(&b"load\nannotate\n"[..]));

        assert_eq!(input.next_line().await.unwrap().as_deref(), Some("load"));
        assert_eq!(input.next_line().await.unwrap().as_deref(), Some("annotate"));
        assert_eq!(input.next_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_carriage_returns_are_stripped() {
        let input = TerminalInput::from_reader(BufReader::new(&b"status\r\n"[..]));

        assert_eq!(input.next_line().await.unwrap().as_deref(), Some("status"));
    }
}
