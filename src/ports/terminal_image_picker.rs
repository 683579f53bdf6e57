use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;

use crate::core::interfaces::ports::ImagePicker;
use crate::global_constants::{LOG_TAG_TERMINAL, PICKER_PROMPT};
use crate::ports::TerminalInput;

/// Asks for a path on the terminal. Blank input or end of input cancels.
pub struct TerminalImagePicker {
    input: Arc<TerminalInput>,
}

impl TerminalImagePicker {
    pub fn new(input: Arc<TerminalInput>) -> Self {
        Self { input }
    }
}

#[async_trait]
impl ImagePicker for TerminalImagePicker {
    async fn pick_image_file(&self) -> Result<Option<PathBuf>> {
        let line = self.input.prompt_line(PICKER_PROMPT).await?;
        let picked = line.as_deref().and_then(parse_picked_path);
        log::debug!("{} picker answered {:?}", LOG_TAG_TERMINAL, picked);
        Ok(picked)
    }
}

/// Hands out one preset path, then behaves like a cancelled picker.
pub struct FixedPathImagePicker {
    path: Mutex<Option<PathBuf>>,
}

impl FixedPathImagePicker {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path: Mutex::new(Some(path)),
        }
    }
}

#[async_trait]
impl ImagePicker for FixedPathImagePicker {
    async fn pick_image_file(&self) -> Result<Option<PathBuf>> {
        let mut path = self
            .path
            .lock()
            .map_err(|_| anyhow::anyhow!("fixed path picker lock poisoned"))?;
        Ok(path.take())
    }
}

/// Strips surrounding whitespace and the quotes terminals add on drag and drop.
fn parse_picked_path(line: &str) -> Option<PathBuf> {
    let trimmed = line.trim().trim_matches(|c| c == '"' || c == '\'').trim();
    (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
}
