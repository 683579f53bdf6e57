use std::path::PathBuf;

use anyhow::Result;
use async_trait::async_trait;

/// Host picker UI. Resolves to the chosen file, or `None` when the user backs out.
#[async_trait]
pub trait ImagePicker: Send + Sync {
    async fn pick_image_file(&self) -> Result<Option<PathBuf>>;
}
