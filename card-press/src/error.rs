use std::path::PathBuf;

use card_core::CardError;
use card_render::RenderError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PressError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Card(#[from] CardError),

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration file error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("expected artifact is missing: {}", .0.display())]
    MissingArtifact(PathBuf),

    #[error("malformed PDF: {0}")]
    Malformed(String),

    #[error("nothing to process: {0}")]
    EmptyInput(String),
}
