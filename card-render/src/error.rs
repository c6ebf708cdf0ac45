use std::path::PathBuf;

use card_core::CardError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("missing asset: {}", .0.display())]
    MissingAsset(PathBuf),

    #[error("cannot decode {}: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },

    #[error("PNG encoding error: {0}")]
    Encode(#[from] png::EncodingError),

    #[error("cannot allocate a {width}x{height} canvas")]
    Canvas { width: u32, height: u32 },

    #[error("page holds {capacity} cards, batch has {given}")]
    Overflow { capacity: usize, given: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Card(#[from] CardError),
}
