//! Raster side of the flashcard pipeline: card faces and composed pages.

mod error;

pub mod face;
pub mod page;
pub mod raster;
pub mod text;

pub use error::RenderError;
pub use face::{CardAssets, FaceCompositor};
pub use page::{compose_page, prepare_card};
pub use text::{TextLayout, TextRenderer};
