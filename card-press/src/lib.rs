//! Document side of the flashcard pipeline: stages, page PDFs, mirroring and
//! merging.

mod error;

pub mod assemble;
pub mod cards;
pub mod config;
pub mod document;
pub mod merge;
pub mod mirror;
pub mod operations;
pub mod pipeline;

pub use config::{ProjectPaths, RunConfig, Stages, Styles};
pub use error::PressError;
pub use pipeline::run;
