use std::path::PathBuf;

use card_core::{OperationKind, PageProfile};
use card_press::{PressError, RunConfig};
use clap::Parser;

#[derive(Parser)]
#[command(name = "flashcards", about = "Printable math flashcard generator", version)]
struct Cli {
    /// JSON run configuration; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding `input/` and `Gen/`
    #[arg(long)]
    base_dir: Option<PathBuf>,

    /// Asset pack folder name under input/Assets
    #[arg(long)]
    asset_pack: Option<String>,

    /// Addition or Subtraction
    #[arg(long)]
    operation: Option<OperationKind>,

    /// Page size (Small, Medium, Large); repeat for several
    #[arg(long = "size")]
    sizes: Vec<PageProfile>,

    /// Regenerate the card text file
    #[arg(long)]
    operations: bool,

    /// Re-render the card images
    #[arg(long)]
    cards: bool,

    #[arg(long)]
    skip_pdf: bool,

    #[arg(long)]
    no_standard: bool,

    #[arg(long)]
    no_color_graded: bool,

    /// Singular -> plural JSON map
    #[arg(long)]
    plurals: Option<PathBuf>,

    #[arg(long)]
    seed: Option<u64>,
}

impl Cli {
    fn into_config(self) -> Result<RunConfig, PressError> {
        let mut cfg = match &self.config {
            Some(path) => RunConfig::load(path)?,
            None => RunConfig::default(),
        };
        if let Some(dir) = self.base_dir {
            cfg.base_dir = dir;
        }
        if let Some(pack) = self.asset_pack {
            cfg.asset_pack = pack;
        }
        if let Some(op) = self.operation {
            cfg.operation = op;
        }
        if !self.sizes.is_empty() {
            cfg.sizes = self.sizes;
        }
        cfg.stages.operations |= self.operations;
        cfg.stages.cards |= self.cards;
        if self.skip_pdf {
            cfg.stages.pdf = false;
        }
        if self.no_standard {
            cfg.styles.standard = false;
        }
        if self.no_color_graded {
            cfg.styles.color_graded = false;
        }
        if self.plurals.is_some() {
            cfg.plurals = self.plurals;
        }
        if let Some(seed) = self.seed {
            cfg.seed = seed;
        }
        Ok(cfg)
    }
}

fn main() -> Result<(), PressError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Cli::parse().into_config()?;
    for path in card_press::run(&config)? {
        println!("{}", path.display());
    }
    Ok(())
}
