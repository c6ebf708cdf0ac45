//! Run configuration and the project directory layout derived from it.

use std::fs;
use std::path::{Path, PathBuf};

use card_core::generate::DEFAULT_SEED;
use card_core::{OperationKind, PageProfile, Style};
use serde::{Deserialize, Serialize};

use crate::PressError;

/// Which pipeline stages were requested. Missing prerequisites force the
/// earlier stages on regardless.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stages {
    pub operations: bool,
    pub cards: bool,
    pub pdf: bool,
}

impl Default for Stages {
    fn default() -> Self {
        Stages {
            operations: false,
            cards: false,
            pdf: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Styles {
    pub standard: bool,
    pub color_graded: bool,
}

impl Default for Styles {
    fn default() -> Self {
        Styles {
            standard: true,
            color_graded: true,
        }
    }
}

impl Styles {
    pub fn requested(&self) -> Vec<Style> {
        let mut out = Vec::new();
        if self.standard {
            out.push(Style::Standard);
        }
        if self.color_graded {
            out.push(Style::ColorGraded);
        }
        out
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub base_dir: PathBuf,
    pub asset_pack: String,
    pub operation: OperationKind,
    pub stages: Stages,
    pub styles: Styles,
    pub sizes: Vec<PageProfile>,
    pub seed: u64,
    /// JSON object of singular -> plural names; `plurals.json` in the asset
    /// pack folder when unset.
    pub plurals: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            base_dir: PathBuf::from("."),
            asset_pack: "Animals".to_string(),
            operation: OperationKind::Addition,
            stages: Stages::default(),
            styles: Styles::default(),
            sizes: vec![PageProfile::Small, PageProfile::Medium],
            seed: DEFAULT_SEED,
            plurals: None,
        }
    }
}

impl RunConfig {
    pub fn load(path: &Path) -> Result<Self, PressError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn paths(&self) -> ProjectPaths {
        ProjectPaths {
            base: self.base_dir.clone(),
            pack: self.asset_pack.clone(),
            operation: self.operation,
        }
    }
}

/// Folder layout under the base directory.
#[derive(Clone, Debug)]
pub struct ProjectPaths {
    base: PathBuf,
    pack: String,
    operation: OperationKind,
}

impl ProjectPaths {
    pub fn templates_dir(&self) -> PathBuf {
        self.base.join("input").join("templates")
    }

    pub fn assets_dir(&self) -> PathBuf {
        self.base.join("input").join("Assets")
    }

    pub fn pack_dir(&self) -> PathBuf {
        self.assets_dir().join(&self.pack)
    }

    pub fn font_path(&self) -> PathBuf {
        self.assets_dir().join("Quicksand-Bold.ttf")
    }

    pub fn plurals_path(&self) -> PathBuf {
        self.pack_dir().join("plurals.json")
    }

    /// `Gen/<pack>/Flash Cards/<Op>`
    pub fn gen_dir(&self) -> PathBuf {
        self.base
            .join("Gen")
            .join(&self.pack)
            .join("Flash Cards")
            .join(self.operation.name())
    }

    fn card_file_name(&self) -> String {
        format!("{}_Operations.txt", self.operation.name())
    }

    pub fn card_file(&self) -> PathBuf {
        self.gen_dir().join(self.card_file_name())
    }

    pub fn cards_dir(&self, style: Style) -> PathBuf {
        self.gen_dir().join(style.folder_name())
    }

    pub fn pdf_dir(&self, style: Style) -> PathBuf {
        self.base
            .join("Gen")
            .join(&self.pack)
            .join("Final_PDFs")
            .join(self.operation.name())
            .join(style.folder_name())
    }

    /// Files the deck order may be read from, most specific first.
    pub fn difficulty_sources(&self) -> [PathBuf; 3] {
        [
            self.card_file(),
            self.gen_dir().join("Operations_Sorted.txt"),
            self.pack_dir().join(self.card_file_name()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_master_settings() {
        let cfg = RunConfig::default();
        assert_eq!(cfg.asset_pack, "Animals");
        assert_eq!(cfg.operation, OperationKind::Addition);
        assert_eq!(cfg.stages, Stages { operations: false, cards: false, pdf: true });
        assert_eq!(cfg.styles.requested(), vec![Style::Standard, Style::ColorGraded]);
        assert_eq!(cfg.sizes, vec![PageProfile::Small, PageProfile::Medium]);
        assert_eq!(cfg.seed, 234);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: RunConfig = serde_json::from_str(
            r#"{"operation": "Subtraction", "sizes": ["Large"], "styles": {"standard": false}}"#,
        )
        .unwrap();
        assert_eq!(cfg.operation, OperationKind::Subtraction);
        assert_eq!(cfg.sizes, vec![PageProfile::Large]);
        assert_eq!(cfg.styles.requested(), vec![Style::ColorGraded]);
        assert!(cfg.stages.pdf);
    }

    #[test]
    fn unknown_size_in_json_is_rejected() {
        let err = serde_json::from_str::<RunConfig>(r#"{"sizes": ["Huge"]}"#);
        assert!(err.is_err());
    }

    #[test]
    fn layout_follows_pack_and_operation() {
        let cfg = RunConfig {
            base_dir: PathBuf::from("/w"),
            operation: OperationKind::Subtraction,
            ..RunConfig::default()
        };
        let paths = cfg.paths();
        assert_eq!(
            paths.card_file(),
            PathBuf::from("/w/Gen/Animals/Flash Cards/Subtraction/Subtraction_Operations.txt")
        );
        assert_eq!(
            paths.pdf_dir(Style::ColorGraded),
            PathBuf::from("/w/Gen/Animals/Final_PDFs/Subtraction/Color Graded")
        );
        assert_eq!(paths.templates_dir(), PathBuf::from("/w/input/templates"));
    }
}
