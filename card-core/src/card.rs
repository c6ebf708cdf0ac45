use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::CardError;
use crate::constants::MAX_OPERAND;

static OPERATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^"?(\d+)\s*(\+|-)\s*(\d+)\s*=\s*(\d+)"?"#).expect("operation pattern is valid")
});

/// Difficulty tier of a card. `Standard` is the unified style rather than a
/// tier the generator assigns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Standard,
}

impl Difficulty {
    pub const TIERS: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Case-insensitive lookup; unknown labels yield `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().trim_matches('"').to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            "standard" => Some(Difficulty::Standard),
            _ => None,
        }
    }

    /// Capitalized label, as used in template file names and the text format.
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Standard => "Standard",
        }
    }

    /// Deck ordering rank; anything outside the three tiers sorts last.
    pub fn rank(self) -> u32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
            Difficulty::Standard => 4,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    Plus,
    Minus,
}

impl Operator {
    pub fn symbol(self) -> char {
        match self {
            Operator::Plus => '+',
            Operator::Minus => '-',
        }
    }

    /// Keyword that anchors the rear-text split.
    pub fn keyword(self) -> &'static str {
        match self {
            Operator::Plus => "plus",
            Operator::Minus => "minus",
        }
    }
}

/// Which deck is being produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationKind {
    Addition,
    Subtraction,
}

impl OperationKind {
    pub fn name(self) -> &'static str {
        match self {
            OperationKind::Addition => "Addition",
            OperationKind::Subtraction => "Subtraction",
        }
    }

    pub fn operator(self) -> Operator {
        match self {
            OperationKind::Addition => Operator::Plus,
            OperationKind::Subtraction => Operator::Minus,
        }
    }
}

impl FromStr for OperationKind {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "addition" => Ok(OperationKind::Addition),
            "subtraction" => Ok(OperationKind::Subtraction),
            other => Err(CardError::Configuration(format!(
                "unknown operation {other:?}; choose Addition or Subtraction"
            ))),
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rendering style of a whole deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Style {
    /// Every card uses the standard template and colour.
    Standard,
    /// Templates and colours follow each card's difficulty.
    ColorGraded,
}

impl Style {
    pub fn folder_name(self) -> &'static str {
        match self {
            Style::Standard => "Standard",
            Style::ColorGraded => "Color Graded",
        }
    }

    /// Difficulty a card is drawn with under this style.
    pub fn face_difficulty(self, card: Difficulty) -> Difficulty {
        match self {
            Style::Standard => Difficulty::Standard,
            Style::ColorGraded => card,
        }
    }
}

/// Parsed `"<top> <op> <bottom> = <result>"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Operation {
    pub top: u32,
    pub operator: Operator,
    pub bottom: u32,
    pub result: u32,
}

impl Operation {
    pub fn parse(s: &str) -> Result<Self, CardError> {
        let caps = OPERATION_RE
            .captures(s.trim())
            .ok_or_else(|| CardError::Format(format!("unexpected operation format: {s}")))?;
        let number = |i: usize| -> Result<u32, CardError> {
            caps[i]
                .parse()
                .ok()
                .filter(|n| *n <= MAX_OPERAND)
                .ok_or_else(|| CardError::Format(format!("operand out of range in: {s}")))
        };
        let operator = if &caps[2] == "+" {
            Operator::Plus
        } else {
            Operator::Minus
        };
        Ok(Operation {
            top: number(1)?,
            operator,
            bottom: number(3)?,
            result: number(4)?,
        })
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} = {}",
            self.top,
            self.operator.symbol(),
            self.bottom,
            self.result
        )
    }
}

/// One flashcard as read from the card text file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub index: u32,
    pub difficulty: Difficulty,
    pub front_text: String,
    pub rear_text: String,
    pub operation: String,
    pub image: String,
}

impl Card {
    pub fn parsed_operation(&self) -> Result<Operation, CardError> {
        Operation::parse(&self.operation)
    }

    pub fn front_file_name(&self) -> String {
        format!("Card_{}.png", self.index)
    }

    pub fn back_file_name(&self) -> String {
        format!("Card_{}_Back.png", self.index)
    }
}
