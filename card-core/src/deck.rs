use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;

use crate::Difficulty;
use crate::format::card_number;

static DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("digit pattern is valid"));

/// Rank and position used to order a deck.
pub type OrderScore = (u32, usize);

/// Score for cards that appear in no difficulty bucket.
pub const UNCLASSIFIED: OrderScore = (4, 9999);

/// Card numbers grouped by difficulty tier, in file order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DifficultyIndex {
    easy: Vec<String>,
    medium: Vec<String>,
    hard: Vec<String>,
}

impl DifficultyIndex {
    /// Reads `Card #<n>` / `Difficulty: <tier>` pairs; other lines are ignored.
    pub fn parse(text: &str) -> Self {
        let mut index = DifficultyIndex::default();
        let mut current: Option<String> = None;
        for line in text.lines() {
            let line = line.trim();
            if let Some(n) = card_number(line) {
                current = Some(n.to_string());
            } else if let Some((key, value)) = line.split_once(':')
                && key.trim().eq_ignore_ascii_case("difficulty")
                && let Some(number) = current.take()
            {
                match Difficulty::from_label(value) {
                    Some(Difficulty::Easy) => index.easy.push(number),
                    Some(Difficulty::Medium) => index.medium.push(number),
                    Some(Difficulty::Hard) => index.hard.push(number),
                    _ => {}
                }
            }
        }
        index
    }

    fn bucket(&self, difficulty: Difficulty) -> &[String] {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
            Difficulty::Standard => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.easy.is_empty() && self.medium.is_empty() && self.hard.is_empty()
    }

    /// Score of a card image name such as `Card_12.png`, found through the
    /// first number in the name.
    pub fn order_score(&self, image_name: &str) -> OrderScore {
        let Some(number) = DIGITS_RE.find(image_name) else {
            return UNCLASSIFIED;
        };
        for tier in Difficulty::TIERS {
            if let Some(pos) = self.bucket(tier).iter().position(|n| n == number.as_str()) {
                return (tier.rank(), pos);
            }
        }
        UNCLASSIFIED
    }
}

/// Orders front image names: natural order first, then a stable sort by
/// difficulty score so unclassified cards keep their natural order.
pub fn order_fronts<S: AsRef<str>>(names: &[S], index: &DifficultyIndex) -> Vec<String> {
    let mut fronts: Vec<String> = names
        .iter()
        .map(|s| s.as_ref().to_string())
        .filter(|n| !is_back_name(n))
        .collect();
    fronts.sort_by(|a, b| natural_cmp(a, b));
    fronts.sort_by_key(|n| index.order_score(n));
    fronts
}

pub fn is_back_name(name: &str) -> bool {
    name.ends_with("_Back.png")
}

/// `Card_3.png` -> `Card_3_Back.png`.
pub fn back_name_for(front: &str) -> String {
    let stem = front.strip_suffix(".png").unwrap_or(front);
    format!("{stem}_Back.png")
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Chunk {
    Number(u64),
    Text(String),
}

fn natural_chunks(s: &str) -> Vec<Chunk> {
    let mut out = Vec::new();
    let mut last = 0;
    for m in DIGITS_RE.find_iter(s) {
        if m.start() > last {
            out.push(Chunk::Text(s[last..m.start()].to_lowercase()));
        }
        out.push(match m.as_str().parse() {
            Ok(n) => Chunk::Number(n),
            Err(_) => Chunk::Text(m.as_str().to_string()),
        });
        last = m.end();
    }
    if last < s.len() {
        out.push(Chunk::Text(s[last..].to_lowercase()));
    }
    out
}

/// Compares names so that `Card_2` sorts before `Card_10`.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    natural_chunks(a).cmp(&natural_chunks(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Card #1\nDifficulty: Hard\n\nCard #2\nDifficulty: Easy\n\n\
                          Card #3\nDifficulty: Easy\n\nCard #4\nDifficulty: Medium\n";

    #[test]
    fn orders_by_difficulty_then_position() {
        let index = DifficultyIndex::parse(SAMPLE);
        let names = [
            "Card_1.png",
            "Card_1_Back.png",
            "Card_2.png",
            "Card_2_Back.png",
            "Card_3.png",
            "Card_3_Back.png",
            "Card_4.png",
            "Card_4_Back.png",
        ];
        assert_eq!(
            order_fronts(&names, &index),
            vec!["Card_2.png", "Card_3.png", "Card_4.png", "Card_1.png"]
        );
    }

    #[test]
    fn key_names_are_case_insensitive() {
        let text = "card #1\ndifficulty: Hard\n\ncard #2\nDIFFICULTY: Easy\n";
        let index = DifficultyIndex::parse(text);
        assert_eq!(index.order_score("Card_2.png"), (1, 0));
        assert_eq!(
            order_fronts(&["Card_1.png", "Card_2.png"], &index),
            vec!["Card_2.png", "Card_1.png"]
        );
    }

    #[test]
    fn unknown_cards_sort_last_in_natural_order() {
        let index = DifficultyIndex::parse("Card #5\nDifficulty: Easy\n");
        let names = ["Card_10.png", "Card_9.png", "Card_5.png", "Card_2.png"];
        assert_eq!(
            order_fronts(&names, &index),
            vec!["Card_5.png", "Card_2.png", "Card_9.png", "Card_10.png"]
        );
    }

    #[test]
    fn empty_index_keeps_natural_order() {
        let index = DifficultyIndex::default();
        assert!(index.is_empty());
        let names = ["Card_10.png", "Card_2.png", "Card_1.png"];
        assert_eq!(
            order_fronts(&names, &index),
            vec!["Card_1.png", "Card_2.png", "Card_10.png"]
        );
    }

    #[test]
    fn scores_use_first_number() {
        let index = DifficultyIndex::parse(SAMPLE);
        assert_eq!(index.order_score("Card_4.png"), (2, 0));
        assert_eq!(index.order_score("Card_3_Back.png"), (1, 1));
        assert_eq!(index.order_score("cover.png"), UNCLASSIFIED);
    }

    #[test]
    fn back_names_follow_fronts() {
        assert_eq!(back_name_for("Card_3.png"), "Card_3_Back.png");
        assert!(is_back_name("Card_3_Back.png"));
        assert!(!is_back_name("Card_3.png"));
    }
}
