//! Line-oriented card text file.
//!
//! ```text
//! Card #1
//! Front Text: "How many fish are there now?"
//! Rear Text: "Three fish plus two fish equals five fish."
//! Operation: "3 + 2 = 5"
//! Image: Fish
//! Difficulty: Easy
//! ```
//!
//! Blocks are separated by blank lines; blank lines carry no meaning beyond
//! that, so the reader groups the non-empty lines six at a time.

use crate::{Card, Difficulty};

pub const LINES_PER_CARD: usize = 6;

const FIELD_KEYS: [&str; 5] = ["front text", "rear text", "operation", "image", "difficulty"];

/// Parses every well-formed block; malformed blocks are logged and skipped.
pub fn parse_cards(text: &str) -> Vec<Card> {
    let lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    let mut cards = Vec::new();
    for (block_idx, block) in lines.chunks(LINES_PER_CARD).enumerate() {
        let position = block_idx as u32 + 1;
        match parse_block(block, position) {
            Some(card) => cards.push(card),
            None => log::warn!(
                "Skipping malformed block starting at line {}",
                block_idx * LINES_PER_CARD
            ),
        }
    }
    cards
}

fn parse_block(block: &[&str], position: u32) -> Option<Card> {
    if block.len() < LINES_PER_CARD {
        return None;
    }
    let index = card_number(block[0]).unwrap_or(position);
    let mut values: Vec<String> = Vec::with_capacity(FIELD_KEYS.len());
    for (line, key) in block[1..].iter().zip(FIELD_KEYS) {
        let (k, v) = line.split_once(':')?;
        if !k.trim().eq_ignore_ascii_case(key) {
            return None;
        }
        values.push(v.trim().trim_matches('"').trim().to_string());
    }
    let [front_text, rear_text, operation, image, difficulty]: [String; 5] =
        values.try_into().ok()?;
    let difficulty = Difficulty::from_label(&difficulty).unwrap_or_else(|| {
        log::warn!("Card {index}: unknown difficulty {difficulty:?}, using Standard");
        Difficulty::Standard
    });
    Some(Card {
        index,
        difficulty,
        front_text,
        rear_text,
        operation,
        image,
    })
}

/// Number in a `Card #<n>` header line.
pub fn card_number(line: &str) -> Option<u32> {
    let line = line.trim();
    let head = line.get(..6)?;
    if !head.eq_ignore_ascii_case("card #") {
        return None;
    }
    line[6..].trim().parse().ok()
}

/// Serializes one card as a block, trailing blank line included.
pub fn write_block(card: &Card) -> String {
    format!(
        "Card #{}\nFront Text: \"{}\"\nRear Text: \"{}\"\nOperation: \"{}\"\nImage: {}\nDifficulty: {}\n\n",
        card.index, card.front_text, card.rear_text, card.operation, card.image, card.difficulty
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fish(index: u32, difficulty: Difficulty) -> Card {
        Card {
            index,
            difficulty,
            front_text: "How many fish are there now?".into(),
            rear_text: "Three fish plus two fish equals five fish.".into(),
            operation: "3 + 2 = 5".into(),
            image: "Fish".into(),
        }
    }

    #[test]
    fn written_blocks_read_back() {
        let text: String = [fish(1, Difficulty::Easy), fish(2, Difficulty::Hard)]
            .iter()
            .map(write_block)
            .collect();
        let cards = parse_cards(&text);
        assert_eq!(cards, vec![fish(1, Difficulty::Easy), fish(2, Difficulty::Hard)]);
    }

    #[test]
    fn keys_are_case_insensitive() {
        let text = "card #7\nFRONT TEXT: \"a b\"\nrear text: \"c plus d equals e\"\n\
                    OPERATION: \"1 + 1 = 2\"\nimage:  \"Cat\" \ndifficulty: medium\n";
        let cards = parse_cards(text);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].index, 7);
        assert_eq!(cards[0].image, "Cat");
        assert_eq!(cards[0].difficulty, Difficulty::Medium);
    }

    #[test]
    fn malformed_block_is_skipped() {
        let good = write_block(&fish(1, Difficulty::Easy));
        let bad = "Card #2\nFront Text: \"x\"\nRear Text \"missing colon\"\n\
                   Operation: \"1 + 1 = 2\"\nImage: Cat\nDifficulty: Easy\n\n";
        let cards = parse_cards(&format!("{good}{bad}{good}"));
        assert_eq!(cards.len(), 2);
    }

    #[test]
    fn trailing_partial_block_is_ignored() {
        let first = write_block(&fish(1, Difficulty::Easy));
        let text = format!("{first}Card #2\nFront Text: \"x\"\n");
        assert_eq!(parse_cards(&text).len(), 1);
    }

    #[test]
    fn header_number_parses() {
        assert_eq!(card_number("Card #12"), Some(12));
        assert_eq!(card_number("Card 12"), None);
        assert_eq!(card_number("Card"), None);
    }
}
