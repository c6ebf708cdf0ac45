//! Deterministic card generation: operand pairs, asset assignment and the
//! card sentences.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{Card, Difficulty, Operation, OperationKind};

pub const DEFAULT_SEED: u64 = 234;
pub const TOTAL_NUMBERS: u32 = 10;

const NUMBER_WORDS: [&str; 21] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "eleven",
    "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen", "nineteen",
    "twenty",
];

pub fn number_word(n: u32) -> String {
    NUMBER_WORDS
        .get(n as usize)
        .map(|w| w.to_string())
        .unwrap_or_else(|| n.to_string())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Addition grades the sum; subtraction looks at the first operand only.
pub fn determine_difficulty(num1: u32, num2: u32, kind: OperationKind) -> Difficulty {
    match kind {
        OperationKind::Addition => match num1 + num2 {
            2..=7 => Difficulty::Easy,
            8..=14 => Difficulty::Medium,
            _ => Difficulty::Hard,
        },
        OperationKind::Subtraction => match num1 {
            0..=5 => Difficulty::Easy,
            6..=8 => Difficulty::Medium,
            _ => Difficulty::Hard,
        },
    }
}

/// Every unordered pair of 1..=10. Addition pairs are shown in a random
/// order; subtraction always puts the larger operand first.
pub fn math_pairs(kind: OperationKind, rng: &mut ChaCha8Rng) -> Vec<(u32, u32)> {
    let mut pairs = Vec::new();
    for a in 1..=TOTAL_NUMBERS {
        for b in a..=TOTAL_NUMBERS {
            let pair = match kind {
                OperationKind::Addition if rng.gen_bool(0.5) => (a, b),
                OperationKind::Addition => (b, a),
                OperationKind::Subtraction => (b, a),
            };
            pairs.push(pair);
        }
    }
    pairs
}

/// Deals assets from a shuffled pile, reshuffling a fresh pile when it runs out.
pub fn assign_assets(count: usize, assets: &[String], rng: &mut ChaCha8Rng) -> Vec<String> {
    if assets.is_empty() {
        return Vec::new();
    }
    let mut pile: Vec<String> = Vec::new();
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        if pile.is_empty() {
            pile = assets.to_vec();
            pile.shuffle(rng);
        }
        if let Some(asset) = pile.pop() {
            out.push(asset);
        }
    }
    out
}

/// Builds one card's texts. `plurals` is opaque input; missing entries fall
/// back to `name + "s"`.
pub fn card_for(
    index: u32,
    num1: u32,
    num2: u32,
    asset: &str,
    kind: OperationKind,
    plurals: &HashMap<String, String>,
) -> Card {
    let operator = kind.operator();
    let answer = match kind {
        OperationKind::Addition => num1 + num2,
        OperationKind::Subtraction => num1.saturating_sub(num2),
    };
    let plural = plurals
        .get(asset)
        .cloned()
        .unwrap_or_else(|| format!("{asset}s"));
    let item = |n: u32| if n == 1 { asset } else { plural.as_str() };

    let front_text = format!("How many {plural} are there now?");
    let rear_text = format!(
        "{} {} {} {} {} equals {} {}.",
        capitalize(&number_word(num1)),
        item(num1),
        operator.keyword(),
        number_word(num2),
        item(num2),
        number_word(answer),
        item(answer)
    );
    let operation = Operation {
        top: num1,
        operator,
        bottom: num2,
        result: answer,
    };
    Card {
        index,
        difficulty: determine_difficulty(num1, num2, kind),
        front_text,
        rear_text,
        operation: operation.to_string(),
        image: asset.to_string(),
    }
}

/// The whole deck for one operation, numbered from 1.
pub fn generate_cards(
    kind: OperationKind,
    assets: &[String],
    plurals: &HashMap<String, String>,
    seed: u64,
) -> Vec<Card> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let pairs = math_pairs(kind, &mut rng);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let dealt = assign_assets(pairs.len(), assets, &mut rng);
    pairs
        .into_iter()
        .zip(dealt)
        .enumerate()
        .map(|(i, ((n1, n2), asset))| card_for(i as u32 + 1, n1, n2, &asset, kind, plurals))
        .collect()
}
