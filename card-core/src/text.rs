use crate::CardError;
use crate::constants::{FRONT_ROW_WORDS, LONG_SEGMENT_CHARS};

/// Front question split into two rows: the first few words, then the rest.
pub fn front_rows(front_text: &str) -> [String; 2] {
    let cleaned = front_text.replace('"', "");
    let words: Vec<&str> = cleaned.split_whitespace().collect();
    let cut = words.len().min(FRONT_ROW_WORDS);
    [words[..cut].join(" "), words[cut..].join(" ")]
}

/// Rear answer sentence broken at its keywords.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackSegments {
    pub first: String,
    pub second: String,
    pub third: String,
}

impl BackSegments {
    pub fn rows(&self) -> [&str; 3] {
        [self.first.as_str(), self.second.as_str(), self.third.as_str()]
    }
}

/// Splits `"Three fish plus two fish equals five fish."` into
/// `"Three fish plus"`, `"two fish equals"` and `"five fish"`.
pub fn split_rear_text(rear_text: &str) -> Result<BackSegments, CardError> {
    let keyword = ["plus", "minus"]
        .into_iter()
        .find(|k| rear_text.contains(k))
        .ok_or_else(|| {
            CardError::Format(format!(
                "rear text must contain 'plus' or 'minus': {rear_text:?}"
            ))
        })?;
    let end1 = rear_text.find(keyword).map(|i| i + keyword.len()).unwrap_or(0);
    let end2 = rear_text
        .find("equals")
        .map(|i| i + "equals".len())
        .ok_or_else(|| {
            CardError::Format(format!("rear text must contain 'equals': {rear_text:?}"))
        })?;
    if end2 < end1 {
        return Err(CardError::Format(format!(
            "'equals' precedes '{keyword}' in rear text: {rear_text:?}"
        )));
    }
    Ok(BackSegments {
        first: rear_text[..end1].trim().to_string(),
        second: rear_text[end1..end2].trim().to_string(),
        third: rear_text[end2..]
            .trim_matches(|c| c == ' ' || c == '.' || c == '"')
            .to_string(),
    })
}

/// Font sizes used on the back face.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackFontSizes {
    /// The three answer rows.
    pub rows: f32,
    /// The operation line.
    pub operation: f32,
}

pub const BACK_FONT_STANDARD: BackFontSizes = BackFontSizes {
    rows: 250.0,
    operation: 260.0,
};
pub const BACK_FONT_REDUCED: BackFontSizes = BackFontSizes {
    rows: 235.0,
    operation: 250.0,
};

/// Smaller pair when the middle row would otherwise overflow the card.
pub fn back_font_sizes(segments: &BackSegments) -> BackFontSizes {
    if segments.second.chars().count() > LONG_SEGMENT_CHARS {
        BACK_FONT_REDUCED
    } else {
        BACK_FONT_STANDARD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_addition_sentence() {
        let seg = split_rear_text("Three fish plus two fish equals five fish.").unwrap();
        assert_eq!(seg.rows(), ["Three fish plus", "two fish equals", "five fish"]);
    }

    #[test]
    fn splits_subtraction_sentence_and_strips_quote() {
        let seg = split_rear_text("Nine cats minus one cat equals eight cats.\"").unwrap();
        assert_eq!(seg.rows(), ["Nine cats minus", "one cat equals", "eight cats"]);
    }

    #[test]
    fn missing_keyword_is_a_format_error() {
        assert!(matches!(
            split_rear_text("Three fish and two fish make five fish."),
            Err(CardError::Format(_))
        ));
        assert!(matches!(
            split_rear_text("Three fish plus two fish"),
            Err(CardError::Format(_))
        ));
    }

    #[test]
    fn long_middle_row_reduces_fonts() {
        let short = split_rear_text("One cat plus one cat equals two cats.").unwrap();
        assert_eq!(back_font_sizes(&short), BACK_FONT_STANDARD);
        let long =
            split_rear_text("Ten hippopotamuses plus seven hippopotamuses equals many.").unwrap();
        assert_eq!(back_font_sizes(&long), BACK_FONT_REDUCED);
    }

    #[test]
    fn front_rows_split_after_three_words() {
        assert_eq!(
            front_rows("\"How many fish are there now?\""),
            ["How many fish".to_string(), "are there now?".to_string()]
        );
        assert_eq!(front_rows("Count"), ["Count".to_string(), String::new()]);
    }
}
