//! Character classes used for rule-based masking

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Placeholder emitted once per hidden character
pub const MASK_GLYPH: char = '■';

/// Punctuation, bracket and operator characters matched by [`CharClass::Symbol`]
pub const SYMBOL_CHARACTERS: [char; 14] = [
    '(', ')', '「', '」', '＋', '×', '.', '：', '●', '、', '。', '－', '・', '＆',
];

/// Hiragana block
const HIRAGANA: std::ops::RangeInclusive<u32> = 0x3040..=0x309F;
const FULLWIDTH_DIGITS: std::ops::RangeInclusive<char> = '０'..='９';

/// A predicate deciding which characters a masking rule covers.
///
/// Any `Fn(char) -> bool` is a classifier, so new classes need no changes
/// to [`MaskedLine`](crate::MaskedLine).
pub trait Classifier {
    fn matches(&self, ch: char) -> bool;
}

impl<F> Classifier for F
where
    F: Fn(char) -> bool,
{
    fn matches(&self, ch: char) -> bool {
        self(ch)
    }
}

pub fn is_hiragana(ch: char) -> bool {
    HIRAGANA.contains(&u32::from(ch))
}

/// ASCII or fullwidth digit
pub fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit() || FULLWIDTH_DIGITS.contains(&ch)
}

pub fn is_symbol(ch: char) -> bool {
    SYMBOL_CHARACTERS.contains(&ch)
}

/// Only U+0020 counts; tabs and ideographic spaces are left alone.
pub fn is_space(ch: char) -> bool {
    ch == ' '
}

/// The built-in masking rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharClass {
    /// Syllabic script (hiragana)
    #[serde(alias = "syllabic")]
    Hiragana,
    #[serde(alias = "number")]
    Digit,
    Symbol,
    #[serde(alias = "whitespace")]
    Space,
}

impl CharClass {
    pub const ALL: [CharClass; 4] = [
        CharClass::Hiragana,
        CharClass::Digit,
        CharClass::Symbol,
        CharClass::Space,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CharClass::Hiragana => "hiragana",
            CharClass::Digit => "digit",
            CharClass::Symbol => "symbol",
            CharClass::Space => "space",
        }
    }

    pub fn predicate(self) -> fn(char) -> bool {
        match self {
            CharClass::Hiragana => is_hiragana,
            CharClass::Digit => is_digit,
            CharClass::Symbol => is_symbol,
            CharClass::Space => is_space,
        }
    }
}

impl Classifier for CharClass {
    fn matches(&self, ch: char) -> bool {
        (self.predicate())(ch)
    }
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CharClass {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hiragana" | "syllabic" => Ok(CharClass::Hiragana),
            "digit" | "number" => Ok(CharClass::Digit),
            "symbol" => Ok(CharClass::Symbol),
            "space" | "whitespace" => Ok(CharClass::Space),
            _ => Err(Error::UnknownClassifier(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hiragana_range() {
        assert!(is_hiragana('あ'));
        assert!(is_hiragana('ん'));
        assert!(is_hiragana('\u{3040}'));
        assert!(is_hiragana('\u{309F}'));
        assert!(!is_hiragana('ア'));
        assert!(!is_hiragana('漢'));
        assert!(!is_hiragana('a'));
    }

    #[test]
    fn test_digits() {
        assert!(is_digit('0'));
        assert!(is_digit('9'));
        assert!(is_digit('０'));
        assert!(is_digit('９'));
        assert!(!is_digit('a'));
        assert!(!is_digit('٣'));
    }

    #[test]
    fn test_symbol_set_is_exact() {
        let joined: String = SYMBOL_CHARACTERS.iter().collect();
        assert_eq!(joined, "()「」＋×.：●、。－・＆");
        assert!(is_symbol('。'));
        assert!(!is_symbol(','));
        assert!(!is_symbol('!'));
    }

    #[test]
    fn test_space_only_matches_ascii_space() {
        assert!(is_space(' '));
        assert!(!is_space('\t'));
        assert!(!is_space('\u{3000}'));
    }

    #[test]
    fn test_parse_names_and_aliases() {
        assert_eq!("digit".parse::<CharClass>().unwrap(), CharClass::Digit);
        assert_eq!("Number".parse::<CharClass>().unwrap(), CharClass::Digit);
        assert_eq!("syllabic".parse::<CharClass>().unwrap(), CharClass::Hiragana);
        assert_eq!("whitespace".parse::<CharClass>().unwrap(), CharClass::Space);
        assert!(matches!(
            "emoji".parse::<CharClass>(),
            Err(Error::UnknownClassifier(name)) if name == "emoji"
        ));
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for class in CharClass::ALL {
            assert_eq!(class.to_string().parse::<CharClass>().unwrap(), class);
        }
    }

    #[test]
    fn test_closure_is_classifier() {
        let upper = |ch: char| ch.is_ascii_uppercase();
        assert!(upper.matches('Q'));
        assert!(!upper.matches('q'));
    }
}
