//! Recognizable symbols and the classifier's index table
//!
//! The classifier emits an index in `0..=27`:
//! `0 → space`, `1..=26 → A..Z`, `27 → delete`.

use std::fmt;

/// Number of labels the classifier was trained on
pub const LABEL_COUNT: usize = 28;

const SPACE_INDEX: usize = 0;
const DELETE_INDEX: usize = 27;

/// An uppercase letter `A`–`Z`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Letter(u8);

impl Letter {
    /// Returns `None` for anything other than `A`–`Z`.
    pub fn new(c: char) -> Option<Self> {
        if c.is_ascii_uppercase() {
            Some(Self(c as u8))
        } else {
            None
        }
    }

    pub fn as_char(self) -> char {
        self.0 as char
    }
}

/// One classifier output: a letter or one of the two control gestures
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Symbol {
    Space,
    Letter(Letter),
    Delete,
}

impl Symbol {
    /// Map a classifier index to its symbol
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            SPACE_INDEX => Some(Symbol::Space),
            1..=26 => Some(Symbol::Letter(Letter(b'A' + (index - 1) as u8))),
            DELETE_INDEX => Some(Symbol::Delete),
            _ => None,
        }
    }

    /// Inverse of [`Symbol::from_index`]
    pub fn index(self) -> usize {
        match self {
            Symbol::Space => SPACE_INDEX,
            Symbol::Letter(letter) => (letter.0 - b'A') as usize + 1,
            Symbol::Delete => DELETE_INDEX,
        }
    }

    /// Convenience constructor for a letter symbol
    pub fn letter(c: char) -> Option<Self> {
        Letter::new(c).map(Symbol::Letter)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Space => write!(f, "space"),
            Symbol::Letter(letter) => write!(f, "{}", letter.as_char()),
            Symbol::Delete => write!(f, "delete"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_table() {
        assert_eq!(Symbol::from_index(0), Some(Symbol::Space));
        assert_eq!(Symbol::from_index(1), Symbol::letter('A'));
        assert_eq!(Symbol::from_index(8), Symbol::letter('H'));
        assert_eq!(Symbol::from_index(26), Symbol::letter('Z'));
        assert_eq!(Symbol::from_index(27), Some(Symbol::Delete));
        assert_eq!(Symbol::from_index(LABEL_COUNT), None);
    }

    #[test]
    fn test_index_is_inverse_of_from_index() {
        for index in 0..LABEL_COUNT {
            let symbol = Symbol::from_index(index).unwrap();
            assert_eq!(symbol.index(), index);
        }
    }

    #[test]
    fn test_letter_rejects_non_uppercase() {
        assert!(Letter::new('a').is_none());
        assert!(Letter::new('!').is_none());
        assert!(Letter::new('Ä').is_none());
        assert_eq!(Letter::new('Q').map(Letter::as_char), Some('Q'));
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(Symbol::Space.to_string(), "space");
        assert_eq!(Symbol::Delete.to_string(), "delete");
        assert_eq!(Symbol::letter('K').unwrap().to_string(), "K");
    }
}
