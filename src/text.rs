//! Accumulated recognized text

use crate::symbol::Symbol;

/// Text built up from confirmed symbols
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextBuffer {
    text: String,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one confirmed symbol.
    ///
    /// Letters and `space` append; `delete` removes the last character and is
    /// a no-op on an empty buffer.
    pub fn apply(&mut self, symbol: Symbol) {
        match symbol {
            Symbol::Letter(letter) => self.text.push(letter.as_char()),
            Symbol::Space => self.text.push(' '),
            Symbol::Delete => {
                self.text.pop();
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }
}

impl std::fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letter(c: char) -> Symbol {
        Symbol::letter(c).unwrap()
    }

    #[test]
    fn test_hi_space_delete() {
        let mut buffer = TextBuffer::new();
        let mut history = Vec::new();
        for symbol in [letter('H'), letter('I'), Symbol::Space, Symbol::Delete] {
            buffer.apply(symbol);
            history.push(buffer.as_str().to_string());
        }
        assert_eq!(history, vec!["H", "HI", "HI ", "HI"]);
    }

    #[test]
    fn test_delete_on_empty_is_noop() {
        let mut buffer = TextBuffer::new();
        buffer.apply(Symbol::Delete);
        buffer.apply(Symbol::Delete);
        assert!(buffer.is_empty());
        assert_eq!(buffer.as_str(), "");
    }

    #[test]
    fn test_clear() {
        let mut buffer = TextBuffer::new();
        buffer.apply(letter('O'));
        buffer.apply(letter('K'));
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.to_string(), "OK");
        buffer.clear();
        assert!(buffer.is_empty());
    }
}
