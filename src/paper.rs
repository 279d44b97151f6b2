use std::fmt;

use ropey::Rope;

use crate::error::{Error, Result};

/// A sheet of paper holding written characters.
///
/// Positions are character indices, not byte offsets. The paper only grows
/// by appending; every other mutation substitutes a character in place.
pub struct Paper {
    rope: Rope,
}

impl Paper {
    /// Create a blank sheet.
    pub fn new() -> Self {
        Self::from_text("")
    }

    /// Create a sheet already carrying `text`.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// The full text on the paper.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Number of characters on the paper.
    pub fn len(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The character at `position`, if any.
    pub fn char_at(&self, position: usize) -> Option<char> {
        self.rope.get_char(position)
    }

    /// Add a character to the end of the paper.
    pub fn append(&mut self, ch: char) {
        self.rope.insert_char(self.rope.len_chars(), ch);
    }

    /// Overwrite the character at `position`, returning the one it replaced.
    ///
    /// # Errors
    /// Returns [`Error::OutOfBounds`] if `position` is past the end of the paper.
    pub fn replace_at(&mut self, position: usize, ch: char) -> Result<char> {
        let previous = self.char_at(position).ok_or(Error::OutOfBounds {
            position,
            len: self.len(),
        })?;
        self.rope.remove(position..=position);
        self.rope.insert_char(position, ch);
        Ok(previous)
    }

    /// Start position of the right-most occurrence of `needle`.
    ///
    /// Candidate starts are checked right to left against the rope in place,
    /// so the paper is never copied out. An empty needle never matches.
    pub fn find_last(&self, needle: &str) -> Option<usize> {
        if needle.is_empty() {
            return None;
        }
        let needle: Vec<char> = needle.chars().collect();
        let last_start = self.len().checked_sub(needle.len())?;
        (0..=last_start).rev().find(|&start| {
            self.rope
                .chars_at(start)
                .zip(&needle)
                .all(|(ch, wanted)| ch == *wanted)
        })
    }
}

impl Default for Paper {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Paper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in self.rope.chunks() {
            f.write_str(chunk)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Paper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Paper")
            .field("rope", &format_args!("Rope({} chars)", self.rope.len_chars()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Construction ---

    #[test]
    fn test_new_paper_is_blank() {
        let paper = Paper::new();
        assert!(paper.is_empty());
        assert_eq!(paper.text(), "");
    }

    #[test]
    fn test_from_text_preserves_content() {
        let paper = Paper::from_text("Sally sells sea shells");
        assert_eq!(paper.text(), "Sally sells sea shells");
        assert_eq!(paper.len(), 22);
    }

    #[test]
    fn test_display_matches_text() {
        let paper = Paper::from_text("line one\nline two");
        assert_eq!(paper.to_string(), paper.text());
    }

    // --- Append ---

    #[test]
    fn test_append_adds_to_end() {
        let mut paper = Paper::from_text("ab");
        paper.append('c');
        assert_eq!(paper.text(), "abc");
    }

    #[test]
    fn test_append_multibyte_counts_as_one_position() {
        let mut paper = Paper::new();
        paper.append('é');
        paper.append('x');
        assert_eq!(paper.len(), 2);
        assert_eq!(paper.char_at(1), Some('x'));
    }

    // --- Replace ---

    #[test]
    fn test_replace_at_returns_previous_char() {
        let mut paper = Paper::from_text("cat");
        assert_eq!(paper.replace_at(1, 'u'), Ok('a'));
        assert_eq!(paper.text(), "cut");
    }

    #[test]
    fn test_replace_at_keeps_length() {
        let mut paper = Paper::from_text("café!");
        paper.replace_at(3, 'e').unwrap();
        assert_eq!(paper.text(), "cafe!");
        assert_eq!(paper.len(), 5);
    }

    #[test]
    fn test_replace_at_out_of_bounds_is_error() {
        let mut paper = Paper::from_text("abc");
        assert_eq!(
            paper.replace_at(3, 'x'),
            Err(Error::OutOfBounds { position: 3, len: 3 })
        );
        assert_eq!(paper.text(), "abc");
    }

    // --- Search ---

    #[test]
    fn test_find_last_picks_rightmost_occurrence() {
        let paper = Paper::from_text("something goes in this something");
        assert_eq!(paper.find_last("some"), Some(23));
    }

    #[test]
    fn test_find_last_missing_returns_none() {
        let paper = Paper::from_text("hello");
        assert_eq!(paper.find_last("world"), None);
    }

    #[test]
    fn test_find_last_empty_needle_returns_none() {
        let paper = Paper::from_text("hello");
        assert_eq!(paper.find_last(""), None);
    }

    #[test]
    fn test_find_last_needle_longer_than_paper() {
        let paper = Paper::from_text("ab");
        assert_eq!(paper.find_last("abc"), None);
    }

    #[test]
    fn test_find_last_overlapping_candidates() {
        let paper = Paper::from_text("aaaa");
        assert_eq!(paper.find_last("aa"), Some(2));
    }

    #[test]
    fn test_find_last_sees_edits_in_place() {
        let mut paper = Paper::from_text("one two one");
        paper.replace_at(8, 'x').unwrap();
        assert_eq!(paper.find_last("one"), Some(0));
    }

    #[test]
    fn test_find_last_reports_char_position_after_multibyte() {
        let paper = Paper::from_text("über über");
        assert_eq!(paper.find_last("ber"), Some(6));
    }
}
