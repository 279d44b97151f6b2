//! The pencil: graphite, length and eraser budgets, and the operations that
//! spend them against a [`Paper`].

use serde::Serialize;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::paper::Paper;

/// Durability a pencil starts with unless overridden.
pub const DEFAULT_DURABILITY: i64 = 20;
/// Number of times a fresh pencil can be sharpened back to full durability.
pub const DEFAULT_LENGTH: i64 = 10;
/// Characters a fresh eraser can remove.
pub const DEFAULT_ERASER_DURABILITY: u32 = 5;

pub const WHITESPACE_COST: u32 = 0;
pub const UPPERCASE_COST: u32 = 2;
/// Cost of lowercase letters, digits, punctuation and anything else.
pub const DEFAULT_COST: u32 = 1;

/// Written in place of an edited character that collides with existing text.
pub const CONFLICT_MARKER: char = '@';

/// Graphite spent writing `ch`.
pub fn cost_of(ch: char) -> u32 {
    if ch.is_whitespace() {
        WHITESPACE_COST
    } else if ch.is_uppercase() {
        UPPERCASE_COST
    } else {
        DEFAULT_COST
    }
}

/// Point-in-time view of a pencil's budgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PencilStatus {
    pub durability: i64,
    pub length: i64,
    pub eraser_durability: u32,
}

/// A pencil with finite graphite, length and eraser.
///
/// The pencil never holds on to a [`Paper`]; every operation borrows the
/// sheet it acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pencil {
    initial_durability: i64,
    durability: i64,
    length: i64,
    initial_eraser_durability: u32,
    eraser_durability: u32,
}

impl Pencil {
    /// Create a pencil with the default budgets.
    pub const fn new() -> Self {
        Self {
            initial_durability: DEFAULT_DURABILITY,
            durability: DEFAULT_DURABILITY,
            length: DEFAULT_LENGTH,
            initial_eraser_durability: DEFAULT_ERASER_DURABILITY,
            eraser_durability: DEFAULT_ERASER_DURABILITY,
        }
    }

    /// Override the starting durability. Negative values clamp to zero, and
    /// the clamped value is what sharpening restores.
    #[must_use]
    pub fn with_durability(mut self, durability: i64) -> Self {
        let durability = durability.max(0);
        self.initial_durability = durability;
        self.durability = durability;
        self
    }

    #[must_use]
    pub const fn with_length(mut self, length: i64) -> Self {
        self.length = length;
        self
    }

    #[must_use]
    pub const fn with_eraser_durability(mut self, eraser_durability: u32) -> Self {
        self.initial_eraser_durability = eraser_durability;
        self.eraser_durability = eraser_durability;
        self
    }

    pub const fn durability(&self) -> i64 {
        self.durability
    }

    /// The durability sharpening restores.
    pub const fn initial_durability(&self) -> i64 {
        self.initial_durability
    }

    pub const fn length(&self) -> i64 {
        self.length
    }

    pub const fn eraser_durability(&self) -> u32 {
        self.eraser_durability
    }

    pub const fn initial_eraser_durability(&self) -> u32 {
        self.initial_eraser_durability
    }

    pub const fn status(&self) -> PencilStatus {
        PencilStatus {
            durability: self.durability,
            length: self.length,
            eraser_durability: self.eraser_durability,
        }
    }

    /// Append `text` to the paper, spending durability per character.
    ///
    /// The first character the pencil cannot afford is written as a space,
    /// and so is every character after it in the same call. Durability is
    /// only spent on characters actually written.
    pub fn write(&mut self, text: &str, paper: &mut Paper) {
        let mut exhausted = false;
        let mut blanked = 0usize;
        for ch in text.chars() {
            let cost = i64::from(cost_of(ch));
            if !exhausted && self.durability >= cost {
                paper.append(ch);
                self.durability -= cost;
            } else {
                if !exhausted {
                    trace!(%ch, durability = self.durability, "pencil too dull to write");
                }
                exhausted = true;
                blanked += 1;
                paper.append(' ');
            }
        }
        debug!(
            chars = text.chars().count(),
            blanked,
            durability = self.durability,
            "write"
        );
    }

    /// Shorten the pencil and restore its point.
    ///
    /// A pencil with no length left is still shortened but keeps its
    /// current durability.
    pub fn sharpen(&mut self) {
        let usable = self.length > 0;
        self.length = self.length.saturating_sub(1);
        if usable {
            self.durability = self.initial_durability;
        }
        debug!(
            restored = usable,
            durability = self.durability,
            length = self.length,
            "sharpen"
        );
    }

    /// Erase the last occurrence of `text` from the paper, right to left.
    ///
    /// Each erased character wears the eraser by one; once it is worn out the
    /// remaining (left-most) characters of the match stay on the paper.
    /// Returns how many characters were erased.
    ///
    /// # Errors
    /// Returns [`Error::OutOfBounds`] if the matched span does not fit on the
    /// paper. Characters to its right are already erased at that point.
    pub fn erase(&mut self, text: &str, paper: &mut Paper) -> Result<usize> {
        let Some(start) = paper.find_last(text) else {
            debug!(text, "erase target not found");
            return Ok(0);
        };
        let end = start + text.chars().count();

        let mut erased = 0;
        for position in (start..end).rev() {
            if self.eraser_durability == 0 {
                break;
            }
            paper.replace_at(position, ' ')?;
            self.eraser_durability -= 1;
            erased += 1;
        }
        debug!(
            text,
            start,
            erased,
            eraser_durability = self.eraser_durability,
            "erase"
        );
        Ok(erased)
    }

    /// Write `text` over existing paper starting at `offset`.
    ///
    /// Whitespace on the paper is replaced by the new character; anything
    /// already written becomes [`CONFLICT_MARKER`]. Editing spends neither
    /// graphite nor eraser.
    ///
    /// # Errors
    /// Returns [`Error::OutOfBounds`] if the edited span runs past the end of
    /// the paper. The paper is left untouched in that case.
    #[allow(clippy::unused_self)]
    pub fn edit(&self, text: &str, offset: usize, paper: &mut Paper) -> Result<()> {
        let count = text.chars().count();
        let len = paper.len();
        if offset.checked_add(count).is_none_or(|end| end > len) {
            return Err(Error::OutOfBounds {
                position: offset.saturating_add(count).saturating_sub(1).max(offset),
                len,
            });
        }

        let mut conflicts = 0usize;
        for (position, ch) in (offset..).zip(text.chars()) {
            let existing = paper.char_at(position).ok_or(Error::OutOfBounds { position, len })?;
            let replacement = if existing.is_whitespace() {
                ch
            } else {
                conflicts += 1;
                CONFLICT_MARKER
            };
            paper.replace_at(position, replacement)?;
        }
        debug!(offset, chars = count, conflicts, "edit");
        Ok(())
    }
}

impl Default for Pencil {
    fn default() -> Self {
        Self::new()
    }
}
