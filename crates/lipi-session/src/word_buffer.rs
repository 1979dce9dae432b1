//! The in-progress word and its provisional conversion.

use lipi_core::unicode::char_len;
use tracing::trace;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum WordState {
    #[default]
    Empty,
    Accumulating {
        /// Untranslated keystrokes since the last boundary.
        raw: String,
        /// Converted text currently in the document for this word.
        inserted: String,
    },
}

/// Replace `replaced` (the last `delete_chars` chars before the caret)
/// with `insert`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferEdit {
    pub delete_chars: usize,
    pub replaced: String,
    pub insert: String,
}

#[derive(Debug, Clone)]
pub struct WordBuffer {
    state: WordState,
    max_chars: usize,
}

impl WordBuffer {
    pub fn new(max_chars: usize) -> Self {
        Self {
            state: WordState::Empty,
            max_chars: max_chars.max(1),
        }
    }

    pub fn state(&self) -> &WordState {
        &self.state
    }

    pub fn raw(&self) -> &str {
        match &self.state {
            WordState::Empty => "",
            WordState::Accumulating { raw, .. } => raw,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.state == WordState::Empty
    }

    pub fn reset(&mut self) {
        if !self.is_empty() {
            trace!(raw = self.raw(), "word buffer reset");
        }
        self.state = WordState::Empty;
    }

    /// Append a printable key and plan the document edit that replaces the
    /// previous provisional text with the new conversion.
    pub fn push(&mut self, text: &str, convert: impl Fn(&str) -> String) -> BufferEdit {
        let (mut raw, mut previous) = match std::mem::take(&mut self.state) {
            WordState::Empty => (String::new(), String::new()),
            WordState::Accumulating { raw, inserted } => (raw, inserted),
        };
        if char_len(&raw) + char_len(text) > self.max_chars {
            // Finalise the long word as typed; the key starts a new one.
            trace!(raw = %raw, "word length limit reached");
            raw.clear();
            previous.clear();
        }
        raw.push_str(text);
        let converted = convert(&raw);
        let edit = BufferEdit {
            delete_chars: char_len(&previous),
            replaced: previous,
            insert: converted.clone(),
        };
        self.state = WordState::Accumulating {
            raw,
            inserted: converted,
        };
        edit
    }
}
