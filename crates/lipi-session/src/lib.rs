//! Keystroke-level transliteration over the document editor.
//!
//! `InputSession` tracks the word being typed and turns each printable key
//! into a replace-in-place edit on an [`EditorCommands`] implementation.
//! `EditingSession` wires it to an `Editor`, the host default key
//! behaviour, and persistence.

pub mod types;

mod editing;
mod key_handlers;
mod word_buffer;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use lipi_core::command::Command;
use lipi_core::document::formatting::{toggle_block, toggle_mark};
use lipi_core::document::{BlockKind, EditorCommands, Mark};
use lipi_core::romaji::RomanTable;
use lipi_core::settings::{self, Settings};
use tracing::debug;

pub use editing::{DefaultBehaviour, EditingSession};
pub use types::{KeyEvent, KeyResponse, Modifiers};
pub use word_buffer::{BufferEdit, WordBuffer, WordState};

/// Stateful per-surface input handler.
pub struct InputSession {
    table: Arc<RomanTable>,
    settings: Settings,
    buffer: WordBuffer,
    /// Printable keys are converted; when false they insert literally.
    transliterate: bool,
}

impl InputSession {
    /// Session over `table` with the global settings.
    pub fn new(table: Arc<RomanTable>) -> Self {
        Self::with_settings(table, settings::settings().clone())
    }

    pub fn with_settings(table: Arc<RomanTable>, settings: Settings) -> Self {
        Self {
            table,
            buffer: WordBuffer::new(settings.input.max_word_chars),
            transliterate: settings.input.transliterate,
            settings,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_transliterating(&self) -> bool {
        self.transliterate
    }

    pub fn is_accumulating(&self) -> bool {
        !self.buffer.is_empty()
    }

    /// Untranslated keystrokes of the current word.
    pub fn raw(&self) -> &str {
        self.buffer.raw()
    }

    pub fn word_state(&self) -> &WordState {
        self.buffer.state()
    }

    /// Focus left the surface.
    pub fn blur(&mut self) {
        self.buffer.reset();
    }

    pub fn reset(&mut self) {
        self.buffer.reset();
    }

    /// Run a command against `editor`. Returns whether the document changed.
    pub fn run_command<E: EditorCommands + ?Sized>(
        &mut self,
        editor: &mut E,
        command: Command,
    ) -> bool {
        debug!(?command, "run command");
        self.buffer.reset();
        match command {
            Command::ToggleBold => toggle_mark(editor, Mark::Bold),
            Command::ToggleItalic => toggle_mark(editor, Mark::Italic),
            Command::ToggleCodeBlock => toggle_block(editor, BlockKind::Preformatted),
            Command::ToggleTransliteration => {
                self.transliterate = !self.transliterate;
                false
            }
        }
    }
}
