use tracing::{debug_span, trace};

use lipi_core::command::Command;
use lipi_core::document::{DeleteUnit, EditorCommands};
use lipi_core::romaji::convert_with;

use super::types::{KeyEvent, KeyResponse};
use super::word_buffer::{BufferEdit, WordState};
use super::InputSession;

impl InputSession {
    /// Process a key-down event against `editor`.
    ///
    /// Printable keys are consumed and edit the document directly. Boundary
    /// keys end the current word and are returned unconsumed so the host
    /// can apply its default behaviour, unless they are a configured
    /// shortcut.
    pub fn handle_key<E: EditorCommands + ?Sized>(
        &mut self,
        editor: &mut E,
        event: KeyEvent,
    ) -> KeyResponse {
        let _span = debug_span!("handle_key", ?event).entered();

        if let Some(command) = self.shortcut(&event) {
            let changed = self.run_command(editor, command);
            let mut r = KeyResponse::consumed(changed);
            r.command = Some(command);
            return r;
        }

        match event {
            KeyEvent::Text { ref text } if !self.transliterate => {
                self.buffer.reset();
                KeyResponse::consumed(editor.insert_text(text))
            }
            KeyEvent::Text { ref text } => self.handle_printable(editor, text),
            _ => {
                self.buffer.reset();
                KeyResponse::not_consumed()
            }
        }
    }

    fn shortcut(&self, event: &KeyEvent) -> Option<Command> {
        let (key, m) = match event {
            KeyEvent::ModifiedKey { key, modifiers } => (key.as_str(), *modifiers),
            _ => return None,
        };
        self.settings
            .shortcut_for(key, m.ctrl, m.alt, m.meta, m.shift)
    }

    fn handle_printable<E: EditorCommands + ?Sized>(
        &mut self,
        editor: &mut E,
        text: &str,
    ) -> KeyResponse {
        let moved = match self.buffer.state() {
            WordState::Accumulating { inserted, .. } => {
                editor.text_before_caret(inserted.chars().count()).as_deref()
                    != Some(inserted.as_str())
            }
            WordState::Empty => false,
        };
        if moved {
            trace!("caret no longer after word; starting fresh");
            self.buffer.reset();
        }

        let table = &self.table;
        let edit = self.buffer.push(text, |raw| convert_with(table, raw));
        if !apply_edit(editor, &edit) {
            self.buffer.reset();
            return KeyResponse::consumed(false);
        }
        KeyResponse::consumed(true)
    }
}

fn apply_edit<E: EditorCommands + ?Sized>(editor: &mut E, edit: &BufferEdit) -> bool {
    if edit.delete_chars > 0 && !editor.delete_backward(DeleteUnit::Span(edit.delete_chars)) {
        return false;
    }
    editor.insert_text(&edit.insert)
}
