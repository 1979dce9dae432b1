use lipi_core::command::Command;
use lipi_core::document::{CaretMove, DeleteUnit, Document, Editor, EditorCommands, Point};
use lipi_core::romaji::RomanTable;
use lipi_core::settings::Settings;
use lipi_core::storage::{load_document, save_document, Storage};
use tracing::{debug, warn};

use super::types::{KeyEvent, KeyResponse};
use super::InputSession;

/// What the editing surface does with a key nobody consumed.
pub trait DefaultBehaviour {
    /// Returns whether the document changed.
    fn apply_default(&mut self, event: &KeyEvent) -> bool;
}

impl DefaultBehaviour for Editor {
    fn apply_default(&mut self, event: &KeyEvent) -> bool {
        match event {
            KeyEvent::Space => self.insert_text(" "),
            KeyEvent::Enter => self.insert_break(),
            KeyEvent::Backspace => self.delete_backward(DeleteUnit::Character),
            KeyEvent::ForwardDelete => self.delete_forward(),
            KeyEvent::ArrowLeft => {
                self.move_caret(CaretMove::Left);
                false
            }
            KeyEvent::ArrowRight => {
                self.move_caret(CaretMove::Right);
                false
            }
            KeyEvent::ArrowUp => {
                self.move_caret(CaretMove::Up);
                false
            }
            KeyEvent::ArrowDown => {
                self.move_caret(CaretMove::Down);
                false
            }
            KeyEvent::Home => {
                self.move_caret(CaretMove::LineStart);
                false
            }
            KeyEvent::End => {
                self.move_caret(CaretMove::LineEnd);
                false
            }
            _ => false,
        }
    }
}

/// One editing surface: document, caret, word buffer and persistence.
pub struct EditingSession<S: Storage> {
    editor: Editor,
    input: InputSession,
    storage: S,
}

impl<S: Storage> EditingSession<S> {
    /// Load the document stored under the configured key, falling back to
    /// the seed document, and place the caret in the first editable block.
    pub fn open(storage: S, settings: Settings) -> Self {
        let table = RomanTable::shared();
        Self::open_with_table(storage, settings, table)
    }

    pub fn open_with_table(
        storage: S,
        settings: Settings,
        table: std::sync::Arc<RomanTable>,
    ) -> Self {
        let document = match load_document(&storage, &settings.storage.key) {
            Ok(Some(doc)) if !doc.is_empty() => {
                debug!(blocks = doc.len(), "loaded stored document");
                doc
            }
            Ok(_) => Document::seed(),
            Err(e) => {
                warn!(error = %e, "stored document unreadable; using seed");
                Document::seed()
            }
        };
        let mut editor = Editor::new(document);
        editor.focus_first_editable();
        Self {
            editor,
            input: InputSession::with_settings(table, settings),
            storage,
        }
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn document(&self) -> &Document {
        self.editor.document()
    }

    pub fn input(&self) -> &InputSession {
        &self.input
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_parts(self) -> (Editor, S) {
        (self.editor, self.storage)
    }

    /// Dispatch a key, then apply the default behaviour if it was not
    /// consumed.
    pub fn handle_key(&mut self, event: KeyEvent) -> KeyResponse {
        let mut r = self.input.handle_key(&mut self.editor, event.clone());
        if !r.consumed {
            r.changed |= self.editor.apply_default(&event);
        }
        if r.changed {
            self.persist();
        }
        r
    }

    pub fn run_command(&mut self, command: Command) -> bool {
        let changed = self.input.run_command(&mut self.editor, command);
        if changed {
            self.persist();
        }
        changed
    }

    /// Caret placed by the host (click, touch). Ends the current word.
    pub fn select(&mut self, point: Point) {
        self.input.reset();
        self.editor.select(point);
    }

    pub fn select_range(&mut self, anchor: Point, focus: Point) {
        self.input.reset();
        self.editor.select_range(anchor, focus);
    }

    pub fn blur(&mut self) {
        self.input.blur();
        self.editor.deselect();
    }

    /// Write the document to storage. Failures are logged, not returned.
    pub fn persist(&mut self) {
        let settings = self.input.settings();
        if !settings.storage.persist {
            return;
        }
        let key = settings.storage.key.clone();
        if let Err(e) = save_document(&mut self.storage, &key, self.editor.document()) {
            warn!(error = %e, key = %key, "failed to persist document");
        }
    }
}
