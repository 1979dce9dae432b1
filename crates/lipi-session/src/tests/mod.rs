mod basic;

use std::io;

use lipi_core::document::{Document, Editor, Point};
use lipi_core::romaji::RomanTable;
use lipi_core::settings::{parse_settings_toml, Settings, DEFAULT_SETTINGS_TOML};
use lipi_core::storage::{Storage, StorageError};

use super::types::{KeyEvent, Modifiers};
use super::InputSession;

pub(super) fn make_session() -> InputSession {
    InputSession::with_settings(RomanTable::shared(), Settings::default_settings())
}

pub(super) fn settings_with(from: &str, to: &str) -> Settings {
    parse_settings_toml(&DEFAULT_SETTINGS_TOML.replace(from, to)).unwrap()
}

/// Seed document with the caret in the first editable block (block-2).
pub(super) fn seeded_editor() -> Editor {
    let mut editor = Editor::new(Document::seed());
    assert!(editor.focus_first_editable());
    editor
}

pub(super) fn type_string(session: &mut InputSession, editor: &mut Editor, s: &str) {
    for c in s.chars() {
        session.handle_key(editor, KeyEvent::from_char(c));
    }
}

pub(super) fn ctrl(key: &str) -> KeyEvent {
    KeyEvent::from_dom(key, Modifiers::ctrl())
}

pub(super) fn block_text(editor: &Editor, index: usize) -> String {
    editor.document().blocks()[index].text()
}

pub(super) fn caret(editor: &Editor) -> Option<Point> {
    editor
        .selection()
        .filter(|s| s.is_collapsed())
        .map(|s| s.focus)
}

/// Storage whose writes always fail.
#[derive(Debug, Default)]
pub(super) struct FailingStorage {
    pub writes: usize,
}

impl Storage for FailingStorage {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn set_item(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        self.writes += 1;
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "quota exceeded").into())
    }

    fn remove_item(&mut self, _key: &str) -> Result<(), StorageError> {
        Ok(())
    }
}
