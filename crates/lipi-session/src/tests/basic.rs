use super::*;
use crate::types::KeyResponse;
use crate::WordState;
use lipi_core::command::Command;
use lipi_core::document::{Mark, Point};

// --- Key classification ---

#[test]
fn test_from_dom_named_keys() {
    let none = Modifiers::NONE;
    assert_eq!(KeyEvent::from_dom(" ", none), KeyEvent::Space);
    assert_eq!(KeyEvent::from_dom("Enter", none), KeyEvent::Enter);
    assert_eq!(KeyEvent::from_dom("Delete", none), KeyEvent::ForwardDelete);
    assert_eq!(KeyEvent::from_dom("ArrowLeft", none), KeyEvent::ArrowLeft);
    assert_eq!(KeyEvent::from_dom("PageDown", none), KeyEvent::PageDown);
    assert_eq!(KeyEvent::from_dom("Shift", none), KeyEvent::ModifierOnly);
    assert_eq!(KeyEvent::from_dom("Control", Modifiers::ctrl()), KeyEvent::ModifierOnly);
    assert_eq!(KeyEvent::from_dom("k", none), KeyEvent::text("k"));
    assert_eq!(
        KeyEvent::from_dom("F5", none),
        KeyEvent::Other { key: "F5".into() }
    );
}

#[test]
fn test_from_dom_chords() {
    assert_eq!(
        KeyEvent::from_dom("b", Modifiers::ctrl()),
        KeyEvent::ModifiedKey {
            key: "b".into(),
            modifiers: Modifiers::ctrl()
        }
    );
    // Shift alone still produces text.
    let shift = Modifiers {
        shift: true,
        ..Modifiers::NONE
    };
    assert_eq!(KeyEvent::from_dom("A", shift), KeyEvent::text("A"));
}

#[test]
fn test_boundary_classification() {
    assert!(!KeyEvent::text("a").is_boundary());
    for event in [
        KeyEvent::Space,
        KeyEvent::Enter,
        KeyEvent::Tab,
        KeyEvent::Backspace,
        KeyEvent::ForwardDelete,
        KeyEvent::Escape,
        KeyEvent::ArrowUp,
        KeyEvent::Home,
        KeyEvent::ModifierOnly,
        ctrl("x"),
    ] {
        assert!(event.is_boundary(), "{event:?}");
    }
}

// --- Printable keys ---

#[test]
fn test_printable_key_consumed_and_inserted() {
    let mut session = make_session();
    let mut editor = seeded_editor();

    let resp = session.handle_key(&mut editor, KeyEvent::text("k"));
    assert_eq!(resp, KeyResponse::consumed(true));
    assert_eq!(block_text(&editor, 1), "क्");
    assert!(session.is_accumulating());
    assert_eq!(session.raw(), "k");
}

#[test]
fn test_word_replaced_in_place() {
    let mut session = make_session();
    let mut editor = seeded_editor();

    type_string(&mut session, &mut editor, "kha");
    assert_eq!(block_text(&editor, 1), "ख");
    assert_eq!(
        session.word_state(),
        &WordState::Accumulating {
            raw: "kha".into(),
            inserted: "ख".into()
        }
    );
    assert_eq!(caret(&editor), Some(Point::new(1, 1)));
}

// --- Boundaries ---

#[test]
fn test_boundary_keys_reset_and_pass_through() {
    for event in [
        KeyEvent::Space,
        KeyEvent::Enter,
        KeyEvent::Tab,
        KeyEvent::Backspace,
        KeyEvent::Escape,
        KeyEvent::ArrowLeft,
        KeyEvent::End,
        KeyEvent::ModifierOnly,
        KeyEvent::Other { key: "F2".into() },
        ctrl("z"),
    ] {
        let mut session = make_session();
        let mut editor = seeded_editor();
        type_string(&mut session, &mut editor, "na");

        let resp = session.handle_key(&mut editor, event.clone());
        assert!(!resp.consumed, "{event:?}");
        assert!(!resp.changed, "{event:?}");
        assert!(!session.is_accumulating(), "{event:?}");
        // The session itself leaves the document alone.
        assert_eq!(block_text(&editor, 1), "न");
    }
}

#[test]
fn test_blur_resets_buffer() {
    let mut session = make_session();
    let mut editor = seeded_editor();
    type_string(&mut session, &mut editor, "ka");
    session.blur();
    assert!(!session.is_accumulating());

    type_string(&mut session, &mut editor, "i");
    assert_eq!(block_text(&editor, 1), "कइ");
}

// --- Editability ---

#[test]
fn test_no_selection_is_silent_noop() {
    let mut session = make_session();
    let mut editor = seeded_editor();
    editor.deselect();

    let resp = session.handle_key(&mut editor, KeyEvent::text("k"));
    assert!(resp.consumed);
    assert!(!resp.changed);
    assert!(!session.is_accumulating());
    assert_eq!(editor.document(), &lipi_core::document::Document::seed());
}

#[test]
fn test_caret_in_read_only_block_is_noop() {
    let mut session = make_session();
    let mut editor = seeded_editor();
    editor.select(Point::new(0, 5));

    let resp = session.handle_key(&mut editor, KeyEvent::text("k"));
    assert!(resp.consumed);
    assert!(!resp.changed);
    assert_eq!(block_text(&editor, 0), "A line of text to be translated.");
    assert!(!session.is_accumulating());
}

// --- Shortcuts and modes ---

#[test]
fn test_bold_shortcut_runs_command() {
    let mut session = make_session();
    let mut editor = seeded_editor();
    type_string(&mut session, &mut editor, "namaste");
    editor.select_range(Point::new(1, 0), Point::new(1, 3));

    let resp = session.handle_key(&mut editor, ctrl("b"));
    assert!(resp.consumed);
    assert!(resp.changed);
    assert_eq!(resp.command, Some(Command::ToggleBold));
    assert!(!session.is_accumulating());

    let block = &editor.document().blocks()[1];
    assert_eq!(block.children[0].text, "नमस");
    assert!(block.children[0].marks.contains(Mark::Bold));
    assert!(!block.children[1].marks.contains(Mark::Bold));
}

#[test]
fn test_code_block_shortcut_toggles_kind() {
    use lipi_core::document::BlockKind;

    let mut session = make_session();
    let mut editor = seeded_editor();
    session.handle_key(&mut editor, ctrl("`"));
    assert_eq!(editor.document().blocks()[1].kind, BlockKind::Preformatted);
    session.handle_key(&mut editor, ctrl("`"));
    assert_eq!(editor.document().blocks()[1].kind, BlockKind::Editable);
}

#[test]
fn test_transliteration_toggle_passthrough() {
    let mut session = make_session();
    let mut editor = seeded_editor();
    type_string(&mut session, &mut editor, "na");

    let resp = session.handle_key(&mut editor, ctrl(" "));
    assert_eq!(resp.command, Some(Command::ToggleTransliteration));
    assert!(!session.is_transliterating());
    assert!(!session.is_accumulating());

    type_string(&mut session, &mut editor, "ma");
    assert_eq!(block_text(&editor, 1), "नma");
    assert!(!session.is_accumulating());

    session.handle_key(&mut editor, ctrl(" "));
    type_string(&mut session, &mut editor, "ka");
    assert_eq!(block_text(&editor, 1), "नmaक");
}

#[test]
fn test_transliteration_off_in_settings() {
    let settings = settings_with("transliterate = true", "transliterate = false");
    let mut session = InputSession::with_settings(RomanTable::shared(), settings);
    let mut editor = seeded_editor();
    type_string(&mut session, &mut editor, "namaste");
    assert_eq!(block_text(&editor, 1), "namaste");
}

#[test]
fn test_unbound_chord_not_consumed() {
    let mut session = make_session();
    let mut editor = seeded_editor();
    let resp = session.handle_key(&mut editor, ctrl("q"));
    assert_eq!(resp, KeyResponse::not_consumed());
}

#[test]
fn test_word_length_limit() {
    let settings = settings_with("max_word_chars = 32", "max_word_chars = 2");
    let mut session = InputSession::with_settings(RomanTable::shared(), settings);
    let mut editor = seeded_editor();
    type_string(&mut session, &mut editor, "kak");
    // "ka" finalised, "k" starts a new word.
    assert_eq!(block_text(&editor, 1), "कक्");
    assert_eq!(session.raw(), "k");
}
