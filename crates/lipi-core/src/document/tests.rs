use proptest::prelude::*;

use super::formatting::{is_block_active, is_mark_active, toggle_block, toggle_mark};
use super::*;

fn editor_with(blocks: Vec<Block>) -> Editor {
    Editor::new(Document::new(blocks))
}

fn para(id: &str, leaves: Vec<Leaf>) -> Block {
    Block::new(id, BlockKind::Editable, leaves)
}

fn text_of(editor: &Editor, index: usize) -> String {
    editor.document().blocks()[index].text()
}

// --- Serialization ---

#[test]
fn test_seed_shape() {
    let doc = Document::seed();
    let kinds: Vec<BlockKind> = doc.blocks().iter().map(|b| b.kind).collect();
    assert_eq!(
        kinds,
        vec![
            BlockKind::ReadOnly,
            BlockKind::Editable,
            BlockKind::ReadOnly,
            BlockKind::Editable
        ]
    );
    assert_eq!(doc.blocks()[0].text(), "A line of text to be translated.");
    assert_eq!(doc.blocks()[3].id.as_str(), "block-4");
}

#[test]
fn test_json_shape() {
    let doc = Document::new(vec![
        Block::new("block-1", BlockKind::ReadOnly, vec![Leaf::new("ref")]),
        para(
            "block-2",
            vec![Leaf::new("a").with_mark(Mark::Bold), Leaf::new("b")],
        ),
    ]);
    assert_eq!(
        doc.to_json().unwrap(),
        r#"[{"id":"block-1","type":"readOnly","children":[{"text":"ref"}]},{"id":"block-2","type":"paragraph","children":[{"text":"a","bold":true},{"text":"b"}]}]"#
    );
}

#[test]
fn test_json_roundtrip_preserves_order_ids_kinds_marks() {
    let doc = Document::new(vec![
        Block::new("x", BlockKind::Preformatted, vec![Leaf::new("let a")]),
        Block::new("block-1", BlockKind::ReadOnly, vec![Leaf::new("ref")]),
        para(
            "b",
            vec![
                Leaf::new("न").with_mark(Mark::Bold),
                Leaf::new("म").with_mark(Mark::Italic),
                Leaf::new("स्ते"),
            ],
        ),
    ]);
    let back = Document::from_json(&doc.to_json().unwrap()).unwrap();
    assert_eq!(back, doc);
}

#[test]
fn test_json_accepts_null_type_and_marks() {
    let json = r#"[{"id":"p","type":null,"children":[{"text":"a","bold":null}]}]"#;
    let doc = Document::from_json(json).unwrap();
    assert_eq!(doc.blocks()[0].kind, BlockKind::Editable);
    assert!(doc.blocks()[0].children[0].marks.is_empty());
}

#[test]
fn test_json_normalizes_on_load() {
    let json = r#"[{"id":"p","type":"paragraph","children":[{"text":"a"},{"text":""},{"text":"b"}]}]"#;
    let doc = Document::from_json(json).unwrap();
    assert_eq!(doc.blocks()[0].children, vec![Leaf::new("ab")]);
}

#[test]
fn test_next_block_id_skips_existing() {
    let doc = Document::seed();
    assert_eq!(doc.next_block_id().as_str(), "block-5");
    let doc = Document::new(vec![para("custom", vec![])]);
    assert_eq!(doc.next_block_id().as_str(), "block-1");
}

#[test]
fn test_next_block_id_wraps_at_largest_number() {
    let json = r#"[
        {"id": "block-18446744073709551615", "type": "paragraph", "children": [{"text": "ab"}]},
        {"id": "block-1", "type": "paragraph", "children": [{"text": ""}]}
    ]"#;
    let doc = Document::from_json(json).unwrap();
    assert_eq!(doc.next_block_id().as_str(), "block-2");

    let mut editor = Editor::new(doc);
    editor.select(Point::new(0, 1));
    assert!(editor.insert_break());
    let blocks = editor.document().blocks();
    assert_eq!(blocks.len(), 3);
    assert_eq!(blocks[1].id.as_str(), "block-2");
    assert_eq!(blocks[1].text(), "b");
}

// --- Insert / delete ---

#[test]
fn test_no_selection_is_noop() {
    let mut editor = Editor::new(Document::seed());
    assert!(!editor.insert_text("x"));
    assert!(!editor.delete_backward(DeleteUnit::Character));
    assert!(editor.nodes(NodesOptions::any(NodeMatch::Block)).next().is_none());
    assert_eq!(editor.document(), &Document::seed());
}

#[test]
fn test_insert_and_caret_advance() {
    let mut editor = editor_with(vec![para("p", vec![Leaf::new("")])]);
    editor.select(Point::new(0, 0));
    assert!(editor.insert_text("नम"));
    assert_eq!(editor.selection(), Some(Selection::caret(Point::new(0, 2))));
    assert!(editor.insert_text("a"));
    assert_eq!(text_of(&editor, 0), "नमa");
}

#[test]
fn test_insert_inherits_marks_of_preceding_leaf() {
    let mut editor = editor_with(vec![para(
        "p",
        vec![Leaf::new("ab").with_mark(Mark::Bold), Leaf::new("cd")],
    )]);
    editor.select(Point::new(0, 2));
    editor.insert_text("X");
    let children = &editor.document().blocks()[0].children;
    assert_eq!(children[0], Leaf::new("abX").with_mark(Mark::Bold));
    assert_eq!(children[1], Leaf::new("cd"));
}

#[test]
fn test_insert_into_void_is_noop() {
    let mut editor = Editor::new(Document::seed());
    editor.select(Point::new(0, 5));
    // Caret in a void block is clamped to its start.
    assert_eq!(editor.selection(), Some(Selection::caret(Point::new(0, 0))));
    assert!(!editor.insert_text("x"));
    assert_eq!(text_of(&editor, 0), "A line of text to be translated.");
}

#[test]
fn test_delete_backward_character() {
    let mut editor = editor_with(vec![para("p", vec![Leaf::new("abc")])]);
    editor.select(Point::new(0, 3));
    assert!(editor.delete_backward(DeleteUnit::Character));
    assert_eq!(text_of(&editor, 0), "ab");
}

#[test]
fn test_delete_backward_span_is_exact() {
    let mut editor = editor_with(vec![para("p", vec![Leaf::new("नमस्ते")])]);
    editor.select(Point::new(0, 6));
    assert!(editor.delete_backward(DeleteUnit::Span(2)));
    assert_eq!(text_of(&editor, 0), "नमस्");
    assert!(!editor.delete_backward(DeleteUnit::Span(0)));
}

#[test]
fn test_delete_backward_word() {
    let mut editor = editor_with(vec![para("p", vec![Leaf::new("ram shyam  ")])]);
    editor.select(Point::new(0, 11));
    assert!(editor.delete_backward(DeleteUnit::Word));
    assert_eq!(text_of(&editor, 0), "ram ");
}

#[test]
fn test_backspace_at_block_start_merges_editable() {
    let mut editor = editor_with(vec![
        para("a", vec![Leaf::new("one")]),
        para("b", vec![Leaf::new("two")]),
    ]);
    editor.select(Point::new(1, 0));
    assert!(editor.delete_backward(DeleteUnit::Character));
    assert_eq!(editor.document().len(), 1);
    assert_eq!(text_of(&editor, 0), "onetwo");
    assert_eq!(editor.document().blocks()[0].id.as_str(), "a");
    assert_eq!(editor.selection(), Some(Selection::caret(Point::new(0, 3))));
}

#[test]
fn test_backspace_after_read_only_is_noop() {
    let mut editor = Editor::new(Document::seed());
    editor.select(Point::new(1, 0));
    assert!(!editor.delete_backward(DeleteUnit::Character));
    assert_eq!(editor.document(), &Document::seed());
}

#[test]
fn test_delete_forward_before_read_only_is_noop() {
    let mut editor = Editor::new(Document::seed());
    editor.select(Point::new(1, 0));
    assert!(!editor.delete_forward());
    assert_eq!(editor.document(), &Document::seed());
}

#[test]
fn test_expanded_delete_across_read_only_refused() {
    let mut editor = Editor::new(Document::seed());
    editor.select(Point::new(1, 0));
    editor.insert_text("abc");
    editor.select_range(Point::new(1, 1), Point::new(3, 0));
    assert!(!editor.insert_text("x"));
    assert_eq!(text_of(&editor, 1), "abc");
    assert_eq!(text_of(&editor, 2), "A line of text in third paragraph.");
}

#[test]
fn test_expanded_delete_across_editable_blocks() {
    let mut editor = editor_with(vec![
        para("a", vec![Leaf::new("hello")]),
        para("b", vec![Leaf::new("middle")]),
        para("c", vec![Leaf::new("world")]),
    ]);
    editor.select_range(Point::new(0, 2), Point::new(2, 3));
    assert!(editor.insert_text("-"));
    assert_eq!(editor.document().len(), 1);
    assert_eq!(text_of(&editor, 0), "he-ld");
}

#[test]
fn test_text_before_caret() {
    let mut editor = editor_with(vec![para("p", vec![Leaf::new("abनम")])]);
    editor.select(Point::new(0, 4));
    assert_eq!(editor.text_before_caret(2).as_deref(), Some("नम"));
    assert_eq!(editor.text_before_caret(0).as_deref(), Some(""));
    assert_eq!(editor.text_before_caret(5), None);
}

#[test]
fn test_insert_break_splits_with_fresh_id() {
    let mut editor = editor_with(vec![Block::new(
        "block-1",
        BlockKind::Preformatted,
        vec![Leaf::new("abcd")],
    )]);
    editor.select(Point::new(0, 2));
    assert!(editor.insert_break());
    let blocks = editor.document().blocks();
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].text(), "ab");
    assert_eq!(blocks[1].text(), "cd");
    assert_eq!(blocks[1].id.as_str(), "block-2");
    assert_eq!(blocks[1].kind, BlockKind::Preformatted);
    assert_eq!(editor.selection(), Some(Selection::caret(Point::new(1, 0))));
}

#[test]
fn test_move_caret_skips_void_blocks() {
    let mut editor = Editor::new(Document::seed());
    editor.select(Point::new(1, 0));
    assert!(editor.move_caret(CaretMove::Down));
    assert_eq!(editor.selection(), Some(Selection::caret(Point::new(3, 0))));
    assert!(editor.move_caret(CaretMove::Left));
    assert_eq!(editor.selection(), Some(Selection::caret(Point::new(1, 0))));
    assert!(!editor.move_caret(CaretMove::Up));
}

// --- Formatting ---

#[test]
fn test_toggle_bold_splits_runs_to_selection() {
    let mut editor = editor_with(vec![para(
        "p",
        vec![Leaf::new("hello ").with_mark(Mark::Bold), Leaf::new("world")],
    )]);
    editor.select_range(Point::new(0, 3), Point::new(0, 8));
    assert!(!is_mark_active(&editor, Mark::Bold));

    assert!(toggle_mark(&mut editor, Mark::Bold));
    assert_eq!(
        editor.document().blocks()[0].children,
        vec![Leaf::new("hello wo").with_mark(Mark::Bold), Leaf::new("rld")]
    );
    assert!(is_mark_active(&editor, Mark::Bold));

    assert!(toggle_mark(&mut editor, Mark::Bold));
    assert_eq!(
        editor.document().blocks()[0].children,
        vec![Leaf::new("hel").with_mark(Mark::Bold), Leaf::new("lo world")]
    );
}

#[test]
fn test_toggle_bold_collapsed_in_text_is_noop() {
    let mut editor = editor_with(vec![para("p", vec![Leaf::new("abc")])]);
    editor.select(Point::new(0, 1));
    assert!(!toggle_mark(&mut editor, Mark::Bold));
    assert_eq!(editor.document().blocks()[0].children, vec![Leaf::new("abc")]);
}

#[test]
fn test_toggle_bold_on_empty_leaf_then_type() {
    let mut editor = Editor::new(Document::seed());
    editor.select(Point::new(1, 0));
    assert!(toggle_mark(&mut editor, Mark::Bold));
    editor.insert_text("न");
    assert_eq!(
        editor.document().blocks()[1].children,
        vec![Leaf::new("न").with_mark(Mark::Bold)]
    );
}

#[test]
fn test_marks_skip_read_only_leaves() {
    let mut editor = Editor::new(Document::seed());
    editor.select(Point::new(3, 0));
    editor.insert_text("abc");
    editor.select_range(Point::new(0, 0), Point::new(3, 3));
    assert!(toggle_mark(&mut editor, Mark::Bold));
    assert!(editor.document().blocks()[0].children[0].marks.is_empty());
    assert!(editor.document().blocks()[2].children[0].marks.is_empty());
    assert!(editor.document().blocks()[3].children[0]
        .marks
        .contains(Mark::Bold));
}

#[test]
fn test_toggle_code_block() {
    let mut editor = editor_with(vec![para("p", vec![Leaf::new("x")])]);
    editor.select(Point::new(0, 1));
    assert!(!is_block_active(&editor, BlockKind::Preformatted));
    assert!(toggle_block(&mut editor, BlockKind::Preformatted));
    assert_eq!(editor.document().blocks()[0].kind, BlockKind::Preformatted);
    assert!(is_block_active(&editor, BlockKind::Preformatted));
    assert!(toggle_block(&mut editor, BlockKind::Preformatted));
    assert_eq!(editor.document().blocks()[0].kind, BlockKind::Editable);
}

#[test]
fn test_toggle_code_block_skips_read_only() {
    let mut editor = Editor::new(Document::seed());
    editor.select_range(Point::new(0, 0), Point::new(3, 0));
    assert!(toggle_block(&mut editor, BlockKind::Preformatted));
    let kinds: Vec<BlockKind> = editor.document().blocks().iter().map(|b| b.kind).collect();
    assert_eq!(
        kinds,
        vec![
            BlockKind::ReadOnly,
            BlockKind::Preformatted,
            BlockKind::ReadOnly,
            BlockKind::Preformatted
        ]
    );
}

#[test]
fn test_universal_query_needs_every_leaf() {
    let mut editor = editor_with(vec![para(
        "p",
        vec![Leaf::new("ab").with_mark(Mark::Bold), Leaf::new("cd")],
    )]);
    editor.select_range(Point::new(0, 0), Point::new(0, 2));
    assert!(is_mark_active(&editor, Mark::Bold));
    editor.select_range(Point::new(0, 0), Point::new(0, 3));
    assert!(!is_mark_active(&editor, Mark::Bold));
    let any: Vec<_> = editor
        .nodes(NodesOptions::any(NodeMatch::LeafWithMark(Mark::Bold)))
        .collect();
    assert_eq!(any.len(), 1);
}

// --- Read-only invariance ---

#[derive(Debug, Clone)]
enum Op {
    Select(usize, usize),
    SelectRange(usize, usize, usize, usize),
    Insert(String),
    Backspace,
    BackspaceWord,
    DeleteSpan(usize),
    DeleteForward,
    Break,
    Move(u8),
    ToggleBold,
    ToggleCode,
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..5usize, 0..40usize).prop_map(|(b, o)| Op::Select(b, o)),
        (0..5usize, 0..40usize, 0..5usize, 0..40usize)
            .prop_map(|(a, b, c, d)| Op::SelectRange(a, b, c, d)),
        "[a-zन ]{1,3}".prop_map(Op::Insert),
        Just(Op::Backspace),
        Just(Op::BackspaceWord),
        (0..4usize).prop_map(Op::DeleteSpan),
        Just(Op::DeleteForward),
        Just(Op::Break),
        (0..6u8).prop_map(Op::Move),
        Just(Op::ToggleBold),
        Just(Op::ToggleCode),
    ]
}

fn apply(editor: &mut Editor, op: &Op) {
    match op {
        Op::Select(b, o) => editor.select(Point::new(*b, *o)),
        Op::SelectRange(a, b, c, d) => editor.select_range(Point::new(*a, *b), Point::new(*c, *d)),
        Op::Insert(s) => {
            editor.insert_text(s);
        }
        Op::Backspace => {
            editor.delete_backward(DeleteUnit::Character);
        }
        Op::BackspaceWord => {
            editor.delete_backward(DeleteUnit::Word);
        }
        Op::DeleteSpan(n) => {
            editor.delete_backward(DeleteUnit::Span(*n));
        }
        Op::DeleteForward => {
            editor.delete_forward();
        }
        Op::Break => {
            editor.insert_break();
        }
        Op::Move(m) => {
            let movement = match m {
                0 => CaretMove::Left,
                1 => CaretMove::Right,
                2 => CaretMove::Up,
                3 => CaretMove::Down,
                4 => CaretMove::LineStart,
                _ => CaretMove::LineEnd,
            };
            editor.move_caret(movement);
        }
        Op::ToggleBold => {
            toggle_mark(editor, Mark::Bold);
        }
        Op::ToggleCode => {
            toggle_block(editor, BlockKind::Preformatted);
        }
    }
}

fn read_only_snapshot(doc: &Document) -> Vec<(BlockId, Vec<Leaf>)> {
    doc.blocks()
        .iter()
        .filter(|b| b.kind == BlockKind::ReadOnly)
        .map(|b| (b.id.clone(), b.children.clone()))
        .collect()
}

proptest! {
    #[test]
    fn read_only_blocks_never_change(ops in prop::collection::vec(arb_op(), 0..60)) {
        let mut editor = Editor::new(Document::seed());
        let before = read_only_snapshot(editor.document());
        for op in &ops {
            apply(&mut editor, op);
            prop_assert_eq!(&read_only_snapshot(editor.document()), &before, "after {:?}", op);
            // Leaves stay normalized.
            for block in editor.document().blocks() {
                prop_assert!(!block.children.is_empty());
                prop_assert!(block.children.len() == 1 || block.children.iter().all(|l| !l.text.is_empty()));
            }
        }
    }
}
