//! Mark and block toggles layered over [`EditorCommands`].

use super::editor::EditorCommands;
use super::node::{BlockKind, Mark};
use super::query::{NodeMatch, NodePatch, NodesOptions, SetNodesOptions};

/// True if every reachable leaf in the selection carries `mark`.
pub fn is_mark_active<E: EditorCommands + ?Sized>(editor: &E, mark: Mark) -> bool {
    editor
        .nodes(NodesOptions::universal(NodeMatch::LeafWithMark(mark)))
        .next()
        .is_some()
}

pub fn toggle_mark<E: EditorCommands + ?Sized>(editor: &mut E, mark: Mark) -> bool {
    let patch = if is_mark_active(editor, mark) {
        NodePatch::ClearMark(mark)
    } else {
        NodePatch::SetMark(mark)
    };
    editor.set_nodes(
        patch,
        SetNodesOptions {
            matches: NodeMatch::Leaf,
            split: true,
        },
    )
}

/// True if any block in the selection is of `kind`.
pub fn is_block_active<E: EditorCommands + ?Sized>(editor: &E, kind: BlockKind) -> bool {
    editor
        .nodes(NodesOptions::any(NodeMatch::BlockOfKind(kind)))
        .next()
        .is_some()
}

/// Switch selected blocks to `kind`, or back to plain paragraphs if any
/// already is. Void blocks are left alone.
pub fn toggle_block<E: EditorCommands + ?Sized>(editor: &mut E, kind: BlockKind) -> bool {
    let target = if is_block_active(editor, kind) {
        BlockKind::Editable
    } else {
        kind
    };
    editor.set_nodes(
        NodePatch::SetKind(target),
        SetNodesOptions {
            matches: NodeMatch::Block,
            split: false,
        },
    )
}
