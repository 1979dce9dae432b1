use tracing::trace;

use super::node::{Block, Document};
use super::query::{NodeEntry, NodeMatch, NodePatch, NodesOptions, SetNodesOptions};
use super::selection::{Point, Selection};
use crate::unicode::{byte_index, char_len, tail_chars};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteUnit {
    Character,
    /// Trailing whitespace plus the run of non-whitespace before it.
    Word,
    /// Exactly this many chars, never crossing the block start.
    Span(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaretMove {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
}

/// Command surface of the document model.
///
/// Every command is a silent no-op (returning `false`) when its
/// precondition fails: no selection, a caret inside a void block, or an
/// edit that would touch a void block.
pub trait EditorCommands {
    /// Insert at the caret, replacing an expanded selection.
    fn insert_text(&mut self, text: &str) -> bool;

    fn delete_backward(&mut self, unit: DeleteUnit) -> bool;

    /// The `chars` chars right before a collapsed caret, if that many exist
    /// in the caret's block.
    fn text_before_caret(&self, chars: usize) -> Option<String>;

    /// Nodes in the current selection matching `options`.
    fn nodes(&self, options: NodesOptions) -> Box<dyn Iterator<Item = NodeEntry<'_>> + '_>;

    fn set_nodes(&mut self, patch: NodePatch, options: SetNodesOptions) -> bool;

    /// Void blocks are atomic: the caret cannot enter their text.
    fn is_void(&self, block: &Block) -> bool {
        block.kind.policy().void
    }
}

/// In-memory document plus selection.
#[derive(Debug, Clone, Default)]
pub struct Editor {
    document: Document,
    selection: Option<Selection>,
}

impl Editor {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            selection: None,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn select(&mut self, point: Point) {
        self.selection = self.clamp(point).map(Selection::caret);
    }

    pub fn select_range(&mut self, anchor: Point, focus: Point) {
        self.selection = match (self.clamp(anchor), self.clamp(focus)) {
            (Some(anchor), Some(focus)) => Some(Selection::new(anchor, focus)),
            _ => None,
        };
    }

    pub fn deselect(&mut self) {
        self.selection = None;
    }

    /// Put the caret at the end of the first editable block.
    pub fn focus_first_editable(&mut self) -> bool {
        let Some(index) = (0..self.document.len()).find(|&i| !self.block_is_void(i)) else {
            return false;
        };
        let offset = self.document.blocks()[index].char_len();
        self.selection = Some(Selection::caret(Point::new(index, offset)));
        true
    }

    /// Delete one char after the caret, or join the next block at the end.
    pub fn delete_forward(&mut self) -> bool {
        let Some(sel) = self.selection else {
            return false;
        };
        if !sel.is_collapsed() {
            return self.delete_selection(sel);
        }
        let p = sel.focus;
        if self.block_is_void(p.block) {
            return false;
        }
        let len = self.document.blocks()[p.block].char_len();
        if p.offset < len {
            self.document.blocks_mut()[p.block].delete_range(p.offset, p.offset + 1);
            return true;
        }
        let next = p.block + 1;
        if next >= self.document.len() || self.block_is_void(next) {
            return false;
        }
        let blocks = self.document.blocks_mut();
        let removed = blocks.remove(next);
        let block = &mut blocks[p.block];
        block.children.extend(removed.children);
        block.normalize();
        true
    }

    /// Split the caret's block in two; the new block gets a fresh id and
    /// the same kind.
    pub fn insert_break(&mut self) -> bool {
        let Some(sel) = self.selection else {
            return false;
        };
        if !sel.is_collapsed() && !self.delete_selection(sel) {
            return false;
        }
        let Some(p) = self.caret() else {
            return false;
        };
        if self.block_is_void(p.block) {
            return false;
        }
        let id = self.document.next_block_id();
        let blocks = self.document.blocks_mut();
        let kind = blocks[p.block].kind;
        let tail = blocks[p.block].split_off(p.offset);
        let mut block = Block {
            id,
            kind,
            children: tail,
        };
        block.normalize();
        blocks.insert(p.block + 1, block);
        self.selection = Some(Selection::caret(Point::new(p.block + 1, 0)));
        true
    }

    /// Move a collapsed caret, skipping over void blocks. An expanded
    /// selection collapses to its start or end.
    pub fn move_caret(&mut self, movement: CaretMove) -> bool {
        let Some(sel) = self.selection else {
            return false;
        };
        if !sel.is_collapsed() {
            let p = match movement {
                CaretMove::Left | CaretMove::Up | CaretMove::LineStart => sel.start(),
                CaretMove::Right | CaretMove::Down | CaretMove::LineEnd => sel.end(),
            };
            self.selection = Some(Selection::caret(p));
            return true;
        }
        let p = sel.focus;
        let len = self.caret_len(p.block);
        let target = match movement {
            CaretMove::Left if p.offset > 0 => Some(Point::new(p.block, p.offset - 1)),
            CaretMove::Left => self
                .editable_before(p.block)
                .map(|b| Point::new(b, self.caret_len(b))),
            CaretMove::Right if p.offset < len => Some(Point::new(p.block, p.offset + 1)),
            CaretMove::Right => self.editable_after(p.block).map(|b| Point::new(b, 0)),
            CaretMove::Up => self
                .editable_before(p.block)
                .map(|b| Point::new(b, p.offset.min(self.caret_len(b)))),
            CaretMove::Down => self
                .editable_after(p.block)
                .map(|b| Point::new(b, p.offset.min(self.caret_len(b)))),
            CaretMove::LineStart => Some(Point::new(p.block, 0)),
            CaretMove::LineEnd => Some(Point::new(p.block, len)),
        };
        match target {
            Some(t) if t != p => {
                self.selection = Some(Selection::caret(t));
                true
            }
            _ => false,
        }
    }

    fn clamp(&self, point: Point) -> Option<Point> {
        let last = self.document.len().checked_sub(1)?;
        let block = point.block.min(last);
        Some(Point::new(block, point.offset.min(self.caret_len(block))))
    }

    fn caret(&self) -> Option<Point> {
        self.selection
            .filter(Selection::is_collapsed)
            .map(|s| s.focus)
    }

    /// Caret positions available in a block; a void block only has offset 0.
    fn caret_len(&self, index: usize) -> usize {
        if self.block_is_void(index) {
            0
        } else {
            self.document.blocks().get(index).map_or(0, Block::char_len)
        }
    }

    fn block_is_void(&self, index: usize) -> bool {
        self.document
            .blocks()
            .get(index)
            .is_some_and(|b| self.is_void(b))
    }

    fn editable_before(&self, index: usize) -> Option<usize> {
        (0..index).rev().find(|&i| !self.block_is_void(i))
    }

    fn editable_after(&self, index: usize) -> Option<usize> {
        (index + 1..self.document.len()).find(|&i| !self.block_is_void(i))
    }

    /// Char span of block `index` covered by `[start, end]`.
    fn block_span(&self, index: usize, start: Point, end: Point) -> (usize, usize) {
        let len = self.document.blocks()[index].char_len();
        let s = if index == start.block { start.offset } else { 0 };
        let e = if index == end.block { end.offset } else { len };
        (s.min(len), e.min(len))
    }

    /// Delete an expanded selection. Refused if any covered block is void.
    fn delete_selection(&mut self, sel: Selection) -> bool {
        let (start, end) = (sel.start(), sel.end());
        if (start.block..=end.block).any(|i| self.block_is_void(i)) {
            trace!(?start, ?end, "delete refused: range touches a void block");
            return false;
        }
        let blocks = self.document.blocks_mut();
        if start.block == end.block {
            blocks[start.block].delete_range(start.offset, end.offset);
        } else {
            let first_len = blocks[start.block].char_len();
            blocks[start.block].delete_range(start.offset, first_len);
            let tail = blocks[end.block].split_off(end.offset);
            blocks.drain(start.block + 1..=end.block);
            let first = &mut blocks[start.block];
            first.children.extend(tail);
            first.normalize();
        }
        self.selection = Some(Selection::caret(start));
        true
    }

    /// Join block `index` onto the previous block, unless that one is void.
    fn merge_with_previous(&mut self, index: usize) -> bool {
        if index == 0 || self.block_is_void(index - 1) {
            return false;
        }
        let blocks = self.document.blocks_mut();
        let removed = blocks.remove(index);
        let prev = &mut blocks[index - 1];
        let offset = prev.char_len();
        prev.children.extend(removed.children);
        prev.normalize();
        self.selection = Some(Selection::caret(Point::new(index - 1, offset)));
        true
    }

    fn leaves_in_span(block: &Block, s: usize, e: usize) -> Vec<usize> {
        if s == e {
            return vec![block.leaf_at(s).0];
        }
        block
            .leaf_ranges()
            .into_iter()
            .enumerate()
            .filter(|&(_, (ls, le))| ls < e && le > s)
            .map(|(i, _)| i)
            .collect()
    }
}

/// Start of the word ending at `offset`: skip whitespace, then non-whitespace.
fn word_start(text: &str, offset: usize) -> usize {
    let chars: Vec<char> = text.chars().take(offset).collect();
    let mut i = chars.len();
    while i > 0 && chars[i - 1].is_whitespace() {
        i -= 1;
    }
    while i > 0 && !chars[i - 1].is_whitespace() {
        i -= 1;
    }
    i
}

fn entry_matches(matches: NodeMatch, entry: &NodeEntry<'_>) -> bool {
    match entry {
        NodeEntry::Leaf { leaf, .. } => matches.matches_leaf(leaf),
        NodeEntry::Block { block, .. } => matches.matches_block(block),
    }
}

impl EditorCommands for Editor {
    fn insert_text(&mut self, text: &str) -> bool {
        let Some(sel) = self.selection else {
            return false;
        };
        if text.is_empty() {
            return false;
        }
        if !sel.is_collapsed() && !self.delete_selection(sel) {
            return false;
        }
        let Some(p) = self.caret() else {
            return false;
        };
        if self.block_is_void(p.block) {
            trace!(block = p.block, "insert ignored: caret in void block");
            return false;
        }
        self.document.blocks_mut()[p.block].insert_text(p.offset, text);
        let caret = Point::new(p.block, p.offset + char_len(text));
        self.selection = Some(Selection::caret(caret));
        true
    }

    fn delete_backward(&mut self, unit: DeleteUnit) -> bool {
        let Some(sel) = self.selection else {
            return false;
        };
        if !sel.is_collapsed() {
            return self.delete_selection(sel);
        }
        let p = sel.focus;
        if self.block_is_void(p.block) {
            return false;
        }
        let start = match unit {
            DeleteUnit::Span(0) => return false,
            DeleteUnit::Span(_) if p.offset == 0 => return false,
            DeleteUnit::Span(n) => p.offset - n.min(p.offset),
            DeleteUnit::Character | DeleteUnit::Word if p.offset == 0 => {
                return self.merge_with_previous(p.block);
            }
            DeleteUnit::Character => p.offset - 1,
            DeleteUnit::Word => word_start(&self.document.blocks()[p.block].text(), p.offset),
        };
        self.document.blocks_mut()[p.block].delete_range(start, p.offset);
        self.selection = Some(Selection::caret(Point::new(p.block, start)));
        true
    }

    fn text_before_caret(&self, chars: usize) -> Option<String> {
        let p = self.caret()?;
        if self.block_is_void(p.block) || p.offset < chars {
            return None;
        }
        let text = self.document.blocks()[p.block].text();
        let head = &text[..byte_index(&text, p.offset)];
        Some(tail_chars(head, chars).to_string())
    }

    fn nodes(&self, options: NodesOptions) -> Box<dyn Iterator<Item = NodeEntry<'_>> + '_> {
        let Some(sel) = self.selection else {
            return Box::new(std::iter::empty());
        };
        let (start, end) = (sel.start(), sel.end());
        let blocks = self.document.blocks();
        let mut candidates = Vec::new();
        for index in start.block..=end.block.min(blocks.len().saturating_sub(1)) {
            let block = &blocks[index];
            if !options.matches.targets_leaves() {
                candidates.push(NodeEntry::Block { index, block });
                continue;
            }
            // Leaves of void blocks are not reachable.
            if self.is_void(block) {
                continue;
            }
            let (s, e) = self.block_span(index, start, end);
            for leaf_index in Self::leaves_in_span(block, s, e) {
                candidates.push(NodeEntry::Leaf {
                    block: index,
                    index: leaf_index,
                    leaf: &block.children[leaf_index],
                });
            }
        }

        let matched: Vec<NodeEntry<'_>> = if options.universal {
            if !candidates.is_empty()
                && candidates.iter().all(|e| entry_matches(options.matches, e))
            {
                candidates
            } else {
                Vec::new()
            }
        } else {
            candidates
                .into_iter()
                .filter(|e| entry_matches(options.matches, e))
                .collect()
        };
        Box::new(matched.into_iter())
    }

    fn set_nodes(&mut self, patch: NodePatch, options: SetNodesOptions) -> bool {
        let Some(sel) = self.selection else {
            return false;
        };
        let (start, end) = (sel.start(), sel.end());
        let last = end.block.min(self.document.len().saturating_sub(1));
        let mut changed = false;

        for index in start.block..=last {
            if self.block_is_void(index) {
                continue;
            }
            let (s, e) = self.block_span(index, start, end);
            let block = &mut self.document.blocks_mut()[index];
            match patch {
                NodePatch::SetMark(mark) | NodePatch::ClearMark(mark) => {
                    let on = matches!(patch, NodePatch::SetMark(_));
                    let targets = if options.split {
                        if s == e {
                            // A caret inside text has nothing to split off.
                            let (leaf_index, _) = block.leaf_at(s);
                            if !block.children[leaf_index].text.is_empty() {
                                continue;
                            }
                            vec![leaf_index]
                        } else {
                            block.split_at(s);
                            block.split_at(e);
                            block
                                .leaf_ranges()
                                .into_iter()
                                .enumerate()
                                .filter(|&(_, (ls, le))| ls >= s && le <= e && ls < le)
                                .map(|(i, _)| i)
                                .collect()
                        }
                    } else {
                        Self::leaves_in_span(block, s, e)
                    };
                    let block_matches = options.matches.matches_block(block);
                    for leaf_index in targets {
                        let leaf = &mut block.children[leaf_index];
                        let target = if options.matches.targets_leaves() {
                            options.matches.matches_leaf(leaf)
                        } else {
                            block_matches
                        };
                        if target && leaf.marks.contains(mark) != on {
                            leaf.marks.set(mark, on);
                            changed = true;
                        }
                    }
                    block.normalize();
                }
                NodePatch::SetKind(kind) => {
                    let target = if options.matches.targets_leaves() {
                        block.children.iter().any(|l| options.matches.matches_leaf(l))
                    } else {
                        options.matches.matches_block(block)
                    };
                    if target && block.kind != kind {
                        block.kind = kind;
                        changed = true;
                    }
                }
            }
        }

        if changed {
            // A block may have become void under the selection.
            if let Some(sel) = self.selection {
                self.select_range(sel.anchor, sel.focus);
            }
        }
        changed
    }
}
