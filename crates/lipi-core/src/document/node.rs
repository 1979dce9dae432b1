use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::unicode::{byte_index, char_len};

/// Stable block identifier, independent of the block's position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Declared block kind. Serialized with the stored `type` tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BlockKind {
    #[default]
    #[serde(rename = "paragraph")]
    Editable,
    #[serde(rename = "readOnly")]
    ReadOnly,
    #[serde(rename = "code")]
    Preformatted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    Bold,
    Italic,
}

/// The set of marks carried by a leaf. Flattened into the leaf object on
/// the wire: `{"text": "..", "bold": true}`. A stored `null` reads as unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Marks {
    #[serde(
        default,
        deserialize_with = "null_as_false",
        skip_serializing_if = "is_false"
    )]
    bold: bool,
    #[serde(
        default,
        deserialize_with = "null_as_false",
        skip_serializing_if = "is_false"
    )]
    italic: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

fn null_as_false<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(d)?.unwrap_or(false))
}

impl Marks {
    pub fn contains(&self, mark: Mark) -> bool {
        match mark {
            Mark::Bold => self.bold,
            Mark::Italic => self.italic,
        }
    }

    pub fn set(&mut self, mark: Mark, on: bool) {
        match mark {
            Mark::Bold => self.bold = on,
            Mark::Italic => self.italic = on,
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.bold && !self.italic
    }
}

/// Atomic run of text sharing one set of marks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaf {
    pub text: String,
    #[serde(flatten)]
    pub marks: Marks,
}

impl Leaf {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marks: Marks::default(),
        }
    }

    pub fn with_mark(mut self, mark: Mark) -> Self {
        self.marks.set(mark, true);
        self
    }

    pub fn char_len(&self) -> usize {
        char_len(&self.text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    #[serde(rename = "type", default, deserialize_with = "null_as_default_kind")]
    pub kind: BlockKind,
    pub children: Vec<Leaf>,
}

fn null_as_default_kind<'de, D: Deserializer<'de>>(d: D) -> Result<BlockKind, D::Error> {
    Ok(Option::<BlockKind>::deserialize(d)?.unwrap_or_default())
}

impl Block {
    pub fn new(id: impl Into<String>, kind: BlockKind, children: Vec<Leaf>) -> Self {
        let mut block = Self {
            id: BlockId::new(id),
            kind,
            children,
        };
        block.normalize();
        block
    }

    pub fn text(&self) -> String {
        self.children.iter().map(|l| l.text.as_str()).collect()
    }

    pub fn char_len(&self) -> usize {
        self.children.iter().map(Leaf::char_len).sum()
    }

    /// Char range `[start, end)` of each leaf within the block text.
    pub fn leaf_ranges(&self) -> Vec<(usize, usize)> {
        let mut start = 0;
        self.children
            .iter()
            .map(|leaf| {
                let end = start + leaf.char_len();
                let range = (start, end);
                start = end;
                range
            })
            .collect()
    }

    /// Leaf that receives text typed at `offset`: the leaf whose range
    /// ends at or after the offset, preferring the earlier leaf on a boundary.
    pub fn leaf_at(&self, offset: usize) -> (usize, usize) {
        for (i, (start, end)) in self.leaf_ranges().into_iter().enumerate() {
            if offset <= end {
                return (i, offset.saturating_sub(start));
            }
        }
        let last = self.children.len().saturating_sub(1);
        (last, self.children.get(last).map_or(0, Leaf::char_len))
    }

    pub(crate) fn insert_text(&mut self, offset: usize, text: &str) {
        if self.children.is_empty() {
            self.children.push(Leaf::new(""));
        }
        let (i, local) = self.leaf_at(offset);
        let leaf = &mut self.children[i];
        let at = byte_index(&leaf.text, local);
        leaf.text.insert_str(at, text);
        self.normalize();
    }

    /// Remove chars in `[start, end)`.
    pub(crate) fn delete_range(&mut self, start: usize, end: usize) {
        if start >= end {
            return;
        }
        let ranges = self.leaf_ranges();
        for (leaf, (ls, le)) in self.children.iter_mut().zip(ranges) {
            let from = start.max(ls);
            let to = end.min(le);
            if from >= to {
                continue;
            }
            let a = byte_index(&leaf.text, from - ls);
            let b = byte_index(&leaf.text, to - ls);
            leaf.text.replace_range(a..b, "");
        }
        self.normalize();
    }

    /// Split leaves so that `offset` falls on a leaf boundary.
    pub(crate) fn split_at(&mut self, offset: usize) {
        let ranges = self.leaf_ranges();
        for (i, (start, end)) in ranges.into_iter().enumerate() {
            if offset > start && offset < end {
                let leaf = &mut self.children[i];
                let at = byte_index(&leaf.text, offset - start);
                let tail = Leaf {
                    text: leaf.text.split_off(at),
                    marks: leaf.marks,
                };
                self.children.insert(i + 1, tail);
                return;
            }
        }
    }

    /// Detach everything after `offset`, returning it as leaves.
    pub(crate) fn split_off(&mut self, offset: usize) -> Vec<Leaf> {
        self.split_at(offset);
        let at = self
            .leaf_ranges()
            .iter()
            .position(|&(start, _)| start >= offset)
            .unwrap_or(self.children.len());
        let mut tail = self.children.split_off(at);
        if tail.is_empty() {
            // Keep the caret leaf's marks on the new line.
            let marks = self.children.last().map(|l| l.marks).unwrap_or_default();
            tail.push(Leaf {
                text: String::new(),
                marks,
            });
        }
        self.normalize();
        tail
    }

    /// Merge empty and same-marked neighbours; keep at least one leaf.
    pub(crate) fn normalize(&mut self) {
        if self.children.is_empty() {
            self.children.push(Leaf::new(""));
            return;
        }
        if self.children.iter().all(|l| l.text.is_empty()) {
            self.children.truncate(1);
            return;
        }
        self.children.retain(|l| !l.text.is_empty());
        let mut merged: Vec<Leaf> = Vec::with_capacity(self.children.len());
        for leaf in self.children.drain(..) {
            match merged.last_mut() {
                Some(prev) if prev.marks == leaf.marks => prev.text.push_str(&leaf.text),
                _ => merged.push(leaf),
            }
        }
        self.children = merged;
    }
}

/// Ordered sequence of blocks; the single source of truth for the editor.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// Initial content: read-only reference lines alternating with empty
    /// editable lines.
    pub fn seed() -> Self {
        Self::new(vec![
            Block::new(
                "block-1",
                BlockKind::ReadOnly,
                vec![Leaf::new("A line of text to be translated.")],
            ),
            Block::new("block-2", BlockKind::Editable, vec![Leaf::new("")]),
            Block::new(
                "block-3",
                BlockKind::ReadOnly,
                vec![Leaf::new("A line of text in third paragraph.")],
            ),
            Block::new("block-4", BlockKind::Editable, vec![Leaf::new("")]),
        ])
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub(crate) fn blocks_mut(&mut self) -> &mut Vec<Block> {
        &mut self.blocks
    }

    pub fn block_by_id(&self, id: &BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| &b.id == id)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Normalize every block, as done after load.
    pub fn normalize(&mut self) {
        for block in &mut self.blocks {
            block.normalize();
        }
    }

    /// An id of the form `block-N` not used by any block.
    pub fn next_block_id(&self) -> BlockId {
        let max = self
            .blocks
            .iter()
            .filter_map(|b| b.id.as_str().strip_prefix("block-")?.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        // Past u64::MAX, wrap and take the first free number. There are
        // fewer blocks than numbers, so the scan ends.
        let mut n = max.checked_add(1).unwrap_or(1);
        loop {
            let id = BlockId::new(format!("block-{n}"));
            if self.block_by_id(&id).is_none() {
                return id;
            }
            n = n.checked_add(1).unwrap_or(1);
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut doc: Document = serde_json::from_str(json)?;
        doc.normalize();
        Ok(doc)
    }
}
