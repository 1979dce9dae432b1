use super::node::{Block, BlockKind, Leaf, Mark};

/// Predicate used by `nodes` and `set_nodes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeMatch {
    /// Any text leaf.
    Leaf,
    /// Leaves carrying this mark.
    LeafWithMark(Mark),
    /// Any block.
    Block,
    /// Blocks of this kind.
    BlockOfKind(BlockKind),
}

impl NodeMatch {
    pub fn targets_leaves(self) -> bool {
        matches!(self, NodeMatch::Leaf | NodeMatch::LeafWithMark(_))
    }

    pub fn matches_leaf(self, leaf: &Leaf) -> bool {
        match self {
            NodeMatch::Leaf => true,
            NodeMatch::LeafWithMark(mark) => leaf.marks.contains(mark),
            NodeMatch::Block | NodeMatch::BlockOfKind(_) => false,
        }
    }

    pub fn matches_block(self, block: &Block) -> bool {
        match self {
            NodeMatch::Block => true,
            NodeMatch::BlockOfKind(kind) => block.kind == kind,
            NodeMatch::Leaf | NodeMatch::LeafWithMark(_) => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodesOptions {
    pub matches: NodeMatch,
    /// Yield matches only if every candidate node in range matches.
    pub universal: bool,
}

impl NodesOptions {
    pub fn any(matches: NodeMatch) -> Self {
        Self {
            matches,
            universal: false,
        }
    }

    pub fn universal(matches: NodeMatch) -> Self {
        Self {
            matches,
            universal: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeEntry<'a> {
    Block {
        index: usize,
        block: &'a Block,
    },
    Leaf {
        block: usize,
        index: usize,
        leaf: &'a Leaf,
    },
}

/// Property change applied by `set_nodes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodePatch {
    SetMark(Mark),
    ClearMark(Mark),
    SetKind(BlockKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetNodesOptions {
    pub matches: NodeMatch,
    /// Split leaves at the selection edges so only the selected span changes.
    pub split: bool,
}
