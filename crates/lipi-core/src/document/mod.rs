//! Block/leaf document model and its editing commands.

mod editor;
pub mod formatting;
mod node;
mod query;
mod selection;

#[cfg(test)]
mod tests;

pub use editor::{CaretMove, DeleteUnit, Editor, EditorCommands};
pub use node::{Block, BlockId, BlockKind, Document, Leaf, Mark, Marks};
pub use query::{NodeEntry, NodeMatch, NodePatch, NodesOptions, SetNodesOptions};
pub use selection::{Point, Selection};
