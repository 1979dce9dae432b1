//! Block classification and rendering.
//!
//! Each [`BlockKind`] maps to a fixed [`RenderPolicy`]. The HTML renderer
//! mirrors the editing surface's element tree; the text renderer is for
//! terminals.

use unicode_width::UnicodeWidthStr;

use crate::document::{Block, BlockKind, Document, Leaf, Mark};

/// Container element used for a block's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    Paragraph,
    Code,
    Static,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderPolicy {
    /// Atomic block: no caret entry, rendered as static text.
    pub void: bool,
    pub editable: bool,
    /// Whether leaf marks are styled.
    pub styled_leaves: bool,
    pub container: Container,
}

impl BlockKind {
    pub fn policy(self) -> RenderPolicy {
        match self {
            BlockKind::Editable => RenderPolicy {
                void: false,
                editable: true,
                styled_leaves: true,
                container: Container::Paragraph,
            },
            BlockKind::Preformatted => RenderPolicy {
                void: false,
                editable: true,
                styled_leaves: true,
                container: Container::Code,
            },
            BlockKind::ReadOnly => RenderPolicy {
                void: true,
                editable: false,
                styled_leaves: false,
                container: Container::Static,
            },
        }
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn render_leaf_html(out: &mut String, leaf: &Leaf) {
    let weight = if leaf.marks.contains(Mark::Bold) {
        "bold"
    } else {
        "normal"
    };
    out.push_str(&format!("<span style=\"font-weight: {weight}"));
    if leaf.marks.contains(Mark::Italic) {
        out.push_str("; font-style: italic");
    }
    out.push_str(&format!("\">{}</span>", escape_html(&leaf.text)));
}

/// Leaf content: styled spans, or the plain concatenated text.
fn render_children_html(out: &mut String, block: &Block, policy: RenderPolicy) {
    if policy.styled_leaves {
        for leaf in &block.children {
            render_leaf_html(out, leaf);
        }
    } else {
        out.push_str(&escape_html(&block.text()));
    }
}

pub fn render_block_html(block: &Block) -> String {
    let mut out = String::new();
    let id = escape_html(block.id.as_str());
    let policy = block.kind.policy();
    let editable = if policy.editable {
        ""
    } else {
        " contenteditable=\"false\""
    };
    match policy.container {
        Container::Static => {
            out.push_str(&format!("<div data-block-id=\"{id}\"><p{editable}>"));
            render_children_html(&mut out, block, policy);
            out.push_str("</p></div>");
        }
        Container::Code => {
            out.push_str(&format!("<pre data-block-id=\"{id}\"{editable}><code>"));
            render_children_html(&mut out, block, policy);
            out.push_str("</code></pre>");
        }
        Container::Paragraph => {
            out.push_str(&format!("<p data-block-id=\"{id}\"{editable}>"));
            render_children_html(&mut out, block, policy);
            out.push_str("</p>");
        }
    }
    out
}

pub fn render_html(doc: &Document) -> String {
    doc.blocks()
        .iter()
        .map(render_block_html)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Plain-text rendering: read-only lines boxed, code lines behind a bar.
pub fn render_text(doc: &Document) -> String {
    let mut out = String::new();
    for block in doc.blocks() {
        let text = block.text();
        match block.kind.policy().container {
            Container::Static => {
                let width = UnicodeWidthStr::width(text.as_str());
                let rule = "─".repeat(width + 2);
                out.push_str(&format!("┌{rule}┐\n│ {text} │\n└{rule}┘\n"));
            }
            Container::Code => out.push_str(&format!("│ {text}\n")),
            Container::Paragraph => {
                out.push_str(&text);
                out.push('\n');
            }
        }
    }
    out
}
