//! The visual tree produced by templates and consumed by layout.
//!
//! A tree is plain data: no callbacks, no shared ownership. Cloning a subtree yields a
//! fully independent copy, which is what the isolation step of the export relies on.

use serde::{Deserialize, Serialize};

use crate::layout::font_metrics::{FontFamily, FontWeight};
use crate::theme::{Paint, ThemeToken};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Edges {
    pub const fn all(v: f32) -> Self {
        Edges {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }

    pub const fn symmetric(vertical: f32, horizontal: f32) -> Self {
        Edges {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Box and text styling. Font family, line height and colour inherit from the
/// parent when left unset; everything else applies to the node only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub padding: Edges,
    pub margin_bottom: f32,
    pub background: Option<Paint>,
    pub color: Option<Paint>,
    pub font_family: Option<FontFamily>,
    /// Line height multiplier relative to font size.
    pub line_height: Option<f32>,
    pub font_size: f32,
    pub weight: FontWeight,
    pub align: TextAlign,
    /// Share of the row width when the parent is a row.
    pub flex: f32,
    /// Fixed height for images and rules, px.
    pub height: Option<f32>,
    /// Live-view constraints. Neutralized on isolation copies.
    pub max_height: Option<f32>,
    pub overflow: Overflow,
    pub scroll_top: f32,
}

impl Default for Style {
    fn default() -> Self {
        Style {
            padding: Edges::default(),
            margin_bottom: 0.0,
            background: None,
            color: None,
            font_family: None,
            line_height: None,
            font_size: 11.0,
            weight: FontWeight::Regular,
            align: TextAlign::Left,
            flex: 1.0,
            height: None,
            max_height: None,
            overflow: Overflow::Visible,
            scroll_top: 0.0,
        }
    }
}

/// Image reference. `data:` URLs are decoded in-process; anything else is remote and
/// is never fetched during capture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSource {
    pub src: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Content {
    /// Children stacked vertically.
    Block(Vec<VisualNode>),
    /// Children laid out side by side, width shared by `flex`.
    Row(Vec<VisualNode>),
    Text(String),
    Image(ImageSource),
    /// Horizontal rule painted with the node colour.
    Rule,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualNode {
    pub id: Option<String>,
    pub style: Style,
    pub content: Content,
}

impl VisualNode {
    fn new(content: Content) -> Self {
        VisualNode {
            id: None,
            style: Style::default(),
            content,
        }
    }

    pub fn block(children: Vec<VisualNode>) -> Self {
        Self::new(Content::Block(children))
    }

    pub fn row(children: Vec<VisualNode>) -> Self {
        Self::new(Content::Row(children))
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(Content::Text(text.into()))
    }

    pub fn image(src: impl Into<String>, size: f32) -> Self {
        let mut node = Self::new(Content::Image(ImageSource { src: src.into() }));
        node.style.height = Some(size);
        node
    }

    pub fn rule(thickness: f32) -> Self {
        let mut node = Self::new(Content::Rule);
        node.style.height = Some(thickness);
        node
    }

    // ── builder helpers ─────────────────────────────────────────────────────

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn padding(mut self, padding: Edges) -> Self {
        self.style.padding = padding;
        self
    }

    pub fn margin_bottom(mut self, px: f32) -> Self {
        self.style.margin_bottom = px;
        self
    }

    pub fn background(mut self, token: ThemeToken) -> Self {
        self.style.background = Some(Paint::Token(token));
        self
    }

    pub fn color(mut self, token: ThemeToken) -> Self {
        self.style.color = Some(Paint::Token(token));
        self
    }

    pub fn paint(mut self, paint: Paint) -> Self {
        self.style.color = Some(paint);
        self
    }

    pub fn size(mut self, px: f32) -> Self {
        self.style.font_size = px;
        self
    }

    pub fn bold(mut self) -> Self {
        self.style.weight = FontWeight::Bold;
        self
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.style.align = align;
        self
    }

    pub fn flex(mut self, flex: f32) -> Self {
        self.style.flex = flex;
        self
    }

    // ── queries ─────────────────────────────────────────────────────────────

    pub fn children(&self) -> &[VisualNode] {
        match &self.content {
            Content::Block(children) | Content::Row(children) => children,
            _ => &[],
        }
    }

    fn children_mut(&mut self) -> &mut [VisualNode] {
        match &mut self.content {
            Content::Block(children) | Content::Row(children) => children,
            _ => &mut [],
        }
    }

    /// Depth-first search for the node carrying `id`.
    pub fn find(&self, id: &str) -> Option<&VisualNode> {
        if self.id.as_deref() == Some(id) {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(id))
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut VisualNode> {
        if self.id.as_deref() == Some(id) {
            return Some(self);
        }
        self.children_mut()
            .iter_mut()
            .find_map(|child| child.find_mut(id))
    }

    /// Resets every live-view constraint in this subtree: no max height, no
    /// clipping, no scroll offset. The result lays out at its natural height.
    pub fn neutralize_constraints(&mut self) {
        self.style.max_height = None;
        self.style.overflow = Overflow::Visible;
        self.style.scroll_top = 0.0;
        for child in self.children_mut() {
            child.neutralize_constraints();
        }
    }

    pub fn is_constrained(&self) -> bool {
        self.style.max_height.is_some()
            || self.style.overflow == Overflow::Hidden
            || self.style.scroll_top != 0.0
            || self.children().iter().any(VisualNode::is_constrained)
    }

    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(VisualNode::node_count).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> VisualNode {
        let mut clipped = VisualNode::block(vec![VisualNode::text("deep").with_id("leaf")])
            .with_id("pane");
        clipped.style.max_height = Some(100.0);
        clipped.style.overflow = Overflow::Hidden;
        clipped.style.scroll_top = 40.0;
        VisualNode::block(vec![VisualNode::text("header"), clipped]).with_id("root")
    }

    #[test]
    fn test_find_locates_nested_ids() {
        let tree = sample_tree();
        assert!(tree.find("root").is_some());
        assert!(matches!(tree.find("leaf").map(|n| &n.content), Some(Content::Text(t)) if t == "deep"));
        assert!(tree.find("missing").is_none());
    }

    #[test]
    fn test_neutralize_clears_constraints_recursively() {
        let mut tree = sample_tree();
        assert!(tree.is_constrained());
        tree.neutralize_constraints();
        assert!(!tree.is_constrained());
        assert_eq!(tree.node_count(), 4);
    }

    #[test]
    fn test_clone_is_independent() {
        let original = sample_tree();
        let mut copy = original.clone();
        copy.neutralize_constraints();
        if let Some(pane) = copy.find_mut("pane") {
            pane.style.padding = Edges::all(9.0);
        }
        assert!(original.is_constrained());
        assert_eq!(original.find("pane").map(|n| n.style.padding), Some(Edges::default()));
    }
}
