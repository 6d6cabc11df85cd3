//! Block/row flow layout: visual tree → positioned display list.
//!
//! Coordinates are logical pixels, origin top-left, y growing downwards. A box honours
//! its live-view constraints exactly as the preview pane does: `max_height` caps the
//! box, `overflow: hidden` clips its subtree and enables `scroll_top`. Layout of an
//! unconstrained tree therefore yields the natural content height.

use tracing::trace;

use crate::layout::font_metrics::{get_metrics, FontFamily, FontWeight};
use crate::render::tree::{Content, ImageSource, Overflow, TextAlign, VisualNode};
use crate::theme::{Paint, ThemeToken};

const DEFAULT_LINE_HEIGHT: f32 = 1.4;
const DEFAULT_IMAGE_SIZE: f32 = 96.0;
const DEFAULT_RULE_THICKNESS: f32 = 1.0;

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Intersection of two rects; disjoint rects yield an empty rect.
    pub fn intersect(&self, other: &Rect) -> Rect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Rect::new(x, y, (right - x).max(0.0), (bottom - y).max(0.0))
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DisplayItem {
    Fill {
        rect: Rect,
        paint: Paint,
        clip: Option<Rect>,
    },
    Text {
        x: f32,
        baseline: f32,
        text: String,
        size: f32,
        weight: FontWeight,
        family: FontFamily,
        paint: Paint,
        clip: Option<Rect>,
    },
    Image {
        rect: Rect,
        source: ImageSource,
        clip: Option<Rect>,
    },
}

impl DisplayItem {
    pub fn clip(&self) -> Option<&Rect> {
        match self {
            DisplayItem::Fill { clip, .. }
            | DisplayItem::Text { clip, .. }
            | DisplayItem::Image { clip, .. } => clip.as_ref(),
        }
    }

    fn translate_y(&mut self, dy: f32) {
        match self {
            DisplayItem::Fill { rect, clip, .. } | DisplayItem::Image { rect, clip, .. } => {
                rect.y += dy;
                if let Some(c) = clip {
                    c.y += dy;
                }
            }
            DisplayItem::Text { baseline, clip, .. } => {
                *baseline += dy;
                if let Some(c) = clip {
                    c.y += dy;
                }
            }
        }
    }

    fn restrict_clip(&mut self, bounds: Rect) {
        let clip = match self {
            DisplayItem::Fill { clip, .. }
            | DisplayItem::Text { clip, .. }
            | DisplayItem::Image { clip, .. } => clip,
        };
        *clip = Some(match clip {
            Some(existing) => existing.intersect(&bounds),
            None => bounds,
        });
    }
}

/// Positioned paint operations for one laid-out tree.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayList {
    pub width: f32,
    /// Outer height of the root box, including its bottom margin.
    pub height: f32,
    pub items: Vec<DisplayItem>,
}

// ────────────────────────────────────────────────────────────────────────────
// Layout
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy)]
struct Inherited {
    family: FontFamily,
    line_height: f32,
    color: Paint,
}

/// Lays out `root` at a fixed logical `width`.
pub fn layout(root: &VisualNode, width: f32) -> DisplayList {
    let inherited = Inherited {
        family: FontFamily::default(),
        line_height: DEFAULT_LINE_HEIGHT,
        color: Paint::Token(ThemeToken::Text),
    };
    let mut items = Vec::new();
    let height = layout_node(root, 0.0, 0.0, width, inherited, &mut items);
    trace!(width, height, items = items.len(), "layout complete");
    DisplayList {
        width,
        height,
        items,
    }
}

/// Lays out one box at (x, y) and returns its outer height (box + bottom margin).
fn layout_node(
    node: &VisualNode,
    x: f32,
    y: f32,
    width: f32,
    parent: Inherited,
    out: &mut Vec<DisplayItem>,
) -> f32 {
    let style = &node.style;
    let inherited = Inherited {
        family: style.font_family.unwrap_or(parent.family),
        line_height: style.line_height.unwrap_or(parent.line_height),
        color: style.color.unwrap_or(parent.color),
    };

    let background_slot = style.background.map(|paint| {
        out.push(DisplayItem::Fill {
            rect: Rect::new(x, y, width, 0.0),
            paint,
            clip: None,
        });
        out.len() - 1
    });

    let pad = style.padding;
    let inner_x = x + pad.left;
    let inner_y = y + pad.top;
    let inner_width = (width - pad.left - pad.right).max(0.0);

    let mut inner = Vec::new();
    let content_height = match &node.content {
        Content::Block(children) => {
            let mut cursor = inner_y;
            for child in children {
                cursor += layout_node(child, inner_x, cursor, inner_width, inherited, &mut inner);
            }
            cursor - inner_y
        }
        Content::Row(children) => {
            layout_row(children, inner_x, inner_y, inner_width, inherited, &mut inner)
        }
        Content::Text(text) => layout_text(node, text, inner_x, inner_y, inner_width, inherited, &mut inner),
        Content::Image(source) => {
            let size = style.height.unwrap_or(DEFAULT_IMAGE_SIZE);
            let image_width = size.min(inner_width);
            let image_x = align_offset(style.align, inner_width, image_width) + inner_x;
            inner.push(DisplayItem::Image {
                rect: Rect::new(image_x, inner_y, image_width, size),
                source: source.clone(),
                clip: None,
            });
            size
        }
        Content::Rule => {
            let thickness = style.height.unwrap_or(DEFAULT_RULE_THICKNESS);
            inner.push(DisplayItem::Fill {
                rect: Rect::new(inner_x, inner_y, inner_width, thickness),
                paint: inherited.color,
                clip: None,
            });
            thickness
        }
    };

    let natural_height = pad.top + content_height + pad.bottom;
    let box_height = match style.max_height {
        Some(max) => natural_height.min(max.max(0.0)),
        None => natural_height,
    };

    if style.overflow == Overflow::Hidden {
        let max_scroll = (natural_height - box_height).max(0.0);
        let scroll = style.scroll_top.clamp(0.0, max_scroll);
        let bounds = Rect::new(x, y, width, box_height);
        for item in &mut inner {
            if scroll > 0.0 {
                item.translate_y(-scroll);
            }
            item.restrict_clip(bounds);
        }
    }

    if let Some(slot) = background_slot {
        if let DisplayItem::Fill { rect, .. } = &mut out[slot] {
            rect.height = box_height;
        }
    }
    out.extend(inner);

    box_height + style.margin_bottom
}

/// Side-by-side children sharing the width by `flex`. Every column is stretched to
/// the row height so column backgrounds line up.
fn layout_row(
    children: &[VisualNode],
    x: f32,
    y: f32,
    width: f32,
    inherited: Inherited,
    out: &mut Vec<DisplayItem>,
) -> f32 {
    let total_flex: f32 = children.iter().map(|c| c.style.flex.max(0.0)).sum();
    let mut cursor_x = x;
    let mut row_height = 0.0_f32;
    let mut column_backgrounds = Vec::new();

    for child in children {
        let share = if total_flex > 0.0 {
            child.style.flex.max(0.0) / total_flex
        } else {
            1.0 / children.len() as f32
        };
        let column_width = width * share;
        let start = out.len();
        let height = layout_node(child, cursor_x, y, column_width, inherited, out);
        if child.style.background.is_some() {
            column_backgrounds.push((start, child.style.margin_bottom));
        }
        row_height = row_height.max(height);
        cursor_x += column_width;
    }

    for (slot, margin) in column_backgrounds {
        if let DisplayItem::Fill { rect, .. } = &mut out[slot] {
            rect.height = rect.height.max(row_height - margin);
        }
    }

    row_height
}

fn layout_text(
    node: &VisualNode,
    text: &str,
    x: f32,
    y: f32,
    width: f32,
    inherited: Inherited,
    out: &mut Vec<DisplayItem>,
) -> f32 {
    let style = &node.style;
    let metrics = get_metrics(inherited.family);
    let size = style.font_size;
    let line_height = size * inherited.line_height;
    let lines = metrics.wrap_lines(text, size, style.weight, width);

    for (i, line) in lines.iter().enumerate() {
        if line.is_empty() {
            continue;
        }
        let line_width = metrics.measure_str(line, size, style.weight);
        let top = y + i as f32 * line_height;
        let half_leading = (line_height - size) / 2.0;
        out.push(DisplayItem::Text {
            x: x + align_offset(style.align, width, line_width),
            baseline: top + half_leading + metrics.ascent * size,
            text: line.clone(),
            size,
            weight: style.weight,
            family: inherited.family,
            paint: inherited.color,
            clip: None,
        });
    }

    lines.len() as f32 * line_height
}

fn align_offset(align: TextAlign, available: f32, used: f32) -> f32 {
    let slack = (available - used).max(0.0);
    match align {
        TextAlign::Left => 0.0,
        TextAlign::Center => slack / 2.0,
        TextAlign::Right => slack,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
