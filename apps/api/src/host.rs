//! Host document — the live page a preview is mounted in.
//!
//! It owns the live visual tree (with the preview pane's viewport constraints), the
//! global colour-mode flag, and an off-screen layer where export isolation copies are
//! attached while they are captured. All methods take `&self`: one export borrows the
//! document for its whole duration while guards mutate the flag and the layer.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::render::tree::{Edges, Overflow, VisualNode};
use crate::theme::{ColorMode, ThemeToken};

pub const APP_ROOT_ID: &str = "app";
pub const PREVIEW_PANE_ID: &str = "preview-pane";

/// Height of the on-screen preview viewport, px. One A4 page at 96 dpi.
pub const PREVIEW_VIEWPORT_HEIGHT: f32 = 1123.0;

// ────────────────────────────────────────────────────────────────────────────
// Colour mode flag
// ────────────────────────────────────────────────────────────────────────────

/// Global light/dark switch of the host UI.
#[derive(Debug, Default)]
pub struct ColorModeFlag(AtomicBool);

impl ColorModeFlag {
    pub fn new(mode: ColorMode) -> Self {
        ColorModeFlag(AtomicBool::new(mode == ColorMode::Dark))
    }

    pub fn get(&self) -> ColorMode {
        if self.0.load(Ordering::SeqCst) {
            ColorMode::Dark
        } else {
            ColorMode::Light
        }
    }

    pub fn set(&self, mode: ColorMode) {
        self.0.store(mode == ColorMode::Dark, Ordering::SeqCst);
    }

    /// Sets `mode` and returns the previous one.
    pub fn replace(&self, mode: ColorMode) -> ColorMode {
        if self.0.swap(mode == ColorMode::Dark, Ordering::SeqCst) {
            ColorMode::Dark
        } else {
            ColorMode::Light
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Host document
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug)]
struct OffscreenEntry {
    id: u64,
    source_id: String,
    node: Arc<VisualNode>,
}

#[derive(Debug)]
pub struct HostDocument {
    root: VisualNode,
    color_mode: ColorModeFlag,
    offscreen: Mutex<Vec<OffscreenEntry>>,
    next_offscreen_id: AtomicU64,
}

impl HostDocument {
    pub fn new(root: VisualNode) -> Self {
        HostDocument {
            root,
            color_mode: ColorModeFlag::default(),
            offscreen: Mutex::new(Vec::new()),
            next_offscreen_id: AtomicU64::new(1),
        }
    }

    /// Mounts a rendered document inside the editor shell the way the preview shows
    /// it: a viewport-tall pane that clips, scrolled by `scroll_top`, with the
    /// document itself capped to the viewport height.
    pub fn with_preview(document: VisualNode, scroll_top: f32) -> Self {
        let mut document = document;
        document.style.max_height = Some(PREVIEW_VIEWPORT_HEIGHT);
        document.style.overflow = Overflow::Hidden;

        let mut pane = VisualNode::block(vec![document])
            .with_id(PREVIEW_PANE_ID)
            .background(ThemeToken::Background)
            .padding(Edges::all(24.0));
        pane.style.max_height = Some(PREVIEW_VIEWPORT_HEIGHT);
        pane.style.overflow = Overflow::Hidden;
        pane.style.scroll_top = scroll_top;

        let toolbar = VisualNode::text("Preview")
            .bold()
            .padding(Edges::symmetric(8.0, 16.0));

        Self::new(VisualNode::block(vec![toolbar, pane]).with_id(APP_ROOT_ID))
    }

    pub fn root(&self) -> &VisualNode {
        &self.root
    }

    pub fn find(&self, element_id: &str) -> Option<&VisualNode> {
        self.root.find(element_id)
    }

    pub fn color_mode(&self) -> ColorMode {
        self.color_mode.get()
    }

    pub fn set_color_mode(&self, mode: ColorMode) {
        self.color_mode.set(mode);
    }

    pub fn color_mode_flag(&self) -> &ColorModeFlag {
        &self.color_mode
    }

    // ── off-screen layer ────────────────────────────────────────────────────

    /// Attaches a detached copy to the off-screen layer and returns its handle.
    pub fn attach_offscreen(&self, source_id: &str, node: Arc<VisualNode>) -> u64 {
        let id = self.next_offscreen_id.fetch_add(1, Ordering::SeqCst);
        self.offscreen.lock().push(OffscreenEntry {
            id,
            source_id: source_id.to_string(),
            node,
        });
        debug!(offscreen_id = id, source_id, "attached off-screen copy");
        id
    }

    /// Removes one off-screen copy. Returns `false` if it was already gone.
    pub fn detach_offscreen(&self, id: u64) -> bool {
        let mut layer = self.offscreen.lock();
        let before = layer.len();
        layer.retain(|entry| entry.id != id);
        let removed = layer.len() != before;
        if removed {
            debug!(offscreen_id = id, "detached off-screen copy");
        }
        removed
    }

    /// Removes every off-screen copy, returning how many were left behind.
    pub fn purge_offscreen(&self) -> usize {
        let mut layer = self.offscreen.lock();
        let stale = layer.len();
        layer.clear();
        stale
    }

    pub fn offscreen_count(&self) -> usize {
        self.offscreen.lock().len()
    }

    /// Element ids of the live elements currently copied off-screen.
    pub fn offscreen_sources(&self) -> Vec<String> {
        self.offscreen
            .lock()
            .iter()
            .map(|entry| entry.source_id.clone())
            .collect()
    }

    pub fn offscreen_node(&self, id: u64) -> Option<Arc<VisualNode>> {
        self.offscreen
            .lock()
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| Arc::clone(&entry.node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::layout;

    fn document() -> VisualNode {
        VisualNode::block(vec![VisualNode::text("body")]).with_id("doc")
    }

    #[test]
    fn test_color_mode_flag_replace_returns_previous() {
        let flag = ColorModeFlag::new(ColorMode::Dark);
        assert_eq!(flag.replace(ColorMode::Light), ColorMode::Dark);
        assert_eq!(flag.get(), ColorMode::Light);
        assert_eq!(flag.replace(ColorMode::Light), ColorMode::Light);
    }

    #[test]
    fn test_preview_mount_constrains_document() {
        let host = HostDocument::with_preview(document(), 200.0);
        let doc = host.find("doc").expect("document mounted");
        assert_eq!(doc.style.max_height, Some(PREVIEW_VIEWPORT_HEIGHT));
        assert!(host.find(PREVIEW_PANE_ID).is_some());
        assert!(host.find(APP_ROOT_ID).is_some());
    }

    #[test]
    fn test_live_layout_is_bounded_by_viewport() {
        let tall = VisualNode::block(vec![VisualNode::text("x\n".repeat(400))]).with_id("doc");
        let host = HostDocument::with_preview(tall, 0.0);
        let live = layout(host.root(), 794.0);
        assert!(live.height < PREVIEW_VIEWPORT_HEIGHT + 100.0);
    }

    #[test]
    fn test_offscreen_attach_detach_purge() {
        let host = HostDocument::new(document());
        let a = host.attach_offscreen("doc", Arc::new(document()));
        let b = host.attach_offscreen("doc", Arc::new(document()));
        assert_ne!(a, b);
        assert_eq!(host.offscreen_count(), 2);
        assert!(host.offscreen_node(a).is_some());

        assert!(host.detach_offscreen(a));
        assert!(!host.detach_offscreen(a));
        assert_eq!(host.offscreen_sources(), vec!["doc".to_string()]);

        assert_eq!(host.purge_offscreen(), 1);
        assert_eq!(host.offscreen_count(), 0);
    }
}
