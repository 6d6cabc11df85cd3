//! Off-screen isolation copy of a live element.
//!
//! The copy is a deep clone with every live-view constraint neutralized, attached to
//! the host's off-screen layer for as long as the guard lives. Dropping the guard
//! detaches it, so no copy outlives the export that created it.

use std::sync::Arc;

use tracing::debug;

use crate::host::HostDocument;
use crate::pagination::PaginationError;
use crate::render::tree::VisualNode;

pub struct IsolationGuard<'a> {
    host: &'a HostDocument,
    offscreen_id: u64,
    node: Arc<VisualNode>,
}

impl<'a> IsolationGuard<'a> {
    /// Copies `element_id` off-screen. Fails without touching the host when the
    /// element does not exist.
    pub fn isolate(host: &'a HostDocument, element_id: &str) -> Result<Self, PaginationError> {
        let live = host
            .find(element_id)
            .ok_or_else(|| PaginationError::TargetNotFound(element_id.to_string()))?;

        let mut copy = live.clone();
        copy.neutralize_constraints();
        debug!(
            element_id,
            nodes = copy.node_count(),
            "isolated element for capture"
        );

        let node = Arc::new(copy);
        let offscreen_id = host.attach_offscreen(element_id, Arc::clone(&node));
        Ok(IsolationGuard {
            host,
            offscreen_id,
            node,
        })
    }

    pub fn node(&self) -> &VisualNode {
        &self.node
    }
}

impl Drop for IsolationGuard<'_> {
    fn drop(&mut self) {
        self.host.detach_offscreen(self.offscreen_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::tree::Overflow;

    fn host() -> HostDocument {
        let mut doc = VisualNode::block(vec![VisualNode::text("content")]).with_id("doc");
        doc.style.max_height = Some(20.0);
        doc.style.overflow = Overflow::Hidden;
        doc.style.scroll_top = 5.0;
        HostDocument::new(VisualNode::block(vec![doc]).with_id("app"))
    }

    #[test]
    fn test_missing_target_leaves_host_untouched() {
        let host = host();
        let err = IsolationGuard::isolate(&host, "nope").err().expect("must fail");
        assert!(matches!(err, PaginationError::TargetNotFound(ref id) if id == "nope"));
        assert_eq!(host.offscreen_count(), 0);
    }

    #[test]
    fn test_copy_is_unconstrained_and_live_tree_is_not() {
        let host = host();
        let guard = IsolationGuard::isolate(&host, "doc").unwrap();
        assert!(!guard.node().is_constrained());
        assert!(host.find("doc").unwrap().is_constrained());
        assert_eq!(host.offscreen_count(), 1);
        assert_eq!(host.offscreen_sources(), vec!["doc".to_string()]);
    }

    #[test]
    fn test_drop_detaches_copy() {
        let host = host();
        {
            let _first = IsolationGuard::isolate(&host, "doc").unwrap();
            let _second = IsolationGuard::isolate(&host, "doc").unwrap();
            assert_eq!(host.offscreen_count(), 2);
        }
        assert_eq!(host.offscreen_count(), 0);
    }
}
