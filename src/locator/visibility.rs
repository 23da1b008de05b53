use crate::dom::{NodeId, PageTree, PageTreeMut};
use tracing::debug;

/// Whether `element` is rendered: neither it nor any ancestor is hidden, and
/// its own box is not collapsed to 0×0. Missing layout counts as visible.
pub fn is_visible<T: PageTree>(tree: &T, element: NodeId) -> bool {
    let mut current = Some(element);
    while let Some(id) = current {
        if tree.attr(id, "hidden").is_some() {
            return false;
        }
        if tree.style(id).map(|s| s.hides_element()).unwrap_or(false) {
            return false;
        }
        current = tree.parent(id);
    }

    !tree.bounding_box(element).map(|rect| rect.is_empty()).unwrap_or(false)
}

/// Nearest ancestor that scrolls and actually overflows, below `body`.
/// `None` means the document itself scrolls.
pub fn find_scrollable_parent<T: PageTree>(tree: &T, node: NodeId) -> Option<NodeId> {
    let mut current = tree.parent(node);
    while let Some(id) = current {
        if id == tree.root() || matches!(tree.tag(id), Some("body") | Some("html")) {
            return None;
        }

        let scrolls = tree
            .style(id)
            .map(|s| s.overflow_x().is_scrollable() || s.overflow_y().is_scrollable())
            .unwrap_or(false);
        let overflowing = tree
            .scroll_metrics(id)
            .map(|m| m.has_overflowing_content())
            .unwrap_or(false);
        if scrolls && overflowing {
            return Some(id);
        }

        current = tree.parent(id);
    }
    None
}

/// Centre `node` inside its scrollable container, then in the viewport
pub fn scroll_to_element<T: PageTreeMut>(tree: &mut T, node: NodeId) {
    if !tree.is_attached(node) {
        return;
    }

    if let Some(container) = find_scrollable_parent(tree, node) {
        let boxes = (tree.bounding_box(container), tree.bounding_box(node), tree.scroll_metrics(container));
        if let (Some(container_rect), Some(element_rect), Some(metrics)) = boxes {
            let relative_top = element_rect.top() - container_rect.top();
            let target = metrics.scroll_top + relative_top - metrics.client_height / 2.0;
            debug!("Scrolling container {:?} to {}", container, target);
            tree.set_scroll_top(container, target);
        }
    }

    tree.scroll_into_view(node);
}
