//! DOM element access for the enrichment core.
//!
//! The core never owns a document; the host supplies element handles through
//! the [`DomElement`] trait. A browser host backs it with real DOM nodes,
//! while [`TreeElement`] provides the in-memory tree used outside a browser
//! and in tests.

pub mod tree;
pub mod walker;

use crate::geometry::Rect;

// Re-export commonly used items
pub use tree::TreeElement;
pub use walker::{find_closest_anchor, is_element_dnt, walk_up};

/// Handle to a DOM element, cheap to clone.
///
/// Implementations return owned handles from [`parent`](Self::parent) so the
/// ancestor walk can traverse without borrowing the whole tree.
pub trait DomElement: Clone {
    /// Tag name of the element, as reported by the host.
    fn tag_name(&self) -> String;

    /// Attribute value, `Some("")` when the attribute is set without a value.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Parent node, `None` at the top of the chain.
    fn parent(&self) -> Option<Self>;

    /// Whether this node can answer attribute queries.
    ///
    /// Document and fragment roots are reachable by the walk but are not
    /// true elements; they report `false` here.
    fn supports_attributes(&self) -> bool;

    /// Bounding box in viewport coordinates.
    fn bounding_rect(&self) -> Rect;
}
