//! In-memory element tree.
//!
//! This is the element implementation used outside a browser host: demos,
//! tests, and replay of captured interactions all build trees from it.
//! Handles are `Rc`-backed and cheap to clone; parents are held weakly so
//! dropping a subtree does not leak.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use crate::dom::DomElement;
use crate::geometry::Rect;

struct NodeData {
    tag: String,
    is_element: bool,
    attributes: RefCell<BTreeMap<String, String>>,
    rect: Cell<Rect>,
    parent: RefCell<Option<Weak<NodeData>>>,
}

/// Handle to a node in the in-memory tree.
#[derive(Clone)]
pub struct TreeElement {
    node: Rc<NodeData>,
}

impl TreeElement {
    /// Create a detached element with the given tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            node: Rc::new(NodeData {
                tag: tag.into(),
                is_element: true,
                attributes: RefCell::new(BTreeMap::new()),
                rect: Cell::new(Rect::default()),
                parent: RefCell::new(None),
            }),
        }
    }

    /// Create a fragment root: reachable by the walk but not a true element.
    pub fn fragment() -> Self {
        Self {
            node: Rc::new(NodeData {
                tag: String::from("#document-fragment"),
                is_element: false,
                attributes: RefCell::new(BTreeMap::new()),
                rect: Cell::new(Rect::default()),
                parent: RefCell::new(None),
            }),
        }
    }

    /// Builder-style attribute assignment.
    pub fn with_attr(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Builder-style bounding-rect assignment.
    pub fn with_rect(self, rect: Rect) -> Self {
        self.node.rect.set(rect);
        self
    }

    /// Set or replace an attribute.
    pub fn set_attribute(&self, name: impl Into<String>, value: impl Into<String>) {
        self.node
            .attributes
            .borrow_mut()
            .insert(name.into(), value.into());
    }

    /// Set the bounding rect after construction.
    pub fn set_rect(&self, rect: Rect) {
        self.node.rect.set(rect);
    }

    /// Attach `child` under this node.
    pub fn append(&self, child: &TreeElement) {
        *child.node.parent.borrow_mut() = Some(Rc::downgrade(&self.node));
    }
}

impl std::fmt::Debug for TreeElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeElement")
            .field("tag", &self.node.tag)
            .field("attributes", &self.node.attributes.borrow())
            .finish()
    }
}

impl DomElement for TreeElement {
    fn tag_name(&self) -> String {
        self.node.tag.clone()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.node.attributes.borrow().get(name).cloned()
    }

    fn parent(&self) -> Option<Self> {
        self.node
            .parent
            .borrow()
            .as_ref()
            .and_then(Weak::upgrade)
            .map(|node| TreeElement { node })
    }

    fn supports_attributes(&self) -> bool {
        self.node.is_element
    }

    fn bounding_rect(&self) -> Rect {
        self.node.rect.get()
    }
}
