//! Plate DOM - Document Object Model
//!
//! Arena-backed document tree. Nodes live in generational slots so that a
//! handle to a removed node is detected instead of silently aliasing whatever
//! reuses the slot.

mod node;
mod tree;
mod operations;

pub use node::{Attribute, ElementData, Node, NodeData, QualName, TextData};
pub use tree::{Children, Descendants, DomTree};
pub use operations::{DomError, DomResult};

/// HTML namespace URI
pub const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Node identifier: arena slot index plus the slot's generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    pub(crate) const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index in the arena
    #[inline]
    pub const fn index(self) -> u32 {
        self.index
    }

    /// Generation of the slot when this id was handed out
    #[inline]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}
