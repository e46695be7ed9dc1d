//! DOM Node Operations
//!
//! Core node manipulation: append, insert-before, detach, remove and deep
//! clone. Attaching a node that already has a parent moves it.

use crate::{DomTree, NodeId};

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// The id refers to a node that has been removed
    #[error("Stale node reference {0}")]
    StaleNode(NodeId),
    /// Insertion would create a cycle or move the Document root
    #[error("Hierarchy request error")]
    HierarchyRequest,
    /// Reference node is not a child of the given parent
    #[error("Node is not a child")]
    NotAChild,
}

impl DomTree {
    fn check(&self, id: NodeId) -> DomResult<()> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(DomError::StaleNode(id))
        }
    }

    /// Append `child` as the last child of `parent`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        self.insert_before(parent, child, None)
    }

    /// Insert `new_child` before `reference`, or at the end when `reference` is `None`
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        new_child: NodeId,
        reference: Option<NodeId>,
    ) -> DomResult<()> {
        self.check(parent)?;
        self.check(new_child)?;
        if new_child == self.root() || self.is_inclusive_ancestor(new_child, parent) {
            return Err(DomError::HierarchyRequest);
        }
        if let Some(reference) = reference {
            self.check(reference)?;
            if reference == new_child {
                return Err(DomError::HierarchyRequest);
            }
            if self.parent(reference) != Some(parent) {
                return Err(DomError::NotAChild);
            }
        }

        self.detach(new_child)?;

        let prev = match reference {
            Some(r) => self.prev_sibling(r),
            None => self.last_child(parent),
        };

        if let Some(node) = self.get_mut(new_child) {
            node.parent = Some(parent);
            node.prev_sibling = prev;
            node.next_sibling = reference;
        }
        match prev {
            Some(p) => {
                if let Some(node) = self.get_mut(p) {
                    node.next_sibling = Some(new_child);
                }
            }
            None => {
                if let Some(node) = self.get_mut(parent) {
                    node.first_child = Some(new_child);
                }
            }
        }
        match reference {
            Some(r) => {
                if let Some(node) = self.get_mut(r) {
                    node.prev_sibling = Some(new_child);
                }
            }
            None => {
                if let Some(node) = self.get_mut(parent) {
                    node.last_child = Some(new_child);
                }
            }
        }
        Ok(())
    }

    /// Unlink a node from its parent and siblings. Its subtree stays intact.
    /// Detaching a parentless node is a no-op.
    pub fn detach(&mut self, id: NodeId) -> DomResult<()> {
        let (parent, prev, next) = {
            let node = self.get(id).ok_or(DomError::StaleNode(id))?;
            match node.parent {
                Some(parent) => (parent, node.prev_sibling, node.next_sibling),
                None => return Ok(()),
            }
        };

        match prev {
            Some(p) => {
                if let Some(node) = self.get_mut(p) {
                    node.next_sibling = next;
                }
            }
            None => {
                if let Some(node) = self.get_mut(parent) {
                    node.first_child = next;
                }
            }
        }
        match next {
            Some(n) => {
                if let Some(node) = self.get_mut(n) {
                    node.prev_sibling = prev;
                }
            }
            None => {
                if let Some(node) = self.get_mut(parent) {
                    node.last_child = prev;
                }
            }
        }
        if let Some(node) = self.get_mut(id) {
            node.parent = None;
            node.prev_sibling = None;
            node.next_sibling = None;
        }
        Ok(())
    }

    /// Detach a node and free it together with its whole subtree.
    /// Every id into the subtree becomes stale.
    pub fn remove(&mut self, id: NodeId) -> DomResult<()> {
        if id == self.root() {
            return Err(DomError::HierarchyRequest);
        }
        self.detach(id)?;
        let doomed: Vec<NodeId> = self.descendants(id).collect();
        for node in &doomed {
            self.free(*node);
        }
        tracing::trace!("Removed {} nodes rooted at {}", doomed.len(), id);
        Ok(())
    }

    /// Remove and free every child of a node
    pub fn remove_children(&mut self, id: NodeId) -> DomResult<()> {
        self.check(id)?;
        while let Some(child) = self.first_child(id) {
            self.remove(child)?;
        }
        Ok(())
    }

    /// Deep-copy a subtree into a new detached subtree.
    ///
    /// Copies node kind, qualified name, attributes and character data, and
    /// every descendant in order. Uses an explicit stack so deeply nested
    /// markup cannot overflow the call stack.
    pub fn deep_clone(&mut self, id: NodeId) -> DomResult<NodeId> {
        let data = self.get(id).ok_or(DomError::StaleNode(id))?.data.clone();
        let copy = self.create_node(data);

        let mut stack: Vec<(NodeId, NodeId)> = self
            .children_ids(id)
            .into_iter()
            .rev()
            .map(|child| (child, copy))
            .collect();

        while let Some((source, dest_parent)) = stack.pop() {
            let data = self.get(source).ok_or(DomError::StaleNode(source))?.data.clone();
            let cloned = self.create_node(data);
            self.append_child(dest_parent, cloned)?;
            stack.extend(
                self.children_ids(source)
                    .into_iter()
                    .rev()
                    .map(|child| (child, cloned)),
            );
        }

        Ok(copy)
    }

    fn children_ids(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id).map(|(child, _)| child).collect()
    }
}
