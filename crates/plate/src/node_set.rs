//! Node Set - ordered query results

use plate_dom::DomError;

use crate::{NodeMut, NodeRef, Result, Template};

/// Ordered sequence of node handles, in document order when produced by a query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeSet {
    nodes: Vec<NodeRef>,
}

impl NodeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Element at `index`, or `None` when `index >= len`
    pub fn get(&self, index: usize) -> Option<NodeRef> {
        self.nodes.get(index).copied()
    }

    pub fn first(&self) -> Option<NodeRef> {
        self.nodes.first().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeRef> + '_ {
        self.nodes.iter().copied()
    }

    pub fn as_slice(&self) -> &[NodeRef] {
        &self.nodes
    }

    /// Call `f` once per element, in order
    pub fn for_each<F: FnMut(NodeRef)>(&self, f: F) {
        self.nodes.iter().copied().for_each(f);
    }

    /// Call `f` with a mutable cursor for each element, stopping at the first error
    pub fn for_each_mut<F>(&self, template: &mut Template, mut f: F) -> Result<()>
    where
        F: FnMut(&mut NodeMut<'_>) -> Result<()>,
    {
        for &node in &self.nodes {
            f(&mut template.node_mut(node)?)?;
        }
        Ok(())
    }

    /// Replace the content of every element with `text`.
    ///
    /// Fails without mutating anything if any element is stale. Elements
    /// nested inside an earlier element are skipped: replacing the outer
    /// content already removed them.
    pub fn replace_content_text(&self, template: &mut Template, text: &str) -> Result<()> {
        self.check_all(template)?;
        for node in self.outermost(template) {
            template.replace_content_text(node, text)?;
        }
        Ok(())
    }

    /// Replace the content of every element with `content`.
    ///
    /// A node can only have one parent, so every target but the last gets a
    /// deep copy and the last gets `content` itself. Targets are the
    /// elements not nested inside an earlier element. Fails before mutating
    /// if `content` is a target or contains one.
    pub fn replace_content(&self, template: &mut Template, content: NodeRef) -> Result<()> {
        self.check_all(template)?;
        template.check(content)?;
        let targets = self.outermost(template);
        let Some((&last, rest)) = targets.split_last() else {
            return Ok(());
        };
        if targets
            .iter()
            .any(|t| template.tree().is_inclusive_ancestor(content.id(), t.id()))
        {
            return Err(DomError::HierarchyRequest.into());
        }

        // `content` may live under a target that is about to be cleared
        template.tree_mut().detach(content.id())?;
        for &node in rest {
            let copy = template.copy(content)?;
            template.replace_content(node, copy)?;
        }
        template.replace_content(last, content)
    }

    /// Members in order, minus any that sit inside an earlier member
    fn outermost(&self, template: &Template) -> Vec<NodeRef> {
        let tree = template.tree();
        let mut kept: Vec<NodeRef> = Vec::with_capacity(self.nodes.len());
        for &node in &self.nodes {
            if !kept.iter().any(|outer| tree.is_inclusive_ancestor(outer.id(), node.id())) {
                kept.push(node);
            }
        }
        kept
    }

    fn check_all(&self, template: &Template) -> Result<()> {
        self.nodes.iter().try_for_each(|&node| template.check(node))
    }
}

impl FromIterator<NodeRef> for NodeSet {
    fn from_iter<T: IntoIterator<Item = NodeRef>>(iter: T) -> Self {
        Self {
            nodes: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for NodeSet {
    type Item = NodeRef;
    type IntoIter = std::vec::IntoIter<NodeRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

impl<'a> IntoIterator for &'a NodeSet {
    type Item = NodeRef;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, NodeRef>>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter().copied()
    }
}
