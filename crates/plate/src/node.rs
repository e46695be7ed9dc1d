//! Mutable node cursor
//!
//! [`NodeMut`] pairs a [`NodeRef`] with an exclusive borrow of its template so
//! callbacks (repeat expansion, set iteration) can call node operations
//! without threading the template through by hand.

use crate::{NodeRef, NodeSet, Result, Template};

/// A node together with mutable access to its template
pub struct NodeMut<'a> {
    template: &'a mut Template,
    node: NodeRef,
}

impl<'a> NodeMut<'a> {
    pub(crate) fn new(template: &'a mut Template, node: NodeRef) -> Self {
        Self { template, node }
    }

    /// Handle of the node this cursor points at
    pub fn node(&self) -> NodeRef {
        self.node
    }

    pub fn template(&self) -> &Template {
        self.template
    }

    pub fn template_mut(&mut self) -> &mut Template {
        self.template
    }

    pub fn find_first(&self, pattern: &str) -> Result<Option<NodeRef>> {
        self.template.find_first_in(self.node, pattern)
    }

    pub fn find(&self, pattern: &str) -> Result<NodeSet> {
        self.template.find_in(self.node, pattern)
    }

    pub fn replace_content_text(&mut self, text: impl AsRef<str>) -> Result<()> {
        self.template.replace_content_text(self.node, text.as_ref())
    }

    pub fn replace_content(&mut self, content: NodeRef) -> Result<()> {
        self.template.replace_content(self.node, content)
    }

    /// Deep-copy this node into a new detached subtree
    pub fn copy(&mut self) -> Result<NodeRef> {
        self.template.copy(self.node)
    }

    /// Expand this node once per item; see [`Template::repeat_node`]
    pub fn repeat<I, F>(&mut self, items: I, f: F) -> Result<()>
    where
        I: IntoIterator,
        F: FnMut(&mut NodeMut<'_>, I::Item) -> Result<()>,
    {
        self.template.repeat_node(self.node, items, f)
    }

    pub fn tag_name(&self) -> Option<&str> {
        self.template.tag_name(self.node)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.template.attr(self.node, name)
    }

    pub fn text_content(&self) -> String {
        self.template.text_content(self.node)
    }

    pub fn html(&self) -> Result<String> {
        self.template.node_html(self.node)
    }
}
