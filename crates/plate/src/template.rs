//! Template - a parsed document plus the templating operations
//!
//! Nodes are addressed through [`NodeRef`] handles. A handle never owns its
//! node; once the node is removed (its parent's content replaced, or it was a
//! repeat placeholder) the handle is stale and every operation on it reports
//! [`DomError::StaleNode`].

use std::io::{Read, Write};
use std::path::Path;

use plate_css::Selector;
use plate_dom::{DomError, DomTree, NodeData, NodeId};
use plate_html::HtmlParser;

use crate::{Config, NodeMut, NodeSet, Result};

/// Non-owning handle to a node of a [`Template`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef(NodeId);

impl NodeRef {
    /// Underlying arena id
    #[inline]
    pub fn id(self) -> NodeId {
        self.0
    }
}

impl From<NodeId> for NodeRef {
    fn from(id: NodeId) -> Self {
        Self(id)
    }
}

/// A parsed HTML template
#[derive(Debug, Clone)]
pub struct Template {
    tree: DomTree,
    config: Config,
}

impl Template {
    /// Parse a template from a string with the default configuration
    pub fn parse(html: &str) -> Result<Self> {
        Self::parse_with_config(html, Config::default())
    }

    pub fn parse_with_config(html: &str, config: Config) -> Result<Self> {
        let tree = HtmlParser::with_options(config.parse_options()).parse(html)?;
        Ok(Self { tree, config })
    }

    /// Parse everything readable from `reader`
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_config(reader, Config::default())
    }

    pub fn from_reader_with_config<R: Read>(reader: R, config: Config) -> Result<Self> {
        let tree = HtmlParser::with_options(config.parse_options()).parse_reader(reader)?;
        Ok(Self { tree, config })
    }

    /// Read a whole file and parse it
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_file_with_config(path, Config::default())
    }

    pub fn from_file_with_config(path: impl AsRef<Path>, config: Config) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading template: {}", path.display());
        let bytes = std::fs::read(path)?;
        let tree = HtmlParser::with_options(config.parse_options()).parse_bytes(&bytes)?;
        Ok(Self { tree, config })
    }

    /// Wrap an already-built tree
    pub fn from_tree(tree: DomTree, config: Config) -> Self {
        Self { tree, config }
    }

    /// The Document node
    pub fn root(&self) -> NodeRef {
        NodeRef(self.tree.root())
    }

    /// Read-only access to the underlying tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    pub(crate) fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Consume the template, returning its tree
    pub fn into_tree(self) -> DomTree {
        self.tree
    }

    /// Borrow a node mutably for chained operations
    pub fn node_mut(&mut self, node: NodeRef) -> Result<NodeMut<'_>> {
        self.check(node)?;
        Ok(NodeMut::new(self, node))
    }

    pub(crate) fn check(&self, node: NodeRef) -> Result<()> {
        if self.tree.contains(node.0) {
            Ok(())
        } else {
            Err(DomError::StaleNode(node.0).into())
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// First node matching `pattern` anywhere in the document
    pub fn find_first(&self, pattern: &str) -> Result<Option<NodeRef>> {
        self.find_first_in(self.root(), pattern)
    }

    /// Every node matching `pattern` in document order
    pub fn find(&self, pattern: &str) -> Result<NodeSet> {
        self.find_in(self.root(), pattern)
    }

    /// First match within the subtree rooted at `scope` (`scope` included)
    pub fn find_first_in(&self, scope: NodeRef, pattern: &str) -> Result<Option<NodeRef>> {
        let selector = Selector::compile(pattern)?;
        self.check(scope)?;
        let found = selector.match_first(&self.tree, scope.0).map(NodeRef);
        tracing::trace!("find_first '{}' -> {:?}", pattern, found);
        Ok(found)
    }

    /// All matches within the subtree rooted at `scope`
    pub fn find_in(&self, scope: NodeRef, pattern: &str) -> Result<NodeSet> {
        let selector = Selector::compile(pattern)?;
        self.check(scope)?;
        Ok(selector
            .match_all(&self.tree, scope.0)
            .into_iter()
            .map(NodeRef)
            .collect())
    }

    // ------------------------------------------------------------------
    // Navigation and accessors
    // ------------------------------------------------------------------

    pub fn parent(&self, node: NodeRef) -> Option<NodeRef> {
        self.tree.parent(node.0).map(NodeRef)
    }

    pub fn first_child(&self, node: NodeRef) -> Option<NodeRef> {
        self.tree.first_child(node.0).map(NodeRef)
    }

    pub fn last_child(&self, node: NodeRef) -> Option<NodeRef> {
        self.tree.last_child(node.0).map(NodeRef)
    }

    pub fn next_sibling(&self, node: NodeRef) -> Option<NodeRef> {
        self.tree.next_sibling(node.0).map(NodeRef)
    }

    pub fn prev_sibling(&self, node: NodeRef) -> Option<NodeRef> {
        self.tree.prev_sibling(node.0).map(NodeRef)
    }

    pub fn children(&self, node: NodeRef) -> Vec<NodeRef> {
        self.tree.children(node.0).map(|(id, _)| NodeRef(id)).collect()
    }

    /// Whether the handle still refers to a live node
    pub fn is_alive(&self, node: NodeRef) -> bool {
        self.tree.contains(node.0)
    }

    /// Whether the node is live and reachable from the document root
    pub fn is_attached(&self, node: NodeRef) -> bool {
        self.tree.is_attached(node.0)
    }

    /// Local tag name of an element
    pub fn tag_name(&self, node: NodeRef) -> Option<&str> {
        self.tree.get(node.0)?.as_element().map(|e| e.local_name())
    }

    pub fn attr(&self, node: NodeRef, name: &str) -> Option<&str> {
        self.tree.get(node.0)?.as_element()?.get_attr(name)
    }

    /// Character data of a text or comment node
    pub fn text(&self, node: NodeRef) -> Option<&str> {
        match &self.tree.get(node.0)?.data {
            NodeData::Text(t) => Some(t.content.as_str()),
            NodeData::Comment(c) => Some(c.as_str()),
            _ => None,
        }
    }

    /// Concatenated text of every descendant text node
    pub fn text_content(&self, node: NodeRef) -> String {
        self.tree.text_content(node.0)
    }

    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Create a detached text node
    pub fn create_text(&mut self, text: &str) -> NodeRef {
        NodeRef(self.tree.create_text(text))
    }

    /// Create a detached, empty HTML element
    pub fn create_element(&mut self, local_name: &str) -> NodeRef {
        NodeRef(self.tree.create_element(local_name))
    }

    /// Free a node and its subtree, detaching it first if needed
    pub fn discard(&mut self, node: NodeRef) -> Result<()> {
        self.tree.remove(node.0)?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Content mutation
    // ------------------------------------------------------------------

    /// Replace every child of `target` with a single text node holding
    /// `text` verbatim. Escaping happens at render time.
    pub fn replace_content_text(&mut self, target: NodeRef, text: &str) -> Result<()> {
        self.check(target)?;
        let content = self.create_text(text);
        self.replace_content(target, content)
    }

    /// Replace every child of `target` with `content`.
    ///
    /// `content` is detached from any previous parent first, so passing an
    /// attached node moves it. Passing `target` itself or one of its ancestors
    /// fails with [`DomError::HierarchyRequest`].
    pub fn replace_content(&mut self, target: NodeRef, content: NodeRef) -> Result<()> {
        self.check(target)?;
        self.check(content)?;
        if self.tree.is_inclusive_ancestor(content.0, target.0) {
            return Err(DomError::HierarchyRequest.into());
        }

        if self.tree.parent(content.0).is_some() {
            tracing::debug!("replace_content: moving attached node {}", content.0);
            self.tree.detach(content.0)?;
        }
        self.tree.remove_children(target.0)?;
        self.tree.append_child(target.0, content.0)?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Cloning
    // ------------------------------------------------------------------

    /// Deep-copy a subtree into a new detached subtree
    pub fn copy(&mut self, node: NodeRef) -> Result<NodeRef> {
        Ok(NodeRef(self.tree.deep_clone(node.0)?))
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    /// Render the whole document
    pub fn render<W: Write>(&self, writer: &mut W) -> Result<()> {
        self.render_node(self.root(), writer)
    }

    /// Render a subtree, the node itself included
    pub fn render_node<W: Write>(&self, node: NodeRef, writer: &mut W) -> Result<()> {
        self.check(node)?;
        self.config.serializer().render(&self.tree, node.0, writer)?;
        Ok(())
    }

    /// Render the whole document into a string
    pub fn to_html(&self) -> String {
        self.config.serializer().serialize_outer(&self.tree, self.tree.root())
    }

    /// Render a subtree into a string
    pub fn node_html(&self, node: NodeRef) -> Result<String> {
        self.check(node)?;
        Ok(self.config.serializer().serialize_outer(&self.tree, node.0))
    }
}
