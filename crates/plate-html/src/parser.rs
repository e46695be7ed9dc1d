//! HTML5 Parser implementation
//!
//! Uses html5ever's RcDom and converts it into the arena tree.

use std::io::Read;

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};
use plate_dom::{Attribute, DomResult, DomTree, ElementData, NodeData, NodeId, QualName, TextData};

/// Parse failure
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Failed to read HTML source: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed HTML ({count} errors), first: {first}")]
    Malformed { count: usize, first: String },
}

/// Parser options
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Reject documents for which html5ever reports any parse error
    pub strict: bool,
    /// Drop text nodes that contain only whitespace
    pub drop_whitespace_text: bool,
}

/// HTML5 parser
#[derive(Debug, Clone, Default)]
pub struct HtmlParser {
    options: ParseOptions,
}

impl HtmlParser {
    /// Create a new HTML parser with default options
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse an HTML string
    pub fn parse(&self, html: &str) -> Result<DomTree, ParseError> {
        self.parse_reader(html.as_bytes())
    }

    /// Parse UTF-8 bytes; invalid sequences are replaced
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<DomTree, ParseError> {
        self.parse_reader(bytes)
    }

    /// Parse everything readable from `reader`
    pub fn parse_reader<R: Read>(&self, mut reader: R) -> Result<DomTree, ParseError> {
        let dom = parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut reader)?;

        let errors = dom.errors.borrow();
        if !errors.is_empty() {
            tracing::debug!("html5ever reported {} parse errors", errors.len());
            if self.options.strict {
                return Err(ParseError::Malformed {
                    count: errors.len(),
                    first: errors[0].to_string(),
                });
            }
        }

        let mut tree = DomTree::new();
        self.convert_document(&dom.document, &mut tree)
            .map_err(|e| ParseError::Malformed {
                count: 1,
                first: e.to_string(),
            })?;

        tracing::debug!("Parsed {} nodes", tree.len());
        Ok(tree)
    }

    /// Convert an RcDom document into the arena.
    ///
    /// Walks with an explicit work stack of `(source, arena parent)` pairs so
    /// nesting depth is bounded by memory, not by the call stack.
    fn convert_document(&self, document: &Handle, tree: &mut DomTree) -> DomResult<()> {
        let root = tree.root();
        let mut stack: Vec<(Handle, NodeId)> = document
            .children
            .borrow()
            .iter()
            .rev()
            .map(|child| (child.clone(), root))
            .collect();

        while let Some((handle, parent)) = stack.pop() {
            let Some(id) = self.convert_node(&handle, tree, parent)? else {
                continue;
            };

            let mut pending: Vec<Handle> = handle.children.borrow().iter().cloned().collect();
            // <template> keeps its content in a separate fragment
            if let RcNodeData::Element { template_contents, .. } = &handle.data {
                if let Some(contents) = template_contents.borrow().as_ref() {
                    pending.extend(contents.children.borrow().iter().cloned());
                }
            }
            stack.extend(pending.into_iter().rev().map(|child| (child, id)));
        }
        Ok(())
    }

    /// Convert a single RcDom node and attach it under `parent`.
    /// Returns the new id when the node can hold children.
    fn convert_node(&self, handle: &Handle, tree: &mut DomTree, parent: NodeId) -> DomResult<Option<NodeId>> {
        let id = match &handle.data {
            RcNodeData::Document => return Ok(None),
            RcNodeData::Doctype { name, public_id, system_id } => tree.create_node(NodeData::Doctype {
                name: name.to_string(),
                public_id: public_id.to_string(),
                system_id: system_id.to_string(),
            }),
            RcNodeData::Text { contents } => {
                let text = contents.borrow();
                if self.options.drop_whitespace_text && text.trim().is_empty() {
                    return Ok(None);
                }
                tree.create_node(NodeData::Text(TextData {
                    content: text.to_string(),
                }))
            }
            RcNodeData::Comment { contents } => tree.create_comment(contents),
            RcNodeData::Element { name, attrs, .. } => {
                let mut elem = ElementData::new(convert_name(name));
                elem.attrs = attrs
                    .borrow()
                    .iter()
                    .map(|attr| Attribute {
                        name: convert_name(&attr.name),
                        value: attr.value.to_string(),
                    })
                    .collect();

                let id = tree.create_node(NodeData::Element(elem));
                tree.append_child(parent, id)?;
                return Ok(Some(id));
            }
            RcNodeData::ProcessingInstruction { target, contents } => {
                tree.create_node(NodeData::ProcessingInstruction {
                    target: target.to_string(),
                    data: contents.to_string(),
                })
            }
        };
        tree.append_child(parent, id)?;
        Ok(None)
    }
}

fn convert_name(name: &html5ever::QualName) -> QualName {
    QualName {
        ns: name.ns.to_string(),
        prefix: name.prefix.as_ref().map(|p| p.to_string()),
        local: name.local.to_string(),
    }
}
