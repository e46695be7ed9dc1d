//! HTML Serialization (innerHTML/outerHTML)
//!
//! Key features:
//! - innerHTML/outerHTML serialization
//! - HTML escaping for text and attribute values
//! - Void and raw-text element handling
//! - Optional pretty printing

use std::io::{self, Write};

use plate_dom::{DomTree, NodeData, NodeId};

/// HTML serializer
#[derive(Debug, Clone)]
pub struct HtmlSerializer {
    /// Whether to format output with indentation
    pub pretty_print: bool,
    /// Indentation string
    pub indent: String,
}

/// Void elements (no end tag)
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "basefont", "bgsound", "br", "col", "embed", "frame", "hr", "img", "input",
    "keygen", "link", "meta", "param", "source", "track", "wbr",
];

/// Raw text elements (no escaping for content)
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "style", "script", "xmp", "iframe", "noembed", "noframes", "plaintext", "noscript",
];

/// Elements whose leading newline is dropped by the parser
const NEWLINE_SENSITIVE: &[&str] = &["pre", "textarea", "listing"];

impl Default for HtmlSerializer {
    fn default() -> Self {
        Self {
            pretty_print: false,
            indent: "  ".to_string(),
        }
    }
}

impl HtmlSerializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        Self {
            pretty_print: true,
            ..Self::default()
        }
    }

    /// Serialize innerHTML of a node (children only)
    pub fn serialize_inner(&self, tree: &DomTree, node_id: NodeId) -> String {
        let mut output = String::new();
        for (child_id, _) in tree.children(node_id) {
            self.serialize_subtree(tree, child_id, &mut output);
        }
        output
    }

    /// Serialize outerHTML of a node (including the node itself).
    /// A Document node serializes as its children.
    pub fn serialize_outer(&self, tree: &DomTree, node_id: NodeId) -> String {
        let mut output = String::new();
        self.serialize_subtree(tree, node_id, &mut output);
        output
    }

    /// Write the outerHTML of a node to `writer`
    pub fn render<W: Write>(&self, tree: &DomTree, node_id: NodeId, writer: &mut W) -> io::Result<()> {
        writer.write_all(self.serialize_outer(tree, node_id).as_bytes())
    }

    /// Depth-first walk driven by an explicit stack of open/close steps
    fn serialize_subtree(&self, tree: &DomTree, start: NodeId, output: &mut String) {
        let mut stack = vec![Step::Open(start, 0)];

        while let Some(step) = stack.pop() {
            match step {
                Step::Open(id, depth) => {
                    let Some(node) = tree.get(id) else {
                        continue;
                    };
                    match &node.data {
                        NodeData::Document => {
                            push_children(tree, id, depth, &mut stack);
                        }
                        NodeData::Element(_) => {
                            if self.open_element(tree, id, output, depth) {
                                stack.push(Step::Close(id, depth));
                                push_children(tree, id, depth + 1, &mut stack);
                            }
                        }
                        NodeData::Text(text) => escape_text(&text.content, output),
                        NodeData::Comment(text) => {
                            output.push_str("<!--");
                            output.push_str(text);
                            output.push_str("-->");
                        }
                        NodeData::Doctype { name, public_id, system_id } => {
                            write_doctype(name, public_id, system_id, output);
                        }
                        NodeData::ProcessingInstruction { target, data } => {
                            output.push_str("<?");
                            output.push_str(target);
                            output.push(' ');
                            output.push_str(data);
                            output.push('>');
                        }
                    }
                }
                Step::Close(id, depth) => self.close_element(tree, id, output, depth),
            }
        }
    }

    /// Write a start tag. Returns whether the caller still has to walk the
    /// children and close the element; void and raw-text elements are
    /// finished here.
    fn open_element(&self, tree: &DomTree, id: NodeId, output: &mut String, depth: usize) -> bool {
        let Some(node) = tree.get(id) else {
            return false;
        };
        let Some(elem) = node.as_element() else {
            return false;
        };
        let tag = elem.local_name();

        if self.pretty_print && depth > 0 {
            self.newline(output, depth);
        }

        output.push('<');
        output.push_str(tag);
        for attr in &elem.attrs {
            output.push(' ');
            if let Some(prefix) = &attr.name.prefix {
                output.push_str(prefix);
                output.push(':');
            }
            output.push_str(&attr.name.local);
            output.push_str("=\"");
            escape_attribute(&attr.value, output);
            output.push('"');
        }
        output.push('>');

        if VOID_ELEMENTS.contains(&tag) {
            return false;
        }

        if NEWLINE_SENSITIVE.contains(&tag) {
            let leading_newline = node
                .first_child()
                .and_then(|c| tree.get(c))
                .and_then(|c| c.as_text())
                .is_some_and(|t| t.starts_with('\n'));
            if leading_newline {
                output.push('\n');
            }
        }

        if RAW_TEXT_ELEMENTS.contains(&tag) {
            for (_child_id, child) in tree.children(id) {
                if let NodeData::Text(text) = &child.data {
                    output.push_str(&text.content);
                }
            }
            self.close_element(tree, id, output, depth);
            return false;
        }
        true
    }

    fn close_element(&self, tree: &DomTree, id: NodeId, output: &mut String, depth: usize) {
        let Some(node) = tree.get(id) else {
            return;
        };
        let Some(elem) = node.as_element() else {
            return;
        };
        if self.pretty_print && node.first_child().is_some_and(|c| tree.get(c).is_some_and(|c| c.is_element())) {
            self.newline(output, depth);
        }
        output.push_str("</");
        output.push_str(elem.local_name());
        output.push('>');
    }

    fn newline(&self, output: &mut String, depth: usize) {
        output.push('\n');
        for _ in 0..depth {
            output.push_str(&self.indent);
        }
    }
}

enum Step {
    Open(NodeId, usize),
    Close(NodeId, usize),
}

/// Queue the children of `id` so they pop in document order
fn push_children(tree: &DomTree, id: NodeId, depth: usize, stack: &mut Vec<Step>) {
    let children: Vec<NodeId> = tree.children(id).map(|(child, _)| child).collect();
    stack.extend(children.into_iter().rev().map(|child| Step::Open(child, depth)));
}

/// `<!DOCTYPE name>` with the legacy public/system identifiers when present
fn write_doctype(name: &str, public_id: &str, system_id: &str, output: &mut String) {
    output.push_str("<!DOCTYPE ");
    output.push_str(name);
    if !public_id.is_empty() {
        output.push_str(" PUBLIC ");
        write_quoted(public_id, output);
        if !system_id.is_empty() {
            output.push(' ');
            write_quoted(system_id, output);
        }
    } else if !system_id.is_empty() {
        output.push_str(" SYSTEM ");
        write_quoted(system_id, output);
    }
    output.push('>');
}

/// Identifiers cannot be escaped, so pick the quote the value does not use
fn write_quoted(value: &str, output: &mut String) {
    let quote = if value.contains('"') { '\'' } else { '"' };
    output.push(quote);
    output.push_str(value);
    output.push(quote);
}

/// Escape text content for HTML
fn escape_text(text: &str, output: &mut String) {
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '\u{a0}' => output.push_str("&nbsp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            _ => output.push(c),
        }
    }
}

/// Escape attribute value
fn escape_attribute(text: &str, output: &mut String) {
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '\u{a0}' => output.push_str("&nbsp;"),
            '"' => output.push_str("&quot;"),
            _ => output.push(c),
        }
    }
}

/// Utility: Get innerHTML of an element
pub fn get_inner_html(tree: &DomTree, node_id: NodeId) -> String {
    HtmlSerializer::new().serialize_inner(tree, node_id)
}

/// Utility: Get outerHTML of an element
pub fn get_outer_html(tree: &DomTree, node_id: NodeId) -> String {
    HtmlSerializer::new().serialize_outer(tree, node_id)
}
