//! Plate HTML
//!
//! HTML5 parsing built on html5ever, converted into the arena tree, and the
//! matching serializer.

mod parser;
mod serializer;

pub use parser::{HtmlParser, ParseError, ParseOptions};
pub use serializer::{HtmlSerializer, get_inner_html, get_outer_html};
pub use plate_dom::{DomTree, Node, NodeId};

/// Parse an HTML string with default options
pub fn parse(html: &str) -> Result<DomTree, ParseError> {
    HtmlParser::new().parse(html)
}
