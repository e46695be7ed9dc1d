//! Template errors

use plate_css::SelectorError;
use plate_dom::DomError;
use plate_html::ParseError;

/// Result alias for template operations
pub type Result<T> = std::result::Result<T, TemplateError>;

/// Errors surfaced by template operations.
///
/// A query that matches nothing is not an error: `find_first` yields `None`
/// and `find` yields an empty set.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("HTML parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Invalid selector: {0}")]
    Selector(#[from] SelectorError),

    #[error("DOM error: {0}")]
    Dom(#[from] DomError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
