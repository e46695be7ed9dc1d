//! Template Configuration

use plate_html::{HtmlSerializer, ParseOptions};

/// Template configuration options
#[derive(Debug, Clone)]
pub struct Config {
    /// Fail parsing when html5ever reports any parse error
    pub strict_parsing: bool,

    /// Drop whitespace-only text nodes while parsing
    pub drop_whitespace_text: bool,

    /// Indent rendered output
    pub pretty_print: bool,

    /// Indentation unit used when `pretty_print` is set
    pub indent: String,
}

impl Config {
    pub(crate) fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            strict: self.strict_parsing,
            drop_whitespace_text: self.drop_whitespace_text,
        }
    }

    pub(crate) fn serializer(&self) -> HtmlSerializer {
        HtmlSerializer {
            pretty_print: self.pretty_print,
            indent: self.indent.clone(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strict_parsing: false,
            drop_whitespace_text: false,
            pretty_print: false,
            indent: "  ".to_string(),
        }
    }
}
