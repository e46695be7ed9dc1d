//! Selector parsing
//!
//! Drives `selectors`' parser over `cssparser` input and maps its errors
//! onto [`SelectorError`].

use cssparser::{BasicParseErrorKind, CowRcStr, ParseError, ParseErrorKind, ParserInput, ToCss};
use selectors::parser::{self, ParseRelative, SelectorList, SelectorParseErrorKind};

use crate::SelectorError;
use crate::selector_impl::{PseudoClass, Simple};

/// Parser hooks: enables `:is`, `:where` and `:has`, adds `:contains`
struct PlateParser;

impl<'i> parser::Parser<'i> for PlateParser {
    type Impl = Simple;
    type Error = SelectorParseErrorKind<'i>;

    fn parse_is_and_where(&self) -> bool {
        true
    }

    fn parse_has(&self) -> bool {
        true
    }

    fn parse_non_ts_functional_pseudo_class<'t>(
        &self,
        name: CowRcStr<'i>,
        arguments: &mut cssparser::Parser<'i, 't>,
        _after_part: bool,
    ) -> Result<PseudoClass, ParseError<'i, Self::Error>> {
        if name.eq_ignore_ascii_case("contains") {
            let needle = arguments.expect_ident_or_string()?;
            return Ok(PseudoClass::Contains(needle.to_lowercase()));
        }
        Err(arguments.new_custom_error(SelectorParseErrorKind::UnsupportedPseudoClassOrElement(name)))
    }
}

/// Parse a comma-separated selector list
pub(crate) fn parse_selector_list(pattern: &str) -> Result<SelectorList<Simple>, SelectorError> {
    if pattern.trim().is_empty() {
        return Err(SelectorError::Empty);
    }
    let mut input = ParserInput::new(pattern);
    let mut css = cssparser::Parser::new(&mut input);
    SelectorList::parse(&PlateParser, &mut css, ParseRelative::No).map_err(SelectorError::from)
}

impl<'i> From<ParseError<'i, SelectorParseErrorKind<'i>>> for SelectorError {
    fn from(err: ParseError<'i, SelectorParseErrorKind<'i>>) -> Self {
        let column = err.location.column;
        match err.kind {
            ParseErrorKind::Basic(BasicParseErrorKind::EndOfInput) => Self::UnexpectedEnd,
            ParseErrorKind::Basic(BasicParseErrorKind::UnexpectedToken(token)) => Self::UnexpectedToken {
                token: token.to_css_string(),
                column,
            },
            ParseErrorKind::Custom(SelectorParseErrorKind::EmptySelector) => Self::Empty,
            ParseErrorKind::Custom(SelectorParseErrorKind::DanglingCombinator) => Self::DanglingCombinator,
            ParseErrorKind::Custom(SelectorParseErrorKind::UnsupportedPseudoClassOrElement(name)) => {
                Self::UnknownPseudoClass(name.to_string())
            }
            ParseErrorKind::Custom(SelectorParseErrorKind::UnexpectedIdent(ident)) => Self::UnexpectedToken {
                token: ident.to_string(),
                column,
            },
            other => Self::Invalid {
                message: format!("{other:?}"),
                column,
            },
        }
    }
}
