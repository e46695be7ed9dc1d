//! Plate CSS - selector engine
//!
//! Compiles CSS selector patterns with the `selectors` crate and runs them
//! against a [`DomTree`].
//!
//! # Example
//! ```rust,ignore
//! let selector = Selector::compile("ul.people > li:first-child")?;
//! let first = selector.match_first(&tree, tree.root());
//! ```

mod element;
mod parser;
pub mod selector_impl;

use std::str::FromStr;

use plate_dom::{DomTree, NodeId};
use selectors::parser::SelectorList;
use selectors::matching::{
    self, MatchingContext, MatchingForInvalidation, MatchingMode, NeedsSelectorFlags, QuirksMode, SelectorCaches,
};

use element::ElementRef;
use selector_impl::Simple;

/// Selector compilation error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("Empty selector")]
    Empty,

    #[error("Unexpected end of selector")]
    UnexpectedEnd,

    #[error("Combinator with nothing after it")]
    DanglingCombinator,

    #[error("Unexpected '{token}' at column {column}")]
    UnexpectedToken { token: String, column: u32 },

    #[error("Unknown pseudo-class or pseudo-element '{0}'")]
    UnknownPseudoClass(String),

    #[error("Invalid selector at column {column}: {message}")]
    Invalid { message: String, column: u32 },
}

/// Compiled selector list
#[derive(Debug, Clone)]
pub struct Selector {
    source: String,
    list: SelectorList<Simple>,
}

impl Selector {
    /// Compile a selector pattern such as `#title`, `.person` or `ul > li`
    pub fn compile(pattern: &str) -> Result<Self, SelectorError> {
        let list = parser::parse_selector_list(pattern)?;
        Ok(Self {
            source: pattern.to_string(),
            list,
        })
    }

    /// The pattern this selector was compiled from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Number of comma-separated selectors in the list
    pub fn selector_count(&self) -> usize {
        self.list.slice().len()
    }

    /// Whether a single node matches
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        let mut caches = SelectorCaches::default();
        self.matches_with(tree, node, &mut caches)
    }

    /// First match in document order within the subtree rooted at `root`
    /// (`root` included)
    pub fn match_first(&self, tree: &DomTree, root: NodeId) -> Option<NodeId> {
        let mut caches = SelectorCaches::default();
        tree.descendants(root)
            .find(|&id| self.matches_with(tree, id, &mut caches))
    }

    /// All matches in document order within the subtree rooted at `root`
    pub fn match_all(&self, tree: &DomTree, root: NodeId) -> Vec<NodeId> {
        let mut caches = SelectorCaches::default();
        let matches: Vec<NodeId> = tree
            .descendants(root)
            .filter(|&id| self.matches_with(tree, id, &mut caches))
            .collect();
        tracing::trace!("Selector '{}' matched {} nodes", self.source, matches.len());
        matches
    }

    fn matches_with(&self, tree: &DomTree, node: NodeId, caches: &mut SelectorCaches) -> bool {
        let Some(element) = ElementRef::wrap(tree, node) else {
            return false;
        };
        let mut context = MatchingContext::new(
            MatchingMode::Normal,
            None,
            caches,
            QuirksMode::NoQuirks,
            NeedsSelectorFlags::No,
            MatchingForInvalidation::No,
        );
        self.list
            .slice()
            .iter()
            .any(|selector| matching::matches_selector(selector, 0, None, &element, &mut context))
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::compile(s)
    }
}
