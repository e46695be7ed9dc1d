//! Arena element adapter for `selectors` matching

use std::fmt;

use plate_dom::{DomTree, ElementData, HTML_NAMESPACE, Node, NodeData, NodeId};
use selectors::attr::{AttrSelectorOperation, CaseSensitivity, NamespaceConstraint};
use selectors::bloom::BloomFilter;
use selectors::matching::{ElementSelectorFlags, MatchingContext};
use selectors::{Element, OpaqueElement};

use crate::selector_impl::{CssName, CssString, PseudoClass, PseudoElement, Simple};

/// An element node borrowed from its tree
#[derive(Clone, Copy)]
pub(crate) struct ElementRef<'a> {
    tree: &'a DomTree,
    id: NodeId,
    node: &'a Node,
    data: &'a ElementData,
}

impl<'a> ElementRef<'a> {
    /// `None` for stale ids and non-element nodes
    pub(crate) fn wrap(tree: &'a DomTree, id: NodeId) -> Option<Self> {
        let node = tree.get(id)?;
        let data = node.as_element()?;
        Some(Self { tree, id, node, data })
    }

    /// First element among `start` and the siblings `step` walks to
    fn element_from(&self, start: Option<NodeId>, step: fn(&Node) -> Option<NodeId>) -> Option<Self> {
        let mut cursor = start;
        while let Some(id) = cursor {
            if let Some(element) = Self::wrap(self.tree, id) {
                return Some(element);
            }
            cursor = self.tree.get(id).and_then(step);
        }
        None
    }
}

impl fmt::Debug for ElementRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementRef")
            .field("id", &self.id)
            .field("name", &self.data.local_name())
            .finish()
    }
}

impl Element for ElementRef<'_> {
    type Impl = Simple;

    fn opaque(&self) -> OpaqueElement {
        OpaqueElement::new(self.node)
    }

    fn parent_element(&self) -> Option<Self> {
        self.node.parent().and_then(|id| Self::wrap(self.tree, id))
    }

    fn parent_node_is_shadow_root(&self) -> bool {
        false
    }

    fn containing_shadow_host(&self) -> Option<Self> {
        None
    }

    fn is_pseudo_element(&self) -> bool {
        false
    }

    fn prev_sibling_element(&self) -> Option<Self> {
        self.element_from(self.node.prev_sibling(), Node::prev_sibling)
    }

    fn next_sibling_element(&self) -> Option<Self> {
        self.element_from(self.node.next_sibling(), Node::next_sibling)
    }

    fn first_element_child(&self) -> Option<Self> {
        self.element_from(self.node.first_child(), Node::next_sibling)
    }

    fn is_html_element_in_html_document(&self) -> bool {
        self.data.name.ns == HTML_NAMESPACE
    }

    fn has_local_name(&self, local_name: &CssName) -> bool {
        self.data.name.local == local_name.0
    }

    fn has_namespace(&self, ns: &CssName) -> bool {
        self.data.name.ns == ns.0
    }

    fn is_same_type(&self, other: &Self) -> bool {
        self.data.name.local == other.data.name.local && self.data.name.ns == other.data.name.ns
    }

    fn attr_matches(
        &self,
        ns: &NamespaceConstraint<&CssName>,
        local_name: &CssName,
        operation: &AttrSelectorOperation<&CssString>,
    ) -> bool {
        self.data.attrs.iter().any(|attr| {
            !matches!(*ns, NamespaceConstraint::Specific(url) if url.0 != attr.name.ns)
                && attr.name.local == local_name.0
                && operation.eval_str(&attr.value)
        })
    }

    fn match_non_ts_pseudo_class(&self, pc: &PseudoClass, _context: &mut MatchingContext<'_, Simple>) -> bool {
        match pc {
            PseudoClass::Contains(needle) => self.tree.text_content(self.id).to_lowercase().contains(needle.as_str()),
        }
    }

    fn match_pseudo_element(&self, _pe: &PseudoElement, _context: &mut MatchingContext<'_, Simple>) -> bool {
        false
    }

    fn apply_selector_flags(&self, _flags: ElementSelectorFlags) {}

    fn is_link(&self) -> bool {
        matches!(self.data.local_name(), "a" | "area" | "link") && self.data.get_attr("href").is_some()
    }

    fn is_html_slot_element(&self) -> bool {
        self.is_html_element_in_html_document() && self.data.local_name() == "slot"
    }

    fn has_id(&self, id: &CssName, case_sensitivity: CaseSensitivity) -> bool {
        self.data
            .id()
            .is_some_and(|value| case_sensitivity.eq(id.0.as_bytes(), value.as_bytes()))
    }

    fn has_class(&self, name: &CssName, case_sensitivity: CaseSensitivity) -> bool {
        self.data
            .classes()
            .any(|class| case_sensitivity.eq(name.0.as_bytes(), class.as_bytes()))
    }

    fn has_custom_state(&self, _name: &CssName) -> bool {
        false
    }

    fn imported_part(&self, _name: &CssName) -> Option<CssName> {
        None
    }

    fn is_part(&self, _name: &CssName) -> bool {
        false
    }

    fn is_empty(&self) -> bool {
        self.tree.children(self.id).all(|(_, child)| match &child.data {
            NodeData::Element(_) => false,
            NodeData::Text(text) => text.content.is_empty(),
            _ => true,
        })
    }

    fn is_root(&self) -> bool {
        self.node
            .parent()
            .and_then(|id| self.tree.get(id))
            .is_some_and(|parent| matches!(parent.data, NodeData::Document))
    }

    fn add_element_unique_hashes(&self, _filter: &mut BloomFilter) -> bool {
        false
    }
}
