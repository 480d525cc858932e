//! Glue between the DOM and the `selectors` crate: a minimal [`SelectorImpl`]
//! without pseudo-classes of its own, and a [`selectors::Element`] view of a node.

use std::fmt;

use cssparser::ToCss;
use markup5ever::{LocalName, Namespace, ns};
use precomputed_hash::PrecomputedHash;
use selectors::OpaqueElement;
use selectors::attr::{AttrSelectorOperation, CaseSensitivity, NamespaceConstraint};
use selectors::bloom::BloomFilter;
use selectors::matching::{ElementSelectorFlags, MatchingContext};
use selectors::parser::SelectorParseErrorKind;

use crate::{BaseDocument, ElementData, Node, NodeKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FolioSelectors;

impl selectors::SelectorImpl for FolioSelectors {
    type ExtraMatchingData<'a> = ();
    type AttrValue = CssString;
    type Identifier = CssLocalName;
    type LocalName = CssLocalName;
    type NamespacePrefix = CssLocalName;
    type NamespaceUrl = Namespace;
    type BorrowedNamespaceUrl = Namespace;
    type BorrowedLocalName = CssLocalName;

    type NonTSPseudoClass = NonTSPseudoClass;
    type PseudoElement = PseudoElement;
}

pub(crate) struct SelectorParser;

impl<'i> selectors::parser::Parser<'i> for SelectorParser {
    type Impl = FolioSelectors;
    type Error = SelectorParseErrorKind<'i>;
}

/// Attribute values as they appear in selectors
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CssString(pub String);

impl From<&str> for CssString {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for CssString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl ToCss for CssString {
    fn to_css<W: fmt::Write>(&self, dest: &mut W) -> fmt::Result {
        cssparser::serialize_string(&self.0, dest)
    }
}

/// Tag names, ids and class names as they appear in selectors
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CssLocalName(pub LocalName);

impl From<&str> for CssLocalName {
    fn from(value: &str) -> Self {
        Self(LocalName::from(value))
    }
}

impl ToCss for CssLocalName {
    fn to_css<W: fmt::Write>(&self, dest: &mut W) -> fmt::Result {
        cssparser::serialize_identifier(&self.0, dest)
    }
}

impl PrecomputedHash for CssLocalName {
    fn precomputed_hash(&self) -> u32 {
        self.0.precomputed_hash()
    }
}

/// No state pseudo-classes (`:hover`, `:checked`, ...) are tracked, so none parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NonTSPseudoClass {}

impl selectors::parser::NonTSPseudoClass for NonTSPseudoClass {
    type Impl = FolioSelectors;

    fn is_active_or_hover(&self) -> bool {
        match *self {}
    }

    fn is_user_action_state(&self) -> bool {
        match *self {}
    }
}

impl ToCss for NonTSPseudoClass {
    fn to_css<W: fmt::Write>(&self, _dest: &mut W) -> fmt::Result {
        match *self {}
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PseudoElement {}

impl selectors::parser::PseudoElement for PseudoElement {
    type Impl = FolioSelectors;
}

impl ToCss for PseudoElement {
    fn to_css<W: fmt::Write>(&self, _dest: &mut W) -> fmt::Result {
        match *self {}
    }
}

/// An element of a [`BaseDocument`], borrowed for selector matching
#[derive(Clone, Copy)]
pub(crate) struct ElementRef<'a> {
    doc: &'a BaseDocument,
    node: &'a Node,
    element: &'a ElementData,
}

impl fmt::Debug for ElementRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementRef({})", self.node.id)
    }
}

impl<'a> ElementRef<'a> {
    /// `None` unless `id` is an element
    pub(crate) fn new(doc: &'a BaseDocument, id: usize) -> Option<Self> {
        let node = doc.nodes.get(id)?;
        let element = node.element_data()?;
        Some(Self { doc, node, element })
    }

    fn sibling_element(&self, forward: bool) -> Option<Self> {
        let parent = &self.doc.nodes[self.node.parent?];
        let index = parent.index_of_child(self.node.id)?;
        let (before, after) = parent.children.split_at(index);
        let wrap = |id: &usize| Self::new(self.doc, *id);
        if forward {
            after[1..].iter().find_map(wrap)
        } else {
            before.iter().rev().find_map(wrap)
        }
    }
}

impl selectors::Element for ElementRef<'_> {
    type Impl = FolioSelectors;

    fn opaque(&self) -> OpaqueElement {
        OpaqueElement::new(self.node)
    }

    fn parent_element(&self) -> Option<Self> {
        Self::new(self.doc, self.node.parent?)
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
        self.sibling_element(false)
    }

    fn next_sibling_element(&self) -> Option<Self> {
        self.sibling_element(true)
    }

    fn first_element_child(&self) -> Option<Self> {
        self.node
            .children
            .iter()
            .find_map(|id| Self::new(self.doc, *id))
    }

    fn is_html_element_in_html_document(&self) -> bool {
        self.element.name.ns == ns!(html)
    }

    fn has_local_name(&self, local_name: &CssLocalName) -> bool {
        self.element.name.local == local_name.0
    }

    fn has_namespace(&self, ns: &Namespace) -> bool {
        &self.element.name.ns == ns
    }

    fn is_same_type(&self, other: &Self) -> bool {
        self.element.name == other.element.name
    }

    fn attr_matches(
        &self,
        ns: &NamespaceConstraint<&Namespace>,
        local_name: &CssLocalName,
        operation: &AttrSelectorOperation<&CssString>,
    ) -> bool {
        self.element.attrs().iter().any(|attr| {
            !matches!(*ns, NamespaceConstraint::Specific(url) if *url != attr.name.ns)
                && attr.name.local == local_name.0
                && operation.eval_str(&attr.value)
        })
    }

    fn match_non_ts_pseudo_class(
        &self,
        pc: &NonTSPseudoClass,
        _context: &mut MatchingContext<Self::Impl>,
    ) -> bool {
        match *pc {}
    }

    fn match_pseudo_element(
        &self,
        pe: &PseudoElement,
        _context: &mut MatchingContext<Self::Impl>,
    ) -> bool {
        match *pe {}
    }

    fn apply_selector_flags(&self, _flags: ElementSelectorFlags) {}

    fn is_link(&self) -> bool {
        matches!(self.element.tag(), "a" | "area" | "link") && self.element.has_attr("href")
    }

    fn is_html_slot_element(&self) -> bool {
        false
    }

    fn has_id(&self, id: &CssLocalName, case_sensitivity: CaseSensitivity) -> bool {
        self.element
            .id()
            .is_some_and(|value| case_sensitivity.eq(value.as_bytes(), id.0.as_bytes()))
    }

    fn has_class(&self, name: &CssLocalName, case_sensitivity: CaseSensitivity) -> bool {
        self.element
            .classes()
            .any(|class| case_sensitivity.eq(class.as_bytes(), name.0.as_bytes()))
    }

    fn has_custom_state(&self, _name: &CssLocalName) -> bool {
        false
    }

    fn imported_part(&self, _name: &CssLocalName) -> Option<CssLocalName> {
        None
    }

    fn is_part(&self, _name: &CssLocalName) -> bool {
        false
    }

    fn is_empty(&self) -> bool {
        self.node.children.iter().all(|id| {
            let child = &self.doc.nodes[*id];
            match child.text_data() {
                Some(text) => text.content.is_empty(),
                None => !child.is_element(),
            }
        })
    }

    fn is_root(&self) -> bool {
        self.node
            .parent
            .is_some_and(|parent| self.doc.nodes[parent].data.kind() == NodeKind::Document)
    }

    fn add_element_unique_hashes(&self, _filter: &mut BloomFilter) -> bool {
        false
    }
}
