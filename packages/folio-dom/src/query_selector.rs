//! Selector queries over the DOM, parsed and matched by the `selectors` crate.

use std::fmt;
use std::str::FromStr;

use cssparser::{ParseErrorKind, ParserInput, ToCss};
use selectors::matching::{
    MatchingContext, MatchingForInvalidation, MatchingMode, NeedsSelectorFlags, QuirksMode,
    SelectorCaches, matches_selector_list,
};
use selectors::parser::ParseRelative;
use smallvec::SmallVec;
use thiserror::Error;

use crate::BaseDocument;
use crate::selector::{ElementRef, FolioSelectors, SelectorParser};
use crate::traversal::AncestorTraverser;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,
    #[error("invalid selector {input:?} at {line}:{column}: {reason}")]
    Invalid {
        input: String,
        line: u32,
        column: u32,
        reason: String,
    },
}

/// A parsed, comma-separated list of selectors. Matches if any of them matches.
#[derive(Clone)]
pub struct SelectorList(selectors::SelectorList<FolioSelectors>);

impl SelectorList {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        if input.trim().is_empty() {
            return Err(SelectorError::Empty);
        }
        let mut parser_input = ParserInput::new(input);
        let mut parser = cssparser::Parser::new(&mut parser_input);
        selectors::SelectorList::parse(&SelectorParser, &mut parser, ParseRelative::No)
            .map(Self)
            .map_err(|err| SelectorError::Invalid {
                input: input.to_string(),
                line: err.location.line,
                column: err.location.column,
                reason: match err.kind {
                    ParseErrorKind::Basic(kind) => kind.to_string(),
                    ParseErrorKind::Custom(kind) => format!("{kind:?}"),
                },
            })
    }

    fn matches_element(&self, element: &ElementRef<'_>, caches: &mut SelectorCaches) -> bool {
        let mut context = MatchingContext::new(
            MatchingMode::Normal,
            None,
            caches,
            QuirksMode::NoQuirks,
            NeedsSelectorFlags::No,
            MatchingForInvalidation::No,
        );
        matches_selector_list(&self.0, element, &mut context)
    }
}

impl fmt::Debug for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SelectorList({:?})", self.0.to_css_string())
    }
}

impl FromStr for SelectorList {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl BaseDocument {
    /// Whether the node is an element matching any selector in the list (`Element.matches`)
    pub fn matches(&self, node_id: usize, selector_list: &SelectorList) -> bool {
        ElementRef::new(self, node_id).is_some_and(|element| {
            selector_list.matches_element(&element, &mut SelectorCaches::default())
        })
    }

    fn matching_descendants<'a>(
        &'a self,
        root: usize,
        selector_list: &'a SelectorList,
    ) -> impl Iterator<Item = usize> + 'a {
        let mut caches = SelectorCaches::default();
        self.descendant_elements(root).filter(move |id| {
            ElementRef::new(self, *id)
                .is_some_and(|element| selector_list.matches_element(&element, &mut caches))
        })
    }

    /// The closest inclusive ancestor matching the selector list (`Element.closest`)
    pub fn closest(&self, node_id: usize, selector_list: &SelectorList) -> Option<usize> {
        std::iter::once(node_id)
            .chain(AncestorTraverser::new(self, node_id))
            .find(|id| self.matches(*id, selector_list))
    }

    /// Find the first node that matches the selector specified as a string
    /// Returns:
    ///   - Err(_) if parsing the selector fails
    ///   - Ok(None) if nothing matches
    ///   - Ok(Some(node_id)) with the first node ID that matches if one is found
    pub fn query_selector(&self, selector: &str) -> Result<Option<usize>, SelectorError> {
        let selector_list = self.try_parse_selector_list(selector)?;
        Ok(self.query_selector_raw(&selector_list))
    }

    /// Find the first node that matches the selector(s) specified in selector_list
    pub fn query_selector_raw(&self, selector_list: &SelectorList) -> Option<usize> {
        self.query_selector_in_raw(0, selector_list)
    }

    /// Like [`query_selector_raw`](Self::query_selector_raw), but only searches
    /// the descendants of `root`
    pub fn query_selector_in_raw(&self, root: usize, selector_list: &SelectorList) -> Option<usize> {
        self.matching_descendants(root, selector_list).next()
    }

    /// Find all nodes that match the selector specified as a string
    /// Returns:
    ///   - `Err(_)` if parsing the selector fails
    ///   - `Ok(SmallVec<usize>)` with all matching nodes otherwise
    pub fn query_selector_all(
        &self,
        selector: &str,
    ) -> Result<SmallVec<[usize; 32]>, SelectorError> {
        let selector_list = self.try_parse_selector_list(selector)?;
        Ok(self.query_selector_all_raw(&selector_list))
    }

    /// Find all nodes that match the selector(s) specified in selector_list
    pub fn query_selector_all_raw(&self, selector_list: &SelectorList) -> SmallVec<[usize; 32]> {
        self.query_selector_all_in_raw(0, selector_list)
    }

    /// Find all descendants of `root` that match the selector list
    pub fn query_selector_all_in_raw(
        &self,
        root: usize,
        selector_list: &SelectorList,
    ) -> SmallVec<[usize; 32]> {
        self.matching_descendants(root, selector_list).collect()
    }

    pub fn try_parse_selector_list(&self, input: &str) -> Result<SelectorList, SelectorError> {
        SelectorList::parse(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Attribute, DocumentConfig};

    // <div class="post-content"><p id="intro" data-color="green"><a href="https://x.org">x</a></p></div>
    fn doc() -> (BaseDocument, [usize; 3]) {
        let mut doc = BaseDocument::new(DocumentConfig::default());
        let mut mutr = doc.mutate();
        let div = mutr.create_html_element("div", vec![Attribute::new("class", "post-content")]);
        let p = mutr.create_html_element(
            "p",
            vec![Attribute::new("id", "intro"), Attribute::new("data-color", "green")],
        );
        let a = mutr.create_html_element("a", vec![Attribute::new("href", "https://x.org")]);
        mutr.append_children(0, &[div]);
        mutr.append_children(div, &[p]);
        mutr.append_children(p, &[a]);
        drop(mutr);
        (doc, [div, p, a])
    }

    #[test]
    fn compound_and_attribute_selectors() {
        let (doc, [div, p, a]) = doc();
        assert_eq!(doc.query_selector(".post-content").unwrap(), Some(div));
        assert_eq!(doc.query_selector("p#intro[data-color]").unwrap(), Some(p));
        assert_eq!(doc.query_selector("[data-color=\"green\"]").unwrap(), Some(p));
        assert_eq!(doc.query_selector("a[href^='http']").unwrap(), Some(a));
        assert_eq!(doc.query_selector("a[href$=org]").unwrap(), Some(a));
        assert_eq!(doc.query_selector("[data-color=blue]").unwrap(), None);
    }

    #[test]
    fn combinators_and_lists() {
        let (doc, [div, p, a]) = doc();
        assert_eq!(doc.query_selector(".post-content a").unwrap(), Some(a));
        assert_eq!(doc.query_selector("div > a").unwrap(), None);
        assert_eq!(doc.query_selector("div > p > a").unwrap(), Some(a));
        assert_eq!(
            doc.query_selector_all("a, .post-content").unwrap().as_slice(),
            &[div, a]
        );
        assert_eq!(doc.query_selector("div:not(.post-content)").unwrap(), None);
        assert_eq!(doc.query_selector_all("*").unwrap().len(), 3);

        let list = SelectorList::parse(".post-content").unwrap();
        assert_eq!(doc.closest(a, &list), Some(div));
        assert_eq!(doc.query_selector_in_raw(p, &list), None);
    }

    #[test]
    fn sibling_and_structural_selectors() {
        // <main><p lang="en-GB">one</p><p>two</p><p class="last">three</p></main>
        let mut doc = BaseDocument::new(DocumentConfig::default());
        let mut mutr = doc.mutate();
        let main = mutr.create_html_element("main", vec![]);
        let first = mutr.create_html_element("p", vec![Attribute::new("lang", "en-GB")]);
        let second = mutr.create_html_element("p", vec![]);
        let third = mutr.create_html_element("p", vec![Attribute::new("class", "last")]);
        mutr.append_children(0, &[main]);
        mutr.append_children(main, &[first, second, third]);
        for (p, text) in [(first, "one"), (second, "two"), (third, "three")] {
            let text = mutr.create_text_node(text);
            mutr.append_children(p, &[text]);
        }
        drop(mutr);

        assert_eq!(doc.query_selector("main > p:first-child").unwrap(), Some(first));
        assert_eq!(doc.query_selector("main p:nth-child(2)").unwrap(), Some(second));
        assert_eq!(doc.query_selector("p:last-child").unwrap(), Some(third));
        assert_eq!(doc.query_selector_all("p + p").unwrap().as_slice(), &[second, third]);
        assert_eq!(doc.query_selector("p ~ .last").unwrap(), Some(third));
        assert_eq!(doc.query_selector("[lang|=en]").unwrap(), Some(first));
        assert_eq!(doc.query_selector(":root").unwrap(), Some(main));
        assert_eq!(doc.query_selector("p:empty").unwrap(), None);
        assert_eq!(doc.query_selector("P.LAST").unwrap(), None);
        assert_eq!(doc.query_selector("P.last").unwrap(), Some(third));
    }

    #[test]
    fn invalid_selectors_are_rejected() {
        assert!(matches!(SelectorList::parse("  "), Err(SelectorError::Empty)));
        assert!(matches!(
            SelectorList::parse("a:hover"),
            Err(SelectorError::Invalid { input, .. }) if input == "a:hover"
        ));
        assert!(SelectorList::parse("a,").is_err());
        assert!(SelectorList::parse("div >").is_err());
        assert!(SelectorList::parse("p::first-line").is_err());
    }
}
