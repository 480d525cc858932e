//! Builds a [`BaseDocument`] from html5ever's tree builder callbacks.

use std::borrow::Cow;
use std::cell::{Ref, RefCell, RefMut};

use folio_dom::node::Attribute;
use folio_dom::{BaseDocument, DocumentMutator};
use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::tree_builder::{ElementFlags, NodeOrText, QuirksMode, TreeBuilderOpts, TreeSink};
use html5ever::{ParseOpts, QualName};

/// Where text from the tree builder should end up
#[derive(Clone, Copy)]
enum TextSlot {
    /// After the last child of the node
    LastChildOf(usize),
    /// Directly before the node
    Before(usize),
}

/// Tree sink writing straight into a document through a [`DocumentMutator`].
/// Nodes are identified by their slab id.
pub struct DocumentHtmlParser<'doc> {
    mutator: RefCell<DocumentMutator<'doc>>,
    /// Recoverable parse errors reported by the tree builder
    pub errors: RefCell<Vec<Cow<'static, str>>>,
}

impl<'doc> DocumentHtmlParser<'doc> {
    pub fn new(doc: &'doc mut BaseDocument) -> Self {
        DocumentHtmlParser {
            mutator: RefCell::new(doc.mutate()),
            errors: RefCell::new(Vec::new()),
        }
    }

    fn mutr(&self) -> RefMut<'_, DocumentMutator<'doc>> {
        self.mutator.borrow_mut()
    }

    /// Parse `html` into `doc`. XHTML input (an XML declaration, or an XHTML
    /// doctype on the first line) goes through xml5ever.
    pub fn parse_into_doc<'d>(doc: &'d mut BaseDocument, html: &str) -> &'d mut BaseDocument {
        let sink = DocumentHtmlParser::new(doc);
        let mut input = html.as_bytes();
        let read = if looks_like_xhtml(html) {
            xml5ever::driver::parse_document(sink, Default::default())
                .from_utf8()
                .read_from(&mut input)
        } else {
            html5ever::parse_document(sink, parse_opts())
                .from_utf8()
                .read_from(&mut input)
        };
        if let Err(_err) = read {
            #[cfg(feature = "tracing")]
            tracing::warn!("failed to read html input: {_err}");
        }
        doc
    }

    /// Merge text into a neighbouring text node where possible, as the tree
    /// builder expects, else insert a new text node.
    fn insert_text(&self, slot: TextSlot, text: &str) {
        let mut mutr = self.mutr();
        let neighbour = match slot {
            TextSlot::LastChildOf(parent) => mutr.last_child_id(parent),
            TextSlot::Before(sibling) => mutr.previous_sibling_id(sibling),
        };
        if neighbour.is_some_and(|id| mutr.append_text_to_node(id, text).is_ok()) {
            return;
        }
        let text_id = mutr.create_text_node(text);
        match slot {
            TextSlot::LastChildOf(parent) => mutr.append_children(parent, &[text_id]),
            TextSlot::Before(sibling) => mutr.insert_nodes_before(sibling, &[text_id]),
        }
    }
}

fn looks_like_xhtml(input: &str) -> bool {
    if input.starts_with("<?xml") {
        return true;
    }
    input.starts_with("<!DOCTYPE")
        && input
            .lines()
            .next()
            .is_some_and(|line| line.to_ascii_lowercase().contains("xhtml"))
}

fn parse_opts() -> ParseOpts {
    ParseOpts {
        tree_builder: TreeBuilderOpts {
            // Pages are enhanced without running scripts, so <noscript> content is real markup
            scripting_enabled: false,
            drop_doctype: true,
            ..Default::default()
        },
        ..Default::default()
    }
}

fn convert_attrs(attrs: Vec<html5ever::Attribute>) -> Vec<Attribute> {
    attrs
        .into_iter()
        .map(|attr| Attribute {
            name: attr.name,
            value: attr.value.to_string(),
        })
        .collect()
}

impl TreeSink for DocumentHtmlParser<'_> {
    type Output = ();
    type Handle = usize;
    type ElemName<'a>
        = Ref<'a, QualName>
    where
        Self: 'a;

    fn finish(self) -> Self::Output {
        // Dropping the mutator rebuilds the id map
        drop(self.mutator.into_inner());
        #[cfg(feature = "tracing")]
        for error in self.errors.into_inner() {
            tracing::debug!("html parse error: {error}");
        }
    }

    fn parse_error(&self, msg: Cow<'static, str>) {
        self.errors.borrow_mut().push(msg);
    }

    fn get_document(&self) -> usize {
        0
    }

    #[allow(clippy::expect_used)]
    fn elem_name<'a>(&'a self, target: &'a usize) -> Ref<'a, QualName> {
        Ref::map(self.mutator.borrow(), |mutr| {
            mutr.element_name(*target)
                .expect("tree builder asked for the name of a non-element")
        })
    }

    fn create_element(
        &self,
        name: QualName,
        attrs: Vec<html5ever::Attribute>,
        _flags: ElementFlags,
    ) -> usize {
        self.mutr().create_element(name, convert_attrs(attrs))
    }

    // Comments and processing instructions keep their place in the tree but not their text
    fn create_comment(&self, _text: StrTendril) -> usize {
        self.mutr().create_comment_node()
    }

    fn create_pi(&self, _target: StrTendril, _data: StrTendril) -> usize {
        self.mutr().create_comment_node()
    }

    fn append(&self, parent: &usize, child: NodeOrText<usize>) {
        match child {
            NodeOrText::AppendNode(id) => self.mutr().append_children(*parent, &[id]),
            NodeOrText::AppendText(text) => self.insert_text(TextSlot::LastChildOf(*parent), &text),
        }
    }

    fn append_before_sibling(&self, sibling: &usize, child: NodeOrText<usize>) {
        match child {
            NodeOrText::AppendNode(id) => self.mutr().insert_nodes_before(*sibling, &[id]),
            NodeOrText::AppendText(text) => self.insert_text(TextSlot::Before(*sibling), &text),
        }
    }

    fn append_based_on_parent_node(
        &self,
        element: &usize,
        prev_element: &usize,
        child: NodeOrText<usize>,
    ) {
        let has_parent = self.mutr().node_has_parent(*element);
        if has_parent {
            self.append_before_sibling(element, child);
        } else {
            self.append(prev_element, child);
        }
    }

    fn append_doctype_to_document(&self, _: StrTendril, _: StrTendril, _: StrTendril) {}

    // <template> contents are kept as ordinary children
    fn get_template_contents(&self, target: &usize) -> usize {
        *target
    }

    fn same_node(&self, x: &usize, y: &usize) -> bool {
        x == y
    }

    fn set_quirks_mode(&self, _mode: QuirksMode) {}

    fn add_attrs_if_missing(&self, target: &usize, attrs: Vec<html5ever::Attribute>) {
        self.mutr().add_attrs_if_missing(*target, convert_attrs(attrs));
    }

    fn remove_from_parent(&self, target: &usize) {
        self.mutr().remove_node(*target);
    }

    fn reparent_children(&self, node: &usize, new_parent: &usize) {
        self.mutr().reparent_children(*node, *new_parent);
    }
}

#[cfg(test)]
mod tests {
    use folio_dom::{BaseDocument, DocumentConfig};

    use super::{DocumentHtmlParser, looks_like_xhtml};

    fn parse(html: &str) -> BaseDocument {
        let mut doc = BaseDocument::new(DocumentConfig::default());
        DocumentHtmlParser::parse_into_doc(&mut doc, html);
        doc
    }

    #[test]
    fn parses_some_html() {
        let doc = parse("<!DOCTYPE html><html><body><h1 id=\"title\">hello world</h1></body></html>");
        let h1 = doc.get_element_by_id("title").unwrap();
        assert_eq!(doc.text_content(h1), "hello world");
        assert_eq!(doc.body_id(), doc.get_node(h1).and_then(|node| node.parent));
    }

    #[test]
    fn parses_attributes_and_entities() {
        let doc = parse(r#"<div class="post-content"><p data-color="green">fish &amp; chips</p></div>"#);
        let div = doc.query_selector(".post-content").unwrap().unwrap();
        assert_eq!(
            doc.outer_html(div),
            r#"<div class="post-content"><p data-color="green">fish &amp; chips</p></div>"#
        );
        let p = doc.query_selector("p[data-color=green]").unwrap().unwrap();
        assert_eq!(doc.text_content(p), "fish & chips");
    }

    #[test]
    fn adjacent_text_is_merged() {
        let doc = parse("<p id=\"p\">a &lt; b</p>");
        let p = doc.get_element_by_id("p").unwrap();
        assert_eq!(doc.tree()[p].children.len(), 1);
        assert_eq!(doc.text_content(p), "a < b");
    }

    #[test]
    fn detects_xhtml() {
        assert!(looks_like_xhtml("<?xml version=\"1.0\"?><html/>"));
        assert!(looks_like_xhtml(
            "<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.0 Strict//EN\">\n<html/>"
        ));
        assert!(!looks_like_xhtml("<!DOCTYPE html>\n<html></html>"));
    }
}
