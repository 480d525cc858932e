//! Table of contents built from the article's `h2`/`h3` headings.

use folio_dom::{Attribute, BaseDocument, SelectorError, SelectorList};
use folio_traits::{DomEvent, EventState};

pub struct TableOfContents {
    /// `(link, heading)` pairs
    links: Vec<(usize, usize)>,
}

impl TableOfContents {
    /// Number the headings and fill `.toc-container` with links to them. With no
    /// headings the surrounding `.card` is hidden instead.
    pub fn install(
        doc: &mut BaseDocument,
        content: Option<usize>,
    ) -> Result<Option<Self>, SelectorError> {
        let (Some(content), Some(container)) = (content, doc.query_selector(".toc-container")?)
        else {
            return Ok(None);
        };

        let headings = doc.query_selector_all_in_raw(content, &SelectorList::parse("h2, h3")?);
        if headings.is_empty() {
            let card = doc.closest(container, &SelectorList::parse(".card")?);
            if let Some(card) = card {
                doc.mutate().set_style_property(card, "display", "none");
            }
            return Ok(None);
        }

        let entries: Vec<(usize, String, String)> = headings
            .iter()
            .map(|&heading| {
                let tag = doc
                    .get_node(heading)
                    .and_then(|node| node.element_data())
                    .map(|el| el.tag().to_string())
                    .unwrap_or_default();
                (heading, tag, doc.text_content(heading).trim().to_string())
            })
            .collect();

        let mut mutr = doc.mutate();
        let nav = mutr.create_html_element("nav", vec![Attribute::new("class", "toc-list mb-3")]);
        let mut links = Vec::with_capacity(entries.len());
        for (index, (heading, tag, text)) in entries.into_iter().enumerate() {
            let id = format!("heading-{index}");
            mutr.set_attribute(heading, "id", &id);
            let link = mutr.create_html_element(
                "a",
                vec![
                    Attribute::new("href", format!("#{id}")),
                    Attribute::new("class", format!("toc-link toc-{tag}")),
                ],
            );
            mutr.set_text_content(link, &text);
            mutr.append_children(nav, &[link]);
            links.push((link, heading));
        }

        let header = mutr.create_html_element("h6", vec![Attribute::new("class", "mb-3")]);
        mutr.set_text_content(header, "Contents");
        mutr.remove_children(container);
        mutr.append_children(container, &[header, nav]);

        Ok(Some(TableOfContents { links }))
    }

    /// The heading each link points at, in document order
    pub fn links(&self) -> &[(usize, usize)] {
        &self.links
    }

    /// Listener on the links: scroll to the heading instead of navigating
    pub fn on_click(
        &self,
        doc: &mut BaseDocument,
        node_id: usize,
        event: &mut DomEvent,
        event_state: &mut EventState,
    ) -> bool {
        let Some(&(_, heading)) = self.links.iter().find(|(link, _)| *link == node_id) else {
            return false;
        };
        event.prevent_default();
        event_state.prevent_default();
        doc.scroll_node_into_view(heading);
        true
    }
}
