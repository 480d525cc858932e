use folio_dom::{BaseDocument, SelectorError};
use url::Url;

/// Open links to other hosts in a new tab. Returns the links which were changed.
pub fn mark_external_links(doc: &mut BaseDocument) -> Result<Vec<usize>, SelectorError> {
    let page_host = doc.url().and_then(|url| url.host_str().map(str::to_string));

    let external: Vec<usize> = doc
        .query_selector_all("a[href^=\"http\"]")?
        .into_iter()
        .filter(|&link| {
            let Some(href) = doc.get_node(link).and_then(|node| node.attr("href")) else {
                return false;
            };
            match Url::parse(href) {
                Ok(url) => url.host_str() != page_host.as_deref(),
                Err(_) => false,
            }
        })
        .collect();

    let mut mutr = doc.mutate();
    for &link in &external {
        mutr.set_attribute(link, "target", "_blank");
        mutr.set_attribute(link, "rel", "noopener noreferrer");
    }
    Ok(external)
}
