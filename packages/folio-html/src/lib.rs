//! Parse HTML (or XHTML) into a Folio [`BaseDocument`](folio_dom::BaseDocument)

mod html_document;
mod html_sink;

pub use html_document::HtmlDocument;
pub use html_sink::DocumentHtmlParser;
