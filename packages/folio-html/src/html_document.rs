use std::ops::{Deref, DerefMut};

use folio_dom::{BaseDocument, DocumentConfig};

use crate::DocumentHtmlParser;

/// A [`BaseDocument`] built from HTML source. Derefs to the document.
pub struct HtmlDocument {
    inner: BaseDocument,
}

impl HtmlDocument {
    /// Parse HTML (or XHTML) into a new document
    pub fn from_html(html: &str, config: DocumentConfig) -> Self {
        let mut inner = BaseDocument::new(config);
        DocumentHtmlParser::parse_into_doc(&mut inner, html);
        HtmlDocument { inner }
    }

    pub fn into_inner(self) -> BaseDocument {
        self.inner
    }
}

impl Deref for HtmlDocument {
    type Target = BaseDocument;
    fn deref(&self) -> &BaseDocument {
        &self.inner
    }
}

impl DerefMut for HtmlDocument {
    fn deref_mut(&mut self) -> &mut BaseDocument {
        &mut self.inner
    }
}

impl From<HtmlDocument> for BaseDocument {
    fn from(doc: HtmlDocument) -> BaseDocument {
        doc.inner
    }
}
