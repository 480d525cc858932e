use folio_traits::Viewport;

/// Options used when constructing a [`BaseDocument`](crate::BaseDocument)
#[derive(Default, Debug, Clone)]
pub struct DocumentConfig {
    /// The initial `Viewport`
    pub viewport: Option<Viewport>,
    /// The base url which relative URLs are resolved against
    pub base_url: Option<String>,
}
