//! Progressive enhancement for server-rendered reading pages.
//!
//! [`PageEnhancer`] installs every enhancement on a parsed page and handles the
//! events the host feeds it:
//!  - selection highlighting with a floating tooltip ([`highlight`])
//!  - light / dark / sepia theme switching, persisted through a [`StorageProvider`](folio_traits::StorageProvider)
//!  - reader typography settings
//!  - navbar shadow, back-to-top button and reading progress
//!  - lazily loaded images, reading time, a table of contents, external links
//!  - submit button guarding and timed alert dismissal
//!
//! ## Feature flags
//!  - `default`: Enables the features listed below.
//!  - `tracing`: Enables tracing support.

mod alerts;
mod config;
mod enhancer;
mod forms;
pub mod highlight;
mod lazy_images;
mod links;
mod reader_settings;
mod reading_time;
mod scroll_chrome;
mod theme;
mod timers;
mod toc;

pub use config::EnhanceConfig;
pub use enhancer::{EnhanceError, PageEnhancer};
pub use links::mark_external_links;
pub use reader_settings::{
    FONT_SIZE_PROPERTY, FONT_SIZE_STORAGE_KEY, LINE_HEIGHT_PROPERTY, LINE_HEIGHT_STORAGE_KEY,
    ReaderSettings,
};
pub use reading_time::estimate_minutes;
pub use scroll_chrome::{ScrollChrome, scroll_progress};
pub use theme::{THEME_STORAGE_KEY, Theme, ThemeSwitcher};
pub use toc::TableOfContents;

pub use folio_dom;
pub use folio_html::HtmlDocument;
pub use folio_traits;

/// Bootstrap's utility class for hidden elements
pub(crate) const HIDDEN_CLASS: &str = "d-none";
