//! The core DOM abstraction in Folio
//!
//! This crate implements a headless DOM ([`BaseDocument`]) which is designed to be embedded in and "driven" by
//! external code. Most users will want to use the [`HtmlDocument`](https://docs.rs/folio-html/latest/folio_html/struct.HtmlDocument.html)
//! wrapper from the folio-html crate, which parses HTML into a [`BaseDocument`].
//!
//! It includes: a DOM tree representation, CSS selector queries, DOM ranges, the document's global text
//! selection and event dispatch. There is no style or layout engine: the host reports node geometry with
//! [`BaseDocument::set_node_rect`].
//!
//! ## Feature flags
//!  - `default`: Enables the features listed below.
//!  - `tracing`: Enables tracing support.

/// The DOM implementation.
///
/// This is the primary entry point for this crate.
mod document;

/// The nodes themselves, and their data.
pub mod node;

mod config;
mod events;
mod mutator;
mod query_selector;
mod range;
mod selector;
mod selection;
mod serialize;
mod traversal;

pub use config::DocumentConfig;
pub use document::BaseDocument;
pub use markup5ever::{LocalName, Namespace, Prefix, QualName};
pub use mutator::{AppendTextErr, DocumentMutator};
pub use node::{Attribute, ElementData, Node, NodeData, NodeKind, TextNodeData, html_name};
pub use query_selector::{SelectorError, SelectorList};
pub use range::{BoundaryPoint, Range, RangeError};
pub use selection::{SelectionEndpoint, SelectionSnapshot, TextSelection};
pub use traversal::{AncestorTraverser, TreeTraverser};
pub use events::{EventDriver, EventHandler, NoopEventHandler};
pub use folio_traits::Point;
