#![allow(clippy::module_inception)]

mod attributes;
mod element;
mod node;

pub use attributes::{Attribute, Attributes};
pub use element::{ElementData, html_name};
pub use node::*;
