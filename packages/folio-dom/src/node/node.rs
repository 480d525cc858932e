use folio_traits::Rect;

use super::{Attribute, ElementData};

pub struct Node {
    /// Slab id of this node
    pub id: usize,
    /// `None` for the document, fragments and detached nodes
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    pub data: NodeData,

    /// Border box last reported by the host, in viewport coordinates
    pub client_rect: Option<Rect>,
}

impl Node {
    pub(crate) fn new(id: usize, data: NodeData) -> Self {
        Self {
            id,
            parent: None,
            children: vec![],
            data,
            client_rect: None,
        }
    }

    pub fn index_of_child(&self, child_id: usize) -> Option<usize> {
        self.children.iter().position(|id| *id == child_id)
    }

    pub fn is_element(&self) -> bool {
        self.data.kind() == NodeKind::Element
    }

    pub fn is_text_node(&self) -> bool {
        self.data.kind() == NodeKind::Text
    }

    pub fn is_fragment(&self) -> bool {
        self.data.kind() == NodeKind::Fragment
    }

    pub fn element_data(&self) -> Option<&ElementData> {
        if let NodeData::Element(el) = &self.data { Some(el) } else { None }
    }

    pub fn element_data_mut(&mut self) -> Option<&mut ElementData> {
        if let NodeData::Element(el) = &mut self.data { Some(el) } else { None }
    }

    pub fn text_data(&self) -> Option<&TextNodeData> {
        if let NodeData::Text(text) = &self.data { Some(text) } else { None }
    }

    pub fn text_data_mut(&mut self) -> Option<&mut TextNodeData> {
        if let NodeData::Text(text) = &mut self.data { Some(text) } else { None }
    }

    pub fn attrs(&self) -> Option<&[Attribute]> {
        Some(self.element_data()?.attrs())
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.element_data()?.attr(name)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.element_data().is_some_and(|el| el.has_class(class))
    }

    pub fn is_element_with_tag_name(&self, tag: &str) -> bool {
        self.element_data().is_some_and(|el| el.tag() == tag)
    }

    /// The DOM "length" of the node: the byte length of a text node's data, or
    /// the number of children of any other node.
    pub fn length(&self) -> usize {
        match &self.data {
            NodeData::Text(data) => data.content.len(),
            NodeData::Comment => 0,
            _ => self.children.len(),
        }
    }

    /// One-line summary used by `Debug`
    pub fn node_debug_str(&self) -> String {
        match &self.data {
            NodeData::Document => String::from("#document"),
            NodeData::Fragment => String::from("#fragment"),
            NodeData::Comment => String::from("#comment"),
            NodeData::Text(data) => {
                let preview: String = data.content.chars().take(16).collect();
                format!("#text {preview:?}")
            }
            NodeData::Element(el) => {
                let mut summary = format!("<{}", el.tag());
                if let Some(id) = el.id() {
                    summary.push_str(&format!(" #{id}"));
                }
                for class in el.classes() {
                    summary.push_str(&format!(" .{class}"));
                }
                summary.push('>');
                if let Some(rect) = self.client_rect {
                    summary.push_str(&format!(" @ {rect:?}"));
                }
                summary
            }
        }
    }
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("node", &self.node_debug_str())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Fragment,
    Element,
    Text,
    Comment,
}

/// The different kinds of nodes in the DOM.
#[derive(Debug, Clone)]
pub enum NodeData {
    /// The `Document` itself - the root node of a HTML document.
    Document,

    /// A detached `DocumentFragment`. Appending a fragment moves its children.
    Fragment,

    /// An element with attributes.
    Element(ElementData),

    /// A text node.
    Text(TextNodeData),

    /// A comment.
    Comment,
}

impl NodeData {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeData::Document => NodeKind::Document,
            NodeData::Fragment => NodeKind::Fragment,
            NodeData::Element(_) => NodeKind::Element,
            NodeData::Text(_) => NodeKind::Text,
            NodeData::Comment => NodeKind::Comment,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TextNodeData {
    /// The textual content of the text node
    pub content: String,
}

impl TextNodeData {
    pub fn new(content: String) -> Self {
        Self { content }
    }
}
