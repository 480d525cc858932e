use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use folio_traits::{Point, Rect, Viewport};
use slab::Slab;
use url::Url;

use crate::selection::TextSelection;
use crate::{DocumentConfig, DocumentMutator, Node, NodeData, TextNodeData};

pub struct BaseDocument {
    /// ID of the document
    id: usize,

    /// Base url used to resolve relative links
    pub(crate) url: Option<Url>,
    // Viewport details such as the dimensions and color scheme
    pub(crate) viewport: Viewport,
    // Scroll within our viewport
    pub(crate) viewport_scroll: Point<f64>,
    /// Full height of the scrollable page, as reported by the host
    pub(crate) scroll_height: f64,

    /// A slab-backed tree of nodes. Node 0 is always the document node.
    pub(crate) nodes: Slab<Node>,

    /// Map of node ID's for fast lookups
    pub(crate) nodes_to_id: HashMap<String, usize>,

    /// The page's single global text selection
    pub(crate) selection: TextSelection,
}

impl BaseDocument {
    /// Create a new (empty) [`BaseDocument`] with the specified configuration
    pub fn new(config: DocumentConfig) -> Self {
        static ID_GENERATOR: AtomicUsize = AtomicUsize::new(1);

        let id = ID_GENERATOR.fetch_add(1, Ordering::SeqCst);
        let viewport = config.viewport.unwrap_or_default();
        let url = config
            .base_url
            .as_deref()
            .and_then(|base_url| Url::parse(base_url).ok());

        let mut doc = Self {
            id,
            url,
            viewport_scroll: Point::ZERO,
            scroll_height: viewport.client_height,
            viewport,
            nodes: Slab::new(),
            nodes_to_id: HashMap::new(),
            selection: TextSelection::default(),
        };

        // Initialise document with root Document node
        doc.create_node(NodeData::Document);

        doc
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn tree(&self) -> &Slab<Node> {
        &self.nodes
    }

    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    pub fn set_base_url(&mut self, url: &str) {
        self.url = Url::parse(url).ok();
    }

    pub fn get_node(&self, node_id: usize) -> Option<&Node> {
        self.nodes.get(node_id)
    }

    pub fn get_node_mut(&mut self, node_id: usize) -> Option<&mut Node> {
        self.nodes.get_mut(node_id)
    }

    pub fn mutate<'doc>(&'doc mut self) -> DocumentMutator<'doc> {
        DocumentMutator::new(self)
    }

    pub fn root_node(&self) -> &Node {
        &self.nodes[0]
    }

    pub fn try_root_element(&self) -> Option<&Node> {
        self.root_node()
            .children
            .iter()
            .map(|id| &self.nodes[*id])
            .find(|node| node.is_element())
    }

    /// The `<html>` element, or the document node for documents without one
    pub fn root_element_id(&self) -> usize {
        self.try_root_element().map(|node| node.id).unwrap_or(0)
    }

    /// The `<body>` element, if there is one
    pub fn body_id(&self) -> Option<usize> {
        let root = self.try_root_element()?;
        root.children
            .iter()
            .copied()
            .find(|id| self.nodes[*id].is_element_with_tag_name("body"))
    }

    pub(crate) fn create_node(&mut self, node_data: NodeData) -> usize {
        let entry = self.nodes.vacant_entry();
        let id = entry.key();
        entry.insert(Node::new(id, node_data));
        id
    }

    pub(crate) fn create_text_node(&mut self, text: &str) -> usize {
        let content = text.to_string();
        let data = NodeData::Text(TextNodeData::new(content));
        self.create_node(data)
    }

    /// Clone a node without its children. The clone is detached.
    pub(crate) fn shallow_clone_node(&mut self, node_id: usize) -> usize {
        let data = self.nodes[node_id].data.clone();
        self.create_node(data)
    }

    /// Find the node with the specified id attribute (if one exists)
    pub fn get_element_by_id(&self, id: &str) -> Option<usize> {
        self.nodes_to_id.get(id).copied()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.scroll_height = self.scroll_height.max(self.viewport.client_height);
    }

    pub fn viewport_scroll(&self) -> Point<f64> {
        self.viewport_scroll
    }

    pub fn set_viewport_scroll(&mut self, scroll: Point<f64>) {
        self.viewport_scroll = scroll;
    }

    /// Full height of the scrollable page (`documentElement.scrollHeight`)
    pub fn scroll_height(&self) -> f64 {
        self.scroll_height
    }

    pub fn set_scroll_height(&mut self, scroll_height: f64) {
        self.scroll_height = scroll_height;
    }

    /// Record the node's border box as laid out by the host (viewport coordinates)
    pub fn set_node_rect(&mut self, node_id: usize, rect: Rect) {
        if let Some(node) = self.nodes.get_mut(node_id) {
            node.client_rect = Some(rect);
        }
    }

    pub fn node_rect(&self, node_id: usize) -> Option<Rect> {
        self.nodes.get(node_id)?.client_rect
    }

    /// Scroll the viewport so that the top of the node is at the top of the viewport.
    ///
    /// Returns false if the node has no known geometry.
    pub fn scroll_node_into_view(&mut self, node_id: usize) -> bool {
        let Some(rect) = self.node_rect(node_id) else {
            return false;
        };
        let max_scroll = (self.scroll_height - self.viewport.client_height).max(0.0);
        let target = (self.viewport_scroll.y + rect.top).clamp(0.0, max_scroll);
        self.scroll_viewport_to(target);
        true
    }

    /// Scroll the viewport vertically to `y` on behalf of the page (e.g.
    /// `window.scrollTo`). Known client rects move with the content until the host
    /// reports fresh geometry.
    pub fn scroll_viewport_to(&mut self, y: f64) {
        let delta = y - self.viewport_scroll.y;
        self.viewport_scroll.y = y;
        if delta == 0.0 {
            return;
        }
        for (_, node) in self.nodes.iter_mut() {
            if let Some(rect) = &mut node.client_rect {
                rect.top -= delta;
            }
        }
    }
}
