use crate::node::{Attribute, ElementData, NodeData, html_name};
use crate::traversal::TreeTraverser;
use crate::{BaseDocument, QualName};

#[derive(Debug)]
pub enum AppendTextErr {
    /// The node is not a text node
    NotTextNode,
}

pub struct DocumentMutator<'doc> {
    /// Document is public as an escape hatch, but users of this API should ideally avoid using it
    /// and prefer exposing additional functionality in DocumentMutator.
    pub doc: &'doc mut BaseDocument,

    /// Whether an `id` attribute (or a node carrying one) changed, so the id map
    /// must be rebuilt once mutations have completed
    ids_dirty: bool,
}

impl Drop for DocumentMutator<'_> {
    fn drop(&mut self) {
        self.flush(); // Defined at bottom of file
    }
}

impl DocumentMutator<'_> {
    pub fn new<'doc>(doc: &'doc mut BaseDocument) -> DocumentMutator<'doc> {
        DocumentMutator {
            doc,
            ids_dirty: false,
        }
    }

    pub fn node_has_parent(&self, node_id: usize) -> bool {
        self.doc.nodes[node_id].parent.is_some()
    }

    pub fn previous_sibling_id(&self, node_id: usize) -> Option<usize> {
        self.doc.previous_sibling_id(node_id)
    }

    pub fn next_sibling_id(&self, node_id: usize) -> Option<usize> {
        self.doc.next_sibling_id(node_id)
    }

    pub fn last_child_id(&self, node_id: usize) -> Option<usize> {
        self.doc.nodes[node_id].children.last().copied()
    }

    pub fn element_name(&self, node_id: usize) -> Option<&QualName> {
        self.doc.nodes[node_id].element_data().map(|el| &el.name)
    }

    pub fn create_comment_node(&mut self) -> usize {
        self.doc.create_node(NodeData::Comment)
    }

    pub fn create_text_node(&mut self, text: &str) -> usize {
        self.doc.create_text_node(text)
    }

    /// Create an empty, detached `DocumentFragment`
    pub fn create_fragment(&mut self) -> usize {
        self.doc.create_node(NodeData::Fragment)
    }

    pub fn create_element(&mut self, name: QualName, attrs: Vec<Attribute>) -> usize {
        let data = ElementData::new(name, attrs);
        if data.id().is_some() {
            self.ids_dirty = true;
        }
        self.doc.create_node(NodeData::Element(data))
    }

    /// Create an element in the HTML namespace
    pub fn create_html_element(&mut self, tag: &str, attrs: Vec<Attribute>) -> usize {
        self.create_element(html_name(tag), attrs)
    }

    pub fn shallow_clone_node(&mut self, node_id: usize) -> usize {
        self.doc.shallow_clone_node(node_id)
    }

    /// Expand fragments into their children, detaching those children from the fragment
    fn expand_fragments(&mut self, node_ids: &[usize]) -> Vec<usize> {
        let mut expanded = Vec::with_capacity(node_ids.len());
        for &id in node_ids {
            if self.doc.nodes[id].is_fragment() {
                let children = std::mem::take(&mut self.doc.nodes[id].children);
                for &child in &children {
                    self.doc.nodes[child].parent = None;
                }
                expanded.extend(children);
            } else {
                expanded.push(id);
            }
        }
        expanded
    }

    /// Remove the node from its current parent, if any
    fn detach(&mut self, node_id: usize) {
        if let Some(old_parent_id) = self.doc.nodes[node_id].parent.take() {
            self.doc.nodes[old_parent_id]
                .children
                .retain(|id| *id != node_id);
            self.ids_dirty = true;
        }
    }

    /// Remove all of the children from old_parent_id and append them to new_parent_id
    pub fn reparent_children(&mut self, old_parent_id: usize, new_parent_id: usize) {
        let child_ids = std::mem::take(&mut self.doc.nodes[old_parent_id].children);
        for &child_id in &child_ids {
            self.doc.nodes[child_id].parent = None;
        }
        self.append_children(new_parent_id, &child_ids);
    }

    /// Append the nodes to `parent_id`. Fragments are replaced by their children.
    pub fn append_children(&mut self, parent_id: usize, child_ids: &[usize]) {
        let index = self.doc.nodes[parent_id].children.len();
        self.insert_children_at(parent_id, index, child_ids);
    }

    /// Insert the nodes into `parent_id`'s child list, starting at `index`
    pub fn insert_children_at(&mut self, parent_id: usize, index: usize, child_ids: &[usize]) {
        let child_ids = self.expand_fragments(child_ids);

        // Detaching a node from this same parent may shift the insertion point
        let mut index = index;
        for &child_id in &child_ids {
            if self.doc.nodes[child_id].parent == Some(parent_id) {
                if let Some(pos) = self.doc.nodes[parent_id].index_of_child(child_id) {
                    if pos < index {
                        index -= 1;
                    }
                }
            }
            self.detach(child_id);
        }

        let index = index.min(self.doc.nodes[parent_id].children.len());
        for (offset, &child_id) in child_ids.iter().enumerate() {
            self.doc.nodes[child_id].parent = Some(parent_id);
            self.doc.nodes[parent_id]
                .children
                .insert(index + offset, child_id);
        }
        self.ids_dirty = true;
    }

    pub fn insert_nodes_before(&mut self, anchor_node_id: usize, new_node_ids: &[usize]) {
        let Some(parent_id) = self.doc.nodes[anchor_node_id].parent else {
            return;
        };
        let index = self.doc.nodes[parent_id]
            .index_of_child(anchor_node_id)
            .unwrap_or(0);
        self.insert_children_at(parent_id, index, new_node_ids);
    }

    pub fn insert_nodes_after(&mut self, anchor_node_id: usize, new_node_ids: &[usize]) {
        let Some(parent_id) = self.doc.nodes[anchor_node_id].parent else {
            return;
        };
        let index = self.doc.nodes[parent_id]
            .index_of_child(anchor_node_id)
            .map(|idx| idx + 1)
            .unwrap_or(0);
        self.insert_children_at(parent_id, index, new_node_ids);
    }

    pub fn replace_node_with(&mut self, anchor_node_id: usize, new_node_ids: &[usize]) {
        self.insert_nodes_before(anchor_node_id, new_node_ids);
        self.remove_node(anchor_node_id);
    }

    /// Detach the node from the tree. The node (and its subtree) stays allocated and
    /// can be re-inserted.
    pub fn remove_node(&mut self, node_id: usize) {
        self.forget_selection_within(node_id);
        self.detach(node_id);
    }

    /// Detach the node and free it and its subtree
    pub fn remove_and_drop_node(&mut self, node_id: usize) {
        self.remove_node(node_id);
        let subtree: Vec<usize> = TreeTraverser::new_with_root(self.doc, node_id).collect();
        for id in subtree {
            self.doc.nodes.try_remove(id);
        }
    }

    pub fn remove_node_if_unparented(&mut self, node_id: usize) {
        if let Some(node) = self.doc.get_node(node_id) {
            if node.parent.is_none() {
                self.remove_and_drop_node(node_id);
            }
        }
    }

    /// Remove and free all children of the node
    pub fn remove_children(&mut self, node_id: usize) {
        let children = self.doc.nodes[node_id].children.clone();
        for child_id in children {
            self.remove_and_drop_node(child_id);
        }
    }

    // The selection may not point into a subtree which is leaving the document
    fn forget_selection_within(&mut self, node_id: usize) {
        let doc = &*self.doc;
        let touches = [doc.selection.anchor.node, doc.selection.focus.node]
            .into_iter()
            .flatten()
            .any(|endpoint| {
                doc.nodes.contains(endpoint) && doc.is_inclusive_ancestor(node_id, endpoint)
            });
        if touches {
            self.doc.selection.clear();
        }
    }

    pub fn append_text_to_node(&mut self, node_id: usize, text: &str) -> Result<(), AppendTextErr> {
        match self.doc.nodes[node_id].text_data_mut() {
            Some(data) => {
                data.content += text;
                Ok(())
            }
            None => Err(AppendTextErr::NotTextNode),
        }
    }

    pub fn set_node_text(&mut self, node_id: usize, value: &str) {
        let node = &mut self.doc.nodes[node_id];

        let text = match node.data {
            NodeData::Text(ref mut text) => text,
            _ => return,
        };

        if text.content != value {
            text.content.clear();
            text.content.push_str(value);
        }
    }

    /// Replace all children of the node with a single text node (`innerText = value`)
    pub fn set_text_content(&mut self, node_id: usize, value: &str) {
        self.remove_children(node_id);
        if !value.is_empty() {
            let text_id = self.create_text_node(value);
            self.append_children(node_id, &[text_id]);
        }
    }

    pub fn add_attrs_if_missing(&mut self, node_id: usize, attrs: Vec<Attribute>) {
        for attr in attrs {
            let exists = self.doc.nodes[node_id]
                .attr(&attr.name.local)
                .is_some();
            if !exists {
                self.set_attribute(node_id, &attr.name.local, &attr.value);
            }
        }
    }

    pub fn set_attribute(&mut self, node_id: usize, name: &str, value: &str) {
        let Some(element) = self.doc.nodes[node_id].element_data_mut() else {
            return;
        };
        element.attrs.set(name, value);
        if name == "id" {
            self.ids_dirty = true;
        }
    }

    pub fn clear_attribute(&mut self, node_id: usize, name: &str) {
        let Some(element) = self.doc.nodes[node_id].element_data_mut() else {
            return;
        };
        let removed = element.attrs.remove(name);
        if removed.is_some() && name == "id" {
            self.ids_dirty = true;
        }
    }

    pub fn add_class(&mut self, node_id: usize, class: &str) -> bool {
        self.doc.nodes[node_id]
            .element_data_mut()
            .is_some_and(|el| el.add_class(class))
    }

    pub fn remove_class(&mut self, node_id: usize, class: &str) -> bool {
        self.doc.nodes[node_id]
            .element_data_mut()
            .is_some_and(|el| el.remove_class(class))
    }

    /// Toggle the class, returning whether it is now present (`classList.toggle`)
    pub fn toggle_class(&mut self, node_id: usize, class: &str) -> bool {
        if self.remove_class(node_id, class) {
            false
        } else {
            self.add_class(node_id, class)
        }
    }

    /// Add the class if `present`, otherwise remove it
    pub fn set_class(&mut self, node_id: usize, class: &str, present: bool) {
        if present {
            self.add_class(node_id, class);
        } else {
            self.remove_class(node_id, class);
        }
    }

    pub fn set_style_property(&mut self, node_id: usize, name: &str, value: &str) {
        if let Some(el) = self.doc.nodes[node_id].element_data_mut() {
            el.set_style_property(name, value);
        }
    }

    pub fn remove_style_property(&mut self, node_id: usize, name: &str) {
        if let Some(el) = self.doc.nodes[node_id].element_data_mut() {
            el.remove_style_property(name);
        }
    }

    pub fn flush(&mut self) {
        if !self.ids_dirty {
            return;
        }
        self.ids_dirty = false;

        // The first connected element in tree order wins, as with getElementById
        let mut ids = std::collections::HashMap::new();
        for node_id in TreeTraverser::new(self.doc) {
            if let Some(id) = self.doc.nodes[node_id].attr("id") {
                ids.entry(id.to_string()).or_insert(node_id);
            }
        }
        self.doc.nodes_to_id = ids;
    }
}
