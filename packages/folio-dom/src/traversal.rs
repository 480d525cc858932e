use std::cmp::Ordering;

use crate::{BaseDocument, NodeData};

/// Walks a subtree in pre-order (document order), yielding node ids
#[derive(Clone)]
pub struct TreeTraverser<'a> {
    doc: &'a BaseDocument,
    stack: Vec<usize>,
}

impl<'a> TreeTraverser<'a> {
    pub fn new(doc: &'a BaseDocument) -> Self {
        Self::new_with_root(doc, 0)
    }

    /// Traverse the subtree rooted at `root`, starting with `root` itself
    pub fn new_with_root(doc: &'a BaseDocument, root: usize) -> Self {
        TreeTraverser {
            doc,
            stack: vec![root],
        }
    }
}
impl Iterator for TreeTraverser<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = self.doc.get_node(id)?;
        self.stack.extend(node.children.iter().rev());
        Some(id)
    }
}

/// Yields the ancestors of a node, nearest first. The node itself is not included.
#[derive(Clone)]
pub struct AncestorTraverser<'a> {
    doc: &'a BaseDocument,
    current: usize,
}
impl<'a> AncestorTraverser<'a> {
    pub fn new(doc: &'a BaseDocument, node_id: usize) -> Self {
        AncestorTraverser {
            doc,
            current: node_id,
        }
    }
}
impl Iterator for AncestorTraverser<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        let parent = self.doc.get_node(self.current)?.parent?;
        self.current = parent;
        Some(parent)
    }
}

impl BaseDocument {
    /// The event path of a node: the node followed by its ancestors, nearest first
    pub fn node_chain(&self, node_id: usize) -> Vec<usize> {
        std::iter::once(node_id)
            .chain(AncestorTraverser::new(self, node_id))
            .collect()
    }

    /// Whether `ancestor` is `node` or one of its ancestors (`Node.contains`)
    pub fn is_inclusive_ancestor(&self, ancestor: usize, node: usize) -> bool {
        node == ancestor || AncestorTraverser::new(self, node).any(|id| id == ancestor)
    }

    /// Whether the node is reachable from the document node
    pub fn is_connected(&self, node_id: usize) -> bool {
        self.nodes.contains(node_id) && self.root_of(node_id) == 0
    }

    /// The topmost ancestor of the node (the node itself if it has no parent)
    pub fn root_of(&self, node_id: usize) -> usize {
        AncestorTraverser::new(self, node_id)
            .last()
            .unwrap_or(node_id)
    }

    /// The deepest node which is an inclusive ancestor of both `a` and `b`
    pub fn common_ancestor(&self, a: usize, b: usize) -> Option<usize> {
        std::iter::once(a)
            .chain(AncestorTraverser::new(self, a))
            .find(|candidate| self.is_inclusive_ancestor(*candidate, b))
    }

    pub fn child_index(&self, node_id: usize) -> Option<usize> {
        let parent = self.nodes.get(node_id)?.parent?;
        self.nodes[parent].index_of_child(node_id)
    }

    pub fn next_sibling_id(&self, node_id: usize) -> Option<usize> {
        let parent = self.nodes.get(node_id)?.parent?;
        let idx = self.child_index(node_id)?;
        self.nodes[parent].children.get(idx + 1).copied()
    }

    pub fn previous_sibling_id(&self, node_id: usize) -> Option<usize> {
        let parent = self.nodes.get(node_id)?.parent?;
        let idx = self.child_index(node_id)?;
        idx.checked_sub(1)
            .map(|prev| self.nodes[parent].children[prev])
    }

    /// Child indices from the root of the node's tree down to the node
    pub(crate) fn tree_path(&self, node_id: usize) -> Vec<usize> {
        let mut path = Vec::new();
        let mut current = node_id;
        while let Some(idx) = self.child_index(current) {
            path.push(idx);
            current = self.nodes[current].parent.unwrap_or(current);
        }
        path.reverse();
        path
    }

    /// Compare the position of two nodes of the same tree in pre-order
    pub fn compare_tree_order(&self, a: usize, b: usize) -> Ordering {
        self.tree_path(a).cmp(&self.tree_path(b))
    }

    /// The concatenated data of all descendant text nodes (`Node.textContent`)
    pub fn text_content(&self, node_id: usize) -> String {
        let mut out = String::new();
        TreeTraverser::new_with_root(self, node_id).for_each(|id| {
            if let NodeData::Text(data) = &self.nodes[id].data {
                out.push_str(&data.content);
            }
        });
        out
    }

    /// The elements below `root` (excluding `root`) in document order
    pub fn descendant_elements(&self, root: usize) -> impl Iterator<Item = usize> + '_ {
        TreeTraverser::new_with_root(self, root)
            .skip(1)
            .filter(|id| self.nodes[*id].is_element())
    }
}
