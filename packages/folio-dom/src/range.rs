//! DOM ranges: boundary points, comparison, serialization, geometry and the
//! mutations used to wrap a range in a new element.

use std::cmp::Ordering;

use folio_traits::Rect;
use thiserror::Error;

use crate::{BaseDocument, DocumentMutator, NodeData};

/// A `(node, offset)` pair. For text nodes the offset is a byte offset into the
/// text; for every other node it is a child index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoundaryPoint {
    pub node: usize,
    pub offset: usize,
}

impl BoundaryPoint {
    pub fn new(node: usize, offset: usize) -> Self {
        Self { node, offset }
    }
}

/// An ordered pair of boundary points (`start` is never after `end`)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Range {
    pub start: BoundaryPoint,
    pub end: BoundaryPoint,
}

impl Range {
    pub fn new(start: BoundaryPoint, end: BoundaryPoint) -> Self {
        Self { start, end }
    }

    pub fn collapsed(point: BoundaryPoint) -> Self {
        Self {
            start: point,
            end: point,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("node {0} does not exist")]
    NoSuchNode(usize),
    #[error("node {0} is not connected to the document")]
    Detached(usize),
    #[error("offset {offset} is out of bounds for node {node} (length {length})")]
    IndexSize {
        node: usize,
        offset: usize,
        length: usize,
    },
    #[error("offset {offset} of text node {node} is not on a character boundary")]
    NotCharBoundary { node: usize, offset: usize },
    #[error("range start is after range end")]
    Backwards,
    #[error("range partially contains a non-text node")]
    PartiallyContainsElement,
}

impl BaseDocument {
    pub fn validate_point(&self, point: BoundaryPoint) -> Result<(), RangeError> {
        let node = self
            .get_node(point.node)
            .ok_or(RangeError::NoSuchNode(point.node))?;
        if !self.is_connected(point.node) {
            return Err(RangeError::Detached(point.node));
        }
        let length = node.length();
        if point.offset > length {
            return Err(RangeError::IndexSize {
                node: point.node,
                offset: point.offset,
                length,
            });
        }
        if let NodeData::Text(text) = &node.data {
            if !text.content.is_char_boundary(point.offset) {
                return Err(RangeError::NotCharBoundary {
                    node: point.node,
                    offset: point.offset,
                });
            }
        }
        Ok(())
    }

    /// Check that both boundary points are valid, connected and correctly ordered
    pub fn validate_range(&self, range: &Range) -> Result<(), RangeError> {
        self.validate_point(range.start)?;
        self.validate_point(range.end)?;
        if self.compare_points(range.start, range.end) == Ordering::Greater {
            return Err(RangeError::Backwards);
        }
        Ok(())
    }

    /// Build a range from two points given in either order
    pub fn range_between(&self, a: BoundaryPoint, b: BoundaryPoint) -> Range {
        match self.compare_points(a, b) {
            Ordering::Greater => Range::new(b, a),
            _ => Range::new(a, b),
        }
    }

    /// The position of boundary point `a` relative to boundary point `b`
    pub fn compare_points(&self, a: BoundaryPoint, b: BoundaryPoint) -> Ordering {
        if a.node == b.node {
            return a.offset.cmp(&b.offset);
        }

        if self.compare_tree_order(a.node, b.node) == Ordering::Greater {
            return self.compare_points(b, a).reverse();
        }

        if self.is_inclusive_ancestor(a.node, b.node) {
            let mut child = b.node;
            while let Some(parent) = self.nodes[child].parent {
                if parent == a.node {
                    break;
                }
                child = parent;
            }
            let child_index = self.child_index(child).unwrap_or(0);
            if child_index < a.offset {
                return Ordering::Greater;
            }
        }

        Ordering::Less
    }

    /// Whether the whole node lies inside the range
    pub fn is_contained(&self, node_id: usize, range: &Range) -> bool {
        let length = self.nodes[node_id].length();
        self.compare_points(BoundaryPoint::new(node_id, 0), range.start) == Ordering::Greater
            && self.compare_points(BoundaryPoint::new(node_id, length), range.end)
                == Ordering::Less
    }

    /// Whether some non-text node is an inclusive ancestor of one boundary but not
    /// the other. Such a range cannot be wrapped in place.
    pub fn has_partially_contained_element(&self, range: &Range) -> bool {
        let start_chain = self.inclusive_ancestors(range.start.node);
        let end_chain = self.inclusive_ancestors(range.end.node);
        let partial = |id: &usize, other: &[usize]| {
            !other.contains(id) && !self.nodes[*id].is_text_node()
        };
        start_chain.iter().any(|id| partial(id, &end_chain))
            || end_chain.iter().any(|id| partial(id, &start_chain))
    }

    fn inclusive_ancestors(&self, node_id: usize) -> Vec<usize> {
        let mut chain = vec![node_id];
        chain.extend(crate::traversal::AncestorTraverser::new(self, node_id));
        chain
    }

    /// The text nodes touched by the range, with the selected byte range of each
    pub fn text_segments(&self, range: &Range) -> Vec<(usize, std::ops::Range<usize>)> {
        let Some(common) = self.common_ancestor(range.start.node, range.end.node) else {
            return Vec::new();
        };

        crate::traversal::TreeTraverser::new_with_root(self, common)
            .filter_map(|id| {
                let text = self.nodes[id].text_data()?;
                let length = text.content.len();
                let node_start = BoundaryPoint::new(id, 0);
                let node_end = BoundaryPoint::new(id, length);
                if self.compare_points(node_end, range.start) != Ordering::Greater
                    || self.compare_points(node_start, range.end) != Ordering::Less
                {
                    return None;
                }
                let from = if id == range.start.node {
                    range.start.offset
                } else {
                    0
                };
                let to = if id == range.end.node {
                    range.end.offset
                } else {
                    length
                };
                (from < to).then_some((id, from..to))
            })
            .collect()
    }

    /// Serialize the range's text (`Range.toString()`)
    pub fn range_text(&self, range: &Range) -> String {
        let mut out = String::new();
        for (id, bytes) in self.text_segments(range) {
            if let Some(text) = self.nodes[id].text_data() {
                out.push_str(&text.content[bytes]);
            }
        }
        out
    }

    /// The bounding rectangle of the range in viewport coordinates
    /// (`Range.getBoundingClientRect()`).
    ///
    /// Partially selected text nodes are measured by interpolating over the
    /// characters of their (single line) box.
    pub fn range_rect(&self, range: &Range) -> Option<Rect> {
        let mut rect: Option<Rect> = None;
        for (id, bytes) in self.text_segments(range) {
            let node = &self.nodes[id];
            let (Some(node_rect), Some(text)) = (node.client_rect, node.text_data()) else {
                continue;
            };
            let total = text.content.chars().count().max(1) as f64;
            let before = text.content[..bytes.start].chars().count() as f64;
            let selected = text.content[bytes].chars().count() as f64;
            let segment = Rect::new(
                node_rect.left + node_rect.width * before / total,
                node_rect.top,
                node_rect.width * selected / total,
                node_rect.height,
            );
            rect = Some(match rect {
                Some(rect) => rect.union(&segment),
                None => segment,
            });
        }

        // Fall back to the box of the nearest laid-out ancestor
        rect.or_else(|| {
            std::iter::once(range.start.node)
                .chain(crate::traversal::AncestorTraverser::new(self, range.start.node))
                .find_map(|id| self.nodes[id].client_rect)
        })
    }
}

impl DocumentMutator<'_> {
    /// Split a text node at `offset` (`Text.splitText`). The tail is inserted after the
    /// original node and its id returned.
    pub fn split_text(&mut self, node_id: usize, offset: usize) -> Result<usize, RangeError> {
        let node = self
            .doc
            .get_node_mut(node_id)
            .ok_or(RangeError::NoSuchNode(node_id))?;
        let Some(text) = node.text_data_mut() else {
            return Err(RangeError::NoSuchNode(node_id));
        };
        let length = text.content.len();
        if offset > length {
            return Err(RangeError::IndexSize {
                node: node_id,
                offset,
                length,
            });
        }
        if !text.content.is_char_boundary(offset) {
            return Err(RangeError::NotCharBoundary {
                node: node_id,
                offset,
            });
        }
        let tail = text.content.split_off(offset);
        let tail_id = self.create_text_node(&tail);
        self.insert_nodes_after(node_id, &[tail_id]);
        Ok(tail_id)
    }

    /// Remove `from..to` from a text node's data and return it
    fn take_text(&mut self, node_id: usize, from: usize, to: usize) -> String {
        match self.doc.nodes[node_id].text_data_mut() {
            Some(text) => text.content.drain(from..to).collect(),
            None => String::new(),
        }
    }

    /// Move the contents of the range into a new detached fragment
    /// (`Range.extractContents`).
    ///
    /// Elements which are only partially inside the range stay in place; a shallow
    /// clone of each receives the extracted part of its subtree. Returns the
    /// fragment and the point the range collapses to.
    pub fn extract_contents(
        &mut self,
        range: Range,
    ) -> Result<(usize, BoundaryPoint), RangeError> {
        self.doc.validate_range(&range)?;
        Ok(self.extract_validated(range))
    }

    fn extract_validated(&mut self, range: Range) -> (usize, BoundaryPoint) {
        let fragment = self.create_fragment();
        let Range { start, end } = range;
        if range.is_collapsed() {
            return (fragment, start);
        }

        if start.node == end.node && self.doc.nodes[start.node].is_text_node() {
            let text = self.take_text(start.node, start.offset, end.offset);
            let clone = self.create_text_node(&text);
            self.append_children(fragment, &[clone]);
            return (fragment, start);
        }

        let common = self
            .doc
            .common_ancestor(start.node, end.node)
            .unwrap_or(0);
        let child_of_common = |doc: &BaseDocument, node: usize| {
            let mut child = node;
            while let Some(parent) = doc.nodes[child].parent {
                if parent == common {
                    break;
                }
                child = parent;
            }
            child
        };

        let first_partial = (!self.doc.is_inclusive_ancestor(start.node, end.node))
            .then(|| child_of_common(&*self.doc, start.node));
        let last_partial = (!self.doc.is_inclusive_ancestor(end.node, start.node))
            .then(|| child_of_common(&*self.doc, end.node));
        let contained: Vec<usize> = self.doc.nodes[common]
            .children
            .iter()
            .copied()
            .filter(|child| self.doc.is_contained(*child, &range))
            .collect();

        let collapse_point = if self.doc.is_inclusive_ancestor(start.node, end.node) {
            start
        } else {
            let reference = child_of_common(&*self.doc, start.node);
            let index = self.doc.child_index(reference).unwrap_or(0);
            BoundaryPoint::new(common, index + 1)
        };

        if let Some(first) = first_partial {
            if self.doc.nodes[first].is_element() {
                let clone = self.shallow_clone_node(first);
                self.append_children(fragment, &[clone]);
                let length = self.doc.nodes[first].length();
                let sub_range = Range::new(start, BoundaryPoint::new(first, length));
                let (sub_fragment, _) = self.extract_validated(sub_range);
                self.append_children(clone, &[sub_fragment]);
                self.remove_and_drop_node(sub_fragment);
            } else {
                let length = self.doc.nodes[first].length();
                let text = self.take_text(first, start.offset, length);
                let clone = self.create_text_node(&text);
                self.append_children(fragment, &[clone]);
            }
        }

        self.append_children(fragment, &contained);

        if let Some(last) = last_partial {
            if self.doc.nodes[last].is_element() {
                let clone = self.shallow_clone_node(last);
                self.append_children(fragment, &[clone]);
                let sub_range = Range::new(BoundaryPoint::new(last, 0), end);
                let (sub_fragment, _) = self.extract_validated(sub_range);
                self.append_children(clone, &[sub_fragment]);
                self.remove_and_drop_node(sub_fragment);
            } else {
                let text = self.take_text(last, 0, end.offset);
                let clone = self.create_text_node(&text);
                self.append_children(fragment, &[clone]);
            }
        }

        (fragment, collapse_point)
    }

    /// Insert a node at a boundary point, splitting a text node if the point falls
    /// inside one (`Range.insertNode` on a collapsed range).
    pub fn insert_at_point(
        &mut self,
        point: BoundaryPoint,
        node_id: usize,
    ) -> Result<(), RangeError> {
        self.doc.validate_point(point)?;
        let node = &self.doc.nodes[point.node];
        if !node.is_text_node() {
            self.insert_children_at(point.node, point.offset, &[node_id]);
            return Ok(());
        }

        let length = node.length();
        let parent = node.parent.ok_or(RangeError::Detached(point.node))?;
        let index = self.doc.child_index(point.node).unwrap_or(0);
        let insert_index = if point.offset == 0 {
            index
        } else if point.offset == length {
            index + 1
        } else {
            self.split_text(point.node, point.offset)?;
            index + 1
        };
        self.insert_children_at(parent, insert_index, &[node_id]);
        Ok(())
    }

    /// Wrap the range in `wrapper` by moving the covered nodes, without cloning
    /// anything. Text nodes at the boundaries are split.
    ///
    /// Fails with [`RangeError::PartiallyContainsElement`] (leaving the document
    /// untouched) when an element straddles a boundary.
    pub fn surround_in_place(&mut self, range: Range, wrapper: usize) -> Result<(), RangeError> {
        self.doc.validate_range(&range)?;
        if self.doc.has_partially_contained_element(&range) {
            return Err(RangeError::PartiallyContainsElement);
        }

        let Range { start, end } = range;
        let start_is_text = self.doc.nodes[start.node].is_text_node();
        let end_is_text = self.doc.nodes[end.node].is_text_node();

        // With no partially contained element both boundaries resolve to the same parent
        let parent = if start_is_text {
            self.doc.nodes[start.node]
                .parent
                .ok_or(RangeError::Detached(start.node))?
        } else {
            start.node
        };

        // Child index where the wrapped run begins
        let mut end = end;
        let first_index = if start_is_text {
            let index = self.doc.child_index(start.node).unwrap_or(0);
            let length = self.doc.nodes[start.node].length();
            if start.offset == 0 {
                index
            } else if start.offset == length {
                index + 1
            } else {
                let tail = self.split_text(start.node, start.offset)?;
                if end.node == start.node {
                    end = BoundaryPoint::new(tail, end.offset - start.offset);
                } else if !end_is_text && end.node == parent && end.offset > index {
                    end.offset += 1;
                }
                index + 1
            }
        } else {
            start.offset
        };

        // Child index just past the end of the wrapped run
        let end_index = if self.doc.nodes[end.node].is_text_node() {
            let index = self.doc.child_index(end.node).unwrap_or(0);
            if end.offset == 0 {
                index
            } else {
                if end.offset < self.doc.nodes[end.node].length() {
                    self.split_text(end.node, end.offset)?;
                }
                index + 1
            }
        } else {
            end.offset
        };

        let run: Vec<usize> = self.doc.nodes[parent]
            .children
            .get(first_index..end_index)
            .map(<[usize]>::to_vec)
            .unwrap_or_default();
        self.append_children(wrapper, &run);
        self.insert_children_at(parent, first_index, &[wrapper]);
        Ok(())
    }

    /// Remove text nodes with no data below (and including) `root`
    pub fn remove_empty_text_nodes(&mut self, root: usize) {
        let empty: Vec<usize> = crate::traversal::TreeTraverser::new_with_root(self.doc, root)
            .filter(|id| {
                self.doc.nodes[*id]
                    .text_data()
                    .is_some_and(|text| text.content.is_empty())
            })
            .collect();
        for id in empty {
            self.remove_and_drop_node(id);
        }
    }
}
