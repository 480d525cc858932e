//! The document's global text selection.
//!
//! The selection is owned by the [`BaseDocument`] and changes only through the
//! methods below. Handlers should not read it piecemeal: they capture a
//! [`SelectionSnapshot`] on entry and work from that value.

use folio_traits::Rect;

use crate::range::{BoundaryPoint, Range, RangeError};
use crate::BaseDocument;

/// Represents one endpoint (anchor or focus) of a text selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectionEndpoint {
    pub(crate) node: Option<usize>,
    /// Byte offset within a text node, or child index within any other node
    pub offset: usize,
}

impl SelectionEndpoint {
    /// Create a new endpoint at the given node and offset
    fn new(node: usize, offset: usize) -> Self {
        Self {
            node: Some(node),
            offset,
        }
    }

    /// Check if this endpoint is set
    pub fn is_some(&self) -> bool {
        self.node.is_some()
    }

    pub fn node(&self) -> Option<usize> {
        self.node
    }

    /// Clear this endpoint
    pub fn clear(&mut self) {
        self.node = None;
        self.offset = 0;
    }

    fn point(&self) -> Option<BoundaryPoint> {
        Some(BoundaryPoint::new(self.node?, self.offset))
    }
}

/// Text selection state.
///
/// Tracks both the anchor (where selection started) and focus (where it currently ends).
/// The anchor may come after the focus for backwards selections.
#[derive(Clone, Debug, Default)]
pub struct TextSelection {
    /// The anchor point (where selection started via mousedown)
    pub anchor: SelectionEndpoint,
    /// The focus point (where selection currently ends, updated during drag)
    pub focus: SelectionEndpoint,
}

impl TextSelection {
    /// Create a selection spanning from anchor to focus
    pub fn new(
        anchor_node: usize,
        anchor_offset: usize,
        focus_node: usize,
        focus_offset: usize,
    ) -> Self {
        Self {
            anchor: SelectionEndpoint::new(anchor_node, anchor_offset),
            focus: SelectionEndpoint::new(focus_node, focus_offset),
        }
    }

    /// Whether the selection holds a range (`Selection.rangeCount > 0`)
    pub fn has_range(&self) -> bool {
        self.anchor.is_some() && self.focus.is_some()
    }

    /// Check if there is an active (non-collapsed) selection.
    pub fn is_active(&self) -> bool {
        self.has_range() && self.anchor != self.focus
    }

    /// Clear the selection
    pub fn clear(&mut self) {
        self.anchor.clear();
        self.focus.clear();
    }
}

/// An immutable capture of the selection at the moment a handler started.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectionSnapshot {
    /// The node where the selection started
    pub anchor_node: usize,
    /// The selection as an ordered range
    pub range: Range,
    /// The selected text (`Selection.toString()`)
    pub text: String,
    /// Bounding rectangle of the range in viewport coordinates, if any of it has
    /// known geometry
    pub rect: Option<Rect>,
}

impl SelectionSnapshot {
    /// Whether the selection contains anything other than whitespace
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

impl BaseDocument {
    pub fn selection(&self) -> &TextSelection {
        &self.selection
    }

    /// Replace the selection. Both endpoints must be valid boundary points in the
    /// document.
    pub fn set_selection(
        &mut self,
        anchor_node: usize,
        anchor_offset: usize,
        focus_node: usize,
        focus_offset: usize,
    ) -> Result<(), RangeError> {
        self.validate_point(BoundaryPoint::new(anchor_node, anchor_offset))?;
        self.validate_point(BoundaryPoint::new(focus_node, focus_offset))?;
        self.selection = TextSelection::new(anchor_node, anchor_offset, focus_node, focus_offset);
        Ok(())
    }

    /// Select everything inside the node (`Selection.selectAllChildren`)
    pub fn select_node_contents(&mut self, node_id: usize) -> Result<(), RangeError> {
        let length = self
            .get_node(node_id)
            .ok_or(RangeError::NoSuchNode(node_id))?
            .length();
        self.set_selection(node_id, 0, node_id, length)
    }

    /// `Selection.removeAllRanges()`
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// The selection as an ordered range (`Selection.getRangeAt(0)`)
    pub fn selection_range(&self) -> Option<Range> {
        let anchor = self.selection.anchor.point()?;
        let focus = self.selection.focus.point()?;
        Some(self.range_between(anchor, focus))
    }

    /// Capture the current selection. Returns `None` if there is no selection or it
    /// no longer points at valid positions.
    pub fn selection_snapshot(&self) -> Option<SelectionSnapshot> {
        let anchor_node = self.selection.anchor.node?;
        let range = self.selection_range()?;
        if self.validate_range(&range).is_err() {
            return None;
        }
        Some(SelectionSnapshot {
            anchor_node,
            range,
            text: self.range_text(&range),
            rect: self.range_rect(&range),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{BaseDocument, BoundaryPoint, DocumentConfig};

    fn doc_with_text(text: &str) -> (BaseDocument, usize, usize) {
        let mut doc = BaseDocument::new(DocumentConfig::default());
        let mut mutr = doc.mutate();
        let p = mutr.create_html_element("p", vec![]);
        let t = mutr.create_text_node(text);
        mutr.append_children(0, &[p]);
        mutr.append_children(p, &[t]);
        drop(mutr);
        (doc, p, t)
    }

    #[test]
    fn backwards_selection_snapshots_as_ordered_range() {
        let (mut doc, _, t) = doc_with_text("hello world");
        doc.set_selection(t, 11, t, 6).unwrap();
        assert!(doc.selection().is_active());

        let snapshot = doc.selection_snapshot().unwrap();
        assert_eq!(snapshot.anchor_node, t);
        assert_eq!(snapshot.range.start, BoundaryPoint::new(t, 6));
        assert_eq!(snapshot.range.end, BoundaryPoint::new(t, 11));
        assert_eq!(snapshot.text, "world");
        assert!(snapshot.has_text());
        assert_eq!(snapshot.rect, None);
    }

    #[test]
    fn whitespace_selection_has_no_text() {
        let (mut doc, p, _) = doc_with_text("   ");
        doc.select_node_contents(p).unwrap();
        let snapshot = doc.selection_snapshot().unwrap();
        assert_eq!(snapshot.text, "   ");
        assert!(!snapshot.has_text());
    }

    #[test]
    fn invalid_endpoints_are_rejected_and_removal_clears() {
        let (mut doc, p, t) = doc_with_text("hello");
        assert!(doc.set_selection(t, 0, t, 9).is_err());
        assert!(!doc.selection().has_range());

        doc.set_selection(t, 0, t, 5).unwrap();
        doc.mutate().remove_node(p);
        assert!(!doc.selection().has_range());
        assert_eq!(doc.selection_snapshot(), None);
    }
}
