use folio_dom::{BaseDocument, SelectionSnapshot};

use super::TooltipCommand;
use super::positioner::{TooltipOffsets, position_tooltip};

/// Decides what the tooltip does when the pointer is released.
#[derive(Debug, Clone, Copy)]
pub struct SelectionWatcher {
    /// The element whose text may be highlighted
    pub container: usize,
    /// The tooltip element
    pub tooltip: usize,
    pub offsets: TooltipOffsets,
}

impl SelectionWatcher {
    /// Shows the tooltip above a non-blank selection that starts inside the content
    /// container. Otherwise hides it, unless the pointer was released over the
    /// tooltip itself so that its buttons still receive the click.
    ///
    /// Reads nothing but its arguments and the document, so calling it twice on an
    /// unchanged document yields the same command.
    pub fn watch_pointer_up(
        &self,
        doc: &BaseDocument,
        snapshot: Option<&SelectionSnapshot>,
        target: usize,
    ) -> TooltipCommand {
        if let Some(snapshot) = snapshot.filter(|snapshot| snapshot.has_text()) {
            if doc.is_inclusive_ancestor(self.container, snapshot.anchor_node) {
                let rect = snapshot.rect.unwrap_or_default();
                let scroll_y = doc.viewport_scroll().y;
                return TooltipCommand::Show(position_tooltip(rect, scroll_y, self.offsets));
            }
        }

        if doc.is_inclusive_ancestor(self.tooltip, target) {
            TooltipCommand::Keep
        } else {
            TooltipCommand::Hide
        }
    }
}
