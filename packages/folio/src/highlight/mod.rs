//! The selection highlight tool: a floating tooltip that follows non-empty
//! selections inside the content container and wraps the selection in a
//! highlight span when one of its buttons is clicked.

mod applier;
mod positioner;
mod tooltip;
mod watcher;

pub use applier::{
    ApplyOutcome, FormatAction, HighlightColor, WrapStrategy, apply_format, apply_highlight,
    choose_strategy, wrap_selection,
};
pub use positioner::{TooltipOffsets, TooltipPosition, position_tooltip};
pub use tooltip::{TooltipCommand, TooltipState};
pub use watcher::SelectionWatcher;

use folio_dom::{BaseDocument, SelectorList};
use folio_traits::{DomEvent, EventState};

use crate::EnhanceConfig;

#[derive(Debug, Clone, PartialEq)]
enum TooltipAction {
    Highlight(HighlightColor),
    Format(FormatAction),
}

pub struct HighlightTool {
    watcher: SelectionWatcher,
    state: TooltipState,
    class_prefix: String,
    /// Tooltip buttons and what they do
    buttons: Vec<(usize, TooltipAction)>,
}

impl HighlightTool {
    /// Locate the content container and tooltip. Returns `None` if either is missing.
    pub fn install(
        doc: &BaseDocument,
        config: &EnhanceConfig,
    ) -> Result<Option<Self>, folio_dom::SelectorError> {
        let container = doc.query_selector(&config.content_selector)?;
        let tooltip = doc.query_selector(&config.tooltip_selector)?;
        let (Some(container), Some(tooltip)) = (container, tooltip) else {
            return Ok(None);
        };

        let highlight_buttons = SelectorList::parse(&config.highlight_button_selector)?;
        let format_buttons = SelectorList::parse(&config.format_button_selector)?;

        let mut buttons = Vec::new();
        for id in doc.query_selector_all_in_raw(tooltip, &highlight_buttons) {
            if let Some(color) = doc.get_node(id).and_then(|node| node.element_data()?.data("color")) {
                buttons.push((id, TooltipAction::Highlight(HighlightColor::from(color))));
            }
        }
        for id in doc.query_selector_all_in_raw(tooltip, &format_buttons) {
            if let Some(format) = doc.get_node(id).and_then(|node| node.element_data()?.data("format")) {
                buttons.push((id, TooltipAction::Format(FormatAction::from(format))));
            }
        }

        let tool = HighlightTool {
            watcher: SelectionWatcher {
                container,
                tooltip,
                offsets: config.tooltip_offsets,
            },
            state: TooltipState::Hidden,
            class_prefix: config.highlight_class_prefix.clone(),
            buttons,
        };
        Ok(Some(tool))
    }

    pub fn state(&self) -> TooltipState {
        self.state
    }

    pub fn watcher(&self) -> &SelectionWatcher {
        &self.watcher
    }

    pub fn container(&self) -> usize {
        self.watcher.container
    }

    pub fn tooltip(&self) -> usize {
        self.watcher.tooltip
    }

    /// Document-level `mouseup` listener
    pub fn on_pointer_up(&mut self, doc: &mut BaseDocument, target: usize) {
        let snapshot = doc.selection_snapshot();
        let command = self.watcher.watch_pointer_up(doc, snapshot.as_ref(), target);
        self.run_command(doc, command);
    }

    /// Listener on the tooltip buttons. Returns whether `node_id` is one of them.
    pub fn on_click(
        &mut self,
        doc: &mut BaseDocument,
        node_id: usize,
        event: &mut DomEvent,
        event_state: &mut EventState,
    ) -> bool {
        let Some(action) = self
            .buttons
            .iter()
            .find(|(id, _)| *id == node_id)
            .map(|(_, action)| action.clone())
        else {
            return false;
        };

        event.prevent_default();
        event_state.prevent_default();
        match action {
            TooltipAction::Highlight(color) => {
                self.highlight(doc, &color);
            }
            TooltipAction::Format(format) => {
                apply_format(doc, &format);
                self.run_command(doc, TooltipCommand::Hide);
            }
        }
        true
    }

    /// Highlight the current selection with `color` and hide the tooltip
    pub fn highlight(&mut self, doc: &mut BaseDocument, color: &HighlightColor) -> ApplyOutcome {
        let outcome = apply_highlight(doc, color, &self.class_prefix);
        self.run_command(doc, TooltipCommand::Hide);
        outcome
    }

    fn run_command(&mut self, doc: &mut BaseDocument, command: TooltipCommand) {
        if command == TooltipCommand::Keep {
            return;
        }
        self.state = self.state.apply(command);
        #[cfg(feature = "tracing")]
        tracing::debug!(state = ?self.state, "tooltip");
        tooltip::sync_tooltip(doc, self.watcher.tooltip, self.state);
    }
}
