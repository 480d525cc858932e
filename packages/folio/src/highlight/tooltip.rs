use folio_dom::BaseDocument;

use super::positioner::TooltipPosition;
use crate::HIDDEN_CLASS;

/// What the tooltip should do in response to a pointer release
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TooltipCommand {
    Show(TooltipPosition),
    Hide,
    /// Leave the tooltip as it is
    Keep,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TooltipState {
    #[default]
    Hidden,
    Visible(TooltipPosition),
}

impl TooltipState {
    pub fn is_visible(&self) -> bool {
        matches!(self, TooltipState::Visible(_))
    }

    pub fn position(&self) -> Option<TooltipPosition> {
        match self {
            TooltipState::Visible(position) => Some(*position),
            TooltipState::Hidden => None,
        }
    }

    /// The state after running `command`
    pub fn apply(self, command: TooltipCommand) -> TooltipState {
        match command {
            TooltipCommand::Show(position) => TooltipState::Visible(position),
            TooltipCommand::Hide => TooltipState::Hidden,
            TooltipCommand::Keep => self,
        }
    }
}

/// Mirror the state onto the tooltip element: visibility through the hidden class,
/// position through inline `left`/`top`.
pub(crate) fn sync_tooltip(doc: &mut BaseDocument, tooltip: usize, state: TooltipState) {
    let mut mutr = doc.mutate();
    match state {
        TooltipState::Visible(position) => {
            mutr.set_style_property(tooltip, "left", &format!("{}px", position.left));
            mutr.set_style_property(tooltip, "top", &format!("{}px", position.top));
            mutr.remove_class(tooltip, HIDDEN_CLASS);
        }
        TooltipState::Hidden => {
            mutr.add_class(tooltip, HIDDEN_CLASS);
        }
    }
}
