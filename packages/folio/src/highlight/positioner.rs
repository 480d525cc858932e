use folio_traits::Rect;
use serde::{Deserialize, Serialize};

/// Distance of the tooltip's top-left corner from the centre-top of the selection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipOffsets {
    /// Subtracted from the selection's horizontal centre (half the tooltip width)
    pub horizontal: f64,
    /// Subtracted from the selection's top edge
    pub vertical: f64,
}

impl Default for TooltipOffsets {
    fn default() -> Self {
        Self {
            horizontal: 80.0,
            vertical: 60.0,
        }
    }
}

/// Page coordinates of the tooltip's top-left corner, in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TooltipPosition {
    pub left: f64,
    pub top: f64,
}

/// Place the tooltip centred above the selection.
///
/// `rect` is in viewport coordinates and `scroll_y` converts its top edge to page
/// coordinates. The result is not clamped to the viewport, so selections close to
/// the top or left edge can push the tooltip off-screen.
pub fn position_tooltip(rect: Rect, scroll_y: f64, offsets: TooltipOffsets) -> TooltipPosition {
    TooltipPosition {
        left: rect.center_x() - offsets.horizontal,
        top: rect.top + scroll_y - offsets.vertical,
    }
}
