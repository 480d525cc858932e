use serde::{Deserialize, Serialize};

use crate::highlight::TooltipOffsets;

/// Options for [`PageEnhancer::install`](crate::PageEnhancer::install).
///
/// Every field has a default matching the stock blog templates, so hosts only need to
/// set what differs. Deserializing fills missing fields from [`Default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhanceConfig {
    /// The article body which can be highlighted, and whose text is used for the
    /// reading time and table of contents
    pub content_selector: String,
    /// The floating selection tooltip
    pub tooltip_selector: String,
    /// Highlight buttons inside the tooltip. The colour comes from `data-color`.
    pub highlight_button_selector: String,
    /// Format buttons inside the tooltip. The format comes from `data-format`.
    pub format_button_selector: String,
    /// Prepended to the colour to build the highlight class
    pub highlight_class_prefix: String,
    pub tooltip_offsets: TooltipOffsets,

    /// Scroll distance after which the navbar casts a shadow
    pub navbar_shadow_threshold: f64,
    /// Scroll distance after which the back-to-top button is shown
    pub scroll_top_threshold: f64,

    pub words_per_minute: usize,

    /// Delay before dismissible alerts are removed
    pub alert_dismiss_ms: u64,
    /// Delay before a guarded submit button is restored
    pub submit_restore_ms: u64,
}

impl Default for EnhanceConfig {
    fn default() -> Self {
        Self {
            content_selector: String::from(".post-content"),
            tooltip_selector: String::from("#selectionTooltip"),
            highlight_button_selector: String::from(".highlight-btn[data-color]"),
            format_button_selector: String::from(".format-btn[data-format]"),
            highlight_class_prefix: String::from("highlight-"),
            tooltip_offsets: TooltipOffsets::default(),
            navbar_shadow_threshold: 10.0,
            scroll_top_threshold: 300.0,
            words_per_minute: 225,
            alert_dismiss_ms: 5000,
            submit_restore_ms: 5000,
        }
    }
}
