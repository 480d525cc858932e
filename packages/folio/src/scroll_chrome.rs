//! Scroll-driven page chrome: navbar shadow, back-to-top button and the reading
//! progress bar.

use folio_dom::{Attribute, BaseDocument, SelectorError};

use crate::{EnhanceConfig, HIDDEN_CLASS};

const SHADOW_CLASS: &str = "shadow";
const SCROLL_TOP_BUTTON_CLASS: &str =
    "btn btn-primary position-fixed bottom-0 end-0 m-4 rounded-circle d-none";
const SCROLL_TOP_BUTTON_STYLE: &str = "width: 48px; height: 48px; z-index: 1050";

pub struct ScrollChrome {
    navbar: Option<usize>,
    scroll_top_button: Option<usize>,
    progress_fill: Option<usize>,
    shadow_threshold: f64,
    scroll_top_threshold: f64,
}

impl ScrollChrome {
    /// Find the navbar and progress bar, and append the back-to-top button to `<body>`
    pub fn install(doc: &mut BaseDocument, config: &EnhanceConfig) -> Result<Self, SelectorError> {
        let navbar = doc.query_selector(".navbar")?;
        let progress_fill = doc.query_selector(".progress-bar-fill")?;

        let scroll_top_button = doc.body_id().map(|body| {
            let mut mutr = doc.mutate();
            let button = mutr.create_html_element(
                "button",
                vec![
                    Attribute::new("class", SCROLL_TOP_BUTTON_CLASS),
                    Attribute::new("style", SCROLL_TOP_BUTTON_STYLE),
                    Attribute::new("title", "Back to top"),
                ],
            );
            let icon = mutr.create_html_element("i", vec![Attribute::new("class", "bi bi-arrow-up")]);
            mutr.append_children(button, &[icon]);
            mutr.append_children(body, &[button]);
            button
        });

        Ok(ScrollChrome {
            navbar,
            scroll_top_button,
            progress_fill,
            shadow_threshold: config.navbar_shadow_threshold,
            scroll_top_threshold: config.scroll_top_threshold,
        })
    }

    pub fn scroll_top_button(&self) -> Option<usize> {
        self.scroll_top_button
    }

    /// Window `scroll` listener
    pub fn on_scroll(&self, doc: &mut BaseDocument) {
        let scroll_y = doc.viewport_scroll().y;
        let percent = scroll_progress(scroll_y, doc.scroll_height(), doc.viewport().client_height);

        let mut mutr = doc.mutate();
        if let Some(navbar) = self.navbar {
            mutr.set_class(navbar, SHADOW_CLASS, scroll_y > self.shadow_threshold);
        }
        if let Some(button) = self.scroll_top_button {
            mutr.set_class(button, HIDDEN_CLASS, scroll_y <= self.scroll_top_threshold);
        }
        if let Some(fill) = self.progress_fill {
            mutr.set_style_property(fill, "width", &format!("{percent}%"));
        }
    }

    /// Listener on the back-to-top button. Returns whether `node_id` is the button.
    pub fn on_click(&self, doc: &mut BaseDocument, node_id: usize) -> bool {
        if self.scroll_top_button != Some(node_id) {
            return false;
        }
        doc.scroll_viewport_to(0.0);
        self.on_scroll(doc);
        true
    }
}

/// How far through the page the viewport is, from 0 to 100
pub fn scroll_progress(scroll_y: f64, scroll_height: f64, client_height: f64) -> f64 {
    let scrollable = scroll_height - client_height;
    if scrollable <= 0.0 {
        return 0.0;
    }
    scroll_y / scrollable * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_a_percentage_of_scrollable_height() {
        assert_eq!(scroll_progress(0.0, 3000.0, 1000.0), 0.0);
        assert_eq!(scroll_progress(500.0, 3000.0, 1000.0), 25.0);
        assert_eq!(scroll_progress(2000.0, 3000.0, 1000.0), 100.0);
        assert_eq!(scroll_progress(0.0, 800.0, 1000.0), 0.0);
    }
}
