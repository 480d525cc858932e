//! Guard against double submission: the submit button is disabled and shows a
//! spinner until a timer restores it.

use std::time::Duration;

use folio_dom::{Attribute, BaseDocument, SelectorError, SelectorList};

use crate::timers::{TimerQueue, TimerTask};

pub struct FormGuard {
    submit_button: SelectorList,
    restore_after: Duration,
}

impl FormGuard {
    pub fn new(restore_after: Duration) -> Result<Self, SelectorError> {
        Ok(FormGuard {
            submit_button: SelectorList::parse("button[type=\"submit\"]")?,
            restore_after,
        })
    }

    /// `submit` listener on every form
    pub fn on_submit(&self, doc: &mut BaseDocument, form: usize, timers: &mut TimerQueue) {
        if !doc.tree()[form].is_element_with_tag_name("form") {
            return;
        }
        let Some(button) = doc.query_selector_in_raw(form, &self.submit_button) else {
            return;
        };

        let original = doc.tree()[button].children.clone();
        let mut mutr = doc.mutate();
        mutr.set_attribute(button, "disabled", "");
        for &child in &original {
            mutr.remove_node(child);
        }
        let spinner = mutr.create_html_element(
            "span",
            vec![Attribute::new("class", "spinner-border spinner-border-sm me-2")],
        );
        let label = mutr.create_text_node("Processing...");
        mutr.append_children(button, &[spinner, label]);

        timers.schedule(
            self.restore_after,
            TimerTask::RestoreSubmitButton { button, original },
        );
    }

    pub(crate) fn restore(doc: &mut BaseDocument, button: usize, original: &[usize]) {
        if doc.get_node(button).is_none() {
            return;
        }
        let mut mutr = doc.mutate();
        mutr.remove_children(button);
        mutr.append_children(button, original);
        mutr.clear_attribute(button, "disabled");
    }
}
