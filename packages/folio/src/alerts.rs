use std::time::Duration;

use folio_dom::{BaseDocument, SelectorError};

use crate::timers::{TimerQueue, TimerTask};

/// Schedule the removal of every alert that is not informational
pub fn schedule_dismissal(
    doc: &BaseDocument,
    timers: &mut TimerQueue,
    delay: Duration,
) -> Result<usize, SelectorError> {
    let alerts = doc.query_selector_all(".alert:not(.alert-info):not(.alert-light)")?;
    for &alert in &alerts {
        timers.schedule(delay, TimerTask::DismissAlert(alert));
    }
    Ok(alerts.len())
}

pub(crate) fn dismiss(doc: &mut BaseDocument, alert: usize) {
    if doc.get_node(alert).is_some_and(|node| node.parent.is_some()) {
        doc.mutate().remove_and_drop_node(alert);
    }
}
