mod driver;

use folio_traits::events::{DomEvent, DomEventData, MouseEventButton};
pub use driver::{EventDriver, EventHandler, NoopEventHandler};

use crate::BaseDocument;

/// Run the document's default action for an event that no listener cancelled.
/// Follow-up events (e.g. the `click` generated by a `mouseup`) are passed to
/// `dispatch_event` and run after the current event has finished.
pub(crate) fn handle_dom_event<F: FnMut(DomEvent)>(
    doc: &mut BaseDocument,
    event: &mut DomEvent,
    mut dispatch_event: F,
) {
    let target_node_id = event.target;

    match &event.data {
        DomEventData::MouseDown(_) => {
            // Do nothing (selection is driven by the host)
        }
        DomEventData::MouseUp(data) => {
            if data.button == MouseEventButton::Main && !is_disabled(doc, target_node_id) {
                dispatch_event(DomEvent::new(
                    target_node_id,
                    DomEventData::Click(data.clone()),
                ));
            }
        }
        DomEventData::Click(_) => {
            // Do nothing (no default action)
        }
        DomEventData::Scroll(_) => {
            // Handled in the driver before dispatch
        }
        DomEventData::Submit => {
            // Do nothing (no navigation)
        }
        DomEventData::Intersection(_) => {
            // Do nothing (no default action)
        }
    }
}

/// Disabled form controls (and anything inside them) do not receive clicks
fn is_disabled(doc: &BaseDocument, node_id: usize) -> bool {
    doc.node_chain(node_id).into_iter().any(|id| {
        let node = &doc.nodes[id];
        node.is_element_with_tag_name("button") && node.attr("disabled").is_some()
    })
}
