use std::collections::VecDeque;

use folio_traits::events::{DomEvent, DomEventData, EventState, UiEvent};

use crate::BaseDocument;

/// Receives every dispatched event together with its propagation path
pub trait EventHandler {
    fn handle_event(
        &mut self,
        chain: &[usize],
        event: &mut DomEvent,
        doc: &mut BaseDocument,
        event_state: &mut EventState,
    );
}

pub struct NoopEventHandler;
impl EventHandler for NoopEventHandler {
    fn handle_event(
        &mut self,
        _chain: &[usize],
        _event: &mut DomEvent,
        _doc: &mut BaseDocument,
        _event_state: &mut EventState,
    ) {
        // Do nothing
    }
}

impl<H: EventHandler + ?Sized> EventHandler for &mut H {
    fn handle_event(
        &mut self,
        chain: &[usize],
        event: &mut DomEvent,
        doc: &mut BaseDocument,
        event_state: &mut EventState,
    ) {
        (**self).handle_event(chain, event, doc, event_state)
    }
}

pub struct EventDriver<'doc, Handler: EventHandler> {
    doc: &'doc mut BaseDocument,
    handler: Handler,
    queue: VecDeque<DomEvent>,
}

impl<'doc, Handler: EventHandler> EventDriver<'doc, Handler> {
    pub fn new(doc: &'doc mut BaseDocument, handler: Handler) -> Self {
        EventDriver {
            doc,
            handler,
            queue: VecDeque::with_capacity(4),
        }
    }

    pub fn handle_ui_event(&mut self, event: UiEvent) {
        #[cfg(feature = "tracing")]
        tracing::trace!(?event, "ui event");

        // Scroll listeners read the new position from the document
        if let UiEvent::Scroll(scroll) = &event {
            self.doc.viewport_scroll.x = scroll.scroll_x;
            self.doc.scroll_viewport_to(scroll.scroll_y);
        }

        // Scroll events fire at the document. Targets the host reports which no
        // longer exist fall back to the root element.
        let (target, data) = match event {
            UiEvent::PointerDown(data) => (data.target, DomEventData::MouseDown(data)),
            UiEvent::PointerUp(data) => (data.target, DomEventData::MouseUp(data)),
            UiEvent::Scroll(data) => (0, DomEventData::Scroll(data)),
            UiEvent::Submit(form) => (form, DomEventData::Submit),
            UiEvent::Intersection(data) => (data.target, DomEventData::Intersection(data)),
        };
        let target = if self.doc.nodes.contains(target) {
            target
        } else {
            self.doc.root_element_id()
        };

        self.handle_dom_event(DomEvent::new(target, data));
    }

    /// Dispatch `event`, then any events its default action produces, in order
    pub fn handle_dom_event(&mut self, event: DomEvent) {
        self.queue.push_back(event);
        while let Some(mut event) = self.queue.pop_front() {
            let chain = if event.bubbles {
                self.doc.node_chain(event.target)
            } else {
                vec![event.target]
            };

            let mut event_state = EventState::default();
            self.handler
                .handle_event(&chain, &mut event, self.doc, &mut event_state);

            if event_state.is_cancelled() || event.default_prevented {
                continue;
            }
            let queue = &mut self.queue;
            super::handle_dom_event(self.doc, &mut event, |follow_up| queue.push_back(follow_up));
        }
    }
}
