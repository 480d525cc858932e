use bitflags::bitflags;

/// An event produced by the host (window, test harness, etc) before it has been
/// routed to a node in the document.
#[derive(Debug, Clone)]
pub enum UiEvent {
    PointerDown(PointerEvent),
    PointerUp(PointerEvent),
    /// The page's vertical/horizontal scroll position changed
    Scroll(ScrollEvent),
    /// A `<form>` was submitted
    Submit(usize),
    /// An observed element entered or left the viewport
    Intersection(IntersectionEvent),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum MouseEventButton {
    #[default]
    Main = 0,
    Auxiliary = 1,
    Secondary = 2,
    Fourth = 3,
    Fifth = 4,
}

bitflags! {
    /// The set of buttons held down while the event was produced
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct MouseEventButtons: u8 {
        const PRIMARY = 0b0000_0001;
        const SECONDARY = 0b0000_0010;
        const AUXILIARY = 0b0000_0100;
        const FOURTH = 0b0000_1000;
        const FIFTH = 0b0001_0000;
    }
}

impl From<MouseEventButton> for MouseEventButtons {
    fn from(value: MouseEventButton) -> Self {
        match value {
            MouseEventButton::Main => Self::PRIMARY,
            MouseEventButton::Auxiliary => Self::AUXILIARY,
            MouseEventButton::Secondary => Self::SECONDARY,
            MouseEventButton::Fourth => Self::FOURTH,
            MouseEventButton::Fifth => Self::FIFTH,
        }
    }
}

/// A pointer event which has already been hit-tested by the host.
#[derive(Clone, Debug)]
pub struct PointerEvent {
    /// The node under the pointer
    pub target: usize,
    pub client_x: f64,
    pub client_y: f64,
    pub button: MouseEventButton,
    pub buttons: MouseEventButtons,
}

impl PointerEvent {
    /// A primary-button event at the origin, targeting `target`
    pub fn primary(target: usize) -> Self {
        Self {
            target,
            client_x: 0.0,
            client_y: 0.0,
            button: MouseEventButton::Main,
            buttons: MouseEventButtons::PRIMARY,
        }
    }

    pub fn at(mut self, client_x: f64, client_y: f64) -> Self {
        self.client_x = client_x;
        self.client_y = client_y;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollEvent {
    pub scroll_x: f64,
    pub scroll_y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntersectionEvent {
    pub target: usize,
    pub is_intersecting: bool,
}

#[derive(Debug, Clone)]
pub struct DomEvent {
    pub target: usize,
    /// Which is true if the event bubbles up through the DOM tree.
    pub bubbles: bool,
    /// which is true if the event can be canceled.
    pub cancelable: bool,
    pub current_target: Option<usize>,
    /// Where true indicates that the default user agent action was prevented,
    /// and false indicates that it was not.
    pub default_prevented: bool,

    pub stop_propagation: bool,
    pub data: DomEventData,
}

impl DomEvent {
    pub fn new(target: usize, data: DomEventData) -> Self {
        let mut cancelable = true;
        let mut bubbles = true;

        match data.name() {
            "scroll" | "intersection" => {
                cancelable = false;
                bubbles = false;
            }
            _ => {}
        }

        Self {
            target,
            bubbles,
            cancelable,
            current_target: None,
            default_prevented: false,

            stop_propagation: false,
            data,
        }
    }

    pub fn prevent_default(&mut self) {
        if !self.cancelable {
            return;
        }
        self.default_prevented = true;
    }

    pub fn stop_propagation(&mut self) {
        self.stop_propagation = true;
    }

    /// Returns the name of the event ("click", "mouseup", "scroll", etc)
    pub fn name(&self) -> &'static str {
        self.data.name()
    }
}

#[derive(Debug, Clone)]
pub enum DomEventData {
    MouseDown(PointerEvent),
    MouseUp(PointerEvent),
    Click(PointerEvent),
    Scroll(ScrollEvent),
    Submit,
    Intersection(IntersectionEvent),
}

impl DomEventData {
    pub fn name(&self) -> &'static str {
        match self {
            DomEventData::MouseDown { .. } => "mousedown",
            DomEventData::MouseUp { .. } => "mouseup",
            DomEventData::Click { .. } => "click",
            DomEventData::Scroll { .. } => "scroll",
            DomEventData::Submit => "submit",
            DomEventData::Intersection { .. } => "intersection",
        }
    }
}

/// Handler-visible state accumulated while an event is dispatched along its chain
#[derive(Clone, Copy, Debug, Default)]
pub struct EventState {
    cancelled: bool,
    propagation_stopped: bool,
}

impl EventState {
    /// Suppress the document's default action for this event
    pub fn prevent_default(&mut self) {
        self.cancelled = true;
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}
