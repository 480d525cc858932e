//! Shared plain types for the Folio crates: geometry, viewport state, events
//! and the key-value storage provider.

pub mod events;
pub use events::{
    DomEvent, DomEventData, EventState, IntersectionEvent, MouseEventButton, MouseEventButtons,
    PointerEvent, ScrollEvent, UiEvent,
};

mod geometry;
pub use geometry::{Point, Rect};

pub mod storage;
pub use storage::{MemoryStorage, StorageError, StorageProvider};

mod viewport;
pub use viewport::{ColorScheme, Viewport};
