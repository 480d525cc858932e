//! Reader typography (font size and line height) and its settings panel.

use folio_dom::{BaseDocument, SelectorError};
use folio_traits::{EventState, StorageProvider};

use crate::HIDDEN_CLASS;

pub const FONT_SIZE_STORAGE_KEY: &str = "reader-font-size";
pub const LINE_HEIGHT_STORAGE_KEY: &str = "reader-line-height";
pub const FONT_SIZE_PROPERTY: &str = "--reader-font-size";
pub const LINE_HEIGHT_PROPERTY: &str = "--reader-line-height";
const DEFAULT_FONT_SIZE: &str = "1.1rem";
const DEFAULT_LINE_HEIGHT: &str = "1.8";
const ACTIVE_CLASS: &str = "active";

/// One adjustable property and the buttons which set it
struct Setting {
    storage_key: &'static str,
    property: &'static str,
    /// `data-*` attribute holding each button's value
    data_key: &'static str,
    buttons: Vec<usize>,
}

impl Setting {
    fn install(
        &self,
        doc: &mut BaseDocument,
        root: usize,
        storage: &dyn StorageProvider,
        default: &str,
    ) {
        let value = storage.get(self.storage_key).unwrap_or_else(|_err| {
            #[cfg(feature = "tracing")]
            tracing::warn!("could not read {}: {_err}", self.storage_key);
            None
        });
        let value = value.as_deref().filter(|value| !value.is_empty()).unwrap_or(default);
        doc.mutate().set_style_property(root, self.property, value);
    }

    fn on_click(
        &self,
        doc: &mut BaseDocument,
        root: usize,
        storage: &dyn StorageProvider,
        node_id: usize,
    ) -> bool {
        if !self.buttons.contains(&node_id) {
            return false;
        }
        let Some(value) = doc
            .get_node(node_id)
            .and_then(|node| node.element_data()?.data(self.data_key))
            .map(str::to_string)
        else {
            return true;
        };

        if let Err(_err) = storage.set(self.storage_key, &value) {
            #[cfg(feature = "tracing")]
            tracing::warn!("could not persist {}: {_err}", self.storage_key);
        }
        let mut mutr = doc.mutate();
        mutr.set_style_property(root, self.property, &value);
        for &button in &self.buttons {
            mutr.set_class(button, ACTIVE_CLASS, button == node_id);
        }
        true
    }
}

/// The collapsible panel holding the setting buttons
struct Panel {
    toggle: usize,
    panel: usize,
}

pub struct ReaderSettings {
    root: usize,
    font_size: Setting,
    line_height: Setting,
    panel: Option<Panel>,
}

impl ReaderSettings {
    pub fn install(
        doc: &mut BaseDocument,
        storage: &dyn StorageProvider,
    ) -> Result<Self, SelectorError> {
        let root = doc.root_element_id();
        let font_size = Setting {
            storage_key: FONT_SIZE_STORAGE_KEY,
            property: FONT_SIZE_PROPERTY,
            data_key: "size",
            buttons: doc.query_selector_all(".font-size-btn")?.to_vec(),
        };
        let line_height = Setting {
            storage_key: LINE_HEIGHT_STORAGE_KEY,
            property: LINE_HEIGHT_PROPERTY,
            data_key: "height",
            buttons: doc.query_selector_all(".line-height-btn")?.to_vec(),
        };
        font_size.install(doc, root, storage, DEFAULT_FONT_SIZE);
        line_height.install(doc, root, storage, DEFAULT_LINE_HEIGHT);

        let panel = match (
            doc.get_element_by_id("toggleReaderSettings"),
            doc.get_element_by_id("readerSettingsPanel"),
        ) {
            (Some(toggle), Some(panel)) => Some(Panel { toggle, panel }),
            _ => None,
        };

        Ok(ReaderSettings {
            root,
            font_size,
            line_height,
            panel,
        })
    }

    /// Listener on the setting buttons and the panel toggle. Returns whether
    /// `node_id` is one of them.
    pub fn on_click(
        &mut self,
        doc: &mut BaseDocument,
        storage: &dyn StorageProvider,
        node_id: usize,
        event_state: &mut EventState,
    ) -> bool {
        if self.font_size.on_click(doc, self.root, storage, node_id)
            || self.line_height.on_click(doc, self.root, storage, node_id)
        {
            return true;
        }

        match &self.panel {
            Some(panel) if panel.toggle == node_id => {
                // Keep the document listener from closing the panel again
                event_state.stop_propagation();
                doc.mutate().toggle_class(panel.panel, HIDDEN_CLASS);
                true
            }
            _ => false,
        }
    }

    /// Document-level `click` listener: clicks outside the panel close it
    pub fn on_document_click(&mut self, doc: &mut BaseDocument, target: usize) {
        let Some(panel) = &self.panel else {
            return;
        };
        if !doc.is_inclusive_ancestor(panel.panel, target) && target != panel.toggle {
            doc.mutate().add_class(panel.panel, HIDDEN_CLASS);
        }
    }
}
