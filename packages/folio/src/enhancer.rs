use std::sync::Arc;
use std::time::Duration;

use folio_dom::{BaseDocument, EventDriver, EventHandler, SelectorError};
use folio_traits::{DomEvent, DomEventData, EventState, StorageProvider, UiEvent};
use thiserror::Error;

use crate::forms::FormGuard;
use crate::highlight::{HighlightTool, TooltipState};
use crate::lazy_images::LazyImages;
use crate::reader_settings::ReaderSettings;
use crate::scroll_chrome::ScrollChrome;
use crate::theme::{Theme, ThemeSwitcher};
use crate::timers::{TimerQueue, TimerTask};
use crate::toc::TableOfContents;
use crate::{EnhanceConfig, alerts, links, reading_time};

#[derive(Debug, Error)]
pub enum EnhanceError {
    #[error("invalid selector: {0}")]
    Selector(#[from] SelectorError),
}

/// Every enhancement installed on one page, and the event handler which
/// routes the host's events to them.
pub struct PageEnhancer {
    config: EnhanceConfig,
    storage: Arc<dyn StorageProvider>,
    timers: TimerQueue,

    theme: ThemeSwitcher,
    reader: ReaderSettings,
    scroll_chrome: ScrollChrome,
    highlight: Option<HighlightTool>,
    lazy_images: LazyImages,
    toc: Option<TableOfContents>,
    forms: FormGuard,
    reading_minutes: Option<usize>,
    external_links: usize,
}

impl PageEnhancer {
    /// Install all enhancements on a freshly parsed page. Components whose
    /// elements are missing from the page are skipped.
    pub fn install(
        doc: &mut BaseDocument,
        config: EnhanceConfig,
        storage: Arc<dyn StorageProvider>,
    ) -> Result<Self, EnhanceError> {
        let mut timers = TimerQueue::default();

        let theme = ThemeSwitcher::install(doc, &*storage);
        let reader = ReaderSettings::install(doc, &*storage)?;
        let scroll_chrome = ScrollChrome::install(doc, &config)?;
        let highlight = HighlightTool::install(doc, &config)?;
        let lazy_images = LazyImages::install(doc)?;

        let content = doc.query_selector(&config.content_selector)?;
        let reading_minutes = reading_time::install(doc, content, config.words_per_minute);
        let toc = TableOfContents::install(doc, content)?;
        let external_links = links::mark_external_links(doc)?.len();

        let forms = FormGuard::new(Duration::from_millis(config.submit_restore_ms))?;
        let alerts = alerts::schedule_dismissal(
            doc,
            &mut timers,
            Duration::from_millis(config.alert_dismiss_ms),
        )?;

        #[cfg(feature = "tracing")]
        tracing::info!(
            theme = %theme.current(),
            highlight = highlight.is_some(),
            toc = toc.is_some(),
            lazy_images = lazy_images.observed().len(),
            external_links,
            alerts,
            "page enhanced"
        );
        #[cfg(not(feature = "tracing"))]
        let _ = alerts;

        Ok(PageEnhancer {
            config,
            storage,
            timers,
            theme,
            reader,
            scroll_chrome,
            highlight,
            lazy_images,
            toc,
            forms,
            reading_minutes,
            external_links,
        })
    }

    pub fn config(&self) -> &EnhanceConfig {
        &self.config
    }

    /// Dispatch an event from the host through the document
    pub fn handle_ui_event(&mut self, doc: &mut BaseDocument, event: UiEvent) {
        let mut driver = EventDriver::new(doc, &mut *self);
        driver.handle_ui_event(event);
    }

    /// Advance the timer clock, running every timer which becomes due
    pub fn advance(&mut self, doc: &mut BaseDocument, by: Duration) {
        for task in self.timers.advance(by) {
            #[cfg(feature = "tracing")]
            tracing::debug!(?task, now = ?self.timers.now(), "timer fired");
            match task {
                TimerTask::DismissAlert(alert) => alerts::dismiss(doc, alert),
                TimerTask::RestoreSubmitButton { button, original } => {
                    FormGuard::restore(doc, button, &original)
                }
            }
        }
    }

    /// Time elapsed on the timer clock since install
    pub fn elapsed(&self) -> Duration {
        self.timers.now()
    }

    /// Number of timers which have not fired yet
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn theme(&self) -> Theme {
        self.theme.current()
    }

    pub fn highlight(&self) -> Option<&HighlightTool> {
        self.highlight.as_ref()
    }

    pub fn highlight_mut(&mut self) -> Option<&mut HighlightTool> {
        self.highlight.as_mut()
    }

    /// `Hidden` when the page has no highlight tool
    pub fn tooltip_state(&self) -> TooltipState {
        self.highlight
            .as_ref()
            .map(HighlightTool::state)
            .unwrap_or(TooltipState::Hidden)
    }

    pub fn scroll_top_button(&self) -> Option<usize> {
        self.scroll_chrome.scroll_top_button()
    }

    /// Images still waiting to intersect the viewport
    pub fn observed_images(&self) -> &[usize] {
        self.lazy_images.observed()
    }

    pub fn table_of_contents(&self) -> Option<&TableOfContents> {
        self.toc.as_ref()
    }

    pub fn reading_minutes(&self) -> Option<usize> {
        self.reading_minutes
    }

    pub fn external_links(&self) -> usize {
        self.external_links
    }

    fn handle_click(
        &mut self,
        chain: &[usize],
        event: &mut DomEvent,
        doc: &mut BaseDocument,
        event_state: &mut EventState,
    ) {
        for &node_id in chain {
            self.click_node(node_id, event, doc, event_state);
            if event_state.is_propagation_stopped() || event.stop_propagation {
                return;
            }
        }
        self.reader.on_document_click(doc, event.target);
    }

    /// Runs the first subsystem that owns `node_id` as a control
    fn click_node(
        &mut self,
        node_id: usize,
        event: &mut DomEvent,
        doc: &mut BaseDocument,
        event_state: &mut EventState,
    ) {
        let storage = &*self.storage;
        if self.theme.on_click(doc, storage, node_id)
            || self.reader.on_click(doc, storage, node_id, event_state)
            || self.scroll_chrome.on_click(doc, node_id)
        {
            return;
        }
        if let Some(toc) = &self.toc
            && toc.on_click(doc, node_id, event, event_state)
        {
            return;
        }
        if let Some(tool) = &mut self.highlight {
            tool.on_click(doc, node_id, event, event_state);
        }
    }
}

impl EventHandler for PageEnhancer {
    fn handle_event(
        &mut self,
        chain: &[usize],
        event: &mut DomEvent,
        doc: &mut BaseDocument,
        event_state: &mut EventState,
    ) {
        match &event.data {
            DomEventData::MouseUp(_) => {
                if let Some(tool) = self.highlight.as_mut() {
                    tool.on_pointer_up(doc, event.target);
                }
            }
            DomEventData::Click(_) => self.handle_click(chain, event, doc, event_state),
            DomEventData::Scroll(_) => self.scroll_chrome.on_scroll(doc),
            DomEventData::Submit => self.forms.on_submit(doc, event.target, &mut self.timers),
            DomEventData::Intersection(entry) => {
                let entry = *entry;
                self.lazy_images.on_intersection(doc, &entry);
            }
            DomEventData::MouseDown(_) => {}
        }
    }
}
