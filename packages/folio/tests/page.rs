use std::sync::Arc;
use std::time::Duration;

use folio::{
    EnhanceConfig, FONT_SIZE_PROPERTY, FONT_SIZE_STORAGE_KEY, HtmlDocument, LINE_HEIGHT_PROPERTY,
    PageEnhancer, THEME_STORAGE_KEY, Theme,
};
use folio_dom::{BaseDocument, DocumentConfig};
use folio_persistence::SqliteStorage;
use folio_traits::{
    ColorScheme, IntersectionEvent, MemoryStorage, PointerEvent, Rect, ScrollEvent,
    StorageProvider, UiEvent, Viewport,
};

const PAGE: &str = concat!(
    "<html><head></head><body>",
    "<nav class=\"navbar\"></nav>",
    "<div class=\"progress\"><div class=\"progress-bar-fill\"></div></div>",
    "<button id=\"themeToggle\" title=\"Theme\"><i class=\"bi bi-sun-fill\"></i></button>",
    "<button id=\"toggleReaderSettings\"></button>",
    "<div id=\"readerSettingsPanel\" class=\"d-none\">",
    "<button id=\"font-large\" class=\"font-size-btn\" data-size=\"1.3rem\"></button>",
    "<button id=\"font-normal\" class=\"font-size-btn active\" data-size=\"1.1rem\"></button>",
    "<button id=\"line-loose\" class=\"line-height-btn\" data-height=\"2\"></button>",
    "</div>",
    "<div id=\"saved\" class=\"alert alert-success\">Saved</div>",
    "<div id=\"note\" class=\"alert alert-info\">Note</div>",
    "<div class=\"card\"><div class=\"toc-container\"><p>Loading</p></div></div>",
    "<span id=\"readingTimeValue\"></span>",
    "<div class=\"post-content\">",
    "<h2 id=\"intro\">Intro</h2><p>one two three</p><h3>Detail</h3>",
    "<img id=\"lazy\" data-src=\"/img/cover.png\">",
    "</div>",
    "<a id=\"other\" href=\"https://other.example/x\">x</a>",
    "<a id=\"same\" href=\"https://blog.example/about\">y</a>",
    "<a id=\"relative\" href=\"/about\">z</a>",
    "<form id=\"comment\"><button id=\"send\" type=\"submit\">Send</button></form>",
    "</body></html>"
);

fn config() -> DocumentConfig {
    DocumentConfig {
        viewport: Some(Viewport::new(800.0, 1000.0, ColorScheme::Light)),
        base_url: Some(String::from("https://blog.example/posts/1")),
    }
}

fn setup_with(
    html: &str,
    config: DocumentConfig,
    storage: Arc<dyn StorageProvider>,
) -> (HtmlDocument, PageEnhancer) {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let mut doc = HtmlDocument::from_html(html, config);
    let enhancer = PageEnhancer::install(&mut doc, EnhanceConfig::default(), storage).unwrap();
    (doc, enhancer)
}

fn setup() -> (HtmlDocument, PageEnhancer) {
    setup_with(PAGE, config(), Arc::new(MemoryStorage::new()))
}

fn id(doc: &BaseDocument, id: &str) -> usize {
    doc.get_element_by_id(id).unwrap()
}

fn click(enhancer: &mut PageEnhancer, doc: &mut BaseDocument, target: usize) {
    enhancer.handle_ui_event(doc, UiEvent::PointerUp(PointerEvent::primary(target)));
}

fn attr<'a>(doc: &'a BaseDocument, node_id: usize, name: &str) -> Option<&'a str> {
    doc.tree()[node_id].attr(name)
}

fn style<'a>(doc: &'a BaseDocument, node_id: usize, name: &str) -> Option<&'a str> {
    doc.tree()[node_id].element_data()?.style_property(name)
}

fn has_class(doc: &BaseDocument, node_id: usize, class: &str) -> bool {
    doc.tree()[node_id].has_class(class)
}

#[test]
fn theme_defaults_to_light_and_cycles() {
    let storage = Arc::new(MemoryStorage::new());
    let (mut doc, mut enhancer) = setup_with(PAGE, config(), storage.clone());
    let root = doc.root_element_id();
    let toggle = id(&doc, "themeToggle");
    let icon = doc.tree()[toggle].children[0];

    assert_eq!(enhancer.theme(), Theme::Light);
    assert_eq!(attr(&doc, root, "data-bs-theme"), Some("light"));
    assert_eq!(attr(&doc, toggle, "title"), Some("Theme (current: Light mode)"));

    click(&mut enhancer, &mut doc, icon);
    assert_eq!(enhancer.theme(), Theme::Dark);
    assert_eq!(attr(&doc, root, "data-bs-theme"), Some("dark"));
    assert_eq!(attr(&doc, icon, "class"), Some("bi bi-moon-stars-fill"));
    assert_eq!(storage.get(THEME_STORAGE_KEY).unwrap().as_deref(), Some("dark"));

    click(&mut enhancer, &mut doc, toggle);
    assert_eq!(enhancer.theme(), Theme::Sepia);
    click(&mut enhancer, &mut doc, toggle);
    assert_eq!(enhancer.theme(), Theme::Light);
    assert_eq!(attr(&doc, toggle, "title"), Some("Theme (current: Light mode)"));
}

#[test]
fn theme_prefers_storage_then_system() {
    let storage = Arc::new(MemoryStorage::with_entries([(THEME_STORAGE_KEY, "sepia")]));
    let (doc, enhancer) = setup_with(PAGE, config(), storage);
    assert_eq!(enhancer.theme(), Theme::Sepia);
    assert_eq!(
        attr(&doc, doc.root_element_id(), "data-bs-theme"),
        Some("sepia")
    );

    let dark = DocumentConfig {
        viewport: Some(Viewport::new(800.0, 1000.0, ColorScheme::Dark)),
        base_url: None,
    };
    let (_, enhancer) = setup_with(PAGE, dark.clone(), Arc::new(MemoryStorage::new()));
    assert_eq!(enhancer.theme(), Theme::Dark);

    // Unknown stored values fall back to the system preference
    let storage = Arc::new(MemoryStorage::with_entries([(THEME_STORAGE_KEY, "neon")]));
    let (_, enhancer) = setup_with(PAGE, dark, storage);
    assert_eq!(enhancer.theme(), Theme::Dark);
}

#[test]
fn theme_persists_in_sqlite() {
    let storage = Arc::new(SqliteStorage::open_in_memory().unwrap());
    let (mut doc, mut enhancer) = setup_with(PAGE, config(), storage.clone());
    let toggle = id(&doc, "themeToggle");
    click(&mut enhancer, &mut doc, toggle);

    assert_eq!(storage.get(THEME_STORAGE_KEY).unwrap().as_deref(), Some("dark"));
    let (_, enhancer) = setup_with(PAGE, config(), storage);
    assert_eq!(enhancer.theme(), Theme::Dark);
}

#[test]
fn reader_settings_apply_and_persist() {
    let storage = Arc::new(MemoryStorage::with_entries([(FONT_SIZE_STORAGE_KEY, "1.3rem")]));
    let (mut doc, mut enhancer) = setup_with(PAGE, config(), storage.clone());
    let root = doc.root_element_id();
    assert_eq!(style(&doc, root, FONT_SIZE_PROPERTY), Some("1.3rem"));
    assert_eq!(style(&doc, root, LINE_HEIGHT_PROPERTY), Some("1.8"));

    let toggle = id(&doc, "toggleReaderSettings");
    let panel = id(&doc, "readerSettingsPanel");
    click(&mut enhancer, &mut doc, toggle);
    assert!(!has_class(&doc, panel, "d-none"));

    let large = id(&doc, "font-large");
    let normal = id(&doc, "font-normal");
    click(&mut enhancer, &mut doc, large);
    assert_eq!(style(&doc, root, FONT_SIZE_PROPERTY), Some("1.3rem"));
    assert!(has_class(&doc, large, "active"));
    assert!(!has_class(&doc, normal, "active"));

    let loose = id(&doc, "line-loose");
    click(&mut enhancer, &mut doc, loose);
    assert_eq!(style(&doc, root, LINE_HEIGHT_PROPERTY), Some("2"));
    assert_eq!(
        storage.get(folio::LINE_HEIGHT_STORAGE_KEY).unwrap().as_deref(),
        Some("2")
    );
    // Clicks inside the panel leave it open
    assert!(!has_class(&doc, panel, "d-none"));

    let outside = id(&doc, "saved");
    click(&mut enhancer, &mut doc, outside);
    assert!(has_class(&doc, panel, "d-none"));
}

#[test]
fn scrolling_updates_the_chrome() {
    let (mut doc, mut enhancer) = setup();
    doc.set_scroll_height(3000.0);
    let navbar = doc.query_selector(".navbar").unwrap().unwrap();
    let fill = doc.query_selector(".progress-bar-fill").unwrap().unwrap();
    let button = enhancer.scroll_top_button().unwrap();

    assert_eq!(
        doc.outer_html(button),
        concat!(
            "<button class=\"btn btn-primary position-fixed bottom-0 end-0 m-4 rounded-circle d-none\" ",
            "style=\"width: 48px; height: 48px; z-index: 1050\" title=\"Back to top\">",
            "<i class=\"bi bi-arrow-up\"></i></button>"
        )
    );

    let scroll = |scroll_y| {
        UiEvent::Scroll(ScrollEvent {
            scroll_x: 0.0,
            scroll_y,
        })
    };

    enhancer.handle_ui_event(&mut doc, scroll(500.0));
    assert!(has_class(&doc, navbar, "shadow"));
    assert!(!has_class(&doc, button, "d-none"));
    assert_eq!(style(&doc, fill, "width"), Some("25%"));

    enhancer.handle_ui_event(&mut doc, scroll(5.0));
    assert!(!has_class(&doc, navbar, "shadow"));
    assert!(has_class(&doc, button, "d-none"));
    assert_eq!(style(&doc, fill, "width"), Some("0.25%"));

    enhancer.handle_ui_event(&mut doc, scroll(1000.0));
    click(&mut enhancer, &mut doc, button);
    assert_eq!(doc.viewport_scroll().y, 0.0);
    assert!(has_class(&doc, button, "d-none"));
    assert_eq!(style(&doc, fill, "width"), Some("0%"));
}

#[test]
fn images_load_once_when_visible() {
    let (mut doc, mut enhancer) = setup();
    let img = id(&doc, "lazy");
    assert_eq!(enhancer.observed_images(), &[img]);

    let entry = |is_intersecting| {
        UiEvent::Intersection(IntersectionEvent {
            target: img,
            is_intersecting,
        })
    };

    enhancer.handle_ui_event(&mut doc, entry(false));
    assert_eq!(attr(&doc, img, "src"), None);

    enhancer.handle_ui_event(&mut doc, entry(true));
    assert_eq!(attr(&doc, img, "src"), Some("/img/cover.png"));
    assert!(has_class(&doc, img, "fade-in"));
    assert!(enhancer.observed_images().is_empty());
}

#[test]
fn reading_time_and_contents_are_filled_in() {
    let (mut doc, mut enhancer) = setup();

    assert_eq!(enhancer.reading_minutes(), Some(1));
    let value = id(&doc, "readingTimeValue");
    assert_eq!(doc.text_content(value), "1");

    let intro = doc.query_selector(".post-content h2").unwrap().unwrap();
    let detail = doc.query_selector(".post-content h3").unwrap().unwrap();
    assert_eq!(attr(&doc, intro, "id"), Some("heading-0"));
    assert_eq!(attr(&doc, detail, "id"), Some("heading-1"));

    let container = doc.query_selector(".toc-container").unwrap().unwrap();
    assert_eq!(
        doc.inner_html(container),
        concat!(
            "<h6 class=\"mb-3\">Contents</h6>",
            "<nav class=\"toc-list mb-3\">",
            "<a href=\"#heading-0\" class=\"toc-link toc-h2\">Intro</a>",
            "<a href=\"#heading-1\" class=\"toc-link toc-h3\">Detail</a>",
            "</nav>"
        )
    );

    doc.set_scroll_height(3000.0);
    doc.set_node_rect(detail, Rect::new(0.0, 700.0, 600.0, 30.0));
    let link = enhancer.table_of_contents().unwrap().links()[1].0;
    click(&mut enhancer, &mut doc, link);
    assert_eq!(doc.viewport_scroll().y, 700.0);
}

#[test]
fn contents_card_is_hidden_without_headings() {
    let html = concat!(
        "<html><body>",
        "<div class=\"card\"><div class=\"toc-container\"></div></div>",
        "<div class=\"post-content\"><p>No headings here</p></div>",
        "</body></html>"
    );
    let (doc, enhancer) = setup_with(html, config(), Arc::new(MemoryStorage::new()));
    assert!(enhancer.table_of_contents().is_none());
    let card = doc.query_selector(".card").unwrap().unwrap();
    assert_eq!(style(&doc, card, "display"), Some("none"));
}

#[test]
fn links_to_other_hosts_open_in_a_new_tab() {
    let (doc, enhancer) = setup();
    assert_eq!(enhancer.external_links(), 1);

    let other = id(&doc, "other");
    assert_eq!(attr(&doc, other, "target"), Some("_blank"));
    assert_eq!(attr(&doc, other, "rel"), Some("noopener noreferrer"));
    for same in ["same", "relative"] {
        let link = id(&doc, same);
        assert_eq!(attr(&doc, link, "target"), None);
        assert_eq!(attr(&doc, link, "rel"), None);
    }

    // Without a page url every absolute link counts as external
    let no_url = DocumentConfig::default();
    let (_, enhancer) = setup_with(PAGE, no_url, Arc::new(MemoryStorage::new()));
    assert_eq!(enhancer.external_links(), 2);
}

#[test]
fn submit_button_is_guarded_until_restored() {
    let (mut doc, mut enhancer) = setup();
    let form = id(&doc, "comment");
    let send = id(&doc, "send");

    enhancer.handle_ui_event(&mut doc, UiEvent::Submit(form));
    assert_eq!(attr(&doc, send, "disabled"), Some(""));
    assert_eq!(
        doc.inner_html(send),
        "<span class=\"spinner-border spinner-border-sm me-2\"></span>Processing..."
    );

    enhancer.advance(&mut doc, Duration::from_millis(4999));
    assert_eq!(attr(&doc, send, "disabled"), Some(""));

    enhancer.advance(&mut doc, Duration::from_millis(1));
    assert_eq!(attr(&doc, send, "disabled"), None);
    assert_eq!(doc.inner_html(send), "Send");
}

#[test]
fn alerts_are_dismissed_after_a_delay() {
    let (mut doc, mut enhancer) = setup();
    assert_eq!(enhancer.pending_timers(), 1);

    enhancer.advance(&mut doc, Duration::from_secs(4));
    assert!(doc.get_element_by_id("saved").is_some());

    enhancer.advance(&mut doc, Duration::from_secs(1));
    assert!(doc.get_element_by_id("saved").is_none());
    assert!(doc.get_element_by_id("note").is_some());
    assert_eq!(enhancer.pending_timers(), 0);
    assert_eq!(enhancer.elapsed(), Duration::from_secs(5));
}
