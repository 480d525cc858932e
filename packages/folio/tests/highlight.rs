use std::sync::Arc;

use folio::highlight::{
    ApplyOutcome, HighlightColor, TooltipCommand, TooltipPosition, TooltipState, WrapStrategy,
};
use folio::{EnhanceConfig, HtmlDocument, PageEnhancer};
use folio_dom::{BaseDocument, DocumentConfig};
use folio_traits::{MemoryStorage, PointerEvent, Rect, UiEvent};

const PAGE: &str = concat!(
    "<html><body>",
    "<div class=\"post-content\">",
    "<p id=\"first\">hello world</p>",
    "<p id=\"second\">second para</p>",
    "</div>",
    "<div id=\"selectionTooltip\" class=\"d-none\">",
    "<button id=\"green\" class=\"highlight-btn\" data-color=\"green\"><i id=\"green-icon\"></i></button>",
    "<button id=\"yellow\" class=\"highlight-btn\" data-color=\"yellow\"></button>",
    "<button id=\"italic\" class=\"format-btn\" data-format=\"italic\"></button>",
    "</div>",
    "<p id=\"outside\">not part of the article</p>",
    "</body></html>"
);

fn setup() -> (HtmlDocument, PageEnhancer) {
    setup_page(PAGE)
}

fn setup_page(html: &str) -> (HtmlDocument, PageEnhancer) {
    let mut doc = HtmlDocument::from_html(html, DocumentConfig::default());
    let enhancer = PageEnhancer::install(
        &mut doc,
        EnhanceConfig::default(),
        Arc::new(MemoryStorage::new()),
    )
    .unwrap();
    (doc, enhancer)
}

fn id(doc: &BaseDocument, id: &str) -> usize {
    doc.get_element_by_id(id).unwrap()
}

fn text_of(doc: &BaseDocument, element_id: &str) -> usize {
    doc.tree()[id(doc, element_id)].children[0]
}

fn pointer_up(enhancer: &mut PageEnhancer, doc: &mut BaseDocument, target: usize) {
    enhancer.handle_ui_event(doc, UiEvent::PointerUp(PointerEvent::primary(target)));
}

fn tooltip_hidden(doc: &BaseDocument) -> bool {
    doc.tree()[id(doc, "selectionTooltip")].has_class("d-none")
}

#[test]
fn tooltip_is_shown_above_the_selection() {
    let (mut doc, mut enhancer) = setup();
    let text = text_of(&doc, "first");
    doc.set_node_rect(text, Rect::new(100.0, 200.0, 80.0, 20.0));
    doc.set_selection(text, 0, text, 11).unwrap();

    pointer_up(&mut enhancer, &mut doc, text);

    let expected = TooltipPosition {
        left: 60.0,
        top: 140.0,
    };
    assert_eq!(enhancer.tooltip_state(), TooltipState::Visible(expected));
    let tooltip = doc.tree()[id(&doc, "selectionTooltip")].element_data().unwrap();
    assert!(!tooltip.has_class("d-none"));
    assert_eq!(tooltip.style_property("left"), Some("60px"));
    assert_eq!(tooltip.style_property("top"), Some("140px"));
}

#[test]
fn clicking_a_colour_wraps_the_selection() {
    let (mut doc, mut enhancer) = setup();
    let text = text_of(&doc, "first");
    doc.set_selection(text, 0, text, 11).unwrap();
    pointer_up(&mut enhancer, &mut doc, text);
    assert!(enhancer.tooltip_state().is_visible());

    // Released over the icon inside the button; the click bubbles to the button
    let icon = id(&doc, "green-icon");
    pointer_up(&mut enhancer, &mut doc, icon);

    let first = id(&doc, "first");
    assert_eq!(
        doc.outer_html(first),
        "<p id=\"first\"><span class=\"highlight-green\">hello world</span></p>"
    );
    assert!(!doc.selection().has_range());
    assert_eq!(enhancer.tooltip_state(), TooltipState::Hidden);
    assert!(tooltip_hidden(&doc));
}

#[test]
fn highlighting_without_a_selection_changes_nothing() {
    let (mut doc, mut enhancer) = setup();
    let before = doc.outer_html(0);

    let outcome = enhancer
        .highlight_mut()
        .unwrap()
        .highlight(&mut doc, &HighlightColor::Yellow);

    assert_eq!(outcome, ApplyOutcome::NoSelection);
    assert_eq!(doc.outer_html(0), before);
    assert!(tooltip_hidden(&doc));
}

#[test]
fn watcher_gives_the_same_answer_twice() {
    let (mut doc, enhancer) = setup();
    let text = text_of(&doc, "second");
    doc.set_node_rect(text, Rect::new(10.0, 400.0, 110.0, 20.0));
    doc.set_selection(text, 0, text, 6).unwrap();

    let watcher = enhancer.highlight().unwrap().watcher();
    let snapshot = doc.selection_snapshot();
    let once = watcher.watch_pointer_up(&doc, snapshot.as_ref(), text);
    let twice = watcher.watch_pointer_up(&doc, snapshot.as_ref(), text);
    assert_eq!(once, twice);
    assert!(matches!(once, TooltipCommand::Show(_)));
}

#[test]
fn selection_outside_the_article_hides_the_tooltip() {
    let (mut doc, mut enhancer) = setup();
    let inside = text_of(&doc, "first");
    doc.set_selection(inside, 0, inside, 5).unwrap();
    pointer_up(&mut enhancer, &mut doc, inside);
    assert!(enhancer.tooltip_state().is_visible());

    let outside = text_of(&doc, "outside");
    doc.set_selection(outside, 0, outside, 3).unwrap();
    pointer_up(&mut enhancer, &mut doc, outside);
    assert_eq!(enhancer.tooltip_state(), TooltipState::Hidden);
    assert!(tooltip_hidden(&doc));
}

#[test]
fn blank_selection_hides_the_tooltip() {
    let (mut doc, mut enhancer) = setup();
    let text = text_of(&doc, "first");
    doc.set_selection(text, 5, text, 6).unwrap();
    pointer_up(&mut enhancer, &mut doc, text);
    assert_eq!(enhancer.tooltip_state(), TooltipState::Hidden);
}

#[test]
fn releasing_over_the_tooltip_keeps_it() {
    let (doc, enhancer) = setup();
    let watcher = enhancer.highlight().unwrap().watcher();
    let button = id(&doc, "yellow");
    assert_eq!(
        watcher.watch_pointer_up(&doc, None, button),
        TooltipCommand::Keep
    );
    let outside = id(&doc, "outside");
    assert_eq!(
        watcher.watch_pointer_up(&doc, None, outside),
        TooltipCommand::Hide
    );
}

#[test]
fn selection_across_paragraphs_is_rewrapped() {
    let (mut doc, mut enhancer) = setup();
    let first = text_of(&doc, "first");
    let second = text_of(&doc, "second");
    doc.set_selection(first, 6, second, 6).unwrap();

    let outcome = enhancer
        .highlight_mut()
        .unwrap()
        .highlight(&mut doc, &HighlightColor::Yellow);
    assert!(matches!(
        outcome,
        ApplyOutcome::Applied {
            strategy: WrapStrategy::FragmentRewrap,
            ..
        }
    ));

    let content = doc.query_selector(".post-content").unwrap().unwrap();
    assert_eq!(doc.text_content(content), "hello worldsecond para");
    assert_eq!(
        doc.inner_html(content),
        concat!(
            "<p id=\"first\">hello </p>",
            "<span class=\"highlight-yellow\"><p id=\"first\">world</p><p id=\"second\">second</p></span>",
            "<p id=\"second\"> para</p>"
        )
    );
    assert!(!doc.selection().has_range());
}

#[test]
fn stale_selection_fails_without_touching_the_page() {
    let (mut doc, mut enhancer) = setup();
    let text = text_of(&doc, "first");
    doc.set_selection(text, 6, text, 11).unwrap();
    // The page script shortened the text after the selection was made
    doc.mutate().set_node_text(text, "hi");
    let before = doc.outer_html(0);

    let outcome = enhancer
        .highlight_mut()
        .unwrap()
        .highlight(&mut doc, &HighlightColor::Blue);

    assert!(matches!(outcome, ApplyOutcome::Failed(_)));
    assert_eq!(doc.outer_html(0), before);
    assert_eq!(enhancer.tooltip_state(), TooltipState::Hidden);
}

#[test]
fn italic_wraps_in_em() {
    let (mut doc, mut enhancer) = setup();
    let text = text_of(&doc, "second");
    doc.set_selection(text, 0, text, 6).unwrap();
    let italic = id(&doc, "italic");
    pointer_up(&mut enhancer, &mut doc, italic);

    let second = id(&doc, "second");
    assert_eq!(
        doc.outer_html(second),
        "<p id=\"second\"><em>second</em> para</p>"
    );
}

#[test]
fn missing_tooltip_turns_highlighting_off() {
    let (mut doc, mut enhancer) = setup_page(&PAGE.replace("selectionTooltip", "otherTooltip"));
    assert!(enhancer.highlight().is_none());

    let text = text_of(&doc, "first");
    doc.set_selection(text, 0, text, 11).unwrap();
    let before = doc.outer_html(0);

    pointer_up(&mut enhancer, &mut doc, text);
    assert_eq!(enhancer.tooltip_state(), TooltipState::Hidden);
    let green = id(&doc, "green");
    pointer_up(&mut enhancer, &mut doc, green);

    assert_eq!(enhancer.tooltip_state(), TooltipState::Hidden);
    assert_eq!(doc.outer_html(0), before);
    assert!(doc.selection().has_range());
}

#[test]
fn missing_content_container_turns_highlighting_off() {
    let (mut doc, mut enhancer) = setup_page(&PAGE.replace("post-content", "post-body"));
    assert!(enhancer.highlight().is_none());

    let text = text_of(&doc, "first");
    doc.set_selection(text, 0, text, 11).unwrap();
    let before = doc.outer_html(0);

    pointer_up(&mut enhancer, &mut doc, text);
    let green = id(&doc, "green");
    pointer_up(&mut enhancer, &mut doc, green);

    assert_eq!(enhancer.tooltip_state(), TooltipState::Hidden);
    assert!(tooltip_hidden(&doc));
    assert_eq!(doc.outer_html(0), before);
}

#[test]
fn backwards_selection_splits_a_straddled_inline_element() {
    let page = PAGE.replace(
        "<p id=\"second\">second para</p>",
        "<p id=\"mixed\">aa<b>bb\u{e9}</b>cc</p>",
    );
    let (mut doc, mut enhancer) = setup_page(&page);
    let mixed = id(&doc, "mixed");
    let bold = doc.query_selector("#mixed b").unwrap().unwrap();
    let bold_text = doc.tree()[bold].children[0];
    let tail_text = doc.tree()[mixed].children[2];

    // Dragged from inside "cc" back into the bold text
    doc.set_selection(tail_text, 1, bold_text, 1).unwrap();
    let outcome = enhancer
        .highlight_mut()
        .unwrap()
        .highlight(&mut doc, &HighlightColor::Green);

    assert!(matches!(
        outcome,
        ApplyOutcome::Applied {
            strategy: WrapStrategy::FragmentRewrap,
            ..
        }
    ));
    assert_eq!(
        doc.outer_html(mixed),
        "<p id=\"mixed\">aa<b>b</b><span class=\"highlight-green\"><b>b\u{e9}</b>c</span>c</p>"
    );
    assert_eq!(doc.text_content(mixed), "aabb\u{e9}cc");
}
