//! Integration tests - Full tracking pipeline
//!
//! Tests the complete workflow: raw event → filter → extract → dispatch

use std::cell::RefCell;
use std::rc::Rc;

use fibertrack::dom::{Document, HostFunction, HostObject, NodeId, UiEvent};
use fibertrack::fiber::reset_cache;
use fibertrack::{
    DispatchOutcome, FiberKind, ListenerOptions, ManualClock, TrackEvent, Tracker, TrackerOptions,
};

type Records = Rc<RefCell<Vec<TrackEvent>>>;

fn collect(records: &Records) -> impl FnMut(&TrackEvent) + 'static {
    let records = Rc::clone(records);
    move |event: &TrackEvent| records.borrow_mut().push(event.clone())
}

fn tracker(options: TrackerOptions) -> (Tracker, ManualClock) {
    let clock = ManualClock::new(5_000.0);
    let tracker = Tracker::with_clock(options, clock.clone()).unwrap();
    (tracker, clock)
}

/// A page with a nav, a plain button and a form
struct Page {
    document: Document,
    nav_link: NodeId,
    nav_text: NodeId,
    button: NodeId,
    input: NodeId,
}

fn page() -> Page {
    let mut document = Document::new("https://app.example/").unwrap();
    let body = document.body();
    let tree = document.tree_mut();

    let nav = tree.append_element(body, "nav").unwrap();
    let nav_link = tree.append_element(nav, "a").unwrap();
    tree.set_attribute(nav_link, "href", "/docs").unwrap();
    let nav_text = tree.append_text(nav_link, "Docs").unwrap();

    let button = tree.append_element(body, "button").unwrap();
    tree.set_attribute(button, "id", "save").unwrap();
    tree.append_text(button, "Save").unwrap();

    let form = tree.append_element(body, "form").unwrap();
    let input = tree.append_element(form, "input").unwrap();
    tree.set_attribute(input, "type", "text").unwrap();

    Page { document, nav_link, nav_text, button, input }
}

// ============================================================================
// END-TO-END
// ============================================================================

#[test]
fn test_button_without_internal_node() {
    reset_cache();
    let page = page();
    let records = Records::default();
    let (mut tracker, _) = tracker(TrackerOptions::new());
    tracker.on("click", collect(&records));
    tracker.init();

    let outcome = tracker.handle_event(page.document.tree(), &UiEvent::click(page.button));
    assert_eq!(outcome, Some(DispatchOutcome::Dispatched { delivered: 1 }));

    let records = records.borrow();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].element.tag_name, "BUTTON");
    assert_eq!(records[0].element.id, "save");
    assert_eq!(records[0].element.text, "Save");
    assert!(records[0].fiber.is_none());
    assert!(records[0].raw_fiber_node.is_none());
    assert_eq!(records[0].timestamp, 5_000.0);
}

#[test]
fn test_component_stack_end_to_end() {
    reset_cache();
    let mut page = page();
    let app = HostObject::new().with("type", HostFunction::new("App"));
    let form = HostObject::new()
        .with("type", HostFunction::new("Form"))
        .with("return", app);
    let submit = HostObject::new()
        .with("type", HostFunction::new("SubmitButton"))
        .with("return", form);
    let host = HostObject::new()
        .with("type", "button")
        .with(
            "memoizedProps",
            HostObject::new()
                .with("onClick", HostFunction::new("submit"))
                .with("children", "Save"),
        )
        .with("return", submit);
    page.document
        .tree_mut()
        .set_property(page.button, "__reactFiber$x9k2", host)
        .unwrap();

    let (mut tracker, _) = tracker(TrackerOptions::new());
    tracker.on("click", |_| {});
    tracker.init();
    tracker.handle_event(page.document.tree(), &UiEvent::click(page.button));

    let last = tracker.last_event().unwrap();
    let fiber = last.fiber.as_ref().unwrap();
    assert_eq!(fiber.component_name.as_deref(), Some("SubmitButton"));
    assert_eq!(fiber.component_stack, vec!["SubmitButton", "Form", "App"]);
    assert_eq!(fiber.handlers, vec!["onClick"]);
    assert_eq!(
        last.raw_fiber_node.as_ref().map(|node| node.kind()),
        Some(FiberKind::Host("button".to_string()))
    );
}

#[test]
fn test_legacy_internal_instance() {
    reset_cache();
    let mut tree_page = page();
    let outer = HostObject::new().with(
        "_currentElement",
        HostObject::new().with("type", HostFunction::new("Toolbar").with_display_name("LegacyToolbar")),
    );
    let instance = HostObject::new()
        .with(
            "_currentElement",
            HostObject::new().with("type", "button").with(
                "props",
                HostObject::new().with("onMouseDown", HostFunction::anonymous()),
            ),
        )
        .with("_hostParent", outer);
    tree_page
        .document
        .tree_mut()
        .set_property(tree_page.button, "__reactInternalInstance$legacy1", instance)
        .unwrap();

    let (mut tracker, _) = tracker(TrackerOptions::new());
    tracker.on("click", |_| {});
    tracker.init();
    tracker.handle_event(tree_page.document.tree(), &UiEvent::click(tree_page.button));

    let fiber = tracker.last_event().and_then(|e| e.fiber.clone()).unwrap();
    assert_eq!(fiber.component_name.as_deref(), Some("LegacyToolbar"));
    assert_eq!(fiber.handlers, vec!["onMouseDown"]);
}

#[test]
fn test_include_selectors_allowlist() {
    let page = page();
    let records = Records::default();
    let (mut tracker, _) = tracker(TrackerOptions::new().with_include_selector("nav a"));
    tracker.on("click", collect(&records));
    tracker.init();
    let tree = page.document.tree();

    let on_text = tracker.handle_event(tree, &UiEvent::click(page.nav_text));
    let on_link = tracker.handle_event(tree, &UiEvent::click(page.nav_link));
    let on_button = tracker.handle_event(tree, &UiEvent::click(page.button));

    assert!(on_text.is_some_and(|o| o.is_dispatched()));
    assert!(on_link.is_some_and(|o| o.is_dispatched()));
    assert_eq!(on_button, Some(DispatchOutcome::Filtered));
    let records = records.borrow();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].element.tag_name, "A");
    assert_eq!(records[0].element.href.as_deref(), Some("/docs"));
    assert_eq!(records[0].raw.target, page.nav_text);
    assert_eq!(records[1].raw.target, page.nav_link);
}

#[test]
fn test_disabled_tracker_reports_nothing() {
    let page = page();
    let records = Records::default();
    let (mut tracker, _) = tracker(TrackerOptions::new().with_enabled(false));
    tracker.on("click", collect(&records));
    tracker.init();

    let outcome = tracker.handle_event(page.document.tree(), &UiEvent::click(page.button));
    assert_eq!(outcome, Some(DispatchOutcome::Disabled));
    assert!(records.borrow().is_empty());
    assert!(tracker.last_event().is_none());
}

#[test]
fn test_debug_mode_does_not_change_outcomes() {
    let page = page();
    let mut outcomes = Vec::new();

    for debug in [false, true] {
        let (mut tracker, _) = tracker(TrackerOptions::new().with_debug(debug));
        tracker.on("click", |_| {});
        tracker.on("change", |_| {});
        tracker.init();
        let tree = page.document.tree();
        outcomes.push(vec![
            tracker.handle_event(tree, &UiEvent::click(page.button)),
            tracker.handle_event(tree, &UiEvent::click(page.document.body())),
            tracker.handle_event(tree, &UiEvent::new("change", page.input)),
        ]);
    }

    assert_eq!(outcomes[0], outcomes[1]);
    assert_eq!(outcomes[0][1], Some(DispatchOutcome::Filtered));
}

#[test]
fn test_options_from_json() {
    let mut page = page();
    page.document
        .tree_mut()
        .set_attribute(page.input, "class", "secret")
        .unwrap();
    let options = TrackerOptions::from_json(r#"{ "ignoreSelectors": [".secret"] }"#).unwrap();
    let (mut tracker, _) = tracker(options);
    tracker.on("input", |_| {});
    tracker.init();

    let outcome = tracker.handle_event(page.document.tree(), &UiEvent::new("input", page.input));
    assert_eq!(outcome, Some(DispatchOutcome::Filtered));
}

#[test]
fn test_extreme_nth_ignore_selector() {
    let page = page();
    let options = TrackerOptions::from_json(r#"{ "ignoreSelectors": [":nth-child(2n-2147483648)"] }"#).unwrap();
    let (mut tracker, _) = tracker(options);
    tracker.on("click", |_| {});
    tracker.init();

    // The button is the second child of body, which the expression selects
    let outcome = tracker.handle_event(page.document.tree(), &UiEvent::click(page.button));
    assert_eq!(outcome, Some(DispatchOutcome::Filtered));
    let outcome = tracker.handle_event(page.document.tree(), &UiEvent::click(page.nav_link));
    assert!(outcome.is_some_and(|o| o.is_dispatched()));
}

// ============================================================================
// SUBSCRIPTIONS
// ============================================================================

#[test]
fn test_debounced_subscription_through_tracker() {
    let page = page();
    let records = Records::default();
    let (mut tracker, clock) = tracker(TrackerOptions::new());
    tracker.on_with("input", ListenerOptions::new().debounce(300.0), collect(&records));
    tracker.init();
    let tree = page.document.tree();

    for _ in 0..3 {
        tracker.handle_event(tree, &UiEvent::new("input", page.input));
        clock.advance(100.0);
    }
    assert_eq!(tracker.poll(), 0);
    clock.advance(200.0);
    assert_eq!(tracker.poll(), 1);

    let records = records.borrow();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].timestamp, 5_200.0);
}

#[test]
fn test_throttled_scroll() {
    let page = page();
    let records = Records::default();
    let (mut tracker, clock) = tracker(TrackerOptions::new());
    tracker.on_with("scroll", ListenerOptions::new().throttle(1_000.0), collect(&records));
    tracker.init();
    let tree = page.document.tree();

    for _ in 0..10 {
        tracker.handle_event(tree, &UiEvent::non_bubbling("scroll", page.document.body()));
        clock.advance(250.0);
    }

    // Fires at 0, 1000, 2000
    assert_eq!(records.borrow().len(), 3);
    // The last-event slot still follows every record
    assert_eq!(tracker.last_event().map(|e| e.timestamp), Some(7_250.0));
}

#[test]
fn test_record_json_shape() {
    let page = page();
    let (mut tracker, _) = tracker(TrackerOptions::new());
    tracker.on("change", |_| {});
    tracker.init();
    tracker.handle_event(page.document.tree(), &UiEvent::new("change", page.input));

    let json = tracker.last_event().unwrap().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["type"], "change");
    assert_eq!(value["element"]["tagName"], "INPUT");
    assert_eq!(value["element"]["type"], "text");
    assert!(value["fiber"].is_null());
    assert_eq!(value["raw"]["type"], "change");
    assert!(value.get("rawFiberNode").is_none());
}
