//! Tracks a few synthetic interactions on a small page.
//!
//! Run with `RUST_LOG=debug` to see listener and record logging.

use fibertrack::dom::{Document, HostFunction, HostObject, UiEvent};
use fibertrack::{ListenerOptions, Tracker, TrackerOptions};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut document = Document::new("https://shop.example/checkout")?;
    let body = document.body();
    let tree = document.tree_mut();

    // <form><div class="row"><button><span>Pay now</span></button></div></form>
    let form = tree.append_element(body, "form")?;
    let row = tree.append_element(form, "div")?;
    tree.set_attribute(row, "class", "row")?;
    let button = tree.append_element(row, "button")?;
    tree.set_attribute(button, "data-track-id", "pay")?;
    let label = tree.append_element(button, "span")?;
    tree.append_text(label, "Pay now")?;
    let banner = tree.append_element(body, "div")?;
    tree.set_attribute(banner, "class", "ad no-track")?;

    // Internal nodes: App > CheckoutForm > PayButton > <button onClick>
    let app = HostObject::new().with("type", HostFunction::new("App"));
    let checkout = HostObject::new()
        .with("type", HostFunction::new("CheckoutForm"))
        .with("return", app);
    let pay_button = HostObject::new()
        .with("type", HostFunction::new("PayButton"))
        .with("return", checkout);
    let props = HostObject::new().with("onClick", HostFunction::new("handlePay"));
    let host = HostObject::new()
        .with("type", "button")
        .with("memoizedProps", props)
        .with("return", pay_button);
    tree.set_property(button, "__reactFiber$demo", host)?;

    let options = TrackerOptions::new()
        .with_ignore_selector(".no-track")
        .with_debug(true);
    let mut tracker = Tracker::new(options)?;

    tracker.on("click", |event| {
        let component = event
            .fiber
            .as_ref()
            .and_then(|fiber| fiber.component_name.as_deref())
            .unwrap_or("<none>");
        println!("click on {} in {}", event.element.tag_name, component);
    });
    tracker.on_with("click", ListenerOptions::matching("[data-track-id]")?.once(), |event| {
        println!("first tracked click: {:?}", event.element.dataset);
    });
    tracker.init();

    for target in [label, banner, label] {
        let outcome = tracker.handle_event(document.tree(), &UiEvent::click(target));
        println!("-> {:?}", outcome);
    }

    if let Some(last) = tracker.last_event() {
        println!("last event: {}", last.to_json()?);
    }

    tracker.destroy();
    Ok(())
}
