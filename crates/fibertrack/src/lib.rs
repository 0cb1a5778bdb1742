//! fibertrack
//!
//! Interaction tracking for pages rendered by a component framework.
//!
//! Raw UI events are filtered down to the element a user actually meant to
//! interact with, described, enriched with component metadata read from
//! the framework's internal tree, and handed to subscribers as
//! [`TrackEvent`] records.
//!
//! # Example
//! ```rust,ignore
//! use fibertrack::{Tracker, TrackerOptions};
//!
//! let mut tracker = Tracker::new(TrackerOptions::new().with_ignore_selector(".no-track"))?;
//! tracker.on("click", |event| println!("{:?}", event.fiber));
//! tracker.init();
//! tracker.handle_event(document.tree(), &UiEvent::click(button));
//! ```

mod error;
mod pipeline;
mod tracker;
pub mod category;
pub mod classifier;
pub mod config;
pub mod element_info;
pub mod event;
pub mod fiber;
pub mod filter;
pub mod registry;
pub mod timing;

pub use error::TrackerError;
pub use pipeline::{DispatchOutcome, Pipeline};
pub use tracker::Tracker;
pub use category::{EventCategory, classify, handlers_for};
pub use config::{ResolvedConfig, TrackerOptions};
pub use element_info::{ElementInfo, extract_element_info};
pub use event::TrackEvent;
pub use fiber::{FiberInfo, FiberKind, FiberNode, NodeLocator, extract_fiber_info};
pub use filter::{FilterRequest, trackable_element};
pub use registry::{ListenerOptions, ListenerRegistry, SubscriptionId};
pub use timing::{Clock, ManualClock, SystemClock};

// Re-export sub-crates for advanced usage
pub use fibertrack_dom as dom;
pub use fibertrack_css as css;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
