//! Tracker lifecycle
//!
//! Owns the pipeline and the set of platform capture listeners. One
//! listener exists per event name with at least one subscription, and only
//! while the tracker is initialized.

use std::collections::BTreeSet;

use fibertrack_dom::{DomTree, UiEvent};

use crate::TrackerError;
use crate::config::{ResolvedConfig, TrackerOptions};
use crate::event::TrackEvent;
use crate::pipeline::{DispatchOutcome, Pipeline};
use crate::registry::{ListenerOptions, SubscriptionId};
use crate::timing::{Clock, SystemClock};

/// Interaction tracker
#[derive(Debug)]
pub struct Tracker {
    pipeline: Pipeline,
    initialized: bool,
    /// Event names with an attached capture listener
    listening: BTreeSet<String>,
}

impl Tracker {
    /// Create a tracker using the wall clock
    pub fn new(options: TrackerOptions) -> Result<Self, TrackerError> {
        Self::with_clock(options, SystemClock)
    }

    /// Create a tracker with a custom time source
    pub fn with_clock(options: TrackerOptions, clock: impl Clock + 'static) -> Result<Self, TrackerError> {
        let config = ResolvedConfig::resolve(&options)?;
        Ok(Self {
            pipeline: Pipeline::new(config, clock),
            initialized: false,
            listening: BTreeSet::new(),
        })
    }

    /// Start listening. Idempotent.
    pub fn init(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;
        tracing::debug!("Tracker initialized");
        self.sync_listeners();
    }

    /// Stop every listener and drop all subscriptions. The last event
    /// stays readable.
    pub fn destroy(&mut self) {
        for event_type in std::mem::take(&mut self.listening) {
            tracing::debug!("Detached capture listener for {}", event_type);
        }
        self.pipeline.registry_mut().clear();
        self.initialized = false;
    }

    /// Subscribe to `event_type`
    pub fn on(&mut self, event_type: &str, callback: impl FnMut(&TrackEvent) + 'static) -> SubscriptionId {
        self.on_with(event_type, ListenerOptions::default(), callback)
    }

    /// Subscribe with selector scoping, `once`, debounce or throttle
    pub fn on_with(
        &mut self,
        event_type: &str,
        options: ListenerOptions,
        callback: impl FnMut(&TrackEvent) + 'static,
    ) -> SubscriptionId {
        let id = self.pipeline.registry_mut().subscribe(event_type, options, callback);
        self.sync_listeners();
        id
    }

    /// Remove a subscription
    pub fn off(&mut self, id: SubscriptionId) -> bool {
        let Some(event_type) = self.pipeline.registry().event_type_of(id).map(str::to_owned) else {
            return false;
        };
        self.pipeline.registry_mut().unsubscribe(id);
        tracing::debug!("Removed {} subscription {}", event_type, id.0);
        self.sync_listeners();
        true
    }

    /// Feed one platform event. Returns `None` when no capture listener
    /// exists for its name.
    pub fn handle_event(&mut self, tree: &DomTree, event: &UiEvent) -> Option<DispatchOutcome> {
        if !self.listening.contains(&event.event_type) {
            return None;
        }

        let outcome = self.pipeline.handle_event(tree, event);
        if self.pipeline.config().debug {
            self.log_outcome(outcome);
        }

        // The last `once` subscription for this name may have gone
        if !self.pipeline.registry().has_subscribers(&event.event_type) {
            self.sync_listeners();
        }
        Some(outcome)
    }

    /// Fire debounced deliveries that are due
    pub fn poll(&mut self) -> usize {
        let fired = self.pipeline.poll();
        if fired > 0 {
            self.sync_listeners();
        }
        fired
    }

    /// When the next debounced delivery falls due, in clock milliseconds.
    /// Hosts call [`Tracker::poll`] at or after this time.
    pub fn next_deadline(&self) -> Option<f64> {
        self.pipeline.registry().next_deadline()
    }

    pub fn last_event(&self) -> Option<&TrackEvent> {
        self.pipeline.last_event()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Event names with an attached capture listener
    pub fn listened_event_types(&self) -> &BTreeSet<String> {
        &self.listening
    }

    pub fn config(&self) -> &ResolvedConfig {
        self.pipeline.config()
    }

    /// Attach/detach listeners to match the subscribed event names
    fn sync_listeners(&mut self) {
        if !self.initialized {
            return;
        }
        let wanted = self.pipeline.registry().registered_event_types();

        for event_type in self.listening.difference(&wanted) {
            tracing::debug!("Detached capture listener for {}", event_type);
        }
        for event_type in wanted.difference(&self.listening) {
            tracing::debug!("Attached capture listener for {}", event_type);
        }
        self.listening = wanted;
    }

    fn log_outcome(&self, outcome: DispatchOutcome) {
        match outcome {
            DispatchOutcome::Dispatched { delivered } => {
                let Some(record) = self.pipeline.last_event() else {
                    return;
                };
                match record.to_json() {
                    Ok(json) => tracing::debug!("Tracked {} ({} delivered): {}", record.event_type, delivered, json),
                    Err(err) => tracing::warn!("Could not render {} record: {}", record.event_type, err),
                }
            }
            DispatchOutcome::Filtered => tracing::debug!("Event dropped by filter"),
            DispatchOutcome::Disabled => {}
        }
    }
}
