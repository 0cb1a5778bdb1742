//! Listener Registry
//!
//! Subscriptions keyed by event name, delivered in subscription order.
//! Each subscription may be scoped to a selector, fire once, or be
//! debounced/throttled.

use std::collections::BTreeSet;
use std::fmt;

use fibertrack_css::{SelectorList, parse_selector_list};
use fibertrack_dom::{DomTree, NodeId};

use crate::TrackerError;
use crate::classifier::matches_any_selector;
use crate::event::TrackEvent;
use crate::timing::{Callback, Debounced, Throttled, debounce, throttle};

/// Subscription handle returned by [`ListenerRegistry::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

/// Per-subscription delivery options
#[derive(Debug, Clone, Default)]
pub struct ListenerOptions {
    /// Deliver only when the reported element matches
    pub selector: Option<SelectorList>,
    /// Remove after the first delivery
    pub once: bool,
    /// Quiet period in milliseconds; takes precedence over `throttle_ms`
    pub debounce_ms: Option<f64>,
    /// Minimum interval between deliveries in milliseconds
    pub throttle_ms: Option<f64>,
}

impl ListenerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options scoped to a selector string
    pub fn matching(selector: &str) -> Result<Self, TrackerError> {
        let list = parse_selector_list(selector).map_err(|source| TrackerError::InvalidSelector {
            selector: selector.to_string(),
            source,
        })?;
        Ok(Self::new().with_selector(list))
    }

    pub fn with_selector(mut self, selector: SelectorList) -> Self {
        self.selector = Some(selector);
        self
    }

    pub fn once(mut self) -> Self {
        self.once = true;
        self
    }

    pub fn debounce(mut self, wait_ms: f64) -> Self {
        self.debounce_ms = Some(wait_ms);
        self
    }

    pub fn throttle(mut self, interval_ms: f64) -> Self {
        self.throttle_ms = Some(interval_ms);
        self
    }
}

enum Delivery {
    Direct(Callback<TrackEvent>),
    Debounced(Debounced<TrackEvent>),
    Throttled(Throttled<TrackEvent>),
}

impl Delivery {
    fn new(options: &ListenerOptions, callback: Callback<TrackEvent>) -> Self {
        match (options.debounce_ms, options.throttle_ms) {
            (Some(wait), _) => Delivery::Debounced(debounce(wait, callback)),
            (None, Some(interval)) => Delivery::Throttled(throttle(interval, callback)),
            (None, None) => Delivery::Direct(callback),
        }
    }

    /// Hand the record over; reports whether it was accepted
    fn deliver(&mut self, record: &TrackEvent, now_ms: f64) -> bool {
        match self {
            Delivery::Direct(callback) => {
                callback(record);
                true
            }
            Delivery::Debounced(debounced) => {
                debounced.call(record.clone(), now_ms);
                true
            }
            Delivery::Throttled(throttled) => throttled.call(record, now_ms),
        }
    }
}

impl fmt::Debug for Delivery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delivery::Direct(_) => f.write_str("Direct"),
            Delivery::Debounced(d) => fmt::Debug::fmt(d, f),
            Delivery::Throttled(t) => fmt::Debug::fmt(t, f),
        }
    }
}

#[derive(Debug)]
struct Subscription {
    id: SubscriptionId,
    event_type: String,
    selector: Option<SelectorList>,
    once: bool,
    delivery: Delivery,
}

/// Ordered set of subscriptions
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    subscriptions: Vec<Subscription>,
    next_id: u64,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a subscription for `event_type`
    pub fn subscribe(
        &mut self,
        event_type: impl Into<String>,
        options: ListenerOptions,
        callback: impl FnMut(&TrackEvent) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;

        let delivery = Delivery::new(&options, Box::new(callback));
        self.subscriptions.push(Subscription {
            id,
            event_type: event_type.into(),
            selector: options.selector,
            once: options.once,
            delivery,
        });
        id
    }

    /// Remove a subscription, dropping any pending delivery
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() < before
    }

    /// Event name a subscription listens to
    pub fn event_type_of(&self, id: SubscriptionId) -> Option<&str> {
        self.subscriptions
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.event_type.as_str())
    }

    /// Offer `record` to every subscription for its event name.
    ///
    /// `element` is the reported element, checked against selector-scoped
    /// subscriptions. Returns how many subscriptions accepted the record
    /// (a debounced one counts when scheduled).
    pub fn invoke(&mut self, record: &TrackEvent, tree: &DomTree, element: NodeId, now_ms: f64) -> usize {
        let mut delivered = 0;
        let mut spent = Vec::new();

        for subscription in &mut self.subscriptions {
            if subscription.event_type != record.event_type {
                continue;
            }
            if let Some(selector) = &subscription.selector {
                if !matches_any_selector(tree, element, std::slice::from_ref(selector)) {
                    continue;
                }
            }
            if !subscription.delivery.deliver(record, now_ms) {
                continue;
            }
            delivered += 1;

            // A debounced once-subscription is spent when it fires in poll
            if subscription.once && !matches!(subscription.delivery, Delivery::Debounced(_)) {
                spent.push(subscription.id);
            }
        }

        if !spent.is_empty() {
            self.subscriptions.retain(|s| !spent.contains(&s.id));
        }
        delivered
    }

    /// Fire debounced deliveries whose quiet period elapsed
    pub fn poll(&mut self, now_ms: f64) -> usize {
        let mut fired = 0;
        let mut spent = Vec::new();

        for subscription in &mut self.subscriptions {
            if let Delivery::Debounced(debounced) = &mut subscription.delivery {
                if debounced.poll(now_ms) {
                    fired += 1;
                    if subscription.once {
                        spent.push(subscription.id);
                    }
                }
            }
        }

        if !spent.is_empty() {
            self.subscriptions.retain(|s| !spent.contains(&s.id));
        }
        fired
    }

    /// Earliest pending debounce deadline
    pub fn next_deadline(&self) -> Option<f64> {
        self.subscriptions
            .iter()
            .filter_map(|s| match &s.delivery {
                Delivery::Debounced(d) => d.deadline(),
                _ => None,
            })
            .reduce(f64::min)
    }

    /// Event names with at least one subscription
    pub fn registered_event_types(&self) -> BTreeSet<String> {
        self.subscriptions.iter().map(|s| s.event_type.clone()).collect()
    }

    pub fn has_subscribers(&self, event_type: &str) -> bool {
        self.subscriptions.iter().any(|s| s.event_type == event_type)
    }

    /// Drop every subscription and pending delivery
    pub fn clear(&mut self) {
        self.subscriptions.clear();
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}
