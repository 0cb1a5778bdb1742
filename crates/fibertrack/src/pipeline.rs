//! Tracking pipeline
//!
//! One raw event in, at most one [`TrackEvent`] out: filter, extract,
//! assemble, dispatch, then remember the record as the last event.

use fibertrack_dom::{DomTree, NodeId, UiEvent};

use crate::config::ResolvedConfig;
use crate::element_info::extract_element_info;
use crate::event::TrackEvent;
use crate::fiber::{extract_fiber_info, resolve};
use crate::filter::{FilterRequest, trackable_element};
use crate::registry::ListenerRegistry;
use crate::timing::Clock;

/// What happened to one raw event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Tracking is switched off
    Disabled,
    /// No trackable element for this event
    Filtered,
    /// A record was built and offered to `delivered` subscriptions
    Dispatched { delivered: usize },
}

impl DispatchOutcome {
    pub fn is_dispatched(&self) -> bool {
        matches!(self, DispatchOutcome::Dispatched { .. })
    }
}

/// Filter/extract/dispatch pipeline with its subscriptions and last event
pub struct Pipeline {
    config: ResolvedConfig,
    registry: ListenerRegistry,
    last_event: Option<TrackEvent>,
    clock: Box<dyn Clock>,
}

impl Pipeline {
    pub fn new(config: ResolvedConfig, clock: impl Clock + 'static) -> Self {
        Self {
            config,
            registry: ListenerRegistry::new(),
            last_event: None,
            clock: Box::new(clock),
        }
    }

    /// Run one raw event through the pipeline
    pub fn handle_event(&mut self, tree: &DomTree, raw: &UiEvent) -> DispatchOutcome {
        if !self.config.enabled {
            return DispatchOutcome::Disabled;
        }

        let request = FilterRequest::from_config(&self.config, &raw.event_type, raw.target);
        let Some(element) = trackable_element(tree, &request) else {
            return DispatchOutcome::Filtered;
        };

        let record = self.assemble(tree, raw, element);
        let delivered = self.registry.invoke(&record, tree, element, record.timestamp);

        // Overwritten even when nobody received it
        self.last_event = Some(record);
        DispatchOutcome::Dispatched { delivered }
    }

    fn assemble(&self, tree: &DomTree, raw: &UiEvent, element: NodeId) -> TrackEvent {
        let node = resolve(tree, element);
        TrackEvent {
            event_type: raw.event_type.clone(),
            timestamp: self.clock.now_ms(),
            element: extract_element_info(tree, element),
            fiber: extract_fiber_info(node.as_ref()),
            raw: raw.clone(),
            raw_fiber_node: node,
        }
    }

    /// Fire debounced deliveries that are due now
    pub fn poll(&mut self) -> usize {
        let now = self.clock.now_ms();
        self.registry.poll(now)
    }

    /// Most recent record, if any was ever dispatched
    pub fn last_event(&self) -> Option<&TrackEvent> {
        self.last_event.as_ref()
    }

    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    pub fn registry(&self) -> &ListenerRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ListenerRegistry {
        &mut self.registry
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("last_event", &self.last_event)
            .finish_non_exhaustive()
    }
}
