//! UI Events
//!
//! The raw platform event delivered to document-level listeners.

use serde::Serialize;

use crate::NodeId;

/// Raw UI event (click, input, scroll, ...)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UiEvent {
    /// Event name, lower-case (`click`, `keydown`)
    #[serde(rename = "type")]
    pub event_type: String,
    /// Node the platform dispatched the event at
    pub target: NodeId,
    /// Platform timestamp in milliseconds
    pub time_stamp: f64,
    pub bubbles: bool,
    pub cancelable: bool,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl UiEvent {
    /// Create a bubbling, cancelable event
    pub fn new(event_type: impl Into<String>, target: NodeId) -> Self {
        Self {
            event_type: event_type.into(),
            target,
            time_stamp: 0.0,
            bubbles: true,
            cancelable: true,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Create a click event
    pub fn click(target: NodeId) -> Self {
        Self::new("click", target)
    }

    /// Create a non-bubbling event (focus, blur, scroll on elements)
    pub fn non_bubbling(event_type: impl Into<String>, target: NodeId) -> Self {
        Self {
            bubbles: false,
            cancelable: false,
            ..Self::new(event_type, target)
        }
    }

    /// Set the platform timestamp
    pub fn at(mut self, time_stamp: f64) -> Self {
        self.time_stamp = time_stamp;
        self
    }

    /// Prevent default action
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    /// Stop propagation
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Check if default was prevented
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}
