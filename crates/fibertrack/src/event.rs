//! Track event record
//!
//! The unit handed to subscribers. Serialized field names are part of the
//! public contract: `type`, `timestamp`, `element`, `fiber`, `raw`,
//! `rawFiberNode`.

use fibertrack_dom::UiEvent;
use serde::Serialize;

use crate::element_info::ElementInfo;
use crate::fiber::{FiberInfo, FiberNode};

/// Normalized record of one reported interaction
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackEvent {
    /// Event name (`click`, `input`, ...)
    #[serde(rename = "type")]
    pub event_type: String,
    /// Milliseconds, taken when the record was assembled
    pub timestamp: f64,
    pub element: ElementInfo,
    /// Component metadata, when the element has an internal node
    pub fiber: Option<FiberInfo>,
    /// The platform event as received
    pub raw: UiEvent,
    /// The element's internal node, for advanced in-process consumers.
    /// Framework nodes are cyclic, so this is never serialized.
    #[serde(skip)]
    pub raw_fiber_node: Option<FiberNode>,
}

impl TrackEvent {
    /// Render as a JSON string
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
