//! fibertrack DOM - Document Object Model
//!
//! Arena-based DOM tree used by the fibertrack interaction tracker.
//!
//! Besides tags, attributes and text, every element carries a bag of
//! dynamically-typed *own properties* ([`HostValue`]). UI frameworks hang
//! their private bookkeeping there, and the tracker reads it back.

mod node;
mod tree;
mod document;
mod error;
pub mod attributes;
pub mod dataset;
pub mod value;
pub mod events;

pub use node::{Node, NodeData, ElementData};
pub use tree::{Children, DomTree};
pub use document::Document;
pub use error::DomError;
pub use attributes::{Attr, NamedNodeMap};
pub use value::{FunctionKind, HostFunction, HostObject, HostValue};
pub use events::UiEvent;

use serde::Serialize;

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check whether this id points at a node
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Raw arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
