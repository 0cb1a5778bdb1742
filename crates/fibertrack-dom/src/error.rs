//! DOM errors

use crate::NodeId;

/// DOM operation error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("Node {0:?} does not exist")]
    InvalidNode(NodeId),

    #[error("Node {0:?} is not an element")]
    NotAnElement(NodeId),

    #[error("Cannot append {child:?} into {parent:?}: would create a cycle")]
    HierarchyRequest { parent: NodeId, child: NodeId },
}
