//! Internal-node extractor
//!
//! Component name, component ancestry and declared handlers for one node.

use serde::Serialize;

use super::{FiberKind, FiberNode};

/// Upper bound on parent hops while collecting the component stack
pub const MAX_COMPONENT_DEPTH: usize = 50;

/// Prefix shared by every event-handler prop
const HANDLER_PREFIX: &str = "on";

/// Component metadata for a tracked element
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FiberInfo {
    /// Nearest named ancestor component
    pub component_name: Option<String>,
    /// Named ancestor components, nearest first
    pub component_stack: Vec<String>,
    /// Callable `on*` props declared on the node itself
    pub handlers: Vec<String>,
}

/// Extract component metadata. Absent input gives absent output.
pub fn extract_fiber_info(node: Option<&FiberNode>) -> Option<FiberInfo> {
    let node = node?;
    let component_stack = component_stack(node);

    Some(FiberInfo {
        component_name: component_stack.first().cloned(),
        component_stack,
        handlers: declared_handlers(node),
    })
}

/// Callable props whose name starts with `on`, in declaration order
pub fn declared_handlers(node: &FiberNode) -> Vec<String> {
    let Some(props) = node.declared_props() else {
        return Vec::new();
    };

    props
        .entries()
        .into_iter()
        .filter(|(key, value)| key.starts_with(HANDLER_PREFIX) && value.is_callable())
        .map(|(key, _)| key)
        .collect()
}

/// Whether any of `candidates` is a callable declared prop
pub fn declares_any_handler(node: &FiberNode, candidates: &[&str]) -> bool {
    let Some(props) = node.declared_props() else {
        return false;
    };
    candidates
        .iter()
        .any(|name| props.get(name).is_some_and(|v| v.is_callable()))
}

/// Display name for a component node: explicit `displayName`, else the
/// intrinsic function name. Empty names count as missing.
pub fn component_name(kind: &FiberKind) -> Option<String> {
    let FiberKind::Component(component) = kind else {
        return None;
    };
    component
        .display_name()
        .filter(|name| !name.is_empty())
        .or_else(|| Some(component.name()).filter(|name| !name.is_empty()))
        .map(str::to_string)
}

/// Walk from the node's parent upward, collecting component names.
///
/// The node itself is skipped: an event target's own node is a plain
/// element node.
fn component_stack(node: &FiberNode) -> Vec<String> {
    let mut stack = Vec::new();
    let mut current = node.parent();
    let mut hops = 0;

    while let Some(ancestor) = current {
        if hops >= MAX_COMPONENT_DEPTH {
            break;
        }
        if let Some(name) = component_name(&ancestor.kind()) {
            stack.push(name);
        }
        current = ancestor.parent();
        hops += 1;
    }

    stack
}
