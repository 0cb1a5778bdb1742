//! Filter engine
//!
//! Decides, per raw event, which element (if any) the event is attributed
//! to. Each [`EventCategory`] has its own strategy:
//!
//! - Pointer: targets are often wrappers (an icon inside a button-like
//!   div), so walk up to the nearest reportable ancestor.
//! - Form: the platform already picked a precise target; only veto it.
//! - Ambient: no notion of interactive or enabled; only the ignore list.
//!
//! The ignore list is an absolute veto in every category.

use fibertrack_css::SelectorList;
use fibertrack_dom::{DomTree, NodeId};

use crate::category::{EventCategory, classify, handlers_for};
use crate::classifier::{is_disabled, is_interactive_role, is_interactive_tag, matches_any_selector};
use crate::config::ResolvedConfig;
use crate::fiber::{extract::declares_any_handler, resolve};

/// Elements a Pointer search examines, counting the target itself
pub const MAX_POINTER_DEPTH: usize = 10;

/// Inputs for one filter decision
#[derive(Debug, Clone, Copy)]
pub struct FilterRequest<'a> {
    pub target: NodeId,
    pub event_type: &'a str,
    pub ignore_selectors: &'a [SelectorList],
    /// When set, replaces interactive detection for Pointer events
    pub include_selectors: Option<&'a [SelectorList]>,
}

impl<'a> FilterRequest<'a> {
    /// Request using the selectors of a resolved configuration
    pub fn from_config(config: &'a ResolvedConfig, event_type: &'a str, target: NodeId) -> Self {
        Self {
            target,
            event_type,
            ignore_selectors: &config.ignore_selectors,
            include_selectors: config.include_selectors.as_deref(),
        }
    }
}

/// The element to report for this event, or `None` to drop it
pub fn trackable_element(tree: &DomTree, request: &FilterRequest<'_>) -> Option<NodeId> {
    // Text-node targets stand for their parent element
    let target = if tree.is_element(request.target) {
        request.target
    } else {
        tree.parent_element(request.target)?
    };

    match classify(request.event_type) {
        EventCategory::Pointer => pointer_target(tree, target, request),
        EventCategory::Form => form_target(tree, target, request),
        EventCategory::Ambient => ambient_target(tree, target, request),
    }
}

fn pointer_target(tree: &DomTree, target: NodeId, request: &FilterRequest<'_>) -> Option<NodeId> {
    let mut current = Some(target);
    let mut depth = 0;

    while let Some(element) = current {
        if depth >= MAX_POINTER_DEPTH {
            break;
        }
        if matches_any_selector(tree, element, request.ignore_selectors) {
            return None;
        }
        if is_disabled(tree, element) {
            return None;
        }
        if is_reportable(tree, element, request) {
            return Some(element);
        }
        current = tree.parent_element(element);
        depth += 1;
    }

    None
}

fn form_target(tree: &DomTree, target: NodeId, request: &FilterRequest<'_>) -> Option<NodeId> {
    if matches_any_selector(tree, target, request.ignore_selectors) || is_disabled(tree, target) {
        return None;
    }
    Some(target)
}

fn ambient_target(tree: &DomTree, target: NodeId, request: &FilterRequest<'_>) -> Option<NodeId> {
    if matches_any_selector(tree, target, request.ignore_selectors) {
        return None;
    }
    Some(target)
}

/// Allowlist when configured, otherwise tag, then role, then declared handler
fn is_reportable(tree: &DomTree, element: NodeId, request: &FilterRequest<'_>) -> bool {
    match request.include_selectors {
        Some(include) => matches_any_selector(tree, element, include),
        None => {
            is_interactive_tag(tree, element)
                || is_interactive_role(tree, element)
                || declares_event_handler(tree, element, request.event_type)
        }
    }
}

/// The element's own internal node declares a handler for this event
fn declares_event_handler(tree: &DomTree, element: NodeId, event_type: &str) -> bool {
    let candidates = handlers_for(event_type);
    if candidates.is_empty() {
        return false;
    }
    resolve(tree, element).is_some_and(|node| declares_any_handler(&node, candidates))
}
