//! Internal-node resolver
//!
//! The host framework attaches its internal node to each DOM element under
//! an own property named `<prefix><random suffix>`. Only the prefix is
//! known in advance, so the first successful lookup scans property names
//! and caches the full name; every later lookup reads that exact property.
//!
//! The cache is a single slot shared by every tracker on the thread. Host
//! values are reference-counted and never leave their thread, so the slot
//! is thread-local rather than a global behind a lock.

use std::cell::RefCell;

use fibertrack_dom::{DomTree, NodeId};

use super::FiberNode;

/// Default bound for [`resolve_with_ancestors`]
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Property-name convention, one per framework-version family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeLocator {
    /// Oldest convention (`__reactInternalInstance$…`)
    Legacy,
    /// Current convention (`__reactFiber$…`)
    Modern,
}

impl NodeLocator {
    /// Scan order
    pub const ALL: [NodeLocator; 2] = [NodeLocator::Legacy, NodeLocator::Modern];

    pub fn prefix(self) -> &'static str {
        match self {
            Self::Legacy => "__reactInternalInstance$",
            Self::Modern => "__reactFiber$",
        }
    }

    /// Convention a property name belongs to, if any
    pub fn detect(property: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| property.starts_with(l.prefix()))
    }
}

/// Discovered property name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedProperty {
    pub locator: NodeLocator,
    pub name: String,
}

thread_local! {
    static CACHED_PROPERTY: RefCell<Option<CachedProperty>> = const { RefCell::new(None) };
}

/// Currently cached property name, if one was discovered
pub fn cached_property() -> Option<CachedProperty> {
    CACHED_PROPERTY.with(|slot| slot.borrow().clone())
}

/// Forget the discovered property name (test isolation, hot reload)
pub fn reset_cache() {
    CACHED_PROPERTY.with(|slot| slot.borrow_mut().take());
}

/// Find the internal node attached to `element`.
///
/// Once a property name is cached, only that exact name is read: an element
/// carrying a different suffix under the same prefix is not found.
pub fn resolve(tree: &DomTree, element: NodeId) -> Option<FiberNode> {
    if let Some(cached) = cached_property() {
        let value = tree.property(element, &cached.name)?;
        return FiberNode::from_value(value);
    }

    for name in tree.own_property_names(element) {
        let Some(locator) = NodeLocator::detect(&name) else {
            continue;
        };
        tracing::trace!(property = %name, ?locator, "discovered internal node property");
        let value = tree.property(element, &name);
        CACHED_PROPERTY.with(|slot| {
            *slot.borrow_mut() = Some(CachedProperty { locator, name });
        });
        return value.and_then(FiberNode::from_value);
    }

    None
}

/// Resolve `element`, else its nearest ancestor with an internal node.
///
/// Gives up once more than `max_depth` parent steps were taken.
pub fn resolve_with_ancestors(tree: &DomTree, element: NodeId, max_depth: usize) -> Option<FiberNode> {
    let mut current = Some(element);
    let mut depth = 0;

    while let Some(candidate) = current {
        if depth > max_depth {
            break;
        }
        if let Some(node) = resolve(tree, candidate) {
            return Some(node);
        }
        current = tree.parent_element(candidate);
        depth += 1;
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use fibertrack_dom::{HostObject, HostValue};

    fn attach(tree: &mut DomTree, element: NodeId, property: &str) -> HostObject {
        let node = HostObject::new().with("type", "div");
        tree.set_property(element, property, node.clone()).unwrap();
        node
    }

    #[test]
    fn test_detect_prefixes() {
        assert_eq!(NodeLocator::detect("__reactFiber$abc123"), Some(NodeLocator::Modern));
        assert_eq!(NodeLocator::detect("__reactInternalInstance$x"), Some(NodeLocator::Legacy));
        assert_eq!(NodeLocator::detect("__reactProps$abc123"), None);
        assert_eq!(NodeLocator::detect("reactFiber$"), None);
    }

    #[test]
    fn test_resolve_caches_full_name() {
        reset_cache();
        let mut tree = DomTree::new();
        let div = tree.append_element(tree.root(), "div").unwrap();
        tree.set_property(div, "__reactProps$k3y", HostObject::new()).unwrap();
        let node = attach(&mut tree, div, "__reactFiber$k3y");

        let resolved = resolve(&tree, div).unwrap();
        assert!(resolved.as_object().ptr_eq(&node));
        assert_eq!(
            cached_property(),
            Some(CachedProperty { locator: NodeLocator::Modern, name: "__reactFiber$k3y".to_string() })
        );
    }

    #[test]
    fn test_miss_does_not_cache() {
        reset_cache();
        let mut tree = DomTree::new();
        let div = tree.append_element(tree.root(), "div").unwrap();
        tree.set_property(div, "custom", true).unwrap();

        assert!(resolve(&tree, div).is_none());
        assert_eq!(cached_property(), None);
    }

    #[test]
    fn test_cache_is_exact_name() {
        reset_cache();
        let mut tree = DomTree::new();
        let first = tree.append_element(tree.root(), "div").unwrap();
        let second = tree.append_element(tree.root(), "div").unwrap();
        attach(&mut tree, first, "__reactFiber$aaa");
        attach(&mut tree, second, "__reactFiber$bbb");

        assert!(resolve(&tree, first).is_some());
        // Same prefix, different suffix: not found once a name is cached
        assert!(resolve(&tree, second).is_none());

        reset_cache();
        assert!(resolve(&tree, second).is_some());
    }

    #[test]
    fn test_null_value_is_absent() {
        reset_cache();
        let mut tree = DomTree::new();
        let div = tree.append_element(tree.root(), "div").unwrap();
        tree.set_property(div, "__reactFiber$n", HostValue::Null).unwrap();

        assert!(resolve(&tree, div).is_none());
        assert!(cached_property().is_some());
    }

    #[test]
    fn test_reset_then_resolve_same_reference() {
        reset_cache();
        let mut tree = DomTree::new();
        let div = tree.append_element(tree.root(), "div").unwrap();
        attach(&mut tree, div, "__reactInternalInstance$old");

        let before = resolve(&tree, div).unwrap();
        reset_cache();
        let after = resolve(&tree, div).unwrap();
        assert!(before.ptr_eq(&after));
    }

    #[test]
    fn test_resolve_with_ancestors_bound() {
        reset_cache();
        let mut tree = DomTree::new();
        let top = tree.append_element(tree.root(), "section").unwrap();
        attach(&mut tree, top, "__reactFiber$z");

        // top <- 10 wrappers <- leaf: top is 11 parent steps away from leaf
        let mut leaf = top;
        for _ in 0..11 {
            leaf = tree.append_element(leaf, "span").unwrap();
        }
        assert!(resolve_with_ancestors(&tree, leaf, DEFAULT_MAX_DEPTH).is_none());

        let closer = tree.parent_element(leaf).unwrap();
        assert!(resolve_with_ancestors(&tree, closer, DEFAULT_MAX_DEPTH).is_some());
    }
}
