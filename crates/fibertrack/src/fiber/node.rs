//! Opaque handle over a framework-owned internal tree node.

use fibertrack_dom::{HostFunction, HostObject, HostValue};

/// What an internal node stands for
#[derive(Debug, Clone, PartialEq)]
pub enum FiberKind {
    /// A plain platform element (`"button"`, `"div"`)
    Host(String),
    /// A logical component (function or class reference)
    Component(HostFunction),
    /// Anything else: fragments, providers, text, unknown shapes
    Other,
}

/// Read-only handle to one node of the framework's internal tree.
///
/// Only three logical fields are ever read: the node's `kind`, its
/// declared props and its parent. Each accessor tolerates the field names
/// used by older and newer framework generations.
#[derive(Debug, Clone, PartialEq)]
pub struct FiberNode(HostObject);

impl FiberNode {
    /// Wrap a property value; only objects can be internal nodes
    pub(crate) fn from_value(value: HostValue) -> Option<Self> {
        match value {
            HostValue::Object(object) => Some(Self(object)),
            _ => None,
        }
    }

    /// First non-nullish field among `names`
    fn field(&self, names: &[&str]) -> Option<HostValue> {
        names
            .iter()
            .filter_map(|name| self.0.get(name))
            .find(|value| !value.is_nullish())
    }

    /// Legacy instances keep type and props on `_currentElement`
    fn legacy_element(&self) -> Option<HostObject> {
        self.0.get("_currentElement")?.as_object().cloned()
    }

    pub fn kind(&self) -> FiberKind {
        let ty = self
            .field(&["type"])
            .or_else(|| self.legacy_element()?.get("type"));

        match ty {
            Some(HostValue::String(tag)) => FiberKind::Host(tag),
            Some(HostValue::Function(component)) => FiberKind::Component(component),
            _ => FiberKind::Other,
        }
    }

    /// Declared props mapping; `None` when missing or not an object
    pub fn declared_props(&self) -> Option<HostObject> {
        let props = self
            .field(&["memoizedProps", "pendingProps"])
            .or_else(|| self.legacy_element()?.get("props"))?;
        props.as_object().cloned()
    }

    /// Parent node in the internal tree
    pub fn parent(&self) -> Option<FiberNode> {
        Self::from_value(self.field(&["return", "_hostParent"])?)
    }

    /// The underlying framework object
    pub fn as_object(&self) -> &HostObject {
        &self.0
    }

    /// Reference identity
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.0.ptr_eq(&other.0)
    }
}

impl From<HostObject> for FiberNode {
    fn from(object: HostObject) -> Self {
        Self(object)
    }
}
