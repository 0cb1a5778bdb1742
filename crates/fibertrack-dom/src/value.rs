//! Host Values
//!
//! Dynamically-typed values stored as element own properties.
//!
//! Functions and objects are reference types: clones share the same
//! underlying allocation and compare equal only by identity.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Flavour of a callable host value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKind {
    /// Ordinary function
    Plain,
    /// Class constructor
    Class,
}

#[derive(Debug)]
struct FunctionData {
    name: String,
    display_name: Option<String>,
    kind: FunctionKind,
}

/// Callable host value (function or class reference)
#[derive(Debug, Clone)]
pub struct HostFunction(Rc<FunctionData>);

impl HostFunction {
    /// Create a named plain function
    pub fn new(name: impl Into<String>) -> Self {
        Self::build(name.into(), None, FunctionKind::Plain)
    }

    /// Create a function with an empty intrinsic name
    pub fn anonymous() -> Self {
        Self::build(String::new(), None, FunctionKind::Plain)
    }

    /// Create a class constructor reference
    pub fn class(name: impl Into<String>) -> Self {
        Self::build(name.into(), None, FunctionKind::Class)
    }

    fn build(name: String, display_name: Option<String>, kind: FunctionKind) -> Self {
        Self(Rc::new(FunctionData { name, display_name, kind }))
    }

    /// Attach an explicit `displayName`.
    ///
    /// Returns a new reference; identity is not carried over.
    pub fn with_display_name(self, display_name: impl Into<String>) -> Self {
        Self::build(self.0.name.clone(), Some(display_name.into()), self.0.kind)
    }

    /// Intrinsic name (may be empty)
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Explicit display name, if one was set
    pub fn display_name(&self) -> Option<&str> {
        self.0.display_name.as_deref()
    }

    pub fn kind(&self) -> FunctionKind {
        self.0.kind
    }

    /// Reference identity
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for HostFunction {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

/// Shared, insertion-ordered string-keyed object
#[derive(Clone, Default)]
pub struct HostObject(Rc<RefCell<Vec<(String, HostValue)>>>);

impl HostObject {
    /// Create an empty object
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style property set
    pub fn with(self, key: impl Into<String>, value: impl Into<HostValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Read a property (cloned; reference types stay shared)
    pub fn get(&self, key: &str) -> Option<HostValue> {
        self.0
            .borrow()
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    /// Set a property, keeping its original position if it already exists
    pub fn set(&self, key: impl Into<String>, value: impl Into<HostValue>) {
        let key = key.into();
        let value = value.into();
        let mut entries = self.0.borrow_mut();
        if let Some(slot) = entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            entries.push((key, value));
        }
    }

    /// Remove a property
    pub fn remove(&self, key: &str) -> Option<HostValue> {
        let mut entries = self.0.borrow_mut();
        let index = entries.iter().position(|(k, _)| k == key)?;
        Some(entries.remove(index).1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.borrow().iter().any(|(k, _)| k == key)
    }

    /// Property names in insertion order
    pub fn keys(&self) -> Vec<String> {
        self.0.borrow().iter().map(|(k, _)| k.clone()).collect()
    }

    /// Properties in insertion order
    pub fn entries(&self) -> Vec<(String, HostValue)> {
        self.0.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Reference identity
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for HostObject {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

// Objects may reference each other; print keys only.
impl fmt::Debug for HostObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostObject").field("keys", &self.keys()).finish()
    }
}

/// Dynamically-typed property value
#[derive(Debug, Clone, Default, PartialEq)]
pub enum HostValue {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Function(HostFunction),
    Object(HostObject),
}

impl HostValue {
    /// `null` or `undefined`
    #[inline]
    pub fn is_nullish(&self) -> bool {
        matches!(self, Self::Undefined | Self::Null)
    }

    /// Functions and classes
    #[inline]
    pub fn is_callable(&self) -> bool {
        matches!(self, Self::Function(_))
    }

    pub fn as_object(&self) -> Option<&HostObject> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&HostFunction> {
        match self {
            Self::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for HostValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for HostValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for HostValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for HostValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<HostFunction> for HostValue {
    fn from(f: HostFunction) -> Self {
        Self::Function(f)
    }
}

impl From<HostObject> for HostValue {
    fn from(o: HostObject) -> Self {
        Self::Object(o)
    }
}
