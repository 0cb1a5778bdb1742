//! DOM Node - Compact representation
//!
//! Nodes link to each other through [`NodeId`]s into the owning
//! [`DomTree`](crate::DomTree) arena rather than through pointers.

use crate::{HostObject, HostValue, NamedNodeMap, NodeId};

/// DOM Node - Core structure
#[derive(Debug)]
pub struct Node {
    /// Parent node (NONE if root)
    pub parent: NodeId,
    /// First child
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    /// Previous sibling
    pub prev_sibling: NodeId,
    /// Next sibling
    pub next_sibling: NodeId,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    fn with_data(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    /// Create a new element node
    pub fn element(local_name: &str) -> Self {
        Self::with_data(NodeData::Element(ElementData::new(local_name)))
    }

    /// Create a new text node
    pub fn text(content: impl Into<String>) -> Self {
        Self::with_data(NodeData::Text(content.into()))
    }

    /// Create a comment node
    pub fn comment(content: impl Into<String>) -> Self {
        Self::with_data(NodeData::Comment(content.into()))
    }

    /// Create a document node
    pub fn document() -> Self {
        Self::with_data(NodeData::Document)
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Check if this is text
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text(_))
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug)]
pub enum NodeData {
    /// Document root
    Document,
    /// Element
    Element(ElementData),
    /// Text content
    Text(String),
    /// Comment
    Comment(String),
}

/// Element-specific data
#[derive(Debug)]
pub struct ElementData {
    /// Lower-case local name (`button`, `a`, ...)
    pub local_name: String,
    /// Attributes in source order
    pub attrs: NamedNodeMap,
    /// Own properties (expandos), insertion ordered
    pub properties: HostObject,
}

impl ElementData {
    pub fn new(local_name: &str) -> Self {
        Self {
            local_name: local_name.to_ascii_lowercase(),
            attrs: NamedNodeMap::new(),
            properties: HostObject::new(),
        }
    }

    /// Upper-case tag name, as `Element.tagName` reports it for HTML
    pub fn tag_name(&self) -> String {
        self.local_name.to_ascii_uppercase()
    }

    /// Get an attribute value
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get_attribute(name)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.has_attribute(name)
    }

    /// `id` attribute
    pub fn id(&self) -> Option<&str> {
        self.get_attr("id")
    }

    /// Class list, split on ASCII whitespace
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.get_attr("class")
            .unwrap_or_default()
            .split_ascii_whitespace()
    }

    /// Read an own property
    pub fn property(&self, name: &str) -> Option<HostValue> {
        self.properties.get(name)
    }

    /// Own property names in insertion order
    pub fn own_property_names(&self) -> Vec<String> {
        self.properties.keys()
    }
}
