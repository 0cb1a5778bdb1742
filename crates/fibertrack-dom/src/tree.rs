//! DOM Tree (arena-based allocation)

use crate::{DomError, ElementData, HostValue, Node, NodeId};

/// Arena-based DOM tree.
///
/// Node 0 is always the document node. Nodes are never freed; detached
/// subtrees simply lose their parent link.
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self { nodes: vec![Node::document()] }
    }

    /// Document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes in the tree (document node included)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, local_name: &str) -> NodeId {
        self.push(Node::element(local_name))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content))
    }

    /// Create a detached comment node
    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.push(Node::comment(content))
    }

    /// Append `child` as the last child of `parent`, detaching it first
    /// if it already has a parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.get(parent).ok_or(DomError::InvalidNode(parent))?;
        self.get(child).ok_or(DomError::InvalidNode(child))?;
        if self.contains(child, parent) {
            return Err(DomError::HierarchyRequest { parent, child });
        }

        self.detach(child);

        let last = self.nodes[parent.index()].last_child;
        {
            let node = &mut self.nodes[child.index()];
            node.parent = parent;
            node.prev_sibling = last;
            node.next_sibling = NodeId::NONE;
        }
        if last.is_valid() {
            self.nodes[last.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        self.nodes[parent.index()].last_child = child;

        tracing::trace!(?parent, ?child, "appended node");
        Ok(())
    }

    /// Create an element and append it to `parent`
    pub fn append_element(&mut self, parent: NodeId, local_name: &str) -> Result<NodeId, DomError> {
        let id = self.create_element(local_name);
        self.append_child(parent, id)?;
        Ok(id)
    }

    /// Create a text node and append it to `parent`
    pub fn append_text(&mut self, parent: NodeId, content: &str) -> Result<NodeId, DomError> {
        let id = self.create_text(content);
        self.append_child(parent, id)?;
        Ok(id)
    }

    /// Unlink a node from its parent and siblings
    pub fn detach(&mut self, id: NodeId) {
        let Some(node) = self.get(id) else { return };
        let (parent, prev, next) = (node.parent, node.prev_sibling, node.next_sibling);
        if !parent.is_valid() {
            return;
        }

        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = next;
        } else {
            self.nodes[parent.index()].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = prev;
        } else {
            self.nodes[parent.index()].last_child = prev;
        }

        let node = &mut self.nodes[id.index()];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
    }

    /// Whether `ancestor` is `node` or one of its ancestors
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = node;
        while current.is_valid() {
            if current == ancestor {
                return true;
            }
            current = self.get(current).map_or(NodeId::NONE, |n| n.parent);
        }
        false
    }

    /// Parent node of any kind
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).map(|n| n.parent).filter(|p| p.is_valid())
    }

    /// Parent node, only if it is an element (`Node.parentElement`)
    pub fn parent_element(&self, id: NodeId) -> Option<NodeId> {
        self.parent(id).filter(|&p| self.is_element(p))
    }

    /// Iterate over direct children
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.get(id).map_or(NodeId::NONE, |n| n.first_child),
        }
    }

    /// Element children only
    pub fn element_children(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .filter(|(_, node)| node.is_element())
            .map(|(child, _)| child)
            .collect()
    }

    /// Previous sibling that is an element
    pub fn previous_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let mut current = self.get(id)?.prev_sibling;
        while current.is_valid() {
            if self.is_element(current) {
                return Some(current);
            }
            current = self.get(current)?.prev_sibling;
        }
        None
    }

    /// Next sibling that is an element
    pub fn next_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let mut current = self.get(id)?.next_sibling;
        while current.is_valid() {
            if self.is_element(current) {
                return Some(current);
            }
            current = self.get(current)?.next_sibling;
        }
        None
    }

    /// All descendants in tree order (excluding `id`)
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).map(|(c, _)| c).collect();
        stack.reverse();
        while let Some(current) = stack.pop() {
            out.push(current);
            let mut kids: Vec<NodeId> = self.children(current).map(|(c, _)| c).collect();
            kids.reverse();
            stack.extend(kids);
        }
        out
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(Node::is_element)
    }

    /// Element data for `id`
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id)?.as_element()
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut ElementData, DomError> {
        self.get_mut(id)
            .ok_or(DomError::InvalidNode(id))?
            .as_element_mut()
            .ok_or(DomError::NotAnElement(id))
    }

    /// Upper-case tag name
    pub fn tag_name(&self, id: NodeId) -> Option<String> {
        self.element(id).map(ElementData::tag_name)
    }

    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.get_attr(name)
    }

    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.element(id).is_some_and(|e| e.has_attr(name))
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        self.element_mut(id)?.attrs.set_attribute(name, value);
        Ok(())
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Result<(), DomError> {
        self.element_mut(id)?.attrs.remove_attribute(name);
        Ok(())
    }

    /// Define an own property (expando) on an element
    pub fn set_property(
        &mut self,
        id: NodeId,
        name: &str,
        value: impl Into<HostValue>,
    ) -> Result<(), DomError> {
        self.element_mut(id)?.properties.set(name, value);
        Ok(())
    }

    /// Read an own property
    pub fn property(&self, id: NodeId, name: &str) -> Option<HostValue> {
        self.element(id)?.property(name)
    }

    /// Own property names in insertion order (empty for non-elements)
    pub fn own_property_names(&self, id: NodeId) -> Vec<String> {
        self.element(id)
            .map(ElementData::own_property_names)
            .unwrap_or_default()
    }

    /// Concatenated text of all descendant text nodes, in tree order
    pub fn text_content(&self, id: NodeId) -> String {
        if let Some(text) = self.get(id).and_then(Node::as_text) {
            return text.to_string();
        }
        self.descendants(id)
            .into_iter()
            .filter_map(|d| self.get(d).and_then(Node::as_text))
            .collect()
    }
}

/// Iterator over a node's children
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        if !self.next.is_valid() {
            return None;
        }
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_siblings() {
        let mut tree = DomTree::new();
        let ul = tree.append_element(tree.root(), "ul").unwrap();
        let a = tree.append_element(ul, "li").unwrap();
        let b = tree.append_element(ul, "li").unwrap();
        let c = tree.append_element(ul, "li").unwrap();

        assert_eq!(tree.element_children(ul), vec![a, b, c]);
        assert_eq!(tree.previous_element_sibling(b), Some(a));
        assert_eq!(tree.next_element_sibling(b), Some(c));
        assert_eq!(tree.parent_element(a), Some(ul));
        // The document node is not an element
        assert_eq!(tree.parent_element(ul), None);
    }

    #[test]
    fn test_reparent() {
        let mut tree = DomTree::new();
        let first = tree.append_element(tree.root(), "div").unwrap();
        let second = tree.append_element(tree.root(), "div").unwrap();
        let child = tree.append_element(first, "span").unwrap();

        tree.append_child(second, child).unwrap();
        assert!(tree.element_children(first).is_empty());
        assert_eq!(tree.element_children(second), vec![child]);
    }

    #[test]
    fn test_cycle_rejected() {
        let mut tree = DomTree::new();
        let outer = tree.append_element(tree.root(), "div").unwrap();
        let inner = tree.append_element(outer, "div").unwrap();

        assert_eq!(
            tree.append_child(inner, outer),
            Err(DomError::HierarchyRequest { parent: inner, child: outer })
        );
        assert_eq!(
            tree.append_child(outer, NodeId(99)),
            Err(DomError::InvalidNode(NodeId(99)))
        );
    }

    #[test]
    fn test_text_content() {
        let mut tree = DomTree::new();
        let p = tree.append_element(tree.root(), "p").unwrap();
        tree.append_text(p, "Hello, ").unwrap();
        let b = tree.append_element(p, "b").unwrap();
        tree.append_text(b, "World").unwrap();
        tree.append_text(p, "!").unwrap();

        assert_eq!(tree.text_content(p), "Hello, World!");
    }

    #[test]
    fn test_properties_on_text_fail() {
        let mut tree = DomTree::new();
        let text = tree.append_text(tree.root(), "x").unwrap();
        assert_eq!(
            tree.set_property(text, "__key", true),
            Err(DomError::NotAnElement(text))
        );
        assert!(tree.own_property_names(text).is_empty());
    }
}
