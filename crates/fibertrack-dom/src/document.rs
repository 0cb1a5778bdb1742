//! Document - High-level document API

use crate::{DomError, DomTree, NodeId};

/// HTML Document
#[derive(Debug)]
pub struct Document {
    /// The DOM tree
    tree: DomTree,
    /// Document URL
    url: String,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
}

impl Document {
    /// Create a document with `<html><head></head><body></body></html>`
    pub fn new(url: &str) -> Result<Self, DomError> {
        let mut tree = DomTree::new();

        let html = tree.append_element(tree.root(), "html")?;
        let head = tree.append_element(html, "head")?;
        let body = tree.append_element(html, "body")?;

        Ok(Self {
            tree,
            url: url.to_string(),
            html_element: html,
            head_element: head,
            body_element: body,
        })
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get document title
    pub fn title(&self) -> String {
        self.tree
            .element_children(self.head_element)
            .into_iter()
            .find(|&id| self.tree.element(id).is_some_and(|e| e.local_name == "title"))
            .map(|id| self.tree.text_content(id).trim().to_string())
            .unwrap_or_default()
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Get element by ID (first in tree order)
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree
            .descendants(self.tree.root())
            .into_iter()
            .find(|&node| self.tree.element(node).and_then(|e| e.id()) == Some(id))
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }
}
