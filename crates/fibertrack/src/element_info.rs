//! Element-info extractor
//!
//! Flat description of a DOM element for reporting.

use std::collections::BTreeMap;

use fibertrack_dom::dataset::DomStringMap;
use fibertrack_dom::{DomTree, NodeId};
use serde::Serialize;

/// Maximum characters of text content reported
pub const MAX_TEXT_LENGTH: usize = 100;

/// Descriptive record of the tracked element
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementInfo {
    /// Upper-case tag name
    pub tag_name: String,
    /// `id` attribute, empty when missing
    pub id: String,
    /// `class` attribute, empty when missing
    pub class_name: String,
    /// Trimmed text content, at most [`MAX_TEXT_LENGTH`] characters
    pub text: String,
    /// Link target, for `<a>` only
    pub href: Option<String>,
    pub role: Option<String>,
    /// Input type, for `<input>` only
    #[serde(rename = "type")]
    pub input_type: Option<String>,
    /// `data-*` attributes keyed like `HTMLElement.dataset`
    pub dataset: BTreeMap<String, String>,
}

/// Describe `element`. Non-elements yield an empty record.
pub fn extract_element_info(tree: &DomTree, element: NodeId) -> ElementInfo {
    let Some(data) = tree.element(element) else {
        return ElementInfo::default();
    };
    let attr = |name: &str| data.get_attr(name).map(str::to_string);
    let tag_name = data.tag_name();

    ElementInfo {
        href: if tag_name == "A" { attr("href") } else { None },
        input_type: if tag_name == "INPUT" { attr("type") } else { None },
        id: attr("id").unwrap_or_default(),
        class_name: attr("class").unwrap_or_default(),
        text: truncate(tree.text_content(element).trim(), MAX_TEXT_LENGTH),
        role: attr("role"),
        dataset: DomStringMap::from_attributes(data.attrs.data_attributes()).into_map(),
        tag_name,
    }
}

/// First `max` characters, no word-boundary handling
fn truncate(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
