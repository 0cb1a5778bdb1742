//! Element Classifier
//!
//! Pure predicates over a DOM element: interactive tag, ARIA widget role,
//! disabled marker, selector match.

use fibertrack_css::{SelectorList, matches_selector};
use fibertrack_dom::{DomTree, NodeId};

/// Tags that are interactive on their own
const INTERACTIVE_TAGS: &[&str] = &["BUTTON", "A", "INPUT", "SELECT", "TEXTAREA", "SUMMARY", "DETAILS"];

/// ARIA widget roles that make any element interactive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetRole {
    Button,
    Link,
    MenuItem,
    Tab,
    Checkbox,
    Radio,
    ComboBox,
    ListBox,
    Option,
    Switch,
    Slider,
    SpinButton,
    MenuItemCheckbox,
    MenuItemRadio,
    TreeItem,
    GridCell,
    TextBox,
    SearchBox,
}

impl WidgetRole {
    /// Parse a `role` attribute value. Matching is exact.
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "button" => Self::Button,
            "link" => Self::Link,
            "menuitem" => Self::MenuItem,
            "tab" => Self::Tab,
            "checkbox" => Self::Checkbox,
            "radio" => Self::Radio,
            "combobox" => Self::ComboBox,
            "listbox" => Self::ListBox,
            "option" => Self::Option,
            "switch" => Self::Switch,
            "slider" => Self::Slider,
            "spinbutton" => Self::SpinButton,
            "menuitemcheckbox" => Self::MenuItemCheckbox,
            "menuitemradio" => Self::MenuItemRadio,
            "treeitem" => Self::TreeItem,
            "gridcell" => Self::GridCell,
            "textbox" => Self::TextBox,
            "searchbox" => Self::SearchBox,
            _ => return None,
        })
    }
}

/// Element's tag is interactive by itself (`<button>`, `<a>`, ...)
pub fn is_interactive_tag(tree: &DomTree, element: NodeId) -> bool {
    tree.element(element)
        .is_some_and(|e| INTERACTIVE_TAGS.contains(&e.tag_name().as_str()))
}

/// Element carries an interactive ARIA widget role
pub fn is_interactive_role(tree: &DomTree, element: NodeId) -> bool {
    tree.get_attribute(element, "role")
        .and_then(WidgetRole::parse)
        .is_some()
}

/// `disabled` attribute present, or `aria-disabled="true"`
pub fn is_disabled(tree: &DomTree, element: NodeId) -> bool {
    tree.has_attribute(element, "disabled")
        || tree.get_attribute(element, "aria-disabled") == Some("true")
}

/// Element matches at least one selector. An empty list never matches.
pub fn matches_any_selector(tree: &DomTree, element: NodeId, selectors: &[SelectorList]) -> bool {
    selectors.iter().any(|s| matches_selector(tree, element, s))
}
