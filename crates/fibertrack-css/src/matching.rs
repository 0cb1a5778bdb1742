//! Selector Matching
//!
//! Right-to-left matching of parsed selectors against a [`DomTree`].

use fibertrack_dom::{DomTree, NodeId};

use crate::selectors::*;

/// Tags that support the `disabled` attribute
const FORM_CONTROLS: &[&str] = &[
    "button", "input", "select", "textarea", "optgroup", "option", "fieldset",
];

/// Check if element matches any selector in the list
pub fn matches_selector(tree: &DomTree, element: NodeId, list: &SelectorList) -> bool {
    tree.is_element(element)
        && list.selectors.iter().any(|complex| {
            let last = complex.compounds.len() - 1;
            match_complex(tree, element, complex, last)
        })
}

/// Match `complex.compounds[..=index]` with `element` as the subject of
/// `compounds[index]`.
fn match_complex(tree: &DomTree, element: NodeId, complex: &ComplexSelector, index: usize) -> bool {
    if !match_compound(tree, element, &complex.compounds[index]) {
        return false;
    }
    if index == 0 {
        return true;
    }

    match complex.combinators[index - 1] {
        Combinator::Child => tree
            .parent_element(element)
            .is_some_and(|parent| match_complex(tree, parent, complex, index - 1)),
        Combinator::Descendant => {
            let mut current = tree.parent_element(element);
            while let Some(ancestor) = current {
                if match_complex(tree, ancestor, complex, index - 1) {
                    return true;
                }
                current = tree.parent_element(ancestor);
            }
            false
        }
        Combinator::NextSibling => tree
            .previous_element_sibling(element)
            .is_some_and(|sibling| match_complex(tree, sibling, complex, index - 1)),
        Combinator::SubsequentSibling => {
            let mut current = tree.previous_element_sibling(element);
            while let Some(sibling) = current {
                if match_complex(tree, sibling, complex, index - 1) {
                    return true;
                }
                current = tree.previous_element_sibling(sibling);
            }
            false
        }
    }
}

fn match_compound(tree: &DomTree, element: NodeId, compound: &CompoundSelector) -> bool {
    compound
        .components
        .iter()
        .all(|component| match_component(tree, element, component))
}

/// Match a single simple selector against an element
pub fn match_component(tree: &DomTree, element: NodeId, component: &SelectorComponent) -> bool {
    let Some(data) = tree.element(element) else {
        return false;
    };

    match component {
        SelectorComponent::Universal => true,
        SelectorComponent::Type(tag) => data.local_name.eq_ignore_ascii_case(tag),
        SelectorComponent::Id(id) => data.id() == Some(id.as_str()),
        SelectorComponent::Class(class) => data.classes().any(|c| c == class),
        SelectorComponent::Attribute(attr) => attr.matches(data.get_attr(&attr.name)),
        SelectorComponent::PseudoClass(pseudo) => match_pseudo_class(tree, element, pseudo),
        SelectorComponent::PseudoElement(_) => false,
    }
}

/// Position of `element` among its element siblings
struct SiblingPosition {
    /// 1-based index among all element siblings
    index: usize,
    count: usize,
    /// 1-based index among siblings with the same tag
    type_index: usize,
    type_count: usize,
}

fn sibling_position(tree: &DomTree, element: NodeId) -> SiblingPosition {
    let siblings = match tree.parent(element) {
        Some(parent) => tree.element_children(parent),
        None => vec![element],
    };
    let tag = tree.element(element).map(|e| e.local_name.as_str());
    let same_type: Vec<NodeId> = siblings
        .iter()
        .copied()
        .filter(|&s| tree.element(s).map(|e| e.local_name.as_str()) == tag)
        .collect();

    SiblingPosition {
        index: siblings.iter().position(|&s| s == element).map_or(0, |i| i + 1),
        count: siblings.len(),
        type_index: same_type.iter().position(|&s| s == element).map_or(0, |i| i + 1),
        type_count: same_type.len(),
    }
}

/// Match a pseudo-class against an element
fn match_pseudo_class(tree: &DomTree, element: NodeId, pseudo: &PseudoClass) -> bool {
    let Some(data) = tree.element(element) else {
        return false;
    };
    let tag = data.local_name.as_str();

    match pseudo {
        PseudoClass::Link | PseudoClass::AnyLink => {
            matches!(tag, "a" | "area") && data.has_attr("href")
        }

        PseudoClass::Disabled => FORM_CONTROLS.contains(&tag) && data.has_attr("disabled"),
        PseudoClass::Enabled => FORM_CONTROLS.contains(&tag) && !data.has_attr("disabled"),
        PseudoClass::Checked => match tag {
            "input" => data.has_attr("checked"),
            "option" => data.has_attr("selected"),
            _ => false,
        },

        PseudoClass::Root => tree.parent(element) == Some(tree.root()),
        PseudoClass::Empty => tree
            .children(element)
            .all(|(_, child)| child.as_element().is_none() && child.as_text().is_none_or(str::is_empty)),

        PseudoClass::FirstChild => sibling_position(tree, element).index == 1,
        PseudoClass::LastChild => {
            let pos = sibling_position(tree, element);
            pos.index == pos.count
        }
        PseudoClass::OnlyChild => sibling_position(tree, element).count == 1,
        PseudoClass::FirstOfType => sibling_position(tree, element).type_index == 1,
        PseudoClass::LastOfType => {
            let pos = sibling_position(tree, element);
            pos.type_index == pos.type_count
        }
        PseudoClass::OnlyOfType => sibling_position(tree, element).type_count == 1,
        PseudoClass::NthChild(expr) => expr.matches(sibling_position(tree, element).index as i32),
        PseudoClass::NthLastChild(expr) => {
            let pos = sibling_position(tree, element);
            expr.matches((pos.count - pos.index + 1) as i32)
        }
        PseudoClass::NthOfType(expr) => {
            expr.matches(sibling_position(tree, element).type_index as i32)
        }
        PseudoClass::NthLastOfType(expr) => {
            let pos = sibling_position(tree, element);
            expr.matches((pos.type_count - pos.type_index + 1) as i32)
        }

        PseudoClass::Not(list) => !matches_selector(tree, element, list),
        PseudoClass::Is(list) | PseudoClass::Where(list) => matches_selector(tree, element, list),
    }
}
