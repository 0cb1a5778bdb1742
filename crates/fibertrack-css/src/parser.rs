//! Selector Parser using lightningcss
//!
//! Parses selector text with lightningcss and converts the parsed
//! components into our own selector AST.

use std::fmt;

use lightningcss::rules::CssRule;
use lightningcss::selector::{Component, PseudoClass as CssPseudoClass, Selector};
use lightningcss::stylesheet::{ParserOptions, StyleSheet};

use crate::SelectorError;
use crate::selectors::*;

/// Parse a comma-separated selector list
pub fn parse_selector_list(input: &str) -> Result<SelectorList, SelectorError> {
    let text = input.trim();
    let result = if text.is_empty() {
        Err(SelectorError::Empty)
    } else {
        parse_rule_prelude(text)
    };

    if let Err(err) = &result {
        tracing::debug!(selector = input, %err, "rejected selector");
    }
    result
}

/// Parse `text` as the prelude of a single empty style rule
fn parse_rule_prelude(text: &str) -> Result<SelectorList, SelectorError> {
    let css = format!("{text} {{}}");
    let stylesheet = StyleSheet::parse(&css, ParserOptions::default())
        .map_err(|e| SelectorError::Parse(e.to_string()))?;

    // Anything but exactly one style rule means the text was not a plain selector
    let [CssRule::Style(style_rule)] = stylesheet.rules.0.as_slice() else {
        return Err(SelectorError::NotASelector);
    };

    let selectors = convert_selectors(style_rule.selectors.0.iter())?;
    Ok(SelectorList { selectors, text: text.to_string() })
}

fn convert_selectors<'a, 'i: 'a>(
    selectors: impl Iterator<Item = &'a Selector<'i>>,
) -> Result<Vec<ComplexSelector>, SelectorError> {
    selectors.map(convert_selector).collect()
}

fn nested_list<'a, 'i: 'a>(selectors: &'a [Selector<'i>]) -> Result<SelectorList, SelectorError> {
    Ok(SelectorList {
        selectors: convert_selectors(selectors.iter())?,
        text: String::new(),
    })
}

/// Compounds arrive right to left with combinators between them.
fn convert_selector(selector: &Selector<'_>) -> Result<ComplexSelector, SelectorError> {
    let mut compounds = vec![CompoundSelector::default()];
    let mut combinators = Vec::new();

    for component in selector.iter_raw_match_order() {
        if let Component::Combinator(combinator) = component {
            let combinator = match variant_name(combinator).as_str() {
                "Descendant" => Combinator::Descendant,
                "Child" => Combinator::Child,
                "NextSibling" => Combinator::NextSibling,
                "LaterSibling" => Combinator::SubsequentSibling,
                // `p::before` keeps the pseudo-element in the same compound
                "PseudoElement" => continue,
                other => return Err(SelectorError::Unsupported(format!("combinator {other}"))),
            };
            combinators.push(combinator);
            compounds.push(CompoundSelector::default());
            continue;
        }

        if let Some(simple) = convert_component(component)? {
            if let Some(compound) = compounds.last_mut() {
                compound.components.push(simple);
            }
        }
    }

    for compound in &mut compounds {
        if compound.components.is_empty() {
            compound.components.push(SelectorComponent::Universal);
        }
    }
    compounds.reverse();
    combinators.reverse();

    Ok(ComplexSelector { compounds, combinators })
}

/// Convert one simple selector. Namespace constraints yield `None`.
fn convert_component(component: &Component<'_>) -> Result<Option<SelectorComponent>, SelectorError> {
    let converted = match component {
        Component::ExplicitUniversalType => SelectorComponent::Universal,
        Component::LocalName(name) => SelectorComponent::Type(name.lower_name.0.to_ascii_lowercase()),
        Component::ID(id) => SelectorComponent::Id(id.0.to_string()),
        Component::Class(class) => SelectorComponent::Class(class.0.to_string()),

        Component::AttributeInNoNamespaceExists { local_name, .. } => {
            SelectorComponent::Attribute(AttributeSelector {
                name: local_name.0.to_ascii_lowercase(),
                matcher: None,
                case_insensitive: false,
            })
        }
        Component::AttributeInNoNamespace { local_name, operator, value, case_sensitivity, .. } => {
            let value = value.0.to_string();
            let matcher = match variant_name(operator).as_str() {
                "Equal" => AttributeMatcher::Exact(value),
                "Includes" => AttributeMatcher::Contains(value),
                "DashMatch" => AttributeMatcher::DashMatch(value),
                "Prefix" => AttributeMatcher::Prefix(value),
                "Suffix" => AttributeMatcher::Suffix(value),
                "Substring" => AttributeMatcher::Substring(value),
                other => return Err(SelectorError::Unsupported(format!("attribute operator {other}"))),
            };
            SelectorComponent::Attribute(AttributeSelector {
                name: local_name.0.to_ascii_lowercase(),
                matcher: Some(matcher),
                case_insensitive: variant_name(case_sensitivity) == "AsciiCaseInsensitive",
            })
        }

        Component::Root => SelectorComponent::PseudoClass(PseudoClass::Root),
        Component::Empty => SelectorComponent::PseudoClass(PseudoClass::Empty),
        Component::Nth(data) => {
            let expr = NthExpression::new(data.a, data.b);
            let pseudo = match (variant_name(&data.ty).as_str(), data.is_function) {
                ("Child", false) => PseudoClass::FirstChild,
                ("LastChild", false) => PseudoClass::LastChild,
                ("OfType", false) => PseudoClass::FirstOfType,
                ("LastOfType", false) => PseudoClass::LastOfType,
                ("OnlyChild", _) => PseudoClass::OnlyChild,
                ("OnlyOfType", _) => PseudoClass::OnlyOfType,
                ("Child", true) => PseudoClass::NthChild(expr),
                ("LastChild", true) => PseudoClass::NthLastChild(expr),
                ("OfType", true) => PseudoClass::NthOfType(expr),
                ("LastOfType", true) => PseudoClass::NthLastOfType(expr),
                (other, _) => return Err(SelectorError::Unsupported(format!("nth type {other}"))),
            };
            SelectorComponent::PseudoClass(pseudo)
        }

        Component::Negation(list) => SelectorComponent::PseudoClass(PseudoClass::Not(nested_list(list)?)),
        Component::Is(list) => SelectorComponent::PseudoClass(PseudoClass::Is(nested_list(list)?)),
        Component::Where(list) => SelectorComponent::PseudoClass(PseudoClass::Where(nested_list(list)?)),

        Component::NonTSPseudoClass(pseudo) => SelectorComponent::PseudoClass(convert_pseudo_class(pseudo)?),
        Component::PseudoElement(pseudo) => {
            let pseudo = match variant_name(pseudo).as_str() {
                "Before" => PseudoElement::Before,
                "After" => PseudoElement::After,
                "FirstLine" => PseudoElement::FirstLine,
                "FirstLetter" => PseudoElement::FirstLetter,
                "Marker" => PseudoElement::Marker,
                "Selection" => PseudoElement::Selection,
                "Placeholder" => PseudoElement::Placeholder,
                "Backdrop" => PseudoElement::Backdrop,
                other => return Err(SelectorError::Unsupported(format!("pseudo-element {other}"))),
            };
            SelectorComponent::PseudoElement(pseudo)
        }

        // HTML documents carry no namespaces to constrain
        Component::ExplicitAnyNamespace
        | Component::ExplicitNoNamespace
        | Component::DefaultNamespace(_)
        | Component::Namespace(..) => return Ok(None),

        _ => return Err(SelectorError::Unsupported("simple selector".to_string())),
    };
    Ok(Some(converted))
}

/// Only state the static tree can answer is supported
fn convert_pseudo_class(pseudo: &CssPseudoClass<'_>) -> Result<PseudoClass, SelectorError> {
    match variant_name(pseudo).as_str() {
        "Link" => Ok(PseudoClass::Link),
        "AnyLink" => Ok(PseudoClass::AnyLink),
        "Enabled" => Ok(PseudoClass::Enabled),
        "Disabled" => Ok(PseudoClass::Disabled),
        "Checked" => Ok(PseudoClass::Checked),
        _ => Err(SelectorError::Unsupported(format!("pseudo-class {pseudo:?}"))),
    }
}

/// Variant name of a lightningcss enum, taken from its `Debug` output
fn variant_name(value: &impl fmt::Debug) -> String {
    let debug = format!("{value:?}");
    debug
        .split(['(', ' ', '{'])
        .next()
        .unwrap_or_default()
        .to_string()
}
