//! Selector AST
//!
//! Compound selectors joined by combinators, plus attribute and
//! pseudo-class matching primitives.

/// Pseudo-element type. Pseudo-elements never match a real element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PseudoElement {
    Before,
    After,
    FirstLine,
    FirstLetter,
    Marker,
    Selection,
    Placeholder,
    Backdrop,
}

/// Pseudo-class type
#[derive(Debug, Clone, PartialEq)]
pub enum PseudoClass {
    // Link pseudo-classes
    Link,
    AnyLink,

    // Input pseudo-classes
    Enabled,
    Disabled,
    Checked,

    // Tree-structural pseudo-classes
    Root,
    Empty,
    FirstChild,
    LastChild,
    OnlyChild,
    FirstOfType,
    LastOfType,
    OnlyOfType,
    NthChild(NthExpression),
    NthLastChild(NthExpression),
    NthOfType(NthExpression),
    NthLastOfType(NthExpression),

    // Logical pseudo-classes
    Not(SelectorList),
    Is(SelectorList),
    Where(SelectorList),
}

/// An+B expression for :nth-* selectors
#[derive(Debug, Clone, PartialEq)]
pub struct NthExpression {
    /// Coefficient (A in An+B)
    pub a: i32,
    /// Offset (B in An+B)
    pub b: i32,
}

impl NthExpression {
    /// Create "odd" expression (2n+1)
    pub fn odd() -> Self {
        Self { a: 2, b: 1 }
    }

    /// Create An+B expression
    pub fn new(a: i32, b: i32) -> Self {
        Self { a, b }
    }

    /// Check if index n (1-based) matches this expression
    pub fn matches(&self, n: i32) -> bool {
        if self.a == 0 {
            return n == self.b;
        }

        // Widened so extreme coefficients cannot overflow
        let (a, diff) = (i64::from(self.a), i64::from(n) - i64::from(self.b));
        diff % a == 0 && diff / a >= 0
    }
}

/// A simple selector inside a compound
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorComponent {
    /// Universal selector *
    Universal,
    /// Type selector (tag name, lower-case)
    Type(String),
    /// ID selector #id
    Id(String),
    /// Class selector .class
    Class(String),
    /// Attribute selector [attr], [attr=value], etc.
    Attribute(AttributeSelector),
    /// Pseudo-class :first-child, :not(), etc.
    PseudoClass(PseudoClass),
    /// Pseudo-element ::before, ::after
    PseudoElement(PseudoElement),
}

/// Attribute selector
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSelector {
    pub name: String,
    pub matcher: Option<AttributeMatcher>,
    pub case_insensitive: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeMatcher {
    /// [attr=value] - exact match
    Exact(String),
    /// [attr~=value] - whitespace-separated list contains
    Contains(String),
    /// [attr|=value] - exact or prefix with hyphen
    DashMatch(String),
    /// [attr^=value] - starts with
    Prefix(String),
    /// [attr$=value] - ends with
    Suffix(String),
    /// [attr*=value] - contains substring
    Substring(String),
}

impl AttributeSelector {
    /// Check if an attribute value matches
    pub fn matches(&self, value: Option<&str>) -> bool {
        let (Some(matcher), Some(value)) = (&self.matcher, value) else {
            // [attr] only checks existence
            return self.matcher.is_none() && value.is_some();
        };

        let fold = |s: &str| {
            if self.case_insensitive {
                s.to_lowercase()
            } else {
                s.to_string()
            }
        };
        let val = fold(value);

        match matcher {
            AttributeMatcher::Exact(expected) => val == fold(expected),
            AttributeMatcher::Contains(expected) => {
                let expected = fold(expected);
                val.split_ascii_whitespace().any(|w| w == expected)
            }
            AttributeMatcher::DashMatch(expected) => {
                let expected = fold(expected);
                val == expected || val.starts_with(&format!("{expected}-"))
            }
            // Empty operands never match for the substring family
            AttributeMatcher::Prefix(expected) => {
                !expected.is_empty() && val.starts_with(&fold(expected))
            }
            AttributeMatcher::Suffix(expected) => {
                !expected.is_empty() && val.ends_with(&fold(expected))
            }
            AttributeMatcher::Substring(expected) => {
                !expected.is_empty() && val.contains(&fold(expected))
            }
        }
    }
}

/// Sequence of simple selectors with no combinator between them (`a.nav[href]`)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompoundSelector {
    pub components: Vec<SelectorComponent>,
}

/// Relationship between two compounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// `a b`
    Descendant,
    /// `a > b`
    Child,
    /// `a + b`
    NextSibling,
    /// `a ~ b`
    SubsequentSibling,
}

/// Compounds joined by combinators, left to right.
///
/// `combinators[i]` sits between `compounds[i]` and `compounds[i + 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexSelector {
    pub compounds: Vec<CompoundSelector>,
    pub combinators: Vec<Combinator>,
}

/// Comma-separated selector list; matches if any member matches
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorList {
    pub selectors: Vec<ComplexSelector>,
    /// Source text, kept for diagnostics
    pub text: String,
}

impl SelectorList {
    /// Source text of this selector list
    pub fn as_str(&self) -> &str {
        &self.text
    }
}
