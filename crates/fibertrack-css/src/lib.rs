//! fibertrack CSS Selectors
//!
//! Selector parsing and matching against a `fibertrack-dom` tree.
//!
//! # Example
//! ```rust,ignore
//! use fibertrack_css::{matches_selector, parse_selector_list};
//!
//! let nav_links = parse_selector_list("nav a[href]")?;
//! let is_nav_link = matches_selector(&tree, element, &nav_links);
//! ```

mod parser;
mod matching;
pub mod selectors;

pub use parser::parse_selector_list;
pub use matching::{match_component, matches_selector};
pub use selectors::{Combinator, ComplexSelector, CompoundSelector, SelectorComponent, SelectorList};

/// Selector parsing error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("Empty selector")]
    Empty,

    #[error("Invalid selector: {0}")]
    Parse(String),

    #[error("Input is not a single selector list")]
    NotASelector,

    #[error("Unsupported selector: {0}")]
    Unsupported(String),
}
