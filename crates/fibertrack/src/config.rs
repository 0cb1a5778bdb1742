//! Tracker configuration
//!
//! [`TrackerOptions`] is what callers write (or load from JSON);
//! [`ResolvedConfig`] is what the pipeline reads, with selectors parsed.

use fibertrack_css::{SelectorList, parse_selector_list};
use serde::{Deserialize, Serialize};

use crate::TrackerError;

/// Tracker options as supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrackerOptions {
    /// When false, nothing is reported
    pub enabled: bool,
    /// Elements matching any of these are never reported
    pub ignore_selectors: Vec<String>,
    /// When set, Pointer events report only elements matching one of these
    pub include_selectors: Option<Vec<String>>,
    /// Log every assembled record
    pub debug: bool,
}

impl Default for TrackerOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            ignore_selectors: Vec::new(),
            include_selectors: None,
            debug: false,
        }
    }
}

impl TrackerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load options from a JSON object; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, TrackerError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_ignore_selector(mut self, selector: impl Into<String>) -> Self {
        self.ignore_selectors.push(selector.into());
        self
    }

    pub fn with_include_selector(mut self, selector: impl Into<String>) -> Self {
        self.include_selectors
            .get_or_insert_with(Vec::new)
            .push(selector.into());
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// Configuration derived once at tracker construction
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub enabled: bool,
    pub ignore_selectors: Vec<SelectorList>,
    pub include_selectors: Option<Vec<SelectorList>>,
    pub debug: bool,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ignore_selectors: Vec::new(),
            include_selectors: None,
            debug: false,
        }
    }
}

impl ResolvedConfig {
    /// Parse every selector; the first malformed one is an error
    pub fn resolve(options: &TrackerOptions) -> Result<Self, TrackerError> {
        let include_selectors = options
            .include_selectors
            .as_deref()
            .map(parse_all)
            .transpose()?;

        Ok(Self {
            enabled: options.enabled,
            ignore_selectors: parse_all(&options.ignore_selectors)?,
            include_selectors,
            debug: options.debug,
        })
    }
}

fn parse_all(selectors: &[String]) -> Result<Vec<SelectorList>, TrackerError> {
    selectors
        .iter()
        .map(|selector| {
            parse_selector_list(selector).map_err(|source| TrackerError::InvalidSelector {
                selector: selector.clone(),
                source,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ResolvedConfig::resolve(&TrackerOptions::default()).unwrap();

        assert!(config.enabled);
        assert!(config.ignore_selectors.is_empty());
        assert!(config.include_selectors.is_none());
        assert!(!config.debug);
    }

    #[test]
    fn test_from_json() {
        let options = TrackerOptions::from_json(
            r#"{ "ignoreSelectors": [".no-track"], "includeSelectors": ["nav a"], "debug": true }"#,
        )
        .unwrap();

        assert!(options.enabled);
        assert_eq!(options.ignore_selectors, vec![".no-track"]);
        assert_eq!(options.include_selectors, Some(vec!["nav a".to_string()]));
        assert!(options.debug);
    }

    #[test]
    fn test_from_json_rejects_wrong_types() {
        let err = TrackerOptions::from_json(r#"{ "enabled": "yes" }"#).unwrap_err();
        assert!(matches!(err, TrackerError::InvalidOptions(_)));
    }

    #[test]
    fn test_malformed_selector_rejected() {
        let options = TrackerOptions::new()
            .with_ignore_selector(".ok")
            .with_include_selector("nav >");

        let err = ResolvedConfig::resolve(&options).unwrap_err();
        match err {
            TrackerError::InvalidSelector { selector, .. } => assert_eq!(selector, "nav >"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_builder() {
        let options = TrackerOptions::new()
            .with_enabled(false)
            .with_include_selector("nav a")
            .with_include_selector("[data-track]");
        let config = ResolvedConfig::resolve(&options).unwrap();

        assert!(!config.enabled);
        assert_eq!(config.include_selectors.map(|s| s.len()), Some(2));
    }
}
