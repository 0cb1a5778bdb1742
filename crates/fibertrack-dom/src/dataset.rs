//! DOMStringMap (dataset)
//!
//! `data-*` attribute access with camelCase keys.

use std::collections::BTreeMap;

use crate::Attr;

/// DOMStringMap for data-* attributes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomStringMap {
    data: BTreeMap<String, String>,
}

impl DomStringMap {
    /// Create empty string map
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect from an element's attributes, ignoring non-data ones
    pub fn from_attributes<'a>(attrs: impl IntoIterator<Item = &'a Attr>) -> Self {
        let data = attrs
            .into_iter()
            .filter_map(|attr| {
                let key = attr.name.strip_prefix("data-")?;
                Some((to_camel_case(key), attr.value.clone()))
            })
            .collect();
        Self { data }
    }

    /// Get value by camelCase key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    pub fn has(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Convert key to attribute name
    pub fn to_attribute_name(key: &str) -> String {
        format!("data-{}", to_kebab_case(key))
    }

    /// Consume into the sorted key/value map
    pub fn into_map(self) -> BTreeMap<String, String> {
        self.data
    }
}

/// Convert kebab-case to camelCase (`track-id` -> `trackId`)
pub fn to_camel_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut capitalize_next = false;

    for c in s.chars() {
        if c == '-' {
            capitalize_next = true;
        } else if capitalize_next && c.is_ascii_lowercase() {
            result.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            if capitalize_next {
                // "-1" keeps its hyphen
                result.push('-');
                capitalize_next = false;
            }
            result.push(c);
        }
    }
    if capitalize_next {
        result.push('-');
    }

    result
}

/// Convert camelCase to kebab-case
pub fn to_kebab_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);

    for c in s.chars() {
        if c.is_ascii_uppercase() {
            result.push('-');
            result.push(c.to_ascii_lowercase());
        } else {
            result.push(c);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_attributes() {
        let attrs = vec![
            Attr::new("data-user-id", "123"),
            Attr::new("data-active", "true"),
            Attr::new("class", "ignored"),
        ];

        let map = DomStringMap::from_attributes(&attrs);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("userId"), Some("123"));
        assert_eq!(map.get("active"), Some("true"));
        assert!(!map.has("class"));
    }

    #[test]
    fn test_case_conversion() {
        assert_eq!(to_camel_case("track-event-name"), "trackEventName");
        assert_eq!(to_camel_case("step-1"), "step-1");
        assert_eq!(to_kebab_case("trackEventName"), "track-event-name");
        assert_eq!(DomStringMap::to_attribute_name("userId"), "data-user-id");
    }
}
