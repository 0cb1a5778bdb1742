//! Element Attributes
//!
//! Ordered attribute storage: get, set, remove, has.
//!
//! Attribute names are ASCII-lowercased on the way in, matching HTML
//! documents. Values are kept verbatim.

/// Single attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub name: String,
    pub value: String,
}

impl Attr {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_lowercase(),
            value: value.into(),
        }
    }

    /// `data-*` attribute
    pub fn is_data(&self) -> bool {
        self.name.starts_with("data-")
    }
}

/// Named node map (attribute collection), in source order
#[derive(Debug, Clone, Default)]
pub struct NamedNodeMap {
    attributes: Vec<Attr>,
}

impl NamedNodeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of attributes
    pub fn length(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Get attribute by index
    pub fn item(&self, index: usize) -> Option<&Attr> {
        self.attributes.get(index)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.attributes
            .iter()
            .position(|a| a.name.eq_ignore_ascii_case(name))
    }

    /// Get attribute value
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.position(name).map(|i| self.attributes[i].value.as_str())
    }

    /// Set attribute, replacing the value in place if it exists.
    ///
    /// Returns the previous value.
    pub fn set_attribute(&mut self, name: &str, value: &str) -> Option<String> {
        match self.position(name) {
            Some(i) => Some(std::mem::replace(&mut self.attributes[i].value, value.to_string())),
            None => {
                self.attributes.push(Attr::new(name, value));
                None
            }
        }
    }

    /// Remove attribute by name
    pub fn remove_attribute(&mut self, name: &str) -> Option<Attr> {
        let index = self.position(name)?;
        Some(self.attributes.remove(index))
    }

    /// Check if attribute exists
    pub fn has_attribute(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Toggle a boolean attribute
    pub fn toggle_attribute(&mut self, name: &str, force: Option<bool>) -> bool {
        let present = self.has_attribute(name);
        let want = force.unwrap_or(!present);
        if want && !present {
            self.set_attribute(name, "");
        } else if !want && present {
            self.remove_attribute(name);
        }
        want
    }

    /// Get attribute names
    pub fn get_attribute_names(&self) -> Vec<&str> {
        self.attributes.iter().map(|a| a.name.as_str()).collect()
    }

    /// Iterate over attributes
    pub fn iter(&self) -> impl Iterator<Item = &Attr> {
        self.attributes.iter()
    }

    /// Iterate over `data-*` attributes
    pub fn data_attributes(&self) -> impl Iterator<Item = &Attr> {
        self.attributes.iter().filter(|a| a.is_data())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_attribute() {
        let mut attrs = NamedNodeMap::new();
        attrs.set_attribute("class", "btn");
        attrs.set_attribute("ID", "submit");

        assert_eq!(attrs.length(), 2);
        assert_eq!(attrs.get_attribute("class"), Some("btn"));
        assert_eq!(attrs.get_attribute("id"), Some("submit"));
        assert_eq!(attrs.set_attribute("class", "btn primary"), Some("btn".to_string()));
        assert_eq!(attrs.get_attribute_names(), vec!["class", "id"]);
    }

    #[test]
    fn test_remove_attribute() {
        let mut attrs = NamedNodeMap::new();
        attrs.set_attribute("foo", "bar");

        assert!(attrs.has_attribute("foo"));
        attrs.remove_attribute("foo");
        assert!(!attrs.has_attribute("foo"));
    }

    #[test]
    fn test_toggle_attribute() {
        let mut attrs = NamedNodeMap::new();

        assert!(attrs.toggle_attribute("disabled", None));
        assert!(attrs.has_attribute("disabled"));

        assert!(!attrs.toggle_attribute("disabled", None));
        assert!(!attrs.has_attribute("disabled"));

        assert!(attrs.toggle_attribute("hidden", Some(true)));
        assert!(attrs.toggle_attribute("hidden", Some(true)));
        assert_eq!(attrs.length(), 1);
    }

    #[test]
    fn test_data_attributes() {
        let mut attrs = NamedNodeMap::new();
        attrs.set_attribute("data-track-id", "cta");
        attrs.set_attribute("class", "btn");
        attrs.set_attribute("data-variant", "primary");

        let names: Vec<_> = attrs.data_attributes().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["data-track-id", "data-variant"]);
    }
}
