//! Parse configuration

/// Default prefix prepended to attribute keys
pub const DEFAULT_ATTR_PREFIX: &str = "@";

/// How a repeated sibling decides between appending and promoting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListMode {
    /// Append whenever the value already stored under the key is a list.
    /// Interleaved siblings (`<a/><b/><a/>`) keep a single flat list.
    #[default]
    Scoped,
    /// One flag for the whole pass, cleared by any first-seen key. Matches the
    /// historical output, including nested lists for interleaved siblings.
    PassWide,
}

/// Options for [`parse_with`](super::parse_with)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    pub attr_prefix: String,
    pub list_mode: ListMode,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attr_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.attr_prefix = prefix.into();
        self
    }

    pub fn with_list_mode(mut self, mode: ListMode) -> Self {
        self.list_mode = mode;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            attr_prefix: DEFAULT_ATTR_PREFIX.to_owned(),
            list_mode: ListMode::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ParseOptions::default();
        assert_eq!(options.attr_prefix, "@");
        assert_eq!(options.list_mode, ListMode::Scoped);
    }

    #[test]
    fn test_builder() {
        let options = ParseOptions::new()
            .with_attr_prefix("_")
            .with_list_mode(ListMode::PassWide);
        assert_eq!(options.attr_prefix, "_");
        assert_eq!(options.list_mode, ListMode::PassWide);
    }
}
