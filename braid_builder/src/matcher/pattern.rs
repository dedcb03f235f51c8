use crate::constant::{PATTERN_SEPARATOR, VALUE_SEPARATOR};

/// The pattern aliases of an option, in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Patterns(Vec<String>);

impl Patterns {
    pub(crate) fn push(&mut self, pattern: impl Into<String>) {
        self.0.push(pattern.into());
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// The value substring of `token` for the first pattern it names.
    /// A bare mention (`-w`) yields the empty substring, `-w=x` yields `x`.
    pub(crate) fn matches<'t>(&self, token: &'t str) -> Option<&'t str> {
        self.0.iter().find_map(|pattern| {
            let rest = token.strip_prefix(pattern.as_str())?;

            if rest.is_empty() {
                Some(rest)
            } else {
                rest.strip_prefix(VALUE_SEPARATOR)
            }
        })
    }
}

impl std::fmt::Display for Patterns {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join(PATTERN_SEPARATOR))
    }
}
