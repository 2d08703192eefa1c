//! Parse configuration.

/// Options controlling how a document is parsed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Options {
    /// Fail when an external buffer or image URI resolves to no bytes,
    /// instead of logging and continuing with empty data.
    pub strict_resources: bool,
}

impl Options {
    /// Create default options (lenient resources).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set strict resource resolution.
    pub fn strict_resources(mut self, strict: bool) -> Self {
        self.strict_resources = strict;
        self
    }
}
