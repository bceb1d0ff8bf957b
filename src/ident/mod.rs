mod error;
mod grammar;

use std::fmt;

pub use error::IdentError;

/// Namespace assumed when an identifier does not name one.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// A normalized registry identifier, `namespace:path`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceId {
    namespace: String,
    path: String,
}

impl ResourceId {
    /// Lowercase `raw` and parse it as `[namespace:]path`.
    ///
    /// # Errors
    ///
    /// Returns [`IdentError`] if the lowercased input is not a valid identifier.
    pub fn parse(raw: &str) -> Result<Self, IdentError> {
        use winnow::Parser;
        let lowered = raw.to_lowercase();
        let (namespace, path) = grammar::resource_id
            .parse(lowered.as_str())
            .map_err(|e| IdentError::new(lowered.as_str(), e.to_string()))?;
        Ok(Self {
            namespace: namespace.unwrap_or(DEFAULT_NAMESPACE).to_owned(),
            path: path.to_owned(),
        })
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}
