use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Default number of mutation attempts per evaluation cycle.
pub const DEFAULT_MUTATION_COUNT: u32 = 10;

/// Engine-wide settings shared by every owner's mutation data.
///
/// ```
/// use mutagen::EngineConfig;
///
/// let config = EngineConfig::from_toml_str(r#"
///     tag_prefix = "tag:"
///     default_mutation_count = 4
/// "#).unwrap();
/// assert_eq!(config.tag_prefix, "tag:");
/// assert_eq!(config.entity_prefix, "entity:");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Marks an input identifier as a tag reference. Matched case-sensitively.
    pub tag_prefix: String,
    /// Marks an identifier as an entity reference. Matched case-sensitively.
    pub entity_prefix: String,
    /// Used when an owner declares a mutation count of zero or less.
    pub default_mutation_count: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tag_prefix: "#".to_owned(),
            entity_prefix: "entity:".to_owned(),
            default_mutation_count: DEFAULT_MUTATION_COUNT,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid engine config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("'{field}' must not be empty")]
    EmptyPrefix { field: &'static str },

    #[error("tag and entity prefixes must differ (both are '{prefix}')")]
    SamePrefix { prefix: String },

    #[error("'default_mutation_count' must be at least 1")]
    ZeroMutationCount,
}

impl EngineConfig {
    /// Parse and validate a TOML document. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on malformed TOML or invalid values.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns [`MutagenError`](crate::MutagenError) on I/O or config failure.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, crate::MutagenError> {
        let input = std::fs::read_to_string(path)?;
        Ok(Self::from_toml_str(&input)?)
    }

    /// # Errors
    ///
    /// Returns [`ConfigError`] if a prefix is empty, the two prefixes collide,
    /// or the default mutation count is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tag_prefix.is_empty() {
            return Err(ConfigError::EmptyPrefix {
                field: "tag_prefix",
            });
        }
        if self.entity_prefix.is_empty() {
            return Err(ConfigError::EmptyPrefix {
                field: "entity_prefix",
            });
        }
        if self.tag_prefix == self.entity_prefix {
            return Err(ConfigError::SamePrefix {
                prefix: self.tag_prefix.clone(),
            });
        }
        if self.default_mutation_count == 0 {
            return Err(ConfigError::ZeroMutationCount);
        }
        Ok(())
    }
}
