use serde_json::{Map, Value as Json};
use thiserror::Error;

/// Structured data attached to a mutation output (the block entity or entity
/// tag compound written alongside the output when it is placed or spawned).
///
/// Parsed once while the index is built and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    compound: Map<String, Json>,
}

impl Metadata {
    #[must_use]
    pub fn new(compound: Map<String, Json>) -> Self {
        Self { compound }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Json> {
        self.compound.get(key)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.compound.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.compound.len()
    }

    #[must_use]
    pub fn as_map(&self) -> &Map<String, Json> {
        &self.compound
    }
}

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("expected a compound, found {found}")]
    NotACompound { found: &'static str },
}

/// Turns a raw `nbtData` blob into [`Metadata`].
///
/// Implementations must not panic on bad input. Failures are reported by the
/// index builder and replaced with empty metadata.
pub trait MetadataCodec {
    /// # Errors
    ///
    /// Returns [`MetadataError`] if the blob cannot be read as metadata.
    fn parse(&self, raw: Option<&Json>) -> Result<Metadata, MetadataError>;
}

/// Default codec: a JSON object maps one-to-one onto a compound.
/// A missing or `null` blob yields an empty compound.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompoundCodec;

impl MetadataCodec for CompoundCodec {
    fn parse(&self, raw: Option<&Json>) -> Result<Metadata, MetadataError> {
        match raw {
            None | Some(Json::Null) => Ok(Metadata::default()),
            Some(Json::Object(map)) => Ok(Metadata::new(map.clone())),
            Some(other) => Err(MetadataError::NotACompound {
                found: json_kind(other),
            }),
        }
    }
}

fn json_kind(value: &Json) -> &'static str {
    match value {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "list",
        Json::Object(_) => "compound",
    }
}
