use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as Json;

/// What a rule turns its input into.
///
/// Serialized with the upper-snake names used in bee data files
/// (`"BLOCK_TO_BLOCK"`, `"ENTITY_TO_ENTITY"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MutationKind {
    BlockToBlock,
    BlockToFluid,
    FluidToBlock,
    FluidToFluid,
    BlockToItem,
    EntityToEntity,
}

impl MutationKind {
    pub const ALL: [MutationKind; 6] = [
        MutationKind::BlockToBlock,
        MutationKind::BlockToFluid,
        MutationKind::FluidToBlock,
        MutationKind::FluidToFluid,
        MutationKind::BlockToItem,
        MutationKind::EntityToEntity,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MutationKind::BlockToBlock => "BLOCK_TO_BLOCK",
            MutationKind::BlockToFluid => "BLOCK_TO_FLUID",
            MutationKind::FluidToBlock => "FLUID_TO_BLOCK",
            MutationKind::FluidToFluid => "FLUID_TO_FLUID",
            MutationKind::BlockToItem => "BLOCK_TO_ITEM",
            MutationKind::EntityToEntity => "ENTITY_TO_ENTITY",
        }
    }
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by [`MutationKind::from_str`] for names outside the known set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown mutation type '{0}'")]
pub struct UnknownKind(pub String);

impl FromStr for MutationKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MutationKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownKind(s.to_owned()))
    }
}

/// Deserialize an optional kind, mapping anything that is not a known name
/// (the legacy `"NONE"`, a number, an object) to `None` so the validator can
/// drop the rule instead of the whole document failing to load.
pub(crate) fn lenient<'de, D>(deserializer: D) -> Result<Option<MutationKind>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Json> = Option::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(Json::as_str)
        .and_then(|s| s.parse().ok()))
}
