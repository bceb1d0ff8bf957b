use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as Json;

use super::kind::{self, MutationKind};

fn one() -> f64 {
    1.0
}

/// An explicit `null` reads as the field's default of 1.
fn null_as_one<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(1.0))
}

/// Replace a non-positive (or non-finite) value with `fallback`.
pub(crate) fn coerce(value: f64, fallback: f64) -> f64 {
    if value > 0.0 && value.is_finite() {
        value
    } else {
        fallback
    }
}

/// One authored mutation rule, as read from bee data.
///
/// Every field the loader might leave out is optional here; the validator
/// decides what is usable. After validation `kind`, `input_id` and
/// `outputs` are present, `outputs` is non-empty, and every candidate has an
/// `output_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleRecord {
    #[serde(rename = "type", default, deserialize_with = "kind::lenient")]
    pub kind: Option<MutationKind>,

    #[serde(rename = "inputID", default)]
    pub input_id: Option<String>,

    #[serde(default)]
    pub outputs: Option<Vec<OutputCandidate>>,

    #[serde(rename = "defaultWeight", default = "one", deserialize_with = "null_as_one")]
    pub default_weight: f64,

    #[serde(rename = "defaultChance", default = "one", deserialize_with = "null_as_one")]
    pub default_chance: f64,
}

/// One possible result of a rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputCandidate {
    #[serde(rename = "outputID", default)]
    pub output_id: Option<String>,

    #[serde(default = "one", deserialize_with = "null_as_one")]
    pub weight: f64,

    #[serde(default = "one", deserialize_with = "null_as_one")]
    pub chance: f64,

    #[serde(rename = "nbtData", default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Json>,
}

impl RuleRecord {
    #[must_use]
    pub fn new(kind: MutationKind, input_id: &str, outputs: Vec<OutputCandidate>) -> Self {
        Self {
            kind: Some(kind),
            input_id: Some(input_id.to_owned()),
            outputs: Some(outputs),
            default_weight: 1.0,
            default_chance: 1.0,
        }
    }

    #[must_use]
    pub fn with_defaults(mut self, weight: f64, chance: f64) -> Self {
        self.default_weight = weight;
        self.default_chance = chance;
        self
    }

    /// The rule-level weight, or 1 if the declared one is not positive.
    #[must_use]
    pub fn default_weight(&self) -> f64 {
        coerce(self.default_weight, 1.0)
    }

    /// The rule-level chance, or 1 if the declared one is not positive.
    #[must_use]
    pub fn default_chance(&self) -> f64 {
        coerce(self.default_chance, 1.0)
    }

    /// Effective `(weight, chance)` of a candidate of this rule.
    #[must_use]
    pub fn effective(&self, candidate: &OutputCandidate) -> (f64, f64) {
        (
            coerce(candidate.weight, self.default_weight()),
            coerce(candidate.chance, self.default_chance()),
        )
    }

    /// The raw output identifiers, for diagnostics.
    pub(crate) fn raw_output_ids(&self) -> Vec<String> {
        self.outputs
            .iter()
            .flatten()
            .map(|o| o.output_id.clone().unwrap_or_else(|| "null".to_owned()))
            .collect()
    }
}

impl OutputCandidate {
    #[must_use]
    pub fn new(output_id: &str) -> Self {
        Self {
            output_id: Some(output_id.to_owned()),
            weight: 1.0,
            chance: 1.0,
            metadata: None,
        }
    }

    #[must_use]
    pub fn weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    #[must_use]
    pub fn chance(mut self, chance: f64) -> Self {
        self.chance = chance;
        self
    }

    #[must_use]
    pub fn metadata(mut self, raw: Json) -> Self {
        self.metadata = Some(raw);
        self
    }
}
