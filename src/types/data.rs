use serde::{Deserialize, Deserializer, Serialize};

use super::kind::{self, MutationKind};
use super::rule::RuleRecord;

/// The mutation section of one bee's data.
///
/// Besides the general `mutations` list, older data files describe a single
/// mutation through `mutationType`/`mutationInput`/`mutationOutput`, guarded
/// by `hasMutation`. Both forms are compiled into the same index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_mutation: bool,

    #[serde(default, deserialize_with = "kind::lenient")]
    pub mutation_type: Option<MutationKind>,

    #[serde(default)]
    pub mutation_input: Option<String>,

    #[serde(default)]
    pub mutation_output: Option<String>,

    /// How many mutation attempts the owner makes per cycle.
    /// Zero or less means "use the default".
    #[serde(default, deserialize_with = "null_as_default")]
    pub mutation_count: i32,

    #[serde(default, deserialize_with = "null_as_default")]
    pub mutations: Vec<RuleRecord>,
}

/// An explicit `null` reads the same as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl MutationData {
    /// Parse a bee's mutation section from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`MutagenError::Json`](crate::MutagenError::Json) if the
    /// document is not valid JSON or has the wrong shape. Individual bad rules
    /// do not fail the parse; they are dropped later by validation.
    pub fn from_json(input: &str) -> Result<Self, crate::MutagenError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Legacy single-rule form.
    #[must_use]
    pub fn legacy(kind: MutationKind, input: &str, output: &str) -> Self {
        Self {
            has_mutation: true,
            mutation_type: Some(kind),
            mutation_input: Some(input.to_owned()),
            mutation_output: Some(output.to_owned()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_rules(mut self, rules: Vec<RuleRecord>) -> Self {
        self.mutations = rules;
        self
    }

    /// The declared mutation count, or `default` if it is zero or less.
    #[must_use]
    pub fn mutation_count(&self, default: u32) -> u32 {
        u32::try_from(self.mutation_count)
            .ok()
            .filter(|&n| n > 0)
            .unwrap_or(default)
    }
}
