use std::fmt;

use rand::Rng;

use super::kind::MutationKind;
use super::metadata::Metadata;
use super::rule::RuleRecord;
use super::sampler::WeightedSampler;

/// Which index a rule is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// Block or fluid tag in, block or fluid out.
    BlockTag,
    /// Concrete block or fluid in, block or fluid out.
    Block,
    /// Block or fluid tag in, item out.
    ItemTag,
    /// Concrete block in, item out.
    Item,
    /// Entity type in, entity type out.
    Entity,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Target::BlockTag => "block tag",
            Target::Block => "block",
            Target::ItemTag => "item tag",
            Target::Item => "item",
            Target::Entity => "entity",
        };
        f.write_str(name)
    }
}

/// Per-candidate values after default coercion and metadata parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputAttributes {
    pub weight: f64,
    pub chance: f64,
    pub metadata: Metadata,
}

/// A validated rule whose identifiers have been resolved against the registry.
#[derive(Debug, Clone)]
pub struct CompiledMutation<V> {
    kind: MutationKind,
    source: RuleRecord,
    outputs: WeightedSampler<(V, OutputAttributes)>,
}

impl<V> CompiledMutation<V> {
    pub(crate) fn new(kind: MutationKind, source: RuleRecord) -> Self {
        Self {
            kind,
            source,
            outputs: WeightedSampler::new(),
        }
    }

    pub(crate) fn push(&mut self, output: V, attributes: OutputAttributes) {
        self.outputs.insert(attributes.weight, (output, attributes));
    }

    #[must_use]
    pub fn kind(&self) -> MutationKind {
        self.kind
    }

    /// The rule this mutation was compiled from.
    #[must_use]
    pub fn source(&self) -> &RuleRecord {
        &self.source
    }

    #[must_use]
    pub fn outputs(&self) -> &WeightedSampler<(V, OutputAttributes)> {
        &self.outputs
    }

    /// Surviving candidates in authored order.
    pub fn candidates(&self) -> impl Iterator<Item = (&V, &OutputAttributes)> {
        self.outputs.iter().map(|(_, (v, attrs))| (v, attrs))
    }

    /// Pick one candidate by weight. The chance gate is not applied.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Resolution<'_, V>> {
        self.outputs
            .sample(rng)
            .map(|(output, attributes)| Resolution {
                kind: self.kind,
                output,
                attributes,
            })
    }
}

/// The candidate a lookup landed on.
///
/// Weight already decided *which* output this is; [`roll`](Self::roll)
/// decides *whether* the mutation happens.
#[derive(Debug, PartialEq)]
#[must_use]
pub struct Resolution<'a, V> {
    kind: MutationKind,
    output: &'a V,
    attributes: &'a OutputAttributes,
}

impl<V> Clone for Resolution<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for Resolution<'_, V> {}

impl<'a, V> Resolution<'a, V> {
    #[must_use]
    pub fn kind(&self) -> MutationKind {
        self.kind
    }

    #[must_use]
    pub fn output(&self) -> &'a V {
        self.output
    }

    #[must_use]
    pub fn attributes(&self) -> &'a OutputAttributes {
        self.attributes
    }

    /// Probability that the mutation fires once this output is selected.
    #[must_use]
    pub fn chance(&self) -> f64 {
        self.attributes.chance
    }

    #[must_use]
    pub fn metadata(&self) -> &'a Metadata {
        &self.attributes.metadata
    }

    /// Bernoulli trial with success probability [`chance`](Self::chance).
    /// A chance of 1 or more always succeeds without consuming randomness.
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        self.chance() >= 1.0 || rng.gen::<f64>() < self.chance()
    }
}
