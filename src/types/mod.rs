mod data;
mod diagnostics;
mod index;
pub(crate) mod kind;
mod metadata;
mod mutation;
mod registry;
pub(crate) mod rule;
mod sampler;

pub use data::MutationData;
pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticSink, TracingSink};
pub use index::{MutationIndex, NO_TAGS};
pub use kind::{MutationKind, UnknownKind};
pub use metadata::{CompoundCodec, Metadata, MetadataCodec, MetadataError};
pub use mutation::{CompiledMutation, OutputAttributes, Resolution, Target};
pub use registry::{MemoryRegistry, Registry, AIR};
pub use rule::{OutputCandidate, RuleRecord};
pub use sampler::WeightedSampler;
