//! Data-driven mutation rules for bees.
//!
//! A bee's data lists rules that turn a block, block tag or entity into one
//! of several weighted outputs. [`IndexBuilder`] validates those rules,
//! resolves their identifiers through a [`Registry`] and files each one
//! under one of five lookup tables in a [`MutationIndex`]. At runtime the
//! index picks an output by weight and reports the chance that the mutation
//! should actually happen.

mod compile;
mod config;
mod error;
mod ident;
mod resolve;
mod types;
mod validate;

pub use compile::{classify, classify_legacy, IndexBuilder};
pub use config::{ConfigError, EngineConfig, DEFAULT_MUTATION_COUNT};
pub use error::MutagenError;
pub use ident::{IdentError, ResourceId, DEFAULT_NAMESPACE};
pub use types::{
    CollectingSink, CompiledMutation, CompoundCodec, Diagnostic, DiagnosticSink, MemoryRegistry,
    Metadata, MetadataCodec, MetadataError, MutationData, MutationIndex, MutationKind,
    OutputAttributes, OutputCandidate, Registry, Resolution, RuleRecord, Target, TracingSink,
    UnknownKind, WeightedSampler, AIR, NO_TAGS,
};
pub use validate::{validate_rule, validate_rules};
