use thiserror::Error;

use super::kind::MutationKind;

/// A data problem found while validating or compiling mutation rules.
///
/// None of these stop a load. The offending rule or candidate is skipped and
/// the diagnostic is handed to the [`DiagnosticSink`] passed to the builder.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Diagnostic {
    #[error("\"type\" could not be validated for {owner}'s mutation")]
    MissingKind { owner: String },

    #[error("\"inputID\" does not exist for {owner}'s mutation")]
    MissingInput { owner: String },

    #[error("\"outputs\" does not exist for {owner}'s mutation")]
    MissingOutputs { owner: String },

    #[error("an instance of \"outputID\" does not exist for {owner}'s mutation")]
    MissingOutputId { owner: String },

    #[error("no valid outputs could be found for {owner}'s mutation")]
    NoValidOutputs { owner: String },

    #[error(
        "could not validate mutation for {owner}: [type: {}, inputID: \"{input}\", outputs: [{}], chance: {chance}]",
        .kind.map_or("null", MutationKind::as_str),
        .outputs.join(", ")
    )]
    Unresolved {
        owner: String,
        kind: Option<MutationKind>,
        input: String,
        outputs: Vec<String>,
        chance: f64,
    },

    #[error("could not deserialize metadata for {owner}'s mutation: [{raw}]: {reason}")]
    MalformedMetadata {
        owner: String,
        raw: String,
        reason: String,
    },
}

impl Diagnostic {
    /// Name of the entity whose data produced this diagnostic.
    #[must_use]
    pub fn owner(&self) -> &str {
        match self {
            Diagnostic::MissingKind { owner }
            | Diagnostic::MissingInput { owner }
            | Diagnostic::MissingOutputs { owner }
            | Diagnostic::MissingOutputId { owner }
            | Diagnostic::NoValidOutputs { owner }
            | Diagnostic::Unresolved { owner, .. }
            | Diagnostic::MalformedMetadata { owner, .. } => owner,
        }
    }
}

/// Receives diagnostics produced during validation and index building.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Forwards every diagnostic to `tracing` at `WARN` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        tracing::warn!(owner = diagnostic.owner(), "{diagnostic}");
    }
}

/// Keeps diagnostics in memory, in the order they were reported.
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    diagnostics: Vec<Diagnostic>,
}

impl CollectingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}
