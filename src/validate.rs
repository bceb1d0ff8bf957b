use crate::types::{Diagnostic, DiagnosticSink, RuleRecord};

/// Drop unusable rules from `rules` in place, reporting each drop to `sink`.
///
/// Candidates without an `outputID` are removed individually; a rule is only
/// dropped as a whole when it lacks a kind, input or output list, or when no
/// candidate survives. Rules are judged independently of their siblings.
pub fn validate_rules(rules: &mut Vec<RuleRecord>, owner: &str, sink: &mut dyn DiagnosticSink) {
    rules.retain_mut(|rule| validate_rule(rule, owner, sink));
}

/// Validate one rule, pruning bad candidates. Returns `false` if the rule
/// should be discarded.
pub fn validate_rule(rule: &mut RuleRecord, owner: &str, sink: &mut dyn DiagnosticSink) -> bool {
    let name = || owner.to_owned();
    if rule.kind.is_none() {
        sink.report(Diagnostic::MissingKind { owner: name() });
        return false;
    }
    if rule.input_id.is_none() {
        sink.report(Diagnostic::MissingInput { owner: name() });
        return false;
    }
    let Some(outputs) = rule.outputs.as_mut() else {
        sink.report(Diagnostic::MissingOutputs { owner: name() });
        return false;
    };
    outputs.retain(|candidate| {
        let keep = candidate.output_id.is_some();
        if !keep {
            sink.report(Diagnostic::MissingOutputId { owner: name() });
        }
        keep
    });
    if outputs.is_empty() {
        sink.report(Diagnostic::NoValidOutputs { owner: name() });
        return false;
    }
    true
}
