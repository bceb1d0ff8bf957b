use crate::ident::ResourceId;
use crate::types::{
    CompiledMutation, CompoundCodec, Diagnostic, DiagnosticSink, Metadata, MetadataCodec,
    MutationData, MutationIndex, MutationKind, OutputAttributes, OutputCandidate, Registry,
    RuleRecord, Target,
};
use crate::validate::validate_rules;
use crate::{ConfigError, EngineConfig};

/// Decide which index a rule from the `mutations` list belongs to.
///
/// The checks run in a fixed order and the first match wins, so a tagged
/// `BLOCK_TO_ITEM` rule is an item-tag mutation and never a block-tag one,
/// and an entity-prefixed input only counts as an entity when the kind says
/// so. Anything left over is a direct block mutation.
#[must_use]
pub fn classify(kind: MutationKind, input_id: &str, config: &EngineConfig) -> Target {
    let tagged = input_id.starts_with(config.tag_prefix.as_str());
    if kind == MutationKind::BlockToItem && tagged {
        Target::ItemTag
    } else if tagged {
        Target::BlockTag
    } else if kind == MutationKind::EntityToEntity
        && input_id.starts_with(config.entity_prefix.as_str())
    {
        Target::Entity
    } else if kind == MutationKind::BlockToItem {
        Target::Item
    } else {
        Target::Block
    }
}

/// Decide which index the legacy single-rule form belongs to.
///
/// Returns `None` for an entity mutation whose input or output lacks the
/// entity prefix; such data is ignored without a diagnostic.
#[must_use]
pub fn classify_legacy(
    kind: MutationKind,
    input_id: &str,
    output_id: &str,
    config: &EngineConfig,
) -> Option<Target> {
    let tagged = input_id.starts_with(config.tag_prefix.as_str());
    match kind {
        MutationKind::BlockToBlock
        | MutationKind::BlockToFluid
        | MutationKind::FluidToBlock
        | MutationKind::FluidToFluid => Some(if tagged {
            Target::BlockTag
        } else {
            Target::Block
        }),
        MutationKind::BlockToItem => Some(if tagged {
            Target::ItemTag
        } else {
            Target::Item
        }),
        MutationKind::EntityToEntity => {
            let entity = config.entity_prefix.as_str();
            (input_id.starts_with(entity) && output_id.starts_with(entity))
                .then_some(Target::Entity)
        }
    }
}

/// Compiles an owner's mutation rules into a [`MutationIndex`].
///
/// # Example
///
/// ```
/// use mutagen::{
///     CollectingSink, IndexBuilder, MemoryRegistry, MutationKind, OutputCandidate, RuleRecord,
/// };
///
/// let registry = MemoryRegistry::new()
///     .with_block("minecraft:dirt")
///     .with_block("minecraft:stone");
/// let rules = vec![RuleRecord::new(
///     MutationKind::BlockToBlock,
///     "minecraft:dirt",
///     vec![OutputCandidate::new("minecraft:stone")],
/// )];
///
/// let mut sink = CollectingSink::new();
/// let index = IndexBuilder::new(&registry)
///     .owner("stone_bee")
///     .compile(&rules, &mut sink);
/// assert!(index.block_mutation(&"minecraft:dirt".to_owned()).is_some());
/// assert!(sink.is_empty());
/// ```
pub struct IndexBuilder<'r, R: Registry> {
    registry: &'r R,
    owner: String,
    config: EngineConfig,
    codec: &'r dyn MetadataCodec,
}

impl<'r, R: Registry> IndexBuilder<'r, R> {
    #[must_use]
    pub fn new(registry: &'r R) -> Self {
        Self {
            registry,
            owner: "unknown".to_owned(),
            config: EngineConfig::default(),
            codec: &CompoundCodec,
        }
    }

    /// Name used in diagnostics.
    #[must_use]
    pub fn owner(mut self, owner: &str) -> Self {
        owner.clone_into(&mut self.owner);
        self
    }

    /// Use `config` instead of [`EngineConfig::default`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` fails [`EngineConfig::validate`].
    pub fn config(mut self, config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    #[must_use]
    pub fn codec(mut self, codec: &'r dyn MetadataCodec) -> Self {
        self.codec = codec;
        self
    }

    /// Run the whole load pipeline for one owner: validate `data.mutations`
    /// in place, compile them, then compile the legacy single rule if the
    /// owner declares one. A later rule for the same key replaces an earlier one.
    pub fn build(
        &self,
        data: &mut MutationData,
        sink: &mut dyn DiagnosticSink,
    ) -> MutationIndex<R> {
        validate_rules(&mut data.mutations, &self.owner, sink);
        let mut index = self.compile(&data.mutations, sink);
        index.mutation_count = data.mutation_count(self.config.default_mutation_count);
        self.add_legacy(data, &mut index, sink);
        tracing::debug!(owner = %self.owner, "built {index}");
        index
    }

    /// Compile rules that have already been validated.
    ///
    /// Unvalidated input is tolerated: a rule without a kind or input is
    /// reported as unresolved and skipped.
    pub fn compile(&self, rules: &[RuleRecord], sink: &mut dyn DiagnosticSink) -> MutationIndex<R> {
        let mut index = MutationIndex::new(self.config.default_mutation_count);
        for rule in rules {
            let (Some(kind), Some(input)) = (rule.kind, rule.input_id.as_deref()) else {
                self.report_unresolved(rule, sink);
                continue;
            };
            let target = classify(kind, input, &self.config);
            self.add(target, kind, input, rule, &mut index, sink);
        }
        index
    }

    fn add_legacy(
        &self,
        data: &MutationData,
        index: &mut MutationIndex<R>,
        sink: &mut dyn DiagnosticSink,
    ) {
        if !data.has_mutation {
            return;
        }
        let (Some(kind), Some(input), Some(output)) = (
            data.mutation_type,
            data.mutation_input.as_deref(),
            data.mutation_output.as_deref(),
        ) else {
            return;
        };
        let Some(target) = classify_legacy(kind, input, output, &self.config) else {
            return;
        };
        let rule = RuleRecord::new(kind, input, vec![OutputCandidate::new(output)]);
        self.add(target, kind, input, &rule, index, sink);
    }

    fn add(
        &self,
        target: Target,
        kind: MutationKind,
        input: &str,
        rule: &RuleRecord,
        index: &mut MutationIndex<R>,
        sink: &mut dyn DiagnosticSink,
    ) {
        let committed = match target {
            Target::BlockTag => self.tag_key(input).and_then(|tag| {
                let m = self.compile_outputs(kind, rule, |id| self.block(id), sink)?;
                index.block_tags.insert(tag, m);
                Some(())
            }),
            Target::Block => self.block(input).and_then(|block| {
                let m = self.compile_outputs(kind, rule, |id| self.block(id), sink)?;
                index.blocks.insert(block, m);
                Some(())
            }),
            Target::ItemTag => self.tag_key(input).and_then(|tag| {
                let m = self.compile_outputs(kind, rule, |id| self.item(id), sink)?;
                index.item_tags.insert(tag, m);
                Some(())
            }),
            Target::Item => self.block(input).and_then(|block| {
                let m = self.compile_outputs(kind, rule, |id| self.item(id), sink)?;
                index.items.insert(block, m);
                Some(())
            }),
            Target::Entity => self.entity(input).and_then(|entity| {
                let m = self.compile_outputs(kind, rule, |id| self.entity(id), sink)?;
                index.entities.insert(entity, m);
                Some(())
            }),
        };
        if committed.is_none() {
            self.report_unresolved(rule, sink);
        }
    }

    /// Resolve every candidate of `rule`, skipping the ones that do not
    /// resolve. Returns `None` if nothing survives.
    fn compile_outputs<V>(
        &self,
        kind: MutationKind,
        rule: &RuleRecord,
        resolve: impl Fn(&str) -> Option<V>,
        sink: &mut dyn DiagnosticSink,
    ) -> Option<CompiledMutation<V>> {
        let mut mutation = CompiledMutation::new(kind, rule.clone());
        for candidate in rule.outputs.iter().flatten() {
            let Some(output) = candidate.output_id.as_deref().and_then(&resolve) else {
                continue;
            };
            let (weight, chance) = rule.effective(candidate);
            let metadata = self.metadata(candidate, sink);
            mutation.push(
                output,
                OutputAttributes {
                    weight,
                    chance,
                    metadata,
                },
            );
        }
        (!mutation.outputs().is_empty()).then_some(mutation)
    }

    fn metadata(&self, candidate: &OutputCandidate, sink: &mut dyn DiagnosticSink) -> Metadata {
        let raw = candidate.metadata.as_ref();
        self.codec.parse(raw).unwrap_or_else(|err| {
            sink.report(Diagnostic::MalformedMetadata {
                owner: self.owner.clone(),
                raw: raw.map_or_else(|| "null".to_owned(), ToString::to_string),
                reason: err.to_string(),
            });
            Metadata::default()
        })
    }

    /// A concrete block or fluid, never air.
    fn block(&self, raw: &str) -> Option<R::Block> {
        let id = ResourceId::parse(raw).ok()?;
        self.registry
            .resolve_block(&id.to_string())
            .filter(|block| !self.registry.is_air(block))
    }

    fn item(&self, raw: &str) -> Option<R::Item> {
        let id = ResourceId::parse(raw).ok()?;
        self.registry.resolve_item(&id.to_string())
    }

    fn entity(&self, raw: &str) -> Option<R::EntityType> {
        let raw = raw
            .strip_prefix(self.config.entity_prefix.as_str())
            .unwrap_or(raw);
        let id = ResourceId::parse(raw).ok()?;
        self.registry.resolve_entity_type(&id.to_string())
    }

    /// The normalized tag name, if it names a block tag or, failing that, a
    /// fluid tag.
    fn tag_key(&self, raw: &str) -> Option<String> {
        let name = raw.strip_prefix(self.config.tag_prefix.as_str())?;
        let name = ResourceId::parse(name).ok()?.to_string();
        let known = self.registry.resolve_block_tag(&name).is_some()
            || self.registry.resolve_fluid_tag(&name).is_some();
        known.then_some(name)
    }

    fn report_unresolved(&self, rule: &RuleRecord, sink: &mut dyn DiagnosticSink) {
        sink.report(Diagnostic::Unresolved {
            owner: self.owner.clone(),
            kind: rule.kind,
            input: rule.input_id.clone().unwrap_or_else(|| "null".to_owned()),
            outputs: rule.raw_output_ids(),
            chance: rule.default_chance(),
        });
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::types::{CollectingSink, MemoryRegistry};

    fn registry() -> MemoryRegistry {
        MemoryRegistry::new()
            .with_block("minecraft:dirt")
            .with_block("minecraft:stone")
            .with_block("minecraft:gravel")
            .with_block("minecraft:chest")
            .with_item("minecraft:diamond")
            .with_item("minecraft:coal")
            .with_entity("minecraft:pig")
            .with_entity("minecraft:zombified_piglin")
            .with_block_tag("minecraft:logs", &["minecraft:oak_log"])
            .with_fluid_tag("minecraft:lava", &["minecraft:lava"])
    }

    fn rule(kind: MutationKind, input: &str, outputs: &[&str]) -> RuleRecord {
        RuleRecord::new(
            kind,
            input,
            outputs.iter().map(|o| OutputCandidate::new(o)).collect(),
        )
    }

    fn compile(rules: &[RuleRecord]) -> (MutationIndex<MemoryRegistry>, CollectingSink) {
        let reg = registry();
        let mut sink = CollectingSink::new();
        let index = IndexBuilder::new(&reg).owner("test_bee").compile(rules, &mut sink);
        (index, sink)
    }

    fn key(id: &str) -> String {
        id.to_owned()
    }

    // -- classify -----------------------------------------------------------

    #[test]
    fn tagged_block_to_item_is_item_tag() {
        let cfg = EngineConfig::default();
        assert_eq!(
            classify(MutationKind::BlockToItem, "#minecraft:logs", &cfg),
            Target::ItemTag
        );
    }

    #[test]
    fn tagged_block_kinds_are_block_tag() {
        let cfg = EngineConfig::default();
        for kind in [
            MutationKind::BlockToBlock,
            MutationKind::BlockToFluid,
            MutationKind::FluidToBlock,
            MutationKind::FluidToFluid,
            MutationKind::EntityToEntity,
        ] {
            assert_eq!(classify(kind, "#minecraft:logs", &cfg), Target::BlockTag, "{kind}");
        }
    }

    #[test]
    fn entity_needs_prefix_and_kind() {
        let cfg = EngineConfig::default();
        assert_eq!(
            classify(MutationKind::EntityToEntity, "entity:minecraft:pig", &cfg),
            Target::Entity
        );
        assert_eq!(
            classify(MutationKind::EntityToEntity, "minecraft:pig", &cfg),
            Target::Block
        );
        assert_eq!(
            classify(MutationKind::BlockToBlock, "entity:minecraft:pig", &cfg),
            Target::Block
        );
    }

    #[test]
    fn untagged_block_to_item_is_item() {
        let cfg = EngineConfig::default();
        assert_eq!(
            classify(MutationKind::BlockToItem, "minecraft:dirt", &cfg),
            Target::Item
        );
        assert_eq!(
            classify(MutationKind::BlockToItem, "entity:minecraft:pig", &cfg),
            Target::Item
        );
    }

    #[test]
    fn prefix_match_is_case_sensitive() {
        let cfg = EngineConfig::default();
        assert_eq!(
            classify(MutationKind::EntityToEntity, "ENTITY:minecraft:pig", &cfg),
            Target::Block
        );
    }

    #[test]
    fn custom_prefixes_are_used() {
        let cfg = EngineConfig {
            tag_prefix: "tag:".into(),
            ..EngineConfig::default()
        };
        assert_eq!(
            classify(MutationKind::BlockToBlock, "tag:minecraft:logs", &cfg),
            Target::BlockTag
        );
        assert_eq!(
            classify(MutationKind::BlockToBlock, "#minecraft:logs", &cfg),
            Target::Block
        );
    }

    #[test]
    fn legacy_block_to_item_never_reaches_entity() {
        let cfg = EngineConfig::default();
        assert_eq!(
            classify_legacy(
                MutationKind::BlockToItem,
                "entity:minecraft:pig",
                "entity:minecraft:cow",
                &cfg
            ),
            Some(Target::Item)
        );
    }

    #[test]
    fn legacy_tagged_block_to_item_is_item_tag() {
        let cfg = EngineConfig::default();
        assert_eq!(
            classify_legacy(
                MutationKind::BlockToItem,
                "#minecraft:logs",
                "minecraft:coal",
                &cfg
            ),
            Some(Target::ItemTag)
        );
    }

    #[test]
    fn legacy_entity_requires_both_prefixes() {
        let cfg = EngineConfig::default();
        assert_eq!(
            classify_legacy(
                MutationKind::EntityToEntity,
                "entity:minecraft:pig",
                "minecraft:cow",
                &cfg
            ),
            None
        );
        assert_eq!(
            classify_legacy(
                MutationKind::EntityToEntity,
                "entity:minecraft:pig",
                "entity:minecraft:cow",
                &cfg
            ),
            Some(Target::Entity)
        );
    }

    #[test]
    fn legacy_fluid_kinds_follow_tag_prefix() {
        let cfg = EngineConfig::default();
        assert_eq!(
            classify_legacy(MutationKind::FluidToFluid, "#minecraft:lava", "minecraft:water", &cfg),
            Some(Target::BlockTag)
        );
        assert_eq!(
            classify_legacy(MutationKind::FluidToBlock, "minecraft:lava", "minecraft:stone", &cfg),
            Some(Target::Block)
        );
    }

    // -- compile ------------------------------------------------------------

    #[test]
    fn block_rule_compiles_with_both_candidates() {
        let (index, sink) = compile(&[rule(
            MutationKind::BlockToBlock,
            "minecraft:dirt",
            &["minecraft:stone", "minecraft:gravel"],
        )]);
        assert!(sink.is_empty());
        let m = index.block_mutation(&key("minecraft:dirt")).unwrap();
        assert_eq!(m.kind(), MutationKind::BlockToBlock);
        let outs: Vec<&String> = m.candidates().map(|(v, _)| v).collect();
        assert_eq!(outs, vec!["minecraft:stone", "minecraft:gravel"]);
        assert_eq!(m.outputs().total_weight(), 2.0);
    }

    #[test]
    fn identifiers_are_normalized() {
        let (index, sink) = compile(&[rule(
            MutationKind::BlockToBlock,
            "Minecraft:DIRT",
            &["stone"],
        )]);
        assert!(sink.is_empty());
        let m = index.block_mutation(&key("minecraft:dirt")).unwrap();
        assert_eq!(m.candidates().next().unwrap().0, "minecraft:stone");
    }

    #[test]
    fn air_input_is_rejected() {
        let (index, sink) = compile(&[rule(
            MutationKind::BlockToBlock,
            "minecraft:air",
            &["minecraft:stone"],
        )]);
        assert!(index.is_empty());
        assert!(matches!(sink.diagnostics()[0], Diagnostic::Unresolved { .. }));
    }

    #[test]
    fn air_output_is_skipped() {
        let (index, sink) = compile(&[rule(
            MutationKind::BlockToBlock,
            "minecraft:dirt",
            &["minecraft:air", "minecraft:stone"],
        )]);
        assert!(sink.is_empty());
        let m = index.block_mutation(&key("minecraft:dirt")).unwrap();
        assert_eq!(m.outputs().len(), 1);
    }

    #[test]
    fn all_outputs_unresolved_drops_rule() {
        let (index, sink) = compile(&[rule(
            MutationKind::BlockToBlock,
            "minecraft:dirt",
            &["minecraft:nope", "minecraft:air"],
        )]);
        assert!(index.is_empty());
        match &sink.diagnostics()[0] {
            Diagnostic::Unresolved {
                owner,
                kind,
                input,
                outputs,
                ..
            } => {
                assert_eq!(owner, "test_bee");
                assert_eq!(*kind, Some(MutationKind::BlockToBlock));
                assert_eq!(input, "minecraft:dirt");
                assert_eq!(outputs, &vec!["minecraft:nope".to_owned(), "minecraft:air".to_owned()]);
            }
            other => panic!("expected Unresolved, got {other:?}"),
        }
    }

    #[test]
    fn unknown_tag_is_dropped_with_warning() {
        let (index, sink) = compile(&[rule(
            MutationKind::BlockToBlock,
            "#minecraft:not_a_tag",
            &["minecraft:stone"],
        )]);
        assert!(index.is_empty());
        assert_eq!(sink.diagnostics().len(), 1);
    }

    #[test]
    fn block_tag_rule_is_keyed_by_name() {
        let (index, _) = compile(&[rule(
            MutationKind::BlockToBlock,
            "#minecraft:logs",
            &["minecraft:stone"],
        )]);
        assert!(index.block_tag_mutation("minecraft:logs").is_some());
        assert_eq!(index.count(Target::BlockTag), 1);
    }

    #[test]
    fn fluid_tag_fallback() {
        let (index, sink) = compile(&[rule(
            MutationKind::FluidToBlock,
            "#minecraft:lava",
            &["minecraft:stone"],
        )]);
        assert!(sink.is_empty());
        assert!(index.block_tag_mutation("minecraft:lava").is_some());
    }

    #[test]
    fn tagged_item_rule_goes_to_item_tag_index() {
        let (index, _) = compile(&[rule(
            MutationKind::BlockToItem,
            "#minecraft:logs",
            &["minecraft:coal"],
        )]);
        assert!(index.item_tag_mutation("minecraft:logs").is_some());
        assert!(index.block_tag_mutation("minecraft:logs").is_none());
    }

    #[test]
    fn item_rule_resolves_item_outputs() {
        let (index, sink) = compile(&[rule(
            MutationKind::BlockToItem,
            "minecraft:stone",
            &["minecraft:diamond", "minecraft:stone"],
        )]);
        assert!(sink.is_empty());
        let m = index.item_mutation(&key("minecraft:stone")).unwrap();
        // minecraft:stone is a block, not an item
        assert_eq!(m.outputs().len(), 1);
    }

    #[test]
    fn entity_rule_strips_prefixes() {
        let (index, sink) = compile(&[rule(
            MutationKind::EntityToEntity,
            "entity:minecraft:pig",
            &["entity:minecraft:zombified_piglin"],
        )]);
        assert!(sink.is_empty());
        let m = index.entity_mutation(&key("minecraft:pig")).unwrap();
        assert_eq!(m.candidates().next().unwrap().0, "minecraft:zombified_piglin");
    }

    #[test]
    fn entity_outputs_may_omit_prefix() {
        let (index, _) = compile(&[rule(
            MutationKind::EntityToEntity,
            "entity:minecraft:pig",
            &["minecraft:zombified_piglin"],
        )]);
        assert_eq!(index.count(Target::Entity), 1);
    }

    #[test]
    fn weights_and_chances_are_coerced() {
        let r = RuleRecord::new(
            MutationKind::BlockToBlock,
            "minecraft:dirt",
            vec![
                OutputCandidate::new("minecraft:stone").weight(0.0).chance(-1.0),
                OutputCandidate::new("minecraft:gravel").weight(5.0).chance(0.1),
            ],
        )
        .with_defaults(3.0, 0.5);
        let (index, _) = compile(&[r]);
        let m = index.block_mutation(&key("minecraft:dirt")).unwrap();
        let attrs: Vec<(f64, f64)> = m.candidates().map(|(_, a)| (a.weight, a.chance)).collect();
        assert_eq!(attrs, vec![(3.0, 0.5), (5.0, 0.1)]);
    }

    #[test]
    fn metadata_is_parsed_once() {
        let r = RuleRecord::new(
            MutationKind::BlockToBlock,
            "minecraft:dirt",
            vec![OutputCandidate::new("minecraft:chest").metadata(json!({"Lock": "key"}))],
        );
        let (index, sink) = compile(&[r]);
        assert!(sink.is_empty());
        let m = index.block_mutation(&key("minecraft:dirt")).unwrap();
        let (_, attrs) = m.candidates().next().unwrap();
        assert_eq!(attrs.metadata.get("Lock"), Some(&json!("key")));
    }

    #[test]
    fn malformed_metadata_becomes_empty() {
        let r = RuleRecord::new(
            MutationKind::BlockToBlock,
            "minecraft:dirt",
            vec![OutputCandidate::new("minecraft:chest").metadata(json!("not a compound"))],
        );
        let (index, sink) = compile(&[r]);
        let m = index.block_mutation(&key("minecraft:dirt")).unwrap();
        assert!(m.candidates().next().unwrap().1.metadata.is_empty());
        assert!(matches!(
            &sink.diagnostics()[0],
            Diagnostic::MalformedMetadata { raw, .. } if raw == "\"not a compound\""
        ));
    }

    #[test]
    fn unvalidated_rule_is_reported() {
        let mut r = rule(MutationKind::BlockToBlock, "minecraft:dirt", &["minecraft:stone"]);
        r.kind = None;
        let (index, sink) = compile(&[r]);
        assert!(index.is_empty());
        assert!(matches!(
            sink.diagnostics()[0],
            Diagnostic::Unresolved { kind: None, .. }
        ));
    }

    #[test]
    fn later_rule_replaces_earlier_for_same_key() {
        let (index, _) = compile(&[
            rule(MutationKind::BlockToBlock, "minecraft:dirt", &["minecraft:stone"]),
            rule(MutationKind::BlockToBlock, "minecraft:dirt", &["minecraft:gravel"]),
        ]);
        let m = index.block_mutation(&key("minecraft:dirt")).unwrap();
        assert_eq!(m.candidates().next().unwrap().0, "minecraft:gravel");
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn compiled_mutation_keeps_source_rule() {
        let r = rule(
            MutationKind::BlockToBlock,
            "minecraft:dirt",
            &["minecraft:stone", "minecraft:nope"],
        );
        let (index, _) = compile(&[r.clone()]);
        let m = index.block_mutation(&key("minecraft:dirt")).unwrap();
        assert_eq!(m.source(), &r);
    }

    // -- build --------------------------------------------------------------

    #[test]
    fn build_validates_then_compiles() {
        let reg = registry();
        let mut missing = OutputCandidate::new("x");
        missing.output_id = None;
        let mut data = MutationData::default().with_rules(vec![
            RuleRecord::new(
                MutationKind::BlockToBlock,
                "minecraft:dirt",
                vec![missing, OutputCandidate::new("minecraft:stone")],
            ),
            RuleRecord {
                kind: None,
                ..rule(MutationKind::BlockToBlock, "minecraft:stone", &["minecraft:dirt"])
            },
        ]);
        let mut sink = CollectingSink::new();
        let index = IndexBuilder::new(&reg).owner("b").build(&mut data, &mut sink);
        assert_eq!(data.mutations.len(), 1);
        assert_eq!(data.mutations[0].outputs.as_ref().unwrap().len(), 1);
        assert_eq!(index.len(), 1);
        assert_eq!(sink.diagnostics().len(), 2);
        assert_eq!(index.mutation_count(), 10);
    }

    #[test]
    fn build_adds_legacy_rule() {
        let reg = registry();
        let mut data =
            MutationData::legacy(MutationKind::BlockToItem, "minecraft:dirt", "minecraft:diamond");
        data.mutation_count = 3;
        let mut sink = CollectingSink::new();
        let index = IndexBuilder::new(&reg).build(&mut data, &mut sink);
        assert!(sink.is_empty());
        assert_eq!(index.mutation_count(), 3);
        let m = index.item_mutation(&key("minecraft:dirt")).unwrap();
        let (_, attrs) = m.candidates().next().unwrap();
        assert_eq!((attrs.weight, attrs.chance), (1.0, 1.0));
        assert_eq!(index.count(Target::Entity), 0);
    }

    #[test]
    fn legacy_rule_replaces_list_rule() {
        let reg = registry();
        let mut data =
            MutationData::legacy(MutationKind::BlockToBlock, "minecraft:dirt", "minecraft:gravel")
                .with_rules(vec![rule(
                    MutationKind::BlockToBlock,
                    "minecraft:dirt",
                    &["minecraft:stone"],
                )]);
        let mut sink = CollectingSink::new();
        let index = IndexBuilder::new(&reg).build(&mut data, &mut sink);
        let m = index.block_mutation(&key("minecraft:dirt")).unwrap();
        assert_eq!(m.candidates().next().unwrap().0, "minecraft:gravel");
    }

    #[test]
    fn legacy_rule_ignored_without_flag() {
        let reg = registry();
        let mut data =
            MutationData::legacy(MutationKind::BlockToBlock, "minecraft:dirt", "minecraft:stone");
        data.has_mutation = false;
        let mut sink = CollectingSink::new();
        let index = IndexBuilder::new(&reg).build(&mut data, &mut sink);
        assert!(index.is_empty());
        assert!(sink.is_empty());
    }

    #[test]
    fn legacy_entity_without_prefix_is_silently_ignored() {
        let reg = registry();
        let mut data = MutationData::legacy(
            MutationKind::EntityToEntity,
            "entity:minecraft:pig",
            "minecraft:zombified_piglin",
        );
        let mut sink = CollectingSink::new();
        let index = IndexBuilder::new(&reg).build(&mut data, &mut sink);
        assert!(index.is_empty());
        assert!(sink.is_empty());
    }

    #[test]
    fn configured_default_mutation_count() {
        let reg = registry();
        let cfg = EngineConfig {
            default_mutation_count: 25,
            ..EngineConfig::default()
        };
        let mut data = MutationData::default();
        let mut sink = CollectingSink::new();
        let index = IndexBuilder::new(&reg)
            .config(cfg)
            .unwrap()
            .build(&mut data, &mut sink);
        assert_eq!(index.mutation_count(), 25);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let reg = registry();
        let cfg = EngineConfig {
            tag_prefix: String::new(),
            ..EngineConfig::default()
        };
        assert!(matches!(
            IndexBuilder::new(&reg).config(cfg),
            Err(ConfigError::EmptyPrefix { field: "tag_prefix" })
        ));
        let cfg = EngineConfig {
            entity_prefix: "#".into(),
            ..EngineConfig::default()
        };
        assert!(matches!(
            IndexBuilder::new(&reg).config(cfg),
            Err(ConfigError::SamePrefix { .. })
        ));
    }
}
