use std::collections::HashMap;
use std::fmt;

use rand::Rng;

use super::mutation::{CompiledMutation, Resolution, Target};
use super::registry::Registry;

/// Pass as the tag list when the queried object has no tag memberships.
pub const NO_TAGS: [&str; 0] = [];

/// The compiled mutations of one owner, keyed for lookup.
///
/// Built in one pass by [`IndexBuilder`](crate::IndexBuilder) and read-only
/// afterwards, so it can be shared across threads behind an `Arc`. Reloading
/// data means building a new index, never patching an old one.
///
/// Tag keys are normalized `namespace:path` names without the tag prefix.
pub struct MutationIndex<R: Registry> {
    pub(crate) blocks: HashMap<R::Block, CompiledMutation<R::Block>>,
    pub(crate) block_tags: HashMap<String, CompiledMutation<R::Block>>,
    pub(crate) items: HashMap<R::Block, CompiledMutation<R::Item>>,
    pub(crate) item_tags: HashMap<String, CompiledMutation<R::Item>>,
    pub(crate) entities: HashMap<R::EntityType, CompiledMutation<R::EntityType>>,
    pub(crate) mutation_count: u32,
}

impl<R: Registry> MutationIndex<R> {
    pub(crate) fn new(mutation_count: u32) -> Self {
        Self {
            blocks: HashMap::new(),
            block_tags: HashMap::new(),
            items: HashMap::new(),
            item_tags: HashMap::new(),
            entities: HashMap::new(),
            mutation_count,
        }
    }

    /// Pick a block or fluid output for `block`.
    ///
    /// The block's own entry wins; otherwise `tags` are tried in order and the
    /// first tag with an entry is used. The chance gate is left to the caller.
    pub fn resolve_block<T, G>(
        &self,
        block: &R::Block,
        tags: impl IntoIterator<Item = T>,
        rng: &mut G,
    ) -> Option<Resolution<'_, R::Block>>
    where
        T: AsRef<str>,
        G: Rng + ?Sized,
    {
        crate::resolve::resolve(&self.blocks, &self.block_tags, block, tags, rng)
    }

    /// Pick an item output for `block`, looked up like
    /// [`resolve_block`](Self::resolve_block).
    pub fn resolve_item<T, G>(
        &self,
        block: &R::Block,
        tags: impl IntoIterator<Item = T>,
        rng: &mut G,
    ) -> Option<Resolution<'_, R::Item>>
    where
        T: AsRef<str>,
        G: Rng + ?Sized,
    {
        crate::resolve::resolve(&self.items, &self.item_tags, block, tags, rng)
    }

    /// Pick an entity output for `entity`. Entities have no tag index.
    pub fn resolve_entity<G>(
        &self,
        entity: &R::EntityType,
        rng: &mut G,
    ) -> Option<Resolution<'_, R::EntityType>>
    where
        G: Rng + ?Sized,
    {
        self.entities.get(entity)?.sample(rng)
    }

    /// [`resolve_block`](Self::resolve_block) followed by the chance roll.
    pub fn mutate_block<T, G>(
        &self,
        block: &R::Block,
        tags: impl IntoIterator<Item = T>,
        rng: &mut G,
    ) -> Option<Resolution<'_, R::Block>>
    where
        T: AsRef<str>,
        G: Rng + ?Sized,
    {
        crate::resolve::gate(self.resolve_block(block, tags, rng), rng)
    }

    /// [`resolve_item`](Self::resolve_item) followed by the chance roll.
    pub fn mutate_item<T, G>(
        &self,
        block: &R::Block,
        tags: impl IntoIterator<Item = T>,
        rng: &mut G,
    ) -> Option<Resolution<'_, R::Item>>
    where
        T: AsRef<str>,
        G: Rng + ?Sized,
    {
        crate::resolve::gate(self.resolve_item(block, tags, rng), rng)
    }

    /// [`resolve_entity`](Self::resolve_entity) followed by the chance roll.
    pub fn mutate_entity<G>(
        &self,
        entity: &R::EntityType,
        rng: &mut G,
    ) -> Option<Resolution<'_, R::EntityType>>
    where
        G: Rng + ?Sized,
    {
        crate::resolve::gate(self.resolve_entity(entity, rng), rng)
    }

    /// How many mutation attempts the owner makes per evaluation cycle.
    #[must_use]
    pub fn mutation_count(&self) -> u32 {
        self.mutation_count
    }

    #[must_use]
    pub fn block_mutation(&self, block: &R::Block) -> Option<&CompiledMutation<R::Block>> {
        self.blocks.get(block)
    }

    #[must_use]
    pub fn block_tag_mutation(&self, tag: &str) -> Option<&CompiledMutation<R::Block>> {
        self.block_tags.get(tag)
    }

    #[must_use]
    pub fn item_mutation(&self, block: &R::Block) -> Option<&CompiledMutation<R::Item>> {
        self.items.get(block)
    }

    #[must_use]
    pub fn item_tag_mutation(&self, tag: &str) -> Option<&CompiledMutation<R::Item>> {
        self.item_tags.get(tag)
    }

    #[must_use]
    pub fn entity_mutation(
        &self,
        entity: &R::EntityType,
    ) -> Option<&CompiledMutation<R::EntityType>> {
        self.entities.get(entity)
    }

    pub fn blocks(&self) -> impl Iterator<Item = &R::Block> {
        self.blocks.keys()
    }

    pub fn block_tags(&self) -> impl Iterator<Item = &str> {
        self.block_tags.keys().map(String::as_str)
    }

    pub fn items(&self) -> impl Iterator<Item = &R::Block> {
        self.items.keys()
    }

    pub fn item_tags(&self) -> impl Iterator<Item = &str> {
        self.item_tags.keys().map(String::as_str)
    }

    pub fn entities(&self) -> impl Iterator<Item = &R::EntityType> {
        self.entities.keys()
    }

    /// Number of compiled mutations filed under `target`.
    #[must_use]
    pub fn count(&self, target: Target) -> usize {
        match target {
            Target::BlockTag => self.block_tags.len(),
            Target::Block => self.blocks.len(),
            Target::ItemTag => self.item_tags.len(),
            Target::Item => self.items.len(),
            Target::Entity => self.entities.len(),
        }
    }

    /// Total number of compiled mutations across all five indexes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
            + self.block_tags.len()
            + self.items.len()
            + self.item_tags.len()
            + self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<R: Registry> fmt::Debug for MutationIndex<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutationIndex")
            .field("blocks", &self.blocks.keys().collect::<Vec<_>>())
            .field("block_tags", &self.block_tags.keys().collect::<Vec<_>>())
            .field("items", &self.items.keys().collect::<Vec<_>>())
            .field("item_tags", &self.item_tags.keys().collect::<Vec<_>>())
            .field("entities", &self.entities.keys().collect::<Vec<_>>())
            .field("mutation_count", &self.mutation_count)
            .finish()
    }
}

impl<R: Registry> fmt::Display for MutationIndex<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MutationIndex({} block, {} block tag, {} item, {} item tag, {} entity)",
            self.blocks.len(),
            self.block_tags.len(),
            self.items.len(),
            self.item_tags.len(),
            self.entities.len(),
        )
    }
}
