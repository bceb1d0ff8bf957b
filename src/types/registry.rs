use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

/// The game registry, seen from the mutation engine.
///
/// Identifiers handed to these methods are already normalized to lowercase
/// `namespace:path`. Unknown identifiers must yield `None`; the engine treats
/// that as a skippable data problem.
pub trait Registry {
    type Block: Clone + Eq + Hash + Debug;
    type Item: Clone + Debug;
    type EntityType: Clone + Eq + Hash + Debug;
    type Tag;

    fn resolve_block(&self, id: &str) -> Option<Self::Block>;
    fn resolve_item(&self, id: &str) -> Option<Self::Item>;
    fn resolve_entity_type(&self, id: &str) -> Option<Self::EntityType>;
    fn resolve_block_tag(&self, name: &str) -> Option<Self::Tag>;
    fn resolve_fluid_tag(&self, name: &str) -> Option<Self::Tag>;

    /// Whether `block` is the empty placeholder that can never be a mutation
    /// input or output.
    fn is_air(&self, block: &Self::Block) -> bool;
}

/// Identifier of the empty block in [`MemoryRegistry`].
pub const AIR: &str = "minecraft:air";

/// A string-keyed registry held entirely in memory.
///
/// Objects are represented by their identifiers. Useful for tools that work
/// on data files without a running game, and for tests.
#[derive(Debug, Clone)]
pub struct MemoryRegistry {
    blocks: HashSet<String>,
    items: HashSet<String>,
    entities: HashSet<String>,
    block_tags: HashMap<String, HashSet<String>>,
    fluid_tags: HashMap<String, HashSet<String>>,
}

impl Default for MemoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryRegistry {
    /// An empty registry containing only [`AIR`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            blocks: HashSet::from([AIR.to_owned()]),
            items: HashSet::new(),
            entities: HashSet::new(),
            block_tags: HashMap::new(),
            fluid_tags: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_block(mut self, id: &str) -> Self {
        self.blocks.insert(id.to_owned());
        self
    }

    #[must_use]
    pub fn with_item(mut self, id: &str) -> Self {
        self.items.insert(id.to_owned());
        self
    }

    #[must_use]
    pub fn with_entity(mut self, id: &str) -> Self {
        self.entities.insert(id.to_owned());
        self
    }

    /// Register a block tag and its members. Members are registered as blocks.
    #[must_use]
    pub fn with_block_tag(mut self, name: &str, members: &[&str]) -> Self {
        let set = self.block_tags.entry(name.to_owned()).or_default();
        for &m in members {
            set.insert(m.to_owned());
            self.blocks.insert(m.to_owned());
        }
        self
    }

    /// Register a fluid tag and its members. Fluid blocks share the block
    /// namespace, so members are registered as blocks too.
    #[must_use]
    pub fn with_fluid_tag(mut self, name: &str, members: &[&str]) -> Self {
        let set = self.fluid_tags.entry(name.to_owned()).or_default();
        for &m in members {
            set.insert(m.to_owned());
            self.blocks.insert(m.to_owned());
        }
        self
    }

    /// Names of every block and fluid tag containing `block`, sorted.
    #[must_use]
    pub fn tags_of(&self, block: &str) -> Vec<String> {
        let mut tags: Vec<String> = self
            .block_tags
            .iter()
            .chain(self.fluid_tags.iter())
            .filter(|(_, members)| members.contains(block))
            .map(|(name, _)| name.clone())
            .collect();
        tags.sort();
        tags.dedup();
        tags
    }
}

impl Registry for MemoryRegistry {
    type Block = String;
    type Item = String;
    type EntityType = String;
    type Tag = String;

    fn resolve_block(&self, id: &str) -> Option<String> {
        self.blocks.get(id).cloned()
    }

    fn resolve_item(&self, id: &str) -> Option<String> {
        self.items.get(id).cloned()
    }

    fn resolve_entity_type(&self, id: &str) -> Option<String> {
        self.entities.get(id).cloned()
    }

    fn resolve_block_tag(&self, name: &str) -> Option<String> {
        self.block_tags.get_key_value(name).map(|(k, _)| k.clone())
    }

    fn resolve_fluid_tag(&self, name: &str) -> Option<String> {
        self.fluid_tags.get_key_value(name).map(|(k, _)| k.clone())
    }

    fn is_air(&self, block: &String) -> bool {
        block == AIR
    }
}
