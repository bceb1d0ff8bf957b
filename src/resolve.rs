use std::collections::HashMap;
use std::hash::Hash;

use rand::Rng;

use crate::types::{CompiledMutation, Resolution};

/// Find the mutation for `key`: the object's own entry first, then the first
/// tag in `tags` that has one.
pub(crate) fn lookup<'a, K, V, T>(
    objects: &'a HashMap<K, CompiledMutation<V>>,
    tagged: &'a HashMap<String, CompiledMutation<V>>,
    key: &K,
    tags: impl IntoIterator<Item = T>,
) -> Option<&'a CompiledMutation<V>>
where
    K: Eq + Hash,
    T: AsRef<str>,
{
    objects.get(key).or_else(|| {
        if tagged.is_empty() {
            return None;
        }
        tags.into_iter().find_map(|tag| tagged.get(tag.as_ref()))
    })
}

pub(crate) fn resolve<'a, K, V, T, G>(
    objects: &'a HashMap<K, CompiledMutation<V>>,
    tagged: &'a HashMap<String, CompiledMutation<V>>,
    key: &K,
    tags: impl IntoIterator<Item = T>,
    rng: &mut G,
) -> Option<Resolution<'a, V>>
where
    K: Eq + Hash,
    T: AsRef<str>,
    G: Rng + ?Sized,
{
    lookup(objects, tagged, key, tags)?.sample(rng)
}

/// Keep `resolution` only if its chance roll succeeds.
pub(crate) fn gate<'a, V, G>(
    resolution: Option<Resolution<'a, V>>,
    rng: &mut G,
) -> Option<Resolution<'a, V>>
where
    G: Rng + ?Sized,
{
    resolution.filter(|r| r.roll(rng))
}
