use rand::Rng;

/// An insertion-ordered collection that picks one value with probability
/// proportional to its weight.
///
/// Each entry stores the running total of all weights up to and including
/// itself. Sampling draws `x` uniformly from `[0, total_weight)` and returns
/// the first entry whose cumulative weight exceeds `x`, so insertion order
/// decides which of two equal-weight candidates a given draw lands on.
///
/// Weights must be positive and finite. Normalizing them is the caller's job;
/// the sampler never rewrites what it is given.
#[derive(Debug, Clone)]
pub struct WeightedSampler<T> {
    entries: Vec<Entry<T>>,
    total: f64,
}

#[derive(Debug, Clone)]
struct Entry<T> {
    cumulative: f64,
    weight: f64,
    value: T,
}

impl<T> Default for WeightedSampler<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            total: 0.0,
        }
    }
}

impl<T> WeightedSampler<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a candidate.
    pub fn insert(&mut self, weight: f64, value: T) {
        debug_assert!(
            weight > 0.0 && weight.is_finite(),
            "sampler weights must be positive and finite, got {weight}"
        );
        self.total += weight;
        self.entries.push(Entry {
            cumulative: self.total,
            weight,
            value,
        });
    }

    /// Draw one value. Returns `None` only when the sampler is empty.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&T> {
        if self.entries.is_empty() {
            return None;
        }
        let draw = rng.gen::<f64>() * self.total;
        let idx = self
            .entries
            .partition_point(|e| e.cumulative <= draw)
            .min(self.entries.len() - 1);
        Some(&self.entries[idx].value)
    }

    /// Sum of all inserted weights.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.total
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(weight, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, &T)> {
        self.entries.iter().map(|e| (e.weight, &e.value))
    }
}
