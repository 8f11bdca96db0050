//! Ordered key/value sample tables.

/// Outcome of an insert-or-replace operation on a keyed collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Insertion {
    /// A new entry was inserted; the collection grew by one.
    Inserted,
    /// An existing entry with the same key was replaced in place.
    Replaced,
}

/// A sequence of `(key, value)` samples, strictly ascending by key.
///
/// The key is the independent variable (usually temperature) and the value
/// the dependent one. The only way to add a sample is [`add`](Self::add),
/// which keeps keys sorted and unique: adding an existing key replaces its
/// value.
///
/// # Examples
///
/// ```
/// use rhea_core::{Insertion, ValueTable};
///
/// let mut table = ValueTable::new();
/// assert_eq!(table.add(300.0, 1.5), Insertion::Inserted);
/// assert_eq!(table.add(200.0, 1.0), Insertion::Inserted);
/// assert_eq!(table.add(300.0, 2.0), Insertion::Replaced);
///
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.get(0), (200.0, 1.0));
/// assert_eq!(table.get(1), (300.0, 2.0));
/// assert_eq!(table.interpolate(250.0), Some(1.5));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValueTable {
    entries: Vec<(f64, f64)>,
}

impl ValueTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Create a table holding a single sample.
    pub fn with_sample(key: f64, value: f64) -> Self {
        let mut table = Self::new();
        table.add(key, value);
        table
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table holds no samples.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert a sample, or replace the value if `key` is already present.
    ///
    /// # Panics
    ///
    /// Panics if `key` is NaN; a NaN key has no position in the ordering.
    pub fn add(&mut self, key: f64, value: f64) -> Insertion {
        assert!(!key.is_nan(), "value table key must not be NaN");
        let key = normalize(key);
        match self.entries.binary_search_by(|(k, _)| k.total_cmp(&key)) {
            Ok(pos) => {
                self.entries[pos].1 = value;
                Insertion::Replaced
            }
            Err(pos) => {
                self.entries.insert(pos, (key, value));
                Insertion::Inserted
            }
        }
    }

    /// Sample at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position >= len()`.
    pub fn get(&self, position: usize) -> (f64, f64) {
        assert!(
            position < self.entries.len(),
            "value table position {position} out of range (len {})",
            self.entries.len()
        );
        self.entries[position]
    }

    /// Key at `position`. Panics if out of range.
    pub fn key(&self, position: usize) -> f64 {
        self.get(position).0
    }

    /// Value at `position`. Panics if out of range.
    pub fn value(&self, position: usize) -> f64 {
        self.get(position).1
    }

    /// Position of the sample with exactly this key, if any.
    pub fn position_of(&self, key: f64) -> Option<usize> {
        let key = normalize(key);
        self.entries
            .binary_search_by(|(k, _)| k.total_cmp(&key))
            .ok()
    }

    /// Remove and return the sample at `position`. Panics if out of range.
    pub fn remove(&mut self, position: usize) -> (f64, f64) {
        assert!(
            position < self.entries.len(),
            "value table position {position} out of range (len {})",
            self.entries.len()
        );
        self.entries.remove(position)
    }

    /// Remove every sample.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterate over samples in ascending key order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (f64, f64)> + '_ {
        self.entries.iter().copied()
    }

    /// Linearly interpolated value at `key`.
    ///
    /// Keys outside the sampled range clamp to the nearest end sample.
    /// Returns `None` for an empty table.
    pub fn interpolate(&self, key: f64) -> Option<f64> {
        let first = *self.entries.first()?;
        let last = *self.entries.last()?;
        if key <= first.0 {
            return Some(first.1);
        }
        if key >= last.0 {
            return Some(last.1);
        }
        let upper = self.entries.partition_point(|&(k, _)| k <= key);
        let (k0, v0) = self.entries[upper - 1];
        let (k1, v1) = self.entries[upper];
        Some(v0 + (v1 - v0) * (key - k0) / (k1 - k0))
    }
}

/// Fold `-0.0` onto `0.0` so both name the same key.
fn normalize(key: f64) -> f64 {
    key + 0.0
}

impl FromIterator<(f64, f64)> for ValueTable {
    fn from_iter<I: IntoIterator<Item = (f64, f64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (key, value) in iter {
            table.add(key, value);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn replace_keeps_size() {
        let mut table = ValueTable::with_sample(1.0, 10.0);
        assert_eq!(table.add(1.0, 20.0), Insertion::Replaced);
        assert_eq!(table.len(), 1);
        assert_eq!(table.value(0), 20.0);
    }

    #[test]
    fn position_of_finds_exact_keys_only() {
        let table: ValueTable = [(1.0, 0.0), (2.0, 0.0), (3.0, 0.0)].into_iter().collect();
        assert_eq!(table.position_of(2.0), Some(1));
        assert_eq!(table.position_of(2.5), None);
    }

    #[test]
    fn signed_zeros_are_one_key() {
        let mut table = ValueTable::new();
        assert_eq!(table.add(0.0, 1.0), Insertion::Inserted);
        assert_eq!(table.add(-0.0, 2.0), Insertion::Replaced);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(0), (0.0, 2.0));
        assert!(table.key(0).is_sign_positive());
        assert_eq!(table.position_of(-0.0), Some(0));

        let table: ValueTable = [(-0.0, 3.0)].into_iter().collect();
        assert_eq!(table.position_of(0.0), Some(0));
    }

    #[test]
    fn interpolate_clamps_outside_range() {
        let table: ValueTable = [(0.0, 0.0), (10.0, 100.0)].into_iter().collect();
        assert_eq!(table.interpolate(-5.0), Some(0.0));
        assert_eq!(table.interpolate(15.0), Some(100.0));
        assert_eq!(table.interpolate(2.5), Some(25.0));
        assert_eq!(ValueTable::new().interpolate(1.0), None);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn get_out_of_range_panics() {
        ValueTable::new().get(0);
    }

    #[test]
    #[should_panic(expected = "NaN")]
    fn nan_key_panics() {
        ValueTable::new().add(f64::NAN, 1.0);
    }

    proptest! {
        #[test]
        fn keys_strictly_ascending(
            samples in prop::collection::vec((-1e6f64..1e6, -1e6f64..1e6), 0..64)
        ) {
            let table: ValueTable = samples.iter().copied().collect();
            let keys: Vec<f64> = table.iter().map(|(k, _)| k).collect();
            for pair in keys.windows(2) {
                prop_assert!(pair[0] < pair[1]);
            }
        }

        #[test]
        fn last_write_wins(keys in prop::collection::vec(0u8..16, 1..64)) {
            let mut table = ValueTable::new();
            for (i, k) in keys.iter().enumerate() {
                table.add(f64::from(*k), i as f64);
            }
            for k in keys.iter().copied() {
                let last = keys.iter().rposition(|&x| x == k).unwrap();
                let pos = table.position_of(f64::from(k)).unwrap();
                prop_assert_eq!(table.value(pos), last as f64);
            }
        }
    }
}
