//! Cumulative-chance tables for designer-weighted random picks

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from building a [`WeightedTable`] out of raw cumulative chances
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeightedTableError {
    #[error("negative cumulative chance {chance} at entry {index}")]
    NegativeChance { index: usize, chance: i32 },
    #[error("cumulative chance {chance} at entry {index} does not exceed the previous {previous}")]
    NotIncreasing {
        index: usize,
        chance: i32,
        previous: i32,
    },
}

/// An ordered list of `(value, cumulative_chance)` entries.
///
/// Cumulative chances are strictly increasing, and the last one is the total.
/// A table whose total is 0 is degenerate: every entry carries chance 0 and
/// [`WeightedTable::select`] always returns the first one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedTable<T> {
    entries: Vec<(T, i32)>,
    total_chance: i32,
}

impl<T> Default for WeightedTable<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            total_chance: 0,
        }
    }
}

impl<T> WeightedTable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw cumulative chances as authored in material files.
    ///
    /// Rejects negative or non-increasing sequences. An all-zero sequence is
    /// accepted as a degenerate table.
    pub fn from_cumulative(entries: Vec<(T, i32)>) -> Result<Self, WeightedTableError> {
        let degenerate = entries.iter().all(|(_, chance)| *chance == 0);
        if !degenerate {
            let mut previous = 0;
            for (index, (_, chance)) in entries.iter().enumerate() {
                if *chance < 0 {
                    return Err(WeightedTableError::NegativeChance {
                        index,
                        chance: *chance,
                    });
                }
                if *chance <= previous {
                    return Err(WeightedTableError::NotIncreasing {
                        index,
                        chance: *chance,
                        previous,
                    });
                }
                previous = *chance;
            }
        }

        let total_chance = entries.last().map_or(0, |(_, chance)| *chance);
        Ok(Self {
            entries,
            total_chance,
        })
    }

    /// Build from per-entry weights.
    ///
    /// Zero-weight entries can never be drawn and are dropped, unless every
    /// weight is zero, in which case the table keeps them all and degenerates
    /// to "first entry".
    pub fn from_weights(weights: impl IntoIterator<Item = (T, u32)>) -> Self {
        let mut table = Self::new();
        for (value, weight) in weights {
            table.push(value, weight);
        }
        table
    }

    /// Append an entry with the given weight
    pub fn push(&mut self, value: T, weight: u32) {
        let weight = i32::try_from(weight).unwrap_or(i32::MAX);
        if weight == 0 {
            // only keep zero-weight entries while the table is still degenerate
            if self.total_chance == 0 {
                self.entries.push((value, 0));
            }
            return;
        }

        if self.total_chance == 0 {
            self.entries.clear();
        }
        self.total_chance = self.total_chance.saturating_add(weight);
        self.entries.push((value, self.total_chance));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn total_chance(&self) -> i32 {
        self.total_chance
    }

    pub fn first(&self) -> Option<&T> {
        self.entries.first().map(|(value, _)| value)
    }

    /// Values in table order
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(value, _)| value)
    }

    /// `(value, cumulative_chance)` pairs in table order
    pub fn entries(&self) -> &[(T, i32)] {
        &self.entries
    }

    /// Pick an entry.
    ///
    /// Draws a uniform integer in `[1, total_chance]` and returns the first
    /// entry whose cumulative chance reaches it. A degenerate table returns its
    /// first entry without consuming randomness. `None` only for an empty table.
    pub fn select(&self, rng: &mut impl Rng) -> Option<&T> {
        if self.total_chance <= 0 {
            return self.first();
        }

        let draw = rng.gen_range(1..=self.total_chance);
        self.entries
            .iter()
            .find(|(_, chance)| *chance >= draw)
            .map(|(value, _)| value)
            .or_else(|| self.first())
    }
}

impl<T: PartialEq> WeightedTable<T> {
    pub fn contains(&self, value: &T) -> bool {
        self.entries.iter().any(|(v, _)| v == value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn seeded_rng() -> SmallRng {
        SmallRng::seed_from_u64(0)
    }

    #[test]
    fn empty_table_selects_nothing() {
        let table: WeightedTable<u16> = WeightedTable::new();
        assert!(table.select(&mut seeded_rng()).is_none());
    }

    #[test]
    fn degenerate_table_returns_first_entry() {
        let table = WeightedTable::from_weights([(10u16, 0), (11, 0), (12, 0)]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.total_chance(), 0);
        let mut rng = seeded_rng();
        for _ in 0..20 {
            assert_eq!(table.select(&mut rng), Some(&10));
        }
    }

    #[test]
    fn zero_weights_dropped_once_table_has_weight() {
        let table = WeightedTable::from_weights([(1u16, 0), (2, 5), (3, 0), (4, 5)]);
        assert_eq!(table.values().copied().collect::<Vec<_>>(), vec![2, 4]);
        assert_eq!(table.entries(), &[(2, 5), (4, 10)]);
    }

    #[test]
    fn from_cumulative_rejects_non_increasing() {
        let err = WeightedTable::from_cumulative(vec![(1u16, 30), (2, 30)]).unwrap_err();
        assert_eq!(
            err,
            WeightedTableError::NotIncreasing {
                index: 1,
                chance: 30,
                previous: 30
            }
        );
        assert!(matches!(
            WeightedTable::from_cumulative(vec![(1u16, -4)]),
            Err(WeightedTableError::NegativeChance { index: 0, .. })
        ));
        assert!(WeightedTable::from_cumulative(vec![(1u16, 0), (2, 0)]).is_ok());
    }

    #[test]
    fn selection_frequencies_follow_weights() {
        let table = WeightedTable::from_cumulative(vec![(0usize, 30), (1, 70), (2, 100)]).unwrap();
        assert_eq!(table.total_chance(), 100);

        let mut rng = seeded_rng();
        let mut counts = [0u32; 3];
        for _ in 0..10_000 {
            let picked = *table.select(&mut rng).unwrap();
            counts[picked] += 1;
        }

        // 3 percentage points of tolerance, well over 6 standard deviations
        let expected = [3_000i64, 4_000, 3_000];
        for (count, expected) in counts.iter().zip(expected) {
            assert!(
                (*count as i64 - expected).abs() < 300,
                "counts {counts:?} too far from {expected}"
            );
        }
    }

    #[test]
    fn selection_is_reproducible_with_same_seed() {
        let table = WeightedTable::from_weights([(1u16, 1), (2, 1), (3, 1), (4, 1)]);
        let mut a = SmallRng::seed_from_u64(42);
        let mut b = SmallRng::seed_from_u64(42);
        for _ in 0..50 {
            assert_eq!(table.select(&mut a), table.select(&mut b));
        }
    }
}
