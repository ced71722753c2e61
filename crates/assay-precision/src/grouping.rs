//! Ordered factor grouping
//!
//! Groups are stored in first-seen order in an arena with a hash index from
//! level to slot, so iteration order is the order of the input data and
//! numeric and text levels never collide.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// A factor level read from a spreadsheet-like column
///
/// `Number(1.0)` and `Label("1")` are different levels.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FactorLevel {
    Number(OrderedFloat<f64>),
    Label(String),
}

impl From<f64> for FactorLevel {
    fn from(value: f64) -> Self {
        Self::Number(OrderedFloat(value))
    }
}

impl From<i32> for FactorLevel {
    fn from(value: i32) -> Self {
        Self::Number(OrderedFloat(f64::from(value)))
    }
}

impl From<&str> for FactorLevel {
    fn from(value: &str) -> Self {
        Self::Label(value.to_string())
    }
}

impl From<String> for FactorLevel {
    fn from(value: String) -> Self {
        Self::Label(value)
    }
}

impl fmt::Display for FactorLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n.0),
            Self::Label(s) => f.write_str(s),
        }
    }
}

/// Groups keyed by level, kept in first-seen order
#[derive(Debug, Clone)]
pub struct FactorGrouping<K, G = Vec<f64>> {
    keys: Vec<K>,
    groups: Vec<G>,
    index: HashMap<K, usize>,
}

/// Day → run → replicate values
pub type NestedGrouping = FactorGrouping<FactorLevel, FactorGrouping<FactorLevel>>;

impl<K, G> Default for FactorGrouping<K, G> {
    fn default() -> Self {
        Self {
            keys: Vec::new(),
            groups: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone, G: Default> FactorGrouping<K, G> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Group for `key`, created empty on first sight
    pub fn entry(&mut self, key: K) -> &mut G {
        let slot = match self.index.get(&key) {
            Some(&slot) => slot,
            None => {
                let slot = self.groups.len();
                self.index.insert(key.clone(), slot);
                self.keys.push(key);
                self.groups.push(G::default());
                slot
            }
        };
        &mut self.groups[slot]
    }
}

impl<K: Eq + Hash, G> FactorGrouping<K, G> {
    pub fn get(&self, key: &K) -> Option<&G> {
        self.index.get(key).map(|&slot| &self.groups[slot])
    }

    /// Number of distinct levels
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    pub fn groups(&self) -> &[G] {
        &self.groups
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &G)> {
        self.keys.iter().zip(&self.groups)
    }
}

impl<K: Eq + Hash + Clone> FactorGrouping<K> {
    /// Group `values` by the parallel `levels`
    pub fn from_pairs<'a>(
        levels: impl IntoIterator<Item = &'a K>,
        values: impl IntoIterator<Item = &'a f64>,
    ) -> Self
    where
        K: 'a,
    {
        let mut grouping = Self::new();
        for (level, &value) in levels.into_iter().zip(values) {
            grouping.entry(level.clone()).push(value);
        }
        grouping
    }

    pub fn total_count(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }
}

impl NestedGrouping {
    /// Group `values` by day, then by run within day
    pub fn from_nested(days: &[FactorLevel], runs: &[FactorLevel], values: &[f64]) -> Self {
        let mut grouping = Self::new();
        for ((day, run), &value) in days.iter().zip(runs).zip(values) {
            grouping.entry(day.clone()).entry(run.clone()).push(value);
        }
        grouping
    }

    /// Largest number of runs recorded on any day
    pub fn max_runs(&self) -> usize {
        self.groups.iter().map(FactorGrouping::len).max().unwrap_or(0)
    }

    /// Largest number of replicates in any run cell
    pub fn max_replicates(&self) -> usize {
        self.groups
            .iter()
            .flat_map(|runs| runs.groups().iter().map(Vec::len))
            .max()
            .unwrap_or(0)
    }

    /// Every run cell, day by day
    pub fn cells(&self) -> impl Iterator<Item = &Vec<f64>> {
        self.groups.iter().flat_map(|runs| runs.groups().iter())
    }
}
