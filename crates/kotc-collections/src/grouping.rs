//! Keyed grouping with per-group aggregation (`List::grouping_by`).
//!
//! Each aggregation yields a fresh `Map` whose key and value types are
//! inferred from the first group, like any other derived map.

use crate::error::Result;
use crate::map::Map;
use crate::value::Value;
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

pub(crate) type Groups = IndexMap<Value, Vec<Value>, FxBuildHasher>;

/// Bucket `items` by `key`, keeping first-seen key order and element order.
pub(crate) fn group_items(items: &[Value], mut key: impl FnMut(&Value) -> Value) -> Groups {
    let mut groups = Groups::default();
    for item in items {
        groups.entry(key(item)).or_default().push(item.clone());
    }
    groups
}

/// Elements grouped by key, ready to be aggregated group by group.
#[derive(Clone, Debug)]
pub struct Grouping {
    groups: Groups,
}

impl Grouping {
    pub(crate) fn new(items: &[Value], key: impl FnMut(&Value) -> Value) -> Self {
        Grouping {
            groups: group_items(items, key),
        }
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &Value> {
        self.groups.keys()
    }

    /// Group sizes.
    pub fn each_count(&self) -> Result<Map> {
        Map::new(
            self.groups
                .iter()
                .map(|(key, members)| (key.clone(), Value::from(members.len()))),
        )
    }

    /// Fold each group starting from `initial(key, first_element)`; the
    /// operation then sees every element of the group, the first included.
    pub fn fold(
        &self,
        mut initial: impl FnMut(&Value, &Value) -> Value,
        mut operation: impl FnMut(&Value, Value, &Value) -> Value,
    ) -> Result<Map> {
        let mut results = Vec::with_capacity(self.groups.len());
        for (key, members) in &self.groups {
            let Some(first) = members.first() else {
                continue;
            };
            let seed = initial(key, first);
            let folded = members
                .iter()
                .fold(seed, |acc, item| operation(key, acc, item));
            results.push((key.clone(), folded));
        }
        Map::new(results)
    }

    /// Reduce each group, starting from its first element.
    pub fn reduce(&self, mut operation: impl FnMut(&Value, Value, &Value) -> Value) -> Result<Map> {
        let mut results = Vec::with_capacity(self.groups.len());
        for (key, members) in &self.groups {
            let Some((first, rest)) = members.split_first() else {
                continue;
            };
            let reduced = rest
                .iter()
                .fold(first.clone(), |acc, item| operation(key, acc, item));
            results.push((key.clone(), reduced));
        }
        Map::new(results)
    }

    /// General aggregation: `operation(key, accumulator, element, is_first)`,
    /// with no accumulator on the first element of each group.
    pub fn aggregate(
        &self,
        mut operation: impl FnMut(&Value, Option<Value>, &Value, bool) -> Value,
    ) -> Result<Map> {
        let mut results = Vec::with_capacity(self.groups.len());
        for (key, members) in &self.groups {
            let mut accumulator = None;
            for (i, item) in members.iter().enumerate() {
                accumulator = Some(operation(key, accumulator, item, i == 0));
            }
            if let Some(aggregated) = accumulator {
                results.push((key.clone(), aggregated));
            }
        }
        Map::new(results)
    }
}
