//! Explicit sets of enumerated categories
//!
//! Data rates and data types are often combined into groups (for instance
//! "all observation types"). `CategorySet` holds such a group as an ordered
//! set of enum values and answers membership and overlap queries.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// An ordered set of enum values
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategorySet<T: Ord> {
    members: BTreeSet<T>,
}

impl<T: Ord + Copy> CategorySet<T> {
    /// Create an empty set
    pub fn new() -> Self {
        Self {
            members: BTreeSet::new(),
        }
    }

    /// Create a set holding a single value
    pub fn single(value: T) -> Self {
        let mut set = Self::new();
        set.insert(value);
        set
    }

    /// Add a value, returning whether it was newly inserted
    pub fn insert(&mut self, value: T) -> bool {
        self.members.insert(value)
    }

    /// Whether `value` is a member of this set
    pub fn contains(&self, value: &T) -> bool {
        self.members.contains(value)
    }

    /// Whether this set shares at least one member with `other`
    pub fn intersects(&self, other: &CategorySet<T>) -> bool {
        self.members.iter().any(|value| other.contains(value))
    }

    /// Whether every member of `other` is also in this set
    pub fn is_superset(&self, other: &CategorySet<T>) -> bool {
        self.members.is_superset(&other.members)
    }

    /// Members of both sets combined
    pub fn union(&self, other: &CategorySet<T>) -> CategorySet<T> {
        self.members.union(&other.members).copied().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Iterate members in enum order
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.members.iter().copied()
    }

    /// Members collected into a vector, in enum order
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }
}

impl<T: Ord + Copy> Default for CategorySet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Copy> FromIterator<T> for CategorySet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}

impl<T: Ord + Copy> Extend<T> for CategorySet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.members.extend(iter);
    }
}

impl<T: Ord + Copy> From<T> for CategorySet<T> {
    fn from(value: T) -> Self {
        Self::single(value)
    }
}

impl<T: Ord + Copy + fmt::Display> fmt::Display for CategorySet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<String> = self.members.iter().map(|v| v.to_string()).collect();
        write!(f, "{}", labels.join(", "))
    }
}
