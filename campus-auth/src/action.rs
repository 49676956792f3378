// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::BTreeSet;
use std::collections::btree_set;
use std::fmt::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Set of actions an actor is permitted to perform on an entity.
///
/// Iteration follows the declaration order of the action type, independent of the order in
/// which rules granted the actions.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ActionSet<A: Ord>(BTreeSet<A>);

impl<A: Ord> ActionSet<A> {
    /// Set without any permitted actions.
    pub fn empty() -> Self {
        Self(BTreeSet::new())
    }

    pub fn contains(&self, action: &A) -> bool {
        self.0.contains(action)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> btree_set::Iter<'_, A> {
        self.0.iter()
    }

    pub(crate) fn insert(&mut self, action: A) {
        self.0.insert(action);
    }

    pub(crate) fn remove(&mut self, action: &A) -> bool {
        self.0.remove(action)
    }
}

impl<A: Ord> Default for ActionSet<A> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<A: Ord> FromIterator<A> for ActionSet<A> {
    fn from_iter<T: IntoIterator<Item = A>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<A: Ord, const N: usize> From<[A; N]> for ActionSet<A> {
    fn from(actions: [A; N]) -> Self {
        actions.into_iter().collect()
    }
}

impl<A: Ord> IntoIterator for ActionSet<A> {
    type Item = A;
    type IntoIter = btree_set::IntoIter<A>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, A: Ord> IntoIterator for &'a ActionSet<A> {
    type Item = &'a A;
    type IntoIter = btree_set::Iter<'a, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<A: Ord + Display> Display for ActionSet<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (index, action) in self.0.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{action}")?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::ActionSet;

    #[test]
    fn order_independent() {
        let a: ActionSet<u8> = [3, 1, 2].into();
        let b: ActionSet<u8> = [2, 3, 1, 1].into();
        assert_eq!(a, b);
        assert_eq!(a.len(), 3);
        assert_eq!(a.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn display() {
        let set: ActionSet<u8> = [2, 1].into();
        assert_eq!(set.to_string(), "{1, 2}");
        assert_eq!(ActionSet::<u8>::empty().to_string(), "{}");
    }

    #[test]
    fn insert_and_remove() {
        let mut set = ActionSet::default();
        set.insert('x');
        set.insert('y');
        assert!(set.remove(&'x'));
        assert!(!set.remove(&'x'));
        assert!(set.contains(&'y'));
        assert!(!set.is_empty());
    }
}
