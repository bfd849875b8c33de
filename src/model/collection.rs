//! Collection (deck) — an immutable set of items.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use super::ItemId;

/// A deck: an unordered set of items. Adding an item twice is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection {
    items: BTreeSet<ItemId>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, item: &ItemId) -> bool {
        self.items.contains(item)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemId> {
        self.items.iter()
    }
}

impl<T: Into<ItemId>> FromIterator<T> for Collection {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self { items: iter.into_iter().map(Into::into).collect() }
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a ItemId;
    type IntoIter = std::collections::btree_set::Iter<'a, ItemId>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_collapse() {
        let deck: Collection = ["Opt", "Opt", "Island"].into_iter().collect();
        assert_eq!(deck.len(), 2);
        assert!(deck.contains(&ItemId::from("Opt")));
    }

    #[test]
    fn test_empty_collection() {
        let deck = Collection::new();
        assert!(deck.is_empty());
        assert_eq!(deck.iter().count(), 0);
    }
}
