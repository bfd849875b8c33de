//! Item registry — canonical, indexed view of every item across all collections.
//!
//! Items are sorted by collection count descending, then by id ascending, and
//! the position in that order is the item's [`VertexId`]. The order is fixed
//! here and every later phase addresses items by it.

use hashbrown::HashMap;
use tracing::info;

use crate::model::*;

/// Sorted table of [`ItemRecord`]s plus a reverse lookup by [`ItemId`].
#[derive(Debug, Clone)]
pub struct ItemRegistry {
    records: Vec<ItemRecord>,
    positions: HashMap<ItemId, VertexId>,
    collection_count: usize,
}

impl ItemRegistry {
    /// Index every item of `collections`.
    ///
    /// Collection `i` of the slice is collection index `i` for the rest of
    /// the run.
    pub fn from_collections(collections: &[Collection]) -> Self {
        let mut by_item: HashMap<ItemId, Vec<usize>> = HashMap::new();
        for (index, collection) in collections.iter().enumerate() {
            for item in collection {
                // Indices arrive in ascending order, and a collection holds
                // each item once, so the lists stay sorted and unique.
                by_item.entry(item.clone()).or_default().push(index);
            }
        }

        let mut records: Vec<ItemRecord> = by_item
            .into_iter()
            .map(|(id, collections)| ItemRecord { id, collections })
            .collect();
        records.sort_by(|a, b| {
            b.collection_count()
                .cmp(&a.collection_count())
                .then_with(|| a.id.cmp(&b.id))
        });

        let positions = records
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id.clone(), VertexId(i)))
            .collect();

        info!(
            items = records.len(),
            collections = collections.len(),
            "item registry built"
        );

        Self { records, positions, collection_count: collections.len() }
    }

    /// Number of distinct items (M).
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of collections indexed (N), including ones without items.
    pub fn collection_count(&self) -> usize {
        self.collection_count
    }

    pub fn record(&self, v: VertexId) -> Option<&ItemRecord> {
        self.records.get(v.index())
    }

    pub fn records(&self) -> &[ItemRecord] {
        &self.records
    }

    /// Vertex index of `item`, if it appeared in any collection.
    pub fn position(&self, item: &ItemId) -> Option<VertexId> {
        self.positions.get(item).copied()
    }

    /// Item ids in vertex order.
    pub fn ids(&self) -> impl Iterator<Item = &ItemId> {
        self.records.iter().map(|r| &r.id)
    }
}
