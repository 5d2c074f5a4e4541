//! Decoding a genome into a concrete loading plan.
//!
//! [`decode`] is a pure projection used by reports and comparisons; the
//! search never calls it.

use crate::catalog::{Catalog, Item, Totals};

/// One loaded item with its catalog index.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadedItem {
    pub index: usize,
    pub item: Item,
}

/// The items selected by a solution and their aggregate totals.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadPlan {
    pub items: Vec<LoadedItem>,
    pub totals: Totals,
}

impl LoadPlan {
    /// Builds a plan from item indices, in the given order.
    ///
    /// # Panics
    /// Panics if an index is out of range for `catalog`.
    pub fn from_indices(indices: &[usize], catalog: &Catalog) -> Self {
        let mut plan = Self::default();
        for &index in indices {
            let item = *catalog
                .get(index)
                .unwrap_or_else(|| panic!("item index {index} out of range"));
            plan.push(index, item);
        }
        plan
    }

    fn push(&mut self, index: usize, item: Item) {
        self.totals.add(&item);
        self.items.push(LoadedItem { index, item });
    }

    /// Indices of the loaded items.
    pub fn indices(&self) -> Vec<usize> {
        self.items.iter().map(|loaded| loaded.index).collect()
    }

    /// Number of loaded items.
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Back to a genome of length `len`.
    pub fn to_genome(&self, len: usize) -> Vec<bool> {
        let mut genome = vec![false; len];
        for loaded in &self.items {
            genome[loaded.index] = true;
        }
        genome
    }
}

/// Lists the items whose gene is set, in index order, with their totals.
///
/// # Panics
/// Panics if `genome.len() != catalog.len()`.
pub fn decode(genome: &[bool], catalog: &Catalog) -> LoadPlan {
    assert_eq!(
        genome.len(),
        catalog.len(),
        "genome length must equal catalog length"
    );
    let mut plan = LoadPlan::default();
    for (index, (item, _)) in catalog
        .iter()
        .zip(genome)
        .enumerate()
        .filter(|(_, (_, &bit))| bit)
    {
        plan.push(index, *item);
    }
    plan
}
