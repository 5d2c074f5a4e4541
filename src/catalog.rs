//! Item catalog and capacity limits.
//!
//! A [`Catalog`] is the ordered, read-only list of containers a run may
//! load. Position `i` in the catalog is gene `i` in every genome.

use crate::error::ConfigError;
use rand::Rng;

/// One loadable item.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub weight: f64,
    pub volume: f64,
    pub value: f64,
}

impl Item {
    pub fn new(weight: f64, volume: f64, value: f64) -> Self {
        Self {
            weight,
            volume,
            value,
        }
    }

    /// Value density used by the ratio-greedy baseline: `value / (weight + volume)`.
    ///
    /// Items with zero size have infinite density.
    pub fn density(&self) -> f64 {
        let size = self.weight + self.volume;
        if size > 0.0 {
            self.value / size
        } else {
            f64::INFINITY
        }
    }

    fn is_valid(&self) -> bool {
        [self.weight, self.volume, self.value]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
    }
}

impl From<(f64, f64, f64)> for Item {
    fn from((weight, volume, value): (f64, f64, f64)) -> Self {
        Self::new(weight, volume, value)
    }
}

/// Aggregate weight, volume and value of a set of items.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Totals {
    pub weight: f64,
    pub volume: f64,
    pub value: f64,
}

impl Totals {
    pub fn add(&mut self, item: &Item) {
        self.weight += item.weight;
        self.volume += item.volume;
        self.value += item.value;
    }

    /// Returns `true` if both totals are within `capacity`.
    pub fn fits(&self, capacity: &Capacity) -> bool {
        self.weight <= capacity.max_weight && self.volume <= capacity.max_volume
    }
}

/// The two capacity limits of the hold.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "CapacityLimits"))]
pub struct Capacity {
    pub max_weight: f64,
    pub max_volume: f64,
}

impl Capacity {
    pub fn new(max_weight: f64, max_volume: f64) -> Self {
        Self {
            max_weight,
            max_volume,
        }
    }

    /// Checks that both limits are finite and non-negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [("max_weight", self.max_weight), ("max_volume", self.max_volume)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidCapacity { name, value });
            }
        }
        Ok(())
    }
}

/// Unchecked wire form of [`Capacity`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct CapacityLimits {
    max_weight: f64,
    max_volume: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<CapacityLimits> for Capacity {
    type Error = ConfigError;

    fn try_from(raw: CapacityLimits) -> Result<Self, Self::Error> {
        let capacity = Capacity::new(raw.max_weight, raw.max_volume);
        capacity.validate()?;
        Ok(capacity)
    }
}

/// Ordered, immutable collection of items.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "CatalogItems"))]
pub struct Catalog {
    items: Vec<Item>,
}

/// Unchecked wire form of [`Catalog`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct CatalogItems {
    items: Vec<Item>,
}

#[cfg(feature = "serde")]
impl TryFrom<CatalogItems> for Catalog {
    type Error = ConfigError;

    fn try_from(raw: CatalogItems) -> Result<Self, Self::Error> {
        Catalog::new(raw.items)
    }
}

impl Catalog {
    /// Builds a catalog, rejecting empty input and negative attributes.
    pub fn new(items: Vec<Item>) -> Result<Self, ConfigError> {
        if items.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        if let Some(index) = items.iter().position(|item| !item.is_valid()) {
            return Err(ConfigError::InvalidItem { index });
        }
        Ok(Self { items })
    }

    /// Builds a catalog from `(weight, volume, value)` triples.
    pub fn from_triples(triples: &[(f64, f64, f64)]) -> Result<Self, ConfigError> {
        Self::new(triples.iter().copied().map(Item::from).collect())
    }

    /// Generates `n` random items: weight in 1..=50, volume in 1..=100,
    /// value in 100..=1000.
    pub fn random<R: Rng>(n: usize, rng: &mut R) -> Result<Self, ConfigError> {
        let items = (0..n)
            .map(|_| Item {
                weight: rng.random_range(1..=50) as f64,
                volume: rng.random_range(1..=100) as f64,
                value: rng.random_range(100..=1000) as f64,
            })
            .collect();
        Self::new(items)
    }

    /// The fixed 50-container reference instance.
    pub fn reference() -> Self {
        Self {
            items: REFERENCE_ITEMS
                .iter()
                .map(|&(w, v, val)| Item::new(w as f64, v as f64, val as f64))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    /// Sums the items whose gene is set.
    ///
    /// # Panics
    /// Panics if `genome.len() != self.len()`.
    pub fn totals(&self, genome: &[bool]) -> Totals {
        assert_eq!(
            genome.len(),
            self.items.len(),
            "genome length must equal catalog length"
        );
        let mut totals = Totals::default();
        for (item, _) in self.items.iter().zip(genome).filter(|(_, &bit)| bit) {
            totals.add(item);
        }
        totals
    }

    /// Totals over every item in the catalog.
    pub fn grand_totals(&self) -> Totals {
        let mut totals = Totals::default();
        for item in &self.items {
            totals.add(item);
        }
        totals
    }
}

/// (weight t, volume m³, freight value)
const REFERENCE_ITEMS: [(u32, u32, u32); 50] = [
    (9, 97, 288), (29, 7, 315), (11, 77, 145), (50, 56, 460), (30, 74, 619),
    (18, 16, 276), (35, 36, 715), (50, 55, 956), (26, 87, 534), (8, 90, 956),
    (26, 39, 830), (35, 4, 741), (3, 45, 285), (46, 8, 234), (1, 90, 850),
    (15, 100, 490), (43, 84, 738), (34, 32, 447), (25, 58, 994), (29, 56, 949),
    (26, 94, 641), (16, 18, 305), (42, 90, 584), (5, 87, 472), (33, 32, 810),
    (38, 26, 529), (48, 4, 803), (6, 10, 595), (49, 98, 331), (16, 21, 749),
    (49, 62, 518), (5, 100, 706), (49, 45, 487), (16, 54, 942), (18, 47, 167),
    (2, 77, 812), (26, 69, 668), (27, 41, 231), (44, 67, 523), (32, 92, 715),
    (2, 61, 629), (35, 28, 777), (13, 81, 223), (4, 11, 371), (12, 78, 818),
    (1, 70, 930), (18, 17, 165), (46, 3, 572), (24, 74, 891), (13, 74, 890),
];
