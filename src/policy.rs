//! Dispatch policy configuration.
//!
//! Every tunable the two algorithms depend on lives here as data:
//! district capacity, the stagger interval between sub-deliveries, the
//! handling-duration model, and the category → priority-rank table.
//! Nothing in `allocator` or `splitter` hard-codes these values, so
//! tests (and deployments) can substitute alternates.

use serde::{Deserialize, Serialize};

/// Scheduling policy constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchPolicy {
    /// Maximum deliveries per (date, slot, district) triple.
    pub district_slot_capacity: usize,
    /// Minutes between consecutive priority ranks in a split preview.
    pub stagger_interval_minutes: i64,
    /// Floor for the estimated handling duration of a sub-delivery.
    pub min_duration_minutes: i64,
    /// Handling minutes contributed by each item.
    pub per_item_minutes: i64,
}

impl Default for DispatchPolicy {
    /// Production values observed in dispatch operations.
    fn default() -> Self {
        Self {
            district_slot_capacity: 3,
            stagger_interval_minutes: 120,
            min_duration_minutes: 30,
            per_item_minutes: 5,
        }
    }
}

impl DispatchPolicy {
    /// Creates the default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the per-district slot capacity.
    pub fn with_district_slot_capacity(mut self, capacity: usize) -> Self {
        self.district_slot_capacity = capacity;
        self
    }

    /// Sets the stagger interval between ranks (minutes).
    pub fn with_stagger_interval(mut self, minutes: i64) -> Self {
        self.stagger_interval_minutes = minutes;
        self
    }

    /// Sets the duration model (floor and per-item minutes).
    pub fn with_duration_model(mut self, min_minutes: i64, per_item_minutes: i64) -> Self {
        self.min_duration_minutes = min_minutes;
        self.per_item_minutes = per_item_minutes;
        self
    }

    /// Estimated handling duration for a sub-delivery of `total_items` items.
    pub fn estimate_duration_minutes(&self, total_items: u32) -> i64 {
        (i64::from(total_items) * self.per_item_minutes).max(self.min_duration_minutes)
    }
}

/// Ordered category → priority-rank table.
///
/// Lower rank = dispatched earlier (structural materials go out before
/// finishing materials and tools). Categories missing from the table get
/// the explicit fallback rank, which sorts last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRankTable {
    ranks: Vec<(String, u32)>,
    fallback_rank: u32,
}

impl CategoryRankTable {
    /// Creates an empty table with the given fallback rank.
    pub fn new(fallback_rank: u32) -> Self {
        Self {
            ranks: Vec::new(),
            fallback_rank,
        }
    }

    /// Adds a category at the given rank.
    pub fn with_rank(mut self, category: impl Into<String>, rank: u32) -> Self {
        self.ranks.push((category.into(), rank));
        self
    }

    /// Rank for a category; unknown categories get the fallback rank.
    pub fn rank_of(&self, category: &str) -> u32 {
        self.ranks
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, r)| *r)
            .unwrap_or(self.fallback_rank)
    }

    /// The fallback rank for unlisted categories.
    pub fn fallback_rank(&self) -> u32 {
        self.fallback_rank
    }
}

impl Default for CategoryRankTable {
    /// Default dispatch precedence for construction materials.
    ///
    /// Structural loads lead, finishing and fittings follow, loose tools
    /// and anything unrecognized go last.
    fn default() -> Self {
        Self::new(7)
            .with_rank("Cement", 1)
            .with_rank("Steel & Reinforcement", 2)
            .with_rank("Sand & Aggregate", 3)
            .with_rank("Bricks & Blocks", 4)
            .with_rank("Finishing Materials", 5)
            .with_rank("Tools & Equipment", 6)
    }
}
