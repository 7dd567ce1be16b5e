//! Order splitting and delivery-sequencing preview.
//!
//! Transforms a flat list of (material, quantity) order lines into a
//! prioritized sequence of sub-delivery candidates, one per distinct
//! material category. The preview is advisory: proposed times stagger
//! the categories across the base day but reserve nothing — each
//! candidate still goes through [`crate::allocator::check_slot`] at
//! confirmation time, and one rejection does not invalidate the rest.
//!
//! # Algorithm
//!
//! 1. Drop lines that fail to resolve against the catalog or have a
//!    non-positive quantity (silently; not an error).
//! 2. Group the survivors by catalog category, in first-seen order.
//! 3. Rank each category through the [`CategoryRankTable`]
//!    (explicit fallback rank for unknown categories).
//! 4. Propose `base + (rank − 1) × stagger_interval` as each group's
//!    delivery time and estimate handling duration from the item count.
//! 5. Emit candidates stable-sorted ascending by rank, numbered from 1.
//!
//! The function is pure: identical inputs yield an identical sequence.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::{MaterialsCatalog, OrderLine};
use crate::policy::{CategoryRankTable, DispatchPolicy};

/// One resolved line inside a sub-delivery candidate.
///
/// Catalog fields are denormalized here so the preview renders without
/// further lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateItem {
    /// Catalog material identifier.
    pub material_id: String,
    /// Material display name.
    pub name: String,
    /// Sale unit.
    pub unit: String,
    /// Stock-keeping unit code.
    pub sku: String,
    /// Requested quantity.
    pub quantity: u32,
}

/// A proposed (not yet booked) sub-delivery for one material category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubDeliveryCandidate {
    /// Position in the preview, numbered from 1.
    pub sequence: u32,
    /// Material category shared by all items.
    pub category: String,
    /// Resolved lines, in input order.
    pub items: Vec<CandidateItem>,
    /// Sum of item quantities.
    pub total_items: u32,
    /// Advisory delivery timestamp (base date staggered by rank).
    pub proposed_at: NaiveDateTime,
    /// Dispatch precedence (lower = earlier).
    pub priority_rank: u32,
    /// Estimated handling duration.
    pub estimated_duration_minutes: i64,
}

/// Builds the split preview for an order.
///
/// Returns an empty vector when no line survives validation — "nothing
/// to preview", not an error. See the module docs for the algorithm.
pub fn build_preview(
    lines: &[OrderLine],
    catalog: &MaterialsCatalog,
    base: NaiveDateTime,
    policy: &DispatchPolicy,
    ranks: &CategoryRankTable,
) -> Vec<SubDeliveryCandidate> {
    // Group valid lines by category, preserving first-seen group order
    // so equal ranks break ties deterministically.
    let mut groups: Vec<(String, Vec<CandidateItem>, u32)> = Vec::new();

    for line in lines {
        if !line.has_valid_quantity() {
            continue;
        }
        let Some(record) = catalog.resolve(&line.material_id) else {
            continue;
        };

        let item = CandidateItem {
            material_id: record.id.clone(),
            name: record.name.clone(),
            unit: record.unit.clone(),
            sku: record.sku.clone(),
            quantity: line.quantity,
        };

        match groups.iter_mut().find(|(cat, _, _)| *cat == record.category) {
            Some((_, items, total)) => {
                items.push(item);
                *total += line.quantity;
            }
            None => groups.push((record.category.clone(), vec![item], line.quantity)),
        }
    }

    let mut candidates: Vec<SubDeliveryCandidate> = groups
        .into_iter()
        .map(|(category, items, total_items)| {
            let rank = ranks.rank_of(&category);
            let offset = Duration::minutes(
                i64::from(rank.saturating_sub(1)) * policy.stagger_interval_minutes,
            );
            SubDeliveryCandidate {
                sequence: 0, // assigned after sorting
                category,
                items,
                total_items,
                proposed_at: base + offset,
                priority_rank: rank,
                estimated_duration_minutes: policy.estimate_duration_minutes(total_items),
            }
        })
        .collect();

    // Stable sort keeps first-seen order on rank ties.
    candidates.sort_by_key(|c| c.priority_rank);
    for (i, candidate) in candidates.iter_mut().enumerate() {
        candidate.sequence = (i + 1) as u32;
    }

    candidates
}
