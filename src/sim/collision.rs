//! Basket/mushroom collision detection
//!
//! Only overlap matters here; there is no physical response. A hit is turned
//! into a scoring effect and the tick recycles the mushroom.

use super::entity::{Entity, EntityKind, Rect};

/// What catching an item does to the score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// A good mushroom landed in the basket
    Collected,
    /// A poisonous mushroom landed in the basket
    Poisoned,
}

/// Check one item against the basket.
///
/// Returns `None` when they do not overlap (or `item` is itself a collector).
pub fn resolve(collector: &Rect, item: &Entity) -> Option<Effect> {
    if !collector.intersects(&item.bounds) {
        return None;
    }

    match item.kind {
        EntityKind::Beneficial | EntityKind::BeneficialAlt => Some(Effect::Collected),
        EntityKind::Poisonous => Some(Effect::Poisoned),
        EntityKind::Collector => None,
    }
}
