//! Entities: the basket and the falling mushrooms
//!
//! Everything is an axis-aligned rectangle in screen space (y grows downward)
//! tagged with an explicit kind.

use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Axis-aligned rectangle, `pos` is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Strict overlap test; rectangles that only share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

/// What an entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Regular mushroom
    Beneficial,
    /// Second mushroom variety, scores the same
    BeneficialAlt,
    /// Poisonous mushroom, five of these end the run
    Poisonous,
    /// The player's basket
    Collector,
}

impl EntityKind {
    pub fn is_beneficial(self) -> bool {
        matches!(self, EntityKind::Beneficial | EntityKind::BeneficialAlt)
    }

    pub fn is_falling(self) -> bool {
        self != EntityKind::Collector
    }
}

impl FromStr for EntityKind {
    type Err = Error;

    /// Case-insensitive kind name, e.g. `beneficial` or `Poisonous`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beneficial" => Ok(EntityKind::Beneficial),
            "beneficialalt" | "beneficial_alt" => Ok(EntityKind::BeneficialAlt),
            "poisonous" => Ok(EntityKind::Poisonous),
            "collector" => Ok(EntityKind::Collector),
            other => Err(Error::InvalidConfig(format!("unknown item kind '{other}'"))),
        }
    }
}

/// A basket or a mushroom
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    pub bounds: Rect,
}

/// Playfield dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}
