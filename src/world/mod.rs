//! World state - level geometry, collectibles and the GameWorld aggregate

mod game;

pub use game::*;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::physics::Aabb;

/// Static collidable surface, immutable for the lifetime of a level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Platform {
    pub rect: Aabb,
}

impl Platform {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self {
            rect: Aabb::new(min, size),
        }
    }
}

/// Collectible value tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemTier {
    Coin,
    Key,
}

impl ItemTier {
    pub fn points(self) -> u32 {
        match self {
            ItemTier::Coin => SCORE_COIN,
            ItemTier::Key => SCORE_KEY,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ItemTier::Coin => "coin",
            ItemTier::Key => "key",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "coin" => Some(ItemTier::Coin),
            "key" => Some(ItemTier::Key),
            _ => None,
        }
    }
}

/// Pickup that flips from uncollected to collected exactly once
#[derive(Debug, Clone, PartialEq)]
pub struct Collectible {
    pub rect: Aabb,
    pub tier: ItemTier,
    collected: bool,
}

impl Collectible {
    pub fn new(pos: Vec2, tier: ItemTier) -> Self {
        Self {
            rect: Aabb::new(pos, COLLECTIBLE_SIZE),
            tier,
            collected: false,
        }
    }

    pub fn is_collected(&self) -> bool {
        self.collected
    }

    /// Mark collected. Returns the points awarded, or None if already taken.
    pub fn collect(&mut self) -> Option<u32> {
        if self.collected {
            return None;
        }
        self.collected = true;
        Some(self.tier.points())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_awards_once() {
        let mut key = Collectible::new(Vec2::new(10.0, 10.0), ItemTier::Key);
        assert_eq!(key.collect(), Some(SCORE_KEY));
        assert!(key.is_collected());
        assert_eq!(key.collect(), None);
        assert_eq!(key.collect(), None);
    }

    #[test]
    fn test_item_tier_names() {
        assert_eq!(ItemTier::from_name("KEY"), Some(ItemTier::Key));
        assert_eq!(ItemTier::from_name("gem"), None);
        assert_eq!(ItemTier::Coin.points(), 50);
    }
}
