//! Character state

use serde::{Deserialize, Serialize};

use super::condition::{Condition, check_bit};
use crate::{
    STARTING_HIT_POINTS, STARTING_INVENTORY, STARTING_MANA_POINTS, STARTING_STAMINA_POINTS,
};

/// Handle to an entity that can take part in combat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// The training dummy the player spars with
    pub const TRAINING_DUMMY: EntityId = EntityId(1);
}

/// Map position (x east, y north, z up)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0, y: 0, z: 0 };

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Position shifted by a delta, clamped at the edge of the coordinate range
    pub const fn offset(&self, (dx, dy, dz): (i32, i32, i32)) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            z: self.z.saturating_add(dz),
        }
    }
}

impl core::fmt::Display for Position {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// A current/maximum point pool (hit points, mana, stamina)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    pub current: i32,
    pub max: i32,
}

impl Pool {
    /// A full pool
    pub const fn full(max: i32) -> Self {
        Self { current: max, max }
    }
}

/// A player or NPC
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub hit_points: Pool,
    pub mana_points: Pool,
    pub stamina_points: Pool,
    pub conditions: Condition,
    pub position: Position,
    /// Opponent in the current fight, if any
    pub fighting: Option<EntityId>,
    /// Names of carried items
    pub inventory: Vec<String>,
}

impl Default for Character {
    fn default() -> Self {
        Self::new("")
    }
}

impl Character {
    /// Create a fresh character at the origin
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hit_points: Pool::full(STARTING_HIT_POINTS),
            mana_points: Pool::full(STARTING_MANA_POINTS),
            stamina_points: Pool::full(STARTING_STAMINA_POINTS),
            conditions: Condition::empty(),
            position: Position::ORIGIN,
            fighting: None,
            inventory: STARTING_INVENTORY.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn is_fighting(&self) -> bool {
        self.fighting.is_some()
    }

    pub fn has(&self, condition: Condition) -> bool {
        check_bit(&self.conditions, condition)
    }

    pub fn is_dead(&self) -> bool {
        self.has(Condition::DEAD)
    }

    /// One-line summary for status displays
    pub fn summary(&self) -> String {
        let conditions = self.conditions.names();
        let conditions = if conditions.is_empty() {
            "none".to_string()
        } else {
            conditions.join(", ")
        };
        format!(
            "{} HP {}/{} MP {}/{} SP {}/{} at {} conditions: {}",
            if self.name.is_empty() { "You" } else { self.name.as_str() },
            self.hit_points.current,
            self.hit_points.max,
            self.mana_points.current,
            self.mana_points.max,
            self.stamina_points.current,
            self.stamina_points.max,
            self.position,
            conditions,
        )
    }
}
