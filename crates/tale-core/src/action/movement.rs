//! Movement system
//!
//! Validates that a character is able to move and applies the position
//! delta. Any character can be moved this way, not just the player. Failed
//! checks are reported to the presenter and leave the character untouched.

use strum::EnumIter;
use thiserror::Error;
use tracing::debug;

use super::Direction;
use crate::STATUS_ELEMENT;
use crate::output::{Color, Presenter};
use crate::player::{Character, Condition, Position};

/// Why a character cannot move, in the order the checks run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum MoveBlock {
    InCombat,
    Paralyzed,
    Sleeping,
    Unconscious,
    Dead,
    SoulDead,
    Grappled,
    Swallowed,
    Digested,
}

impl MoveBlock {
    /// Condition bit behind this block; `None` for combat
    pub const fn condition(&self) -> Option<Condition> {
        match self {
            MoveBlock::InCombat => None,
            MoveBlock::Paralyzed => Some(Condition::PARALYZED),
            MoveBlock::Sleeping => Some(Condition::SLEEPING),
            MoveBlock::Unconscious => Some(Condition::UNCONSCIOUS),
            MoveBlock::Dead => Some(Condition::DEAD),
            MoveBlock::SoulDead => Some(Condition::SOULDEAD),
            MoveBlock::Grappled => Some(Condition::GRAPPLED),
            MoveBlock::Swallowed => Some(Condition::SWALLOWED),
            MoveBlock::Digested => Some(Condition::DIGESTED),
        }
    }

    pub const fn message(&self) -> &'static str {
        match self {
            MoveBlock::InCombat => "In the middle of combat?",
            MoveBlock::Paralyzed => "Try as you might, you can't move a muscle.",
            MoveBlock::Sleeping => "Sleepwalking? Very funny, but try waking up first.",
            MoveBlock::Unconscious => "You are in no state to do that.",
            MoveBlock::Dead => "Spiritwalking may work in some cultures, but.... NO.",
            MoveBlock::SoulDead => "Your soul is no longer your own.",
            MoveBlock::Grappled => "You are a bit pinned down at the moment.",
            MoveBlock::Swallowed => {
                "You should probably be thinking of getting outside of this thing first."
            }
            MoveBlock::Digested => {
                "You have been completely dissolved. \
                 The only movement you'll be experiencing is no longer in your control"
            }
        }
    }

    pub const fn color(&self) -> Color {
        match self {
            MoveBlock::InCombat => Color::Orange,
            _ => Color::Red,
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            MoveBlock::InCombat => "in combat",
            MoveBlock::Paralyzed => "paralyzed",
            MoveBlock::Sleeping => "sleeping",
            MoveBlock::Unconscious => "unconscious",
            MoveBlock::Dead => "dead",
            MoveBlock::SoulDead => "souldead",
            MoveBlock::Grappled => "grappled",
            MoveBlock::Swallowed => "swallowed",
            MoveBlock::Digested => "digested",
        }
    }
}

fn describe_blocks(blocks: &[MoveBlock]) -> String {
    blocks
        .iter()
        .map(MoveBlock::name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A move that did not happen
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("direction {0} is not a known direction")]
    InvalidDirection(i32),

    #[error("movement blocked: {}", describe_blocks(.0))]
    Blocked(Vec<MoveBlock>),
}

/// Every reason `mover` cannot move right now, in check order
pub fn movement_blocks(mover: &Character) -> Vec<MoveBlock> {
    use strum::IntoEnumIterator;

    MoveBlock::iter()
        .filter(|block| match block.condition() {
            None => mover.is_fighting(),
            Some(condition) => mover.has(condition),
        })
        .collect()
}

/// Move a character one step in `direction`.
///
/// Every failed check is reported on its own. On success the new position
/// is returned.
pub fn do_move<P>(
    mover: &mut Character,
    direction: Direction,
    out: &mut P,
) -> Result<Position, MoveError>
where
    P: Presenter + ?Sized,
{
    let blocks = movement_blocks(mover);
    if !blocks.is_empty() {
        for block in &blocks {
            out.send(STATUS_ELEMENT, block.message(), Some(block.color()));
        }
        debug!(name = %mover.name, ?blocks, "move blocked");
        return Err(MoveError::Blocked(blocks));
    }

    mover.position = mover.position.offset(direction.delta());
    out.send(
        STATUS_ELEMENT,
        &format!("You move {}. Position: {}", direction.name(), mover.position),
        None,
    );
    debug!(name = %mover.name, direction = direction.name(), position = %mover.position, "moved");
    Ok(mover.position)
}

/// Move using a raw direction code from a command trigger.
///
/// Unknown codes are reported and rejected before any other check.
pub fn do_move_code<P>(mover: &mut Character, code: i32, out: &mut P) -> Result<Position, MoveError>
where
    P: Presenter + ?Sized,
{
    match Direction::try_from(code) {
        Ok(direction) => do_move(mover, direction, out),
        Err(err) => {
            out.send(
                STATUS_ELEMENT,
                &format!("Direction {} is not a known direction.", code),
                Some(Color::Orange),
            );
            Err(err)
        }
    }
}
