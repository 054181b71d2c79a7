//! Combat system
//!
//! A placeholder: engaging an opponent, and a battle round that deals a fixed
//! point of damage to the character each normal heartbeat. Damage lands in
//! one of three bands:
//!
//! - HP above zero: a miss, nothing else changes
//! - HP in `(DEATH_THRESHOLD, 0]`: the character falls unconscious
//! - HP at or below `DEATH_THRESHOLD`: the character dies and the fight ends

use tracing::{debug, info};

use crate::output::{Color, Presenter};
use crate::player::{Character, Condition, EntityId, remove_bit, set_bit};
use crate::{BATTLE_ROUND_DAMAGE, COMBAT_ELEMENT, DEATH_THRESHOLD, STATUS_ELEMENT};

/// Result of one battle round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    /// Still standing
    Miss,
    /// Hit points fell to zero or below
    KnockedOut,
    /// Hit points fell to the death threshold
    Killed,
}

/// Result of trying to start a fight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngageOutcome {
    Engaged,
    AlreadyFighting,
    Unconscious,
    Dead,
}

/// Start fighting `opponent` if able
pub fn begin_fight<P>(fighter: &mut Character, opponent: EntityId, out: &mut P) -> EngageOutcome
where
    P: Presenter + ?Sized,
{
    if !fighter.is_dead() && !fighter.is_fighting() {
        fighter.fighting = Some(opponent);
        out.send(COMBAT_ELEMENT, "You ready your wooden sword.", None);
        info!(name = %fighter.name, opponent = opponent.0, "fight started");
        return EngageOutcome::Engaged;
    }

    let (outcome, msg) = if fighter.is_dead() {
        (EngageOutcome::Dead, "You are DEAD! You can't do anything.")
    } else if fighter.has(Condition::UNCONSCIOUS) {
        (
            EngageOutcome::Unconscious,
            "You aren't conscious enough to do anything right now.",
        )
    } else {
        (
            EngageOutcome::AlreadyFighting,
            "You are already doing the best you can!",
        )
    };
    out.send(STATUS_ELEMENT, msg, None);
    outcome
}

/// Apply one round of placeholder damage to `fighter`
pub fn resolve_battle_round<P>(fighter: &mut Character, out: &mut P) -> RoundOutcome
where
    P: Presenter + ?Sized,
{
    let damage = BATTLE_ROUND_DAMAGE;
    fighter.hit_points.current -= damage;
    let hp = fighter.hit_points.current;
    out.send(
        STATUS_ELEMENT,
        &format!(
            "You are attacked for {} point of damage.  Current HP: {}",
            damage, hp
        ),
        None,
    );

    let outcome = if hp > 0 {
        out.send(COMBAT_ELEMENT, "You swing your wooden sword and miss!", None);
        RoundOutcome::Miss
    } else if hp > DEATH_THRESHOLD {
        out.send(
            COMBAT_ELEMENT,
            "You have lost consciousness.",
            Some(Color::Orange),
        );
        fighter.conditions = set_bit(fighter.conditions, Condition::UNCONSCIOUS);
        RoundOutcome::KnockedOut
    } else {
        out.send(COMBAT_ELEMENT, "You are DEAD!", Some(Color::Red));
        fighter.conditions = remove_bit(fighter.conditions, Condition::UNCONSCIOUS);
        fighter.conditions = set_bit(fighter.conditions, Condition::DEAD);
        fighter.fighting = None;
        info!(name = %fighter.name, "character died");
        RoundOutcome::Killed
    };
    debug!(name = %fighter.name, hp, ?outcome, "battle round");
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::MessageLog;

    fn fighter() -> Character {
        let mut c = Character::new("duelist");
        c.fighting = Some(EntityId::TRAINING_DUMMY);
        c
    }

    #[test]
    fn test_miss_band() {
        let mut c = fighter();
        let mut log = MessageLog::new();
        for _ in 0..19 {
            assert_eq!(resolve_battle_round(&mut c, &mut log), RoundOutcome::Miss);
        }
        assert_eq!(c.hit_points.current, 1);
        assert!(c.conditions.is_empty());
        assert_eq!(
            log.last_on(COMBAT_ELEMENT).unwrap().message,
            "You swing your wooden sword and miss!"
        );
        assert_eq!(
            log.last_on(STATUS_ELEMENT).unwrap().message,
            "You are attacked for 1 point of damage.  Current HP: 1"
        );
    }

    #[test]
    fn test_zero_hp_is_unconscious() {
        let mut c = fighter();
        let mut log = MessageLog::new();
        for _ in 0..19 {
            resolve_battle_round(&mut c, &mut log);
        }
        assert_eq!(
            resolve_battle_round(&mut c, &mut log),
            RoundOutcome::KnockedOut
        );
        assert_eq!(c.hit_points.current, 0);
        assert!(c.has(Condition::UNCONSCIOUS));
        assert!(c.is_fighting());
        assert_eq!(
            log.last_on(COMBAT_ELEMENT).unwrap().color,
            Some(Color::Orange)
        );
    }

    #[test]
    fn test_death_at_threshold() {
        let mut c = fighter();
        let mut log = MessageLog::new();
        let outcomes: Vec<_> = (0..30)
            .map(|_| resolve_battle_round(&mut c, &mut log))
            .collect();
        assert_eq!(outcomes[28], RoundOutcome::KnockedOut); // HP -9
        assert_eq!(outcomes[29], RoundOutcome::Killed); // HP -10
        assert_eq!(c.hit_points.current, -10);
        assert!(c.is_dead());
        assert!(!c.has(Condition::UNCONSCIOUS));
        assert_eq!(c.fighting, None);
        assert_eq!(log.last_on(COMBAT_ELEMENT).unwrap().message, "You are DEAD!");
    }

    #[test]
    fn test_other_conditions_survive_death() {
        let mut c = fighter();
        c.conditions = Condition::POISONED;
        c.hit_points.current = -9;
        let mut log = MessageLog::new();
        assert_eq!(resolve_battle_round(&mut c, &mut log), RoundOutcome::Killed);
        assert_eq!(c.conditions, Condition::POISONED | Condition::DEAD);
    }

    #[test]
    fn test_begin_fight() {
        let mut c = Character::new("hero");
        let mut log = MessageLog::new();
        assert_eq!(
            begin_fight(&mut c, EntityId(7), &mut log),
            EngageOutcome::Engaged
        );
        assert_eq!(c.fighting, Some(EntityId(7)));
        assert_eq!(
            begin_fight(&mut c, EntityId(8), &mut log),
            EngageOutcome::AlreadyFighting
        );
        assert_eq!(c.fighting, Some(EntityId(7)));
        assert_eq!(
            log.last_on(STATUS_ELEMENT).unwrap().message,
            "You are already doing the best you can!"
        );
    }

    #[test]
    fn test_begin_fight_refusals() {
        let mut log = MessageLog::new();

        let mut c = fighter();
        c.conditions = Condition::UNCONSCIOUS;
        assert_eq!(
            begin_fight(&mut c, EntityId(2), &mut log),
            EngageOutcome::Unconscious
        );

        let mut c = Character::new("ghost");
        c.conditions = Condition::DEAD;
        assert_eq!(
            begin_fight(&mut c, EntityId(2), &mut log),
            EngageOutcome::Dead
        );
        assert_eq!(c.fighting, None);
    }
}
