//! Main game loop
//!
//! [`Engine`] owns everything the heartbeat touches: the game state, the
//! command table and queue, the scheduler and any tier hooks. The host calls
//! [`Engine::start`] once and then [`Engine::pulse`] every fast interval;
//! player input goes through [`Engine::enqueue`] (executed on the next
//! command check) or [`Engine::dispatch`] (executed immediately).

use std::collections::VecDeque;

use thiserror::Error;
use tracing::{info, warn};

use crate::STATUS_ELEMENT;
use crate::action::commands::{CommandError, CommandTable};
use crate::action::movement::{MoveError, do_move_code};
use crate::combat::{EngageOutcome, RoundOutcome, begin_fight, resolve_battle_round};
use crate::output::{Color, LabelUpdate, MessageLog, Presenter, StatusLine};
use crate::player::{Character, EntityId, Position};
use crate::world::{GameOptions, Heartbeat, HeartbeatConfig, HeartbeatError, Tier, Tiers};

/// Work registered on a heartbeat tier
pub type TierHook = Box<dyn FnMut(&mut GameState)>;

/// Main game state
#[derive(Debug, Clone, Default)]
pub struct GameState {
    /// Player character
    pub player: Character,

    /// Messages for the presentation layer
    pub log: MessageLog,
}

impl GameState {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            player: Character::new(name),
            log: MessageLog::new(),
        }
    }

    /// Add a status message
    pub fn message(&mut self, msg: &str, color: Option<Color>) {
        self.log.send(STATUS_ELEMENT, msg, color);
    }
}

/// Engine errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error(transparent)]
    Heartbeat(#[from] HeartbeatError),

    #[error(transparent)]
    Command(#[from] CommandError),
}

/// What happened on one pulse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseReport {
    /// Heartbeat counter the tiers were gated on
    pub counter: u64,
    pub tiers: Tiers,
    /// Slot dispatched from the command queue
    pub command: Option<usize>,
    /// Battle round resolved on the normal tier
    pub battle: Option<RoundOutcome>,
}

/// The engine context
pub struct Engine {
    state: GameState,
    commands: CommandTable,
    queue: VecDeque<usize>,
    heartbeat: Heartbeat,
    hooks: Vec<(Tier, TierHook)>,
}

impl core::fmt::Debug for Engine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Engine")
            .field("state", &self.state)
            .field("commands", &self.commands)
            .field("queue", &self.queue)
            .field("heartbeat", &self.heartbeat)
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

impl Engine {
    /// Create an engine from game options
    pub fn new(options: &GameOptions) -> Self {
        let state = GameState {
            player: Character::new(options.name.clone()),
            log: MessageLog::with_history_limit(options.msg_history),
        };
        Self::with_state(state, options.heartbeat)
    }

    /// Create an engine around an existing state
    pub fn with_state(state: GameState, config: HeartbeatConfig) -> Self {
        Self {
            state,
            commands: CommandTable::new(),
            queue: VecDeque::new(),
            heartbeat: Heartbeat::new(config),
            hooks: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn player(&self) -> &Character {
        &self.state.player
    }

    pub fn commands(&self) -> &CommandTable {
        &self.commands
    }

    pub fn heartbeat(&self) -> &Heartbeat {
        &self.heartbeat
    }

    /// Slots waiting for the next command check
    pub fn queued(&self) -> impl Iterator<Item = usize> + '_ {
        self.queue.iter().copied()
    }

    /// Check the configuration, then bind the default commands.
    ///
    /// A bad configuration is reported to the log and leaves the heartbeat
    /// aborted; no pulse will ever run.
    pub fn start(&mut self) -> Result<(), EngineError> {
        if let Err(err) = self.heartbeat.start() {
            if let HeartbeatError::Config(errors) = &err {
                for error in &errors.0 {
                    self.state.message(&format!("ERROR: {}", error), Some(Color::Red));
                }
                self.state
                    .message("Configuration errors found; aborting.", Some(Color::Red));
            }
            return Err(err.into());
        }

        self.commands.install_defaults(&mut self.state.log)?;
        info!(name = %self.state.player.name, "engine started");
        Ok(())
    }

    /// Cancel the heartbeat
    pub fn stop(&mut self) {
        self.heartbeat.stop();
    }

    /// Register work on a tier. Hooks run after the tier's built-in work,
    /// in registration order.
    pub fn on_tier(&mut self, tier: Tier, hook: TierHook) {
        self.hooks.push((tier, hook));
    }

    /// Run one heartbeat tick
    pub fn pulse(&mut self) -> Result<PulseReport, HeartbeatError> {
        let pulse = self.heartbeat.tick()?;
        let mut report = PulseReport {
            counter: pulse.counter,
            tiers: pulse.tiers,
            command: None,
            battle: None,
        };

        for tier in pulse.tiers.in_order() {
            match tier {
                Tier::CommandCheck => report.command = self.check_commands(),
                Tier::Normal => {
                    if self.state.player.is_fighting() {
                        report.battle = Some(resolve_battle_round(
                            &mut self.state.player,
                            &mut self.state.log,
                        ));
                    }
                }
                Tier::Fast | Tier::Slow | Tier::Slowest => {}
            }

            for (_, hook) in self.hooks.iter_mut().filter(|(t, _)| *t == tier) {
                hook(&mut self.state);
            }
        }

        Ok(report)
    }

    /// Dispatch at most one queued command
    fn check_commands(&mut self) -> Option<usize> {
        let slot = self.queue.pop_front()?;
        if let Err(error) = self.commands.dispatch(slot, &mut self.state) {
            warn!(slot, %error, "queued command failed");
        }
        Some(slot)
    }

    /// Run a command slot immediately
    pub fn dispatch(&mut self, slot: usize) -> Result<(), CommandError> {
        self.commands.dispatch(slot, &mut self.state)
    }

    /// Queue a command slot for the next command check
    pub fn enqueue(&mut self, slot: usize) -> Result<(), CommandError> {
        if let Err(error) = self.commands.ensure_bound(slot) {
            warn!(slot, %error, "rejected command");
            return Err(error);
        }
        self.queue.push_back(slot);
        Ok(())
    }

    /// Start a fight with `opponent`
    pub fn attack(&mut self, opponent: EntityId) -> EngageOutcome {
        begin_fight(&mut self.state.player, opponent, &mut self.state.log)
    }

    /// Move the player using a raw direction code
    pub fn move_code(&mut self, code: i32) -> Result<Position, MoveError> {
        do_move_code(&mut self.state.player, code, &mut self.state.log)
    }

    /// Take pending status messages
    pub fn drain_messages(&mut self) -> Vec<StatusLine> {
        self.state.log.drain()
    }

    /// Take pending command label updates
    pub fn drain_labels(&mut self) -> Vec<LabelUpdate> {
        self.state.log.drain_labels()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::SchedulerState;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn started() -> Engine {
        let mut engine = Engine::new(&GameOptions::default());
        engine.start().unwrap();
        engine
    }

    #[test]
    fn test_start_binds_commands() {
        let mut engine = started();
        assert_eq!(engine.heartbeat().state(), SchedulerState::Running);
        assert_eq!(engine.commands().label(0), Some("Look"));
        assert_eq!(engine.drain_labels().len(), 8);
    }

    #[test]
    fn test_bad_config_aborts_before_binding() {
        let mut options = GameOptions::default();
        options.heartbeat.fast = 200;
        options.heartbeat.normal = 150;
        let mut engine = Engine::new(&options);

        let result = engine.start();
        assert!(matches!(
            result,
            Err(EngineError::Heartbeat(HeartbeatError::Config(_)))
        ));
        assert_eq!(engine.heartbeat().state(), SchedulerState::Aborted);
        assert_eq!(engine.commands().label(0), None);
        assert!(engine.pulse().is_err());

        let messages = engine.drain_messages();
        assert!(messages.iter().all(|l| l.color == Some(Color::Red)));
        assert_eq!(
            messages.last().unwrap().message,
            "Configuration errors found; aborting."
        );
    }

    #[test]
    fn test_queue_drains_one_per_command_check() {
        let mut engine = started();
        engine.enqueue(1).unwrap();
        engine.enqueue(2).unwrap();

        // counter 0: command check
        let report = engine.pulse().unwrap();
        assert_eq!(report.command, Some(1));
        assert_eq!(engine.player().position, Position::new(0, 1, 0));

        // counter 50: fast only
        let report = engine.pulse().unwrap();
        assert_eq!(report.command, None);

        // counter 100: command check
        let report = engine.pulse().unwrap();
        assert_eq!(report.command, Some(2));
        assert_eq!(engine.player().position, Position::new(1, 1, 0));
        assert_eq!(engine.queued().count(), 0);
    }

    #[test]
    fn test_enqueue_rejects_bad_slots() {
        let mut engine = started();
        assert_eq!(engine.enqueue(8), Err(CommandError::SlotOutOfRange(8)));

        let mut idle = Engine::new(&GameOptions::default());
        assert_eq!(idle.enqueue(0), Err(CommandError::SlotUnbound(0)));
        assert_eq!(idle.dispatch(0), Err(CommandError::SlotUnbound(0)));
    }

    #[test]
    fn test_battle_on_normal_tier_only() {
        let mut engine = started();
        assert_eq!(
            engine.attack(EntityId::TRAINING_DUMMY),
            EngageOutcome::Engaged
        );

        let report = engine.pulse().unwrap(); // counter 0
        assert_eq!(report.battle, Some(RoundOutcome::Miss));
        for _ in 1..40 {
            let report = engine.pulse().unwrap();
            assert_eq!(report.battle, None);
        }
        let report = engine.pulse().unwrap(); // counter 2000
        assert_eq!(report.counter, 2000);
        assert_eq!(report.battle, Some(RoundOutcome::Miss));
        assert_eq!(engine.player().hit_points.current, 18);
    }

    #[test]
    fn test_hooks_run_in_tier_order() {
        let mut engine = started();
        let seen = Rc::new(RefCell::new(Vec::new()));
        for tier in [Tier::Slowest, Tier::Fast, Tier::Normal, Tier::CommandCheck, Tier::Slow] {
            let seen = Rc::clone(&seen);
            engine.on_tier(tier, Box::new(move |_| seen.borrow_mut().push(tier)));
        }

        engine.pulse().unwrap();
        assert_eq!(
            *seen.borrow(),
            vec![
                Tier::CommandCheck,
                Tier::Fast,
                Tier::Normal,
                Tier::Slow,
                Tier::Slowest
            ]
        );

        seen.borrow_mut().clear();
        engine.pulse().unwrap(); // counter 50
        assert_eq!(*seen.borrow(), vec![Tier::Fast]);
    }

    #[test]
    fn test_stop_ends_pulses() {
        let mut engine = started();
        engine.pulse().unwrap();
        engine.stop();
        assert_eq!(
            engine.pulse(),
            Err(HeartbeatError::NotRunning(SchedulerState::Stopped))
        );
    }

    #[test]
    fn test_history_follows_options() {
        let options = GameOptions {
            msg_history: 4,
            ..GameOptions::default()
        };
        let mut engine = Engine::new(&options);
        engine.start().unwrap();
        for _ in 0..10 {
            engine.dispatch(0).unwrap();
        }
        assert_eq!(engine.state().log.history().len(), 4);
        assert_eq!(engine.drain_messages().len(), 10);
    }

    #[test]
    fn test_move_code() {
        let mut engine = started();
        assert_eq!(engine.move_code(9), Ok(Position::new(0, 0, 1)));
        assert_eq!(engine.move_code(999), Err(MoveError::InvalidDirection(999)));
        assert_eq!(engine.player().position, Position::new(0, 0, 1));
    }
}
