//! Heartbeat scheduler
//!
//! A single periodic tick drives every piece of time-based game logic. The
//! tick runs at the fast interval; slower work is gated on an accumulating
//! counter so that several cadences share one timer:
//!
//! | tier          | default | typical work                          |
//! |---------------|---------|---------------------------------------|
//! | command check | 100 ms  | drain the player command queue        |
//! | fast          | 50 ms   | every tick (dodge windows, cutscenes) |
//! | normal        | 2 s     | combat rounds, fast creatures         |
//! | slow          | 4 s     | town NPCs                             |
//! | slowest       | 8 s     | environment, wandering quest NPCs     |
//!
//! Tiers only line up if every interval is a multiple of the fast one, so the
//! configuration is checked once before the first tick and a bad
//! configuration aborts the scheduler for good.

use std::time::Duration;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    INTERVAL_COMMAND_CHECK, INTERVAL_FAST, INTERVAL_NORMAL, INTERVAL_SLOW, INTERVAL_SLOWEST,
};

/// Heartbeat cadence tiers, in firing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Tier {
    CommandCheck,
    Fast,
    Normal,
    Slow,
    Slowest,
}

impl Tier {
    pub const fn flag(&self) -> Tiers {
        match self {
            Tier::CommandCheck => Tiers::COMMAND_CHECK,
            Tier::Fast => Tiers::FAST,
            Tier::Normal => Tiers::NORMAL,
            Tier::Slow => Tiers::SLOW,
            Tier::Slowest => Tiers::SLOWEST,
        }
    }
}

bitflags! {
    /// Set of tiers that fire on one tick
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct Tiers: u8 {
        const COMMAND_CHECK = 0x01;
        const FAST = 0x02;
        const NORMAL = 0x04;
        const SLOW = 0x08;
        const SLOWEST = 0x10;
    }
}

impl Tiers {
    /// Tiers in this set, in firing order
    pub fn in_order(&self) -> impl Iterator<Item = Tier> + '_ {
        Tier::iter().filter(move |tier| self.contains(tier.flag()))
    }
}

/// Heartbeat intervals in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartbeatConfig {
    pub fast: u64,
    pub command_check: u64,
    pub normal: u64,
    pub slow: u64,
    pub slowest: u64,
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self {
            fast: INTERVAL_FAST,
            command_check: INTERVAL_COMMAND_CHECK,
            normal: INTERVAL_NORMAL,
            slow: INTERVAL_SLOW,
            slowest: INTERVAL_SLOWEST,
        }
    }
}

/// A single configuration problem
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("fast interval must be greater than zero")]
    ZeroFastInterval,

    #[error("fast interval ({fast} ms) must not exceed the {tier} interval ({interval} ms)")]
    FastNotSmallest { tier: Tier, interval: u64, fast: u64 },

    #[error("{tier} interval ({interval} ms) must be a multiple of the fast interval ({fast} ms)")]
    NotMultiple { tier: Tier, interval: u64, fast: u64 },
}

/// Every problem found by one configuration check
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
pub struct ConfigErrors(pub Vec<ConfigError>);

impl HeartbeatConfig {
    /// Interval for a tier
    pub const fn interval(&self, tier: Tier) -> u64 {
        match tier {
            Tier::CommandCheck => self.command_check,
            Tier::Fast => self.fast,
            Tier::Normal => self.normal,
            Tier::Slow => self.slow,
            Tier::Slowest => self.slowest,
        }
    }

    /// Tick period
    pub const fn period(&self) -> Duration {
        Duration::from_millis(self.fast)
    }

    /// Collect every configuration problem
    pub fn problems(&self) -> Vec<ConfigError> {
        let fast = self.fast;
        if fast == 0 {
            return vec![ConfigError::ZeroFastInterval];
        }

        let others = || Tier::iter().filter(|tier| *tier != Tier::Fast);
        let mut problems: Vec<ConfigError> = others()
            .filter(|tier| self.interval(*tier) < fast)
            .map(|tier| ConfigError::FastNotSmallest {
                tier,
                interval: self.interval(tier),
                fast,
            })
            .collect();

        problems.extend(
            others()
                .filter(|tier| self.interval(*tier) % fast != 0)
                .map(|tier| ConfigError::NotMultiple {
                    tier,
                    interval: self.interval(tier),
                    fast,
                }),
        );
        problems
    }

    /// Check the configuration
    pub fn validate(&self) -> Result<(), ConfigErrors> {
        let problems = self.problems();
        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigErrors(problems))
        }
    }

    /// Tiers due at `counter`. The fast tier is always due.
    pub fn due_tiers(&self, counter: u64) -> Tiers {
        let mut due = Tiers::FAST;
        for tier in [Tier::CommandCheck, Tier::Normal, Tier::Slow, Tier::Slowest] {
            let interval = self.interval(tier);
            if interval != 0 && counter % interval == 0 {
                due |= tier.flag();
            }
        }
        due
    }
}

/// Scheduler lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum SchedulerState {
    /// Created, configuration not yet checked
    Configuring,
    Running,
    /// Configuration check failed; terminal
    Aborted,
    /// Cancelled from outside; terminal
    Stopped,
}

/// Heartbeat errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HeartbeatError {
    #[error("heartbeat configuration rejected: {0}")]
    Config(#[from] ConfigErrors),

    #[error("heartbeat is {0}, not running")]
    NotRunning(SchedulerState),

    #[error("heartbeat already started (currently {0})")]
    AlreadyStarted(SchedulerState),
}

/// One heartbeat tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pulse {
    /// Counter value the tiers were gated on
    pub counter: u64,
    pub tiers: Tiers,
}

/// The heartbeat state machine
#[derive(Debug, Clone)]
pub struct Heartbeat {
    config: HeartbeatConfig,
    counter: u64,
    state: SchedulerState,
}

impl Heartbeat {
    pub fn new(config: HeartbeatConfig) -> Self {
        Self {
            config,
            counter: 0,
            state: SchedulerState::Configuring,
        }
    }

    pub fn config(&self) -> &HeartbeatConfig {
        &self.config
    }

    pub fn counter(&self) -> u64 {
        self.counter
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SchedulerState::Running
    }

    /// Run the configuration check and start ticking if it passes
    pub fn start(&mut self) -> Result<(), HeartbeatError> {
        if self.state != SchedulerState::Configuring {
            return Err(HeartbeatError::AlreadyStarted(self.state));
        }

        info!("performing heartbeat integrity checks");
        if let Err(errors) = self.config.validate() {
            for error in &errors.0 {
                warn!(%error, "heartbeat configuration error");
            }
            warn!("heartbeat configuration errors found, aborting");
            self.state = SchedulerState::Aborted;
            return Err(errors.into());
        }

        info!(period_ms = self.config.fast, "integrity checks passed, heartbeat running");
        self.state = SchedulerState::Running;
        Ok(())
    }

    /// Advance one tick and report which tiers fire
    pub fn tick(&mut self) -> Result<Pulse, HeartbeatError> {
        if self.state != SchedulerState::Running {
            return Err(HeartbeatError::NotRunning(self.state));
        }

        let counter = self.counter;
        let tiers = self.config.due_tiers(counter);
        self.counter = self.counter.wrapping_add(self.config.fast);
        debug!(counter, ?tiers, "heartbeat");
        Ok(Pulse { counter, tiers })
    }

    /// Cancel the heartbeat. An aborted heartbeat stays aborted.
    pub fn stop(&mut self) {
        if matches!(
            self.state,
            SchedulerState::Configuring | SchedulerState::Running
        ) {
            info!(counter = self.counter, "heartbeat stopped");
            self.state = SchedulerState::Stopped;
        }
    }
}
