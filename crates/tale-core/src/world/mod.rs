//! World state
//!
//! Heartbeat scheduling and game options.

pub mod heartbeat;
pub mod options;

pub use heartbeat::{
    ConfigError, ConfigErrors, Heartbeat, HeartbeatConfig, HeartbeatError, Pulse, SchedulerState,
    Tier, Tiers,
};
pub use options::{GameOptions, OptionsError};
