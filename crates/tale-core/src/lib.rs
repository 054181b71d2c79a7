//! tale-core: Core game logic for the tale text adventure engine
//!
//! This crate contains all game logic with no terminal I/O. Everything the
//! player sees goes through the [`output::Presenter`] seam, and all time-based
//! work is driven by [`Engine::pulse`], which the host calls at the fast
//! heartbeat cadence.

pub mod action;
pub mod combat;
pub mod output;
pub mod player;
pub mod world;

mod consts;
mod gameloop;

pub use consts::*;
pub use gameloop::{Engine, EngineError, GameState, PulseReport, TierHook};
