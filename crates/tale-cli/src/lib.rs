//! tale-cli: Terminal front end
//!
//! Line-based input, colored status output and config file lookup for the
//! `tale` binary.

pub mod config;
pub mod display;
pub mod input;
pub mod session;

pub use config::{default_config_path, load_options};
pub use display::Printer;
pub use input::{Input, InputError, parse_input};
pub use session::TickBudget;
