//! Game options and configuration
//!
//! Options come from an rc file with one or more `OPTIONS=` lines holding
//! comma-separated entries. Entries are either `key:value` (or `key=value`)
//! pairs or boolean flags, negated with a leading `!` or `no`. The player
//! name may contain commas, so it also has a line of its own:
//!
//! ```text
//! # tale configuration file
//! NAME=Ash, the Bold
//! OPTIONS=!color,msghistory:200
//! OPTIONS=fast_interval:50,command_interval:100
//! OPTIONS=normal_interval:2000,slow_interval:4000,slowest_interval:8000
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::heartbeat::HeartbeatConfig;
use crate::DEFAULT_MSG_HISTORY;

/// Options that only make sense with a value
const VALUED_OPTIONS: [&str; 7] = [
    "name",
    "msghistory",
    "fast_interval",
    "command_interval",
    "normal_interval",
    "slow_interval",
    "slowest_interval",
];

/// User-configurable game options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOptions {
    /// Player character name
    pub name: String,

    /// Render status lines in color
    pub color: bool,

    /// Number of messages kept in the message history
    pub msg_history: usize,

    /// Heartbeat intervals
    pub heartbeat: HeartbeatConfig,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            name: String::new(),
            color: true,
            msg_history: DEFAULT_MSG_HISTORY,
            heartbeat: HeartbeatConfig::default(),
        }
    }
}

/// Options parsing error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionsError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Invalid value '{1}' for option '{0}'")]
    InvalidValue(String, String),

    #[error("Missing value for option '{0}'")]
    MissingValue(String),
}

impl GameOptions {
    /// Load options from a file
    pub fn load_from_file(path: &Path) -> Result<Self, OptionsError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| OptionsError::IoError(e.to_string()))?;

        Self::parse_config(&contents)
    }

    /// Parse options from a config string
    pub fn parse_config(contents: &str) -> Result<Self, OptionsError> {
        let mut options = Self::default();

        for line in contents.lines() {
            let line = line.trim();

            // Skip comments and empty lines
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(name) = line.strip_prefix("NAME=") {
                options.set_option("name", name.trim())?;
            } else if let Some(opts) = line.strip_prefix("OPTIONS=") {
                for opt in opts.split(',') {
                    let opt = opt.trim();
                    if !opt.is_empty() {
                        options.parse_option(opt)?;
                    }
                }
            }
        }

        Ok(options)
    }

    /// Parse a single option
    fn parse_option(&mut self, opt: &str) -> Result<(), OptionsError> {
        // Handle key=value options
        if let Some((key, value)) = opt.split_once(':') {
            return self.set_option(key.trim(), value.trim());
        }
        if let Some((key, value)) = opt.split_once('=') {
            return self.set_option(key.trim(), value.trim());
        }

        if VALUED_OPTIONS.contains(&opt) {
            return Err(OptionsError::MissingValue(opt.to_string()));
        }

        // Handle negation
        let (negated, name) = if let Some(name) = opt.strip_prefix('!') {
            (true, name)
        } else if let Some(name) = opt.strip_prefix("no") {
            (true, name)
        } else {
            (false, opt)
        };

        self.set_bool_option(name, !negated)
    }

    /// Set a boolean option
    fn set_bool_option(&mut self, name: &str, value: bool) -> Result<(), OptionsError> {
        match name {
            "color" | "colour" => self.color = value,
            _ => return Err(OptionsError::UnknownOption(name.to_string())),
        }
        Ok(())
    }

    /// Set an option with a value
    fn set_option(&mut self, name: &str, value: &str) -> Result<(), OptionsError> {
        if value.is_empty() {
            return Err(OptionsError::MissingValue(name.to_string()));
        }

        let invalid = || OptionsError::InvalidValue(name.to_string(), value.to_string());
        let interval = || value.parse::<u64>().map_err(|_| invalid());

        match name {
            "name" => self.name = value.to_string(),
            "color" | "colour" => {
                let on = match value.to_ascii_lowercase().as_str() {
                    "true" | "yes" | "on" => true,
                    "false" | "no" | "off" => false,
                    _ => return Err(invalid()),
                };
                self.set_bool_option(name, on)?;
            }
            "msghistory" => self.msg_history = value.parse().map_err(|_| invalid())?,
            "fast_interval" => self.heartbeat.fast = interval()?,
            "command_interval" => self.heartbeat.command_check = interval()?,
            "normal_interval" => self.heartbeat.normal = interval()?,
            "slow_interval" => self.heartbeat.slow = interval()?,
            "slowest_interval" => self.heartbeat.slowest = interval()?,
            _ => return Err(OptionsError::UnknownOption(name.to_string())),
        }
        Ok(())
    }

    /// Save options to a file
    pub fn save_to_file(&self, path: &Path) -> Result<(), OptionsError> {
        let contents = self.to_config_string();
        std::fs::write(path, contents).map_err(|e| OptionsError::IoError(e.to_string()))
    }

    /// Convert options to config file format
    pub fn to_config_string(&self) -> String {
        let mut lines = Vec::new();
        lines.push("# tale configuration file".to_string());
        lines.push(String::new());

        if !self.name.is_empty() {
            lines.push(format!("NAME={}", self.name));
        }
        lines.push(format!(
            "OPTIONS={},msghistory:{}",
            if self.color { "color" } else { "!color" },
            self.msg_history
        ));

        lines.push(String::new());
        lines.push("# Heartbeat intervals (milliseconds)".to_string());
        let hb = &self.heartbeat;
        lines.push(format!(
            "OPTIONS=fast_interval:{},command_interval:{}",
            hb.fast, hb.command_check
        ));
        lines.push(format!(
            "OPTIONS=normal_interval:{},slow_interval:{},slowest_interval:{}",
            hb.normal, hb.slow, hb.slowest
        ));

        lines.join("\n")
    }
}
