//! Presentation seam
//!
//! The core never draws anything itself. Status text and command labels are
//! handed to a [`Presenter`], which the host implements (a terminal, a web
//! page, a test recorder). [`MessageLog`] is the buffering presenter the
//! engine owns; hosts drain it after each pulse.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use strum::{Display, IntoStaticStr};

/// Display color for a status line
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum Color {
    #[default]
    Black,
    Blue,
    Orange,
    Red,
}

/// One message sent to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusLine {
    /// Element the message is written to
    pub element: String,
    pub message: String,
    /// Requested color; `None` renders in the default color
    pub color: Option<Color>,
}

impl StatusLine {
    pub fn new(element: &str, message: impl Into<String>, color: Option<Color>) -> Self {
        Self {
            element: element.to_string(),
            message: message.into(),
            color,
        }
    }

    /// Color to render with, falling back to the default
    pub fn effective_color(&self) -> Color {
        self.color.unwrap_or_default()
    }
}

/// A command label update for the slot picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelUpdate {
    pub slot: usize,
    pub label: String,
}

/// Write-only presentation layer
pub trait Presenter {
    /// Show a message on the given element
    fn send(&mut self, element: &str, message: &str, color: Option<Color>);

    /// Update the visible label of a command slot
    fn label_command(&mut self, slot: usize, label: &str);
}

/// Buffering presenter with a bounded history
#[derive(Debug, Clone)]
pub struct MessageLog {
    pending: Vec<StatusLine>,
    history: VecDeque<StatusLine>,
    history_limit: usize,
    labels: Vec<LabelUpdate>,
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::with_history_limit(crate::DEFAULT_MSG_HISTORY)
    }
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a log that keeps at most `limit` messages of history
    pub fn with_history_limit(limit: usize) -> Self {
        Self {
            pending: Vec::new(),
            history: VecDeque::with_capacity(limit.min(crate::DEFAULT_MSG_HISTORY)),
            history_limit: limit,
            labels: Vec::new(),
        }
    }

    pub fn history_limit(&self) -> usize {
        self.history_limit
    }

    /// Messages not yet drained by the host
    pub fn pending(&self) -> &[StatusLine] {
        &self.pending
    }

    /// The most recent messages, oldest first
    pub fn history(&self) -> &VecDeque<StatusLine> {
        &self.history
    }

    /// Take the pending messages, leaving history intact
    pub fn drain(&mut self) -> Vec<StatusLine> {
        std::mem::take(&mut self.pending)
    }

    /// Take the pending label updates
    pub fn drain_labels(&mut self) -> Vec<LabelUpdate> {
        std::mem::take(&mut self.labels)
    }

    /// Most recent message written to `element`
    pub fn last_on(&self, element: &str) -> Option<&StatusLine> {
        self.history.iter().rev().find(|line| line.element == element)
    }
}

impl Presenter for MessageLog {
    fn send(&mut self, element: &str, message: &str, color: Option<Color>) {
        let line = StatusLine::new(element, message, color);
        if self.history_limit > 0 {
            if self.history.len() == self.history_limit {
                self.history.pop_front();
            }
            self.history.push_back(line.clone());
        }
        self.pending.push(line);
    }

    fn label_command(&mut self, slot: usize, label: &str) {
        self.labels.push(LabelUpdate {
            slot,
            label: label.to_string(),
        });
    }
}
