//! Status line rendering

use crossterm::style::{Color as TermColor, Stylize};
use tale_core::output::{Color, LabelUpdate, StatusLine};

/// Terminal color for a status color. Black is the terminal's own default.
pub const fn term_color(color: Color) -> TermColor {
    match color {
        Color::Black => TermColor::Reset,
        Color::Blue => TermColor::Blue,
        Color::Orange => TermColor::Rgb {
            r: 255,
            g: 165,
            b: 0,
        },
        Color::Red => TermColor::Red,
    }
}

/// Formats engine output for the terminal
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    pub color: bool,
}

impl Printer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Render one status line as `[element] message`
    pub fn line(&self, line: &StatusLine) -> String {
        let text = format!("[{}] {}", line.element, line.message);
        match line.color {
            Some(color) if self.color && color != Color::Black => {
                text.with(term_color(color)).to_string()
            }
            _ => text,
        }
    }

    /// Render the command bar from label updates
    pub fn labels(&self, labels: &[LabelUpdate]) -> String {
        labels
            .iter()
            .map(|l| {
                let slot = l.slot.to_string();
                let slot = if self.color { slot.bold().to_string() } else { slot };
                format!("{}:{}", slot, l.label)
            })
            .collect::<Vec<_>>()
            .join("  ")
    }
}
