//! Command slot table
//!
//! The player picks actions from a fixed row of numbered slots. Each slot is
//! bound once at startup to an action and a label; the label is pushed to the
//! presenter so the host can show it on the matching button or key.

use thiserror::Error;
use tracing::debug;

use super::Direction;
use super::movement::do_move;
use crate::gameloop::GameState;
use crate::output::{Color, Presenter};
use crate::{NUMBER_OF_COMMAND_SLOTS, STATUS_ELEMENT};

/// Action run when a slot is dispatched
pub type CommandAction = Box<dyn FnMut(&mut GameState)>;

/// Command table errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("command slot {0} is out of range (0..{max})", max = NUMBER_OF_COMMAND_SLOTS)]
    SlotOutOfRange(usize),

    #[error("command slot {0} is not bound")]
    SlotUnbound(usize),
}

struct Binding {
    label: String,
    action: CommandAction,
}

/// Fixed-size table of command slots
#[derive(Default)]
pub struct CommandTable {
    slots: [Option<Binding>; NUMBER_OF_COMMAND_SLOTS],
}

impl core::fmt::Debug for CommandTable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list()
            .entries(self.slots.iter().map(|s| s.as_ref().map(|b| b.label.as_str())))
            .finish()
    }
}

impl CommandTable {
    /// Create a table with every slot unbound
    pub fn new() -> Self {
        Self::default()
    }

    fn check_range(slot: usize) -> Result<(), CommandError> {
        if slot < NUMBER_OF_COMMAND_SLOTS {
            Ok(())
        } else {
            Err(CommandError::SlotOutOfRange(slot))
        }
    }

    /// Bind `slot` to `action` and publish its label
    pub fn assign<P>(
        &mut self,
        slot: usize,
        label: &str,
        action: CommandAction,
        out: &mut P,
    ) -> Result<(), CommandError>
    where
        P: Presenter + ?Sized,
    {
        Self::check_range(slot)?;
        self.slots[slot] = Some(Binding {
            label: label.to_string(),
            action,
        });
        out.label_command(slot, label);
        Ok(())
    }

    /// Run the action bound to `slot`
    pub fn dispatch(&mut self, slot: usize, state: &mut GameState) -> Result<(), CommandError> {
        let binding = self.binding_mut(slot)?;
        debug!(slot, label = %binding.label, "dispatching command");
        (binding.action)(state);
        Ok(())
    }

    /// Check that `slot` can be dispatched
    pub fn ensure_bound(&self, slot: usize) -> Result<(), CommandError> {
        Self::check_range(slot)?;
        match self.slots[slot] {
            Some(_) => Ok(()),
            None => Err(CommandError::SlotUnbound(slot)),
        }
    }

    fn binding_mut(&mut self, slot: usize) -> Result<&mut Binding, CommandError> {
        Self::check_range(slot)?;
        self.slots[slot]
            .as_mut()
            .ok_or(CommandError::SlotUnbound(slot))
    }

    /// Label of a bound slot
    pub fn label(&self, slot: usize) -> Option<&str> {
        self.slots.get(slot)?.as_ref().map(|b| b.label.as_str())
    }

    /// Find a slot by its label, ignoring case
    pub fn slot_for_label(&self, label: &str) -> Option<usize> {
        self.slots.iter().position(|s| {
            s.as_ref()
                .is_some_and(|b| b.label.eq_ignore_ascii_case(label))
        })
    }

    /// Labels of all slots, `None` where unbound
    pub fn labels(&self) -> Vec<Option<&str>> {
        self.slots
            .iter()
            .map(|s| s.as_ref().map(|b| b.label.as_str()))
            .collect()
    }

    /// Bind the standard eight commands
    pub fn install_defaults<P>(&mut self, out: &mut P) -> Result<(), CommandError>
    where
        P: Presenter + ?Sized,
    {
        self.assign(0, "Look", Box::new(command_look), out)?;
        self.assign(1, "North", Box::new(move_command(Direction::North)), out)?;
        self.assign(2, "East", Box::new(move_command(Direction::East)), out)?;
        self.assign(3, "South", Box::new(move_command(Direction::South)), out)?;
        self.assign(4, "West", Box::new(move_command(Direction::West)), out)?;
        self.assign(5, "Up", Box::new(move_command(Direction::Up)), out)?;
        self.assign(6, "Down", Box::new(move_command(Direction::Down)), out)?;
        self.assign(7, "Inventory", Box::new(command_inventory), out)?;
        Ok(())
    }
}

/// Describe where the player is standing
pub fn command_look(state: &mut GameState) {
    let msg = format!(
        "You are standing at {}. There is nothing of interest here.",
        state.player.position
    );
    state.log.send(STATUS_ELEMENT, &msg, Some(Color::Blue));
}

/// List what the player is carrying
pub fn command_inventory(state: &mut GameState) {
    let msg = if state.player.inventory.is_empty() {
        "You are carrying nothing.".to_string()
    } else {
        format!("You are carrying: {}.", state.player.inventory.join(", "))
    };
    state.log.send(STATUS_ELEMENT, &msg, Some(Color::Blue));
}

/// Build a command that moves the player one step
pub fn move_command(direction: Direction) -> impl FnMut(&mut GameState) {
    move |state: &mut GameState| {
        // Failures are already reported to the log
        let _ = do_move(&mut state.player, direction, &mut state.log);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::MessageLog;
    use crate::player::Position;

    fn defaults() -> (CommandTable, GameState) {
        let mut table = CommandTable::new();
        let mut state = GameState::new("tester");
        table.install_defaults(&mut state.log).unwrap();
        (table, state)
    }

    #[test]
    fn test_default_labels() {
        let (table, mut state) = defaults();
        assert_eq!(
            table.labels(),
            vec![
                Some("Look"),
                Some("North"),
                Some("East"),
                Some("South"),
                Some("West"),
                Some("Up"),
                Some("Down"),
                Some("Inventory"),
            ]
        );
        let published = state.log.drain_labels();
        assert_eq!(published.len(), 8);
        assert_eq!(published[5].slot, 5);
        assert_eq!(published[5].label, "Up");
    }

    #[test]
    fn test_dispatch_moves_player() {
        let (mut table, mut state) = defaults();
        table.dispatch(1, &mut state).unwrap();
        table.dispatch(2, &mut state).unwrap();
        table.dispatch(5, &mut state).unwrap();
        assert_eq!(state.player.position, Position::new(1, 1, 1));
        table.dispatch(3, &mut state).unwrap();
        table.dispatch(4, &mut state).unwrap();
        table.dispatch(6, &mut state).unwrap();
        assert_eq!(state.player.position, Position::ORIGIN);
    }

    #[test]
    fn test_dispatch_out_of_range() {
        let (mut table, mut state) = defaults();
        assert_eq!(
            table.dispatch(8, &mut state),
            Err(CommandError::SlotOutOfRange(8))
        );
    }

    #[test]
    fn test_dispatch_unbound() {
        let mut table = CommandTable::new();
        let mut state = GameState::new("tester");
        assert_eq!(
            table.dispatch(3, &mut state),
            Err(CommandError::SlotUnbound(3))
        );
        assert_eq!(table.ensure_bound(3), Err(CommandError::SlotUnbound(3)));
    }

    #[test]
    fn test_assign_out_of_range() {
        let mut table = CommandTable::new();
        let mut log = MessageLog::new();
        let result = table.assign(12, "Nope", Box::new(command_look), &mut log);
        assert_eq!(result, Err(CommandError::SlotOutOfRange(12)));
        assert!(log.drain_labels().is_empty());
    }

    #[test]
    fn test_custom_closure() {
        let mut table = CommandTable::new();
        let mut state = GameState::new("tester");
        table
            .assign(
                2,
                "Rest",
                Box::new(|state: &mut GameState| state.player.stamina_points.current += 1),
                &mut state.log,
            )
            .unwrap();
        state.player.stamina_points.current = 5;
        table.dispatch(2, &mut state).unwrap();
        assert_eq!(state.player.stamina_points.current, 6);
    }

    #[test]
    fn test_look_and_inventory() {
        let (mut table, mut state) = defaults();
        table.dispatch(0, &mut state).unwrap();
        let line = state.log.drain().pop().unwrap();
        assert!(line.message.contains("(0, 0, 0)"));
        assert_eq!(line.color, Some(Color::Blue));

        table.dispatch(7, &mut state).unwrap();
        let line = state.log.drain().pop().unwrap();
        assert_eq!(line.message, "You are carrying: item 1, item 2, item 3.");

        state.player.inventory.clear();
        table.dispatch(7, &mut state).unwrap();
        let line = state.log.drain().pop().unwrap();
        assert_eq!(line.message, "You are carrying nothing.");
    }

    #[test]
    fn test_slot_for_label() {
        let (table, _) = defaults();
        assert_eq!(table.slot_for_label("north"), Some(1));
        assert_eq!(table.slot_for_label("INVENTORY"), Some(7));
        assert_eq!(table.slot_for_label("dance"), None);
        assert_eq!(table.label(9), None);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            CommandError::SlotOutOfRange(9).to_string(),
            "command slot 9 is out of range (0..8)"
        );
        assert_eq!(
            CommandError::SlotUnbound(4).to_string(),
            "command slot 4 is not bound"
        );
    }
}
