//! Game constants

/// Number of command slots exposed to the player
pub const NUMBER_OF_COMMAND_SLOTS: usize = 8;

/// Starting hit points for a new character
pub const STARTING_HIT_POINTS: i32 = 20;

/// Starting mana points for a new character
pub const STARTING_MANA_POINTS: i32 = 10;

/// Starting stamina points for a new character
pub const STARTING_STAMINA_POINTS: i32 = 10;

/// Items every new character carries
pub const STARTING_INVENTORY: [&str; 3] = ["item 1", "item 2", "item 3"];

/// Damage dealt by one placeholder battle round
pub const BATTLE_ROUND_DAMAGE: i32 = 1;

/// Hit points at or below which a character dies
pub const DEATH_THRESHOLD: i32 = -10;

// Heartbeat intervals, in milliseconds.
// The fast interval must be the smallest, and every other interval a multiple of it.

/// Fastest animation checks; also the heartbeat period
pub const INTERVAL_FAST: u64 = 50;

/// How often the player command queue is checked
pub const INTERVAL_COMMAND_CHECK: u64 = 100;

/// Normal animation checks (fast creatures, combat rounds)
pub const INTERVAL_NORMAL: u64 = 2000;

/// Slow animation checks (town NPCs)
pub const INTERVAL_SLOW: u64 = 4000;

/// Slowest checks (environmental effects, wandering quest NPCs)
pub const INTERVAL_SLOWEST: u64 = 8000;

/// Messages kept in the message history by default
pub const DEFAULT_MSG_HISTORY: usize = 200;

/// Presenter element for general status messages
pub const STATUS_ELEMENT: &str = "status";

/// Presenter element for the combat line
pub const COMBAT_ELEMENT: &str = "combat";
