//! Player characters
//!
//! Character data and the condition bit vector.

mod character;
pub mod condition;

pub use character::{Character, EntityId, Pool, Position};
pub use condition::{Condition, check_bit, remove_bit, set_bit};
