//! Input module - semantic commands and the keyboard router.

mod commands;
mod plugin;
mod router;

pub use commands::{Command, InputContext};
pub use plugin::InputPlugin;
pub use router::{context_for, route};
