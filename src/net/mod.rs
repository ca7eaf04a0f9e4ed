//! Net module - the optional bidirectional remote service channel.

mod link;
mod messages;
mod plugin;

pub use link::{RemoteEndpoint, RemoteLink};
pub use messages::{Directive, StatusReport};
pub use plugin::NetPlugin;
