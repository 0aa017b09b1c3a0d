//! Terminal host for the item collection client.
//!
//! Supplies the real network I/O (`UreqTransport`) and a text rendering of
//! the view state; all state transitions live in `item-core`.

pub mod commands;
pub mod render;
pub mod transport;

pub use commands::{run, Command, CommandError, View};
pub use transport::UreqTransport;
