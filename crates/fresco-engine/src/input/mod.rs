//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! The window runtime translates native events into [`RawInput`] records;
//! the [`EventPoller`] dequeues and classifies them one at a time into the
//! closed [`EventKind`] set.

mod poller;
mod types;

pub use poller::{Event, EventKind, EventPoller};
pub use types::{Key, MouseButton, RawInput};
