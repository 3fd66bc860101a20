//! Loop driver and the contracts it drives.
//!
//! [`Game`] owns the window collaborator, the canvas, and the classifier,
//! and sequences them through one cooperative single-threaded tick:
//! drain pending events, decide exit, gate on elapsed time, update game
//! objects, composite and present, idle briefly.

mod game;
mod object;

pub use game::{EventHandler, Game};
pub use object::{GameObject, SharedGameObject};
