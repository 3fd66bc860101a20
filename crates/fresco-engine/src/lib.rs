//! Fresco engine crate.
//!
//! A retained-mode 2D canvas with a frame-gated game loop over a native
//! window: draw commands are remembered in an id-addressable scene,
//! recomposited into an off-screen buffer, and copied to the visible
//! surface on demand.

pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
pub mod time;
pub mod window;
