//! Window collaborator.
//!
//! Owns the native event loop, the window, and the presentation surface.
//! The core sees it only through narrow capabilities: a raw-event pump for
//! the classifier, `should_run` for the loop driver, and `PresentTarget`
//! for the compositor's buffer copy.

mod runtime;

pub use runtime::{PlatformWindow, WindowConfig};
