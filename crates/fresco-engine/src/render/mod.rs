//! CPU compositing subsystem.
//!
//! The canvas rasterizes scene shapes into an owned back buffer and hands the
//! finished buffer to a [`PresentTarget`] for the copy to the visible
//! surface. All drawing is CPU-side; the target only ever sees whole frames.
//!
//! Convention:
//! - coordinates are logical pixels, top-left origin, +Y down
//! - writes outside the buffer are silently discarded

mod buffer;
mod canvas;
mod target;

pub mod shapes;

pub use buffer::PixelBuffer;
pub use canvas::Canvas;
pub use target::PresentTarget;
