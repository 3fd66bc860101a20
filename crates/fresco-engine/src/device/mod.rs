//! Presentation device layer.
//!
//! Responsibilities:
//! - acquire the wgpu instance/adapter/device/queue for a window surface
//! - configure the surface and recover from transient surface errors
//! - copy finished CPU frames to the visible surface ([`FrameBlitter`])
//!
//! No drawing happens here; the back buffer arrives fully composited.

mod blit;
mod gpu;

pub use blit::FrameBlitter;
pub use gpu::{Gpu, GpuFrame, SurfaceErrorAction};
