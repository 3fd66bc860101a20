use anyhow::Result;

use super::buffer::PixelBuffer;

/// Destination for a finished frame.
///
/// The canvas never touches the visible surface directly; it hands whole
/// frames to whatever implements this. The window collaborator backs it with
/// the device copy; tests back it with capture buffers.
///
/// Implementations absorb transient presentation errors themselves (log and
/// skip the frame); an `Err` here means the surface is unrecoverably gone.
pub trait PresentTarget {
    fn present_frame(&mut self, frame: &PixelBuffer) -> Result<()>;
}
