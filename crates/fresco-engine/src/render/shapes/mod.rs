//! CPU rasterizers for the scene primitives, one module per shape,
//! mirroring the payload types under `scene::shapes`.

pub(crate) mod line;
pub(crate) mod point;
pub(crate) mod rect;
