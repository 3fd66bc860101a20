//! Color model and the platform color-table contract.
//!
//! Scope:
//! - draw-color representation (channel bytes + cached platform pixel value)
//! - the narrow allocation contract to the platform color table
//! - the resolver that turns channel bytes into a displayable pixel,
//!   falling back to a safe value when allocation fails

mod color;
mod resolver;
mod table;

pub use color::Color;
pub use resolver::{AllocErrorHook, ColorResolver};
pub use table::{ColorAllocError, ColorTable, PixelValue, TrueColorTable, WHITE_PIXEL};
