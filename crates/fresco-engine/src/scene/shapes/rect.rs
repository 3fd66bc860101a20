use crate::paint::Color;

/// Axis-aligned rectangle payload, filled or outline.
///
/// Dimensions are stored as given; degenerate sizes are legal and simply
/// paint nothing.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RectShape {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub color: Color,
    pub filled: bool,
    pub id: i32,
}
