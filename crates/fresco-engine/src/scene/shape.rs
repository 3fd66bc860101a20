use crate::paint::Color;

use super::shapes::line::LineShape;
use super::shapes::point::PointShape;
use super::shapes::rect::RectShape;

/// Closed shape variant stored in the scene.
///
/// There are exactly three shape kinds and no caller-defined extensions, so
/// this is a plain enum with explicit match dispatch rather than a trait
/// object. Extending the scene means:
/// - a new payload module under `scene::shapes::*`
/// - a new variant here
/// - a matching rasterizer under `render::shapes::*`
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Shape {
    Point(PointShape),
    Line(LineShape),
    Rect(RectShape),
}

impl Shape {
    /// Caller-supplied id used for removal. Not unique; duplicates are legal.
    #[inline]
    pub fn id(&self) -> i32 {
        match self {
            Shape::Point(p) => p.id,
            Shape::Line(l) => l.id,
            Shape::Rect(r) => r.id,
        }
    }

    /// The color snapshot taken when the shape was drawn.
    #[inline]
    pub fn color(&self) -> Color {
        match self {
            Shape::Point(p) => p.color,
            Shape::Line(l) => l.color,
            Shape::Rect(r) => r.color,
        }
    }
}
