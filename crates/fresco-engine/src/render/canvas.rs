use anyhow::Result;

use crate::paint::{Color, ColorResolver};
use crate::scene::{LineShape, PointShape, RectShape, SceneList, Shape};

use super::buffer::PixelBuffer;
use super::shapes;
use super::target::PresentTarget;

/// Retained drawing surface: scene store plus double-buffered compositor.
///
/// Draw calls append to the scene carrying a snapshot of the current draw
/// color, and incrementally paint into the back buffer so the common
/// draw-once-at-setup case shows up on the next copy without a full repaint.
/// The incremental paint is only an optimization: [`present`](Self::present)
/// always refills the buffer and repaints the whole scene in insertion
/// order, so after it returns the buffer reflects exactly the scene.
///
/// Moving objects follow the remove-old-id / draw-new-id idiom; because
/// drawing appends, the moved shape is also re-promoted to the topmost paint
/// position every frame. That ordering is relied upon and covered by tests.
pub struct Canvas {
    resolver: ColorResolver,
    draw_color: Color,
    scene: SceneList,
    buffer: PixelBuffer,
}

impl Canvas {
    /// Creates a canvas with a white draw color and a back buffer filled
    /// with it.
    pub fn new(width: u32, height: u32, mut resolver: ColorResolver) -> Self {
        let draw_color = resolver.resolve(255, 255, 255, 255);
        let mut buffer = PixelBuffer::new(width, height);
        buffer.fill(draw_color.pixel);

        Self {
            resolver,
            draw_color,
            scene: SceneList::new(),
            buffer,
        }
    }

    /// Sets the color applied to subsequent draw calls.
    ///
    /// Re-resolves against the color table on every call (no cache); shapes
    /// already in the scene keep their snapshots.
    pub fn set_draw_color(&mut self, r: u8, g: u8, b: u8, a: u8) {
        self.draw_color = self.resolver.resolve(r, g, b, a);
    }

    /// Empties the scene and repaints the back buffer with the current draw
    /// color.
    pub fn clear(&mut self) {
        self.scene.clear();
        self.buffer.fill(self.draw_color.pixel);
    }

    pub fn draw_point(&mut self, x: i32, y: i32, id: i32) {
        let point = PointShape {
            x,
            y,
            color: self.draw_color,
            id,
        };
        shapes::point::paint(&mut self.buffer, &point);
        self.scene.push(Shape::Point(point));
    }

    pub fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, id: i32) {
        let line = LineShape {
            x1,
            y1,
            x2,
            y2,
            color: self.draw_color,
            id,
        };
        shapes::line::paint(&mut self.buffer, &line);
        self.scene.push(Shape::Line(line));
    }

    pub fn draw_rect(&mut self, x: i32, y: i32, width: i32, height: i32, filled: bool, id: i32) {
        let rect = RectShape {
            x,
            y,
            width,
            height,
            color: self.draw_color,
            filled,
            id,
        };
        shapes::rect::paint(&mut self.buffer, &rect);
        self.scene.push(Shape::Rect(rect));
    }

    /// Removes every scene entry with this id. Does not repaint; the removal
    /// becomes visible at the next `present`.
    pub fn remove_shape_by_id(&mut self, id: i32) {
        self.scene.remove_by_id(id);
    }

    /// Recomposites the back buffer from the scene and hands it to `target`.
    ///
    /// The buffer is first refilled with the current draw color (erasing any
    /// incremental-paint drift from removed shapes), then every surviving
    /// shape is repainted in insertion order with its own stored color.
    pub fn present(&mut self, target: &mut dyn PresentTarget) -> Result<()> {
        self.buffer.fill(self.draw_color.pixel);

        for shape in self.scene.shapes() {
            match shape {
                Shape::Point(p) => shapes::point::paint(&mut self.buffer, p),
                Shape::Line(l) => shapes::line::paint(&mut self.buffer, l),
                Shape::Rect(r) => shapes::rect::paint(&mut self.buffer, r),
            }
        }

        target.present_frame(&self.buffer)
    }

    #[inline]
    pub fn scene(&self) -> &SceneList {
        &self.scene
    }

    #[inline]
    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    #[inline]
    pub fn draw_color(&self) -> Color {
        self.draw_color
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.buffer.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::{PixelValue, TrueColorTable};

    /// Captures presented frames instead of touching a surface.
    #[derive(Default)]
    struct CaptureTarget {
        frames: usize,
        last: Option<PixelBuffer>,
    }

    impl PresentTarget for CaptureTarget {
        fn present_frame(&mut self, frame: &PixelBuffer) -> Result<()> {
            self.frames += 1;
            self.last = Some(frame.clone());
            Ok(())
        }
    }

    fn canvas(width: u32, height: u32) -> Canvas {
        Canvas::new(
            width,
            height,
            ColorResolver::new(Box::new(TrueColorTable::new())),
        )
    }

    fn pixel_of(r: u8, g: u8, b: u8) -> PixelValue {
        let mut resolver = ColorResolver::new(Box::new(TrueColorTable::new()));
        resolver.resolve(r, g, b, 255).pixel
    }

    // ── clear ─────────────────────────────────────────────────────────────

    #[test]
    fn clear_empties_scene_and_fills_with_draw_color() {
        let mut c = canvas(16, 16);
        c.set_draw_color(10, 20, 30, 255);
        c.draw_rect(0, 0, 8, 8, true, 1);
        c.draw_point(12, 12, 2);

        c.set_draw_color(200, 0, 0, 255);
        c.clear();

        assert!(c.scene().is_empty());
        let expected = pixel_of(200, 0, 0);
        assert!((0..16).all(|y| (0..16).all(|x| c.buffer().get(x, y) == Some(expected))));
    }

    // ── paint order ───────────────────────────────────────────────────────

    #[test]
    fn later_shapes_win_in_the_overlap() {
        let mut c = canvas(16, 16);
        let mut target = CaptureTarget::default();

        c.set_draw_color(255, 0, 0, 255);
        c.draw_rect(0, 0, 10, 10, true, 1);
        c.set_draw_color(0, 0, 255, 255);
        c.draw_rect(5, 5, 10, 10, true, 2);

        c.present(&mut target).unwrap();
        let frame = target.last.unwrap();

        assert_eq!(frame.get(7, 7), Some(pixel_of(0, 0, 255)));
        assert_eq!(frame.get(2, 2), Some(pixel_of(255, 0, 0)));
    }

    #[test]
    fn remove_then_redraw_promotes_to_topmost() {
        let mut c = canvas(16, 16);
        let mut target = CaptureTarget::default();

        c.set_draw_color(255, 0, 0, 255);
        c.draw_rect(0, 0, 10, 10, true, 1);
        c.set_draw_color(0, 255, 0, 255);
        c.draw_rect(5, 5, 10, 10, true, 2);

        // Move shape 1: it was painted under shape 2, now it lands on top.
        c.remove_shape_by_id(1);
        c.set_draw_color(255, 0, 0, 255);
        c.draw_rect(2, 2, 10, 10, true, 1);

        let ids: Vec<i32> = c.scene().shapes().iter().map(Shape::id).collect();
        assert_eq!(ids, [2, 1]);

        c.present(&mut target).unwrap();
        let frame = target.last.unwrap();
        assert_eq!(frame.get(7, 7), Some(pixel_of(255, 0, 0)));
    }

    // ── removal ───────────────────────────────────────────────────────────

    #[test]
    fn removed_shape_is_never_painted_again() {
        let mut c = canvas(100, 100);
        let mut target = CaptureTarget::default();

        c.set_draw_color(0, 0, 100, 255);
        c.draw_rect(0, 0, 100, 100, true, 1);
        c.set_draw_color(255, 255, 0, 255);
        c.draw_point(50, 50, 2);

        c.remove_shape_by_id(1);
        c.set_draw_color(0, 0, 0, 255);
        c.present(&mut target).unwrap();

        let scene = c.scene().shapes();
        assert_eq!(scene.len(), 1);
        assert!(matches!(scene[0], Shape::Point(p) if p.x == 50 && p.y == 50 && p.id == 2));

        let frame = target.last.unwrap();
        assert_eq!(frame.get(50, 50), Some(pixel_of(255, 255, 0)));
        // The removed rectangle's color must not survive anywhere.
        assert_eq!(frame.get(10, 10), Some(pixel_of(0, 0, 0)));
    }

    #[test]
    fn remove_takes_duplicates_and_ignores_misses() {
        let mut c = canvas(16, 16);
        c.set_draw_color(1, 2, 3, 255);
        c.draw_point(0, 0, 5);
        c.draw_line(0, 0, 3, 3, 5);
        c.draw_rect(1, 1, 2, 2, false, 6);

        c.remove_shape_by_id(9);
        assert_eq!(c.scene().len(), 3);

        c.remove_shape_by_id(5);
        assert_eq!(c.scene().len(), 1);
        assert_eq!(c.scene().shapes()[0].id(), 6);
    }

    // ── color snapshots ───────────────────────────────────────────────────

    #[test]
    fn stored_color_is_a_snapshot_of_the_draw_color() {
        let mut c = canvas(8, 8);
        let mut target = CaptureTarget::default();

        c.set_draw_color(255, 0, 0, 255);
        c.draw_point(3, 3, 1);
        c.set_draw_color(0, 0, 255, 255);

        c.present(&mut target).unwrap();
        let frame = target.last.unwrap();

        // The point kept red; the background took the new draw color.
        assert_eq!(frame.get(3, 3), Some(pixel_of(255, 0, 0)));
        assert_eq!(frame.get(0, 0), Some(pixel_of(0, 0, 255)));
    }

    #[test]
    fn present_erases_incremental_paint_of_removed_shapes() {
        let mut c = canvas(8, 8);
        let mut target = CaptureTarget::default();

        c.set_draw_color(255, 0, 0, 255);
        c.draw_rect(0, 0, 8, 8, true, 1);
        // The incremental paint is in the buffer now.
        assert_eq!(c.buffer().get(4, 4), Some(pixel_of(255, 0, 0)));

        c.remove_shape_by_id(1);
        c.set_draw_color(0, 0, 0, 255);
        c.present(&mut target).unwrap();

        let frame = target.last.unwrap();
        assert_eq!(frame.get(4, 4), Some(pixel_of(0, 0, 0)));
    }

    // ── degenerate input ──────────────────────────────────────────────────

    #[test]
    fn degenerate_geometry_is_accepted_silently() {
        let mut c = canvas(8, 8);
        let mut target = CaptureTarget::default();

        c.draw_rect(2, 2, -4, 10, true, 1);
        c.draw_rect(2, 2, 3, 0, false, 2);
        c.draw_point(-100, -100, 3);
        c.draw_line(-5, -5, -1, -1, 4);

        // Entries are stored even though nothing lands in the buffer.
        assert_eq!(c.scene().len(), 4);
        c.present(&mut target).unwrap();
        assert_eq!(target.frames, 1);
    }
}
