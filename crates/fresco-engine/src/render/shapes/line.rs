use crate::render::PixelBuffer;
use crate::scene::LineShape;

/// Integer Bresenham over all octants; both endpoints painted.
pub(crate) fn paint(fb: &mut PixelBuffer, line: &LineShape) {
    let pixel = line.color.pixel;

    let dx = (line.x2 - line.x1).abs();
    let dy = -(line.y2 - line.y1).abs();
    let sx = if line.x1 < line.x2 { 1 } else { -1 };
    let sy = if line.y1 < line.y2 { 1 } else { -1 };

    let (mut x, mut y) = (line.x1, line.y1);
    let mut err = dx + dy;

    loop {
        fb.set(x, y, pixel);
        if x == line.x2 && y == line.y2 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Color;

    fn shape(x1: i32, y1: i32, x2: i32, y2: i32) -> LineShape {
        let color = Color {
            r: 255,
            g: 0,
            b: 0,
            a: 255,
            pixel: 0xAA,
        };
        LineShape {
            x1,
            y1,
            x2,
            y2,
            color,
            id: 0,
        }
    }

    #[test]
    fn horizontal_line_paints_the_full_span() {
        let mut fb = PixelBuffer::new(8, 8);
        paint(&mut fb, &shape(1, 3, 5, 3));
        for x in 1..=5 {
            assert_eq!(fb.get(x, 3), Some(0xAA));
        }
        assert_eq!(fb.get(0, 3), Some(0));
        assert_eq!(fb.get(6, 3), Some(0));
    }

    #[test]
    fn diagonal_line_touches_both_endpoints() {
        let mut fb = PixelBuffer::new(8, 8);
        paint(&mut fb, &shape(6, 6, 1, 2));
        assert_eq!(fb.get(6, 6), Some(0xAA));
        assert_eq!(fb.get(1, 2), Some(0xAA));
    }

    #[test]
    fn degenerate_line_is_a_point() {
        let mut fb = PixelBuffer::new(4, 4);
        paint(&mut fb, &shape(2, 2, 2, 2));
        assert_eq!(fb.get(2, 2), Some(0xAA));
    }

    #[test]
    fn off_buffer_segments_are_clipped_silently() {
        let mut fb = PixelBuffer::new(4, 4);
        paint(&mut fb, &shape(-3, 1, 6, 1));
        assert_eq!(fb.get(0, 1), Some(0xAA));
        assert_eq!(fb.get(3, 1), Some(0xAA));
    }
}
