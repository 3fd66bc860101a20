use crate::render::PixelBuffer;
use crate::scene::RectShape;

/// Paints a filled block or a one-pixel outline over the same footprint.
///
/// Non-positive dimensions paint nothing; no validation, no error.
pub(crate) fn paint(fb: &mut PixelBuffer, rect: &RectShape) {
    if rect.width <= 0 || rect.height <= 0 {
        return;
    }

    let pixel = rect.color.pixel;
    let (x0, y0) = (rect.x, rect.y);
    let (x1, y1) = (rect.x + rect.width - 1, rect.y + rect.height - 1);

    if rect.filled {
        for y in y0..=y1 {
            for x in x0..=x1 {
                fb.set(x, y, pixel);
            }
        }
    } else {
        for x in x0..=x1 {
            fb.set(x, y0, pixel);
            fb.set(x, y1, pixel);
        }
        for y in y0..=y1 {
            fb.set(x0, y, pixel);
            fb.set(x1, y, pixel);
        }
    }
}
