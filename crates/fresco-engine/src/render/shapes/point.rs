use crate::render::PixelBuffer;
use crate::scene::PointShape;

pub(crate) fn paint(fb: &mut PixelBuffer, point: &PointShape) {
    fb.set(point.x, point.y, point.color.pixel);
}
