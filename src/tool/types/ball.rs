use egui::Color32;

use crate::pixel_buffer::PixelBuffer;
use crate::splash::SplashTemplate;

/// Stamp `template` centered on `(x, y)`.
///
/// The template only supplies the shape; every covered pixel gets `color`.
/// Local offset `(i, j)` lands on `(x - size / 2 + i, y - size / 2 + j)`.
/// Returns the number of pixels written.
pub fn apply(
    buffer: &mut PixelBuffer,
    x: i32,
    y: i32,
    template: &SplashTemplate,
    color: Color32,
) -> usize {
    let half = (template.size() / 2) as i32;
    let start_x = x.saturating_sub(half);
    let start_y = y.saturating_sub(half);

    let mut written = 0;
    for (i, j) in template.opaque_offsets() {
        let cx = start_x.saturating_add(i as i32);
        let cy = start_y.saturating_add(j as i32);
        if buffer.in_bounds(cx, cy) {
            buffer.set_pixel(cx, cy, color);
            written += 1;
        }
    }
    written
}
