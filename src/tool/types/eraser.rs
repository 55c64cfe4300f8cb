use egui::Color32;

use super::brush;
use crate::pixel_buffer::PixelBuffer;

/// Restore the brush-shaped square around `(x, y)` to the canvas background.
pub fn apply(buffer: &mut PixelBuffer, x: i32, y: i32, brush_size: u32, background: Color32) {
    brush::apply(buffer, x, y, brush_size, background);
}
