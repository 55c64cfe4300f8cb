use egui::Color32;

use crate::pixel_buffer::PixelBuffer;

/// Fill the square of half-width `brush_size` around `(x, y)` with `color`.
///
/// The square is `2 * brush_size + 1` pixels on a side. Pixels off the canvas
/// are skipped.
pub fn apply(buffer: &mut PixelBuffer, x: i32, y: i32, brush_size: u32, color: Color32) {
    let r = brush_size.min(i32::MAX as u32) as i32;
    let (x0, x1) = (x.saturating_sub(r).max(0), x.saturating_add(r));
    let (y0, y1) = (y.saturating_sub(r).max(0), y.saturating_add(r));
    let x1 = x1.min(buffer.width() as i32 - 1);
    let y1 = y1.min(buffer.height() as i32 - 1);

    for py in y0..=y1 {
        for px in x0..=x1 {
            buffer.set_pixel(px, py, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_footprint() {
        let mut buffer = PixelBuffer::new(32, 32, Color32::WHITE);
        apply(&mut buffer, 10, 10, 2, Color32::RED);

        assert_eq!(buffer.count(Color32::RED), 25);
        for y in 8..=12 {
            for x in 8..=12 {
                assert_eq!(buffer.get_pixel(x, y), Some(Color32::RED));
            }
        }
        assert_eq!(buffer.get_pixel(7, 10), Some(Color32::WHITE));
        assert_eq!(buffer.get_pixel(13, 10), Some(Color32::WHITE));
    }

    #[test]
    fn test_clipped_at_corner() {
        let mut buffer = PixelBuffer::new(16, 16, Color32::WHITE);
        apply(&mut buffer, 0, 0, 3, Color32::RED);
        // Only the in-bounds quadrant: x, y in 0..=3
        assert_eq!(buffer.count(Color32::RED), 16);

        apply(&mut buffer, 15, 15, 1, Color32::BLUE);
        assert_eq!(buffer.count(Color32::BLUE), 4);
    }

    #[test]
    fn test_center_far_off_canvas_writes_nothing() {
        let mut buffer = PixelBuffer::new(8, 8, Color32::WHITE);
        apply(&mut buffer, -50, 4, 5, Color32::RED);
        apply(&mut buffer, 4, 100, 5, Color32::RED);
        apply(&mut buffer, i32::MAX, i32::MIN, 5, Color32::RED);
        assert_eq!(buffer.count(Color32::WHITE), 64);
    }

    #[test]
    fn test_idempotent() {
        let mut once = PixelBuffer::new(20, 20, Color32::WHITE);
        apply(&mut once, 5, 9, 4, Color32::GREEN);
        let mut twice = once.clone();
        apply(&mut twice, 5, 9, 4, Color32::GREEN);
        assert_eq!(once.samples(), twice.samples());
    }
}
