use std::f32::consts::TAU;

use egui::Color32;
use rand::Rng;

use crate::pixel_buffer::PixelBuffer;

/// Samples written by one spray application unless configured otherwise
pub const DEFAULT_DENSITY: usize = 50;

/// Scatter `density` dots uniformly by angle and radius inside a disk of
/// radius `brush_size` around `(x, y)`.
///
/// Dots landing off the canvas are dropped, not redrawn. Two calls with the
/// same arguments paint different dots unless the rng is reseeded.
pub fn apply<R: Rng + ?Sized>(
    buffer: &mut PixelBuffer,
    x: i32,
    y: i32,
    brush_size: u32,
    color: Color32,
    density: usize,
    rng: &mut R,
) {
    let max_radius = brush_size.max(1) as f32;

    for _ in 0..density {
        let angle: f32 = rng.random_range(0.0..TAU);
        let radius: f32 = rng.random_range(0.0..max_radius);

        let sx = (x as f32 + angle.cos() * radius).floor() as i32;
        let sy = (y as f32 + angle.sin() * radius).floor() as i32;
        buffer.set_pixel(sx, sy, color);
    }
}
