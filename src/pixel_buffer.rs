use egui::{Color32, ColorImage};

/// Fixed-size RGBA raster the tools paint into.
///
/// Coordinates are signed so rasterizers can hand over positions that fall off
/// the edge; those writes are dropped. The buffer is never resized.
#[derive(Clone)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    samples: Vec<Color32>,
    // Bumped by every commit so the display can tell when to re-upload
    version: u64,
    dirty: bool,
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("version", &self.version)
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl PixelBuffer {
    /// Allocate a buffer filled with `background`. Dimensions must be non-zero.
    pub fn new(width: u32, height: u32, background: Color32) -> Self {
        Self {
            width,
            height,
            samples: vec![background; width as usize * height as usize],
            version: 0,
            dirty: true,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Read a sample, `None` when off the canvas.
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Color32> {
        if self.in_bounds(x, y) {
            Some(self.samples[self.index(x, y)])
        } else {
            None
        }
    }

    /// Write a sample. Out-of-range coordinates are ignored.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color32) {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);
            self.samples[idx] = color;
            self.dirty = true;
        }
    }

    pub fn fill(&mut self, color: Color32) {
        self.samples.fill(color);
        self.dirty = true;
    }

    /// Marks pending writes as visible.
    pub fn commit(&mut self) {
        self.version += 1;
        self.dirty = false;
    }

    /// True when there are writes since the last commit
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Row-major samples, `y * width + x`
    pub fn samples(&self) -> &[Color32] {
        &self.samples
    }

    /// Number of samples equal to `color`
    pub fn count(&self, color: Color32) -> usize {
        self.samples.iter().filter(|&&c| c == color).count()
    }

    /// Snapshot for uploading as an egui texture.
    pub fn to_color_image(&self) -> ColorImage {
        let mut image = ColorImage::new(
            [self.width as usize, self.height as usize],
            Color32::TRANSPARENT,
        );
        image.pixels.copy_from_slice(&self.samples);
        image
    }
}
