use std::path::Path;
use std::sync::Arc;

use egui::Color32;
use image::RgbaImage;

use crate::error::{CanvasError, CanvasResult};

/// Square stencil defining the shape of a ball splash.
///
/// Only the alpha channel matters when stamping: fully transparent texels are
/// skipped, every other texel receives the active paint color.
#[derive(Clone)]
pub struct SplashTemplate {
    size: u32,
    texels: Arc<[Color32]>,
}

impl std::fmt::Debug for SplashTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SplashTemplate")
            .field("size", &self.size)
            .field("opaque", &self.opaque_count())
            .finish()
    }
}

impl SplashTemplate {
    /// Build from row-major texels of a `size`×`size` stamp.
    pub fn from_pixels(size: u32, texels: Vec<Color32>) -> CanvasResult<Self> {
        if size == 0 || texels.len() != size as usize * size as usize {
            let height = if size == 0 { 0 } else { texels.len() as u32 / size };
            return Err(CanvasError::InvalidSplashTemplate { width: size, height });
        }
        Ok(Self {
            size,
            texels: texels.into(),
        })
    }

    pub fn from_rgba_image(image: &RgbaImage) -> CanvasResult<Self> {
        let (width, height) = image.dimensions();
        if width == 0 || width != height {
            return Err(CanvasError::InvalidSplashTemplate { width, height });
        }
        let texels = image
            .pixels()
            .map(|p| Color32::from_rgba_unmultiplied(p[0], p[1], p[2], p[3]))
            .collect();
        Self::from_pixels(width, texels)
    }

    /// Decode an encoded image (PNG) from memory
    pub fn load_from_memory(bytes: &[u8]) -> CanvasResult<Self> {
        let image = image::load_from_memory(bytes)?.to_rgba8();
        Self::from_rgba_image(&image)
    }

    pub fn open(path: impl AsRef<Path>) -> CanvasResult<Self> {
        let path = path.as_ref();
        let image = image::open(path)?.to_rgba8();
        let template = Self::from_rgba_image(&image)?;
        log::info!(
            "Loaded splash template {} ({}x{})",
            path.display(),
            template.size,
            template.size
        );
        Ok(template)
    }

    /// Opaque disc inscribed in a `diameter`×`diameter` square.
    pub fn disc(diameter: u32) -> CanvasResult<Self> {
        let radius = diameter as f32 / 2.0;
        let texels = (0..diameter)
            .flat_map(|j| (0..diameter).map(move |i| (i, j)))
            .map(|(i, j)| {
                let dx = i as f32 + 0.5 - radius;
                let dy = j as f32 + 0.5 - radius;
                if dx * dx + dy * dy <= radius * radius {
                    Color32::WHITE
                } else {
                    Color32::TRANSPARENT
                }
            })
            .collect();
        Self::from_pixels(diameter, texels)
    }

    /// Edge length in texels
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn texel(&self, i: u32, j: u32) -> Option<Color32> {
        if i < self.size && j < self.size {
            Some(self.texels[(j * self.size + i) as usize])
        } else {
            None
        }
    }

    /// Whether the stamp covers local offset (i, j)
    pub fn is_opaque(&self, i: u32, j: u32) -> bool {
        self.texel(i, j).is_some_and(|c| c.a() != 0)
    }

    /// Local offsets of all covering texels, row by row
    pub fn opaque_offsets(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (0..self.size)
            .flat_map(move |j| (0..self.size).map(move |i| (i, j)))
            .filter(move |&(i, j)| self.is_opaque(i, j))
    }

    pub fn opaque_count(&self) -> usize {
        self.texels.iter().filter(|c| c.a() != 0).count()
    }
}
