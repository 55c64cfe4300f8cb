pub mod types;

use std::fmt;

use serde::{Deserialize, Serialize};

/// The painting tools. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PaintTool {
    #[default]
    Brush,
    Spray,
    Eraser,
    /// Throws a paint ball that stamps the splash template where it lands
    Ball,
}

impl PaintTool {
    pub const ALL: [PaintTool; 4] = [Self::Brush, Self::Spray, Self::Eraser, Self::Ball];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Brush => "Brush",
            Self::Spray => "Spray",
            Self::Eraser => "Eraser",
            Self::Ball => "Ball",
        }
    }

    /// Brush, Spray and Eraser paint along a drag; Ball paints on impact.
    pub fn is_stroke_tool(&self) -> bool {
        !matches!(self, Self::Ball)
    }
}

impl fmt::Display for PaintTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
