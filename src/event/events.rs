use egui::Pos2;

use crate::projectile::WorldPoint;
use crate::tool::PaintTool;

/// Notifications emitted by the canvas engine as its state changes.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasEvent {
    ToolChanged {
        old: PaintTool,
        new: PaintTool,
    },
    BrushSizeChanged {
        size: u32,
    },
    StrokeStarted {
        at: Pos2,
    },
    StrokeEnded,
    Cleared,
    SplashStamped {
        at: Pos2,
        pixels: usize,
    },
    /// An impact landed outside the canvas and left no paint
    ImpactRejected {
        point: WorldPoint,
    },
}
