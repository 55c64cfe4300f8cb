use egui::{Key, Pos2, Rect, Response, pos2};

use crate::engine::PaintInput;
use crate::tool::PaintTool;

/// Discrete commands triggered from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasAction {
    SelectTool(PaintTool),
    Clear,
}

/// Keyboard shortcuts: 1 Brush, 2 Spray, 3 Ball, 0 Eraser, R clears.
pub fn shortcut_action(key: Key) -> Option<CanvasAction> {
    match key {
        Key::Num1 => Some(CanvasAction::SelectTool(PaintTool::Brush)),
        Key::Num2 => Some(CanvasAction::SelectTool(PaintTool::Spray)),
        Key::Num3 => Some(CanvasAction::SelectTool(PaintTool::Ball)),
        Key::Num0 => Some(CanvasAction::SelectTool(PaintTool::Eraser)),
        Key::R => Some(CanvasAction::Clear),
        _ => None,
    }
}

const SHORTCUT_KEYS: [Key; 5] = [Key::Num1, Key::Num2, Key::Num3, Key::Num0, Key::R];

/// Everything the canvas needs from one frame of egui input
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameInput {
    pub paint: PaintInput,
    /// Canvas point clicked while the Ball tool is active
    pub throw_at: Option<Pos2>,
    pub actions: Vec<CanvasAction>,
}

/// Converts raw egui input over the displayed canvas image into engine input.
#[derive(Debug, Clone)]
pub struct InputHandler {
    canvas_rect: Rect,
    canvas_size: [u32; 2],
}

impl InputHandler {
    pub fn new(canvas_size: [u32; 2]) -> Self {
        Self {
            canvas_rect: Rect::NOTHING,
            canvas_size,
        }
    }

    /// Screen rectangle the canvas image was drawn into this frame
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    pub fn canvas_rect(&self) -> Rect {
        self.canvas_rect
    }

    /// Map a screen position into canvas pixels, `None` when off the image.
    pub fn to_canvas(&self, screen: Pos2) -> Option<Pos2> {
        let rect = self.canvas_rect;
        if !rect.is_positive() || !rect.contains(screen) {
            return None;
        }
        let [w, h] = self.canvas_size.map(|v| v as f32);
        let u = (screen.x - rect.min.x) / rect.width();
        let v = (screen.y - rect.min.y) / rect.height();
        // contains() is inclusive of max; keep the result in [0, size)
        let x = (u * w).min(w - f32::EPSILON * w);
        let y = (v * h).min(h - f32::EPSILON * h);
        Some(pos2(x, y))
    }

    /// Read this frame's pointer and keyboard state.
    ///
    /// `response` is the interaction response of the canvas image; a drag only
    /// paints when the press started on the canvas.
    pub fn process_input(&self, ctx: &egui::Context, response: &Response, tool: PaintTool) -> FrameInput {
        let mut frame = FrameInput::default();

        if !ctx.wants_keyboard_input() {
            ctx.input(|input| {
                for key in SHORTCUT_KEYS {
                    if input.key_pressed(key) {
                        frame.actions.extend(shortcut_action(key));
                    }
                }
            });
        }

        let pointer = response.interact_pointer_pos().or(response.hover_pos());
        let canvas_point = pointer.and_then(|pos| self.to_canvas(pos));

        if tool.is_stroke_tool() {
            frame.paint = PaintInput {
                trigger_active: response.is_pointer_button_down_on(),
                canvas_point,
            };
        } else if response.clicked() {
            frame.throw_at = canvas_point;
        }

        frame
    }
}
