use egui::{TextureHandle, TextureId, TextureOptions};

use crate::color_picker::ColorPicker;
use crate::config::CanvasConfig;
use crate::engine::{CanvasEngine, ToolState};
use crate::error::CanvasResult;
use crate::event::{CanvasEvent, LatestEvent, LoggingEventHandler};
use crate::input::{CanvasAction, FrameInput, InputHandler};
use crate::panels;
use crate::projectile::ProjectileImpact;

/// What survives a restart. Painted pixels are not persisted.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, Default)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct AppSettings {
    pub tools: ToolState,
    pub picker: ColorPicker,
}

pub struct SplashCanvasApp {
    canvas: CanvasEngine,
    settings: AppSettings,
    input: InputHandler,
    latest_event: LatestEvent,
    texture: Option<TextureHandle>,
    uploaded_version: Option<u64>,
}

impl SplashCanvasApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: CanvasConfig) -> CanvasResult<Self> {
        let settings: AppSettings = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();
        Self::with_settings(config, settings)
    }

    /// Build the app state without a window, e.g. for tests.
    pub fn with_settings(config: CanvasConfig, settings: AppSettings) -> CanvasResult<Self> {
        let size = [config.canvas_width, config.canvas_height];
        let latest_event = LatestEvent::new();

        let mut canvas = CanvasEngine::from_config(config)?;
        canvas.subscribe(LoggingEventHandler);
        canvas.subscribe(latest_event.clone());
        canvas.apply_tool_state(settings.tools);

        Ok(Self {
            canvas,
            settings,
            input: InputHandler::new(size),
            latest_event,
            texture: None,
            uploaded_version: None,
        })
    }

    pub fn canvas(&self) -> &CanvasEngine {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut CanvasEngine {
        &mut self.canvas
    }

    pub fn picker_mut(&mut self) -> &mut ColorPicker {
        &mut self.settings.picker
    }

    pub fn input(&self) -> &InputHandler {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputHandler {
        &mut self.input
    }

    pub fn last_event(&self) -> Option<CanvasEvent> {
        self.latest_event.get()
    }

    pub fn apply_action(&mut self, action: CanvasAction) {
        match action {
            CanvasAction::SelectTool(tool) => self.canvas.set_tool(tool),
            CanvasAction::Clear => self.canvas.clear(),
        }
    }

    /// Feed one frame of input to the canvas.
    pub fn handle_frame_input(&mut self, frame: FrameInput) {
        for action in frame.actions {
            self.apply_action(action);
        }

        self.canvas.update(frame.paint, &self.settings.picker);

        if let Some(target) = frame.throw_at {
            self.throw_ball(target);
        }
    }

    /// Stand-in for the physics scene: the ball lands exactly where it was aimed.
    fn throw_ball(&mut self, target: egui::Pos2) {
        let landing = self.canvas.mapping().canvas_to_world(target, 0.0);
        let impact = ProjectileImpact::color_ball(landing);
        log::debug!("Throwing ball {} at {:?}", impact.id, landing);
        self.canvas.handle_impact_event(&impact);
    }

    /// Texture holding the current canvas, re-uploaded after every commit.
    pub fn canvas_texture(&mut self, ctx: &egui::Context) -> TextureId {
        let buffer = self.canvas.buffer();
        let version = buffer.version();

        if self.uploaded_version != Some(version) {
            let image = buffer.to_color_image();
            match &mut self.texture {
                Some(handle) => handle.set(image, TextureOptions::NEAREST),
                None => self.texture = Some(ctx.load_texture("canvas", image, TextureOptions::NEAREST)),
            }
            self.uploaded_version = Some(version);
        }

        match &self.texture {
            Some(handle) => handle.id(),
            None => TextureId::default(),
        }
    }
}

impl eframe::App for SplashCanvasApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.settings.tools = self.canvas.tool_state();
        eframe::set_value(storage, eframe::APP_KEY, &self.settings);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let version = self.canvas.buffer().version();

        panels::tools_panel(self, ctx);
        panels::central_panel(self, ctx);

        if self.canvas.buffer().version() != version {
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::PaintInput;
    use crate::tool::PaintTool;
    use egui::{Color32, pos2};

    fn app() -> SplashCanvasApp {
        let config = CanvasConfig {
            rng_seed: Some(1),
            builtin_splash_diameter: 6,
            ..CanvasConfig::with_size(64)
        };
        SplashCanvasApp::with_settings(config, AppSettings::default()).unwrap()
    }

    #[test]
    fn test_restores_saved_tool_settings() {
        let settings = AppSettings {
            tools: ToolState {
                tool: PaintTool::Spray,
                brush_size: 12,
                color: Color32::RED,
            },
            picker: ColorPicker::new(0.0, 1.0, 0.0),
        };
        let app = SplashCanvasApp::with_settings(CanvasConfig::with_size(32), settings).unwrap();
        assert_eq!(app.canvas().tool(), PaintTool::Spray);
        assert_eq!(app.canvas().brush_size(), 12);
    }

    #[test]
    fn test_frame_uses_picker_color() {
        let mut app = app();
        *app.picker_mut() = ColorPicker::new(1.0, 0.0, 0.0);
        app.handle_frame_input(FrameInput {
            paint: PaintInput::pressed_at(pos2(20.0, 20.0)),
            ..FrameInput::default()
        });
        assert_eq!(app.canvas().buffer().get_pixel(20, 20), Some(Color32::RED));
    }

    #[test]
    fn test_shortcut_actions() {
        let mut app = app();
        app.handle_frame_input(FrameInput {
            paint: PaintInput::pressed_at(pos2(10.0, 10.0)),
            ..FrameInput::default()
        });
        assert!(app.canvas().buffer().count(Color32::BLACK) > 0);
        app.handle_frame_input(FrameInput::default());

        app.handle_frame_input(FrameInput {
            actions: vec![CanvasAction::SelectTool(PaintTool::Ball), CanvasAction::Clear],
            ..FrameInput::default()
        });
        assert_eq!(app.canvas().tool(), PaintTool::Ball);
        assert_eq!(app.canvas().buffer().count(Color32::WHITE), 64 * 64);
        assert_eq!(app.last_event(), Some(CanvasEvent::Cleared));
    }

    #[test]
    fn test_long_session_keeps_only_latest_event() {
        let mut app = app();
        let emitted = crate::event::EventRecorder::new();
        app.canvas_mut().subscribe(emitted.clone());

        for i in 0..10_000 {
            let at = pos2((i % 64) as f32, 5.0);
            app.handle_frame_input(FrameInput {
                paint: PaintInput::pressed_at(at),
                ..FrameInput::default()
            });
            app.handle_frame_input(FrameInput::default());
        }

        assert_eq!(emitted.events().len(), 20_000);
        assert_eq!(app.last_event(), Some(CanvasEvent::StrokeEnded));
    }

    #[test]
    fn test_thrown_ball_lands_on_target() {
        let mut app = app();
        app.apply_action(CanvasAction::SelectTool(PaintTool::Ball));
        *app.picker_mut() = ColorPicker::new(0.0, 0.0, 1.0);
        app.handle_frame_input(FrameInput {
            throw_at: Some(pos2(30.5, 40.5)),
            ..FrameInput::default()
        });
        assert_eq!(app.canvas().buffer().get_pixel(30, 40), Some(Color32::BLUE));
        assert!(matches!(app.last_event(), Some(CanvasEvent::SplashStamped { .. })));
    }
}
