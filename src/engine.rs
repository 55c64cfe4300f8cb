use std::sync::Arc;

use egui::{Color32, Pos2, Rect, vec2};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::color_picker::ColorSource;
use crate::config::{CanvasConfig, StrokeSettings};
use crate::error::{CanvasError, CanvasResult};
use crate::event::{CanvasEvent, EventBus, EventHandler};
use crate::pixel_buffer::PixelBuffer;
use crate::projectile::{ProjectileImpact, ProjectileTag, SurfaceMapping, WorldPoint};
use crate::splash::SplashTemplate;
use crate::stroke::{self, StrokeState};
use crate::tool::PaintTool;
use crate::tool::types::{ball, brush, eraser, spray};

/// A canvas engine behind the single lock that serialises every call.
pub type SharedCanvas = Arc<Mutex<CanvasEngine>>;

/// Settings the user changes while painting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolState {
    pub tool: PaintTool,
    /// Radius in pixels shared by Brush, Spray and Eraser. Always at least 1.
    pub brush_size: u32,
    pub color: Color32,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            tool: PaintTool::Brush,
            brush_size: 5,
            color: Color32::BLACK,
        }
    }
}

/// What the input/hit-test collaborator saw this tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PaintInput {
    pub trigger_active: bool,
    /// Hit position in canvas pixels, `None` when the pointer missed the canvas
    pub canvas_point: Option<Pos2>,
}

impl PaintInput {
    pub fn pressed_at(point: Pos2) -> Self {
        Self {
            trigger_active: true,
            canvas_point: Some(point),
        }
    }

    pub fn released() -> Self {
        Self::default()
    }
}

/// Owns the pixel buffer and turns paint requests into pixel writes.
pub struct CanvasEngine {
    buffer: PixelBuffer,
    background: Color32,
    tools: ToolState,
    stroke: StrokeState,
    stroke_settings: StrokeSettings,
    spray_density: usize,
    template: SplashTemplate,
    mapping: SurfaceMapping,
    rng: Box<dyn RngCore + Send>,
    events: EventBus,
    enabled: bool,
}

impl std::fmt::Debug for CanvasEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasEngine")
            .field("buffer", &self.buffer)
            .field("tools", &self.tools)
            .field("stroke", &self.stroke)
            .field("template", &self.template)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

/// Collects the collaborators a [`CanvasEngine`] needs before it can paint.
pub struct CanvasEngineBuilder {
    config: CanvasConfig,
    template: Option<SplashTemplate>,
    rng: Option<Box<dyn RngCore + Send>>,
    events: EventBus,
}

impl CanvasEngineBuilder {
    pub fn splash_template(mut self, template: SplashTemplate) -> Self {
        self.template = Some(template);
        self
    }

    /// Random source for the spray tool
    pub fn rng(mut self, rng: impl RngCore + Send + 'static) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    pub fn event_handler(mut self, handler: impl EventHandler + 'static) -> Self {
        self.events.subscribe(Box::new(handler));
        self
    }

    /// Fails when the config is invalid or no splash template was given.
    pub fn build(self) -> CanvasResult<CanvasEngine> {
        let config = self.config;
        config.validate()?;
        let template = self.template.ok_or(CanvasError::MissingSplashTemplate)?;

        let rng: Box<dyn RngCore + Send> = match (self.rng, config.rng_seed) {
            (Some(rng), _) => rng,
            (None, Some(seed)) => Box::new(StdRng::seed_from_u64(seed)),
            (None, None) => Box::new(StdRng::from_os_rng()),
        };

        let mut buffer = PixelBuffer::new(config.canvas_width, config.canvas_height, config.background);
        buffer.commit();

        log::info!(
            "Canvas {}x{} ready, splash template {}px",
            config.canvas_width,
            config.canvas_height,
            template.size()
        );

        Ok(CanvasEngine {
            buffer,
            background: config.background,
            tools: ToolState {
                brush_size: config.brush_size.max(1),
                ..ToolState::default()
            },
            stroke: StrokeState::Idle,
            stroke_settings: config.stroke,
            spray_density: config.spray_density,
            template,
            mapping: SurfaceMapping::new(config.surface, config.canvas_width, config.canvas_height),
            rng,
            events: self.events,
            enabled: true,
        })
    }
}

impl CanvasEngine {
    pub fn builder(config: CanvasConfig) -> CanvasEngineBuilder {
        CanvasEngineBuilder {
            config,
            template: None,
            rng: None,
            events: EventBus::new(),
        }
    }

    /// Build an engine with the splash template the config points at, or a
    /// generated disc when it names none.
    pub fn from_config(config: CanvasConfig) -> CanvasResult<Self> {
        let template = match &config.splash_template_path {
            Some(path) => SplashTemplate::open(path)?,
            None => SplashTemplate::disc(config.builtin_splash_diameter)?,
        };
        Self::builder(config).splash_template(template).build()
    }

    pub fn into_shared(self) -> SharedCanvas {
        Arc::new(Mutex::new(self))
    }

    pub fn subscribe(&mut self, handler: impl EventHandler + 'static) {
        self.events.subscribe(Box::new(handler));
    }

    // --- per-tick input ---

    /// Apply one tick of collaborator input.
    ///
    /// The color source is read once. An active trigger with a hit paints;
    /// anything else ends the current stroke.
    pub fn update(&mut self, input: PaintInput, colors: &dyn ColorSource) {
        self.set_color(colors.current_color());
        match input {
            PaintInput {
                trigger_active: true,
                canvas_point: Some(point),
            } => self.paint(point),
            _ => self.release(),
        }
    }

    /// Paint at `point` with the active tool, filling the gap to the previous
    /// sample of the current drag.
    pub fn paint(&mut self, point: Pos2) {
        if !self.enabled {
            return;
        }
        if !stroke::is_finite(point) {
            log::warn!("Ignoring non-finite paint point {:?}", point);
            return;
        }

        let last = self.stroke.last_point();
        if last.is_none() {
            self.events.emit(CanvasEvent::StrokeStarted { at: point });
        }

        let mut painted = 0usize;
        for p in stroke::interpolate(last, point, &self.stroke_settings, self.stroke_bounds()) {
            self.rasterize(p);
            painted += 1;
        }
        self.stroke = StrokeState::Dragging { last_point: point };

        if painted > 0 {
            self.buffer.commit();
        }
        log::debug!("{} painted {} sample(s) ending at {:?}", self.tools.tool, painted, point);
    }

    /// The paint trigger was released: the next paint starts a new stroke.
    pub fn release(&mut self) {
        if self.stroke.is_dragging() {
            self.stroke = StrokeState::Idle;
            self.events.emit(CanvasEvent::StrokeEnded);
        }
    }

    /// Canvas grown by the largest footprint; samples beyond it cannot touch a pixel.
    fn stroke_bounds(&self) -> Rect {
        let margin = self.tools.brush_size.max(self.template.size()) as f32 + 1.0;
        let size = vec2(self.buffer.width() as f32, self.buffer.height() as f32);
        Rect::from_min_size(Pos2::ZERO, size).expand(margin)
    }

    fn rasterize(&mut self, point: Pos2) {
        let x = point.x.floor() as i32;
        let y = point.y.floor() as i32;
        let ToolState {
            tool,
            brush_size,
            color,
        } = self.tools;

        match tool {
            PaintTool::Brush => brush::apply(&mut self.buffer, x, y, brush_size, color),
            PaintTool::Eraser => eraser::apply(&mut self.buffer, x, y, brush_size, self.background),
            PaintTool::Spray => spray::apply(
                &mut self.buffer,
                x,
                y,
                brush_size,
                color,
                self.spray_density,
                &mut *self.rng,
            ),
            PaintTool::Ball => {
                ball::apply(&mut self.buffer, x, y, &self.template, color);
            }
        }
    }

    // --- tool state ---

    pub fn set_tool(&mut self, tool: PaintTool) {
        let old = self.tools.tool;
        if old != tool {
            self.tools.tool = tool;
            self.events.emit(CanvasEvent::ToolChanged { old, new: tool });
        }
    }

    /// Set the brush radius. Values below 1 become 1.
    pub fn set_brush_size(&mut self, size: i64) {
        let size = size.clamp(1, u32::MAX as i64) as u32;
        if size != self.tools.brush_size {
            self.tools.brush_size = size;
            self.events.emit(CanvasEvent::BrushSizeChanged { size });
        }
    }

    /// Set the brush radius from a slider value, rounded to the nearest pixel.
    pub fn set_brush_size_from_slider(&mut self, value: f32) {
        let rounded = if value.is_finite() { value.round() as i64 } else { 1 };
        self.set_brush_size(rounded);
    }

    pub fn set_color(&mut self, color: Color32) {
        self.tools.color = color;
    }

    /// Restore previously saved tool settings
    pub fn apply_tool_state(&mut self, state: ToolState) {
        self.set_tool(state.tool);
        self.set_brush_size(state.brush_size as i64);
        self.set_color(state.color);
    }

    // --- whole-canvas operations ---

    /// Reset every pixel to the background color.
    pub fn clear(&mut self) {
        self.buffer.fill(self.background);
        self.buffer.commit();
        self.events.emit(CanvasEvent::Cleared);
    }

    /// Pause or resume painting. Pausing ends any stroke in progress.
    pub fn set_enabled(&mut self, enabled: bool) {
        if !enabled {
            self.release();
        }
        self.enabled = enabled;
    }

    // --- projectiles ---

    /// Stamp a splash where a ball hit the surface.
    ///
    /// Returns false, painting nothing, when the impact misses the canvas.
    /// Does not affect the stroke in progress.
    pub fn handle_projectile_impact(&mut self, point: WorldPoint) -> bool {
        if !self.enabled {
            return false;
        }
        let Some(at) = self.mapping.world_to_canvas(point) else {
            log::warn!("Impact at {:?} is outside the canvas, ignoring", point);
            self.events.emit(CanvasEvent::ImpactRejected { point });
            return false;
        };

        let x = at.x.floor() as i32;
        let y = at.y.floor() as i32;
        let pixels = ball::apply(&mut self.buffer, x, y, &self.template, self.tools.color);
        self.buffer.commit();
        self.events.emit(CanvasEvent::SplashStamped { at, pixels });
        true
    }

    /// Handle a physics contact report. Only color balls leave paint.
    pub fn handle_impact_event(&mut self, impact: &ProjectileImpact) -> bool {
        match &impact.tag {
            ProjectileTag::ColorBall => {
                log::debug!("Color ball {} hit at {:?}", impact.id, impact.point);
                self.handle_projectile_impact(impact.point)
            }
            ProjectileTag::Other(tag) => {
                log::debug!("Ignoring impact from {} ({})", impact.id, tag);
                false
            }
        }
    }

    // --- accessors ---

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn tool(&self) -> PaintTool {
        self.tools.tool
    }

    pub fn brush_size(&self) -> u32 {
        self.tools.brush_size
    }

    pub fn color(&self) -> Color32 {
        self.tools.color
    }

    pub fn tool_state(&self) -> ToolState {
        self.tools
    }

    pub fn background(&self) -> Color32 {
        self.background
    }

    pub fn is_dragging(&self) -> bool {
        self.stroke.is_dragging()
    }

    pub fn last_point(&self) -> Option<Pos2> {
        self.stroke.last_point()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn mapping(&self) -> &SurfaceMapping {
        &self.mapping
    }

    pub fn template(&self) -> &SplashTemplate {
        &self.template
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventRecorder;
    use egui::pos2;

    fn engine(size: u32) -> CanvasEngine {
        CanvasEngine::builder(CanvasConfig::with_size(size))
            .splash_template(SplashTemplate::disc(4).unwrap())
            .rng(StdRng::seed_from_u64(5))
            .build()
            .unwrap()
    }

    #[test]
    fn test_build_without_template_fails() {
        let result = CanvasEngine::builder(CanvasConfig::default()).build();
        assert!(matches!(result, Err(CanvasError::MissingSplashTemplate)));
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let config = CanvasConfig {
            canvas_height: 0,
            ..CanvasConfig::default()
        };
        let result = CanvasEngine::builder(config)
            .splash_template(SplashTemplate::disc(4).unwrap())
            .build();
        assert!(matches!(result, Err(CanvasError::InvalidCanvasSize { .. })));
    }

    #[test]
    fn test_from_config_uses_builtin_disc() {
        let engine = CanvasEngine::from_config(CanvasConfig::with_size(32)).unwrap();
        assert_eq!(engine.template().size(), 48);
        assert_eq!(engine.buffer().count(Color32::WHITE), 32 * 32);
    }

    #[test]
    fn test_brush_size_is_clamped() {
        let mut engine = engine(16);
        engine.set_brush_size(0);
        assert_eq!(engine.brush_size(), 1);
        engine.set_brush_size(-7);
        assert_eq!(engine.brush_size(), 1);
        engine.set_brush_size_from_slider(3.6);
        assert_eq!(engine.brush_size(), 4);
        engine.set_brush_size_from_slider(f32::NAN);
        assert_eq!(engine.brush_size(), 1);
    }

    #[test]
    fn test_setters_do_not_touch_pixels() {
        let mut engine = engine(16);
        let version = engine.buffer().version();
        engine.set_tool(PaintTool::Spray);
        engine.set_color(Color32::RED);
        engine.set_brush_size(9);
        assert_eq!(engine.buffer().version(), version);
        assert_eq!(engine.buffer().count(Color32::WHITE), 256);
    }

    #[test]
    fn test_drag_state_transitions() {
        let mut engine = engine(64);
        assert!(!engine.is_dragging());

        engine.paint(pos2(5.0, 5.0));
        assert_eq!(engine.last_point(), Some(pos2(5.0, 5.0)));
        engine.paint(pos2(20.0, 5.0));
        assert_eq!(engine.last_point(), Some(pos2(20.0, 5.0)));

        engine.release();
        assert!(!engine.is_dragging());
        assert_eq!(engine.last_point(), None);
    }

    #[test]
    fn test_non_finite_point_is_ignored() {
        let mut engine = engine(16);
        engine.paint(pos2(f32::NAN, 1.0));
        assert!(!engine.is_dragging());
        assert_eq!(engine.buffer().count(Color32::WHITE), 256);
    }

    #[test]
    fn test_update_without_hit_releases() {
        let mut engine = engine(64);
        engine.update(PaintInput::pressed_at(pos2(10.0, 10.0)), &Color32::RED);
        assert!(engine.is_dragging());
        assert_eq!(engine.color(), Color32::RED);

        let missed = PaintInput {
            trigger_active: true,
            canvas_point: None,
        };
        engine.update(missed, &Color32::BLUE);
        assert!(!engine.is_dragging());
        assert_eq!(engine.color(), Color32::BLUE);
    }

    #[test]
    fn test_events_for_tool_and_stroke() {
        let recorder = EventRecorder::new();
        let mut engine = engine(32);
        engine.subscribe(recorder.clone());

        engine.set_tool(PaintTool::Eraser);
        engine.set_tool(PaintTool::Eraser);
        engine.paint(pos2(3.0, 3.0));
        engine.paint(pos2(4.0, 3.0));
        engine.release();
        engine.clear();

        assert_eq!(
            recorder.events(),
            vec![
                CanvasEvent::ToolChanged {
                    old: PaintTool::Brush,
                    new: PaintTool::Eraser
                },
                CanvasEvent::StrokeStarted { at: pos2(3.0, 3.0) },
                CanvasEvent::StrokeEnded,
                CanvasEvent::Cleared,
            ]
        );
    }

    #[test]
    fn test_disabled_engine_does_not_paint() {
        let mut engine = engine(32);
        engine.paint(pos2(8.0, 8.0));
        engine.set_enabled(false);
        assert!(!engine.is_dragging());

        engine.clear();
        engine.set_color(Color32::RED);
        engine.paint(pos2(8.0, 8.0));
        assert!(!engine.handle_projectile_impact(WorldPoint::default()));
        assert_eq!(engine.buffer().count(Color32::WHITE), 32 * 32);

        engine.set_enabled(true);
        engine.paint(pos2(8.0, 8.0));
        assert!(engine.buffer().count(Color32::RED) > 0);
    }

    #[test]
    fn test_other_projectiles_leave_no_paint() {
        let mut engine = engine(32);
        engine.set_color(Color32::RED);
        let impact = ProjectileImpact {
            id: Default::default(),
            tag: ProjectileTag::Other("Rock".to_owned()),
            point: WorldPoint::default(),
        };
        assert!(!engine.handle_impact_event(&impact));
        assert_eq!(engine.buffer().count(Color32::RED), 0);

        assert!(engine.handle_impact_event(&ProjectileImpact::color_ball(WorldPoint::default())));
        assert!(engine.buffer().count(Color32::RED) > 0);
    }

    #[test]
    fn test_apply_tool_state() {
        let mut engine = engine(16);
        engine.apply_tool_state(ToolState {
            tool: PaintTool::Ball,
            brush_size: 0,
            color: Color32::GREEN,
        });
        assert_eq!(engine.tool(), PaintTool::Ball);
        assert_eq!(engine.brush_size(), 1);
        assert_eq!(engine.color(), Color32::GREEN);
    }

    #[test]
    fn test_shared_engine_across_threads() {
        let shared = engine(32).into_shared();
        let worker = {
            let shared = shared.clone();
            std::thread::spawn(move || {
                let mut engine = shared.lock();
                engine.set_color(Color32::RED);
                engine.paint(pos2(16.0, 16.0));
            })
        };
        worker.join().unwrap();
        assert!(shared.lock().buffer().count(Color32::RED) > 0);
    }
}
