#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod color_picker;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod input;
pub mod panels;
pub mod pixel_buffer;
pub mod projectile;
pub mod splash;
pub mod stroke;
pub mod tool;

pub use app::SplashCanvasApp;
pub use color_picker::{ColorPicker, ColorSource};
pub use config::CanvasConfig;
pub use engine::{CanvasEngine, PaintInput, SharedCanvas, ToolState};
pub use error::{CanvasError, CanvasResult};
pub use pixel_buffer::PixelBuffer;
pub use projectile::{ProjectileImpact, ProjectileTag, SurfaceMapping, WorldPoint};
pub use splash::SplashTemplate;
pub use tool::PaintTool;
