#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use splash_canvas::{CanvasConfig, SplashCanvasApp};

/// Environment variable naming a JSON config file
const CONFIG_ENV: &str = "SPLASH_CANVAS_CONFIG";

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::var_os(CONFIG_ENV) {
        Some(path) => match CanvasConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                log::error!("Could not load config from {}: {}", path.to_string_lossy(), err);
                std::process::exit(1);
            }
        },
        None => CanvasConfig::default(),
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 640.0])
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Splash Canvas",
        native_options,
        Box::new(|cc| Ok(Box::new(SplashCanvasApp::new(cc, config)?))),
    )
}
