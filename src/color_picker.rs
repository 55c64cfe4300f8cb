use egui::Color32;
use serde::{Deserialize, Serialize};

/// Something the engine can ask for the current paint color once per tick.
pub trait ColorSource {
    fn current_color(&self) -> Color32;
}

impl ColorSource for Color32 {
    fn current_color(&self) -> Color32 {
        *self
    }
}

/// Three-slider RGB picker. Starts out black.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ColorPicker {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

impl ColorPicker {
    pub fn new(red: f32, green: f32, blue: f32) -> Self {
        Self { red, green, blue }
    }

    /// Channel values as shown next to the sliders, 0-255
    pub fn channel_bytes(&self) -> [u8; 3] {
        [
            channel_to_byte(self.red),
            channel_to_byte(self.green),
            channel_to_byte(self.blue),
        ]
    }
}

fn channel_to_byte(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl ColorSource for ColorPicker {
    fn current_color(&self) -> Color32 {
        let [r, g, b] = self.channel_bytes();
        Color32::from_rgb(r, g, b)
    }
}
