use egui::Slider;

use crate::app::SplashCanvasApp;
use crate::color_picker::ColorSource;
use crate::event::CanvasEvent;
use crate::tool::PaintTool;

fn shortcut_label(tool: PaintTool) -> &'static str {
    match tool {
        PaintTool::Brush => "1",
        PaintTool::Spray => "2",
        PaintTool::Ball => "3",
        PaintTool::Eraser => "0",
    }
}

pub fn tools_panel(app: &mut SplashCanvasApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Tools");

            let active = app.canvas().tool();
            for tool in PaintTool::ALL {
                let label = format!("{} ({})", tool.name(), shortcut_label(tool));
                if ui.selectable_label(active == tool, label).clicked() {
                    log::info!("Tool selected from UI: {}", tool);
                    app.canvas_mut().set_tool(tool);
                }
            }
            ui.label(format!("Selected tool: {}", app.canvas().tool()));
            ui.separator();

            let mut brush_size = app.canvas().brush_size() as f32;
            let slider = Slider::new(&mut brush_size, 1.0..=50.0).text("Brush size");
            if ui.add(slider).changed() {
                app.canvas_mut().set_brush_size_from_slider(brush_size);
            }
            ui.separator();

            ui.label("Color");
            let picker = app.picker_mut();
            ui.add(Slider::new(&mut picker.red, 0.0..=1.0).text("R"));
            ui.add(Slider::new(&mut picker.green, 0.0..=1.0).text("G"));
            ui.add(Slider::new(&mut picker.blue, 0.0..=1.0).text("B"));

            let [r, g, b] = picker.channel_bytes();
            let color = picker.current_color();
            ui.horizontal(|ui| {
                egui::color_picker::show_color(ui, color, egui::vec2(32.0, 32.0));
                ui.label(format!("{r}\n{g}\n{b}"));
            });
            ui.separator();

            if ui.button("Clear (R)").clicked() {
                app.canvas_mut().clear();
            }

            if let Some(event) = app.last_event() {
                ui.separator();
                ui.small(describe(&event));
            }
        });
}

fn describe(event: &CanvasEvent) -> String {
    match event {
        CanvasEvent::ToolChanged { new, .. } => format!("Switched to {new}"),
        CanvasEvent::BrushSizeChanged { size } => format!("Brush size {size}"),
        CanvasEvent::StrokeStarted { at } => format!("Stroke at ({:.0}, {:.0})", at.x, at.y),
        CanvasEvent::StrokeEnded => "Stroke finished".to_owned(),
        CanvasEvent::Cleared => "Canvas cleared".to_owned(),
        CanvasEvent::SplashStamped { pixels, .. } => format!("Splash covered {pixels} px"),
        CanvasEvent::ImpactRejected { .. } => "Ball missed the canvas".to_owned(),
    }
}
