use crate::app::SplashCanvasApp;

/// Draws the canvas image scaled to fit and routes pointer input over it.
pub fn central_panel(app: &mut SplashCanvasApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let texture = app.canvas_texture(ctx);

        let buffer = app.canvas().buffer();
        let canvas_size = egui::vec2(buffer.width() as f32, buffer.height() as f32);
        let available = ui.available_size();
        let scale = (available.x / canvas_size.x)
            .min(available.y / canvas_size.y)
            .max(0.1);

        let response = ui.add(
            egui::Image::new((texture, canvas_size * scale)).sense(egui::Sense::click_and_drag()),
        );

        app.input_mut().set_canvas_rect(response.rect);
        let frame = app.input().process_input(ctx, &response, app.canvas().tool());
        app.handle_frame_input(frame);
    });
}
