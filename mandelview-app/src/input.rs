use eframe::egui;
use tracing::debug;

use crate::app::MandelViewApp;
use crate::navigation::{drag_to_plane, wheel_delta};

impl MandelViewApp {
    pub(crate) fn handle_canvas_input(&mut self, ctx: &egui::Context, response: &egui::Response) {
        if response.dragged_by(egui::PointerButton::Primary) {
            let drag = response.drag_delta();
            if drag != egui::Vec2::ZERO {
                let config = self.engine.config();
                let (dx, dy) = drag_to_plane(
                    &self.engine.viewport().view(),
                    drag,
                    response.rect.size(),
                    config.width,
                    config.height,
                );
                let result = self.engine.pan(dx, dy);
                self.after_input(result);
            }
        }

        let scroll_y = ctx.input(|i| i.raw_scroll_delta.y);
        if scroll_y != 0.0 && response.hovered() {
            let line_speed = ctx.options(|o| o.input_options.line_scroll_speed);
            let result = self.engine.zoom_by_wheel(wheel_delta(scroll_y, line_speed));
            self.after_input(result);
        }
    }

    pub(crate) fn handle_keyboard(&mut self, ctx: &egui::Context) {
        ctx.input(|input| {
            if input.key_pressed(egui::Key::R) {
                self.engine.reset_view();
                self.last_error = None;
            }
            if input.key_pressed(egui::Key::H) {
                self.show_hud = !self.show_hud;
            }
        });
    }

    fn after_input(&mut self, result: mandelview_render::Result<()>) {
        match result {
            Ok(()) => self.last_error = None,
            Err(e) => debug!("Input ignored: {e}"),
        }
    }
}
