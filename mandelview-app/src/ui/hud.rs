use eframe::egui;

use crate::app::{MandelViewApp, HUD_ALPHA, HUD_CORNER_RADIUS, HUD_MARGIN};

impl MandelViewApp {
    pub(crate) fn show_hud(&mut self, ctx: &egui::Context) {
        if !self.show_hud {
            return;
        }

        // -- Top-left: viewport and frame info --
        egui::Area::new(egui::Id::new("hud_params"))
            .anchor(egui::Align2::LEFT_TOP, [HUD_MARGIN, HUD_MARGIN])
            .show(ctx, |ui| {
                egui::Frame::NONE
                    .fill(egui::Color32::from_black_alpha(HUD_ALPHA))
                    .inner_margin(egui::Margin::same(8))
                    .corner_radius(HUD_CORNER_RADIUS)
                    .show(ui, |ui| {
                        ui.style_mut().visuals.override_text_color =
                            Some(egui::Color32::from_rgb(220, 220, 220));
                        ui.style_mut().spacing.item_spacing.y = 2.0;

                        let view = self.engine.viewport().view();
                        ui.label(format!(
                            "Center: {:.10} {:+.10}i",
                            view.center.re, view.center.im
                        ));
                        ui.label(format!("Zoom: {:.3e}", view.zoom));
                        ui.label(format!(
                            "Detail: {}/{}",
                            self.engine.detail_level(),
                            self.engine.scheduler().max_level()
                        ));

                        if let Some(stats) = self.last_stats {
                            ui.label(format!(
                                "Frame: {:.1} ms, stride {}, {} samples, {} workers",
                                stats.elapsed.as_secs_f64() * 1000.0,
                                stats.stride,
                                stats.samples,
                                stats.workers
                            ));
                        }

                        if let Some(ref err) = self.last_error {
                            ui.colored_label(egui::Color32::from_rgb(255, 120, 100), err);
                        }
                    });
            });

        // -- Bottom-left: controls --
        egui::Area::new(egui::Id::new("hud_controls"))
            .anchor(egui::Align2::LEFT_BOTTOM, [HUD_MARGIN, -HUD_MARGIN])
            .show(ctx, |ui| {
                egui::Frame::NONE
                    .fill(egui::Color32::from_black_alpha(HUD_ALPHA))
                    .inner_margin(egui::Margin::same(6))
                    .corner_radius(HUD_CORNER_RADIUS)
                    .show(ui, |ui| {
                        ui.style_mut().visuals.override_text_color =
                            Some(egui::Color32::from_rgb(200, 200, 200));
                        ui.label("Drag: pan   Wheel: zoom   R: reset   H: hide HUD");
                    });
            });
    }
}
