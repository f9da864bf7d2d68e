use eframe::egui;
use tracing::{error, info, warn};

use mandelview_render::{Engine, FrameBuffer, FramePresenter, FrameStats};

use crate::preferences::AppPreferences;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub(crate) const HUD_MARGIN: f32 = 8.0;
pub(crate) const HUD_CORNER_RADIUS: f32 = 4.0;
pub(crate) const HUD_ALPHA: u8 = 166;

// ---------------------------------------------------------------------------
// Texture presenter
// ---------------------------------------------------------------------------

/// Uploads finished frames into the canvas texture.
struct TexturePresenter<'a> {
    ctx: &'a egui::Context,
    texture: &'a mut Option<egui::TextureHandle>,
}

impl FramePresenter for TexturePresenter<'_> {
    fn present(&mut self, frame: &FrameBuffer) {
        let image = egui::ColorImage::from_rgb(
            [frame.width() as usize, frame.height() as usize],
            frame.pixels(),
        );
        match self.texture {
            Some(texture) => texture.set(image, egui::TextureOptions::LINEAR),
            None => {
                *self.texture =
                    Some(self.ctx.load_texture("fractal", image, egui::TextureOptions::LINEAR));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Application
// ---------------------------------------------------------------------------

pub(crate) struct MandelViewApp {
    pub(crate) engine: Engine,
    pub(crate) preferences: AppPreferences,
    pub(crate) texture: Option<egui::TextureHandle>,
    pub(crate) last_stats: Option<FrameStats>,
    /// Set when a frame failed; cleared by the next accepted input.
    pub(crate) last_error: Option<String>,
    pub(crate) show_hud: bool,
}

impl MandelViewApp {
    pub(crate) fn new(preferences: AppPreferences) -> mandelview_render::Result<Self> {
        let mut engine = Engine::new(preferences.engine.clone())?;

        if preferences.restore_last_view {
            if let Some(view) = preferences.last_view {
                match engine.set_view(view) {
                    Ok(()) => info!(
                        re = view.center.re,
                        im = view.center.im,
                        zoom = view.zoom,
                        "Restored last view"
                    ),
                    Err(e) => warn!("Could not restore last view: {e}"),
                }
            }
        }

        Ok(Self {
            engine,
            show_hud: preferences.show_hud,
            preferences,
            texture: None,
            last_stats: None,
            last_error: None,
        })
    }

    /// Render the next refinement step and upload it.
    fn render_frame(&mut self, ctx: &egui::Context) {
        let mut presenter = TexturePresenter {
            ctx,
            texture: &mut self.texture,
        };
        match self.engine.render_and_present(&mut presenter) {
            Ok(stats) => {
                self.last_stats = Some(stats);
                self.last_error = None;
            }
            Err(e) => {
                error!("Frame failed: {e}");
                self.last_error = Some(e.to_string());
            }
        }
    }

    fn wants_frame(&self) -> bool {
        self.engine.needs_render() && self.last_error.is_none()
    }
}

// ---------------------------------------------------------------------------
// eframe::App
// ---------------------------------------------------------------------------

impl eframe::App for MandelViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(egui::Visuals::dark());
        self.handle_keyboard(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let (response, painter) =
                    ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());

                self.handle_canvas_input(ctx, &response);

                if self.wants_frame() {
                    self.render_frame(ctx);
                }

                if let Some(ref tex) = self.texture {
                    let uv =
                        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                    painter.image(tex.id(), response.rect, uv, egui::Color32::WHITE);
                }
            });

        self.show_hud(ctx);

        // Keep refining while idle until the frame is at full detail.
        if self.wants_frame() {
            ctx.request_repaint();
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.preferences.last_view = Some(self.engine.viewport().view());
        self.preferences.show_hud = self.show_hud;
        self.preferences.save();
        info!("Saved preferences on exit");
    }
}
