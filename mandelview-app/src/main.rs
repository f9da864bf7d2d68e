mod app;
mod app_dir;
mod input;
mod navigation;
mod preferences;
mod ui;

use eframe::egui;
use tracing::info;

use app::MandelViewApp;
use preferences::AppPreferences;

fn main() -> eframe::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting MandelView");

    let prefs = AppPreferences::load();
    let (width, height) = (prefs.engine.width as f32, prefs.engine.height as f32);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("MandelView")
            .with_inner_size([width, height]),
        ..Default::default()
    };

    eframe::run_native(
        "MandelView",
        options,
        Box::new(move |_cc| Ok(Box::new(MandelViewApp::new(prefs)?))),
    )
}
