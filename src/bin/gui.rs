use eframe::egui;
use plot_timeline::{logging, CanvasConfig, TimelineApp};
use std::path::Path;

fn main() -> eframe::Result<()> {
    if let Err(e) = logging::init_logging(logging::default_log_level()) {
        eprintln!("logging disabled: {:#}", e);
    }

    // Optional config file as the first argument
    let config = match std::env::args().nth(1) {
        Some(path) => CanvasConfig::load(Path::new(&path)).unwrap_or_else(|e| {
            log::warn!("using default config: {:#}", e);
            CanvasConfig::default()
        }),
        None => CanvasConfig::default(),
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_title("Plot Timeline"),
        ..Default::default()
    };

    eframe::run_native(
        "Plot Timeline",
        options,
        Box::new(|_cc| Ok(Box::new(TimelineApp::new(config)))),
    )
}
