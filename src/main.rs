use sketch_canvas::{CanvasConfig, PaintApp};

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = CanvasConfig::from_env();
    log::info!("Starting with config: {:?}", config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Sketch Canvas")
            .with_inner_size([1024.0, 768.0])
            .with_min_inner_size([400.0, 300.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "Sketch Canvas",
        options,
        Box::new(|cc| Ok(Box::new(PaintApp::new(cc, config)))),
    )
}
