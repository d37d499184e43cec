use eframe::egui;
use job_metrics::viewer::AnalyzerApp;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 500.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Analyzer",
        options,
        Box::new(|_cc| Ok(Box::new(AnalyzerApp::default()))),
    )
}
