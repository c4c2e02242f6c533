use anyhow::anyhow;
use clap::Parser;
use emotion_uploader::app::EmotionDetector;
use emotion_uploader::config::Config;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([520.0, 640.0])
            .with_min_inner_size([400.0, 480.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    let endpoint = config.endpoint;
    eframe::run_native(
        "Emotion Detector",
        options,
        Box::new(move |cc| Box::new(EmotionDetector::new(cc, endpoint))),
    )
    .map_err(|e| anyhow!("failed to start the window: {}", e))
}
