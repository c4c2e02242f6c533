mod controller;
mod state;
mod ui;

use crate::upload::{Blob, HttpPredictClient, PredictClient, PredictResponse, TransportError};
use eframe::{egui, App};
use std::path::Path;
use std::sync::mpsc as std_mpsc;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub use controller::UploadController;
pub use state::UploadState;

type Outcome = Result<PredictResponse, TransportError>;

pub struct EmotionDetector {
    controller: UploadController,
    client: Arc<dyn PredictClient>,
    outcome_receiver: Option<std_mpsc::Receiver<Outcome>>,
}

impl EmotionDetector {
    pub fn new(_cc: &eframe::CreationContext<'_>, endpoint: String) -> Self {
        info!(%endpoint, "Initializing Emotion Detector");
        Self::with_client(Arc::new(HttpPredictClient::new(endpoint)))
    }

    pub fn with_client(client: Arc<dyn PredictClient>) -> Self {
        Self {
            controller: UploadController::new(),
            client,
            outcome_receiver: None,
        }
    }

    pub fn state(&self) -> &UploadState {
        self.controller.state()
    }

    pub fn load_file(&mut self, path: &Path) {
        if !crate::utils::media::is_audio_or_video(path) {
            warn!(path = %path.display(), "Selected file does not look like audio or video");
        }

        match Blob::from_path(path) {
            Ok(blob) => self.controller.select_file(Some(blob)),
            Err(e) => self.controller.record_error(e),
        }
    }

    fn accept_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let Some(file) = dropped.into_iter().next() else {
            return;
        };

        if let Some(path) = &file.path {
            self.load_file(path);
        } else if let Some(bytes) = file.bytes {
            self.controller.select_file(Some(Blob::new(file.name, bytes)));
        }
    }

    pub fn start_detection(&mut self, ctx: &egui::Context) {
        let file = match self.controller.start_submit() {
            Ok(file) => file,
            Err(e) => {
                debug!(error = %e, "Submission not started");
                return;
            }
        };

        let (sender, receiver) = std_mpsc::channel();
        self.outcome_receiver = Some(receiver);

        let client = Arc::clone(&self.client);
        let ctx = ctx.clone();

        std::thread::spawn(move || {
            let outcome = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt.block_on(async { client.predict(&file).await }),
                Err(e) => Err(TransportError::Io(e)),
            };
            let _ = sender.send(outcome);
            ctx.request_repaint();
        });
    }

    pub fn update_state(&mut self) {
        let Some(receiver) = &self.outcome_receiver else {
            return;
        };

        match receiver.try_recv() {
            Ok(outcome) => {
                self.outcome_receiver = None;
                self.controller.finish_submit(outcome);
            }
            Err(std_mpsc::TryRecvError::Empty) => {}
            Err(std_mpsc::TryRecvError::Disconnected) => {
                // The worker died without answering; don't leave the UI pending.
                self.outcome_receiver = None;
                self.controller.finish_submit(Err(TransportError::Io(std::io::Error::new(
                    std::io::ErrorKind::BrokenPipe,
                    "prediction worker exited without a result",
                ))));
            }
        }
    }
}

impl App for EmotionDetector {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_state();
        if !self.controller.state().is_pending() {
            self.accept_dropped_files(ctx);
        }
        self.render(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::TRANSPORT_MESSAGE;
    use async_trait::async_trait;
    use std::time::{Duration, Instant};

    struct Canned(&'static str);

    #[async_trait]
    impl PredictClient for Canned {
        async fn predict(&self, _file: &Blob) -> Result<PredictResponse, TransportError> {
            Ok(serde_json::from_str(self.0)?)
        }
    }

    struct Crashing;

    #[async_trait]
    impl PredictClient for Crashing {
        async fn predict(&self, _file: &Blob) -> Result<PredictResponse, TransportError> {
            panic!("worker crashed before answering");
        }
    }

    fn wait_for_outcome(app: &mut EmotionDetector) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while app.state().is_pending() && Instant::now() < deadline {
            app.update_state();
            std::thread::sleep(Duration::from_millis(10));
        }
    }

    #[test]
    fn background_detection_reaches_success() {
        let mut app =
            EmotionDetector::with_client(Arc::new(Canned(r#"{"success":true,"emotion":"sad"}"#)));
        app.controller
            .select_file(Some(Blob::new("clip.wav", b"audio".to_vec())));

        app.start_detection(&egui::Context::default());
        assert!(app.state().is_pending());

        wait_for_outcome(&mut app);
        assert_eq!(app.state().result(), Some("sad"));
        assert!(app.outcome_receiver.is_none());
    }

    #[test]
    fn background_detection_reports_malformed_body() {
        let mut app = EmotionDetector::with_client(Arc::new(Canned("<html>")));
        app.controller
            .select_file(Some(Blob::new("clip.wav", b"audio".to_vec())));

        app.start_detection(&egui::Context::default());
        wait_for_outcome(&mut app);
        assert!(!app.state().is_pending());
        assert_eq!(
            app.state().error_message().as_deref(),
            Some("Failed to connect to server")
        );
    }

    #[test]
    fn dead_worker_does_not_leave_ui_pending() {
        let mut app = EmotionDetector::with_client(Arc::new(Crashing));
        app.controller
            .select_file(Some(Blob::new("clip.wav", b"audio".to_vec())));

        app.start_detection(&egui::Context::default());
        assert!(app.state().is_pending());

        wait_for_outcome(&mut app);
        assert!(!app.state().is_pending());
        assert_eq!(
            app.state().error_message().as_deref(),
            Some(TRANSPORT_MESSAGE)
        );
        assert!(app.outcome_receiver.is_none());
    }

    #[test]
    fn detection_without_file_spawns_nothing() {
        let mut app = EmotionDetector::with_client(Arc::new(Canned("{}")));
        app.start_detection(&egui::Context::default());

        assert!(app.outcome_receiver.is_none());
        assert_eq!(
            app.state().error_message().as_deref(),
            Some("Please select a file first")
        );
    }

    #[test]
    fn unreadable_path_is_reported() {
        let mut app = EmotionDetector::with_client(Arc::new(Canned("{}")));
        app.load_file(Path::new("/definitely/not/here/clip.wav"));

        assert!(app
            .state()
            .error_message()
            .is_some_and(|m| m.starts_with("Failed to read clip.wav")));
    }
}
