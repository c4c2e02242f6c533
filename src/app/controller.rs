use super::UploadState;
use crate::upload::{
    Blob, PredictClient, PredictResponse, Prediction, TransportError, UploadError,
    SERVICE_FALLBACK_MESSAGE,
};
use std::mem;
use tracing::{debug, error, info, warn};

/// Owns the interaction state and mediates the single outbound request.
#[derive(Debug, Default)]
pub struct UploadController {
    state: UploadState,
}

impl UploadController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &UploadState {
        &self.state
    }

    pub fn reset(&mut self) {
        debug!("Resetting upload state");
        self.state.clear();
    }

    /// Replaces the selected file. Any previous result or error is dropped.
    pub fn select_file(&mut self, file: Option<Blob>) {
        if self.state.is_pending() {
            warn!("Ignoring file selection while a request is pending");
            return;
        }

        self.state = match file {
            Some(file) => {
                info!(file = %file.name, size = file.size(), "File selected");
                UploadState::FileSelected { file }
            }
            None => UploadState::Idle,
        };
    }

    /// Records a failure that happened before any request was made, such as an
    /// unreadable file. The current selection is kept.
    pub fn record_error(&mut self, error: UploadError) {
        if self.state.is_pending() {
            warn!(%error, "Ignoring local error while a request is pending");
            return;
        }

        error!(%error, "Upload error");
        let file = self.take_file();
        self.state = UploadState::Failed { file, error };
    }

    /// Moves to `Pending` and hands back the blob to send.
    pub fn start_submit(&mut self) -> Result<Blob, UploadError> {
        if self.state.is_pending() {
            warn!("Submission requested while another is pending");
            return Err(UploadError::Busy);
        }

        let Some(file) = self.take_file() else {
            warn!("Submission requested without a selected file");
            self.state = UploadState::Failed {
                file: None,
                error: UploadError::Validation,
            };
            return Err(UploadError::Validation);
        };

        info!(file = %file.name, "Starting emotion detection");
        self.state = UploadState::Pending { file: file.clone() };
        Ok(file)
    }

    /// Applies the outcome of the outstanding request. Always leaves `Pending`.
    pub fn finish_submit(&mut self, outcome: Result<PredictResponse, TransportError>) {
        if !self.state.is_pending() {
            warn!("Received a response with no request pending; ignoring it");
            return;
        }
        let Some(file) = self.take_file() else {
            return;
        };

        self.state = match outcome {
            Ok(PredictResponse {
                success: true,
                emotion: Some(emotion),
                confidence,
                probabilities,
                ..
            }) if !emotion.is_empty() => {
                info!(%emotion, ?confidence, "Emotion detected");
                UploadState::Succeeded {
                    file,
                    prediction: Prediction::new(emotion, confidence, probabilities),
                }
            }
            Ok(response) => {
                let message = response
                    .error
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| SERVICE_FALLBACK_MESSAGE.to_string());
                warn!(%message, "Service reported a failure");
                UploadState::Failed {
                    file: Some(file),
                    error: UploadError::Service(message),
                }
            }
            Err(TransportError::Read { name, source }) => {
                error!(%name, error = %source, "Selected file could not be read");
                UploadState::Failed {
                    file: Some(file),
                    error: UploadError::Read { name, source },
                }
            }
            Err(e) => {
                error!(error = %e, "Request to the inference service failed");
                UploadState::Failed {
                    file: Some(file),
                    error: UploadError::Transport(e),
                }
            }
        };
    }

    /// Runs a whole submission on the current task.
    pub async fn submit(&mut self, client: &dyn PredictClient) -> Result<(), UploadError> {
        let file = self.start_submit()?;
        let outcome = client.predict(&file).await;
        self.finish_submit(outcome);
        Ok(())
    }

    fn take_file(&mut self) -> Option<Blob> {
        match mem::take(&mut self.state) {
            UploadState::Idle => None,
            UploadState::FileSelected { file }
            | UploadState::Pending { file }
            | UploadState::Succeeded { file, .. } => Some(file),
            UploadState::Failed { file, .. } => file,
        }
    }
}
