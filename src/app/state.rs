use crate::upload::{Blob, Prediction, UploadError};

/// Everything the window shows is derived from this value.
#[derive(Debug, Default)]
pub enum UploadState {
    #[default]
    Idle,
    FileSelected {
        file: Blob,
    },
    Pending {
        file: Blob,
    },
    Succeeded {
        file: Blob,
        prediction: Prediction,
    },
    Failed {
        file: Option<Blob>,
        error: UploadError,
    },
}

impl UploadState {
    pub fn clear(&mut self) {
        *self = UploadState::default();
    }

    pub fn selected_file(&self) -> Option<&Blob> {
        match self {
            UploadState::Idle => None,
            UploadState::FileSelected { file }
            | UploadState::Pending { file }
            | UploadState::Succeeded { file, .. } => Some(file),
            UploadState::Failed { file, .. } => file.as_ref(),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, UploadState::Pending { .. })
    }

    pub fn prediction(&self) -> Option<&Prediction> {
        match self {
            UploadState::Succeeded { prediction, .. } => Some(prediction),
            _ => None,
        }
    }

    /// The emotion label, once a request has succeeded.
    pub fn result(&self) -> Option<&str> {
        self.prediction().map(|p| p.emotion.as_str())
    }

    pub fn error(&self) -> Option<&UploadError> {
        match self {
            UploadState::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<String> {
        self.error().map(|e| e.to_string())
    }

    pub fn can_submit(&self) -> bool {
        !self.is_pending() && self.selected_file().is_some()
    }

    pub fn get_status_text(&self) -> &'static str {
        match self {
            UploadState::Idle => "Choose an audio or video file",
            UploadState::FileSelected { .. } => "Ready to analyze",
            UploadState::Pending { .. } => "Analyzing...",
            UploadState::Succeeded { .. } => "Analysis complete",
            UploadState::Failed { file: None, .. } => "No file selected",
            UploadState::Failed { .. } => "Analysis failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn clip() -> Blob {
        Blob::new("clip.wav", vec![1, 2, 3])
    }

    #[test]
    fn idle_has_nothing_to_show() {
        let state = UploadState::default();
        assert!(state.selected_file().is_none());
        assert!(!state.is_pending());
        assert!(state.result().is_none());
        assert!(state.error().is_none());
        assert!(!state.can_submit());
    }

    #[test]
    fn pending_keeps_file_and_blocks_submission() {
        let state = UploadState::Pending { file: clip() };
        assert_eq!(state.selected_file().map(|f| f.name.as_str()), Some("clip.wav"));
        assert!(state.is_pending());
        assert!(!state.can_submit());
        assert_eq!(state.get_status_text(), "Analyzing...");
    }

    #[test]
    fn succeeded_exposes_result_but_no_error() {
        let state = UploadState::Succeeded {
            file: clip(),
            prediction: Prediction::new("calm".to_string(), None, BTreeMap::new()),
        };
        assert_eq!(state.result(), Some("calm"));
        assert!(state.error().is_none());
        assert!(state.can_submit());
    }

    #[test]
    fn validation_failure_has_no_file() {
        let state = UploadState::Failed {
            file: None,
            error: UploadError::Validation,
        };
        assert!(state.selected_file().is_none());
        assert!(state.result().is_none());
        assert_eq!(
            state.error_message().as_deref(),
            Some("Please select a file first")
        );
        assert!(!state.can_submit());
        assert_eq!(state.get_status_text(), "No file selected");
    }

    #[test]
    fn failure_with_file_reports_failed_analysis() {
        let state = UploadState::Failed {
            file: Some(clip()),
            error: UploadError::Service("unsupported format".to_string()),
        };
        assert_eq!(state.get_status_text(), "Analysis failed");
        assert!(state.can_submit());
    }

    #[test]
    fn clear_returns_to_idle() {
        let mut state = UploadState::FileSelected { file: clip() };
        state.clear();
        assert!(matches!(state, UploadState::Idle));
    }
}
