use std::path::Path;

/// Offered by the file picker. The service decides what it can actually read.
pub const AUDIO_EXTENSIONS: &[&str] = &["wav", "mp3", "flac", "ogg", "m4a", "aac", "webm"];
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "mkv", "webm"];

pub fn is_audio_or_video(path: &Path) -> bool {
    mime_guess::from_path(path)
        .iter()
        .any(|mime| matches!(mime.type_().as_str(), "audio" | "video"))
}
