use super::color::ColorExt;
use eframe::egui::Color32;

/// label, emoji, accent color
const EMOTIONS: [(&str, &str, &str); 8] = [
    ("neutral", "😐", "#94a3b8"),
    ("calm", "😌", "#60a5fa"),
    ("happy", "😊", "#fbbf24"),
    ("sad", "😢", "#3b82f6"),
    ("angry", "😠", "#ef4444"),
    ("fearful", "😨", "#a855f7"),
    ("disgust", "🤢", "#10b981"),
    ("surprised", "😲", "#f97316"),
];

const UNKNOWN_ACCENT: Color32 = Color32::from_rgb(150, 150, 150);

fn lookup(label: &str) -> Option<&'static (&'static str, &'static str, &'static str)> {
    EMOTIONS
        .iter()
        .find(|(name, _, _)| name.eq_ignore_ascii_case(label.trim()))
}

pub fn emoji_for(label: &str) -> Option<&'static str> {
    lookup(label).map(|(_, emoji, _)| *emoji)
}

pub fn color_for(label: &str) -> Color32 {
    lookup(label)
        .and_then(|(_, _, hex)| Color32::from_hex(hex))
        .unwrap_or(UNKNOWN_ACCENT)
}
