use super::EmotionDetector;
use crate::upload::Prediction;
use crate::utils::color::ColorExt;
use crate::utils::emotion::{color_for, emoji_for};
use crate::utils::file_size::format_size;
use crate::utils::media::{AUDIO_EXTENSIONS, VIDEO_EXTENSIONS};
use eframe::egui::{self, Color32, RichText};
use rfd::FileDialog;

const ERROR_COLOR: Color32 = Color32::from_rgb(220, 50, 50);

impl EmotionDetector {
    pub fn render(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(20.0);
                ui.vertical_centered(|ui| {
                    ui.heading("Emotion Detector");
                    ui.add_space(5.0);
                    ui.label(
                        RichText::new("Upload an audio or video clip to detect the emotion in it")
                            .color(ui.visuals().text_color().gamma_multiply(0.7)),
                    );
                });

                ui.add_space(20.0);
                self.render_file_selection(ui);

                ui.add_space(20.0);
                ui.vertical_centered(|ui| {
                    let state = self.state();
                    let pending = state.is_pending();
                    let label = if pending {
                        "⏳ Analyzing..."
                    } else {
                        "🎭 Detect Emotion"
                    };

                    let button = egui::Button::new(label).min_size(egui::vec2(200.0, 40.0));
                    if ui.add_enabled(state.can_submit(), button).clicked() {
                        self.start_detection(ctx);
                    }

                    if pending {
                        ui.add_space(8.0);
                        ui.spinner();
                    }
                });

                if let Some(error) = self.state().error_message() {
                    ui.add_space(15.0);
                    ui.vertical_centered(|ui| {
                        ui.colored_label(ERROR_COLOR, error);
                    });
                }

                if let Some(prediction) = self.state().prediction() {
                    ui.add_space(20.0);
                    render_prediction(ui, prediction);
                }

                ui.add_space(20.0);
            });
        });
    }

    fn render_file_selection(&mut self, ui: &mut egui::Ui) {
        let pending = self.state().is_pending();

        ui.label("Drop a file on the window or pick one below");
        ui.add_space(10.0);
        ui.group(|ui| {
            ui.horizontal(|ui| {
                let picker = ui.add_enabled(!pending, egui::Button::new("🎵 Select File"));
                if picker.clicked() {
                    if let Some(path) = FileDialog::new()
                        .add_filter("Audio", AUDIO_EXTENSIONS)
                        .add_filter("Video", VIDEO_EXTENSIONS)
                        .pick_file()
                    {
                        self.load_file(&path);
                    }
                }

                if let Some(file) = self.state().selected_file() {
                    ui.label(format!(
                        "Selected: {} ({})",
                        file.name,
                        format_size(file.size())
                    ));
                }
            });
        });

        ui.add_space(5.0);
        ui.horizontal(|ui| {
            ui.label(
                RichText::new(self.state().get_status_text())
                    .color(ui.visuals().text_color().gamma_multiply(0.7)),
            );
            let can_clear = self.state().selected_file().is_some() && !pending;
            if can_clear && ui.small_button("🗑 Clear").clicked() {
                self.controller.reset();
            }
        });
    }
}

fn render_prediction(ui: &mut egui::Ui, prediction: &Prediction) {
    let accent = color_for(&prediction.emotion);

    egui::Frame::none()
        .fill(accent.faded(0.08))
        .stroke(egui::Stroke::new(2.0, accent))
        .rounding(8.0)
        .inner_margin(20.0)
        .show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading(
                    RichText::new(format!("Detected Emotion: {}", prediction.emotion)).color(accent),
                );
                if let Some(emoji) = emoji_for(&prediction.emotion) {
                    ui.label(RichText::new(emoji).size(64.0));
                }
                if let Some(confidence) = prediction.confidence {
                    ui.label(format!("Confidence: {:.1}%", confidence * 100.0));
                }
            });

            if !prediction.probabilities.is_empty() {
                ui.add_space(10.0);
                for (label, probability) in &prediction.probabilities {
                    ui.horizontal(|ui| {
                        ui.label(format!("{} {}", emoji_for(label).unwrap_or("•"), label));
                        ui.add(
                            egui::ProgressBar::new(*probability)
                                .text(format!("{:.1}%", probability * 100.0))
                                .fill(color_for(label)),
                        );
                    });
                }
            }
        });
}
