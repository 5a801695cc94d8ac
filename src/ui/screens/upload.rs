use {
    crate::{
        engine::VisionEngine,
        models::HistoryEntry,
        ui::{
            DirectionColor, UI_CONFIG, UiAction, UiStyleExt, UiText,
            ui_text::ICON_UPLOAD,
            utils::direction_icon,
        },
        utils::local_wall_clock,
    },
    eframe::egui::{Align, Frame, Layout, RichText, ScrollArea, Sense, Stroke, Ui},
};

#[cfg(not(target_arch = "wasm32"))]
use eframe::egui::TextEdit;

pub(crate) fn render_upload(
    ui: &mut Ui,
    engine: &VisionEngine,
    path_input: &mut String,
    text: &UiText,
) -> Option<UiAction> {
    let mut action = None;

    ui.vertical_centered(|ui| {
        ui.set_max_width(UI_CONFIG.content_width);
        ui.add_space(24.0);

        let hovering = ui.ctx().input(|i| !i.raw.hovered_files.is_empty());
        let border = if hovering {
            UI_CONFIG.colors.accent
        } else {
            UI_CONFIG.colors.card_border
        };

        Frame {
            stroke: Stroke::new(2.0, border),
            ..UI_CONFIG.card_frame()
        }
        .show(ui, |ui| {
            ui.set_min_height(200.0);
            ui.vertical_centered(|ui| {
                ui.add_space(24.0);
                ui.label(RichText::new(ICON_UPLOAD).size(36.0).color(border));
                ui.label(
                    RichText::new(text.upload_title)
                        .size(24.0)
                        .strong()
                        .color(UI_CONFIG.colors.heading),
                );
                ui.label_subdued(text.upload_desc);
                ui.add_space(12.0);

                // The browser delivers files through drag and drop only
                #[cfg(not(target_arch = "wasm32"))]
                ui.horizontal(|ui| {
                    ui.add_space((ui.available_width() - 380.0).max(0.0) / 2.0);
                    let input = ui.add(
                        TextEdit::singleline(path_input)
                            .hint_text(text.upload_path_hint)
                            .desired_width(300.0),
                    );
                    let submitted =
                        input.lost_focus() && ui.input(|i| i.key_pressed(eframe::egui::Key::Enter));
                    if (ui.button(text.upload_load_btn).clicked() || submitted)
                        && !path_input.trim().is_empty()
                    {
                        action = Some(UiAction::LoadPath(path_input.trim().to_string()));
                    }
                });
                #[cfg(target_arch = "wasm32")]
                let _ = &path_input;

                ui.add_space(8.0);
                ui.label(
                    RichText::new(text.supports)
                        .small()
                        .monospace()
                        .color(UI_CONFIG.colors.text_subdued),
                );
                ui.add_space(16.0);
            });
        });

        ui.add_space(24.0);
        ui.horizontal(|ui| {
            ui.label_subheader(text.history_title);
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                ui.label_subdued(format!(
                    "{} / {}",
                    engine.history().len(),
                    engine.history_capacity()
                ));
            });
        });
        ui.separator();

        if engine.history().is_empty() {
            ui.label_subdued(text.no_history);
            return;
        }

        ScrollArea::vertical().show(ui, |ui| {
            for entry in engine.history() {
                if history_row(ui, entry).clicked() {
                    action = Some(UiAction::SelectHistory(entry.id.clone()));
                }
            }
        });
    });

    action
}

fn history_row(ui: &mut Ui, entry: &HistoryEntry) -> eframe::egui::Response {
    let bias = &entry.data.market_bias;
    let color = bias.direction.color();

    let inner = UI_CONFIG.card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.label(RichText::new(direction_icon(bias.direction)).size(18.0).color(color));
            ui.vertical(|ui| {
                ui.label(
                    RichText::new(&entry.data.asset_class)
                        .strong()
                        .color(UI_CONFIG.colors.heading),
                );
                ui.label_subdued(local_wall_clock(entry.timestamp));
            });
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                ui.label(
                    RichText::new(format!("{}%", bias.confidence))
                        .monospace()
                        .color(UI_CONFIG.colors.label),
                );
                ui.label(
                    RichText::new(bias.direction.to_string())
                        .strong()
                        .color(color),
                );
            });
        });
    });
    inner.response.interact(Sense::click())
}
