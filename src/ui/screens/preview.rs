use {
    crate::{
        engine::VisionEngine,
        ui::{
            UI_CONFIG, UiAction, UiStyleExt, UiText,
            screens::header::render_error_banner,
            ui_text::ICON_TARGET,
            utils::preview_uri,
        },
    },
    eframe::egui::{Align, Button, Image, Layout, RichText, Spinner, Ui},
    std::sync::Arc,
};

/// Chart selected: preview, trigger, progress and the last error.
pub(crate) fn render_preview(
    ui: &mut Ui,
    engine: &VisionEngine,
    can_call_model: bool,
    text: &UiText,
) -> Option<UiAction> {
    let file = engine.selected_file()?;
    let mut action = None;

    ui.vertical_centered(|ui| {
        ui.set_max_width(UI_CONFIG.content_width);
        ui.add_space(16.0);

        UI_CONFIG.card_frame().show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label_subdued(&file.name);
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if ui
                        .button(ui.button_text_secondary(text.cancel))
                        .clicked()
                    {
                        action = Some(UiAction::Reset);
                    }
                });
            });
            ui.add(
                Image::from_bytes(
                    preview_uri(&file.name, file.bytes.len()),
                    Arc::clone(&file.bytes),
                )
                .max_height(UI_CONFIG.preview_max_height)
                .max_width(ui.available_width())
                .maintain_aspect_ratio(true),
            );
        });

        ui.add_space(20.0);

        if engine.is_analyzing() {
            ui.add(Spinner::new().size(48.0).color(UI_CONFIG.colors.accent));
            ui.add_space(8.0);
            ui.label(
                RichText::new(text.analyzing_title)
                    .monospace()
                    .strong()
                    .color(UI_CONFIG.colors.heading),
            );
            ui.label_subdued(text.analyzing_scan);
            ui.label_subdued(text.analyzing_pools);
        } else {
            let run = ui.add_enabled(
                can_call_model,
                Button::new(
                    ui.button_text_primary(format!("{} {}", ICON_TARGET, text.run_engine)),
                )
                .fill(UI_CONFIG.colors.accent)
                .min_size([220.0, 44.0].into()),
            );
            if run.clicked() {
                action = Some(UiAction::Analyze);
            }
            if !can_call_model {
                ui.label(
                    RichText::new(text.missing_api_key)
                        .small()
                        .color(UI_CONFIG.colors.warning),
                );
            }
        }

        if let Some(error) = engine.error() {
            ui.add_space(16.0);
            if let Some(dismiss) = render_error_banner(ui, error, engine.language(), text) {
                action = Some(dismiss);
            }
        }
    });

    action
}
