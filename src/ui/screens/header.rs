use {
    crate::{
        domain::Language,
        engine::{ActiveView, VisionEngine},
        error::{ErrorKind, VisionError},
        models::AccessState,
        ui::{
            UI_CONFIG, UiAction, UiStyleExt, UiText,
            ui_text::{ICON_CLOSE, ICON_WARNING},
        },
        utils::epoch_ms_to_local_date,
    },
    eframe::egui::{Align, ComboBox, Context, Layout, RichText, TopBottomPanel, Ui},
};

pub(crate) fn render_header(
    ctx: &Context,
    engine: &VisionEngine,
    text: &UiText,
) -> Option<UiAction> {
    let mut action = None;

    TopBottomPanel::top("header")
        .frame(UI_CONFIG.top_panel_frame())
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(text.app_title)
                        .size(20.0)
                        .strong()
                        .color(UI_CONFIG.colors.accent),
                );
                ui.label_subdued(text.app_tagline);

                if let AccessState::Active(plan) = engine.access() {
                    ui.separator();
                    for (view, label) in [
                        (ActiveView::Vision, text.nav_vision),
                        (ActiveView::Analytics, text.nav_analytics),
                    ] {
                        if ui
                            .selectable_label(engine.view() == view, label)
                            .clicked()
                        {
                            action = Some(UiAction::SetView(view));
                        }
                    }

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let Some(picked) = language_picker(ui, engine.language()) {
                            action = Some(UiAction::SetLanguage(picked));
                        }
                        let until = engine
                            .active_until()
                            .map(|ms| format!(" {} {}", text.access_until, epoch_ms_to_local_date(ms)))
                            .unwrap_or_default();
                        ui.label(
                            RichText::new(format!("{} {}{}", plan, text.access_granted, until))
                                .small()
                                .monospace()
                                .color(UI_CONFIG.colors.accent),
                        );
                        if engine.is_storage_degraded() {
                            ui.label(
                                RichText::new(format!("{} {}", ICON_WARNING, text.storage_degraded))
                                    .small()
                                    .color(UI_CONFIG.colors.warning),
                            );
                        }
                    });
                } else {
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let Some(picked) = language_picker(ui, engine.language()) {
                            action = Some(UiAction::SetLanguage(picked));
                        }
                    });
                }
            });
        });

    action
}

fn language_picker(ui: &mut Ui, current: Language) -> Option<Language> {
    let mut picked = None;
    ComboBox::from_id_salt("language")
        .selected_text(current.to_string())
        .width(48.0)
        .show_ui(ui, |ui| {
            for lang in [Language::En, Language::Fr] {
                if ui
                    .selectable_label(current == lang, lang.to_string())
                    .clicked()
                    && current != lang
                {
                    picked = Some(lang);
                }
            }
        });
    picked
}

/// The single error slot. Returns `DismissError` when closed.
pub(crate) fn render_error_banner(
    ui: &mut Ui,
    error: &VisionError,
    language: Language,
    text: &UiText,
) -> Option<UiAction> {
    let (title, color) = match error.kind() {
        ErrorKind::StorageUnavailable => (text.storage_degraded, UI_CONFIG.colors.warning),
        _ => (text.analysis_failed, UI_CONFIG.colors.error),
    };
    let mut action = None;

    UI_CONFIG.accent_frame(color).show(ui, |ui| {
        ui.horizontal(|ui| {
            ui.label(RichText::new(ICON_WARNING).size(18.0).color(color));
            ui.vertical(|ui| {
                ui.label(RichText::new(title).strong().color(color));
                ui.label(
                    RichText::new(error.user_message(language))
                        .small()
                        .monospace()
                        .color(UI_CONFIG.colors.label),
                );
            });
            ui.with_layout(Layout::right_to_left(Align::TOP), |ui| {
                if ui.small_button(ICON_CLOSE).clicked() {
                    action = Some(UiAction::DismissError);
                }
            });
        });
    });
    action
}
