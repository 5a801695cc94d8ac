use {
    crate::{
        domain::Language,
        models::{MonthlyStats, OutcomeTally, PerformanceReport},
        ui::{
            UI_CONFIG, UiStyleExt, UiText,
            ui_text::ICON_TREND_UP,
            utils::{format_win_rate, fraction},
        },
    },
    eframe::egui::{Color32, ProgressBar, RichText, ScrollArea, Ui, vec2},
};

pub(crate) fn render_analytics(
    ui: &mut Ui,
    report: &PerformanceReport,
    language: Language,
    text: &UiText,
) {
    ScrollArea::vertical().show(ui, |ui| {
        ui.vertical_centered_justified(|ui| {
            ui.set_max_width(UI_CONFIG.content_width);
            ui.add_space(16.0);

            ui.section_heading(ICON_TREND_UP, text.analytics_title);
            ui.label_subdued(text.analytics_desc);
            ui.add_space(12.0);

            if report.is_empty() {
                UI_CONFIG.card_frame().show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(24.0);
                        ui.label_subdued(text.no_data_analytics);
                        ui.add_space(24.0);
                    });
                });
                return;
            }

            UI_CONFIG
                .accent_frame(UI_CONFIG.colors.accent)
                .show(ui, |ui| {
                    ui.label_subheader(text.global_stats);
                    ui.columns(3, |cols| {
                        big_figure(
                            &mut cols[0],
                            text.win_rate,
                            &format_win_rate(report.global.win_rate(), 1),
                            win_rate_color(&report.global),
                        );
                        big_figure(
                            &mut cols[1],
                            text.total_trades,
                            &report.global.total().to_string(),
                            UI_CONFIG.colors.heading,
                        );
                        big_figure(
                            &mut cols[2],
                            &format!("{} / {}", text.wins, text.losses),
                            &format!("{} / {}", report.global.wins, report.global.losses),
                            UI_CONFIG.colors.label,
                        );
                    });
                    ui.add_space(8.0);
                    distribution_bar(ui, &report.global);
                });

            ui.section_heading("▦", text.monthly_breakdown);
            for month in &report.months {
                month_card(ui, month, language, text);
                ui.add_space(6.0);
            }
        });
    });
}

fn big_figure(ui: &mut Ui, label: &str, value: &str, color: Color32) {
    ui.vertical_centered(|ui| {
        ui.label_subdued(label);
        ui.label(RichText::new(value).size(26.0).monospace().strong().color(color));
    });
}

fn win_rate_color(tally: &OutcomeTally) -> Color32 {
    match tally.win_rate() {
        Some(rate) if rate >= 0.5 => UI_CONFIG.colors.buy,
        Some(_) => UI_CONFIG.colors.sell,
        None => UI_CONFIG.colors.text_subdued,
    }
}

/// Wins, break-evens and losses as one horizontal strip.
fn distribution_bar(ui: &mut Ui, tally: &OutcomeTally) {
    let total = tally.total();
    let width = ui.available_width();
    let (rect, _) = ui.allocate_exact_size(vec2(width, 8.0), eframe::egui::Sense::hover());
    let painter = ui.painter();
    painter.rect_filled(rect, 4.0, UI_CONFIG.colors.card_border);

    let mut x = rect.left();
    for (count, color) in [
        (tally.wins, UI_CONFIG.colors.buy),
        (tally.break_evens, UI_CONFIG.colors.label),
        (tally.losses, UI_CONFIG.colors.sell),
    ] {
        let w = width * fraction(count, total);
        if w > 0.0 {
            let segment = eframe::egui::Rect::from_min_size(
                eframe::egui::pos2(x, rect.top()),
                vec2(w, rect.height()),
            );
            painter.rect_filled(segment, 0.0, color);
            x += w;
        }
    }
}

fn month_card(ui: &mut Ui, month: &MonthlyStats, language: Language, text: &UiText) {
    let tally = &month.tally;
    UI_CONFIG.card_frame().show(ui, |ui| {
        ui.horizontal(|ui| {
            ui.label(
                RichText::new(month.display_name(language))
                    .monospace()
                    .strong()
                    .color(UI_CONFIG.colors.heading),
            );
            ui.with_layout(
                eframe::egui::Layout::right_to_left(eframe::egui::Align::Center),
                |ui| {
                    ui.label(
                        RichText::new(format_win_rate(tally.win_rate(), 0))
                            .monospace()
                            .strong()
                            .color(win_rate_color(tally)),
                    );
                },
            );
        });
        ui.add(
            ProgressBar::new(tally.win_rate().unwrap_or_default() as f32)
                .desired_height(6.0)
                .fill(UI_CONFIG.colors.buy),
        );
        ui.horizontal(|ui| {
            ui.metric(text.wins, &tally.wins.to_string(), UI_CONFIG.colors.buy);
            ui.metric(text.losses, &tally.losses.to_string(), UI_CONFIG.colors.sell);
            ui.metric(text.break_evens, &tally.break_evens.to_string(), UI_CONFIG.colors.label);
        });
    });
}
