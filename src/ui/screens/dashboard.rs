use {
    crate::{
        config::DF,
        domain::{AnalysisResult, LiquiditySide, Outcome, RiskProfile, Setup, SetupSlot},
        engine::ActiveAnalysis,
        ui::{
            DirectionColor, UI_CONFIG, UiAction, UiStyleExt, UiText,
            ui_text::{ICON_BACK, ICON_CLOCK, ICON_SHIELD, ICON_TARGET, ICON_WARNING},
            utils::{confidence_steps, direction_icon},
        },
    },
    eframe::egui::{Grid, RichText, ScrollArea, Sense, Ui, vec2},
    strum::IntoEnumIterator,
};

pub(crate) fn render_dashboard(
    ui: &mut Ui,
    active: &ActiveAnalysis,
    now_ms: i64,
    text: &UiText,
) -> Option<UiAction> {
    let mut action = None;
    let data = &active.result;

    ScrollArea::vertical().show(ui, |ui| {
        ui.vertical_centered_justified(|ui| {
            ui.set_max_width(UI_CONFIG.content_width);

            ui.horizontal(|ui| {
                if ui
                    .button(ui.button_text_secondary(format!("{} {}", ICON_BACK, text.new_analysis)))
                    .clicked()
                {
                    action = Some(UiAction::Reset);
                }
            });
            ui.add_space(8.0);

            if data.market_bias.confidence < UI_CONFIG.low_confidence_threshold {
                UI_CONFIG
                    .accent_frame(UI_CONFIG.colors.warning)
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.label(RichText::new(ICON_WARNING).size(20.0).color(UI_CONFIG.colors.warning));
                            ui.vertical(|ui| {
                                ui.label(
                                    RichText::new(text.low_confidence_title)
                                        .strong()
                                        .color(UI_CONFIG.colors.warning),
                                );
                                ui.label_subdued(text.low_confidence_desc);
                            });
                        });
                    });
                ui.add_space(8.0);
            }

            render_bias_bar(ui, data, text);

            ui.section_heading(ICON_TARGET, text.liquidity_map);
            render_liquidity_table(ui, data, text);

            ui.section_heading("◉", text.institutional_reading);
            UI_CONFIG.card_frame().show(ui, |ui| {
                let reading = &data.institutional_reading;
                for (label, body) in [
                    (text.market_intent, &reading.market_intent),
                    (text.retail_traps, &reading.retail_traps),
                    (text.objective, &reading.liquidity_objective),
                ] {
                    ui.label_subheader(label);
                    ui.label(RichText::new(body).color(UI_CONFIG.colors.label));
                    ui.add_space(6.0);
                }
            });

            ui.section_heading(ICON_WARNING, text.invalidation_rules);
            UI_CONFIG
                .accent_frame(UI_CONFIG.colors.error)
                .show(ui, |ui| {
                    let rules = &data.invalidation_rules;
                    for (label, body) in [
                        (text.bias_invalidation, &rules.bias_invalidation),
                        (text.setup_invalidation, &rules.setup_invalidation),
                    ] {
                        ui.label(RichText::new(label).small().color(UI_CONFIG.colors.error));
                        ui.label(RichText::new(format!("\"{}\"", body)).italics());
                        ui.add_space(6.0);
                    }
                });

            if !data.limitations.is_empty() {
                ui.add_space(8.0);
                ui.label_subdued(text.limitations);
                for limit in &data.limitations {
                    ui.label(RichText::new(format!("• {}", limit)).small().color(UI_CONFIG.colors.label));
                }
            }

            ui.section_heading(ICON_TARGET, text.execution_setups);
            ui.columns(2, |cols| {
                for (col, slot) in cols.iter_mut().zip(SetupSlot::iter()) {
                    let title = match slot {
                        SetupSlot::A => text.setup_primary,
                        SetupSlot::B => text.setup_confirmation,
                    };
                    let can_record = active.history_id.is_some();
                    if let Some(outcome) =
                        render_setup_card(col, title, data, slot, can_record, now_ms, text)
                    {
                        action = Some(UiAction::RecordOutcome(slot, outcome));
                    }
                }
            });
            ui.add_space(24.0);
        });
    });

    action
}

fn render_bias_bar(ui: &mut Ui, data: &AnalysisResult, text: &UiText) {
    let bias = &data.market_bias;
    let low = bias.confidence < UI_CONFIG.low_confidence_threshold;
    let bias_color = if low {
        UI_CONFIG.colors.warning
    } else {
        bias.direction.color()
    };

    ui.columns(3, |cols| {
        UI_CONFIG.card_frame().show(&mut cols[0], |ui| {
            ui.label_subdued(text.asset_class);
            ui.label(RichText::new(&data.asset_class).size(22.0).strong().color(UI_CONFIG.colors.heading));
        });
        UI_CONFIG.card_frame().show(&mut cols[1], |ui| {
            ui.label_subdued(text.market_bias);
            ui.label(
                RichText::new(format!("{} {}", direction_icon(bias.direction), bias.direction))
                    .size(22.0)
                    .strong()
                    .color(bias_color),
            );
        });
        UI_CONFIG.card_frame().show(&mut cols[2], |ui| {
            ui.label_subdued(text.confidence);
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(format!("{}%", bias.confidence))
                        .size(22.0)
                        .monospace()
                        .strong()
                        .color(if low { UI_CONFIG.colors.warning } else { UI_CONFIG.colors.heading }),
                );
                let lit = confidence_steps(bias.confidence);
                let fill = if low { UI_CONFIG.colors.warning } else { UI_CONFIG.colors.accent };
                for i in 0..5 {
                    let (rect, _) = ui.allocate_exact_size(vec2(6.0, 16.0), Sense::hover());
                    let color = if i < lit { fill } else { UI_CONFIG.colors.card_border };
                    ui.painter().rect_filled(rect, 3.0, color);
                }
            });
        });
    });
}

fn render_liquidity_table(ui: &mut Ui, data: &AnalysisResult, text: &UiText) {
    UI_CONFIG.card_frame().show(ui, |ui| {
        Grid::new("liquidity_zones")
            .striped(true)
            .num_columns(4)
            .spacing([16.0, 6.0])
            .show(ui, |ui| {
                for header in [text.zone_type, text.zone_price, text.zone_strength, text.zone_reason] {
                    ui.label_subdued(header);
                }
                ui.end_row();

                for zone in &data.liquidity_zones {
                    let side_color = match zone.side {
                        LiquiditySide::Buyside => UI_CONFIG.colors.buy,
                        LiquiditySide::Sellside => UI_CONFIG.colors.sell,
                    };
                    ui.label(RichText::new(zone.side.to_string()).strong().color(side_color));
                    ui.label(RichText::new(&zone.price_approx).monospace().color(UI_CONFIG.colors.heading));
                    ui.label(RichText::new(zone.strength.to_string()).small());
                    ui.label(RichText::new(&zone.reason).small().color(UI_CONFIG.colors.label));
                    ui.end_row();
                }
            });
    });
}

/// Returns the outcome the user clicked, if any.
fn render_setup_card(
    ui: &mut Ui,
    title: &str,
    data: &AnalysisResult,
    slot: SetupSlot,
    can_record: bool,
    now_ms: i64,
    text: &UiText,
) -> Option<Outcome> {
    let setup: &Setup = data.setup(slot);
    let accent = data.market_bias.direction.color();
    let mut clicked = None;

    UI_CONFIG.accent_frame(accent).show(ui, |ui| {
        ui.horizontal(|ui| {
            ui.label_subdued(title);
            let risk = match setup.risk_profile {
                RiskProfile::Aggressive => text.risk_aggressive,
                RiskProfile::Conservative => text.risk_conservative,
            };
            ui.label(RichText::new(risk).small().strong().color(setup.risk_profile.color()));
        });
        ui.horizontal(|ui| {
            ui.label(
                RichText::new(setup.kind.to_string().to_uppercase())
                    .size(18.0)
                    .strong()
                    .color(accent),
            );
            ui.label_subdued(format!("{}% {}", setup.reliability, text.prob));
        });
        ui.add_space(6.0);

        ui.metric(text.entry, &setup.entry, UI_CONFIG.colors.heading);
        Grid::new(("targets", slot.key())).num_columns(3).show(ui, |ui| {
            for (i, target) in setup.targets().iter().enumerate() {
                ui.metric(&format!("{} {}", text.target, i + 1), target, accent);
            }
            ui.end_row();
        });
        ui.metric(
            &format!("{} {}", ICON_SHIELD, text.stop_loss),
            &setup.stop_loss,
            UI_CONFIG.colors.sell,
        );
        ui.metric(text.risk_reward, &setup.risk_reward, UI_CONFIG.colors.label);

        ui.horizontal(|ui| {
            ui.label_subdued(format!("{} {}: {}", ICON_CLOCK, text.expiry, setup.expiry));
            if setup.is_expired_at(now_ms) {
                ui.label(RichText::new(text.expired).small().strong().color(UI_CONFIG.colors.error));
            }
        });

        ui.add_space(6.0);
        ui.label(RichText::new(format!("> {}", setup.logic)).small().color(UI_CONFIG.colors.label));

        if can_record {
            ui.add_space(8.0);
            ui.separator();
            ui.label_subdued(text.your_result);
            ui.horizontal(|ui| {
                for outcome in Outcome::iter() {
                    let selected = setup.user_result == outcome;
                    if ui
                        .choice_button(&outcome.to_string(), selected, outcome.color())
                        .clicked()
                        && !selected
                    {
                        clicked = Some(outcome);
                    }
                }
            });
        }
    });

    if DF.log_history {
        if let Some(outcome) = clicked {
            log::info!("Outcome button {} on {}", outcome, slot.key());
        }
    }
    clicked
}
