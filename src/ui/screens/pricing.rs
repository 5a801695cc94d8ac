use {
    crate::{
        config::SUBSCRIPTION,
        engine::PlanError,
        models::{AccessState, ActivationError},
        ui::{
            UI_CONFIG, UiAction, UiStyleExt, UiText,
            ui_text::{ICON_CHECK, ICON_CLOCK},
        },
    },
    eframe::egui::{Button, Hyperlink, RichText, TextEdit, Ui},
};

/// Local state of the pricing screen (verification step and typed code).
#[derive(Debug, Default, Clone)]
pub(crate) struct PricingState {
    pub verifying_payment: bool,
    pub activation_code: String,
    pub feedback: Option<String>,
}

impl PricingState {
    /// Turns a refused plan request into the message shown under the input.
    pub fn show_refusal(&mut self, error: PlanError, text: &UiText) {
        self.feedback = Some(
            match error {
                PlanError::TrialUsed => text.trial_used,
                PlanError::CodeRequired => text.verify_error,
                PlanError::Activation(ActivationError::InvalidFormat) => text.verify_error,
                PlanError::Activation(ActivationError::AlreadyUsed) => text.verify_code_used,
            }
            .to_string(),
        );
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

pub(crate) fn render_pricing(
    ui: &mut Ui,
    access: AccessState,
    state: &mut PricingState,
    text: &UiText,
) -> Option<UiAction> {
    let mut action = None;
    let expired = access == AccessState::Expired;

    ui.vertical_centered(|ui| {
        ui.set_max_width(UI_CONFIG.content_width * 0.7);
        ui.add_space(24.0);

        if state.verifying_payment {
            action = render_verification(ui, state, text);
            return;
        }

        if expired {
            UI_CONFIG
                .accent_frame(UI_CONFIG.colors.error)
                .show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.label(
                            RichText::new(text.plan_expired)
                                .strong()
                                .color(UI_CONFIG.colors.error),
                        );
                        ui.label_subdued(text.plan_expired_desc);
                    });
                });
            ui.add_space(16.0);
        }

        ui.label(
            RichText::new(text.pricing_title)
                .size(24.0)
                .strong()
                .color(UI_CONFIG.colors.heading),
        );
        ui.label_subdued(text.pricing_subtitle);
        ui.add_space(20.0);

        ui.columns(2, |cols| {
            UI_CONFIG.card_frame().show(&mut cols[0], |ui| {
                ui.vertical_centered(|ui| {
                    ui.label_subheader(text.plan_silver);
                    ui.label_subdued(text.plan_silver_desc);
                    ui.add_space(12.0);
                    // The trial cannot be restarted once it has run out
                    let silver = ui.add_enabled(
                        !expired,
                        Button::new(ui.button_text_secondary(text.plan_silver_btn)),
                    );
                    if silver.clicked() {
                        action = Some(UiAction::StartTrial);
                    }
                });
            });

            UI_CONFIG
                .accent_frame(UI_CONFIG.colors.accent)
                .show(&mut cols[1], |ui| {
                    ui.vertical_centered(|ui| {
                        ui.label_subheader(text.plan_gold);
                        ui.label_subdued(text.plan_gold_desc);
                        ui.add_space(12.0);
                        let pay = ui.add(Hyperlink::from_label_and_url(
                            RichText::new(text.plan_gold_btn).strong(),
                            SUBSCRIPTION.payment_url,
                        ).open_in_new_tab(true));
                        if pay.clicked() {
                            state.verifying_payment = true;
                        }
                        if ui.link(text.verify_have_code).clicked() {
                            state.verifying_payment = true;
                        }
                    });
                });
        });

        if let Some(feedback) = &state.feedback {
            ui.add_space(12.0);
            ui.label(RichText::new(feedback).small().color(UI_CONFIG.colors.error));
        }
    });

    action
}

fn render_verification(ui: &mut Ui, state: &mut PricingState, text: &UiText) -> Option<UiAction> {
    let mut action = None;

    UI_CONFIG
        .accent_frame(UI_CONFIG.colors.accent)
        .show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new(text.verify_title)
                        .size(20.0)
                        .strong()
                        .color(UI_CONFIG.colors.heading),
                );
                ui.label_subdued(text.verify_desc);
                ui.add_space(12.0);

                let input = ui.add(
                    TextEdit::singleline(&mut state.activation_code)
                        .hint_text(text.verify_placeholder)
                        .horizontal_align(eframe::egui::Align::Center)
                        .font(eframe::egui::TextStyle::Monospace)
                        .desired_width(240.0),
                );
                if input.changed() {
                    state.feedback = None;
                }
                let submitted =
                    input.lost_focus() && ui.input(|i| i.key_pressed(eframe::egui::Key::Enter));

                if let Some(feedback) = &state.feedback {
                    ui.label(RichText::new(feedback).small().color(UI_CONFIG.colors.error));
                }

                ui.add_space(8.0);
                let activate = ui.add(
                    Button::new(ui.button_text_primary(format!(
                        "{} {}",
                        ICON_CHECK, text.verify_btn_activate
                    )))
                    .fill(UI_CONFIG.colors.accent),
                );
                if activate.clicked() || submitted {
                    action = Some(UiAction::RedeemCode(state.activation_code.clone()));
                }
                if ui
                    .button(ui.button_text_secondary(text.verify_btn_cancel))
                    .clicked()
                {
                    state.clear();
                }

                ui.add_space(12.0);
                ui.label_subdued(format!("{} {}", ICON_CLOCK, text.verify_note));
            });
        });

    action
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::ui_text::UI_TEXT_EN;

    #[test]
    fn refusals_map_to_messages() {
        let mut state = PricingState::default();
        state.show_refusal(PlanError::Activation(ActivationError::AlreadyUsed), &UI_TEXT_EN);
        assert_eq!(state.feedback.as_deref(), Some(UI_TEXT_EN.verify_code_used));
        state.show_refusal(PlanError::TrialUsed, &UI_TEXT_EN);
        assert_eq!(state.feedback.as_deref(), Some(UI_TEXT_EN.trial_used));
        state.clear();
        assert!(state.feedback.is_none() && !state.verifying_payment);
    }
}
