use {
    crate::{
        domain::{Direction, Outcome, RiskProfile},
        ui::UI_CONFIG,
    },
    eframe::egui::{Color32, Response, RichText, Ui},
};

pub(crate) fn colored_subsection_heading(text: impl Into<String>) -> RichText {
    RichText::new(text.into())
        .strong()
        .color(UI_CONFIG.colors.subsection_heading)
}

pub trait DirectionColor {
    fn color(&self) -> Color32;
}

impl DirectionColor for Direction {
    fn color(&self) -> Color32 {
        match self {
            Self::Buy => UI_CONFIG.colors.buy,
            Self::Sell => UI_CONFIG.colors.sell,
            Self::Neutral => UI_CONFIG.colors.neutral,
        }
    }
}

impl DirectionColor for Outcome {
    fn color(&self) -> Color32 {
        match self {
            Self::Win => UI_CONFIG.colors.buy,
            Self::Loss => UI_CONFIG.colors.sell,
            Self::Be => UI_CONFIG.colors.label,
            Self::Pending => UI_CONFIG.colors.text_subdued,
        }
    }
}

impl DirectionColor for RiskProfile {
    fn color(&self) -> Color32 {
        match self {
            Self::Aggressive => UI_CONFIG.colors.aggressive,
            Self::Conservative => UI_CONFIG.colors.conservative,
        }
    }
}

pub(crate) trait UiStyleExt {
    fn label_subdued(&mut self, text: impl Into<String>);
    fn metric(&mut self, label: &str, value: &str, color: Color32);
    fn label_subheader(&mut self, text: impl Into<String>);
    /// Heading followed by a thin rule
    fn section_heading(&mut self, icon: &str, text: &str);
    fn button_text_primary(&self, text: impl Into<String>) -> RichText;
    fn button_text_secondary(&self, text: impl Into<String>) -> RichText;
    /// Toggle-style button; filled with `color` when selected.
    fn choice_button(&mut self, text: &str, selected: bool, color: Color32) -> Response;
}

impl UiStyleExt for Ui {
    fn label_subdued(&mut self, text: impl Into<String>) {
        self.label(
            RichText::new(text)
                .small()
                .color(UI_CONFIG.colors.text_subdued),
        );
    }

    fn metric(&mut self, label: &str, value: &str, color: Color32) {
        self.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 4.0;
            ui.label_subdued(format!("{}:", label));
            ui.label(RichText::new(value).monospace().strong().color(color));
        });
    }

    fn label_subheader(&mut self, text: impl Into<String>) {
        self.label(colored_subsection_heading(text));
    }

    fn section_heading(&mut self, icon: &str, text: &str) {
        self.add_space(12.0);
        self.horizontal(|ui| {
            ui.label(RichText::new(icon).color(UI_CONFIG.colors.accent));
            ui.label(
                RichText::new(text)
                    .size(18.0)
                    .strong()
                    .color(UI_CONFIG.colors.heading),
            );
        });
        self.separator();
    }

    fn button_text_primary(&self, text: impl Into<String>) -> RichText {
        RichText::new(text)
            .strong()
            .size(16.0)
            .color(Color32::BLACK)
    }

    fn button_text_secondary(&self, text: impl Into<String>) -> RichText {
        RichText::new(text).strong().color(UI_CONFIG.colors.label)
    }

    fn choice_button(&mut self, text: &str, selected: bool, color: Color32) -> Response {
        let label = RichText::new(text).small().strong();
        let button = if selected {
            eframe::egui::Button::new(label.color(Color32::BLACK)).fill(color)
        } else {
            eframe::egui::Button::new(label.color(color))
        };
        self.add(button)
    }
}
