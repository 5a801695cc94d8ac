use eframe::egui::{Color32, CornerRadius, Frame, Margin, Stroke};

/// UI Colors for consistent theming
#[derive(Clone, Copy, Default)]
pub struct UiColors {
    pub label: Color32,
    pub heading: Color32,
    pub subsection_heading: Color32,
    pub text_subdued: Color32,
    pub central_panel: Color32,
    pub top_panel: Color32,
    pub card: Color32,
    pub card_border: Color32,
    pub accent: Color32,
    pub buy: Color32,
    pub sell: Color32,
    pub neutral: Color32,
    pub warning: Color32,
    pub error: Color32,
    pub aggressive: Color32,
    pub conservative: Color32,
}

/// Main UI configuration struct that holds all UI-related settings
#[derive(Default, Clone, Copy)]
pub struct UiConfig {
    pub colors: UiColors,
    /// Below this confidence the dashboard shows a warning banner
    pub low_confidence_threshold: u8,
    /// Width of the centred content column
    pub content_width: f32,
    pub preview_max_height: f32,
}

/// Global UI configuration instance
pub static UI_CONFIG: UiConfig = UiConfig {
    colors: UiColors {
        label: Color32::from_rgb(200, 205, 215),
        heading: Color32::WHITE,
        subsection_heading: Color32::from_rgb(0, 220, 130),
        text_subdued: Color32::from_rgb(110, 118, 135),
        central_panel: Color32::from_rgb(11, 14, 20),
        top_panel: Color32::from_rgb(16, 20, 28),
        card: Color32::from_rgb(20, 25, 35),
        card_border: Color32::from_rgb(38, 45, 60),
        accent: Color32::from_rgb(0, 220, 130),
        buy: Color32::from_rgb(52, 211, 153),
        sell: Color32::from_rgb(251, 113, 133),
        neutral: Color32::from_rgb(251, 191, 36),
        warning: Color32::from_rgb(251, 191, 36),
        error: Color32::from_rgb(244, 63, 94),
        aggressive: Color32::from_rgb(245, 158, 11),
        conservative: Color32::from_rgb(59, 130, 246),
    },
    low_confidence_threshold: 65,
    content_width: 900.0,
    preview_max_height: 420.0,
};

impl UiConfig {
    pub fn top_panel_frame(&self) -> Frame {
        Frame {
            fill: self.colors.top_panel,
            stroke: Stroke::new(1.0, self.colors.card_border),
            inner_margin: Margin::symmetric(12, 8),
            ..Default::default()
        }
    }

    pub fn central_panel_frame(&self) -> Frame {
        Frame {
            fill: self.colors.central_panel,
            stroke: Stroke::NONE,
            inner_margin: Margin::same(16),
            ..Default::default()
        }
    }

    /// Rounded panel used for every dashboard section
    pub fn card_frame(&self) -> Frame {
        Frame {
            fill: self.colors.card,
            stroke: Stroke::new(1.0, self.colors.card_border),
            inner_margin: Margin::same(14),
            corner_radius: CornerRadius::same(10),
            ..Default::default()
        }
    }

    /// Card with a coloured border (setup cards, warnings)
    pub fn accent_frame(&self, accent: Color32) -> Frame {
        Frame {
            stroke: Stroke::new(1.0, accent.linear_multiply(0.5)),
            ..self.card_frame()
        }
    }
}
