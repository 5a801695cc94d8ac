mod screens;
mod styles;
mod ui_config;
mod ui_text;
mod utils;

use crate::{
    domain::{Language, Outcome, SetupSlot},
    engine::ActiveView,
};

pub(crate) use screens::{
    PricingState, render_analytics, render_dashboard, render_error_banner, render_header,
    render_preview, render_pricing, render_upload,
};
pub(crate) use styles::{DirectionColor, UiStyleExt};
pub(crate) use ui_config::UI_CONFIG;
pub(crate) use ui_text::{UiText, ui_text};

/// What a screen asks the app to do. Screens only read engine state; the app
/// applies actions after rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum UiAction {
    StartTrial,
    RedeemCode(String),
    LoadPath(String),
    Analyze,
    Reset,
    SelectHistory(String),
    RecordOutcome(SetupSlot, Outcome),
    SetView(ActiveView),
    SetLanguage(Language),
    DismissError,
}
