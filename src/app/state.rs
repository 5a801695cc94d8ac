// src/app/state.rs

use {
    crate::{domain::Language, engine::ActiveView},
    serde::{Deserialize, Serialize},
};

/// UI preferences eframe keeps between sessions. Business data (plan,
/// history, burned codes) lives in the persistent store instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct UiPrefs {
    /// Set once the user picks a language; `None` follows the system locale
    pub(crate) language: Option<Language>,
    pub(crate) view: ActiveView,
}

impl UiPrefs {
    /// Command line first, then the saved choice, then the locale.
    pub(crate) fn resolve_language(&self, cli: Option<Language>, detected: Language) -> Language {
        cli.or(self.language).unwrap_or(detected)
    }
}
