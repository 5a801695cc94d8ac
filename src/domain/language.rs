use {
    clap::ValueEnum,
    serde::{Deserialize, Serialize},
    std::fmt,
};

/// Display language of the UI and of the model's textual output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum Language {
    #[default]
    En,
    Fr,
}

impl Language {
    /// Picks French for any `fr*` locale tag, English otherwise.
    pub fn from_locale_tag(tag: &str) -> Self {
        if tag.trim().to_ascii_lowercase().starts_with("fr") {
            Language::Fr
        } else {
            Language::En
        }
    }

    /// Language the model is told to write in
    pub fn prompt_name(self) -> &'static str {
        match self {
            Language::En => "ENGLISH",
            Language::Fr => "FRENCH",
        }
    }

    /// Full month name for `month` in 1..=12, as written mid-sentence
    pub fn month_name(self, month: u32) -> Option<&'static str> {
        const EN: [&str; 12] = [
            "January", "February", "March", "April", "May", "June", "July", "August",
            "September", "October", "November", "December",
        ];
        const FR: [&str; 12] = [
            "janvier", "février", "mars", "avril", "mai", "juin", "juillet", "août",
            "septembre", "octobre", "novembre", "décembre",
        ];
        let names = match self {
            Language::En => &EN,
            Language::Fr => &FR,
        };
        let index = usize::try_from(month).ok()?.checked_sub(1)?;
        names.get(index).copied()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn detect() -> Self {
        ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|value| !value.is_empty())
            .map(|value| Self::from_locale_tag(&value))
            .unwrap_or_default()
    }

    #[cfg(target_arch = "wasm32")]
    pub fn detect() -> Self {
        web_sys::window()
            .and_then(|w| w.navigator().language())
            .map(|tag| Self::from_locale_tag(&tag))
            .unwrap_or_default()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::En => write!(f, "EN"),
            Language::Fr => write!(f, "FR"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_tags_map_to_languages() {
        assert_eq!(Language::from_locale_tag("fr-FR"), Language::Fr);
        assert_eq!(Language::from_locale_tag("fr_CA.UTF-8"), Language::Fr);
        assert_eq!(Language::from_locale_tag("en-US"), Language::En);
        assert_eq!(Language::from_locale_tag("de_DE"), Language::En);
    }

    #[test]
    fn month_names_are_localized() {
        assert_eq!(Language::En.month_name(3), Some("March"));
        assert_eq!(Language::Fr.month_name(8), Some("août"));
        assert_eq!(Language::Fr.month_name(0), None);
        assert_eq!(Language::En.month_name(13), None);
    }
}
