use serde::{Deserialize, Serialize};

/// Language of the panel's labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Ja,
}

impl Language {
    /// Picks the language from a locale tag such as `ja-JP` or `en_US`.
    pub fn from_locale(locale: &str) -> Self {
        if locale.to_ascii_lowercase().starts_with("ja") {
            Language::Ja
        } else {
            Language::En
        }
    }

    /// The language of the current system locale, English if unknown.
    pub fn detect() -> Self {
        sys_locale::get_locale()
            .map(|locale| Self::from_locale(&locale))
            .unwrap_or(Language::En)
    }
}

/// Panel settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub language: Language,
    /// Forget the held device and characteristic when the board disconnects.
    /// Off keeps them, so an LED click after an unexpected disconnect is
    /// still attempted against the old characteristic.
    pub clear_session_on_disconnect: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            language: Language::detect(),
            clear_session_on_disconnect: false,
        }
    }
}
