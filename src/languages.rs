//! Catalog of recognition languages.

/// A selectable recognition language.
///
/// `code` is the BCP 47 tag handed to the recognizer; `label` is display-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageOption {
    pub code: &'static str,
    pub label: &'static str,
}

/// Languages offered by the application, default first.
pub const LANGUAGES: &[LanguageOption] = &[
    LanguageOption {
        code: "en-US",
        label: "English",
    },
    LanguageOption {
        code: "es-ES",
        label: "Spanish",
    },
    LanguageOption {
        code: "fr-FR",
        label: "French",
    },
    LanguageOption {
        code: "de-DE",
        label: "German",
    },
    LanguageOption {
        code: "it-IT",
        label: "Italian",
    },
    LanguageOption {
        code: "nl-NL",
        label: "Dutch",
    },
];

/// Look up a language by code.
pub fn get_language(code: &str) -> Option<&'static LanguageOption> {
    LANGUAGES.iter().find(|l| l.code == code)
}

/// The default language option.
pub fn default_language() -> &'static LanguageOption {
    &LANGUAGES[0]
}
