use std::collections::HashMap;

pub const LOCALE_STORAGE_KEY: &str = "dqf.language";
pub const THEME_STORAGE_KEY: &str = "dqf.theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Locale {
    En,
    De,
    Es,
    Pt,
    Fr,
}

impl Locale {
    pub const ALL: [Locale; 5] = [Self::En, Self::De, Self::Es, Self::Pt, Self::Fr];

    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::De => "de",
            Self::Es => "es",
            Self::Pt => "pt",
            Self::Fr => "fr",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::De => "Deutsch",
            Self::Es => "Español",
            Self::Pt => "Português",
            Self::Fr => "Français",
        }
    }

    pub fn parse(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|locale| locale.code() == code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemePreference {
    System,
    Light,
    Dark,
}

impl ThemePreference {
    pub fn label(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "system" => Some(Self::System),
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::System => Self::Light,
            Self::Light => Self::Dark,
            Self::Dark => Self::System,
        }
    }

    /// Concrete theme once the system theme is known.
    pub fn resolve(self, system: ResolvedTheme) -> ResolvedTheme {
        match self {
            Self::System => system,
            Self::Light => ResolvedTheme::Light,
            Self::Dark => ResolvedTheme::Dark,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedTheme {
    Light,
    Dark,
}

impl ResolvedTheme {
    pub fn label(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// Key/value storage for persisted preferences, owned by the host shell.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    values: HashMap<String, String>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.set(key, value);
        self
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

pub fn detect_initial_locale(store: &dyn PreferenceStore) -> Locale {
    store
        .get(LOCALE_STORAGE_KEY)
        .and_then(|saved| Locale::parse(&saved))
        .unwrap_or(Locale::En)
}

pub fn detect_initial_theme_preference(store: &dyn PreferenceStore) -> ThemePreference {
    store
        .get(THEME_STORAGE_KEY)
        .and_then(|saved| ThemePreference::parse(&saved))
        .unwrap_or(ThemePreference::System)
}

/// `prefers_dark` is `None` when the platform cannot answer the query.
pub fn detect_system_theme(prefers_dark: Option<bool>) -> ResolvedTheme {
    match prefers_dark {
        Some(true) => ResolvedTheme::Dark,
        Some(false) | None => ResolvedTheme::Light,
    }
}

pub fn store_locale(store: &mut dyn PreferenceStore, locale: Locale) {
    store.set(LOCALE_STORAGE_KEY, locale.code());
}

pub fn store_theme_preference(store: &mut dyn PreferenceStore, theme: ThemePreference) {
    store.set(THEME_STORAGE_KEY, theme.label());
}
