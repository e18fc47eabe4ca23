//! Preference model and its persisted form.

use std::collections::BTreeMap;

use crate::font::{FontStrategy, format_size};
use crate::profile::Profile;
use crate::store::{PreferenceStore, read_or_none, remove_or_log, write_or_log};

/// Store keys. These match the values already sitting in visitors' browsers.
pub mod keys {
    pub const CONTRAST: &str = "contrastMode";
    pub const FONT_SIZE: &str = "fontSize";
    pub const READER: &str = "ttsActive";
    pub const PROFILE: &str = "userProfile";
    pub const WELCOME: &str = "showWelcome";
    pub const SUBTITLES: &str = "subtitles";
    pub const LARGE_TARGETS: &str = "focusSize";
    pub const SIMPLIFIED_LAYOUT: &str = "simplifiedLayout";

    pub const ALL: [&str; 8] = [
        CONTRAST,
        FONT_SIZE,
        READER,
        PROFILE,
        WELCOME,
        SUBTITLES,
        LARGE_TARGETS,
        SIMPLIFIED_LAYOUT,
    ];
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccessibilityPreferences {
    pub high_contrast: bool,
    /// In the unit of the configured [`FontStrategy`].
    pub font_size: f64,
    pub reader_active: bool,
    pub current_profile: Option<Profile>,
    /// One-shot: armed by profile selection, cleared once the welcome is shown.
    pub pending_welcome: bool,
    pub subtitles: bool,
    pub large_targets: bool,
    pub simplified_layout: bool,
}

impl AccessibilityPreferences {
    #[must_use]
    pub const fn defaults(font: &FontStrategy) -> Self {
        Self {
            high_contrast: false,
            font_size: font.base(),
            reader_active: false,
            current_profile: None,
            pending_welcome: false,
            subtitles: false,
            large_targets: false,
            simplified_layout: false,
        }
    }

    /// Persisted form of one key. `None` means the key is absent from the store.
    #[must_use]
    pub fn encode(&self, key: &str) -> Option<String> {
        let flag = |on: bool| String::from(if on { "enabled" } else { "disabled" });
        match key {
            keys::CONTRAST => Some(String::from(if self.high_contrast {
                "active"
            } else {
                "inactive"
            })),
            keys::FONT_SIZE => Some(format_size(self.font_size)),
            keys::READER => Some(self.reader_active.to_string()),
            keys::PROFILE => self.current_profile.as_ref().map(|p| p.id().to_owned()),
            keys::WELCOME => self.pending_welcome.then(|| "true".to_owned()),
            keys::SUBTITLES => Some(flag(self.subtitles)),
            keys::LARGE_TARGETS => Some(flag(self.large_targets)),
            keys::SIMPLIFIED_LAYOUT => Some(flag(self.simplified_layout)),
            _ => None,
        }
    }
}

/// Accepts every spelling the widget has ever written for a boolean.
fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "active" | "enabled" | "true" | "1" => Some(true),
        "inactive" | "disabled" | "false" | "0" => Some(false),
        _ => None,
    }
}

/// In-memory mirror of the persisted preferences.
#[derive(Debug, Clone, PartialEq)]
pub struct PreferenceState {
    prefs: AccessibilityPreferences,
    font: FontStrategy,
}

impl PreferenceState {
    #[must_use]
    pub const fn new(font: FontStrategy) -> Self {
        Self {
            prefs: AccessibilityPreferences::defaults(&font),
            font,
        }
    }

    /// Read every known key. Absent or malformed values keep their defaults.
    pub fn load<S: PreferenceStore>(
        store: &S,
        font: FontStrategy,
        aliases: &BTreeMap<String, String>,
    ) -> Self {
        let mut state = Self::new(font);
        let read_flag = |key: &str| {
            read_or_none(store, key).and_then(|raw| {
                let parsed = parse_flag(&raw);
                if parsed.is_none() {
                    log::warn!("ignoring malformed `{key}` value {raw:?}");
                }
                parsed
            })
        };
        let prefs = &mut state.prefs;
        if let Some(on) = read_flag(keys::CONTRAST) {
            prefs.high_contrast = on;
        }
        if let Some(raw) = read_or_none(store, keys::FONT_SIZE) {
            match font.parse(&raw) {
                Some(size) => prefs.font_size = size,
                None => log::warn!("ignoring malformed `{}` value {raw:?}", keys::FONT_SIZE),
            }
        }
        if let Some(on) = read_flag(keys::READER) {
            prefs.reader_active = on;
        }
        prefs.current_profile =
            read_or_none(store, keys::PROFILE).and_then(|raw| Profile::parse(&raw, aliases));
        prefs.pending_welcome = read_flag(keys::WELCOME).unwrap_or(false);
        if let Some(on) = read_flag(keys::SUBTITLES) {
            prefs.subtitles = on;
        }
        if let Some(on) = read_flag(keys::LARGE_TARGETS) {
            prefs.large_targets = on;
        }
        if let Some(on) = read_flag(keys::SIMPLIFIED_LAYOUT) {
            prefs.simplified_layout = on;
        }
        state
    }

    /// Write every key.
    pub fn persist<S: PreferenceStore>(&self, store: &S) {
        self.persist_keys(store, &keys::ALL);
    }

    /// Write the listed keys, removing those whose value is absent.
    pub fn persist_keys<S: PreferenceStore>(&self, store: &S, which: &[&str]) {
        for key in which {
            match self.prefs.encode(key) {
                Some(value) => write_or_log(store, key, &value),
                None => remove_or_log(store, key),
            }
        }
    }

    #[must_use]
    pub const fn preferences(&self) -> &AccessibilityPreferences {
        &self.prefs
    }

    #[must_use]
    pub const fn font(&self) -> &FontStrategy {
        &self.font
    }

    /// Returns the new contrast state.
    pub fn toggle_contrast(&mut self) -> bool {
        self.prefs.high_contrast = !self.prefs.high_contrast;
        self.prefs.high_contrast
    }

    /// Returns the new font size.
    pub fn cycle_font(&mut self) -> f64 {
        self.prefs.font_size = self.font.next(self.prefs.font_size);
        self.prefs.font_size
    }

    /// Returns the new reader state.
    pub fn toggle_reader(&mut self) -> bool {
        self.prefs.reader_active = !self.prefs.reader_active;
        self.prefs.reader_active
    }

    /// Discard everything and take `prefs` wholesale.
    pub fn replace(&mut self, prefs: AccessibilityPreferences) {
        self.prefs = prefs;
    }

    pub fn reset(&mut self) {
        self.prefs = AccessibilityPreferences::defaults(&self.font);
    }

    pub fn consume_welcome(&mut self) {
        self.prefs.pending_welcome = false;
    }

    /// Record a signed-in profile without touching display preferences.
    pub fn begin_session(&mut self, profile: Profile) {
        self.prefs.current_profile = Some(profile);
        self.prefs.pending_welcome = true;
    }

    /// Forget the selected profile and its one-shot flags; display preferences stay.
    pub fn end_session(&mut self) {
        self.prefs.current_profile = None;
        self.prefs.pending_welcome = false;
    }
}
