//! Accessibility profiles offered on the login view.
//!
//! Choosing a profile is a simulated sign-in: nothing is authenticated, the
//! choice only selects a preference preset and a dashboard.

use std::collections::BTreeMap;

use crate::config::Labels;
use crate::font::FontStrategy;
use crate::state::AccessibilityPreferences;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Profile {
    Visual,
    Auditory,
    Motor,
    Cognitive,
    Teacher,
    /// Any other label found on a profile button.
    Custom(String),
}

/// Which dashboard a profile lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Student,
    Teacher,
}

impl Profile {
    /// Resolve a canonical profile id.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        match id.trim().to_ascii_lowercase().as_str() {
            "visual" => Some(Self::Visual),
            "auditory" => Some(Self::Auditory),
            "motor" => Some(Self::Motor),
            "cognitive" => Some(Self::Cognitive),
            "teacher" => Some(Self::Teacher),
            _ => None,
        }
    }

    /// Resolve a stored identifier or button label.
    ///
    /// Canonical ids win, then configured aliases; anything else non-blank is kept verbatim.
    #[must_use]
    pub fn parse(raw: &str, aliases: &BTreeMap<String, String>) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        Self::from_id(raw)
            .or_else(|| aliases.get(raw).and_then(|id| Self::from_id(id)))
            .or_else(|| Some(Self::Custom(raw.to_owned())))
    }

    /// Identifier written to the store.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Visual => "visual",
            Self::Auditory => "auditory",
            Self::Motor => "motor",
            Self::Cognitive => "cognitive",
            Self::Teacher => "teacher",
            Self::Custom(label) => label,
        }
    }

    #[must_use]
    pub const fn role(&self) -> Role {
        match self {
            Self::Teacher => Role::Teacher,
            _ => Role::Student,
        }
    }

    /// Human-readable name used in confirmation and welcome messages.
    #[must_use]
    pub fn display_label(&self, labels: &Labels) -> String {
        labels
            .profiles
            .get(self.id())
            .cloned()
            .unwrap_or_else(|| self.id().to_owned())
    }

    /// Preferences this profile starts from. Prior preferences are never merged in.
    #[must_use]
    pub fn preset(&self, font: &FontStrategy) -> AccessibilityPreferences {
        let mut prefs = AccessibilityPreferences::defaults(font);
        match self {
            Self::Visual => {
                prefs.high_contrast = true;
                prefs.reader_active = true;
                prefs.font_size = font.large();
            }
            Self::Auditory => prefs.subtitles = true,
            Self::Motor => prefs.large_targets = true,
            Self::Cognitive => {
                prefs.reader_active = true;
                prefs.simplified_layout = true;
            }
            Self::Teacher | Self::Custom(_) => {}
        }
        prefs.current_profile = Some(self.clone());
        prefs.pending_welcome = true;
        prefs
    }
}
