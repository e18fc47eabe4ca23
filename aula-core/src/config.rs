//! Widget configuration.
//!
//! Defaults ship embedded in the crate (`data/widget.json`); a page may supply
//! its own JSON document which is validated the same way.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::binder::NarrationTargets;
use crate::font::FontStrategy;

const DEFAULT_CONFIG_JSON: &str = include_str!("../data/widget.json");

/// Longest delay accepted for timers; anything larger is a configuration typo.
const MAX_DELAY_MS: u32 = 60_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("font base must be a positive number (got {base})")]
    FontBase { base: f64 },
    #[error("font bound {max} must exceed base {base}")]
    FontBounds { base: f64, max: f64 },
    #[error("font growth {growth} never reaches the bound")]
    FontGrowth { growth: f64 },
    #[error("large font preset {large} must lie between {base} and {max}")]
    FontPreset { large: f64, base: f64, max: f64 },
    #[error("{field} must be at most {max} ms (got {value})")]
    Delay {
        field: &'static str,
        value: u32,
        max: u32,
    },
    #[error("locale must not be empty")]
    Locale,
    #[error("profile alias `{alias}` points at unknown profile `{target}`")]
    Alias { alias: String, target: String },
}

/// Destinations relative to the site root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SitePaths {
    pub root: String,
    pub login: String,
    pub student_dashboard: String,
    pub teacher_dashboard: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Labels {
    pub reader_on: String,
    pub reader_off: String,
    pub login: String,
    pub student_dashboard: String,
    pub teacher_dashboard: String,
    /// Display names keyed by profile id.
    #[serde(default)]
    pub profiles: BTreeMap<String, String>,
}

/// Spoken and rendered messages. `{profile}` and `{size}` are substituted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Messages {
    pub reader_enabled: String,
    pub contrast_enabled: String,
    pub contrast_disabled: String,
    pub font_size: String,
    pub login_success: String,
    pub welcome: String,
    pub detail_prefix: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetConfig {
    pub locale: String,
    pub font: FontStrategy,
    pub narration: NarrationTargets,
    /// Narrate contrast and font changes in addition to reader activation.
    #[serde(default)]
    pub announce_changes: bool,
    pub navigation_delay_ms: u32,
    pub welcome_dismiss_ms: u32,
    pub paths: SitePaths,
    pub labels: Labels,
    pub messages: Messages,
    /// Free-form profile labels (as found on existing profile buttons) mapped to profile ids.
    #[serde(default)]
    pub profile_aliases: BTreeMap<String, String>,
}

impl WidgetConfig {
    /// Parse and validate a configuration document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or describes an invalid configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Embedded defaults, parsed once.
    #[must_use]
    pub fn embedded() -> &'static Self {
        static CONFIG: OnceLock<WidgetConfig> = OnceLock::new();
        CONFIG.get_or_init(|| {
            Self::from_json(DEFAULT_CONFIG_JSON).unwrap_or_else(|err| {
                log::error!("embedded widget config rejected: {err}");
                Self::fallback()
            })
        })
    }

    /// Validate cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns the first constraint that does not hold.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.locale.trim().is_empty() {
            return Err(ConfigError::Locale);
        }
        self.font.validate()?;
        for (field, value) in [
            ("navigation_delay_ms", self.navigation_delay_ms),
            ("welcome_dismiss_ms", self.welcome_dismiss_ms),
        ] {
            if value > MAX_DELAY_MS {
                return Err(ConfigError::Delay {
                    field,
                    value,
                    max: MAX_DELAY_MS,
                });
            }
        }
        for (alias, target) in &self.profile_aliases {
            if crate::profile::Profile::from_id(target).is_none() {
                return Err(ConfigError::Alias {
                    alias: alias.clone(),
                    target: target.clone(),
                });
            }
        }
        Ok(())
    }

    /// Render a message template.
    #[must_use]
    pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
        vars.iter().fold(template.to_owned(), |acc, (key, value)| {
            acc.replace(&format!("{{{key}}}"), value)
        })
    }

    fn fallback() -> Self {
        Self {
            locale: "es-ES".into(),
            font: FontStrategy::default(),
            narration: NarrationTargets::Interaction,
            announce_changes: false,
            navigation_delay_ms: 1500,
            welcome_dismiss_ms: 4000,
            paths: SitePaths {
                root: "index.html".into(),
                login: "pages/login.html".into(),
                student_dashboard: "pages/dashboard.html".into(),
                teacher_dashboard: "pages/dashboard-teacher.html".into(),
            },
            labels: Labels {
                reader_on: "Lector 🔇".into(),
                reader_off: "Lector 🔊".into(),
                login: "Acceso".into(),
                student_dashboard: "Mi Panel".into(),
                teacher_dashboard: "Panel Docente".into(),
                profiles: BTreeMap::new(),
            },
            messages: Messages {
                reader_enabled: "Lector de pantalla activado.".into(),
                contrast_enabled: "Alto contraste activado.".into(),
                contrast_disabled: "Alto contraste desactivado.".into(),
                font_size: "Tamaño de texto: {size}.".into(),
                login_success:
                    "Acceso exitoso. Redirigiendo al dashboard adaptado para {profile}.".into(),
                welcome: "¡Bienvenido, {profile}! Tu sesión está adaptada.".into(),
                detail_prefix: ". Información adicional: ".into(),
            },
            profile_aliases: BTreeMap::new(),
        }
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self::embedded().clone()
    }
}
