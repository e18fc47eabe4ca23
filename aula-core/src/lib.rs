//! Aula accessibility widget engine
//!
//! Platform-agnostic preference logic for the Aula site: high contrast, font
//! scaling, reader-mode narration, profile presets and the navigation gate.
//! Browser specifics live behind [`PreferenceStore`], [`PageSurface`] and
//! [`SpeechSynth`].

pub mod binder;
pub mod config;
pub mod font;
pub mod narration;
pub mod nav;
pub mod page;
pub mod profile;
pub mod state;
pub mod store;
pub mod widget;

pub use binder::{
    FocusNarrationBinder, NarrationCue, NarrationEvent, NarrationTargets, utterance_text,
};
pub use config::{ConfigError, Labels, Messages, SitePaths, WidgetConfig};
pub use font::FontStrategy;
pub use narration::{NarrationEngine, SpeechSynth};
pub use nav::{NavGate, NavView, page_depth, relative_href};
pub use page::{PageFlag, PageSurface};
pub use profile::{Profile, Role};
pub use state::{AccessibilityPreferences, PreferenceState, keys};
pub use store::{MemoryStore, PreferenceStore};
pub use widget::{AccessWidget, PendingNavigation};
