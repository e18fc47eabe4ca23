//! The accessibility widget: preference state, its store, the page and narration.

use std::rc::Rc;

use crate::binder::FocusNarrationBinder;
use crate::config::WidgetConfig;
use crate::nav::{NavGate, NavView};
use crate::narration::{NarrationEngine, SpeechSynth};
use crate::page::{PageFlag, PageSurface};
use crate::profile::Profile;
use crate::state::{PreferenceState, keys};
use crate::store::PreferenceStore;

/// A navigation the host should perform after `delay_ms`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingNavigation {
    pub href: String,
    pub delay_ms: u32,
}

pub struct AccessWidget<S, P, N> {
    config: WidgetConfig,
    store: S,
    page: P,
    narrator: Rc<NarrationEngine<N>>,
    state: PreferenceState,
    binder: FocusNarrationBinder,
    depth: usize,
}

impl<S, P, N> AccessWidget<S, P, N>
where
    S: PreferenceStore,
    P: PageSurface,
    N: SpeechSynth,
{
    /// `depth` is the current page's directory depth below the site root.
    pub fn new(
        config: WidgetConfig,
        store: S,
        page: P,
        narrator: Rc<NarrationEngine<N>>,
        depth: usize,
    ) -> Self {
        let state = PreferenceState::new(config.font);
        let binder = FocusNarrationBinder::new(config.narration);
        Self {
            config,
            store,
            page,
            narrator,
            state,
            binder,
            depth,
        }
    }

    /// Load persisted preferences and apply them. Call once per page load,
    /// before the page accepts input.
    pub fn hydrate(&mut self) {
        self.state = PreferenceState::load(
            &self.store,
            self.config.font,
            &self.config.profile_aliases,
        );
        log::debug!("hydrated preferences: {:?}", self.state.preferences());
        self.apply_all();
        self.deliver_welcome();
        self.refresh_nav();
    }

    /// Flip high contrast, persist it and restyle the page. Returns the new state.
    pub fn toggle_contrast(&mut self) -> bool {
        let on = self.state.toggle_contrast();
        self.state.persist_keys(&self.store, &[keys::CONTRAST]);
        self.page.set_flag(PageFlag::HighContrast, on);
        if self.config.announce_changes {
            let messages = &self.config.messages;
            let text = if on {
                &messages.contrast_enabled
            } else {
                &messages.contrast_disabled
            };
            self.narrator.speak(text);
        }
        on
    }

    /// Step the root font size, wrapping to the base past the maximum.
    /// Returns the new size in the strategy's unit.
    pub fn cycle_font_scale(&mut self) -> f64 {
        let size = self.state.cycle_font();
        self.state.persist_keys(&self.store, &[keys::FONT_SIZE]);
        let css = self.config.font.css_value(size);
        self.page.set_font_size(&css);
        if self.config.announce_changes {
            let text =
                WidgetConfig::render(&self.config.messages.font_size, &[("size", css.as_str())]);
            self.narrator.speak(&text);
        }
        size
    }

    /// Turning the reader off leaves listeners attached; the disarmed engine ignores them.
    pub fn toggle_reader(&mut self) -> bool {
        let on = self.state.toggle_reader();
        self.state.persist_keys(&self.store, &[keys::READER]);
        self.apply_reader(on);
        if on {
            self.narrator.speak(&self.config.messages.reader_enabled);
        }
        on
    }

    /// Replace every preference with the profile's preset and schedule the dashboard.
    pub fn select_profile(&mut self, profile: Profile) -> PendingNavigation {
        log::info!("profile selected: {}", profile.id());
        let preset = profile.preset(&self.config.font);
        self.state.replace(preset);
        self.state.persist(&self.store);
        self.apply_all();
        self.refresh_nav();

        let label = profile.display_label(&self.config.labels);
        let message = WidgetConfig::render(
            &self.config.messages.login_success,
            &[("profile", label.as_str())],
        );
        self.page.show_feedback(&message);
        self.narrator.speak(&message);

        PendingNavigation {
            href: self.gate().dashboard_href(profile.role(), self.depth),
            delay_ms: self.config.navigation_delay_ms,
        }
    }

    /// Select a profile from a button's raw identifier or label.
    pub fn select_profile_label(&mut self, raw: &str) -> Option<PendingNavigation> {
        let profile = Profile::parse(raw, &self.config.profile_aliases);
        if profile.is_none() {
            log::warn!("profile button without a usable identifier");
        }
        profile.map(|p| self.select_profile(p))
    }

    /// Simulated teacher sign-in; goes straight to the teacher dashboard.
    ///
    /// Only the session is recorded. Display preferences chosen on the login
    /// page carry over, and nothing is announced since the page leaves at once.
    pub fn teacher_login(&mut self) -> PendingNavigation {
        let profile = Profile::Teacher;
        log::info!("profile signed in: {}", profile.id());
        let role = profile.role();
        self.state.begin_session(profile);
        self.state
            .persist_keys(&self.store, &[keys::PROFILE, keys::WELCOME]);
        self.refresh_nav();
        PendingNavigation {
            href: self.gate().dashboard_href(role, self.depth),
            delay_ms: 0,
        }
    }

    /// Forget the selected profile and head back to the site root.
    pub fn logout(&mut self) -> PendingNavigation {
        log::info!("profile session ended");
        self.state.end_session();
        self.state
            .persist_keys(&self.store, &[keys::PROFILE, keys::WELCOME]);
        self.refresh_nav();
        PendingNavigation {
            href: self.gate().root_href(self.depth),
            delay_ms: 0,
        }
    }

    /// Wipe the store and return to defaults.
    pub fn reset(&mut self) {
        if let Err(err) = self.store.clear() {
            log::warn!("preference store could not be cleared: {err}");
        }
        self.state.reset();
        self.apply_all();
        self.refresh_nav();
    }

    /// Recompute and apply the navigation menu.
    pub fn refresh_nav(&mut self) -> NavView {
        let view = self
            .gate()
            .view(self.state.preferences().current_profile.as_ref(), self.depth);
        self.page.apply_nav(&view);
        view
    }

    #[must_use]
    pub const fn state(&self) -> &PreferenceState {
        &self.state
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub const fn page(&self) -> &P {
        &self.page
    }

    #[must_use]
    pub const fn config(&self) -> &WidgetConfig {
        &self.config
    }

    #[must_use]
    pub fn narrator(&self) -> &Rc<NarrationEngine<N>> {
        &self.narrator
    }

    fn gate(&self) -> NavGate<'_> {
        NavGate::new(&self.config.paths, &self.config.labels)
    }

    fn apply_all(&mut self) {
        let prefs = self.state.preferences().clone();
        self.page.set_flag(PageFlag::HighContrast, prefs.high_contrast);
        self.page
            .set_font_size(&self.config.font.css_value(prefs.font_size));
        self.page.set_flag(PageFlag::Subtitles, prefs.subtitles);
        self.page.set_flag(PageFlag::LargeTargets, prefs.large_targets);
        self.page
            .set_flag(PageFlag::SimplifiedLayout, prefs.simplified_layout);
        self.apply_reader(prefs.reader_active);
    }

    fn apply_reader(&mut self, on: bool) {
        self.page.set_flag(PageFlag::ReaderActive, on);
        let labels = &self.config.labels;
        self.page
            .set_reader_label(if on { &labels.reader_on } else { &labels.reader_off });
        self.narrator.set_active(on);
        if on {
            let page = &mut self.page;
            let prefix = &self.config.messages.detail_prefix;
            self.binder
                .ensure_attached(|targets| page.attach_narration(targets, prefix));
        }
    }

    fn deliver_welcome(&mut self) {
        let prefs = self.state.preferences();
        let Some(profile) = prefs.current_profile.as_ref().filter(|_| prefs.pending_welcome) else {
            return;
        };
        let label = profile.display_label(&self.config.labels);
        let message =
            WidgetConfig::render(&self.config.messages.welcome, &[("profile", label.as_str())]);
        if self
            .page
            .show_welcome(&message, self.config.welcome_dismiss_ms)
        {
            self.narrator.speak(&message);
            self.state.consume_welcome();
            self.state.persist_keys(&self.store, &[keys::WELCOME]);
        }
    }
}
