use crate::binder::NarrationTargets;
use crate::nav::NavView;

/// Presentation states toggled as classes on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PageFlag {
    HighContrast,
    ReaderActive,
    Subtitles,
    LargeTargets,
    SimplifiedLayout,
}

impl PageFlag {
    pub const ALL: [Self; 5] = [
        Self::HighContrast,
        Self::ReaderActive,
        Self::Subtitles,
        Self::LargeTargets,
        Self::SimplifiedLayout,
    ];

    /// Class the site stylesheet keys on.
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::HighContrast => "high-contrast",
            Self::ReaderActive => "reader-active",
            Self::Subtitles => "subtitles-on",
            Self::LargeTargets => "large-targets",
            Self::SimplifiedLayout => "simplified-layout",
        }
    }
}

/// The rendered page, as far as the widget touches it.
///
/// Implementations skip silently when the element they need is missing.
pub trait PageSurface {
    fn set_flag(&mut self, flag: PageFlag, on: bool);

    /// Inline font size on the document root, e.g. `120%`.
    fn set_font_size(&mut self, css_value: &str);

    /// Text of the reader toggle control.
    fn set_reader_label(&mut self, label: &str);

    /// Wire narration listeners onto the current set of target elements.
    fn attach_narration(&mut self, targets: NarrationTargets, detail_prefix: &str);

    /// Show the welcome banner. Returns false when the page has no welcome region.
    fn show_welcome(&mut self, message: &str, dismiss_after_ms: u32) -> bool;

    /// In-page confirmation after a profile is chosen.
    fn show_feedback(&mut self, message: &str);

    fn apply_nav(&mut self, view: &NavView);
}
