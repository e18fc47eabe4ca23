//! Navigation menu state derived from the selected profile.

use crate::config::{Labels, SitePaths};
use crate::profile::{Profile, Role};

/// Directory depth of the current page below the site base.
///
/// `/index.html` and `/` are depth 0, `/pages/x.html` is depth 1.
#[must_use]
pub fn page_depth(pathname: &str, base: &str) -> usize {
    let base = base.trim_end_matches('/');
    let path = pathname
        .strip_prefix(base)
        .filter(|rest| rest.is_empty() || rest.starts_with('/'))
        .unwrap_or(pathname);
    let segments = path.split('/').filter(|s| !s.is_empty()).count();
    if path.ends_with('/') || segments == 0 {
        segments
    } else {
        segments - 1
    }
}

/// Resolve a site-root-relative target from a page at `depth`.
#[must_use]
pub fn relative_href(target: &str, depth: usize) -> String {
    format!("{}{}", "../".repeat(depth), target.trim_start_matches('/'))
}

/// How the navigation menu should look on this page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavView {
    pub show_login: bool,
    pub show_logout: bool,
    pub dashboard_label: String,
    pub dashboard_href: String,
}

#[derive(Debug, Clone, Copy)]
pub struct NavGate<'a> {
    paths: &'a SitePaths,
    labels: &'a Labels,
}

impl<'a> NavGate<'a> {
    #[must_use]
    pub const fn new(paths: &'a SitePaths, labels: &'a Labels) -> Self {
        Self { paths, labels }
    }

    #[must_use]
    pub fn view(&self, profile: Option<&Profile>, depth: usize) -> NavView {
        match profile {
            Some(profile) => {
                let role = profile.role();
                let label = match role {
                    Role::Student => &self.labels.student_dashboard,
                    Role::Teacher => &self.labels.teacher_dashboard,
                };
                NavView {
                    show_login: false,
                    show_logout: true,
                    dashboard_label: label.clone(),
                    dashboard_href: self.dashboard_href(role, depth),
                }
            }
            None => NavView {
                show_login: true,
                show_logout: false,
                dashboard_label: self.labels.login.clone(),
                dashboard_href: self.login_href(depth),
            },
        }
    }

    /// Dashboard for `role`, relative to a page `depth` directories below the root.
    #[must_use]
    pub fn dashboard_href(&self, role: Role, depth: usize) -> String {
        let target = match role {
            Role::Student => &self.paths.student_dashboard,
            Role::Teacher => &self.paths.teacher_dashboard,
        };
        relative_href(target, depth)
    }

    #[must_use]
    pub fn login_href(&self, depth: usize) -> String {
        relative_href(&self.paths.login, depth)
    }

    #[must_use]
    pub fn root_href(&self, depth: usize) -> String {
        relative_href(&self.paths.root, depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WidgetConfig;

    #[test]
    fn depth_counts_directories_not_files() {
        assert_eq!(page_depth("/", ""), 0);
        assert_eq!(page_depth("/index.html", ""), 0);
        assert_eq!(page_depth("/pages/dashboard.html", ""), 1);
        assert_eq!(page_depth("/pages/", ""), 1);
        assert_eq!(page_depth("/pages/modules/clase-1.html", ""), 2);
    }

    #[test]
    fn depth_ignores_the_site_base() {
        assert_eq!(page_depth("/aula/index.html", "/aula/"), 0);
        assert_eq!(page_depth("/aula/pages/login.html", "/aula"), 1);
        assert_eq!(page_depth("/other/pages/login.html", "/aula"), 2);
        assert_eq!(page_depth("/aulario/login.html", "/aula"), 1);
    }

    #[test]
    fn relative_href_climbs_per_level() {
        assert_eq!(relative_href("index.html", 0), "index.html");
        assert_eq!(relative_href("/pages/login.html", 1), "../pages/login.html");
        assert_eq!(relative_href("index.html", 2), "../../index.html");
    }

    #[test]
    fn anonymous_view_points_at_login() {
        let config = WidgetConfig::default();
        let gate = NavGate::new(&config.paths, &config.labels);
        let view = gate.view(None, 1);
        assert!(view.show_login && !view.show_logout);
        assert_eq!(view.dashboard_href, "../pages/login.html");
    }

    #[test]
    fn teacher_view_points_at_teacher_dashboard() {
        let config = WidgetConfig::default();
        let gate = NavGate::new(&config.paths, &config.labels);
        let view = gate.view(Some(&Profile::Teacher), 0);
        assert!(!view.show_login && view.show_logout);
        assert_eq!(view.dashboard_href, "pages/dashboard-teacher.html");
        assert_eq!(view.dashboard_label, "Panel Docente");
    }
}
