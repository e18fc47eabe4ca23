//! Helpers for resolving the current page's position under the deployment base path.
///
/// When `PUBLIC_URL` is set at compile time (e.g., `/aula` for GitHub Pages),
/// depth is measured below that prefix. Local builds without `PUBLIC_URL`
/// measure from the host root.
#[must_use]
pub fn site_base() -> String {
    site_base_with(option_env!("PUBLIC_URL").unwrap_or(""))
}

/// Directory depth of the page currently loaded in the browser.
#[must_use]
pub fn current_depth() -> usize {
    crate::dom::current_pathname()
        .map_or(0, |path| aula_core::page_depth(&path, &site_base()))
}

fn site_base_with(base: &str) -> String {
    let base = base.trim().trim_end_matches('/');
    if base.is_empty() {
        String::new()
    } else if base.starts_with('/') {
        base.to_string()
    } else {
        format!("/{base}")
    }
}
