//! Common utility functions shared across the codebase.

use std::path::Path;

/// Checks if an identifier follows the component naming rule (uppercase initial).
///
/// # Examples
///
/// ```
/// use stocktake::utils::is_component_name;
///
/// assert!(is_component_name("Button"));
/// assert!(!is_component_name("button"));
/// assert!(!is_component_name("_Button"));
/// assert!(!is_component_name(""));
/// ```
pub fn is_component_name(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}

/// Checks if an identifier follows the hook naming rule: `use` followed by an uppercase letter.
///
/// # Examples
///
/// ```
/// use stocktake::utils::is_hook_name;
///
/// assert!(is_hook_name("useState"));
/// assert!(is_hook_name("useQuery"));
/// assert!(!is_hook_name("user"));
/// assert!(!is_hook_name("use"));
/// ```
pub fn is_hook_name(name: &str) -> bool {
    name.strip_prefix("use")
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_ascii_uppercase())
}

/// Render `path` relative to `root` with forward slashes.
///
/// Falls back to the full path when `path` is not under `root`.
pub fn relative_slash_path(path: &Path, root: &Path) -> String {
    let Ok(rel) = path.strip_prefix(root) else {
        return path.to_string_lossy().to_string();
    };
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
