//! Path helpers for the Zellij plugin sandbox.

use std::path::PathBuf;

/// Directory holding the trace file: `~/.local/share/zellij/safenet` as seen
/// from inside the sandbox.
///
/// ```
/// use safenet::infrastructure::get_data_dir;
///
/// assert_eq!(
///     get_data_dir(),
///     std::path::PathBuf::from("/host/.local/share/zellij/safenet")
/// );
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("safenet")
}

/// Rewrites a leading `~` to the sandbox `/host` mount. Other paths pass
/// through untouched.
///
/// ```
/// use safenet::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/relief.toml"), "/host/themes/relief.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/safenet.toml"), "/etc/safenet.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        format!("/host/{rest}")
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}
