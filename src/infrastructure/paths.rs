//! Path manipulation utilities for Zellij sandbox environment.
//!
//! The host filesystem is mounted under `/host` inside the plugin sandbox. User
//! supplied paths (such as a custom theme file) are mapped onto it here, and
//! the trace output location is defined here.

use std::path::PathBuf;

/// Name of the OTLP trace file inside [`get_data_dir`].
const TRACE_FILE_NAME: &str = "pixgrid-otlp.json";

/// Returns the data directory for Pixgrid output.
///
/// The directory is located at `/host/.local/share/zellij/pixgrid` in the Zellij
/// sandbox. `/host` points to the cwd of the last focused terminal, or the
/// folder where Zellij was started if that's not available.
///
/// ```
/// use pixgrid::infrastructure::get_data_dir;
///
/// let data_dir = get_data_dir();
/// assert_eq!(data_dir.to_str().unwrap(), "/host/.local/share/zellij/pixgrid");
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("pixgrid")
}

/// Returns the path traces are exported to.
#[must_use]
pub fn trace_file_path() -> PathBuf {
    get_data_dir().join(TRACE_FILE_NAME)
}

/// Expands tilde paths to use the `/host` prefix for Zellij sandbox.
///
/// ```
/// use pixgrid::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dusk.toml"), "/host/themes/dusk.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_file_path() {
        assert_eq!(
            trace_file_path(),
            PathBuf::from("/host/.local/share/zellij/pixgrid/pixgrid-otlp.json")
        );
    }

    #[test]
    fn test_expand_tilde_leaves_other_paths() {
        assert_eq!(expand_tilde("~user/theme.toml"), "~user/theme.toml");
        assert_eq!(expand_tilde("relative/theme.toml"), "relative/theme.toml");
    }
}
