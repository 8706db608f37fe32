//! Configuration, log and preference file locations.

use std::env;
use std::path::{Path, PathBuf};

/// Application directory name under the config base.
const APP_DIR: &str = "gamehub";

/// Resolve an XDG base directory from environment or default to `$HOME` + segments.
///
/// Inputs:
/// - `var`: Environment variable to check (e.g., `XDG_CONFIG_HOME`).
/// - `home_default`: Fallback path segments relative to `$HOME` if `var` is unset/empty.
///
/// Output: Resolved base directory path.
fn xdg_base_dir(var: &str, home_default: &[&str]) -> PathBuf {
    base_dir_from(
        env::var(var).ok().as_deref(),
        env::var("HOME").ok().as_deref(),
        home_default,
    )
}

/// What: Pick the base directory from explicit variable values.
///
/// Inputs:
/// - `xdg`: Value of the XDG variable, if set
/// - `home`: Value of `HOME`, if set
/// - `home_default`: Segments appended to `home` when `xdg` is unset or blank
///
/// Output:
/// - `xdg` when non-blank, else `home` (or `.`) joined with `home_default`
fn base_dir_from(xdg: Option<&str>, home: Option<&str>, home_default: &[&str]) -> PathBuf {
    if let Some(p) = xdg
        && !p.trim().is_empty()
    {
        return PathBuf::from(p);
    }
    let mut base = PathBuf::from(home.unwrap_or("."));
    for seg in home_default {
        base = base.join(seg);
    }
    base
}

/// Config directory: `$XDG_CONFIG_HOME/gamehub` or `~/.config/gamehub` (ensured to exist).
pub fn config_dir() -> PathBuf {
    let dir = xdg_base_dir("XDG_CONFIG_HOME", &[".config"]).join(APP_DIR);
    if let Err(e) = std::fs::create_dir_all(&dir) {
        tracing::debug!(path = %dir.display(), error = %e, "[Config] Could not create config dir");
    }
    dir
}

/// Logs directory under config: `{config_dir}/logs` (ensured to exist).
pub fn logs_dir() -> PathBuf {
    let dir = config_dir().join("logs");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// Location of `settings.conf`.
pub fn settings_path() -> PathBuf {
    config_dir().join("settings.conf")
}

/// Location of the persisted preferences (language choice).
pub fn preferences_path() -> PathBuf {
    config_dir().join("preferences.json")
}

/// What: Resolve a possibly relative configured path.
///
/// Inputs:
/// - `value`: Configured path; `~/` expands to `$HOME`
/// - `base`: Directory relative paths are resolved against
///
/// Output:
/// - Absolute-looking path
pub fn resolve_config_path(value: &str, base: &Path) -> PathBuf {
    if let Some(rest) = value.strip_prefix("~/")
        && let Ok(home) = env::var("HOME")
    {
        return Path::new(&home).join(rest);
    }
    let p = PathBuf::from(value);
    if p.is_absolute() { p } else { base.join(p) }
}
