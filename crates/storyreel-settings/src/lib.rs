//! # storyreel-settings
//!
//! Configuration with layered sources for the storyreel service.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults** — [`StoryreelSettings::default()`]
//! 2. **User file** — `~/.storyreel/settings.json` or `--settings <path>`
//!    (deep-merged over defaults)
//! 3. **Environment variables** — `PEXELS_*` / `STORYREEL_*` overrides
//!
//! The loaded value is handed to the server at startup; there is no global.

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{
    apply_overrides, deep_merge, load_settings_from_path, load_settings_with, settings_path,
};
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn re_exports_work() {
        let _settings = StoryreelSettings::default();
        let path = settings_path();
        assert!(path.ends_with(".storyreel/settings.json"));
    }

    #[test]
    fn missing_file_loads_through_public_entry_point() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings_from_path(&dir.path().join("absent.json")).unwrap();
        assert_eq!(settings.pexels.per_page, StoryreelSettings::default().pexels.per_page);
    }
}
