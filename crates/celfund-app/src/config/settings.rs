//! Settings loader for celfund.toml

use std::path::{Path, PathBuf};

use celfund_core::prelude::*;

use super::types::{Settings, StrategyKind};

const CONFIG_FILENAME: &str = "celfund.toml";
const GLOBAL_CONFIG_DIR: &str = "celfund";
const GLOBAL_CONFIG_FILENAME: &str = "config.toml";

/// Environment variable overriding `api.base_url`
pub const API_URL_ENV_VAR: &str = "CELFUND_API_URL";

/// Overrides collected from the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsOverrides {
    pub api_url: Option<String>,
    pub mock: bool,
}

/// Config files consulted in order: `./celfund.toml`, then the user config dir
pub fn config_candidates(working_dir: &Path) -> Vec<PathBuf> {
    let mut candidates = vec![working_dir.join(CONFIG_FILENAME)];
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join(GLOBAL_CONFIG_DIR).join(GLOBAL_CONFIG_FILENAME));
    }
    candidates
}

/// Load settings from the first candidate file that exists.
///
/// Never fails: unreadable or unparsable files fall back to defaults.
pub fn load_settings(working_dir: &Path) -> Settings {
    let settings = config_candidates(working_dir)
        .into_iter()
        .find(|path| path.exists())
        .map(|path| read_or_default(&path))
        .unwrap_or_else(|| {
            debug!("No config file found, using defaults");
            Settings::default()
        });

    apply_env(settings)
}

/// Load settings from an explicit path (`--config`).
///
/// A missing file is fatal; a file that exists but does not parse is
/// reported as a config error.
pub fn load_settings_from(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Err(Error::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {:?}", path))?;
    let settings: Settings = toml::from_str(&content)
        .map_err(|e| Error::config(format!("Failed to parse {:?}: {}", path, e)))?;

    debug!("Loaded settings from {:?}", path);
    Ok(apply_env(settings))
}

fn read_or_default(path: &Path) -> Settings {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", path, e);
            Settings::default()
        }
    }
}

fn apply_env(mut settings: Settings) -> Settings {
    if let Ok(url) = std::env::var(API_URL_ENV_VAR) {
        if !url.trim().is_empty() {
            debug!("{} overrides api.base_url", API_URL_ENV_VAR);
            settings.api.base_url = url.trim().to_string();
        }
    }
    normalize(settings)
}

/// Apply command-line overrides on top of file and environment settings
pub fn apply_overrides(mut settings: Settings, overrides: &SettingsOverrides) -> Settings {
    if let Some(url) = &overrides.api_url {
        settings.api.base_url = url.clone();
    }
    if overrides.mock {
        settings.matching.strategy = StrategyKind::Mock;
    }
    normalize(settings)
}

fn normalize(mut settings: Settings) -> Settings {
    // A zero threshold could never be crossed from below
    if settings.upsell.interaction_threshold == 0 {
        warn!("upsell.interaction_threshold must be at least 1, using 1");
        settings.upsell.interaction_threshold = 1;
    }
    if settings.dashboard.stats_days == 0 {
        settings.dashboard.stats_days = 1;
    }
    settings
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    #[test]
    #[serial]
    fn test_load_settings_from_working_dir() {
        std::env::remove_var(API_URL_ENV_VAR);
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILENAME),
            "[upsell]\ninteraction_threshold = 3\n",
        )
        .unwrap();

        let settings = load_settings(dir.path());
        assert_eq!(settings.upsell.interaction_threshold, 3);
    }

    #[test]
    #[serial]
    fn test_invalid_file_falls_back_to_defaults() {
        std::env::remove_var(API_URL_ENV_VAR);
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "this is [not toml").unwrap();

        let settings = load_settings(dir.path());
        assert_eq!(settings.upsell.interaction_threshold, 2);
    }

    #[test]
    fn test_config_candidates_start_with_working_dir() {
        let dir = tempdir().unwrap();
        let candidates = config_candidates(dir.path());
        assert_eq!(candidates[0], dir.path().join("celfund.toml"));
    }

    #[test]
    #[serial]
    fn test_env_overrides_base_url() {
        let dir = tempdir().unwrap();
        std::env::set_var(API_URL_ENV_VAR, "https://staging.celfund.example");
        let settings = load_settings(dir.path());
        std::env::remove_var(API_URL_ENV_VAR);

        assert_eq!(settings.api.base_url, "https://staging.celfund.example");
    }

    #[test]
    #[serial]
    fn test_explicit_path_missing_is_fatal() {
        let dir = tempdir().unwrap();
        let err = load_settings_from(&dir.path().join("nope.toml")).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    #[serial]
    fn test_explicit_path_parse_error() {
        std::env::remove_var(API_URL_ENV_VAR);
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[matching]\nstrategy = 5\n").unwrap();

        assert!(matches!(
            load_settings_from(&path),
            Err(Error::Config { .. })
        ));
    }

    #[test]
    fn test_cli_overrides_win() {
        let overrides = SettingsOverrides {
            api_url: Some("http://127.0.0.1:9000".into()),
            mock: true,
        };
        let settings = apply_overrides(Settings::default(), &overrides);
        assert_eq!(settings.api.base_url, "http://127.0.0.1:9000");
        assert_eq!(settings.matching.strategy, StrategyKind::Mock);
    }

    #[test]
    fn test_zero_threshold_is_raised_to_one() {
        let mut settings = Settings::default();
        settings.upsell.interaction_threshold = 0;
        let settings = apply_overrides(settings, &SettingsOverrides::default());
        assert_eq!(settings.upsell.interaction_threshold, 1);
    }
}
