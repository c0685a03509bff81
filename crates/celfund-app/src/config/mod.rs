//! Configuration file parsing for CelFund
//!
//! Supports:
//! - `./celfund.toml` - per-directory settings
//! - `<config dir>/celfund/config.toml` - user settings
//! - `CELFUND_API_URL` and command-line overrides

pub mod settings;
pub mod types;

pub use settings::{
    apply_overrides, config_candidates, load_settings, load_settings_from, SettingsOverrides,
    API_URL_ENV_VAR,
};
pub use types::*;
