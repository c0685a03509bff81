//! Sending the user's browser somewhere
//!
//! [`BrowserNavigator`] launches the platform opener (or a configured
//! browser command). [`RecordingNavigator`] only remembers the URLs it was
//! given; the headless runner and tests use it.

use std::process::Command;
use std::sync::{Arc, Mutex};

use celfund_core::prelude::*;
use url::Url;

/// Opens URLs outside the application
pub trait Navigator: Send + Sync {
    fn navigate(&self, url: &Url) -> Result<()>;
}

/// Opens URLs in the system browser
#[derive(Debug, Clone, Default)]
pub struct BrowserNavigator {
    /// Custom browser command. Empty = platform default.
    browser: String,
}

impl BrowserNavigator {
    pub fn new(browser: impl Into<String>) -> Self {
        Self {
            browser: browser.into(),
        }
    }
}

impl Navigator for BrowserNavigator {
    fn navigate(&self, url: &Url) -> Result<()> {
        debug!("Opening {} in browser", url);
        open_url_in_browser(url.as_str(), &self.browser)
            .map_err(|e| Error::navigation(url.as_str(), e.to_string()))
    }
}

/// Spawn the opener without waiting for it to exit
fn open_url_in_browser(url: &str, browser: &str) -> std::io::Result<()> {
    if !browser.is_empty() {
        Command::new(browser).arg(url).spawn()?;
        return Ok(());
    }

    #[cfg(target_os = "macos")]
    {
        Command::new("open").arg(url).spawn()?;
        return Ok(());
    }

    #[cfg(target_os = "linux")]
    {
        Command::new("xdg-open").arg(url).spawn()?;
        return Ok(());
    }

    #[cfg(target_os = "windows")]
    {
        Command::new("cmd").args(["/C", "start", "", url]).spawn()?;
        return Ok(());
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        return Err(std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "no browser opener available for this platform",
        ));
    }

    #[allow(unreachable_code)]
    Ok(())
}

/// Remembers navigations instead of performing them
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    visited: Arc<Mutex<Vec<Url>>>,
    fail: bool,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// A navigator whose every navigation fails
    pub fn failing() -> Self {
        Self {
            visited: Arc::default(),
            fail: true,
        }
    }

    /// URLs navigated to so far, oldest first
    pub fn visited(&self) -> Vec<Url> {
        self.visited
            .lock()
            .map(|visited| visited.clone())
            .unwrap_or_default()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, url: &Url) -> Result<()> {
        if self.fail {
            return Err(Error::navigation(url.as_str(), "navigation disabled"));
        }
        if let Ok(mut visited) = self.visited.lock() {
            visited.push(url.clone());
        }
        Ok(())
    }
}
