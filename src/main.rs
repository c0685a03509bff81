//! CelFund - find grants that match your project from the terminal
//!
//! This is the binary entry point. All logic lives in the library.

use std::path::PathBuf;

use celfund::{HeadlessEvent, HeadlessOptions};
use celfund_app::config::{self, SettingsOverrides};
use celfund_app::{BrowserNavigator, RecordingNavigator, StrategyServices};
use clap::Parser;
use tracing::info;

/// CelFund - find grants that match your project
#[derive(Parser, Debug)]
#[command(name = "celfund")]
#[command(about = "Grant matching funnel for the terminal", long_about = None)]
struct Args {
    /// Run in headless mode (JSON output, no TUI)
    #[arg(long)]
    headless: bool,

    /// Project summary (headless)
    #[arg(long, default_value = "")]
    summary: String,

    /// Organization type, e.g. nonprofit or startup (headless)
    #[arg(long = "org", default_value = "")]
    organization_type: String,

    /// Focus area, e.g. climate or health (headless)
    #[arg(long = "focus", default_value = "")]
    focus_area: String,

    /// Contact email (headless)
    #[arg(long, default_value = "")]
    email: String,

    /// Result cards to save after matching (headless)
    #[arg(long, default_value_t = 2)]
    interactions: u32,

    /// Confirm the upgrade once the modal opens (headless)
    #[arg(long)]
    checkout: bool,

    /// Backend base URL, overriding the config file
    #[arg(long)]
    api_url: Option<String>,

    /// Use the mock grant source and checkout
    #[arg(long)]
    mock: bool,

    /// Path to a celfund.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    celfund_core::logging::init()?;

    let settings = match &args.config {
        Some(path) => config::load_settings_from(path)?,
        None => {
            let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            config::load_settings(&cwd)
        }
    };
    let settings = config::apply_overrides(
        settings,
        &SettingsOverrides {
            api_url: args.api_url.clone(),
            mock: args.mock,
        },
    );

    if args.headless {
        let services =
            match StrategyServices::from_settings(&settings, Box::new(RecordingNavigator::new())) {
                Ok(services) => services,
                Err(e) => {
                    HeadlessEvent::error(e.to_string(), true).emit();
                    return Err(e.into());
                }
            };
        let options = HeadlessOptions {
            summary: args.summary,
            organization_type: args.organization_type,
            focus_area: args.focus_area,
            email: args.email,
            interactions: args.interactions,
            checkout: args.checkout,
        };
        let report = celfund::run_headless(settings, services, options).await?;
        info!("Headless run finished: {:?}", report);
        return Ok(());
    }

    let navigator = BrowserNavigator::new(settings.behavior.browser.clone());
    let services = StrategyServices::from_settings(&settings, Box::new(navigator))?;
    if let Some(url) = celfund::run(settings, services).await? {
        eprintln!("Continue your upgrade at: {}", url);
    }
    Ok(())
}
