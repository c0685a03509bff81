//! Main TUI runner - entry point and event loop

use std::io::stdout;

use celfund_app::config::Settings;
use celfund_app::{Engine, FunnelServices};
use celfund_core::prelude::*;
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use tracing::warn;
use url::Url;

use super::{event, render, terminal};

/// Run the TUI until the user quits or the browser is sent to checkout.
///
/// Returns the checkout URL when the funnel completed.
pub async fn run<S>(settings: Settings, services: S) -> Result<Option<Url>>
where
    S: FunnelServices + Send + Sync + 'static,
{
    // Install panic hook for terminal restoration
    terminal::install_panic_hook();

    let mut term = ratatui::try_init().map_err(|e| Error::TerminalInit(e.to_string()))?;

    let mut engine = Engine::new(settings, services);
    info!(
        "Starting TUI (upsell threshold {})",
        engine.state.interactions.threshold()
    );

    if let Err(e) = crossterm::execute!(stdout(), EnableBracketedPaste) {
        warn!("Bracketed paste unavailable: {}", e);
    }

    let result = run_loop(&mut term, &mut engine);

    let _ = crossterm::execute!(stdout(), DisableBracketedPaste);
    engine.shutdown().await;
    ratatui::restore();

    result.map(|()| engine.redirected_to().cloned())
}

/// Main event loop
fn run_loop<S>(terminal: &mut ratatui::DefaultTerminal, engine: &mut Engine<S>) -> Result<()>
where
    S: FunnelServices + Send + Sync + 'static,
{
    while !engine.is_finished() {
        // Completions from background tasks and the signal handler
        engine.drain_pending_messages();

        terminal
            .draw(|frame| render::view(frame, &engine.state))
            .context("Failed to draw frame")?;

        if let Some(message) = event::poll()? {
            engine.process_message(message);
        }
    }
    Ok(())
}
