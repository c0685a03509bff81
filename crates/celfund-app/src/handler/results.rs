//! Result-card interaction handlers

use tracing::{debug, info};
use url::Url;

use crate::state::{AppState, CardInteraction};

use super::{UpdateAction, UpdateResult};

/// Apply a card interaction and count it toward the upgrade prompt
pub fn handle_card_interaction(
    state: &mut AppState,
    index: usize,
    kind: CardInteraction,
) -> UpdateResult {
    if !state.results_visible() {
        debug!("Card interaction ignored: no results on screen");
        return UpdateResult::none();
    }

    let Some(grant) = state.results.grants.get(index).cloned() else {
        debug!("Card interaction ignored: no card at index {}", index);
        return UpdateResult::none();
    };

    state.results.selected = index;
    state.last_interaction = Some(kind);

    if state.interactions.record() {
        let email = state.form.email().to_string();
        if state.upgrade.open(email) {
            info!(
                "Interaction threshold {} reached, opening upgrade modal",
                state.interactions.threshold()
            );
        }
    }

    match kind {
        CardInteraction::View => match grant.url.as_deref().map(Url::parse) {
            Some(Ok(url)) => UpdateResult::action(UpdateAction::OpenUrl { url }),
            Some(Err(e)) => {
                debug!("Grant {} has an unusable url: {}", grant.id, e);
                state.notice = Some("No link available for this grant".to_string());
                UpdateResult::none()
            }
            None => {
                state.notice = Some("No link available for this grant".to_string());
                UpdateResult::none()
            }
        },
        CardInteraction::Copy => {
            state.notice = Some("Copied to clipboard".to_string());
            UpdateResult::action(UpdateAction::CopyToClipboard {
                grant_id: grant.id,
                text: grant.clipboard_text(),
            })
        }
        CardInteraction::Save => {
            state.results.saved.insert(grant.id);
            state.notice = Some("Grant saved".to_string());
            UpdateResult::none()
        }
    }
}
