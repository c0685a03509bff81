//! Message processing
//!
//! Runs the TEA update loop for one incoming message, following chained
//! messages and dispatching every resulting action.

use crate::actions::{handle_action, ActionContext, TaskRegistry};
use crate::handler;
use crate::message::Message;
use crate::services::FunnelServices;
use crate::state::AppState;

/// Process a message through the TEA update function
pub fn process_message<S>(
    state: &mut AppState,
    message: Message,
    ctx: &ActionContext<S>,
    tasks: &mut TaskRegistry,
) where
    S: FunnelServices + Send + Sync + 'static,
{
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        if let Some(action) = result.action {
            handle_action(action, ctx, tasks);
        }

        // Continue with follow-up message
        msg = result.message;
    }
}
