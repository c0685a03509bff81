//! celfund-app - Application state and orchestration for the CelFund funnel
//!
//! This crate implements the TEA (The Elm Architecture) pattern for state management,
//! the Engine abstraction for shared orchestration, configuration loading, the
//! matching/checkout strategies, and the scraping dashboard state.

pub mod actions;
pub mod config;
pub mod dashboard_state;
pub mod engine;
pub mod engine_event;
pub mod handler;
pub mod input_key;
pub mod message;
pub mod navigator;
pub mod process;
pub mod services;
pub mod signals;
pub mod state;
pub mod upsell;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

// Re-export primary types
pub use engine::Engine;
pub use engine_event::EngineEvent;
pub use handler::{UpdateAction, UpdateResult};
pub use message::Message;
pub use navigator::{BrowserNavigator, Navigator, RecordingNavigator};
pub use services::{FunnelServices, StrategyServices};
pub use state::{AppPhase, AppState, CardInteraction, RequestId, ResultSource, Screen};
