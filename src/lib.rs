//! CelFund Library
//!
//! Grant matching funnel with a terminal UI and a headless mode for scripts.
//! The engine, services, and rendering live in the workspace crates; this
//! crate wires them together.

pub mod headless;

// Re-export main entry points
pub use celfund_tui::run;
pub use headless::runner::{run_headless, run_headless_with, HeadlessOptions, HeadlessReport};
pub use headless::HeadlessEvent;
