//! Theme for the CelFund TUI
//!
//! - [`palette`]: named colors
//! - [`styles`]: semantic style and block builders

pub mod palette;
pub mod styles;
