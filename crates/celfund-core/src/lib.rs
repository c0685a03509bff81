//! # celfund-core - Core Domain Types
//!
//! Foundation crate for CelFund. Provides the form model and its validation,
//! grant types, template generation, error handling, and logging setup.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, chrono, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Form (`form`)
//! - [`FormState`] - Field values plus a derived `is_valid` flag
//! - [`FormField`] - Identifies a field for focus and editing
//! - [`ValidForm`] - Snapshot of a form that passed validation
//!
//! ### Domain Types (`types`)
//! - [`OrganizationType`], [`FocusArea`] - Select field options
//! - [`GrantMatch`] - A funding opportunity shown as a result card
//! - [`Deadline`] - Closing date or rolling
//!
//! ### Fallback Data (`templates`, `mock`)
//! - [`fallback_grants()`] - Deterministic per-focus-area template results
//! - [`mock_grants()`] - Static ten-grant catalogue
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use celfund_core::prelude::*;
//! ```

pub mod error;
pub mod form;
pub mod logging;
pub mod mock;
pub mod prelude;
pub mod templates;
pub mod types;

pub use error::{Error, Result, ResultExt};
pub use form::{FormField, FormIssue, FormState, ValidForm, MIN_SUMMARY_CHARS};
pub use mock::mock_grants;
pub use templates::{fallback_grants, TEMPLATE_LIMIT};
pub use types::{Deadline, FocusArea, GrantMatch, OrganizationType};
