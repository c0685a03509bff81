//! # celfund-api - Backend client
//!
//! Typed access to the CelFund backend: the funnel endpoints (`/api/match`,
//! `/api/create-checkout-session`) with strict payload validation, and the
//! scraping-pipeline endpoints used by the dashboard.

pub mod client;
pub mod protocol;
pub mod scraping;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

pub use client::{ApiClient, DEFAULT_TIMEOUT};
pub use protocol::{
    parse_checkout_response, parse_match_response, CheckoutRequest, MatchOutcome, MatchRequest,
};
pub use scraping::{
    progress_percent, CommandResponse, DailyCount, DuplicatesRemoved, RecentSession,
    SchedulerAction, ScrapingProgress, ScrapingStats, ScrapingStatus, SessionAnalytics,
    StartSessionRequest, SystemStatus, MILESTONE_GRANTS, TARGET_GRANTS,
};
