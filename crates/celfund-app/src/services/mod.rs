//! Service layer: everything the engine calls outside the process
//!
//! - `GrantSource` / `CheckoutService`: the two funnel strategies (live
//!   backend or local mock), selected by `[matching] strategy`
//! - `FunnelServices`: the single seam the engine is generic over; tests
//!   substitute their own implementation
//! - [`StrategyServices`]: the production implementation

pub mod checkout;
pub mod matching;

use celfund_api::{ApiClient, ScrapingStats, ScrapingStatus, StartSessionRequest};
use celfund_core::prelude::*;
use celfund_core::{GrantMatch, ValidForm};
use url::Url;

use crate::config::{Settings, StrategyKind};
use crate::dashboard_state::DashboardCommand;
use crate::navigator::Navigator;

pub use checkout::{CheckoutStrategy, LiveCheckout, MockCheckout};
pub use matching::{LiveGrantSource, MatchStrategy, MockGrantSource};

/// Produces grant matches for a validated form
#[trait_variant::make(GrantSource: Send)]
pub trait LocalGrantSource {
    /// Grants ranked for the form. An empty list is a valid answer.
    async fn find_matches(&self, form: &ValidForm) -> Result<Vec<GrantMatch>>;
}

/// Creates a checkout session and returns where to send the browser
#[trait_variant::make(CheckoutService: Send)]
pub trait LocalCheckoutService {
    async fn create_session(&self, email: &str) -> Result<Url>;
}

/// Everything the engine's background tasks need
#[trait_variant::make(FunnelServices: Send)]
pub trait LocalFunnelServices {
    async fn find_matches(&self, form: &ValidForm) -> Result<Vec<GrantMatch>>;

    async fn create_checkout_session(&self, email: &str) -> Result<Url>;

    async fn scraping_status(&self) -> Result<ScrapingStatus>;

    async fn scraping_stats(&self, days: u32) -> Result<ScrapingStats>;

    /// Run a dashboard command, returning a one-line summary of the outcome
    async fn run_dashboard_command(&self, command: DashboardCommand) -> Result<String>;

    /// Open `url` outside the application
    fn navigate(&self, url: &Url) -> Result<()>;
}

/// Production services: strategies from settings plus the live API client
pub struct StrategyServices {
    matching: MatchStrategy,
    checkout: CheckoutStrategy,
    client: ApiClient,
    navigator: Box<dyn Navigator>,
}

impl StrategyServices {
    /// Build the strategies named in `settings`
    pub fn from_settings(settings: &Settings, navigator: Box<dyn Navigator>) -> Result<Self> {
        let client = ApiClient::new(&settings.api.base_url, settings.api.request_timeout())?;

        let (matching, checkout) = match settings.matching.strategy {
            StrategyKind::Live => (
                MatchStrategy::Live(LiveGrantSource::new(client.clone())),
                CheckoutStrategy::Live(LiveCheckout::new(client.clone())),
            ),
            StrategyKind::Mock => (
                MatchStrategy::Mock(MockGrantSource::new(settings.matching.mock_delay())),
                CheckoutStrategy::Mock(MockCheckout::new(client.base_url().clone())),
            ),
        };

        info!(
            "Using {} strategy against {}",
            settings.matching.strategy,
            client.base_url()
        );

        Ok(Self {
            matching,
            checkout,
            client,
            navigator,
        })
    }
}

impl FunnelServices for StrategyServices {
    async fn find_matches(&self, form: &ValidForm) -> Result<Vec<GrantMatch>> {
        GrantSource::find_matches(&self.matching, form).await
    }

    async fn create_checkout_session(&self, email: &str) -> Result<Url> {
        CheckoutService::create_session(&self.checkout, email).await
    }

    async fn scraping_status(&self) -> Result<ScrapingStatus> {
        self.client.scraping_status().await
    }

    async fn scraping_stats(&self, days: u32) -> Result<ScrapingStats> {
        self.client.scraping_stats(days).await
    }

    async fn run_dashboard_command(&self, command: DashboardCommand) -> Result<String> {
        match command {
            DashboardCommand::StartSession { grants_limit } => self
                .client
                .start_session(&StartSessionRequest::new(grants_limit))
                .await
                .map(|ack| ack.summary()),
            DashboardCommand::StopSession => {
                self.client.stop_session().await.map(|ack| ack.summary())
            }
            DashboardCommand::Scheduler(action) => self
                .client
                .control_scheduler(action)
                .await
                .map(|ack| ack.summary()),
            DashboardCommand::RemoveDuplicates => {
                let removed = self.client.remove_duplicates().await?;
                Ok(format!(
                    "Removed {} duplicate grants ({} groups)",
                    removed.removed_count, removed.duplicate_groups_found
                ))
            }
        }
    }

    fn navigate(&self, url: &Url) -> Result<()> {
        self.navigator.navigate(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigator::RecordingNavigator;
    use celfund_api::test_utils::{CannedResponse, MockServer};
    use celfund_core::{FocusArea, OrganizationType};

    fn settings(base_url: &str, strategy: StrategyKind) -> Settings {
        let mut settings = Settings::default();
        settings.api.base_url = base_url.to_string();
        settings.matching.strategy = strategy;
        settings.matching.mock_delay_ms = 0;
        settings
    }

    fn form() -> ValidForm {
        ValidForm {
            project_summary: "Community gardens for food security".into(),
            organization_type: OrganizationType::Nonprofit,
            focus_area: FocusArea::Community,
            email: "a@b.com".into(),
        }
    }

    #[tokio::test]
    async fn test_mock_strategy_uses_catalogue_and_test_checkout() {
        let services = StrategyServices::from_settings(
            &settings("http://localhost:8000", StrategyKind::Mock),
            Box::new(RecordingNavigator::new()),
        )
        .unwrap();

        let grants = FunnelServices::find_matches(&services, &form()).await.unwrap();
        assert_eq!(grants.len(), 10);

        let url = FunnelServices::create_checkout_session(&services, "a@b.com")
            .await
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/checkout?test=true");
    }

    #[tokio::test]
    async fn test_invalid_base_url_is_config_error() {
        let result = StrategyServices::from_settings(
            &settings("::nope::", StrategyKind::Live),
            Box::new(RecordingNavigator::new()),
        );
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[tokio::test]
    async fn test_remove_duplicates_summary() {
        let server = MockServer::start(vec![CannedResponse::ok(
            r#"{"status":"duplicates_removed","removed_count":4,"duplicate_groups_found":3}"#,
        )])
        .await;
        let services = StrategyServices::from_settings(
            &settings(&server.base_url(), StrategyKind::Live),
            Box::new(RecordingNavigator::new()),
        )
        .unwrap();

        let summary = FunnelServices::run_dashboard_command(&services, DashboardCommand::RemoveDuplicates)
            .await
            .unwrap();
        assert_eq!(summary, "Removed 4 duplicate grants (3 groups)");
    }

    #[tokio::test]
    async fn test_navigate_delegates_to_navigator() {
        let navigator = RecordingNavigator::new();
        let services = StrategyServices::from_settings(
            &settings("http://localhost:8000", StrategyKind::Mock),
            Box::new(navigator.clone()),
        )
        .unwrap();

        let url = Url::parse("https://www.grants.gov/").unwrap();
        FunnelServices::navigate(&services, &url).unwrap();
        assert_eq!(navigator.visited(), vec![url]);
    }
}
