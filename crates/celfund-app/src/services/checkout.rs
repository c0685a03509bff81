//! Checkout session strategies

use celfund_api::ApiClient;
use celfund_core::prelude::*;
use url::Url;

use super::CheckoutService;

/// Calls `POST /api/create-checkout-session`
#[derive(Debug, Clone)]
pub struct LiveCheckout {
    client: ApiClient,
}

impl LiveCheckout {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

impl CheckoutService for LiveCheckout {
    async fn create_session(&self, email: &str) -> Result<Url> {
        self.client.create_checkout_session(email).await
    }
}

/// Returns `<base_url>/checkout?test=true` without calling anything
#[derive(Debug, Clone)]
pub struct MockCheckout {
    base_url: Url,
}

impl MockCheckout {
    pub fn new(base_url: Url) -> Self {
        Self { base_url }
    }
}

impl CheckoutService for MockCheckout {
    async fn create_session(&self, email: &str) -> Result<Url> {
        debug!("Mock checkout session for {}", email);
        let mut url = self
            .base_url
            .join("checkout")
            .map_err(|e| Error::protocol(format!("invalid mock checkout url: {}", e)))?;
        url.set_query(Some("test=true"));
        Ok(url)
    }
}

/// Checkout service selected by `[matching] strategy`
#[derive(Debug, Clone)]
pub enum CheckoutStrategy {
    Live(LiveCheckout),
    Mock(MockCheckout),
}

impl CheckoutService for CheckoutStrategy {
    async fn create_session(&self, email: &str) -> Result<Url> {
        match self {
            CheckoutStrategy::Live(service) => service.create_session(email).await,
            CheckoutStrategy::Mock(service) => service.create_session(email).await,
        }
    }
}
