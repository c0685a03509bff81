//! Interaction-gated upgrade prompt
//!
//! [`InteractionCounter`] counts qualifying card interactions for the
//! lifetime of the page and reports the single moment it reaches its
//! threshold. [`UpgradeModalState`] is the Hidden / Idle / Loading machine
//! behind the upgrade modal.

use crate::state::RequestId;

/// Monotonic count of result-card interactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionCounter {
    count: u32,
    threshold: u32,
}

impl InteractionCounter {
    pub fn new(threshold: u32) -> Self {
        Self {
            count: 0,
            threshold: threshold.max(1),
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Record one interaction.
    ///
    /// Returns `true` only for the interaction that moves the count from
    /// below the threshold to the threshold. The count never decreases, so
    /// this happens at most once per counter.
    pub fn record(&mut self) -> bool {
        let before = self.count;
        self.count = self.count.saturating_add(1);
        before < self.threshold && self.count >= self.threshold
    }
}

/// Visibility and checkout progress of the upgrade modal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpgradePhase {
    #[default]
    Hidden,
    /// Visible, waiting for the user
    Idle,
    /// Visible, checkout session request in flight
    Loading { request_id: RequestId },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpgradeModalState {
    phase: UpgradePhase,
    /// Email the checkout session is created for
    email: String,
}

impl UpgradeModalState {
    pub fn phase(&self) -> UpgradePhase {
        self.phase
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn is_visible(&self) -> bool {
        !matches!(self.phase, UpgradePhase::Hidden)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, UpgradePhase::Loading { .. })
    }

    /// Hidden -> Idle. Returns `false` if the modal was already visible.
    pub fn open(&mut self, email: impl Into<String>) -> bool {
        if self.is_visible() {
            return false;
        }
        self.email = email.into();
        self.phase = UpgradePhase::Idle;
        true
    }

    /// Idle -> Hidden. Ignored while a checkout request is in flight.
    pub fn dismiss(&mut self) -> bool {
        if self.phase != UpgradePhase::Idle {
            return false;
        }
        self.phase = UpgradePhase::Hidden;
        true
    }

    /// Idle -> Loading
    pub fn begin_checkout(&mut self, request_id: RequestId) -> bool {
        if self.phase != UpgradePhase::Idle {
            return false;
        }
        self.phase = UpgradePhase::Loading { request_id };
        true
    }

    /// Whether `request_id` is the checkout currently in flight
    pub fn is_pending(&self, request_id: RequestId) -> bool {
        self.phase == UpgradePhase::Loading { request_id }
    }

    /// Loading -> Idle for the matching request
    pub fn checkout_failed(&mut self, request_id: RequestId) -> bool {
        if !self.is_pending(request_id) {
            return false;
        }
        self.phase = UpgradePhase::Idle;
        true
    }

    /// Loading -> Hidden once the browser has been sent to checkout
    pub fn redirected(&mut self, request_id: RequestId) -> bool {
        if !self.is_pending(request_id) {
            return false;
        }
        self.phase = UpgradePhase::Hidden;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_crosses_threshold_once() {
        let mut counter = InteractionCounter::new(2);
        assert!(!counter.record());
        assert!(counter.record());
        assert!(!counter.record());
        assert!(!counter.record());
        assert_eq!(counter.count(), 4);
    }

    #[test]
    fn test_counter_threshold_one() {
        let mut counter = InteractionCounter::new(1);
        assert!(counter.record());
        assert!(!counter.record());
    }

    #[test]
    fn test_counter_zero_threshold_is_clamped() {
        let mut counter = InteractionCounter::new(0);
        assert_eq!(counter.threshold(), 1);
        assert!(counter.record());
    }

    #[test]
    fn test_modal_happy_path() {
        let mut modal = UpgradeModalState::default();
        assert!(!modal.is_visible());

        assert!(modal.open("a@b.com"));
        assert_eq!(modal.phase(), UpgradePhase::Idle);
        assert_eq!(modal.email(), "a@b.com");

        let id = RequestId::new(7);
        assert!(modal.begin_checkout(id));
        assert!(modal.is_loading());

        assert!(modal.redirected(id));
        assert_eq!(modal.phase(), UpgradePhase::Hidden);
    }

    #[test]
    fn test_modal_failure_returns_to_idle() {
        let mut modal = UpgradeModalState::default();
        modal.open("a@b.com");
        let id = RequestId::new(1);
        modal.begin_checkout(id);

        assert!(modal.checkout_failed(id));
        assert_eq!(modal.phase(), UpgradePhase::Idle);
        assert!(modal.is_visible());
    }

    #[test]
    fn test_modal_ignores_stale_requests() {
        let mut modal = UpgradeModalState::default();
        modal.open("a@b.com");
        modal.begin_checkout(RequestId::new(2));

        assert!(!modal.checkout_failed(RequestId::new(1)));
        assert!(!modal.redirected(RequestId::new(1)));
        assert!(modal.is_loading());
    }

    #[test]
    fn test_modal_dismiss_only_from_idle() {
        let mut modal = UpgradeModalState::default();
        assert!(!modal.dismiss());

        modal.open("a@b.com");
        modal.begin_checkout(RequestId::new(1));
        assert!(!modal.dismiss());

        modal.checkout_failed(RequestId::new(1));
        assert!(modal.dismiss());
        assert!(!modal.is_visible());
    }

    #[test]
    fn test_open_when_visible_is_noop() {
        let mut modal = UpgradeModalState::default();
        assert!(modal.open("first@b.com"));
        assert!(!modal.open("second@b.com"));
        assert_eq!(modal.email(), "first@b.com");
    }
}
