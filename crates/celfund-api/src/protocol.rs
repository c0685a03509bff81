//! Wire schema for the matching and checkout endpoints
//!
//! Responses are decoded into private `Wire*` structs and then validated into
//! domain types. Unknown fields are ignored; missing or malformed required
//! fields reject the whole payload so the caller can fall back cleanly.

use std::collections::BTreeSet;

use celfund_core::prelude::*;
use celfund_core::{Deadline, FocusArea, GrantMatch, OrganizationType, ValidForm};
use serde::{Deserialize, Serialize};
use url::Url;

/// Body of `POST /api/match`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchRequest {
    pub project_summary: String,
    pub organization_type: OrganizationType,
    pub focus_area: FocusArea,
    pub email: String,
}

impl From<&ValidForm> for MatchRequest {
    fn from(form: &ValidForm) -> Self {
        Self {
            project_summary: form.project_summary.clone(),
            organization_type: form.organization_type,
            focus_area: form.focus_area,
            email: form.email.clone(),
        }
    }
}

/// Validated result of a match call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    /// Grants in the order the backend ranked them (may be empty)
    pub grants: Vec<GrantMatch>,
    pub submission_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireMatchResponse {
    success: bool,
    #[serde(default)]
    grants: Option<Vec<WireGrant>>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    submission_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireGrant {
    #[serde(default)]
    id: Option<u32>,
    title: String,
    funder: String,
    description: String,
    deadline: String,
    amount: String,
    #[serde(default)]
    url: Option<String>,
}

/// Body of `POST /api/create-checkout-session`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
struct WireCheckoutResponse {
    success: bool,
    #[serde(default)]
    checkout_url: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Decode and validate a `/api/match` response body
pub fn parse_match_response(body: &str) -> Result<MatchOutcome> {
    let wire: WireMatchResponse = serde_json::from_str(body)
        .map_err(|e| Error::protocol(format!("match response: {}", e)))?;

    if !wire.success {
        return Err(Error::rejected(
            wire.error.unwrap_or_else(|| "match unsuccessful".to_string()),
        ));
    }

    let wire_grants = wire
        .grants
        .ok_or_else(|| Error::protocol("match response has no grants field"))?;
    let ids = assign_ids(&wire_grants)?;
    let grants = wire_grants
        .into_iter()
        .zip(ids)
        .enumerate()
        .map(|(index, (grant, id))| validate_grant(index, id, grant))
        .collect::<Result<Vec<_>>>()?;

    Ok(MatchOutcome {
        grants,
        submission_id: wire.submission_id,
    })
}

/// One unique id per grant.
///
/// Backend ids are kept and must not repeat. A grant without one takes its
/// 1-based position, or the next value above it no other grant uses.
fn assign_ids(grants: &[WireGrant]) -> Result<Vec<u32>> {
    let mut used = BTreeSet::new();
    for id in grants.iter().filter_map(|g| g.id) {
        if !used.insert(id) {
            return Err(Error::protocol(format!("duplicate grant id {}", id)));
        }
    }

    let mut ids = Vec::with_capacity(grants.len());
    for (index, grant) in grants.iter().enumerate() {
        let id = match grant.id {
            Some(id) => id,
            None => {
                let mut candidate = index as u32 + 1;
                while used.contains(&candidate) {
                    candidate += 1;
                }
                used.insert(candidate);
                candidate
            }
        };
        ids.push(id);
    }
    Ok(ids)
}

fn validate_grant(index: usize, id: u32, wire: WireGrant) -> Result<GrantMatch> {
    if wire.title.trim().is_empty() {
        return Err(Error::protocol(format!("grant #{} has a blank title", index)));
    }
    if wire.funder.trim().is_empty() {
        return Err(Error::protocol(format!("grant #{} has a blank funder", index)));
    }

    let deadline: Deadline = wire
        .deadline
        .parse()
        .map_err(|e| Error::protocol(format!("grant #{}: {}", index, e)))?;

    let url = wire.url.filter(|u| !u.trim().is_empty());

    Ok(GrantMatch {
        id,
        title: wire.title,
        funder: wire.funder,
        description: wire.description,
        deadline,
        amount: wire.amount,
        url,
    })
}

/// Decode and validate a `/api/create-checkout-session` response body.
///
/// The redirect target must be an absolute `http` or `https` URL.
pub fn parse_checkout_response(body: &str) -> Result<Url> {
    let wire: WireCheckoutResponse = serde_json::from_str(body)
        .map_err(|e| Error::protocol(format!("checkout response: {}", e)))?;

    if !wire.success {
        return Err(Error::rejected(
            wire.error
                .unwrap_or_else(|| "checkout session not created".to_string()),
        ));
    }

    let raw = wire
        .checkout_url
        .ok_or_else(|| Error::protocol("checkout response has no checkout_url"))?;

    let url = Url::parse(&raw)
        .map_err(|e| Error::protocol(format!("invalid checkout_url {:?}: {}", raw, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::protocol(format!(
            "checkout_url has unsupported scheme {:?}",
            other
        ))),
    }
}
