//! Identity-provider probe.
//!
//! Four surfaces are queried at once and OR-combined: the profile API (the
//! only one carrying structured data), the sign-in lookup, the calendar embed
//! and the legacy profile page.

use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::{
    config::{render_url, IdentityEndpoints},
    core::{
        email::EmailAddress,
        error::LookupError,
        time::parse_timestamp,
        types::{Confidence, IdentityResult, IdentitySignal},
    },
};

/// Structured fields read from the profile API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileFields {
    pub display_name: Option<String>,
    pub profile_picture: Option<String>,
    pub account_id: Option<String>,
    pub last_activity: Option<DateTime<Utc>>,
}

pub async fn check_identity(
    client: &Client,
    endpoints: &IdentityEndpoints,
    email: &EmailAddress,
) -> IdentityResult {
    let username = email.local_part();
    let profile_url = render_url(&endpoints.profile_api_url, username, email.as_str());
    let calendar_url = render_url(&endpoints.calendar_url, username, email.as_str());
    let legacy_url = render_url(&endpoints.legacy_profile_url, username, email.as_str());

    let (profile, signin, calendar, legacy) = tokio::join!(
        fetch_profile(client, &profile_url),
        check_signin(client, &endpoints.signin_url, email),
        check_head(client, &calendar_url),
        check_head(client, &legacy_url),
    );

    let profile = settle(IdentitySignal::ProfileApi, profile);
    let weak = [
        (IdentitySignal::SignIn, settle(IdentitySignal::SignIn, signin).unwrap_or(false)),
        (IdentitySignal::Calendar, settle(IdentitySignal::Calendar, calendar).unwrap_or(false)),
        (
            IdentitySignal::LegacyProfile,
            settle(IdentitySignal::LegacyProfile, legacy).unwrap_or(false),
        ),
    ];
    combine_signals(username, profile, &weak)
}

fn settle<T>(signal: IdentitySignal, result: Result<T, LookupError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::debug!("identity signal {:?} unavailable: {}", signal, err);
            None
        }
    }
}

/// Merge sub-signal outcomes. Profile data wins; otherwise any weak hit
/// yields a heuristic result named after the local-part.
pub fn combine_signals(
    local_part: &str,
    profile: Option<ProfileFields>,
    weak: &[(IdentitySignal, bool)],
) -> IdentityResult {
    let mut corroborated_by = Vec::new();
    if profile.is_some() {
        corroborated_by.push(IdentitySignal::ProfileApi);
    }
    corroborated_by.extend(weak.iter().filter(|(_, hit)| *hit).map(|(signal, _)| *signal));

    match profile {
        Some(fields) => IdentityResult {
            exists: true,
            display_name: fields.display_name,
            profile_picture: fields.profile_picture,
            account_id: fields.account_id,
            last_activity: fields.last_activity,
            confidence: Some(Confidence::Verified),
            corroborated_by,
        },
        None if !corroborated_by.is_empty() => IdentityResult {
            exists: true,
            display_name: Some(local_part.to_string()),
            confidence: Some(Confidence::Heuristic),
            corroborated_by,
            ..IdentityResult::default()
        },
        None => IdentityResult::absent(),
    }
}

pub fn parse_profile(body: &Value) -> ProfileFields {
    let text = |pointer: &str| {
        body.pointer(pointer)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };
    ProfileFields {
        display_name: text("/entry/gphoto$nickname/$t").or_else(|| text("/entry/title/$t")),
        profile_picture: text("/entry/gphoto$thumbnail/$t"),
        account_id: text("/entry/gphoto$user/$t"),
        last_activity: text("/entry/updated/$t").and_then(|s| parse_timestamp(&s)),
    }
}

async fn fetch_profile(client: &Client, url: &str) -> Result<ProfileFields, LookupError> {
    let resp = client.get(url).send().await?;
    if !resp.status().is_success() {
        return Err(LookupError::Http(format!("profile api status {}", resp.status())));
    }
    let body: Value = resp.json().await?;
    Ok(parse_profile(&body))
}

async fn check_signin(
    client: &Client,
    url: &str,
    email: &EmailAddress,
) -> Result<bool, LookupError> {
    let form = [
        ("continue", "https://accounts.google.com/"),
        ("Email", email.as_str()),
        ("Passwd", ""),
        ("signIn", "Sign in"),
        ("PersistentCookie", "yes"),
    ];
    let status = client.post(url).form(&form).send().await?.status();
    Ok(status != StatusCode::NOT_FOUND)
}

async fn check_head(client: &Client, url: &str) -> Result<bool, LookupError> {
    let status = client.head(url).send().await?.status();
    Ok(status.is_success())
}
