use reqwest::{Client, StatusCode};
use serde_json::{Map, Value};

use crate::{
    config::{render_url, ProbeStrategy, ProviderConfig},
    core::{email::EmailAddress, error::LookupError, types::PlatformResult},
    modules::recon::enrich::enrich,
};

/// Probe one registered platform using the email's local-part as username.
///
/// Never fails: errors, timeouts and non-success responses all resolve to
/// an absent result for the platform.
pub async fn check_provider(
    client: &Client,
    provider: &ProviderConfig,
    email: &EmailAddress,
) -> PlatformResult {
    let username = email.local_part();
    let outcome = match provider.strategy {
        ProbeStrategy::Existence => {
            let url = render_url(&provider.profile_url, username, email.as_str());
            check_existence(client, &url)
                .await
                .map(|found| found.then(Map::new))
        }
        ProbeStrategy::Enrichment => check_enrichment(client, provider, email).await,
    };

    match outcome {
        Ok(Some(extra)) => {
            tracing::debug!("provider {} hit for {}", provider.name, username);
            let profile_url = render_url(&provider.profile_url, username, email.as_str());
            PlatformResult::found(provider.name.clone(), profile_url, username, extra)
        }
        Ok(None) => PlatformResult::absent(provider.name.clone()),
        Err(err) => {
            tracing::debug!("provider {} error: {}", provider.name, err);
            PlatformResult::absent(provider.name.clone())
        }
    }
}

async fn check_existence(client: &Client, url: &str) -> Result<bool, LookupError> {
    let status = client.head(url).send().await?.status();
    Ok(status == StatusCode::OK)
}

async fn check_enrichment(
    client: &Client,
    provider: &ProviderConfig,
    email: &EmailAddress,
) -> Result<Option<Map<String, Value>>, LookupError> {
    let template = provider.api_url.as_deref().ok_or_else(|| {
        LookupError::Config(format!("provider {} has no api_url", provider.name))
    })?;
    let url = render_url(template, email.local_part(), email.as_str());
    let resp = client.get(url).send().await?;
    if !resp.status().is_success() {
        return Ok(None);
    }
    let body: Value = resp.json().await?;
    Ok(enrich(provider.enricher, &body))
}
