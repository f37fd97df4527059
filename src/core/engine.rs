use std::time::{Duration, Instant};

use futures::future::join_all;

use crate::{
    config::AppConfig,
    core::{
        email::EmailAddress,
        error::LookupError,
        types::{Findings, Report},
    },
    modules::recon::{
        breach::check_breaches, identity::check_identity, username::check_provider,
    },
    pipeline::scorer::score_findings,
};

/// Fans one email out to every probe and joins the results.
///
/// Holds only immutable state, so a single engine serves concurrent lookups.
pub struct Engine {
    client: reqwest::Client,
    pub config: AppConfig,
}

impl Engine {
    pub fn new(config: AppConfig) -> Result<Self, LookupError> {
        config.validate()?;
        let timeout = Duration::from_millis(config.timeout_ms);
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()
            .map_err(LookupError::from)?;

        Ok(Self { client, config })
    }

    /// Validate, probe, score.
    pub async fn lookup(&self, raw_email: &str) -> Result<Report, LookupError> {
        let email = EmailAddress::parse(raw_email)?;
        tracing::info!(email = %email, "lookup started");
        let started = Instant::now();

        let findings = self.aggregate(&email).await;
        let risk = score_findings(&findings);

        tracing::info!(
            email = %email,
            identity = findings.identity.exists,
            platforms = findings.platforms_found(),
            breaches = findings.breaches.len(),
            score = risk.score,
            tier = ?risk.tier,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "lookup finished"
        );
        Ok(Report::assemble(email.as_str(), findings, risk))
    }

    /// Run identity, platform and breach probes concurrently and wait for all.
    ///
    /// Probes are polled in place rather than spawned, so dropping the
    /// returned future cancels every outstanding request.
    pub async fn aggregate(&self, email: &EmailAddress) -> Findings {
        let platforms = join_all(
            self.config
                .registry()
                .map(|provider| check_provider(&self.client, provider, email)),
        );

        let (identity, platforms, breaches) = tokio::join!(
            check_identity(&self.client, &self.config.identity, email),
            platforms,
            check_breaches(&self.client, &self.config.breach, email),
        );

        Findings {
            identity,
            platforms,
            breaches,
        }
    }
}
