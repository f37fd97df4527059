#![allow(dead_code)]

use falcon_lookup::config::{
    AppConfig, BreachEndpoints, Enricher, IdentityEndpoints, ProbeStrategy, ProviderConfig,
};

pub const EMAIL: &str = "tester@example.com";

pub fn existence(name: &str, base: &str) -> ProviderConfig {
    ProviderConfig {
        name: name.to_string(),
        enabled: true,
        strategy: ProbeStrategy::Existence,
        profile_url: format!("{}/{}/{{username}}", base, name.to_lowercase()),
        api_url: None,
        enricher: Enricher::None,
    }
}

pub fn enrichment(name: &str, base: &str, enricher: Enricher) -> ProviderConfig {
    ProviderConfig {
        name: name.to_string(),
        enabled: true,
        strategy: ProbeStrategy::Enrichment,
        profile_url: format!("{}/{}/{{username}}", base, name.to_lowercase()),
        api_url: Some(format!("{}/api/{}/{{username}}", base, name.to_lowercase())),
        enricher,
    }
}

/// Every endpoint points at `base`; paths are distinct per source.
pub fn config_with(base: &str, timeout_ms: u64, providers: Vec<ProviderConfig>) -> AppConfig {
    AppConfig {
        timeout_ms,
        user_agent: "falcon-test".to_string(),
        max_redirects: 2,
        providers,
        identity: IdentityEndpoints {
            profile_api_url: format!("{base}/id/profile/{{email}}"),
            signin_url: format!("{base}/id/signin"),
            calendar_url: format!("{base}/id/calendar?src={{email}}"),
            legacy_profile_url: format!("{base}/id/legacy/+{{username}}"),
        },
        breach: BreachEndpoints {
            primary_url: format!("{base}/breach/{{email}}"),
            fallback_url: format!("{base}/leak?check={{email}}"),
        },
    }
}

/// Alpha (existence), Beta (GitHub-style enrichment), Gamma (existence).
pub fn three_platform_config(base: &str, timeout_ms: u64) -> AppConfig {
    config_with(
        base,
        timeout_ms,
        vec![
            existence("Alpha", base),
            enrichment("Beta", base, Enricher::Github),
            existence("Gamma", base),
        ],
    )
}

/// Nothing listens on port 1; every probe gets a connection error.
pub fn unreachable_config() -> AppConfig {
    three_platform_config("http://127.0.0.1:1", 2_000)
}
