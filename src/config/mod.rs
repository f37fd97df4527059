use std::{fs, path::Path};

use serde::Deserialize;

use crate::core::error::LookupError;

pub const DEFAULT_CONFIG_PATH: &str = "config/falcon-lookup.toml";

/// How a platform is probed.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProbeStrategy {
    /// `HEAD` the profile page; status alone decides.
    Existence,
    /// `GET` a structured API; a parseable body confirms and enriches.
    Enrichment,
}

/// Which response adapter turns an enrichment body into `extra` fields.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Enricher {
    Github,
    Reddit,
    Twitch,
    #[default]
    None,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    pub name: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub strategy: ProbeStrategy,
    /// Public profile URL template; `{username}` is substituted.
    pub profile_url: String,
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub enricher: Enricher,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdentityEndpoints {
    pub profile_api_url: String,
    pub signin_url: String,
    pub calendar_url: String,
    pub legacy_profile_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BreachEndpoints {
    pub primary_url: String,
    pub fallback_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub timeout_ms: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
    pub providers: Vec<ProviderConfig>,
    pub identity: IdentityEndpoints,
    pub breach: BreachEndpoints,
}

impl AppConfig {
    /// Enabled providers in report order.
    pub fn registry(&self) -> impl Iterator<Item = &ProviderConfig> {
        self.providers.iter().filter(|p| p.enabled)
    }

    pub fn validate(&self) -> Result<(), LookupError> {
        if self.timeout_ms == 0 {
            return Err(LookupError::Config("timeout_ms must be positive".into()));
        }
        for p in &self.providers {
            if p.name.trim().is_empty() {
                return Err(LookupError::Config("provider with empty name".into()));
            }
            if p.strategy == ProbeStrategy::Enrichment && p.api_url.is_none() {
                return Err(LookupError::Config(format!(
                    "provider {} uses enrichment but has no api_url",
                    p.name
                )));
            }
        }
        Ok(())
    }
}

pub fn load_config(path: Option<&str>) -> Result<AppConfig, LookupError> {
    let default_path = Path::new(DEFAULT_CONFIG_PATH);
    let path = path.map(Path::new).unwrap_or(default_path);

    if !path.exists() {
        tracing::debug!("no config at {}, using built-in registry", path.display());
        return Ok(default_config());
    }

    let content = fs::read_to_string(path).map_err(|e| LookupError::Config(e.to_string()))?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<AppConfig, LookupError> {
    let cfg: AppConfig =
        toml::from_str(content).map_err(|e| LookupError::Config(e.to_string()))?;
    cfg.validate()?;
    Ok(cfg)
}

pub fn apply_provider_filter(cfg: AppConfig, names: Option<&[String]>) -> AppConfig {
    if let Some(list) = names {
        let mut cfg = cfg;
        let lowered: Vec<String> = list.iter().map(|s| s.to_lowercase()).collect();
        for p in cfg.providers.iter_mut() {
            p.enabled = lowered.iter().any(|n| n == &p.name.to_lowercase());
        }
        return cfg;
    }
    cfg
}

fn default_true() -> bool {
    true
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string()
}

fn default_max_redirects() -> usize {
    4
}

fn existence(name: &str, profile_url: &str) -> ProviderConfig {
    ProviderConfig {
        name: name.to_string(),
        enabled: true,
        strategy: ProbeStrategy::Existence,
        profile_url: profile_url.to_string(),
        api_url: None,
        enricher: Enricher::None,
    }
}

fn enrichment(name: &str, profile_url: &str, api_url: &str, enricher: Enricher) -> ProviderConfig {
    ProviderConfig {
        name: name.to_string(),
        enabled: true,
        strategy: ProbeStrategy::Enrichment,
        profile_url: profile_url.to_string(),
        api_url: Some(api_url.to_string()),
        enricher,
    }
}

pub fn default_config() -> AppConfig {
    AppConfig {
        timeout_ms: 8_000,
        user_agent: default_user_agent(),
        max_redirects: default_max_redirects(),
        providers: vec![
            enrichment(
                "GitHub",
                "https://github.com/{username}",
                "https://api.github.com/users/{username}",
                Enricher::Github,
            ),
            existence("Twitter", "https://twitter.com/{username}"),
            existence("Instagram", "https://instagram.com/{username}"),
            existence("LinkedIn", "https://linkedin.com/in/{username}"),
            enrichment(
                "Reddit",
                "https://reddit.com/user/{username}",
                "https://www.reddit.com/user/{username}/about.json",
                Enricher::Reddit,
            ),
            existence("YouTube", "https://youtube.com/@{username}"),
            existence("TikTok", "https://tiktok.com/@{username}"),
            existence("Pinterest", "https://pinterest.com/{username}"),
            enrichment(
                "Twitch",
                "https://twitch.tv/{username}",
                "https://api.twitch.tv/helix/users?login={username}",
                Enricher::Twitch,
            ),
            existence("Steam", "https://steamcommunity.com/id/{username}"),
        ],
        identity: IdentityEndpoints {
            profile_api_url: "https://picasaweb.google.com/data/entry/api/user/{email}?alt=json"
                .to_string(),
            signin_url: "https://accounts.google.com/_/signin/sl/lookup".to_string(),
            calendar_url: "https://calendar.google.com/calendar/embed?src={email}".to_string(),
            legacy_profile_url: "https://plus.google.com/+{username}".to_string(),
        },
        breach: BreachEndpoints {
            primary_url: "https://api.xposedornot.com/v1/check-email/{email}".to_string(),
            fallback_url: "https://leakcheck.io/api/public?check={email}".to_string(),
        },
    }
}

/// Substitute `{username}` and `{email}`, URL-encoding both.
pub fn render_url(template: &str, username: &str, email: &str) -> String {
    template
        .replace("{username}", &urlencoding::encode(username))
        .replace("{email}", &urlencoding::encode(email))
}
