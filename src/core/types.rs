use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// How much an identity hit can be trusted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Structured profile data came back from the provider.
    Verified,
    /// Only a weak signal fired; the display name is derived from the local-part.
    Heuristic,
}

/// Independent identity-provider surfaces probed for one email.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IdentitySignal {
    ProfileApi,
    SignIn,
    Calendar,
    LegacyProfile,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdentityResult {
    pub exists: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_activity: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
    #[serde(default)]
    pub corroborated_by: Vec<IdentitySignal>,
}

impl IdentityResult {
    pub fn absent() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlatformResult {
    pub platform_name: String,
    pub exists: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default)]
    pub extra: Map<String, Value>,
}

impl PlatformResult {
    pub fn absent(platform_name: impl Into<String>) -> Self {
        Self {
            platform_name: platform_name.into(),
            exists: false,
            profile_url: None,
            username: None,
            extra: Map::new(),
        }
    }

    pub fn found(
        platform_name: impl Into<String>,
        profile_url: String,
        username: &str,
        extra: Map<String, Value>,
    ) -> Self {
        Self {
            platform_name: platform_name.into(),
            exists: true,
            profile_url: Some(profile_url),
            username: Some(username.to_string()),
            extra,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BreachRecord {
    pub name: String,
    pub domain: String,
    pub breach_date: NaiveDate,
    pub discovered_date: NaiveDate,
    pub affected_count: u64,
    pub description: String,
    pub data_classes: Vec<String>,
    pub verified: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskTier {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RiskAssessment {
    pub score: u8,
    pub tier: RiskTier,
}

/// Unscored probe output for one email.
#[derive(Debug, Clone)]
pub struct Findings {
    pub identity: IdentityResult,
    pub platforms: Vec<PlatformResult>,
    pub breaches: Vec<BreachRecord>,
}

impl Findings {
    pub fn platforms_found(&self) -> usize {
        self.platforms.iter().filter(|p| p.exists).count()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<IdentityResult>,
    pub platforms: Vec<PlatformResult>,
    pub breaches: Vec<BreachRecord>,
    pub reputation_score: u8,
    pub risk_tier: RiskTier,
}

impl Report {
    pub fn assemble(email: impl Into<String>, findings: Findings, risk: RiskAssessment) -> Self {
        Self {
            email: email.into(),
            identity: Some(findings.identity),
            platforms: findings.platforms,
            breaches: findings.breaches,
            reputation_score: risk.score,
            risk_tier: risk.tier,
        }
    }
}
