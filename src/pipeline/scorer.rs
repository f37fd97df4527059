use crate::core::types::{Findings, RiskAssessment, RiskTier};

const BASE_SCORE: i64 = 50;
const IDENTITY_BONUS: i64 = 20;
const PER_PLATFORM: i64 = 5;
const PLATFORM_CAP: i64 = 25;
const PER_BREACH: i64 = 15;

pub fn score_findings(findings: &Findings) -> RiskAssessment {
    score(
        findings.identity.exists,
        findings.platforms_found(),
        findings.breaches.len(),
    )
}

/// Reputation score in `0..=100`; higher means lower risk.
pub fn score(identity_exists: bool, platforms_found: usize, breaches: usize) -> RiskAssessment {
    let platforms = i64::try_from(platforms_found).unwrap_or(i64::MAX);
    let breaches = i64::try_from(breaches).unwrap_or(i64::MAX);

    let mut raw = BASE_SCORE;
    if identity_exists {
        raw += IDENTITY_BONUS;
    }
    raw += platforms.saturating_mul(PER_PLATFORM).min(PLATFORM_CAP);
    raw = raw.saturating_sub(breaches.saturating_mul(PER_BREACH));

    let score = raw.clamp(0, 100) as u8;
    RiskAssessment {
        score,
        tier: tier_for(score),
    }
}

pub fn tier_for(score: u8) -> RiskTier {
    match score {
        80.. => RiskTier::Low,
        60..=79 => RiskTier::Medium,
        30..=59 => RiskTier::High,
        _ => RiskTier::Critical,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_evidence_tops_out_at_ninety_five() {
        // 50 + 20 + 25; the platform cap keeps it below the clamp
        assert_eq!(score(true, 5, 0).score, 95);
        assert_eq!(score(true, 9, 0).score, 95);
        assert_eq!(score(true, 5, 0).tier, RiskTier::Low);
    }

    #[test]
    fn heavy_breaches_floor_at_zero() {
        let risk = score(false, 0, 10);
        assert_eq!(risk.score, 0);
        assert_eq!(risk.tier, RiskTier::Critical);
        assert_eq!(score(true, 5, usize::MAX).score, 0);
    }

    #[test]
    fn no_evidence_is_high_risk() {
        assert_eq!(
            score(false, 0, 0),
            RiskAssessment {
                score: 50,
                tier: RiskTier::High
            }
        );
    }

    #[test]
    fn platform_bonus_is_capped() {
        assert_eq!(score(false, 3, 0).score, 65);
        assert_eq!(score(false, 5, 0).score, 75);
        assert_eq!(score(false, 6, 0).score, 75);
        assert_eq!(score(true, 2, 1).score, 65);
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(tier_for(100), RiskTier::Low);
        assert_eq!(tier_for(80), RiskTier::Low);
        assert_eq!(tier_for(79), RiskTier::Medium);
        assert_eq!(tier_for(60), RiskTier::Medium);
        assert_eq!(tier_for(59), RiskTier::High);
        assert_eq!(tier_for(30), RiskTier::High);
        assert_eq!(tier_for(29), RiskTier::Critical);
        assert_eq!(tier_for(0), RiskTier::Critical);
    }

    #[test]
    fn identical_inputs_identical_output() {
        for identity in [false, true] {
            for platforms in 0..8 {
                for breaches in 0..6 {
                    assert_eq!(
                        score(identity, platforms, breaches),
                        score(identity, platforms, breaches)
                    );
                }
            }
        }
    }
}
