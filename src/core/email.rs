use std::{fmt, sync::OnceLock};

use regex::Regex;

use crate::core::error::LookupError;

fn email_shape() -> &'static Regex {
    static SHAPE: OnceLock<Regex> = OnceLock::new();
    SHAPE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static email regex"))
}

/// An email address that passed the conservative shape check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress {
    raw: String,
    at: usize,
}

impl EmailAddress {
    pub fn parse(raw: &str) -> Result<Self, LookupError> {
        if raw.is_empty() {
            return Err(LookupError::Validation(
                "Email parameter is required".to_string(),
            ));
        }
        if !email_shape().is_match(raw) {
            return Err(LookupError::Validation("Invalid email format".to_string()));
        }
        let at = raw
            .find('@')
            .ok_or_else(|| LookupError::Validation("Invalid email format".to_string()))?;
        Ok(Self {
            raw: raw.to_string(),
            at,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Local-part, used as the candidate username on every platform.
    pub fn local_part(&self) -> &str {
        &self.raw[..self.at]
    }

    pub fn domain(&self) -> &str {
        &self.raw[self.at + 1..]
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        let email = EmailAddress::parse("jane.doe+osint@mail.example.org").unwrap();
        assert_eq!(email.local_part(), "jane.doe+osint");
        assert_eq!(email.domain(), "mail.example.org");
        assert_eq!(email.to_string(), "jane.doe+osint@mail.example.org");
    }

    #[test]
    fn rejects_malformed_addresses() {
        for bad in [
            "plainaddress",
            "missing-dot@domain",
            "@example.com",
            "user@.",
            "two@@example.com",
            "spaces in@example.com",
            "user@exa mple.com",
        ] {
            let err = EmailAddress::parse(bad).unwrap_err();
            assert!(err.is_validation(), "{bad} should be rejected");
            assert_eq!(err.to_string(), "Invalid email format");
        }
    }

    #[test]
    fn empty_input_reports_missing_parameter() {
        let err = EmailAddress::parse("").unwrap_err();
        assert_eq!(err.to_string(), "Email parameter is required");
    }
}
