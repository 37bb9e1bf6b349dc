//! Admin identity and the allow-list of emails permitted to log in.

use std::collections::HashSet;
use std::fmt;

use ma_shared::config::AdminConfig;
use ma_shared::utils::email::{is_valid_email, mask_email, normalize_email};

use crate::errors::ValidationError;

/// A normalized (trimmed, lower-cased) and syntactically valid email
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AdminEmail(String);

impl AdminEmail {
    /// Normalizes and validates raw input
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let email = normalize_email(raw);
        if email.is_empty() {
            return Err(ValidationError::required("email"));
        }
        if !is_valid_email(&email) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(Self(email))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display form, e.g. `a***n@x.com`
    pub fn masked(&self) -> String {
        mask_email(&self.0)
    }
}

impl fmt::Display for AdminEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AdminEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Fixed set of emails allowed to request codes, loaded once at startup
#[derive(Debug, Clone, Default)]
pub struct AdminAllowList {
    emails: HashSet<String>,
}

impl AdminAllowList {
    pub fn new<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            emails: emails
                .into_iter()
                .map(|e| normalize_email(e.as_ref()))
                .filter(|e| is_valid_email(e))
                .collect(),
        }
    }

    pub fn from_config(config: &AdminConfig) -> Self {
        Self::new(&config.emails)
    }

    pub fn contains(&self, email: &AdminEmail) -> bool {
        self.emails.contains(email.as_str())
    }

    pub fn len(&self) -> usize {
        self.emails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes() {
        let email = AdminEmail::parse("  Admin@X.com ").unwrap();
        assert_eq!(email.as_str(), "admin@x.com");
        assert_eq!(email.masked(), "a***n@x.com");
    }

    #[test]
    fn test_parse_rejects_blank_and_malformed() {
        assert_eq!(
            AdminEmail::parse("   "),
            Err(ValidationError::required("email"))
        );
        assert_eq!(AdminEmail::parse("admin"), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn test_allow_list_membership_is_case_insensitive() {
        let list = AdminAllowList::new(["Admin@X.com", "ops@multiyo.com", ""]);

        assert_eq!(list.len(), 2);
        assert!(list.contains(&AdminEmail::parse("ADMIN@x.com").unwrap()));
        assert!(!list.contains(&AdminEmail::parse("intruder@x.com").unwrap()));
    }

    #[test]
    fn test_allow_list_skips_malformed_entries() {
        let list = AdminAllowList::new(["admin@x.com", "ops@localhost", "not-an-email"]);

        assert_eq!(list.len(), 1);
    }
}
