pub mod google;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::Role;

pub use google::GoogleIdentityProvider;

/// What the identity provider vouches for after a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityProfile {
    pub email: String,
    pub display_name: String,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// URL the browser is sent to in order to start the login.
    fn authorization_url(&self, state: &str) -> Result<String, AppError>;

    /// Exchanges the callback's authorization code for the user's profile.
    async fn exchange_code(&self, code: &str) -> Result<IdentityProfile, AppError>;
}

/// Provider that hands back a fixed profile. Used when no real provider is wired in.
pub struct StaticIdentityProvider {
    pub profile: Option<IdentityProfile>,
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    fn authorization_url(&self, state: &str) -> Result<String, AppError> {
        Ok(format!("/auth/google/callback?code=static&state={state}"))
    }

    async fn exchange_code(&self, _code: &str) -> Result<IdentityProfile, AppError> {
        self.profile
            .clone()
            .ok_or_else(|| AppError::Identity("no profile configured".to_string()))
    }
}

/// Part of the address before `@`, used as the student matricule.
pub fn local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

/// Decides which kind of account an address belongs to.
pub fn role_for_email(email: &str, student_domain: &str, staff_domain: &str) -> Option<Role> {
    let email = email.trim().to_ascii_lowercase();
    let domain = email.rsplit_once('@').map(|(_, d)| d)?;

    if domain == student_domain.to_ascii_lowercase() {
        Some(Role::Student)
    } else if domain == staff_domain.to_ascii_lowercase() {
        Some(Role::Teacher)
    } else {
        None
    }
}

/// First word is the first name, the rest is the last name.
pub fn split_display_name(display_name: &str) -> (String, String) {
    let mut parts = display_name.split_whitespace();
    let first = parts.next().unwrap_or_default().to_string();
    let last = parts.collect::<Vec<_>>().join(" ");
    (first, last)
}

pub fn student_email(matricule: &str, student_domain: &str) -> String {
    format!("{}@{}", matricule.trim(), student_domain)
}

/// `<first initial><last name>@<domain>`, lowercased with spaces dropped.
pub fn teacher_email(first_name: &str, last_name: &str, staff_domain: &str) -> String {
    let initial: String = first_name
        .trim()
        .chars()
        .next()
        .map(|c| c.to_lowercase().collect())
        .unwrap_or_default();
    let last: String = last_name
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();

    format!("{initial}{last}@{staff_domain}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_follows_domain() {
        assert_eq!(role_for_email("52345@etu.he2b.be", "etu.he2b.be", "he2b.be"), Some(Role::Student));
        assert_eq!(role_for_email("JDupont@HE2B.be", "etu.he2b.be", "he2b.be"), Some(Role::Teacher));
        assert_eq!(role_for_email("someone@gmail.com", "etu.he2b.be", "he2b.be"), None);
        assert_eq!(role_for_email("not-an-email", "etu.he2b.be", "he2b.be"), None);
    }

    #[test]
    fn matricule_is_local_part() {
        assert_eq!(local_part("52345@etu.he2b.be"), "52345");
        assert_eq!(local_part("plain"), "plain");
    }

    #[test]
    fn display_name_splits_on_first_word() {
        assert_eq!(
            split_display_name("Marie Claire Van Damme"),
            ("Marie".to_string(), "Claire Van Damme".to_string())
        );
        assert_eq!(split_display_name("Cher"), ("Cher".to_string(), String::new()));
    }

    #[test]
    fn generated_addresses() {
        assert_eq!(teacher_email("Jean", "Van Damme", "he2b.be"), "jvandamme@he2b.be");
        assert_eq!(student_email("52345", "etu.he2b.be"), "52345@etu.he2b.be");
    }
}
