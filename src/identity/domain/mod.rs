//! Domain types for user identity.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors returned while constructing identity domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityDomainError {
    /// The user identifier is empty after trimming.
    #[error("user identifier must not be empty")]
    EmptyUserId,
}

/// Opaque identifier for a user account.
///
/// The value is assigned by the external authentication service and is
/// treated as an opaque token; the only validation performed is that it
/// is non-empty.
///
/// # Examples
///
/// ```
/// use homeward::identity::domain::UserId;
///
/// let id = UserId::new("user-a").expect("valid user id");
/// assert_eq!(id.as_str(), "user-a");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a validated user identifier.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::EmptyUserId`] when the value is
    /// empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(IdentityDomainError::EmptyUserId);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The signed-in identity exposed by the authentication collaborator.
///
/// Display name, email, and phone are whatever the provider has on file;
/// any of them may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    id: UserId,
    display_name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
}

impl UserIdentity {
    /// Creates an identity carrying only the user identifier.
    #[must_use]
    pub const fn new(id: UserId) -> Self {
        Self {
            id,
            display_name: None,
            email: None,
            phone: None,
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Sets the email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the phone number.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Returns the display name, if the provider has one.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Returns the email address, if the provider has one.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the phone number, if the provider has one.
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }
}
