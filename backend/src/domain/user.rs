//! User identity and credential model.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors returned by the user constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// User name was missing or blank once trimmed.
    EmptyUserName,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUserName => write!(f, "user name must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Unique user name; doubles as the credential storage key.
///
/// ## Invariants
/// - Trimmed, and non-empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    /// Validate and construct a [`UserName`].
    ///
    /// # Examples
    /// ```
    /// use meals::domain::UserName;
    ///
    /// let name = UserName::new("  ada ").expect("valid user name");
    /// assert_eq!(name.as_ref(), "ada");
    /// assert!(UserName::new("   ").is_err());
    /// ```
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUserName);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Persisted credential record.
///
/// The password hash never leaves the auth service; downstream code sees a
/// [`CallerIdentity`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    user_name: UserName,
    email: String,
    password_hash: String,
    admin: bool,
}

impl Credential {
    /// Build a credential from its parts.
    pub fn new(
        user_name: UserName,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        admin: bool,
    ) -> Self {
        Self {
            user_name,
            email: email.into(),
            password_hash: password_hash.into(),
            admin,
        }
    }

    /// Storage key and login name.
    pub fn user_name(&self) -> &UserName {
        &self.user_name
    }

    /// Contact address supplied at registration.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// One-way password digest.
    pub fn password_hash(&self) -> &str {
        self.password_hash.as_str()
    }

    /// Whether the user carries the admin flag.
    pub fn is_admin(&self) -> bool {
        self.admin
    }

    /// Project the credential onto the identity handed to request handlers.
    pub fn identity(&self) -> CallerIdentity {
        CallerIdentity {
            user_name: self.user_name.clone(),
            email: self.email.clone(),
            admin: self.admin,
        }
    }
}

/// Authenticated caller attached to a request by the auth gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    user_name: UserName,
    email: String,
    admin: bool,
}

impl CallerIdentity {
    /// Construct an identity directly; production code derives it from a
    /// [`Credential`].
    pub fn new(user_name: UserName, email: impl Into<String>, admin: bool) -> Self {
        Self {
            user_name,
            email: email.into(),
            admin,
        }
    }

    /// Name of the authenticated caller.
    pub fn user_name(&self) -> &UserName {
        &self.user_name
    }

    /// Email recorded for the caller.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Whether the caller carries the admin flag.
    pub fn is_admin(&self) -> bool {
        self.admin
    }
}
