//! Authentication primitives: login and registration inputs, issued tokens,
//! and token claims.
//!
//! Inbound adapters parse raw strings into these types before talking to a
//! port, so services only ever see validated values.

use zeroize::Zeroizing;

use crate::domain::{UserName, UserValidationError};

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `user_name` satisfies [`UserName`] rules.
/// - `password` is non-empty but keeps caller-provided whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    user_name: UserName,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw user name/password inputs.
    ///
    /// # Examples
    /// ```
    /// use meals::domain::LoginCredentials;
    ///
    /// let creds = LoginCredentials::try_from_parts("admin", "admin").unwrap();
    /// assert_eq!(creds.user_name().as_ref(), "admin");
    /// ```
    pub fn try_from_parts(user_name: &str, password: &str) -> Result<Self, UserValidationError> {
        let user_name = UserName::new(user_name)?;
        if password.is_empty() {
            return Err(UserValidationError::EmptyPassword);
        }
        Ok(Self {
            user_name,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// User name suitable for credential lookups.
    pub fn user_name(&self) -> &UserName {
        &self.user_name
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated registration request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    credentials: LoginCredentials,
    email: String,
}

impl Registration {
    /// Construct a registration from raw inputs.
    pub fn try_from_parts(
        user_name: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, UserValidationError> {
        Ok(Self {
            credentials: LoginCredentials::try_from_parts(user_name, password)?,
            email: email.trim().to_owned(),
        })
    }

    /// Name the user will log in with.
    pub fn user_name(&self) -> &UserName {
        self.credentials.user_name()
    }

    /// Contact address.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Plaintext password; hashed before storage.
    pub fn password(&self) -> &str {
        self.credentials.password()
    }
}

/// Signed bearer token returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap an encoded token.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }
}

impl AsRef<str> for AccessToken {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<AccessToken> for String {
    fn from(value: AccessToken) -> Self {
        value.0
    }
}

/// Claims carried by an access token.
///
/// Tokens carry no expiry; revocation is achieved only by rotating the
/// signing secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    user_name: UserName,
}

impl TokenClaims {
    /// Claims for the given user.
    pub fn new(user_name: UserName) -> Self {
        Self { user_name }
    }

    /// Subject of the token.
    pub fn user_name(&self) -> &UserName {
        &self.user_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", UserValidationError::EmptyUserName)]
    #[case("ada", "", UserValidationError::EmptyPassword)]
    fn invalid_login_credentials(
        #[case] user_name: &str,
        #[case] password: &str,
        #[case] expected: UserValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(user_name, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn password_whitespace_is_preserved() {
        let creds = LoginCredentials::try_from_parts(" ada ", " pw ").expect("valid");
        assert_eq!(creds.user_name().as_ref(), "ada");
        assert_eq!(creds.password(), " pw ");
    }
}
