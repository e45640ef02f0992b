//! Auth-specific error types.

/// Result alias for auth operations.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Errors that can occur while signing in or registering.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AuthError {
    /// Email or password was empty.
    #[error("email and password are required")]
    MissingCredentials,

    /// Unknown email or wrong password.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Registration for an email that already has an account.
    #[error("an account already exists for '{0}'")]
    AccountExists(String),

    /// The store could not be written.
    #[error(transparent)]
    Storage(#[from] mindra_core::Error),
}

impl AuthError {
    /// Whether the caller can fix this by changing their input.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AuthError::MissingCredentials
                | AuthError::InvalidCredentials
                | AuthError::AccountExists(_)
        )
    }
}
