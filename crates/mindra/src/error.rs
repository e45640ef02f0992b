//! Application-level error type.

use mindra_auth::AuthError;

/// Result alias for [`App`](crate::App) operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Any failure an [`App`](crate::App) operation can report.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Catalog, progress, quiz, editor, or storage failure.
    #[error(transparent)]
    Core(#[from] mindra_core::Error),

    /// Sign-in or registration failure.
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl Error {
    /// Whether the message is meant for the person using the app, as opposed
    /// to an environment problem such as a failed disk write.
    pub fn is_user_facing(&self) -> bool {
        match self {
            Error::Core(e) => e.is_user_facing(),
            Error::Auth(e) => e.is_client_error(),
        }
    }
}
