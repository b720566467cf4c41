use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Local, pre-network failures. Nothing in this enum is ever produced by a
/// provider call; signup checks these before touching the network.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Password does not meet the strength requirements")]
    WeakPassword,

    #[error("Invalid email format: {0}")]
    InvalidEmail(String),

    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Errors mapped from the identity provider's error codes. These are surfaced
/// verbatim as user-facing messages and never retried automatically.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Email is already in use")]
    EmailAlreadyInUse,

    #[error("Email address was rejected by the provider")]
    InvalidEmail,

    #[error("Password was rejected by the provider as too weak")]
    WeakPassword,

    #[error("No account exists for this email")]
    UserNotFound,

    #[error("Incorrect password")]
    WrongPassword,

    #[error("Too many attempts, try again later")]
    RateLimited,

    #[error("This operation requires a recent sign-in")]
    RequiresRecentLogin,

    #[error("Provider unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum AuthError {
    /// Login succeeded against the credential store but the email has not
    /// been verified. Distinct from wrong-credential failures; the session is
    /// signed out before this is returned.
    #[error("Email not verified")]
    EmailNotVerified,

    /// Account deletion got past the profile step but the provider refused to
    /// delete the identity without a recent sign-in. The caller must
    /// re-authenticate and retry; the retry tolerates the already-deleted
    /// profile.
    #[error("Re-authentication required")]
    ReauthRequired,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Store error: {0}")]
    Backend(String),

    #[error("Record not found")]
    NotFound,
}

impl Error {
    /// True for failures detected locally, before any network call.
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// True when the caller must re-authenticate and retry deletion.
    pub fn requires_reauth(&self) -> bool {
        matches!(self, Error::Auth(AuthError::ReauthRequired))
    }

    /// True for wrong-credential style failures at login, as opposed to the
    /// distinct unverified-email condition.
    pub fn is_credential_error(&self) -> bool {
        matches!(
            self,
            Error::Provider(ProviderError::UserNotFound)
                | Error::Provider(ProviderError::WrongPassword)
        )
    }
}
