/// Failure taxonomy for the authentication flow.
///
/// Display strings double as the user-facing form messages. Login
/// deliberately collapses "unknown email" and "wrong password" into
/// one variant so the login path cannot be used to enumerate accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// Signup attempted with an email that is already registered.
    DuplicateEmail,
    /// Unknown email or wrong password at login.
    InvalidCredentials,
    /// Hashing or blocking-task failure; surfaces as a generic 500.
    Internal,
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateEmail => write!(f, "Email already registered"),
            Self::InvalidCredentials => write!(f, "Invalid email or password"),
            Self::Internal => write!(f, "internal error"),
        }
    }
}

impl std::error::Error for AuthError {}
