//! Signup, login, and logout orchestration.
//!
//! Stateless across requests: everything these functions know comes in
//! as arguments, and the only state they touch is the roster and the
//! session table handed to them. HTTP and cookies stay upstream.

use super::*;

/// Register a new account. Role is always `User`.
pub async fn signup(
    roster: &Roster,
    username: &str,
    email: &str,
    password: &str,
) -> Result<Member, AuthError> {
    roster.create(username, email, password).await
}

/// Verify credentials and establish a session on success. Unknown
/// email and wrong password both come back as `InvalidCredentials`.
pub async fn login(
    roster: &Roster,
    sessions: &Sessions,
    email: &str,
    password: &str,
) -> Result<Token, AuthError> {
    let (member, hashword) = roster
        .lookup(email)
        .await
        .ok_or(AuthError::InvalidCredentials)?;
    let guess = password.to_string();
    let verified = tokio::task::spawn_blocking(move || password::verify(&guess, &hashword))
        .await
        .map_err(|e| {
            log::error!("[flow] verify task failed: {}", e);
            AuthError::Internal
        })?;
    if !verified {
        return Err(AuthError::InvalidCredentials);
    }
    let token = sessions.create(Identity::from(&member)).await;
    log::info!("[flow] {} logged in", member.username());
    Ok(token)
}

/// Tear down the session if one exists. Never errors: logging out with
/// a stale or missing token is a no-op.
pub async fn logout(sessions: &Sessions, token: &Token) {
    sessions.destroy(token).await;
}
