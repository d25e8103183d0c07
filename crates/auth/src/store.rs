use super::*;
use gatehouse_core::ID;
use tokio::sync::RwLock;

/// One roster row: the public member record plus its stored hash.
/// The hash never leaves this module except through [`Roster::lookup`].
struct Credential {
    member: Member,
    hashword: String,
}

/// In-memory credential store. IDs are assigned sequentially under the
/// write lock, and the duplicate-email check re-runs under that same
/// lock, so concurrent signups cannot produce duplicate emails or
/// colliding IDs. Email matching is exact and case-sensitive.
pub struct Roster {
    rows: RwLock<Vec<Credential>>,
}

impl Roster {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }

    /// Roster with the two demo accounts. Their passwords are hashed
    /// at startup like everyone else's.
    pub async fn seeded() -> Result<Self, AuthError> {
        let roster = Self::new();
        roster
            .enroll("AdminUser", "admin@example.com", "admin123", Role::Admin)
            .await?;
        roster
            .enroll("RegularUser", "user@example.com", "user123", Role::User)
            .await?;
        Ok(roster)
    }

    /// Linear scan, exact string match.
    pub async fn find_by_email(&self, email: &str) -> Option<Member> {
        self.rows
            .read()
            .await
            .iter()
            .map(|c| &c.member)
            .find(|m| m.email() == email)
            .cloned()
    }

    /// Register a new account with role `User`.
    pub async fn create(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Member, AuthError> {
        self.enroll(username, email, password, Role::User).await
    }

    /// Member record and stored hash for password verification.
    pub(crate) async fn lookup(&self, email: &str) -> Option<(Member, String)> {
        self.rows
            .read()
            .await
            .iter()
            .find(|c| c.member.email() == email)
            .map(|c| (c.member.clone(), c.hashword.clone()))
    }

    /// Every registered member, in registration order. Admin-only
    /// rendering upstream; the roster itself has no access control.
    pub async fn all(&self) -> Vec<Member> {
        self.rows.read().await.iter().map(|c| c.member.clone()).collect()
    }

    pub async fn count(&self) -> usize {
        self.rows.read().await.len()
    }

    async fn enroll(
        &self,
        username: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<Member, AuthError> {
        // cheap precheck before paying for the hash
        if self.find_by_email(email).await.is_some() {
            return Err(AuthError::DuplicateEmail);
        }
        let plain = password.to_string();
        let hashword = tokio::task::spawn_blocking(move || password::hash(&plain))
            .await
            .map_err(|e| {
                log::error!("[roster] hashing task failed: {}", e);
                AuthError::Internal
            })?
            .map_err(|e| {
                log::error!("[roster] hashing failed: {}", e);
                AuthError::Internal
            })?;
        // the hash call yielded the executor; recheck under the write
        // lock so interleaved signups cannot both append
        let mut rows = self.rows.write().await;
        if rows.iter().any(|c| c.member.email() == email) {
            return Err(AuthError::DuplicateEmail);
        }
        let id = ID::from(rows.len() as u64 + 1);
        let member = Member::new(id, username.to_string(), email.to_string(), role);
        rows.push(Credential {
            member: member.clone(),
            hashword,
        });
        log::info!("[roster] registered {} <{}>", member.username(), member.email());
        Ok(member)
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}
