use super::*;
use gatehouse_core::ID;
use gatehouse_core::Unique;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Opaque session token carried by the client's cookie. Random UUIDv4,
/// so tokens are unguessable and carry no information themselves; the
/// identity only exists server-side in the [`Sessions`] table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token(uuid::Uuid);

impl Token {
    fn fresh() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl std::str::FromStr for Token {
    type Err = uuid::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// Identity snapshot carried by a session. Copied from the member at
/// login time; later changes to the roster would not propagate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    id: ID<Member>,
    username: String,
    role: Role,
}

impl Identity {
    pub fn id(&self) -> ID<Member> {
        self.id
    }
    pub fn username(&self) -> &str {
        &self.username
    }
    pub fn role(&self) -> Role {
        self.role
    }
}

impl From<&Member> for Identity {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id(),
            username: member.username().to_string(),
            role: member.role(),
        }
    }
}

/// Process-wide session table. Transport-agnostic: it only deals in
/// opaque tokens, never in cookies or requests. Sessions have no
/// expiry; they live until logout or process exit.
pub struct Sessions {
    live: RwLock<HashMap<Token, Identity>>,
}

impl Sessions {
    pub fn new() -> Self {
        Self {
            live: RwLock::new(HashMap::new()),
        }
    }
    /// Mint a fresh token and bind it to the identity.
    pub async fn create(&self, identity: Identity) -> Token {
        let token = Token::fresh();
        log::debug!("[sessions] opened session for {}", identity.username());
        self.live.write().await.insert(token, identity);
        token
    }
    pub async fn get(&self, token: &Token) -> Option<Identity> {
        self.live.read().await.get(token).cloned()
    }
    /// Idempotent: destroying an unknown or already-destroyed token is
    /// not an error.
    pub async fn destroy(&self, token: &Token) {
        self.live.write().await.remove(token);
    }
    pub async fn count(&self) -> usize {
        self.live.read().await.len()
    }
}

impl Default for Sessions {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(name: &str, role: Role) -> Identity {
        Identity::from(&Member::new(
            ID::from(1),
            name.to_string(),
            format!("{}@example.com", name),
            role,
        ))
    }

    #[tokio::test]
    async fn create_then_get() {
        let sessions = Sessions::new();
        let token = sessions.create(identity("alice", Role::User)).await;
        let found = sessions.get(&token).await.expect("session");
        assert!(found.username() == "alice");
        assert!(found.role() == Role::User);
    }

    #[tokio::test]
    async fn tokens_are_unique() {
        let sessions = Sessions::new();
        let a = sessions.create(identity("alice", Role::User)).await;
        let b = sessions.create(identity("alice", Role::User)).await;
        assert!(a != b);
        assert!(sessions.count().await == 2);
    }

    #[tokio::test]
    async fn destroy_is_idempotent() {
        let sessions = Sessions::new();
        let token = sessions.create(identity("bob", Role::Admin)).await;
        sessions.destroy(&token).await;
        sessions.destroy(&token).await;
        assert!(sessions.get(&token).await.is_none());
        assert!(sessions.count().await == 0);
    }

    #[test]
    fn token_round_trips_through_display() {
        let token = Token::fresh();
        let parsed = token.to_string().parse::<Token>().expect("parse");
        assert!(parsed == token);
        assert!("not-a-token".parse::<Token>().is_err());
    }

    #[test]
    fn identity_is_a_snapshot() {
        let member = Member::new(
            ID::from(7),
            String::from("carol"),
            String::from("carol@example.com"),
            Role::User,
        );
        let identity = Identity::from(&member);
        drop(member);
        assert!(identity.id() == ID::from(7));
        assert!(identity.username() == "carol");
    }
}
