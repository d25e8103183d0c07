use gatehouse_core::ID;
use gatehouse_core::Unique;

/// Access level attached to every registered account. Signup always
/// grants `User`; admins only exist as seeded accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::User => write!(f, "user"),
        }
    }
}

/// Registered account. Records are append-only: nothing in the system
/// updates or deletes a member once created.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Member {
    id: ID<Self>,
    username: String,
    email: String,
    role: Role,
}

impl Member {
    pub fn new(id: ID<Self>, username: String, email: String, role: Role) -> Self {
        Self {
            id,
            username,
            email,
            role,
        }
    }
    pub fn username(&self) -> &str {
        &self.username
    }
    pub fn email(&self) -> &str {
        &self.email
    }
    pub fn role(&self) -> Role {
        self.role
    }
}

impl Unique for Member {
    fn id(&self) -> ID<Self> {
        self.id
    }
}
