//! Credential storage, password hashing, and session management.
//!
//! In-memory authentication with Argon2 password hashing. Nothing
//! persists across restarts: the roster and the session table both
//! live for exactly as long as the process does.
//!
//! ## Domain Types
//!
//! - [`Member`] — Registered account with a role
//! - [`Identity`] — Snapshot of a member carried by a session
//! - [`Token`] — Opaque session token for cookie transport
//!
//! ## Components
//!
//! - [`Roster`] — Credential store with atomic insert-if-absent
//! - [`Sessions`] — Token-to-identity table
//! - [`flow`] — Signup, login, and logout orchestration
//! - [`password`] — Argon2 hashing and verification
mod dto;
mod error;
mod member;
mod session;
mod store;
pub mod flow;
pub mod password;

pub use dto::*;
pub use error::*;
pub use member::*;
pub use session::*;
pub use store::*;
