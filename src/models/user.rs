use garde::Validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The role a user holds within the system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// A regular attendee.
    #[serde(rename = "USER")]
    User,
    /// An event organizer.
    #[serde(rename = "ORGANIZER")]
    Organizer,
    /// An administrator.
    #[serde(rename = "ADMIN")]
    Admin,
}

impl Role {
    /// Parses a role name, stripping a `ROLE_` prefix when present.
    ///
    /// Unknown names fall back to `Role::User`, matching how the original
    /// client treats a server that grants nothing recognizable.
    pub fn parse(name: &str) -> Role {
        match name.trim().trim_start_matches("ROLE_") {
            "ADMIN" => Role::Admin,
            "ORGANIZER" => Role::Organizer,
            _ => Role::User,
        }
    }

    /// Returns the canonical (prefix-free) role name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Organizer => "ORGANIZER",
            Role::Admin => "ADMIN",
        }
    }
}

/// A granted authority as some backends return it.
#[derive(Clone, Debug, Deserialize)]
pub struct Authority {
    /// The authority name, e.g. `ROLE_ORGANIZER`.
    pub authority: String,
}

/// The user payload returned by the authentication endpoint.
///
/// Backends disagree on which id field they populate, so every candidate is
/// optional here; `Session` resolves them with a fixed precedence.
#[derive(Clone, Debug, Deserialize, Default)]
pub struct ServerUser {
    /// The primary id field.
    pub id: Option<Value>,
    /// An alternate id field.
    #[serde(rename = "userId")]
    pub user_id: Option<Value>,
    /// A legacy id field.
    #[serde(rename = "_id")]
    pub legacy_id: Option<Value>,
    /// The user's display name.
    pub name: Option<String>,
    /// The user's email address.
    pub email: Option<String>,
    /// The role name, possibly `ROLE_`-prefixed.
    pub role: Option<String>,
    /// Granted authorities, used when `role` is absent.
    #[serde(default)]
    pub authorities: Vec<Authority>,
}

impl ServerUser {
    /// Resolves the effective role: the explicit role field first, else the
    /// first granted authority, else `USER`.
    pub fn resolve_role(&self) -> Role {
        if let Some(ref role) = self.role {
            return Role::parse(role);
        }
        if let Some(authority) = self.authorities.first() {
            return Role::parse(&authority.authority);
        }
        Role::User
    }
}

/// The registration profile submitted to `POST /api/users/register`.
#[derive(Clone, Serialize, Validate)]
pub struct RegisterProfile {
    /// The user's full name.
    #[garde(length(min = 1, max = 255))]
    pub name: String,
    /// The user's email address.
    #[garde(email)]
    pub email: String,
    /// The user's password. Never logged.
    #[garde(length(min = 8, max = 128))]
    pub password: String,
}

impl std::fmt::Debug for RegisterProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterProfile")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
