use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use zeroize::Zeroize;

use crate::models::user::{Role, ServerUser};

/// The client-held record of the authenticated principal.
///
/// A session is only treated as authenticated when it is [`Session::is_valid`]:
/// both an identity-equivalent field and the credential must be non-empty.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    /// The stable identifier used for booking ownership.
    pub identity: String,
    /// The identifier the user logged in with (username or email).
    pub username: String,
    /// The user's role, stored without the `ROLE_` prefix.
    pub role: Role,
    /// The opaque authorization header value sent with every request.
    pub credential: String,
    /// The user's display name, when the server supplied one.
    pub name: Option<String>,
    /// The user's email address, when the server supplied one.
    pub email: Option<String>,
}

impl Session {
    /// Builds a session from a successful login response, merging the server
    /// payload with locally-derived fallbacks for identity and role.
    pub fn from_login(user: &ServerUser, submitted_identifier: &str, credential: String) -> Session {
        Session {
            identity: resolve_identity(
                user.id.as_ref(),
                user.user_id.as_ref(),
                user.legacy_id.as_ref(),
                submitted_identifier,
            ),
            username: submitted_identifier.to_string(),
            role: user.resolve_role(),
            credential,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }

    /// Whether the session may be treated as authenticated.
    pub fn is_valid(&self) -> bool {
        !self.identity.is_empty() && !self.credential.is_empty()
    }

    /// The value of the `Authorization` header for outbound requests.
    pub fn authorization_header(&self) -> &str {
        &self.credential
    }

    /// The identity rendered as a JSON value: numeric identities travel as
    /// numbers (the booking API stores a numeric owner id), everything else
    /// as a string.
    pub fn identity_value(&self) -> Value {
        match self.identity.parse::<i64>() {
            Ok(n) => Value::from(n),
            Err(_) => Value::from(self.identity.clone()),
        }
    }
}

/// Constructs the Basic credential for an identifier/password pair.
///
/// The intermediate `identifier:password` buffer is zeroized after encoding.
pub fn basic_credential(identifier: &str, password: &str) -> String {
    let mut pair = format!("{}:{}", identifier, password);
    let credential = format!("Basic {}", BASE64.encode(pair.as_bytes()));
    pair.zeroize();
    credential
}

/// Resolves the stable identity from the backend-supplied id fields.
///
/// Precedence, first non-empty wins: `id`, then `userId`, then `_id`, then
/// the identifier the user submitted at login.
pub fn resolve_identity(
    id: Option<&Value>,
    user_id: Option<&Value>,
    legacy_id: Option<&Value>,
    fallback: &str,
) -> String {
    [id, user_id, legacy_id]
        .into_iter()
        .flatten()
        .find_map(non_empty)
        .unwrap_or_else(|| fallback.to_string())
}

/// Renders a JSON id field as a non-empty string, if it is one.
fn non_empty(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// The raw shape of the persisted session record.
///
/// Kept deliberately lenient: older records may predate the `identity` field
/// or still carry a `ROLE_`-prefixed role name. [`StoredSession::repair`]
/// normalizes both and reports whether the record needs rewriting.
#[derive(Debug, Deserialize)]
pub struct StoredSession {
    #[serde(default)]
    pub identity: Option<Value>,
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default, rename = "userId")]
    pub user_id: Option<Value>,
    #[serde(default, rename = "_id")]
    pub legacy_id: Option<Value>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub credential: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl StoredSession {
    /// Repairs the record in place: backfills a missing identity from the
    /// alternate id fields (or the username) and strips a `ROLE_` prefix.
    ///
    /// Returns the normalized session and whether the stored record differed
    /// from it and should be rewritten.
    pub fn repair(self) -> (Session, bool) {
        let had_identity = matches!(self.identity.as_ref().and_then(non_empty), Some(_));
        let had_clean_role = self
            .role
            .as_deref()
            .map(|r| !r.starts_with("ROLE_"))
            .unwrap_or(false);

        let username = self.username.unwrap_or_default();
        let identity = self
            .identity
            .as_ref()
            .and_then(non_empty)
            .unwrap_or_else(|| {
                resolve_identity(
                    self.id.as_ref(),
                    self.user_id.as_ref(),
                    self.legacy_id.as_ref(),
                    &username,
                )
            });

        let session = Session {
            identity,
            username,
            role: self.role.as_deref().map(Role::parse).unwrap_or(Role::User),
            credential: self.credential.unwrap_or_default(),
            name: self.name,
            email: self.email,
        };

        let needs_rewrite = !had_identity || !had_clean_role;
        (session, needs_rewrite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn identity_precedence_is_id_then_user_id_then_legacy() {
        let id = json!(7);
        let user_id = json!("u-42");
        let legacy = json!("abc");
        assert_eq!(
            resolve_identity(Some(&id), Some(&user_id), Some(&legacy), "fb"),
            "7"
        );
        assert_eq!(
            resolve_identity(None, Some(&user_id), Some(&legacy), "fb"),
            "u-42"
        );
        assert_eq!(resolve_identity(None, None, Some(&legacy), "fb"), "abc");
        assert_eq!(resolve_identity(None, None, None, "fb"), "fb");
    }

    #[test]
    fn empty_string_ids_are_skipped() {
        let empty = json!("");
        let user_id = json!(42);
        assert_eq!(
            resolve_identity(Some(&empty), Some(&user_id), None, "fb"),
            "42"
        );
    }

    #[test]
    fn basic_credential_matches_manual_encoding() {
        let credential = basic_credential("alice@example.com", "secret123");
        assert_eq!(credential, "Basic YWxpY2VAZXhhbXBsZS5jb206c2VjcmV0MTIz");
    }

    #[test]
    fn stored_record_backfills_identity_from_user_id() {
        let stored: StoredSession = serde_json::from_value(json!({
            "userId": 42,
            "username": "alice",
            "role": "USER",
            "credential": "Basic abc"
        }))
        .unwrap();
        let (session, needs_rewrite) = stored.repair();
        assert_eq!(session.identity, "42");
        assert!(needs_rewrite);
    }

    #[test]
    fn stored_record_normalizes_role_prefix() {
        let stored: StoredSession = serde_json::from_value(json!({
            "identity": "42",
            "username": "alice",
            "role": "ROLE_ADMIN",
            "credential": "Basic abc"
        }))
        .unwrap();
        let (session, needs_rewrite) = stored.repair();
        assert_eq!(session.role, Role::Admin);
        assert!(needs_rewrite);
    }

    #[test]
    fn clean_record_needs_no_rewrite() {
        let stored: StoredSession = serde_json::from_value(json!({
            "identity": "42",
            "username": "alice",
            "role": "ADMIN",
            "credential": "Basic abc"
        }))
        .unwrap();
        let (session, needs_rewrite) = stored.repair();
        assert!(session.is_valid());
        assert!(!needs_rewrite);
    }

    #[test]
    fn session_without_credential_is_invalid() {
        let session = Session {
            identity: "42".to_string(),
            username: "alice".to_string(),
            role: Role::User,
            credential: String::new(),
            name: None,
            email: None,
        };
        assert!(!session.is_valid());
    }

    #[test]
    fn numeric_identity_travels_as_number() {
        let session = Session {
            identity: "42".to_string(),
            username: "alice".to_string(),
            role: Role::User,
            credential: "Basic abc".to_string(),
            name: None,
            email: None,
        };
        assert_eq!(session.identity_value(), json!(42));
    }
}
