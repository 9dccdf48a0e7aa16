use crate::api::client::ApiClient;
use crate::api::{auth as auth_api, users as users_api};
use crate::error::{AppError, Result};
use crate::models::session::{Session, StoredSession, basic_credential};
use crate::models::user::{Role, ServerUser};
use crate::storage::SessionStore;
use crate::validation::auth::validate_profile;

/// What a guarded surface demands of the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessRequirement {
    /// Any authenticated session.
    Authenticated,
    /// An organizer session; an admin session also passes.
    OrganizerOrAdmin,
    /// An admin session only.
    AdminOnly,
}

/// Answers a navigation guard's authorization query.
///
/// A missing or invalid session fails every requirement.
pub fn is_authorized(session: Option<&Session>, requirement: AccessRequirement) -> bool {
    let Some(session) = session else {
        return false;
    };
    if !session.is_valid() {
        return false;
    }

    match requirement {
        AccessRequirement::Authenticated => true,
        AccessRequirement::OrganizerOrAdmin => {
            matches!(session.role, Role::Organizer | Role::Admin)
        }
        AccessRequirement::AdminOnly => session.role == Role::Admin,
    }
}

/// Owns the authenticated identity for the lifetime of the client.
///
/// All session mutation funnels through `login`, `logout` and `refresh`;
/// nothing else reads or writes the persisted record.
pub struct SessionManager<S: SessionStore> {
    api: ApiClient,
    store: S,
    current: Option<Session>,
}

impl<S: SessionStore> SessionManager<S> {
    /// Creates the manager and reloads any persisted session, repairing the
    /// stored record where needed.
    pub fn new(api: ApiClient, store: S) -> Self {
        let mut manager = Self {
            api,
            store,
            current: None,
        };
        manager.refresh();
        manager
    }

    /// The session currently held in memory, if any.
    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    /// Authenticates against the server and establishes a session.
    ///
    /// The credential is the Basic-encoded identifier/password pair; the
    /// server payload is merged with local fallbacks for identity and role
    /// before the session is persisted. A rejected credential surfaces as
    /// `Authentication` with no retry.
    pub async fn login(&mut self, identifier: &str, password: &str) -> Result<Session> {
        tracing::debug!("Login attempt for: {}", identifier);

        let credential = basic_credential(identifier, password);
        let user = auth_api::login(&self.api, &credential).await?;

        let session = Session::from_login(&user, identifier, credential);
        self.persist(&session)?;
        self.current = Some(session.clone());

        tracing::info!("✅ Logged in as {} ({})", session.identity, session.role.as_str());
        Ok(session)
    }

    /// Forwards a registration profile after local validation.
    ///
    /// A locally invalid profile never reaches the network; a server
    /// rejection surfaces as `Registration` carrying the server's message.
    pub async fn register(&self, profile: &crate::models::user::RegisterProfile) -> Result<ServerUser> {
        validate_profile(profile)?;
        users_api::register(&self.api, profile).await
    }

    /// Tears the session down: the persisted record is removed and the
    /// in-memory state cleared. Never fails.
    pub fn logout(&mut self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!("Failed to remove stored session: {}", e);
        }
        self.current = None;
        tracing::info!("Logged out");
    }

    /// Reloads the session from durable storage.
    ///
    /// Missing-identity records are backfilled from the alternate id fields
    /// and rewritten; `ROLE_`-prefixed roles are normalized the same way. A
    /// record that cannot be parsed is cleared and treated as logged-out;
    /// no error crosses this boundary.
    pub fn refresh(&mut self) -> Option<Session> {
        let raw = match self.store.load() {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                self.current = None;
                return None;
            }
            Err(e) => {
                tracing::warn!("Failed to read stored session: {}", e);
                self.current = None;
                return None;
            }
        };

        let stored: StoredSession = match serde_json::from_str(&raw) {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!("Stored session is unparsable, clearing: {}", e);
                let _ = self.store.clear();
                self.current = None;
                return None;
            }
        };

        let (session, needs_rewrite) = stored.repair();
        if !session.is_valid() {
            tracing::warn!("Stored session is incomplete, treating as logged out");
            self.current = None;
            return None;
        }

        if needs_rewrite {
            if let Err(e) = self.persist(&session) {
                tracing::warn!("Failed to rewrite repaired session: {}", e);
            }
        }

        self.current = Some(session.clone());
        Some(session)
    }

    /// Convenience form of [`refresh`](Self::refresh) matching the guard's
    /// read path.
    pub fn current_session(&mut self) -> Option<Session> {
        self.refresh()
    }

    /// Whether the held session satisfies a guard requirement.
    pub fn authorized(&self, requirement: AccessRequirement) -> bool {
        is_authorized(self.current.as_ref(), requirement)
    }

    fn persist(&self, session: &Session) -> Result<()> {
        let raw = serde_json::to_string(session)
            .map_err(|e| AppError::Internal(format!("Session serialization failed: {}", e)))?;
        self.store.save(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemorySessionStore;

    fn manager_with(raw: &str) -> SessionManager<MemorySessionStore> {
        SessionManager::new(
            ApiClient::with_base_url("http://localhost:0"),
            MemorySessionStore::with_record(raw),
        )
    }

    fn session(role: Role) -> Session {
        Session {
            identity: "42".to_string(),
            username: "alice".to_string(),
            role,
            credential: "Basic abc".to_string(),
            name: None,
            email: None,
        }
    }

    #[test]
    fn missing_identity_is_backfilled_and_rewritten() {
        let mut manager = manager_with(
            r#"{"userId":42,"username":"alice","role":"USER","credential":"Basic abc"}"#,
        );
        let session = manager.current_session().unwrap();
        assert_eq!(session.identity, "42");

        let rewritten = manager.store.load().unwrap().unwrap();
        assert!(rewritten.contains(r#""identity":"42""#));
    }

    #[test]
    fn role_prefix_is_normalized_on_load() {
        let mut manager = manager_with(
            r#"{"identity":"42","username":"alice","role":"ROLE_ADMIN","credential":"Basic abc"}"#,
        );
        let session = manager.current_session().unwrap();
        assert_eq!(session.role, Role::Admin);

        let rewritten = manager.store.load().unwrap().unwrap();
        assert!(rewritten.contains(r#""role":"ADMIN""#));
    }

    #[test]
    fn unparsable_record_is_cleared_and_logged_out() {
        let mut manager = manager_with("{not json");
        assert!(manager.current_session().is_none());
        assert_eq!(manager.store.load().unwrap(), None);
    }

    #[test]
    fn record_without_credential_is_logged_out() {
        let mut manager = manager_with(r#"{"identity":"42","username":"alice","role":"USER"}"#);
        assert!(manager.current_session().is_none());
    }

    #[test]
    fn logout_clears_store_and_memory() {
        let mut manager = manager_with(
            r#"{"identity":"42","username":"alice","role":"USER","credential":"Basic abc"}"#,
        );
        assert!(manager.current_session().is_some());

        manager.logout();
        assert!(manager.current().is_none());
        assert_eq!(manager.store.load().unwrap(), None);
    }

    #[test]
    fn organizer_or_admin_truth_table() {
        let requirement = AccessRequirement::OrganizerOrAdmin;
        assert!(is_authorized(Some(&session(Role::Admin)), requirement));
        assert!(is_authorized(Some(&session(Role::Organizer)), requirement));
        assert!(!is_authorized(Some(&session(Role::User)), requirement));
        assert!(!is_authorized(None, requirement));
    }

    #[test]
    fn admin_only_rejects_organizers() {
        assert!(!is_authorized(
            Some(&session(Role::Organizer)),
            AccessRequirement::AdminOnly
        ));
        assert!(is_authorized(
            Some(&session(Role::Admin)),
            AccessRequirement::AdminOnly
        ));
    }

    #[test]
    fn invalid_session_fails_every_requirement() {
        let mut invalid = session(Role::Admin);
        invalid.credential.clear();
        for requirement in [
            AccessRequirement::Authenticated,
            AccessRequirement::OrganizerOrAdmin,
            AccessRequirement::AdminOnly,
        ] {
            assert!(!is_authorized(Some(&invalid), requirement));
        }
    }
}
