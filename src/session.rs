// src/session.rs
//! The signed-in identity, passed explicitly to every controller.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use crate::app_log;
use crate::error::{ClientError, ClientResult};
use crate::storage::{LocalStore, TOKEN_KEY, USER_KEY};
use crate::types::user::AuthPayload;
use crate::types::{Role, User};

#[derive(Debug, Deserialize)]
struct Claims {
    exp: Option<i64>,
}

#[derive(Debug, Default)]
struct SessionState {
    user: Option<User>,
    token: Option<String>,
}

/// Shared handle over the current session. Clones observe the same state.
#[derive(Clone)]
pub struct SessionContext {
    store: LocalStore,
    state: Arc<RwLock<SessionState>>,
}

impl SessionContext {
    /// A signed-out session over `store`.
    pub fn new(store: LocalStore) -> Self {
        Self {
            store,
            state: Arc::new(RwLock::new(SessionState::default())),
        }
    }

    /// Rebuild the session persisted by a previous run. An expired token or
    /// a half-written pair is discarded.
    pub async fn restore(store: LocalStore) -> ClientResult<Self> {
        let session = Self::new(store);

        let token: Option<String> = session.store.get(TOKEN_KEY).await.unwrap_or_else(|e| {
            app_log!(warn, "Ignoring stored token: {}", e);
            None
        });
        let user: Option<User> = session.store.get(USER_KEY).await.unwrap_or_else(|e| {
            app_log!(warn, "Ignoring stored user: {}", e);
            None
        });

        match (token, user) {
            (Some(token), Some(user)) if !token_expired(&token) => {
                app_log!(info, "Restored session for {} ({})", user.email, user.role);
                let mut state = session.write();
                state.token = Some(token);
                state.user = Some(user);
            }
            (None, None) => {}
            _ => {
                app_log!(info, "Stored session is expired or incomplete, signing out");
                session.clear_store().await?;
            }
        }

        Ok(session)
    }

    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    pub fn current_user(&self) -> Option<User> {
        self.read().user.clone()
    }

    pub fn token(&self) -> Option<String> {
        self.read().token.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        let state = self.read();
        state.user.is_some() && state.token.is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.read().user.as_ref().map(|u| u.role)
    }

    /// The signed-in user, or `Unauthenticated` before anything is sent.
    pub fn require_user(&self) -> ClientResult<User> {
        self.current_user().ok_or(ClientError::Unauthenticated)
    }

    /// Like [`Self::require_user`] but also checks the role.
    pub fn require_role(&self, role: Role) -> ClientResult<User> {
        let user = self.require_user()?;
        if user.role != role {
            app_log!(warn, "User {} is not a {}", user.id, role);
            return Err(ClientError::Unauthenticated);
        }
        Ok(user)
    }

    /// Persist and adopt a successful login or signup.
    pub async fn login(&self, payload: AuthPayload) -> ClientResult<User> {
        self.store.set(TOKEN_KEY, &payload.token).await?;
        self.store.set(USER_KEY, &payload.user).await?;

        let mut state = self.write();
        state.token = Some(payload.token);
        state.user = Some(payload.user.clone());
        Ok(payload.user)
    }

    pub async fn logout(&self) -> ClientResult<()> {
        self.clear_store().await?;
        let mut state = self.write();
        state.token = None;
        state.user = None;
        app_log!(info, "Signed out");
        Ok(())
    }

    async fn clear_store(&self) -> ClientResult<()> {
        self.store.remove(TOKEN_KEY).await?;
        self.store.remove(USER_KEY).await
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("user", &self.current_user().map(|u| u.email))
            .finish_non_exhaustive()
    }
}

/// Reads `exp` without verifying the signature; the server does that.
/// Tokens that are not JWTs, or carry no `exp`, never expire client-side.
pub fn token_expired(token: &str) -> bool {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    match decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation) {
        Ok(data) => data
            .claims
            .exp
            .map(|exp| exp <= Utc::now().timestamp())
            .unwrap_or(false),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn jwt(exp: i64) -> String {
        let claims = serde_json::json!({"sub": "7", "exp": exp});
        encode(&Header::default(), &claims, &EncodingKey::from_secret(b"server-secret")).unwrap()
    }

    fn payload(token: String) -> AuthPayload {
        AuthPayload {
            token,
            user: User {
                id: 7,
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                role: Role::Seeker,
            },
        }
    }

    #[test]
    fn test_token_expiry() {
        let now = Utc::now().timestamp();
        assert!(token_expired(&jwt(now - 60)));
        assert!(!token_expired(&jwt(now + 3600)));
        assert!(!token_expired("opaque-session-token"));
    }

    #[tokio::test]
    async fn test_login_persists_and_restores() {
        let store = LocalStore::in_memory();
        let session = SessionContext::new(store.clone());
        assert!(!session.is_authenticated());

        let token = jwt(Utc::now().timestamp() + 3600);
        session.login(payload(token.clone())).await.unwrap();
        assert!(session.is_authenticated());
        assert_eq!(session.role(), Some(Role::Seeker));

        let restored = SessionContext::restore(store).await.unwrap();
        assert_eq!(restored.token(), Some(token));
        assert_eq!(restored.current_user().unwrap().id, 7);
    }

    #[tokio::test]
    async fn test_expired_session_is_cleared_on_restore() {
        let store = LocalStore::in_memory();
        SessionContext::new(store.clone())
            .login(payload(jwt(Utc::now().timestamp() - 10)))
            .await
            .unwrap();

        let restored = SessionContext::restore(store.clone()).await.unwrap();
        assert!(!restored.is_authenticated());
        assert!(store.get::<String>(TOKEN_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_logout_clears_both_keys() {
        let store = LocalStore::in_memory();
        let session = SessionContext::new(store.clone());
        session.login(payload("opaque".to_string())).await.unwrap();
        session.logout().await.unwrap();

        assert!(session.current_user().is_none());
        assert!(store.get::<User>(USER_KEY).await.unwrap().is_none());
        assert!(matches!(session.require_user(), Err(ClientError::Unauthenticated)));
    }

    #[tokio::test]
    async fn test_require_role() {
        let session = SessionContext::new(LocalStore::in_memory());
        session.login(payload("opaque".to_string())).await.unwrap();
        assert!(session.require_role(Role::Seeker).is_ok());
        assert!(session.require_role(Role::Recruiter).is_err());
    }
}
