//! The session store.
//!
//! One `Session` represents the process's notion of "who is currently logged
//! in". It is constructed explicitly (no ambient singleton) and handed to
//! whatever needs it: the HTTP client attaches its token, the guards consult
//! its role, the auth service establishes and clears it.
//!
//! The identity record is held in memory and only re-hydrated from durable
//! storage at construction; the token is re-read from storage on every
//! authentication check, so expiry takes effect without a restart.

use std::sync::{Arc, PoisonError, RwLock};

use secrecy::SecretString;
use tracing::instrument;

use aos_micepp_core::{Role, User};

use crate::storage::{Storage, StorageError, keys};
use crate::token;

/// Default UI language when none has been chosen yet.
const DEFAULT_LANGUAGE: &str = "fr";

/// Shared handle to the current session.
///
/// Cheap to clone; all clones observe the same state. Reads and writes are
/// synchronous and short-lived, so a plain `RwLock` suffices - nothing holds
/// it across an await point.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    storage: Storage,
    user: RwLock<Option<User>>,
}

impl Session {
    /// Open a session over the given storage, re-hydrating any persisted
    /// login.
    ///
    /// A stored token that is expired or paired with an unreadable identity
    /// triggers a full logout as a side effect; the returned session is then
    /// simply unauthenticated.
    #[must_use]
    pub fn open(storage: Storage) -> Self {
        let session = Self {
            inner: Arc::new(SessionInner {
                storage,
                user: RwLock::new(None),
            }),
        };
        session.rehydrate();
        session
    }

    fn rehydrate(&self) {
        let Some(stored_token) = self.inner.storage.get(keys::TOKEN) else {
            return;
        };

        if token::is_expired(&stored_token) {
            tracing::info!("stored token expired, clearing session");
            self.clear();
            return;
        }

        let user = self
            .inner
            .storage
            .get(keys::USER)
            .and_then(|blob| serde_json::from_str::<User>(&blob).ok());

        match user {
            Some(user) => {
                *self.write_user() = Some(user);
            }
            None => {
                tracing::warn!("stored identity unreadable, clearing session");
                self.clear();
            }
        }
    }

    /// Persist a successful login: token, identity and password-change flag
    /// land in storage as one record, then memory is updated.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the state cannot be persisted; memory is
    /// left untouched in that case.
    pub fn establish(
        &self,
        token: &str,
        user: User,
        must_change_password: bool,
    ) -> Result<(), StorageError> {
        let blob = serde_json::to_string(&user)?;
        self.inner.storage.set_many(vec![
            (keys::TOKEN.to_owned(), token.to_owned()),
            (keys::USER.to_owned(), blob),
            (
                keys::MUST_CHANGE_PASSWORD.to_owned(),
                must_change_password.to_string(),
            ),
        ])?;
        *self.write_user() = Some(user);
        Ok(())
    }

    /// Clear the session from both durable storage and memory.
    ///
    /// No network call is involved; the language preference survives.
    #[instrument(skip(self))]
    pub fn logout(&self) {
        self.clear();
    }

    fn clear(&self) {
        if let Err(e) = self.inner.storage.remove_many(&[
            keys::TOKEN,
            keys::USER,
            keys::MUST_CHANGE_PASSWORD,
        ]) {
            tracing::error!(error = %e, "failed to clear persisted session");
        }
        *self.write_user() = None;
    }

    /// Whether a non-expired token is currently held.
    ///
    /// Consults storage and the token codec on every call, so an expiry that
    /// passes between calls flips this to `false` without further writes.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner
            .storage
            .get(keys::TOKEN)
            .is_some_and(|t| !token::is_expired(&t))
    }

    /// The in-memory identity, if any.
    ///
    /// Not re-validated against the token on every call; only re-hydrated at
    /// construction.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.inner
            .user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether the account must change its password before doing anything
    /// else. Absent or unparsable flags read as `false`.
    #[must_use]
    pub fn must_change_password(&self) -> bool {
        self.inner
            .storage
            .get(keys::MUST_CHANGE_PASSWORD)
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(false)
    }

    /// Clear the forced password-change flag after a successful change.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the flag cannot be rewritten.
    pub fn clear_must_change_password(&self) -> Result<(), StorageError> {
        self.inner
            .storage
            .set(keys::MUST_CHANGE_PASSWORD, "false")
    }

    /// Whether the current identity holds the given role.
    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.has_any_role(&[role])
    }

    /// Whether the current identity holds any of the given roles.
    ///
    /// An empty requirement list means unrestricted and is satisfied even
    /// without an identity.
    #[must_use]
    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        if roles.is_empty() {
            return true;
        }
        self.current_user()
            .is_some_and(|user| user.role.matches_any(roles))
    }

    /// The raw bearer token, if one is stored.
    #[must_use]
    pub fn token(&self) -> Option<SecretString> {
        self.inner.storage.get(keys::TOKEN).map(SecretString::from)
    }

    /// The persisted UI language preference.
    #[must_use]
    pub fn language(&self) -> String {
        self.inner
            .storage
            .get(keys::LANGUAGE)
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_owned())
    }

    /// Persist the UI language preference.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the preference cannot be written.
    pub fn set_language(&self, code: &str) -> Result<(), StorageError> {
        self.inner.storage.set(keys::LANGUAGE, code)
    }

    fn write_user(&self) -> std::sync::RwLockWriteGuard<'_, Option<User>> {
        self.inner
            .user
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}
