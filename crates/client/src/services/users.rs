//! Admin user directory (`/api/v1/admin`).
//!
//! The one service that localizes its failures: every error passes through
//! [`ApiError::localized`] before reaching the caller, so views display the
//! platform's French wording for the usual status codes.

use serde::Serialize;
use tracing::instrument;

use aos_micepp_core::{Role, User, UserId};

use crate::client::ApiClient;
use crate::error::ApiError;

const BASE: &str = "api/v1/admin";

/// Payload for registering a user through the admin directory.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub cin: String,
    pub matricule: String,
    pub role: Role,
}

/// Admin user directory service.
pub struct UserDirectory<'a> {
    client: &'a ApiClient,
}

impl<'a> UserDirectory<'a> {
    #[must_use]
    pub const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Register a new user. The backend answers with a plain-text receipt.
    ///
    /// # Errors
    ///
    /// Returns a localized [`ApiError`]; 409 means a user with the same
    /// email, CIN or matricule already exists.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register_user(&self, request: &RegisterUserRequest) -> Result<String, ApiError> {
        self.client
            .post_text(&format!("{BASE}/register-user"), request)
            .await
            .map_err(ApiError::localized)
    }

    /// All users.
    ///
    /// # Errors
    ///
    /// Returns a localized [`ApiError`] on failure.
    pub async fn list(&self) -> Result<Vec<User>, ApiError> {
        self.client.get(BASE).await.map_err(ApiError::localized)
    }

    /// One user by id.
    ///
    /// # Errors
    ///
    /// Returns a localized [`ApiError`]; 404 when the id is unknown.
    pub async fn get(&self, id: UserId) -> Result<User, ApiError> {
        self.client
            .get(&format!("{BASE}/{id}"))
            .await
            .map_err(ApiError::localized)
    }

    /// Total number of users.
    ///
    /// # Errors
    ///
    /// Returns a localized [`ApiError`] on failure.
    pub async fn count(&self) -> Result<u64, ApiError> {
        self.client
            .get(&format!("{BASE}/count"))
            .await
            .map_err(ApiError::localized)
    }

    /// Users holding the given role.
    ///
    /// # Errors
    ///
    /// Returns a localized [`ApiError`] on failure.
    pub async fn by_role(&self, role: Role) -> Result<Vec<User>, ApiError> {
        self.client
            .get(&format!("{BASE}/role/{}", role.as_str()))
            .await
            .map_err(ApiError::localized)
    }

    /// Users created in the last 30 days.
    ///
    /// # Errors
    ///
    /// Returns a localized [`ApiError`] on failure.
    pub async fn recent(&self) -> Result<Vec<User>, ApiError> {
        self.client
            .get(&format!("{BASE}/recent"))
            .await
            .map_err(ApiError::localized)
    }
}
