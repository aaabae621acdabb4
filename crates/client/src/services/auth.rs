//! Authentication service.
//!
//! Exchanges credentials for a bearer token, changes passwords and registers
//! accounts against the `/auth` endpoints.

use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use aos_micepp_core::{Email, Role, User, UserId};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::storage::StorageError;

/// Error code the backend uses for an expired bearer token.
const TOKEN_EXPIRED_CODE: &str = "TOKEN_EXPIRED";

/// Errors surfaced by the authentication flows.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The backend rejected the credentials (HTTP 401).
    #[error("Identifiants invalides")]
    InvalidCredentials,

    /// The backend reported an expired session; the local session has
    /// already been cleared when this is returned.
    #[error("Session expirée, veuillez vous reconnecter")]
    SessionExpired,

    /// The backend rejected the request (HTTP 400).
    #[error("{0}")]
    BadRequest(String),

    /// Any other API failure.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The local session state could not be persisted.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Successful login payload.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    token: String,
    /// Role of the account, possibly `ROLE_`-prefixed.
    user_type: String,
    email: String,
    #[serde(default)]
    must_change_password: bool,
    user_id: i32,
    #[serde(rename = "FirstName", alias = "firstName")]
    first_name: String,
    #[serde(rename = "LastName", alias = "lastName")]
    last_name: String,
    #[serde(default)]
    phone_number: Option<String>,
    #[serde(default)]
    department: Option<String>,
    #[serde(default = "default_active")]
    is_active: bool,
}

const fn default_active() -> bool {
    true
}

/// Error payload the backend may attach to a 400.
#[derive(Deserialize, Default)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Request body for a password change.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// Request body for account registration.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub cin: String,
    pub matricule: String,
    pub role: Role,
}

/// Authenticate against the backend and establish the local session.
///
/// On success the token, identity and password-change flag are persisted as
/// one record and the identity is returned.
///
/// # Errors
///
/// - [`AuthError::InvalidCredentials`] on HTTP 401; the session is untouched.
/// - [`AuthError::SessionExpired`] when the backend answers 400 with the
///   `TOKEN_EXPIRED` code; the session is cleared first.
/// - [`AuthError::BadRequest`] for other 400s, carrying the server's message
///   when it sent one.
#[instrument(skip(client, password), fields(email = %email))]
pub async fn login(
    client: &ApiClient,
    email: &str,
    password: &SecretString,
) -> Result<User, AuthError> {
    let response = client
        .request(Method::POST, "auth/login")?
        .json(&LoginRequest {
            email,
            password: password.expose_secret(),
        })
        .send()
        .await
        .map_err(ApiError::Http)?;

    let status = response.status();

    if status == StatusCode::UNAUTHORIZED {
        return Err(AuthError::InvalidCredentials);
    }

    if status == StatusCode::BAD_REQUEST {
        let body = response.text().await.unwrap_or_default();
        let parsed: ErrorBody = serde_json::from_str(&body).unwrap_or_default();

        if parsed.code.as_deref() == Some(TOKEN_EXPIRED_CODE) {
            client.session().logout();
            return Err(AuthError::SessionExpired);
        }

        let message = parsed
            .message
            .or(parsed.error)
            .or_else(|| (!body.is_empty()).then(|| body.clone()))
            .unwrap_or_else(|| "Requête invalide".to_owned());
        return Err(AuthError::BadRequest(message));
    }

    if !status.is_success() {
        return Err(ApiClient::error_from(response).await.into());
    }

    let payload: LoginResponse = response
        .json()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))?;

    let user = identity_from(&payload)?;
    client
        .session()
        .establish(&payload.token, user.clone(), payload.must_change_password)?;

    tracing::info!(role = %user.role, "login established");
    Ok(user)
}

/// Build the identity record from a login payload, normalizing the role.
fn identity_from(payload: &LoginResponse) -> Result<User, AuthError> {
    let role =
        Role::parse(&payload.user_type).map_err(|e| ApiError::Parse(e.to_string()))?;
    let email =
        Email::parse(&payload.email).map_err(|e| ApiError::Parse(e.to_string()))?;

    Ok(User {
        id: UserId::new(payload.user_id),
        email,
        first_name: payload.first_name.clone(),
        last_name: payload.last_name.clone(),
        role,
        enabled: payload.is_active,
        phone: payload.phone_number.clone(),
        department: payload.department.clone(),
        cin: None,
        matricule: None,
        using_temporary_password: payload.must_change_password,
        created_at: None,
        updated_at: None,
    })
}

/// Change the current account's password.
///
/// Clears the forced password-change flag on success.
///
/// # Errors
///
/// Returns [`AuthError::BadRequest`] when the backend rejects the change
/// (wrong current password, mismatched confirmation).
#[instrument(skip_all)]
pub async fn change_password(
    client: &ApiClient,
    request: &ChangePasswordRequest,
) -> Result<(), AuthError> {
    let response = client
        .request(Method::POST, "auth/change-password")?
        .json(request)
        .send()
        .await
        .map_err(ApiError::Http)?;

    let status = response.status();
    if status == StatusCode::BAD_REQUEST {
        let message = response
            .text()
            .await
            .ok()
            .filter(|body| !body.is_empty())
            .unwrap_or_else(|| "Requête invalide".to_owned());
        return Err(AuthError::BadRequest(message));
    }
    if !status.is_success() {
        return Err(ApiClient::error_from(response).await.into());
    }

    client.session().clear_must_change_password()?;
    Ok(())
}

/// Register a new account (HTTP 202 on acceptance).
///
/// # Errors
///
/// Propagates the backend's failure untranslated.
#[instrument(skip(client), fields(email = %request.email))]
pub async fn register(client: &ApiClient, request: &RegistrationRequest) -> Result<(), AuthError> {
    let response = client
        .request(Method::POST, "auth/register")?
        .json(request)
        .send()
        .await
        .map_err(ApiError::Http)?;

    if !response.status().is_success() {
        return Err(ApiClient::error_from(response).await.into());
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_wire_names() {
        let payload: LoginResponse = serde_json::from_str(
            r#"{
                "token": "h.c.s",
                "userType": "ROLE_ADMIN",
                "email": "admin@micepp.gov.ma",
                "mustChangePassword": true,
                "userId": 3,
                "FirstName": "Ahmed",
                "LastName": "Ben Ali",
                "phoneNumber": "0600000000",
                "department": "Administration",
                "isActive": true
            }"#,
        )
        .unwrap();

        assert_eq!(payload.user_type, "ROLE_ADMIN");
        assert!(payload.must_change_password);
        assert_eq!(payload.first_name, "Ahmed");
    }

    #[test]
    fn test_identity_from_normalizes_role() {
        let payload: LoginResponse = serde_json::from_str(
            r#"{
                "token": "h.c.s",
                "userType": "ROLE_ADMIN",
                "email": "admin@micepp.gov.ma",
                "userId": 3,
                "FirstName": "Ahmed",
                "LastName": "Ben Ali"
            }"#,
        )
        .unwrap();

        let user = identity_from(&payload).unwrap();
        assert_eq!(user.role, Role::Admin);
        assert!(user.enabled);
        assert_eq!(user.id, UserId::new(3));
    }

    #[test]
    fn test_identity_from_rejects_unknown_role() {
        let payload: LoginResponse = serde_json::from_str(
            r#"{
                "token": "h.c.s",
                "userType": "UNKNOWN",
                "email": "x@y.z",
                "userId": 1,
                "FirstName": "A",
                "LastName": "B"
            }"#,
        )
        .unwrap();

        assert!(identity_from(&payload).is_err());
    }

    #[test]
    fn test_error_body_variants() {
        let coded: ErrorBody =
            serde_json::from_str(r#"{"code":"TOKEN_EXPIRED","message":"expired"}"#).unwrap();
        assert_eq!(coded.code.as_deref(), Some(TOKEN_EXPIRED_CODE));

        let plain: ErrorBody = serde_json::from_str(r#"{"error":"nope"}"#).unwrap();
        assert_eq!(plain.error.as_deref(), Some("nope"));
    }

    #[test]
    fn test_change_password_request_wire_names() {
        let body = serde_json::to_value(ChangePasswordRequest {
            current_password: "old".to_owned(),
            new_password: "new".to_owned(),
            confirm_password: "new".to_owned(),
        })
        .unwrap();
        assert!(body.get("currentPassword").is_some());
        assert!(body.get("confirmPassword").is_some());
    }

    #[test]
    fn test_registration_request_wire_names() {
        let body = serde_json::to_value(RegistrationRequest {
            first_name: "A".to_owned(),
            last_name: "B".to_owned(),
            email: "a@b.c".to_owned(),
            phone_number: "06".to_owned(),
            cin: "AB1".to_owned(),
            matricule: "M-1".to_owned(),
            role: Role::Agent,
        })
        .unwrap();
        assert_eq!(body.get("role").unwrap(), "AGENT");
        assert!(body.get("phoneNumber").is_some());
    }
}
