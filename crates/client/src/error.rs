//! Unified error handling for API calls.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur when calling the AOS MICEPP backend.
///
/// Domain services propagate these untranslated; the user-management
/// service passes its failures through [`ApiError::localized`] first.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connection, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("{message}")]
    Status {
        status: u16,
        message: String,
    },

    /// A response body could not be interpreted.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// An endpoint path did not form a valid URL.
    #[error("Invalid request URL: {0}")]
    Url(#[from] url::ParseError),

    /// The durable session state could not be read or written.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// The HTTP status behind this error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Replace a status error's message with the platform's French wording.
    ///
    /// Used by the user-management service; every other service surfaces the
    /// backend's own message.
    #[must_use]
    pub fn localized(self) -> Self {
        match self {
            Self::Status { status, .. } => Self::Status {
                status,
                message: localized_status_message(status),
            },
            other => other,
        }
    }
}

fn localized_status_message(status: u16) -> String {
    match status {
        400 => "Données invalides. Vérifiez les informations saisies.".to_owned(),
        401 => "Non autorisé. Veuillez vous reconnecter.".to_owned(),
        403 => "Accès interdit. Vous n'avez pas les permissions nécessaires.".to_owned(),
        404 => "Ressource non trouvée.".to_owned(),
        409 => "Un utilisateur avec cet email, CIN ou matricule existe déjà.".to_owned(),
        500 => "Erreur serveur. Veuillez réessayer plus tard.".to_owned(),
        other => format!("Erreur {other}"),
    }
}
