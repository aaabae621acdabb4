//! Contact messages (`/messages`).

use chrono::NaiveDateTime;
use serde::Deserialize;

use aos_micepp_core::MessageId;

use crate::client::ApiClient;
use crate::error::ApiError;

const BASE: &str = "messages";

/// A message left through the public contact form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    #[serde(default)]
    pub id: Option<MessageId>,
    pub nom: String,
    pub prenom: String,
    pub email: String,
    #[serde(default)]
    pub telephone: Option<String>,
    pub sujet: String,
    pub message: String,
    #[serde(default)]
    pub created_date: Option<NaiveDateTime>,
}

/// Contact-message gateway.
pub struct MessagesService<'a> {
    client: &'a ApiClient,
}

impl<'a> MessagesService<'a> {
    #[must_use]
    pub const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// All received contact messages.
    ///
    /// # Errors
    ///
    /// Propagates the backend's failure untranslated.
    pub async fn list(&self) -> Result<Vec<ContactMessage>, ApiError> {
        self.client.get(BASE).await
    }
}
