//! Published documents and news (`/documents-public`).
//!
//! Creation and update ship the document file itself, so these two calls use
//! multipart bodies; everything else is plain JSON.

use chrono::NaiveDateTime;
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::instrument;

use aos_micepp_core::DocumentId;

use crate::client::ApiClient;
use crate::error::ApiError;

const BASE: &str = "documents-public";

/// A published document as the backend returns it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicDocument {
    pub id: DocumentId,
    pub titre: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub published_by_name: Option<String>,
    #[serde(default)]
    pub created_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub uploaded_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub published: bool,
}

/// A document to publish or republish.
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    pub titre: String,
    pub description: String,
    /// Document category (e.g. `ACTUALITE`, `COMMUNIQUE`).
    pub kind: String,
    pub published: bool,
    pub file_name: String,
    pub content_type: String,
    pub content: Vec<u8>,
}

impl DocumentUpload {
    fn into_form(self) -> Result<Form, ApiError> {
        let part = Part::bytes(self.content)
            .file_name(self.file_name)
            .mime_str(&self.content_type)
            .map_err(ApiError::Http)?;

        Ok(Form::new()
            .text("titre", self.titre)
            .text("description", self.description)
            .text("type", self.kind)
            .text("published", self.published.to_string())
            .part("file", part))
    }
}

/// Published-document gateway.
pub struct NewsService<'a> {
    client: &'a ApiClient,
}

impl<'a> NewsService<'a> {
    #[must_use]
    pub const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// All published documents.
    ///
    /// # Errors
    ///
    /// Propagates the backend's failure untranslated.
    pub async fn list(&self) -> Result<Vec<PublicDocument>, ApiError> {
        self.client.get(BASE).await
    }

    /// One document by id.
    ///
    /// # Errors
    ///
    /// Propagates the backend's failure untranslated.
    pub async fn get(&self, id: DocumentId) -> Result<PublicDocument, ApiError> {
        self.client.get(&format!("{BASE}/{id}")).await
    }

    /// Publish a new document.
    ///
    /// # Errors
    ///
    /// Propagates the backend's failure untranslated.
    #[instrument(skip(self, upload), fields(titre = %upload.titre))]
    pub async fn create(&self, upload: DocumentUpload) -> Result<PublicDocument, ApiError> {
        let response = self
            .client
            .request(Method::POST, BASE)?
            .multipart(upload.into_form()?)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiClient::error_from(response).await);
        }
        response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Replace an existing document.
    ///
    /// # Errors
    ///
    /// Propagates the backend's failure untranslated.
    #[instrument(skip(self, upload), fields(titre = %upload.titre))]
    pub async fn update(
        &self,
        id: DocumentId,
        upload: DocumentUpload,
    ) -> Result<PublicDocument, ApiError> {
        let response = self
            .client
            .request(Method::PUT, &format!("{BASE}/{id}"))?
            .multipart(upload.into_form()?)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiClient::error_from(response).await);
        }
        response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Delete a document.
    ///
    /// # Errors
    ///
    /// Propagates the backend's failure untranslated.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: DocumentId) -> Result<(), ApiError> {
        self.client.delete(&format!("{BASE}/{id}")).await
    }

    /// Download a document's file content.
    ///
    /// # Errors
    ///
    /// Propagates the backend's failure untranslated.
    pub async fn download(&self, id: DocumentId) -> Result<Vec<u8>, ApiError> {
        self.client.get_bytes(&format!("{BASE}/{id}/download")).await
    }
}
