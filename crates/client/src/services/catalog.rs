//! Service catalog administration (`/api/admin/services`).

use serde::{Deserialize, Serialize};
use tracing::instrument;

use aos_micepp_core::ServiceId;

use crate::client::ApiClient;
use crate::error::ApiError;

const BASE: &str = "api/admin/services";

/// A configurable catalog entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceEntry {
    #[serde(default)]
    pub id: Option<ServiceId>,
    pub nom: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Payload for creating a catalog entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceEntry {
    pub nom: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub icon: String,
    pub title: String,
    pub description: String,
    pub features: Vec<String>,
}

/// Payload for updating a catalog entry (the type is fixed at creation).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServiceEntry {
    pub nom: String,
    pub icon: String,
    pub title: String,
    pub description: String,
    pub features: Vec<String>,
}

/// Catalog administration gateway.
pub struct ServiceCatalog<'a> {
    client: &'a ApiClient,
}

impl<'a> ServiceCatalog<'a> {
    #[must_use]
    pub const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// All catalog entries, active or not.
    ///
    /// # Errors
    ///
    /// Propagates the backend's failure untranslated.
    pub async fn list(&self) -> Result<Vec<ServiceEntry>, ApiError> {
        self.client.get(BASE).await
    }

    /// One entry by id.
    ///
    /// # Errors
    ///
    /// Propagates the backend's failure untranslated.
    pub async fn get(&self, id: ServiceId) -> Result<ServiceEntry, ApiError> {
        self.client.get(&format!("{BASE}/{id}")).await
    }

    /// Create a new entry.
    ///
    /// # Errors
    ///
    /// Propagates the backend's failure untranslated.
    #[instrument(skip(self, entry), fields(nom = %entry.nom))]
    pub async fn create(&self, entry: &CreateServiceEntry) -> Result<ServiceEntry, ApiError> {
        self.client.post(BASE, entry).await
    }

    /// Update an existing entry.
    ///
    /// # Errors
    ///
    /// Propagates the backend's failure untranslated.
    #[instrument(skip(self, entry), fields(nom = %entry.nom))]
    pub async fn update(
        &self,
        id: ServiceId,
        entry: &UpdateServiceEntry,
    ) -> Result<ServiceEntry, ApiError> {
        self.client.put(&format!("{BASE}/{id}"), entry).await
    }

    /// Delete an entry.
    ///
    /// # Errors
    ///
    /// Propagates the backend's failure untranslated.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: ServiceId) -> Result<(), ApiError> {
        self.client.delete(&format!("{BASE}/{id}")).await
    }

    /// Flip an entry between active and inactive.
    ///
    /// # Errors
    ///
    /// Propagates the backend's failure untranslated.
    #[instrument(skip(self))]
    pub async fn toggle_status(&self, id: ServiceId) -> Result<ServiceEntry, ApiError> {
        self.client
            .put(&format!("{BASE}/{id}/toggle-status"), &serde_json::json!({}))
            .await
    }

    /// The service types entries can be created with.
    ///
    /// # Errors
    ///
    /// Propagates the backend's failure untranslated.
    pub async fn types(&self) -> Result<Vec<String>, ApiError> {
        self.client.get(&format!("{BASE}/types")).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_entry() {
        let entry: ServiceEntry = serde_json::from_str(
            r#"{
                "id": 2,
                "nom": "attestations",
                "type": "RH",
                "icon": "description",
                "title": "Attestations administratives",
                "description": "Demandes d'attestations de travail et de salaire",
                "features": ["Attestation de travail", "Attestation de salaire"],
                "isActive": true
            }"#,
        )
        .unwrap();

        assert_eq!(entry.id, Some(ServiceId::new(2)));
        assert_eq!(entry.kind, "RH");
        assert_eq!(entry.features.len(), 2);
        assert_eq!(entry.is_active, Some(true));
    }

    #[test]
    fn test_create_payload_uses_type_key() {
        let body = serde_json::to_value(CreateServiceEntry {
            nom: "transport".to_owned(),
            kind: "LOGISTIQUE".to_owned(),
            icon: "truck".to_owned(),
            title: "Transport".to_owned(),
            description: "Navettes".to_owned(),
            features: vec![],
        })
        .unwrap();

        assert_eq!(body.get("type").unwrap(), "LOGISTIQUE");
        assert!(body.get("kind").is_none());
    }

    #[test]
    fn test_update_payload_has_no_type() {
        let body = serde_json::to_value(UpdateServiceEntry {
            nom: "transport".to_owned(),
            icon: "truck".to_owned(),
            title: "Transport".to_owned(),
            description: "Navettes".to_owned(),
            features: vec!["Réservation".to_owned()],
        })
        .unwrap();

        assert!(body.get("type").is_none());
    }
}
