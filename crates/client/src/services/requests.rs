//! Demandes - service requests (`/requests`).

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::instrument;

use aos_micepp_core::{DocumentId, RequestId, RequestStatus, ServiceId, UserId};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::services::catalog::ServiceEntry;

const BASE: &str = "requests";

/// A demande as the backend returns it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequest {
    pub id: RequestId,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub commentaire: Option<String>,
    pub statut: RequestStatus,
    #[serde(default)]
    pub date_soumission: Option<NaiveDateTime>,
    pub utilisateur_id: UserId,
    #[serde(default)]
    pub utilisateur_nom: Option<String>,
    #[serde(default)]
    pub utilisateur_email: Option<String>,
    #[serde(default)]
    pub service_id: Option<ServiceId>,
    #[serde(default)]
    pub service_nom: Option<String>,
    #[serde(default)]
    pub documents_justificatifs: Vec<SupportingDocument>,
    #[serde(default)]
    pub document_reponse: Option<SupportingDocument>,
    #[serde(default)]
    pub assigned_to_id: Option<UserId>,
    #[serde(default)]
    pub assigned_to_username: Option<String>,
}

/// A justificatif attached to a demande, or the response document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportingDocument {
    pub id: DocumentId,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub uploaded_at: Option<NaiveDateTime>,
}

/// Payload for submitting a new demande.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRequest {
    pub description: String,
    pub service_id: ServiceId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commentaire: Option<String>,
}

/// Service-request gateway.
pub struct RequestsService<'a> {
    client: &'a ApiClient,
}

impl<'a> RequestsService<'a> {
    #[must_use]
    pub const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// All demandes.
    ///
    /// # Errors
    ///
    /// Propagates the backend's failure untranslated.
    pub async fn list(&self) -> Result<Vec<ServiceRequest>, ApiError> {
        self.client.get(BASE).await
    }

    /// One demande by id.
    ///
    /// # Errors
    ///
    /// Propagates the backend's failure untranslated.
    pub async fn get(&self, id: RequestId) -> Result<ServiceRequest, ApiError> {
        self.client.get(&format!("{BASE}/{id}")).await
    }

    /// Demandes submitted by one user.
    ///
    /// # Errors
    ///
    /// Propagates the backend's failure untranslated.
    pub async fn for_user(&self, user_id: UserId) -> Result<Vec<ServiceRequest>, ApiError> {
        self.client.get(&format!("{BASE}/user/{user_id}")).await
    }

    /// Submit a new demande.
    ///
    /// # Errors
    ///
    /// Propagates the backend's failure untranslated.
    #[instrument(skip(self, request))]
    pub async fn create(&self, request: &NewRequest) -> Result<ServiceRequest, ApiError> {
        self.client.post(BASE, request).await
    }

    /// Move a demande to a new status.
    ///
    /// # Errors
    ///
    /// Propagates the backend's failure untranslated.
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        id: RequestId,
        status: RequestStatus,
    ) -> Result<ServiceRequest, ApiError> {
        self.client
            .patch(&format!("{BASE}/{id}/status"), &json!({ "status": status }))
            .await
    }

    /// Assign a demande to a handler.
    ///
    /// # Errors
    ///
    /// Propagates the backend's failure untranslated.
    #[instrument(skip(self))]
    pub async fn assign(&self, id: RequestId, user_id: UserId) -> Result<ServiceRequest, ApiError> {
        self.client
            .patch(
                &format!("{BASE}/{id}/assign"),
                &json!({ "assignedTo": user_id }),
            )
            .await
    }

    /// Total number of demandes.
    ///
    /// # Errors
    ///
    /// Propagates the backend's failure untranslated.
    pub async fn count(&self) -> Result<u64, ApiError> {
        self.client.get(&format!("{BASE}/count")).await
    }

    /// Number of demandes still awaiting treatment.
    ///
    /// # Errors
    ///
    /// Propagates the backend's failure untranslated.
    pub async fn count_pending(&self) -> Result<u64, ApiError> {
        self.client.get(&format!("{BASE}/count/pending")).await
    }

    /// Most recent demandes.
    ///
    /// # Errors
    ///
    /// Propagates the backend's failure untranslated.
    pub async fn recent(&self, limit: u32) -> Result<Vec<ServiceRequest>, ApiError> {
        self.client.get(&format!("{BASE}/recent?limit={limit}")).await
    }

    /// Catalog entries as exposed under the requests resource.
    ///
    /// # Errors
    ///
    /// Propagates the backend's failure untranslated.
    pub async fn services(&self) -> Result<Vec<ServiceEntry>, ApiError> {
        self.client.get(&format!("{BASE}/services")).await
    }

    /// One catalog entry as exposed under the requests resource.
    ///
    /// # Errors
    ///
    /// Propagates the backend's failure untranslated.
    pub async fn service(&self, id: ServiceId) -> Result<ServiceEntry, ApiError> {
        self.client.get(&format!("{BASE}/services/{id}")).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_demande_dto() {
        let request: ServiceRequest = serde_json::from_str(
            r#"{
                "id": 11,
                "description": "Attestation de travail",
                "statut": "EN_ATTENTE",
                "dateSoumission": "2025-03-14T09:30:00",
                "utilisateurId": 7,
                "utilisateurNom": "Ahmed Ben Ali",
                "utilisateurEmail": "a.benali@micepp.gov.ma",
                "serviceId": 2,
                "serviceNom": "Attestations",
                "documentsJustificatifs": [
                    {"id": 1, "fileName": "cin.pdf", "contentType": "application/pdf", "type": "JUSTIFICATIF"}
                ],
                "assignedToId": null,
                "assignedToUsername": null
            }"#,
        )
        .unwrap();

        assert_eq!(request.id, RequestId::new(11));
        assert_eq!(request.statut, RequestStatus::EnAttente);
        assert_eq!(request.documents_justificatifs.len(), 1);
        assert!(request.assigned_to_id.is_none());
        assert!(request.document_reponse.is_none());
    }

    #[test]
    fn test_new_request_wire_names() {
        let body = serde_json::to_value(NewRequest {
            description: "Demande de congé".to_owned(),
            service_id: ServiceId::new(4),
            commentaire: None,
        })
        .unwrap();

        assert_eq!(body.get("serviceId").unwrap(), 4);
        assert!(body.get("commentaire").is_none());
    }

    #[test]
    fn test_status_patch_body_shape() {
        let body = json!({ "status": RequestStatus::Acceptee });
        assert_eq!(body.get("status").unwrap(), "ACCEPTEE");
    }
}
