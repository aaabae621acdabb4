//! Réclamations - complaints (`/Reclamation`).
//!
//! The resource path keeps the backend's capitalization.

use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use aos_micepp_core::{ComplaintId, ComplaintStatus, User, UserId};

use crate::client::ApiClient;
use crate::error::ApiError;

const BASE: &str = "Reclamation";

/// A réclamation as the backend returns it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    pub id: ComplaintId,
    pub objet: String,
    pub contenu: String,
    pub statut: ComplaintStatus,
    #[serde(default)]
    pub date_soumission: Option<NaiveDateTime>,
    #[serde(default)]
    pub last_modified_date: Option<NaiveDateTime>,
    pub utilisateur: ComplaintUser,
    #[serde(default)]
    pub assigned_to: Option<ComplaintUser>,
    #[serde(default)]
    pub commentaire: Option<String>,
}

/// The abbreviated user record embedded in a réclamation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintUser {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Complaint gateway.
pub struct ComplaintsService<'a> {
    client: &'a ApiClient,
}

impl<'a> ComplaintsService<'a> {
    #[must_use]
    pub const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// All réclamations.
    ///
    /// # Errors
    ///
    /// Propagates the backend's failure untranslated.
    pub async fn list(&self) -> Result<Vec<Complaint>, ApiError> {
        self.client.get(&format!("{BASE}/All")).await
    }

    /// One réclamation by id.
    ///
    /// # Errors
    ///
    /// Propagates the backend's failure untranslated.
    pub async fn get(&self, id: ComplaintId) -> Result<Complaint, ApiError> {
        self.client.get(&format!("{BASE}/{id}")).await
    }

    /// Assign a réclamation to a support user, or unassign it with `None`.
    ///
    /// The backend models unassignment as a literal `null` path segment.
    ///
    /// # Errors
    ///
    /// Propagates the backend's failure untranslated.
    #[instrument(skip(self))]
    pub async fn assign(
        &self,
        id: ComplaintId,
        user_id: Option<UserId>,
    ) -> Result<Complaint, ApiError> {
        let path = match user_id {
            Some(user_id) => format!("{BASE}/{id}/assign/{user_id}"),
            None => format!("{BASE}/{id}/assign/null"),
        };
        self.client.patch_empty(&path).await
    }

    /// Move a réclamation to a new status.
    ///
    /// # Errors
    ///
    /// Propagates the backend's failure untranslated.
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        id: ComplaintId,
        status: ComplaintStatus,
    ) -> Result<Complaint, ApiError> {
        self.client
            .patch(&format!("{BASE}/{id}/status"), &json!({ "status": status }))
            .await
    }

    /// Attach a treatment comment to a réclamation.
    ///
    /// # Errors
    ///
    /// Propagates the backend's failure untranslated.
    #[instrument(skip(self, comment))]
    pub async fn add_comment(&self, id: ComplaintId, comment: &str) -> Result<Complaint, ApiError> {
        self.client
            .patch(
                &format!("{BASE}/{id}/comment"),
                &json!({ "commentaire": comment }),
            )
            .await
    }

    /// The support users réclamations can be assigned to.
    ///
    /// Lives under the demandes resource on the backend.
    ///
    /// # Errors
    ///
    /// Propagates the backend's failure untranslated.
    pub async fn support_users(&self) -> Result<Vec<User>, ApiError> {
        self.client.get("demandes/support-users").await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_complaint() {
        let complaint: Complaint = serde_json::from_str(
            r#"{
                "id": 5,
                "objet": "Retard de traitement",
                "contenu": "Ma demande est en attente depuis un mois.",
                "statut": "AFFECTEE",
                "dateSoumission": "2025-02-01T08:00:00",
                "utilisateur": {
                    "id": 7,
                    "firstName": "Ahmed",
                    "lastName": "Ben Ali",
                    "email": "a.benali@micepp.gov.ma"
                },
                "assignedTo": {
                    "id": 4,
                    "firstName": "Fatima",
                    "lastName": "Zahra",
                    "email": "f.zahra@micepp.gov.ma"
                },
                "commentaire": "Prise en charge"
            }"#,
        )
        .unwrap();

        assert_eq!(complaint.statut, ComplaintStatus::Affectee);
        assert_eq!(complaint.assigned_to.unwrap().id, UserId::new(4));
    }

    #[test]
    fn test_unassigned_complaint() {
        let complaint: Complaint = serde_json::from_str(
            r#"{
                "id": 6,
                "objet": "Objet",
                "contenu": "Contenu",
                "statut": "EN_ATTENTE",
                "utilisateur": {
                    "id": 7,
                    "firstName": "A",
                    "lastName": "B",
                    "email": "a@b.c"
                },
                "assignedTo": null
            }"#,
        )
        .unwrap();

        assert!(complaint.assigned_to.is_none());
        assert!(complaint.commentaire.is_none());
    }

    #[test]
    fn test_assign_paths() {
        let assigned = format!("{BASE}/{}/assign/{}", ComplaintId::new(5), UserId::new(4));
        assert_eq!(assigned, "Reclamation/5/assign/4");

        let unassigned = format!("{BASE}/{}/assign/null", ComplaintId::new(5));
        assert_eq!(unassigned, "Reclamation/5/assign/null");
    }
}
