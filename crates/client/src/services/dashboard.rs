//! Dashboard statistics (`/admin/dashboard`).

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::instrument;

use aos_micepp_core::UserId;

use crate::client::ApiClient;
use crate::error::ApiError;

const BASE: &str = "admin/dashboard";

/// Aggregate platform statistics.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_users: u64,
    pub total_requests: u64,
    pub pending_requests: u64,
    pub completed_requests: u64,
    #[serde(default)]
    pub satisfaction_rate: f64,
    #[serde(default)]
    pub users_change_this_month: i64,
    #[serde(default)]
    pub requests_change_today: i64,
    #[serde(default)]
    pub satisfaction_change_this_month: f64,
    #[serde(default)]
    pub average_resolution_time: f64,
}

/// Health of one platform component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentHealth {
    Online,
    Offline,
    Warning,
}

/// Storage health plus usage.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageHealth {
    pub status: ComponentHealth,
    #[serde(default)]
    pub usage_percentage: f64,
}

/// Health snapshot of the backend's components.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStatus {
    pub server: ComponentHealth,
    pub database: ComponentHealth,
    pub storage: StorageHealth,
    pub api: ComponentHealth,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

/// Per-user activity statistics.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub processed_requests: u64,
    #[serde(default)]
    pub average_response_time: f64,
    #[serde(default)]
    pub completion_rate: f64,
    #[serde(default)]
    pub last_activity: Option<DateTime<Utc>>,
}

/// Handle to a generated report.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportHandle {
    pub report_url: String,
}

/// Dashboard gateway.
pub struct DashboardService<'a> {
    client: &'a ApiClient,
}

impl<'a> DashboardService<'a> {
    #[must_use]
    pub const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Aggregate statistics.
    ///
    /// # Errors
    ///
    /// Propagates the backend's failure untranslated.
    pub async fn stats(&self) -> Result<DashboardStats, ApiError> {
        self.client.get(&format!("{BASE}/stats")).await
    }

    /// Current component health.
    ///
    /// # Errors
    ///
    /// Propagates the backend's failure untranslated.
    pub async fn system_status(&self) -> Result<SystemStatus, ApiError> {
        self.client.get(&format!("{BASE}/system-status")).await
    }

    /// Ask the backend to re-probe component health.
    ///
    /// # Errors
    ///
    /// Propagates the backend's failure untranslated.
    #[instrument(skip(self))]
    pub async fn refresh_system_status(&self) -> Result<SystemStatus, ApiError> {
        self.client
            .post_empty(&format!("{BASE}/system-status/refresh"))
            .await
    }

    /// Activity statistics for one user.
    ///
    /// # Errors
    ///
    /// Propagates the backend's failure untranslated.
    pub async fn user_stats(&self, user_id: UserId) -> Result<UserStats, ApiError> {
        self.client.get(&format!("{BASE}/user-stats/{user_id}")).await
    }

    /// Generate the periodic activity report.
    ///
    /// # Errors
    ///
    /// Propagates the backend's failure untranslated.
    #[instrument(skip(self))]
    pub async fn generate_reports(&self) -> Result<ReportHandle, ApiError> {
        self.client
            .post_empty(&format!("{BASE}/reports/generate"))
            .await
    }
}
