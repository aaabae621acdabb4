//! The identity record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::email::Email;
use super::id::UserId;
use super::role::Role;

/// A platform user as the backend's admin directory returns it.
///
/// Wire names follow the backend DTO: `firstname`/`lastname` are lowercase,
/// the rest is camelCase. The session owns one instance exclusively once
/// loaded; directory calls return independent copies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: Email,
    #[serde(rename = "firstname", alias = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastname", alias = "lastName")]
    pub last_name: String,
    pub role: Role,
    /// Account is active (not disabled by an administrator).
    #[serde(default = "default_enabled", alias = "isActive")]
    pub enabled: bool,
    #[serde(default, alias = "phoneNumber")]
    pub phone: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    /// National identity card number.
    #[serde(default)]
    pub cin: Option<String>,
    /// Internal staff number.
    #[serde(default)]
    pub matricule: Option<String>,
    /// Set while the account still uses the provisioning password.
    #[serde(default)]
    pub using_temporary_password: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

const fn default_enabled() -> bool {
    true
}

impl User {
    /// The user's display name.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "id": 4,
            "email": "f.zahra@micepp.gov.ma",
            "firstname": "Fatima",
            "lastname": "Zahra",
            "role": "ROLE_SUPPORT",
            "enabled": true,
            "phone": "0612345678",
            "department": "Support",
            "cin": "AB123456",
            "matricule": "M-0042",
            "usingTemporaryPassword": false
        }"#
    }

    #[test]
    fn test_deserialize_backend_dto() {
        let user: User = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(user.id, UserId::new(4));
        assert_eq!(user.first_name, "Fatima");
        assert_eq!(user.role, Role::Support);
        assert!(user.enabled);
        assert_eq!(user.matricule.as_deref(), Some("M-0042"));
        assert!(user.created_at.is_none());
    }

    #[test]
    fn test_role_normalized_at_deserialization() {
        // The ROLE_ prefix never survives into the record.
        let user: User = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(serde_json::to_value(user.role).unwrap(), "SUPPORT");
    }

    #[test]
    fn test_serde_round_trip() {
        let user: User = serde_json::from_str(sample_json()).unwrap();
        let json = serde_json::to_string(&user).unwrap();
        let back: User = serde_json::from_str(&json).unwrap();
        assert_eq!(user, back);
    }

    #[test]
    fn test_full_name() {
        let user: User = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(user.full_name(), "Fatima Zahra");
    }

    #[test]
    fn test_minimal_record() {
        // Directory responses omit optional fields freely.
        let user: User = serde_json::from_str(
            r#"{"id":1,"email":"a@b.c","firstname":"A","lastname":"B","role":"AGENT"}"#,
        )
        .unwrap();
        assert!(user.enabled);
        assert!(user.phone.is_none());
        assert!(!user.using_temporary_password);
    }
}
