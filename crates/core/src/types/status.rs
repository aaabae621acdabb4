//! Status enums for requests and complaints.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a demande (service request).
///
/// Wire values match the backend enum names (`EN_ATTENTE`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    #[default]
    EnAttente,
    EnCours,
    Acceptee,
    Refusee,
}

/// Lifecycle state of a réclamation (complaint).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplaintStatus {
    #[default]
    EnAttente,
    Affectee,
    Resolue,
    Rejetee,
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnAttente => write!(f, "EN_ATTENTE"),
            Self::EnCours => write!(f, "EN_COURS"),
            Self::Acceptee => write!(f, "ACCEPTEE"),
            Self::Refusee => write!(f, "REFUSEE"),
        }
    }
}

impl std::fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnAttente => write!(f, "EN_ATTENTE"),
            Self::Affectee => write!(f, "AFFECTEE"),
            Self::Resolue => write!(f, "RESOLUE"),
            Self::Rejetee => write!(f, "REJETEE"),
        }
    }
}

impl std::str::FromStr for RequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EN_ATTENTE" => Ok(Self::EnAttente),
            "EN_COURS" => Ok(Self::EnCours),
            "ACCEPTEE" => Ok(Self::Acceptee),
            "REFUSEE" => Ok(Self::Refusee),
            _ => Err(format!("invalid request status: {s}")),
        }
    }
}

impl std::str::FromStr for ComplaintStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EN_ATTENTE" => Ok(Self::EnAttente),
            "AFFECTEE" => Ok(Self::Affectee),
            "RESOLUE" => Ok(Self::Resolue),
            "REJETEE" => Ok(Self::Rejetee),
            _ => Err(format!("invalid complaint status: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_request_status_wire_form() {
        let json = serde_json::to_string(&RequestStatus::EnAttente).unwrap();
        assert_eq!(json, "\"EN_ATTENTE\"");

        let parsed: RequestStatus = serde_json::from_str("\"ACCEPTEE\"").unwrap();
        assert_eq!(parsed, RequestStatus::Acceptee);
    }

    #[test]
    fn test_complaint_status_wire_form() {
        let json = serde_json::to_string(&ComplaintStatus::Affectee).unwrap();
        assert_eq!(json, "\"AFFECTEE\"");
    }

    #[test]
    fn test_display_matches_wire() {
        assert_eq!(RequestStatus::EnCours.to_string(), "EN_COURS");
        assert_eq!(ComplaintStatus::Resolue.to_string(), "RESOLUE");
    }

    #[test]
    fn test_from_str_round_trip() {
        let status: RequestStatus = "REFUSEE".parse().unwrap();
        assert_eq!(status, RequestStatus::Refusee);
        assert!("INVALID".parse::<RequestStatus>().is_err());
    }
}
