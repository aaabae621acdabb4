//! The role model.
//!
//! Roles arrive over the wire either bare (`"ADMIN"`) or carrying the
//! backend's authority prefix (`"ROLE_ADMIN"`). Both forms denote the same
//! role; the prefix is stripped exactly once, here, at parse time. Everything
//! downstream compares plain enum values.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Authority prefix some backend responses attach to role names.
const ROLE_PREFIX: &str = "ROLE_";

/// Error returned when a wire string names no known role.
#[derive(thiserror::Error, Debug, Clone)]
#[error("unknown role: {0}")]
pub struct RoleError(pub String);

/// Capability tier attached to an identity.
///
/// Closed enumeration: unknown wire values are a deserialization error, not a
/// silently-carried string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Full platform administration.
    Admin,
    /// Support desk: handles assigned requests and complaints.
    Support,
    /// Regular staff member submitting requests.
    Agent,
    /// Historical read-only tier, still present in stored identities.
    Visitor,
}

impl Role {
    /// Parse a wire role string, tolerating the `ROLE_` prefix.
    ///
    /// Parsing an already-bare value is a no-op with respect to the prefix,
    /// so the operation is idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`RoleError`] if the string names no known role.
    pub fn parse(s: &str) -> Result<Self, RoleError> {
        let bare = s.strip_prefix(ROLE_PREFIX).unwrap_or(s);
        match bare {
            "ADMIN" => Ok(Self::Admin),
            "SUPPORT" => Ok(Self::Support),
            "AGENT" => Ok(Self::Agent),
            "VISITOR" => Ok(Self::Visitor),
            _ => Err(RoleError(s.to_owned())),
        }
    }

    /// The bare (unprefixed) wire name of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Support => "SUPPORT",
            Self::Agent => "AGENT",
            Self::Visitor => "VISITOR",
        }
    }

    /// Whether this role satisfies a single required role.
    #[must_use]
    pub fn matches(&self, required: Self) -> bool {
        *self == required
    }

    /// Whether this role satisfies any of the required roles.
    ///
    /// An empty requirement list means the target is unrestricted, so every
    /// role satisfies it.
    #[must_use]
    pub fn matches_any(&self, required: &[Self]) -> bool {
        required.is_empty() || required.contains(self)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare() {
        assert_eq!(Role::parse("ADMIN").unwrap(), Role::Admin);
        assert_eq!(Role::parse("SUPPORT").unwrap(), Role::Support);
        assert_eq!(Role::parse("AGENT").unwrap(), Role::Agent);
        assert_eq!(Role::parse("VISITOR").unwrap(), Role::Visitor);
    }

    #[test]
    fn test_parse_prefixed() {
        assert_eq!(Role::parse("ROLE_ADMIN").unwrap(), Role::Admin);
        assert_eq!(Role::parse("ROLE_SUPPORT").unwrap(), Role::Support);
    }

    #[test]
    fn test_parse_is_idempotent() {
        // Normalizing an already-normalized value is a no-op.
        let once = Role::parse("ROLE_AGENT").unwrap();
        let twice = Role::parse(once.as_str()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_parse_unknown() {
        assert!(Role::parse("SUPERUSER").is_err());
        assert!(Role::parse("").is_err());
        // Lowercase is not a wire form the backend emits.
        assert!(Role::parse("admin").is_err());
    }

    #[test]
    fn test_matches_reflexive_across_prefix_forms() {
        for wire in ["ADMIN", "ROLE_ADMIN"] {
            let role = Role::parse(wire).unwrap();
            assert!(role.matches(Role::Admin));
        }
        assert!(!Role::Support.matches(Role::Admin));
    }

    #[test]
    fn test_matches_any_empty_is_unrestricted() {
        assert!(Role::Agent.matches_any(&[]));
        assert!(Role::Visitor.matches_any(&[]));
    }

    #[test]
    fn test_matches_any() {
        assert!(Role::Support.matches_any(&[Role::Admin, Role::Support]));
        assert!(!Role::Agent.matches_any(&[Role::Admin, Role::Support]));
    }

    #[test]
    fn test_serde_emits_bare_form() {
        let json = serde_json::to_string(&Role::Admin).unwrap();
        assert_eq!(json, "\"ADMIN\"");
    }

    #[test]
    fn test_serde_accepts_both_wire_forms() {
        let bare: Role = serde_json::from_str("\"SUPPORT\"").unwrap();
        let prefixed: Role = serde_json::from_str("\"ROLE_SUPPORT\"").unwrap();
        assert_eq!(bare, prefixed);
    }

    #[test]
    fn test_serde_rejects_unknown() {
        assert!(serde_json::from_str::<Role>("\"ROLE_WIZARD\"").is_err());
    }
}
