//! Bearer token codec.
//!
//! Reads the expiry claim out of a server-issued bearer token so the client
//! can decide locally whether a stored session is still worth presenting.
//! The signature is NOT verified here: the backend is the trust anchor and
//! rejects forged or stale tokens itself; this decode is advisory (it only
//! spares the user a round trip that would come back 401).

use base64::Engine;
use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};
use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while decoding a token's claims.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The token is not three dot-separated segments.
    #[error("token is not three dot-separated segments")]
    Malformed,
    /// The claims segment is not valid base64url.
    #[error("claims segment is not valid base64url")]
    InvalidBase64,
    /// The claims segment is not a JSON object with a numeric `exp` field.
    #[error("claims segment has no usable exp field")]
    InvalidClaims,
}

#[derive(Deserialize)]
struct Claims {
    /// Expiry, seconds since the Unix epoch.
    exp: i64,
}

/// Decode the expiry timestamp (seconds since epoch) from a bearer token.
///
/// # Errors
///
/// Returns [`TokenError`] for anything that is not a three-segment token
/// whose second segment base64url-decodes to JSON with a numeric `exp`.
pub fn expires_at(token: &str) -> Result<i64, TokenError> {
    let mut segments = token.split('.');
    let (Some(_header), Some(claims), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(TokenError::Malformed);
    };

    // Issuers differ on padding; accept both forms.
    let decoded = URL_SAFE_NO_PAD
        .decode(claims)
        .or_else(|_| URL_SAFE.decode(claims))
        .map_err(|_| TokenError::InvalidBase64)?;

    let claims: Claims =
        serde_json::from_slice(&decoded).map_err(|_| TokenError::InvalidClaims)?;

    Ok(claims.exp)
}

/// Whether the token is expired at `now` (seconds since epoch).
///
/// Fails closed: any token that cannot be decoded is treated as expired.
#[must_use]
pub fn is_expired_at(token: &str, now: i64) -> bool {
    match expires_at(token) {
        Ok(exp) => exp <= now,
        Err(_) => true,
    }
}

/// Whether the token is expired right now.
///
/// Fails closed on malformed input, like [`is_expired_at`].
#[must_use]
pub fn is_expired(token: &str) -> bool {
    is_expired_at(token, Utc::now().timestamp())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;

    /// Build an unsigned test token with the given claims JSON.
    pub(crate) fn token_with_claims(claims: &str) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(claims.as_bytes());
        format!("{header}.{payload}.sig")
    }

    /// Build an unsigned test token expiring at the given timestamp.
    pub(crate) fn token_expiring_at(exp: i64) -> String {
        token_with_claims(&format!(r#"{{"sub":"4","exp":{exp}}}"#))
    }

    #[test]
    fn test_future_exp_is_not_expired() {
        let token = token_expiring_at(2_000_000_000);
        assert!(!is_expired_at(&token, 1_000_000_000));
        assert_eq!(expires_at(&token).unwrap(), 2_000_000_000);
    }

    #[test]
    fn test_past_exp_is_expired() {
        let token = token_expiring_at(1_000_000_000);
        assert!(is_expired_at(&token, 2_000_000_000));
    }

    #[test]
    fn test_exp_boundary_is_expired() {
        // exp == now counts as expired.
        let token = token_expiring_at(1_000_000_000);
        assert!(is_expired_at(&token, 1_000_000_000));
    }

    #[test]
    fn test_padded_base64_is_accepted() {
        let payload = URL_SAFE.encode(br#"{"exp":2000000000}"#);
        let token = format!("h.{payload}.s");
        assert!(!is_expired_at(&token, 1_000_000_000));
    }

    #[test]
    fn test_wrong_segment_count_fails_closed() {
        assert!(is_expired_at("only-one-segment", 0));
        assert!(is_expired_at("two.segments", 0));
        assert!(is_expired_at("a.b.c.d", 0));
        assert!(matches!(expires_at("a.b"), Err(TokenError::Malformed)));
    }

    #[test]
    fn test_bad_base64_fails_closed() {
        assert!(is_expired_at("header.%%%%.sig", 0));
        assert!(matches!(
            expires_at("header.%%%%.sig"),
            Err(TokenError::InvalidBase64)
        ));
    }

    #[test]
    fn test_non_json_claims_fail_closed() {
        let payload = URL_SAFE_NO_PAD.encode(b"not json");
        assert!(is_expired_at(&format!("h.{payload}.s"), 0));
    }

    #[test]
    fn test_missing_exp_fails_closed() {
        let token = token_with_claims(r#"{"sub":"4"}"#);
        assert!(is_expired_at(&token, 0));
        assert!(matches!(expires_at(&token), Err(TokenError::InvalidClaims)));
    }

    #[test]
    fn test_empty_token_fails_closed() {
        assert!(is_expired_at("", 0));
    }
}
