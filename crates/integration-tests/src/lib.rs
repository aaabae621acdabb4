//! Integration tests for the AOS MICEPP client.
//!
//! These tests run against a live backend and are `#[ignore]`d by default.
//!
//! # Running Tests
//!
//! ```bash
//! # Point the client at a running backend
//! export AOS_API_URL=http://localhost:8089/AOS_MICEPP
//! export AOS_TEST_EMAIL=admin@micepp.gov.ma
//! export AOS_TEST_PASSWORD=...
//!
//! cargo test -p aos-micepp-integration-tests -- --ignored
//! ```

use std::path::Path;
use std::time::Duration;

use aos_micepp_client::{ApiClient, ClientConfig, Session, Storage};

/// Base URL for the backend (configurable via environment).
#[must_use]
pub fn api_base_url() -> String {
    std::env::var("AOS_API_URL")
        .unwrap_or_else(|_| "http://localhost:8089/AOS_MICEPP".to_string())
}

/// Credentials of the test account, from the environment.
///
/// # Panics
///
/// Panics when the variables are missing; the tests requiring them are
/// `#[ignore]`d, so this only fires when explicitly opted in.
#[must_use]
pub fn test_credentials() -> (String, String) {
    let email = std::env::var("AOS_TEST_EMAIL").expect("AOS_TEST_EMAIL must be set");
    let password = std::env::var("AOS_TEST_PASSWORD").expect("AOS_TEST_PASSWORD must be set");
    (email, password)
}

/// Build a client whose session state lives in the given directory, so each
/// test starts from a clean, isolated session.
///
/// # Panics
///
/// Panics if the configuration is invalid or the directory unusable.
#[must_use]
pub fn client_with_state_dir(state_dir: &Path) -> (Session, ApiClient) {
    let config = ClientConfig {
        api_url: url::Url::parse(&format!("{}/", api_base_url().trim_end_matches('/')))
            .expect("invalid AOS_API_URL"),
        state_dir: state_dir.to_path_buf(),
        http_timeout: Duration::from_secs(30),
    };

    let session = Session::open(Storage::open(&config.state_dir).expect("state dir unusable"));
    let client = ApiClient::new(&config, session.clone()).expect("client build failed");
    (session, client)
}
