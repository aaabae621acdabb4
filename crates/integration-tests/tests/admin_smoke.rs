//! Smoke tests for the domain CRUD gateways.
//!
//! These tests require a running AOS backend with an admin test account.
//!
//! Run with: `cargo test -p aos-micepp-integration-tests -- --ignored`

use secrecy::SecretString;

use aos_micepp_client::services::auth;
use aos_micepp_client::services::catalog::ServiceCatalog;
use aos_micepp_client::services::complaints::ComplaintsService;
use aos_micepp_client::services::requests::RequestsService;
use aos_micepp_client::services::users::UserDirectory;
use aos_micepp_client::{ApiClient, Session};
use aos_micepp_integration_tests::{client_with_state_dir, test_credentials};

async fn admin_client(dir: &std::path::Path) -> (Session, ApiClient) {
    let (session, client) = client_with_state_dir(dir);
    let (email, password) = test_credentials();
    auth::login(&client, &email, &SecretString::from(password))
        .await
        .expect("login should succeed");
    (session, client)
}

#[tokio::test]
#[ignore = "Requires running AOS backend and admin credentials"]
async fn test_user_directory_list_and_count() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (_session, client) = admin_client(dir.path()).await;
    let directory = UserDirectory::new(&client);

    let users = directory.list().await.expect("list users");
    let count = directory.count().await.expect("count users");

    assert_eq!(users.len() as u64, count);
}

#[tokio::test]
#[ignore = "Requires running AOS backend and admin credentials"]
async fn test_requests_counters_are_consistent() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (_session, client) = admin_client(dir.path()).await;
    let requests = RequestsService::new(&client);

    let total = requests.count().await.expect("count");
    let pending = requests.count_pending().await.expect("count pending");

    assert!(pending <= total);
}

#[tokio::test]
#[ignore = "Requires running AOS backend and admin credentials"]
async fn test_complaints_list_parses() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (_session, client) = admin_client(dir.path()).await;

    let complaints = ComplaintsService::new(&client)
        .list()
        .await
        .expect("list complaints");

    for complaint in complaints {
        assert!(!complaint.objet.is_empty());
    }
}

#[tokio::test]
#[ignore = "Requires running AOS backend and admin credentials"]
async fn test_catalog_types_available() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (_session, client) = admin_client(dir.path()).await;

    let types = ServiceCatalog::new(&client).types().await.expect("types");
    assert!(!types.is_empty());
}

#[tokio::test]
#[ignore = "Requires running AOS backend"]
async fn test_unauthenticated_domain_call_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (session, client) = client_with_state_dir(dir.path());
    assert!(!session.is_authenticated());

    // The client forwards the call without a token; the backend enforces.
    let result = UserDirectory::new(&client).list().await;
    let status = result.expect_err("should be rejected").status();
    assert!(matches!(status, Some(401 | 403)));
}
