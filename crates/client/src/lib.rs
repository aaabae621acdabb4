//! AOS MICEPP Client - session, guard policy and HTTP services.
//!
//! Client-side core of the AOS MICEPP service-request and complaints
//! platform. The remote REST backend is the trust anchor; this crate
//! implements everything that runs on the operator's machine:
//!
//! - [`session`] - the authenticated session, persisted to a local state
//!   file and re-hydrated across restarts
//! - [`token`] - advisory expiry decoding of the server-issued bearer token
//! - [`guards`] / [`routes`] / [`nav`] - pure navigation policy plus the one
//!   adapter that acts on it
//! - [`client`] - the HTTP gateway attaching `Authorization: Bearer`
//! - [`services`] - one thin gateway per backend resource
//!
//! # Example
//!
//! ```rust,no_run
//! use aos_micepp_client::{ApiClient, ClientConfig, Navigator, Session, Storage};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::from_env()?;
//! let session = Session::open(Storage::open(&config.state_dir)?);
//! let client = ApiClient::new(&config, session.clone())?;
//!
//! let nav = Navigator::new(session).navigate("/admin/dashboard");
//! if nav.reached_target() {
//!     let stats = aos_micepp_client::services::dashboard::DashboardService::new(&client)
//!         .stats()
//!         .await?;
//!     println!("{} demandes en attente", stats.pending_requests);
//! }
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod client;
pub mod config;
pub mod error;
pub mod guards;
pub mod nav;
pub mod routes;
pub mod services;
pub mod session;
pub mod storage;
pub mod token;

pub use client::ApiClient;
pub use config::{ClientConfig, ConfigError};
pub use error::ApiError;
pub use guards::GuardDecision;
pub use nav::{Navigation, Navigator};
pub use routes::{Access, ScreenSpec, paths};
pub use session::Session;
pub use storage::{Storage, StorageError};
