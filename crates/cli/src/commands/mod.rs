//! Command implementations.

pub mod auth;
pub mod complaints;
pub mod content;
pub mod requests;
pub mod users;

use aos_micepp_client::{ApiClient, ClientConfig, Navigator, Session, Storage};

/// Everything a command needs: the session, the API gateway and the
/// navigator that gates screen access.
pub struct Context {
    pub session: Session,
    pub client: ApiClient,
    pub navigator: Navigator,
}

impl Context {
    /// Build the context from the environment, re-hydrating any persisted
    /// session.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the state
    /// directory cannot be opened.
    pub fn init() -> Result<Self, Box<dyn std::error::Error>> {
        let config = ClientConfig::from_env()?;
        let session = Session::open(Storage::open(&config.state_dir)?);
        let client = ApiClient::new(&config, session.clone())?;
        let navigator = Navigator::new(session.clone());

        Ok(Self {
            session,
            client,
            navigator,
        })
    }

    /// Gate a command behind its screen, exactly as the web client's router
    /// would. Denials report where the user was redirected instead.
    ///
    /// # Errors
    ///
    /// Returns an error naming the redirect target when the guard denies.
    pub fn enter_screen(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let nav = self.navigator.navigate(path);
        if nav.reached_target() {
            return Ok(());
        }
        Err(format!(
            "accès refusé à {path} : redirigé vers {}",
            nav.destination.path
        )
        .into())
    }
}
