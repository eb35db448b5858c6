use std::sync::Arc;

use tokio::sync::watch;

/// Authentication state shared by everything that talks to the API.
///
/// Cloning yields another handle to the same session. Starts
/// unauthenticated; [`login`](Self::login) stores a bearer token and
/// [`logout`](Self::logout) (also triggered by a 401 from the API) clears it.
/// Observers can [`subscribe`](Self::subscribe) to react to logout.
#[derive(Debug, Clone)]
pub struct Session {
    token: Arc<watch::Sender<Option<String>>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            token: Arc::new(tx),
        }
    }

    /// A session restored from a previously issued token. Blank tokens are
    /// ignored.
    pub fn with_token(token: Option<String>) -> Self {
        let session = Self::new();
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            session.login(token);
        }
        session
    }

    pub fn login(&self, token: String) {
        self.token.send_replace(Some(token));
        tracing::info!("Session authenticated");
    }

    pub fn logout(&self) {
        if self.token.send_replace(None).is_some() {
            tracing::info!("Session cleared");
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.borrow().is_some()
    }

    pub fn token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    /// Receiver that observes every login/logout.
    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.token.subscribe()
    }
}
