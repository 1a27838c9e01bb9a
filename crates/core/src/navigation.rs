//! Navigation seam
//!
//! Session-ending paths need the current location and a way to leave the
//! page entirely. The browser implements this over `window.location`.

use crate::routes::paths;
use crate::session::TokenStore;
use tracing::warn;

/// Access to the current location
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    /// Path of the current location, without origin
    fn current_path(&self) -> String;

    /// Full page navigation; in-memory state does not survive it
    fn hard_redirect(&self, path: &str);
}

/// End the session and send the user to the login page
pub fn force_login(tokens: &TokenStore, navigator: &dyn Navigator) {
    warn!(from = %navigator.current_path(), "Session ended, redirecting to login");
    tokens.clear();
    navigator.hard_redirect(paths::LOGIN);
}
