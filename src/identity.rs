//! Browser Identity
//!
//! Reads the session record the identity SDK leaves in local storage and
//! sends the user to the login page when asked.

use board_core::identity::{IdentityProvider, Session};
use board_core::repository::KeyValueStore;
use serde::Deserialize;

use crate::storage::BrowserStorage;

pub const USER_DATA_KEY: &str = "userData";

/// Shape of the `userData` record. Only the display name is guaranteed.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserData {
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    username: String,
    #[serde(default)]
    email: String,
}

impl From<UserData> for Session {
    fn from(data: UserData) -> Self {
        // The account username is the mail address unless one is given.
        let email = if data.email.is_empty() { data.username.clone() } else { data.email };
        Session {
            display_name: data.display_name,
            username: data.username,
            email,
        }
    }
}

pub struct BrowserIdentity {
    storage: BrowserStorage,
    login_url: String,
}

impl BrowserIdentity {
    pub fn new(login_url: &str) -> Self {
        Self { storage: BrowserStorage, login_url: login_url.to_string() }
    }

    /// Forget the stored session.
    pub fn sign_out(&self) {
        if let Err(e) = self.storage.remove(USER_DATA_KEY) {
            log::warn!("[AUTH] Could not clear session: {}", e);
        }
    }
}

impl IdentityProvider for BrowserIdentity {
    fn session(&self) -> Option<Session> {
        let raw = self.storage.get(USER_DATA_KEY)?;
        match serde_json::from_str::<UserData>(&raw) {
            Ok(data) if !data.display_name.is_empty() => Some(data.into()),
            Ok(_) => None,
            Err(e) => {
                log::warn!("[AUTH] Ignoring malformed session record: {}", e);
                None
            }
        }
    }

    fn begin_login(&self) {
        log::info!("[AUTH] Redirecting to login");
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(e) = window.location().set_href(&self.login_url) {
            log::error!("[AUTH] Redirect failed: {:?}", e);
        }
    }
}
