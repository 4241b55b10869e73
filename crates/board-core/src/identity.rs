//! Identity seam.
//!
//! Login itself happens elsewhere; the board only asks whether someone is
//! signed in and who they are.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Signed-in user as the identity provider reports it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub display_name: String,
    pub username: String,
    pub email: String,
}

impl Session {
    /// Status changes are attributed by name and email; both must be known.
    pub fn is_complete(&self) -> bool {
        !self.display_name.trim().is_empty() && !self.email.trim().is_empty()
    }
}

pub trait IdentityProvider {
    /// Current session, if a valid one exists.
    fn session(&self) -> Option<Session>;

    /// Start the interactive login flow.
    fn begin_login(&self);
}

impl<T: IdentityProvider + ?Sized> IdentityProvider for Rc<T> {
    fn session(&self) -> Option<Session> {
        (**self).session()
    }

    fn begin_login(&self) {
        (**self).begin_login()
    }
}

/// Fixed identity, used where no provider is wired in.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    session: Option<Session>,
}

impl StaticIdentity {
    pub fn signed_in(session: Session) -> Self {
        Self { session: Some(session) }
    }

    pub fn anonymous() -> Self {
        Self { session: None }
    }
}

impl IdentityProvider for StaticIdentity {
    fn session(&self) -> Option<Session> {
        self.session.clone()
    }

    fn begin_login(&self) {
        log::info!("Login requested without an identity provider");
    }
}
