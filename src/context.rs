//! Application Context
//!
//! Services and page switching shared via Leptos Context API.

use std::rc::Rc;

use board_core::{BoardConfig, ReportClient, ReqwestTransport};
use leptos::prelude::*;

use crate::identity::BrowserIdentity;
use crate::storage::{BrowserStorage, Preferences};

pub type Api = ReportClient<ReqwestTransport>;

/// The two pages behind the header toggle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Page {
    #[default]
    Board,
    Attendance,
}

/// Browser-bound services; `Rc` keeps them on the UI thread.
struct Services {
    api: Rc<Api>,
    identity: Rc<BrowserIdentity>,
}

/// App-wide services and signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    config: StoredValue<BoardConfig>,
    prefs: StoredValue<Preferences>,
    services: StoredValue<Services, LocalStorage>,
    /// Current page - read
    pub page: ReadSignal<Page>,
    /// Current page - write
    set_page: WriteSignal<Page>,
}

impl AppContext {
    pub fn new(page: (ReadSignal<Page>, WriteSignal<Page>)) -> Self {
        // The stored override decides the config the real preference store uses.
        let bootstrap = Preferences::new(BrowserStorage, &BoardConfig::default());
        let config = BoardConfig::with_override(bootstrap.config_override().as_deref());
        let prefs = Preferences::new(BrowserStorage, &config);

        let identity = Rc::new(BrowserIdentity::new(&config.login_url));
        let api = Rc::new(ReportClient::new(
            ReqwestTransport::new(),
            config.clone(),
            Rc::new(prefs.clone()),
            identity.clone(),
        ));

        Self {
            config: StoredValue::new(config),
            prefs: StoredValue::new(prefs),
            services: StoredValue::new_local(Services { api, identity }),
            page: page.0,
            set_page: page.1,
        }
    }

    pub fn config(&self) -> BoardConfig {
        self.config.get_value()
    }

    pub fn prefs(&self) -> Preferences {
        self.prefs.get_value()
    }

    pub fn api(&self) -> Rc<Api> {
        self.services.with_value(|s| s.api.clone())
    }

    pub fn identity(&self) -> Rc<BrowserIdentity> {
        self.services.with_value(|s| s.identity.clone())
    }

    pub fn show_page(&self, page: Page) {
        self.set_page.set(page);
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
