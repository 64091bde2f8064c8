//! Application Context
//!
//! Services and app-wide signals provided via Leptos Context API.

use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::ApiClient;
use crate::cache::{CacheKey, QueryCache};
use crate::config::AppConfig;
use crate::notice::NoticeKind;
use crate::pages::Page;
use crate::session::{AuthState, Session};
use crate::store::{AppStateStoreFields, AppStore};

/// Browser-side services. Not `Send`, so kept in local storage.
#[derive(Clone)]
pub struct Services {
    pub config: AppConfig,
    pub api: ApiClient,
    pub cache: QueryCache,
    pub session: Rc<Session>,
}

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    services: StoredValue<Services, LocalStorage>,
    /// Bumped whenever the cache invalidates the matching key
    versions: [RwSignal<u32>; CacheKey::ALL.len()],
    pub auth: RwSignal<AuthState>,
    pub page: RwSignal<Page>,
    pub store: AppStore,
}

impl AppContext {
    /// Wire cache invalidations to per-key reload signals.
    pub fn new(services: Services, store: AppStore) -> Self {
        let versions: [RwSignal<u32>; CacheKey::ALL.len()] = std::array::from_fn(|_| RwSignal::new(0));
        for key in CacheKey::ALL {
            let version = versions[key.index()];
            services.cache.subscribe(key, move |_| version.update(|v| *v += 1));
        }

        Self {
            auth: RwSignal::new(services.session.state()),
            services: StoredValue::new_local(services),
            versions,
            page: RwSignal::new(Page::default()),
            store,
        }
    }

    pub fn api(&self) -> ApiClient {
        self.services.with_value(|s| s.api.clone())
    }

    pub fn cache(&self) -> QueryCache {
        self.services.with_value(|s| s.cache.clone())
    }

    pub fn session(&self) -> Rc<Session> {
        self.services.with_value(|s| Rc::clone(&s.session))
    }

    pub fn version(&self, key: CacheKey) -> RwSignal<u32> {
        self.versions[key.index()]
    }

    /// Copy the session state into the reactive `auth` signal.
    pub fn sync_auth(&self) {
        self.auth.set(self.session().state());
    }

    pub fn navigate(&self, page: Page) {
        self.page.set(page);
    }

    /// Show a notice and dismiss it after the configured delay.
    pub fn notify(&self, message: impl Into<String>, kind: NoticeKind) {
        let id = self.store.notices().write().push(message, kind);
        let ttl = self.services.with_value(|s| s.config.notice_ttl);
        let store = self.store;
        spawn_local(async move {
            TimeoutFuture::new(ttl.as_millis() as u32).await;
            store.notices().write().dismiss(id);
        });
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notify(message, NoticeKind::Success);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.notify(message, NoticeKind::Error);
    }
}

pub fn use_app() -> AppContext {
    expect_context::<AppContext>()
}
