//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::chat::ChatTranscript;
use crate::notice::NoticeBoard;

/// UI state that outlives any single page
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Toasts currently on screen
    pub notices: NoticeBoard,
    /// Dashboard assistant conversation, kept while navigating
    pub transcript: ChatTranscript,
}

pub type AppStore = Store<AppState>;

pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}
