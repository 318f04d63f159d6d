//! Root component: service bootstrap, auth event loop, and page routing.

use std::sync::Arc;

use dioxus::prelude::*;
use tokio::sync::broadcast::error::RecvError;

use zenjournal_core::config::BootstrapConfig;
use zenjournal_core::insight::GeminiInsightClient;

use crate::components::Navbar;
use crate::services::{AuthEvent, EntryService, SupabaseAuthService};
use crate::state::{AppState, Page};
use crate::views::{Dashboard, Editor, Landing};

#[component]
pub fn App() -> Element {
    let page = use_signal(|| Page::Landing);
    let current_user = use_signal(|| None);
    let editing_entry = use_signal(|| None);
    let auth_service = use_signal(|| None);
    let entry_service = use_signal(|| None);
    let insight_client = use_signal(|| None);
    let init_error = use_signal(|| None::<String>);
    let mut initializing = use_signal(|| true);

    let mut state = use_context_provider(|| AppState {
        page,
        current_user,
        editing_entry,
        auth_service,
        entry_service,
        insight_client,
        init_error,
    });

    // One-shot bootstrap: build the services from the environment, restore
    // any persisted session, then keep listening for auth notifications for
    // the lifetime of the app.
    use_future(move || async move {
        let config = BootstrapConfig::from_env();

        // The insight client always exists; without a key it serves
        // fallback text instead of calling out.
        state
            .insight_client
            .set(Some(Arc::new(GeminiInsightClient::new(
                config.gemini_api_key.clone(),
            ))));

        let auth = match SupabaseAuthService::new_from_config(&config) {
            Ok(Some(auth)) => auth,
            Ok(None) => {
                state
                    .init_error
                    .set(Some("Supabase is not configured.".to_string()));
                initializing.set(false);
                return;
            }
            Err(error) => {
                tracing::error!("Auth service init failed: {}", error);
                state.init_error.set(Some(error.to_string()));
                initializing.set(false);
                return;
            }
        };

        match EntryService::new_from_config(&config, auth.clone()) {
            Ok(Some(service)) => state.entry_service.set(Some(Arc::new(service))),
            Ok(None) => {}
            Err(error) => {
                tracing::error!("Entry service init failed: {}", error);
                state.init_error.set(Some(error.to_string()));
            }
        }

        // Subscribe before the startup session check so a sign-in racing
        // the restore is never dropped.
        let mut events = auth.subscribe();

        match auth.current_user().await {
            Ok(Some(user)) => {
                tracing::info!("Restored session for {}", user.email);
                state.current_user.set(Some(user));
                state.page.set(Page::Dashboard);
            }
            Ok(None) => state.page.set(Page::Landing),
            Err(error) => {
                tracing::warn!("Session restore failed: {}", error);
                state.page.set(Page::Landing);
            }
        }

        state.auth_service.set(Some(Arc::new(auth)));
        initializing.set(false);

        loop {
            match events.recv().await {
                Ok(AuthEvent::SignedIn(user)) => {
                    state.current_user.set(Some(user));
                    state.navigate_dashboard();
                }
                Ok(AuthEvent::SignedOut) => {
                    state.current_user.set(None);
                    state.navigate_landing();
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Auth event stream lagged, skipped {}", skipped);
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let body = if initializing() {
        rsx! {
            div {
                style: "padding: 120px 0; text-align: center; color: #94a3b8;",
                "Preparing your journal..."
            }
        }
    } else if (state.current_user)().is_none() {
        // Unauthenticated renders the landing page regardless of the
        // recorded page, so a sign-out anywhere lands there.
        rsx! { Landing {} }
    } else {
        match (state.page)() {
            Page::Landing => rsx! { Landing {} },
            Page::Dashboard => rsx! { Dashboard {} },
            Page::New | Page::Edit => rsx! { Editor {} },
        }
    };

    rsx! {
        div {
            style: "
                min-height: 100vh;
                background: #f8fafc;
                font-family: 'Segoe UI', system-ui, sans-serif;
            ",
            Navbar {}

            if let Some(message) = (state.init_error)() {
                p {
                    style: "
                        margin: 16px auto 0 auto;
                        max-width: 640px;
                        padding: 10px 14px;
                        background: #fffbeb;
                        border: 1px solid #fde68a;
                        border-radius: 10px;
                        color: #b45309;
                        font-size: 13px;
                        text-align: center;
                    ",
                    "{message}"
                }
            }

            {body}

            footer {
                style: "padding: 28px 0; text-align: center; color: #cbd5e1; font-size: 12px;",
                "ZenJournal · a quiet place for loud thoughts"
            }
        }
    }
}
