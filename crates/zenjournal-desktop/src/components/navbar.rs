//! Top navigation bar

use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant};
use crate::state::AppState;

/// Brand mark plus the session controls. Sign-out navigation happens via
/// the auth event the root controller listens for, not here.
#[component]
pub fn Navbar() -> Element {
    let mut state = use_context::<AppState>();
    let user = (state.current_user)();

    let on_brand_click = move |_| {
        if state.is_authenticated() {
            state.navigate_dashboard();
        } else {
            state.navigate_landing();
        }
    };

    let on_logout = move |_| {
        let Some(auth) = (state.auth_service)() else {
            return;
        };
        spawn(async move {
            if let Err(error) = auth.sign_out().await {
                tracing::error!("Sign-out failed: {}", error);
            }
        });
    };

    rsx! {
        nav {
            style: "
                background: #ffffff;
                border-bottom: 1px solid #e5e7eb;
                padding: 0 24px;
                height: 60px;
                display: flex;
                align-items: center;
                justify-content: space-between;
            ",

            div {
                style: "display: flex; align-items: center; gap: 10px; cursor: pointer;",
                onclick: on_brand_click,
                div {
                    style: "
                        width: 32px;
                        height: 32px;
                        background: #4f46e5;
                        border-radius: 8px;
                        display: flex;
                        align-items: center;
                        justify-content: center;
                        color: #ffffff;
                        font-weight: 700;
                    ",
                    "Z"
                }
                span {
                    style: "font-size: 18px; font-weight: 700; color: #1f2937;",
                    "ZenJournal"
                }
            }

            if let Some(user) = user {
                div {
                    style: "display: flex; align-items: center; gap: 14px;",
                    span {
                        style: "font-size: 13px; color: #6b7280; font-style: italic;",
                        "Welcome, {user.name}"
                    }
                    Button {
                        variant: ButtonVariant::Ghost,
                        onclick: on_logout,
                        "Logout"
                    }
                }
            } else {
                div {
                    style: "display: flex; gap: 8px;",
                    Button {
                        variant: ButtonVariant::Ghost,
                        onclick: move |_| state.navigate_landing(),
                        "Sign In"
                    }
                    Button {
                        variant: ButtonVariant::Primary,
                        onclick: move |_| state.navigate_landing(),
                        "Get Started"
                    }
                }
            }
        }
    }
}
