//! Landing page: hero copy plus the login/signup form.

use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant, Input};
use crate::services::SignUpOutcome;
use crate::state::AppState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AuthMode {
    Login,
    SignUp,
}

const FEATURES: [(&str, &str); 3] = [
    (
        "Cloud Synced",
        "Your memories are safe and accessible from any device, anywhere.",
    ),
    (
        "AI Reflections",
        "Gain unique perspectives on your thoughts with mindful AI insights.",
    ),
    (
        "Total Privacy",
        "Your entries are your own. We prioritize security and encryption.",
    ),
];

#[component]
pub fn Landing() -> Element {
    let state = use_context::<AppState>();
    let mut mode = use_signal(|| AuthMode::Login);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut name = use_signal(String::new);
    let mut error_message = use_signal(|| None::<String>);
    let mut success_message = use_signal(|| None::<String>);
    let mut working = use_signal(|| false);

    let mut switch_mode = move |next: AuthMode| {
        mode.set(next);
        error_message.set(None);
        success_message.set(None);
    };

    let on_submit = move |_| {
        if working() {
            return;
        }
        let Some(auth) = (state.auth_service)() else {
            error_message.set(Some(
                "Authentication is unavailable in this build.".to_string(),
            ));
            return;
        };

        error_message.set(None);
        success_message.set(None);
        working.set(true);

        spawn(async move {
            match mode() {
                AuthMode::SignUp => {
                    match auth.sign_up(&email(), &password(), &name()).await {
                        Ok(SignUpOutcome::ConfirmationRequired) => {
                            success_message.set(Some(
                                "Account created! Check your email to verify your account \
                                 before logging in."
                                    .to_string(),
                            ));
                            mode.set(AuthMode::Login);
                        }
                        // The root controller navigates via the auth event.
                        Ok(SignUpOutcome::SignedIn(_)) => {}
                        Err(error) => error_message.set(Some(error.to_string())),
                    }
                }
                AuthMode::Login => {
                    // Success navigation also happens via the auth event.
                    if let Err(error) = auth.sign_in(&email(), &password()).await {
                        error_message.set(Some(error.to_string()));
                    }
                }
            }
            working.set(false);
        });
    };

    let submit_label = match mode() {
        AuthMode::Login => "Sign In",
        AuthMode::SignUp => "Create My Journal",
    };
    let tab_style = |active: bool| {
        if active {
            "flex: 1; padding: 10px; border: 0; border-radius: 8px; background: #ffffff; \
             color: #4f46e5; font-weight: 600; cursor: pointer;"
        } else {
            "flex: 1; padding: 10px; border: 0; border-radius: 8px; background: transparent; \
             color: #9ca3af; font-weight: 600; cursor: pointer;"
        }
    };

    rsx! {
        div {
            style: "
                display: flex;
                flex-direction: column;
                align-items: center;
                padding: 48px 24px;
                gap: 40px;
            ",

            div {
                style: "text-align: center; max-width: 640px;",
                h1 {
                    style: "margin: 0 0 12px 0; font-size: 40px; color: #0f172a;",
                    "Write your story, one day at a time."
                }
                p {
                    style: "margin: 0; font-size: 17px; color: #64748b; line-height: 1.6;",
                    "ZenJournal helps you capture fleeting moments and gain deep insights \
                     through the power of mindful writing and AI reflection."
                }
            }

            div {
                style: "
                    width: 100%;
                    max-width: 420px;
                    background: #ffffff;
                    border: 1px solid #e2e8f0;
                    border-radius: 18px;
                    padding: 28px;
                    display: flex;
                    flex-direction: column;
                    gap: 16px;
                ",

                div {
                    style: "display: flex; background: #f1f5f9; padding: 5px; border-radius: 10px;",
                    button {
                        r#type: "button",
                        style: tab_style(mode() == AuthMode::Login),
                        onclick: move |_| switch_mode(AuthMode::Login),
                        "Login"
                    }
                    button {
                        r#type: "button",
                        style: tab_style(mode() == AuthMode::SignUp),
                        onclick: move |_| switch_mode(AuthMode::SignUp),
                        "Sign Up"
                    }
                }

                if mode() == AuthMode::SignUp {
                    Input {
                        label: "Full Name",
                        placeholder: "How should we address you?",
                        value: "{name}",
                        disabled: working(),
                        oninput: move |event: FormEvent| name.set(event.value()),
                    }
                }
                Input {
                    label: "Email Address",
                    r#type: "email",
                    placeholder: "you@example.com",
                    value: "{email}",
                    disabled: working(),
                    oninput: move |event: FormEvent| email.set(event.value()),
                }
                Input {
                    label: "Password",
                    r#type: "password",
                    placeholder: "Minimum 6 characters",
                    value: "{password}",
                    disabled: working(),
                    oninput: move |event: FormEvent| password.set(event.value()),
                }

                if let Some(message) = error_message() {
                    p {
                        style: "
                            margin: 0;
                            padding: 10px;
                            background: #fff1f2;
                            border: 1px solid #fecdd3;
                            border-radius: 10px;
                            color: #e11d48;
                            font-size: 13px;
                            text-align: center;
                        ",
                        "{message}"
                    }
                }

                if let Some(message) = success_message() {
                    p {
                        style: "
                            margin: 0;
                            padding: 10px;
                            background: #ecfdf5;
                            border: 1px solid #a7f3d0;
                            border-radius: 10px;
                            color: #059669;
                            font-size: 13px;
                            text-align: center;
                        ",
                        "{message}"
                    }
                }

                Button {
                    variant: ButtonVariant::Primary,
                    disabled: working(),
                    style: "padding: 14px; font-size: 16px;".to_string(),
                    onclick: on_submit,
                    if working() { "Working..." } else { "{submit_label}" }
                }
            }

            div {
                style: "display: flex; gap: 16px; max-width: 900px; flex-wrap: wrap; justify-content: center;",
                for (title, description) in FEATURES {
                    div {
                        key: "{title}",
                        style: "
                            flex: 1;
                            min-width: 220px;
                            background: #f8fafc;
                            border: 1px solid #e2e8f0;
                            border-radius: 16px;
                            padding: 20px;
                        ",
                        h3 {
                            style: "margin: 0 0 8px 0; font-size: 16px; color: #0f172a;",
                            "{title}"
                        }
                        p {
                            style: "margin: 0; font-size: 13px; color: #64748b; line-height: 1.5;",
                            "{description}"
                        }
                    }
                }
            }
        }
    }
}
