//! Input component

use dioxus::prelude::*;

/// A labelled form input in the app's house style.
#[component]
pub fn Input(
    label: String,
    #[props(default = "text".to_string())] r#type: String,
    #[props(default = String::new())] placeholder: String,
    value: String,
    #[props(default = false)] disabled: bool,
    oninput: EventHandler<FormEvent>,
) -> Element {
    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 6px;",
            label {
                style: "font-size: 13px; font-weight: 600; color: #374151;",
                "{label}"
            }
            input {
                r#type: "{type}",
                placeholder: "{placeholder}",
                value: "{value}",
                disabled,
                style: "
                    border: 1px solid #d1d5db;
                    border-radius: 10px;
                    padding: 12px;
                    font-size: 14px;
                    background: #ffffff;
                ",
                oninput: move |event| oninput.call(event),
            }
        }
    }
}
