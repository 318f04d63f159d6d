//! Button component

use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Ghost,
    Danger,
}

impl ButtonVariant {
    const fn colors(self) -> (&'static str, &'static str, &'static str) {
        // (background, text, border)
        match self {
            Self::Primary => ("#4f46e5", "#ffffff", "#4f46e5"),
            Self::Secondary => ("#ffffff", "#374151", "#d1d5db"),
            Self::Ghost => ("transparent", "#6b7280", "transparent"),
            Self::Danger => ("#ffffff", "#b91c1c", "#ef4444"),
        }
    }
}

/// A styled button that dims and ignores clicks while disabled.
#[component]
pub fn Button(
    #[props(default)] variant: ButtonVariant,
    #[props(default = false)] disabled: bool,
    #[props(default = String::new())] style: String,
    onclick: EventHandler<MouseEvent>,
    children: Element,
) -> Element {
    let (background, text_color, border_color) = variant.colors();
    let opacity = if disabled { "0.5" } else { "1" };

    rsx! {
        button {
            r#type: "button",
            style: "
                border: 1px solid {border_color};
                border-radius: 10px;
                padding: 10px 16px;
                background: {background};
                color: {text_color};
                font-weight: 600;
                font-size: 14px;
                cursor: pointer;
                opacity: {opacity};
                {style}
            ",
            disabled,
            onclick: move |event| onclick.call(event),
            {children}
        }
    }
}
