//! Editor: compose a new entry or rework an existing one.

use dioxus::prelude::*;

use zenjournal_core::insight::MIN_CONTENT_CHARS_FOR_INSIGHT;
use zenjournal_core::models::UNTITLED_ENTRY;
use zenjournal_core::JournalEntry;

use crate::components::{Button, ButtonVariant};
use crate::state::AppState;

const INSIGHT_TOO_SHORT_HINT: &str =
    "Please write a bit more so the assistant can understand your thoughts.";

/// Content that is empty after trimming is never sent to the store.
fn can_save(content: &str) -> bool {
    !content.trim().is_empty()
}

/// Client-side gate for insight requests; very short content gets a hint
/// instead of a round-trip to the AI endpoint.
fn insight_blocked_reason(content: &str) -> Option<&'static str> {
    if content.trim().chars().count() < MIN_CONTENT_CHARS_FOR_INSIGHT {
        Some(INSIGHT_TOO_SHORT_HINT)
    } else {
        None
    }
}

#[component]
pub fn Editor() -> Element {
    let mut state = use_context::<AppState>();
    let editing = (state.editing_entry)();

    let mut title = use_signal(|| editing.as_ref().map(|e| e.title.clone()).unwrap_or_default());
    let mut content = use_signal(|| {
        editing
            .as_ref()
            .map(|e| e.content.clone())
            .unwrap_or_default()
    });
    let mut insight = use_signal(|| {
        editing
            .as_ref()
            .map(|e| e.ai_insight.clone())
            .unwrap_or_default()
    });
    let mut saving = use_signal(|| false);
    let mut generating = use_signal(|| false);
    let mut status_message = use_signal(|| None::<String>);

    // Save and insight generation are mutually exclusive, never concurrent.
    let busy = saving() || generating();

    let on_save = move |_| {
        if saving() || generating() {
            return;
        }
        let draft_content = content();
        if !can_save(&draft_content) {
            return;
        }
        let Some(user) = (state.current_user)() else {
            return;
        };
        let Some(service) = (state.entry_service)() else {
            return;
        };

        let existing = (state.editing_entry)();
        let draft_title = title();
        let entry = JournalEntry {
            id: existing.as_ref().and_then(|e| e.id),
            user_id: user.id,
            title: if draft_title.trim().is_empty() {
                UNTITLED_ENTRY.to_string()
            } else {
                draft_title
            },
            content: draft_content,
            ai_insight: insight(),
            created_at: existing.as_ref().and_then(|e| e.created_at),
            updated_at: existing.as_ref().and_then(|e| e.updated_at),
        };

        saving.set(true);
        status_message.set(None);

        spawn(async move {
            match service.save_entry(&entry).await {
                Ok(_) => {
                    saving.set(false);
                    state.navigate_dashboard();
                }
                // A failed save keeps the draft in place, unsaved.
                Err(error) => {
                    status_message.set(Some(format!("Failed to save entry: {error}")));
                    saving.set(false);
                }
            }
        });
    };

    let on_generate_insight = move |_| {
        if saving() || generating() {
            return;
        }
        let draft_content = content();
        if let Some(reason) = insight_blocked_reason(&draft_content) {
            status_message.set(Some(reason.to_string()));
            return;
        }
        let Some(client) = (state.insight_client)() else {
            return;
        };

        generating.set(true);
        status_message.set(None);

        spawn(async move {
            // Never fails: the client collapses errors into fallback text.
            let text = client.generate_insight(&draft_content).await;
            insight.set(text);
            generating.set(false);
        });
    };

    let date_line = editing
        .as_ref()
        .and_then(|e| e.created_at)
        .unwrap_or_else(chrono::Utc::now)
        .format("%A, %B %d, %Y %H:%M")
        .to_string();

    rsx! {
        div {
            style: "max-width: 820px; margin: 0 auto; padding: 36px 24px;",

            div {
                style: "display: flex; justify-content: space-between; align-items: center; margin-bottom: 24px;",
                Button {
                    variant: ButtonVariant::Ghost,
                    onclick: move |_| state.navigate_dashboard(),
                    "← Back to Journal"
                }
                div {
                    style: "display: flex; gap: 10px;",
                    Button {
                        variant: ButtonVariant::Secondary,
                        disabled: busy,
                        onclick: on_generate_insight,
                        if generating() { "Reflecting..." } else { "AI Insight" }
                    }
                    Button {
                        variant: ButtonVariant::Primary,
                        disabled: busy,
                        onclick: on_save,
                        if saving() { "Saving..." } else { "Save Memory" }
                    }
                }
            }

            if let Some(message) = status_message() {
                p {
                    style: "
                        margin: 0 0 16px 0;
                        padding: 10px 14px;
                        background: #fffbeb;
                        border: 1px solid #fde68a;
                        border-radius: 10px;
                        color: #b45309;
                        font-size: 13px;
                    ",
                    "{message}"
                }
            }

            div {
                style: "
                    background: #ffffff;
                    border: 1px solid #e7e5e4;
                    border-radius: 24px;
                    padding: 36px;
                    display: flex;
                    flex-direction: column;
                    gap: 18px;
                    min-height: 60vh;
                ",

                input {
                    r#type: "text",
                    placeholder: "Title of this chapter...",
                    value: "{title}",
                    style: "
                        border: 0;
                        outline: none;
                        font-size: 34px;
                        font-weight: 700;
                        color: #292524;
                        background: transparent;
                    ",
                    oninput: move |event| title.set(event.value()),
                }

                p {
                    style: "
                        margin: 0;
                        padding-bottom: 16px;
                        border-bottom: 1px solid #f5f5f4;
                        font-size: 11px;
                        font-weight: 700;
                        color: #d6d3d1;
                        text-transform: uppercase;
                        letter-spacing: 0.1em;
                    ",
                    "{date_line}"
                }

                textarea {
                    placeholder: "What's unfolding in your world today?",
                    value: "{content}",
                    style: "
                        flex: 1;
                        min-height: 32vh;
                        border: 0;
                        outline: none;
                        resize: none;
                        font-size: 17px;
                        line-height: 1.7;
                        color: #57534e;
                        background: transparent;
                    ",
                    oninput: move |event| content.set(event.value()),
                }

                if !insight().is_empty() {
                    div {
                        style: "
                            background: #eef2ff;
                            border: 1px solid #e0e7ff;
                            border-radius: 18px;
                            padding: 24px;
                        ",
                        p {
                            style: "
                                margin: 0 0 8px 0;
                                font-size: 10px;
                                font-weight: 700;
                                color: #312e81;
                                text-transform: uppercase;
                                letter-spacing: 0.18em;
                            ",
                            "Zen Reflection"
                        }
                        p {
                            style: "margin: 0; font-size: 16px; color: #3730a3; font-style: italic; line-height: 1.6;",
                            "\"{insight}\""
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_content_blocks_saving() {
        assert!(!can_save(""));
        assert!(!can_save("   \n\t"));
        assert!(can_save("Today was gentle."));
    }

    #[test]
    fn short_content_blocks_insight_requests() {
        assert!(insight_blocked_reason("").is_some());
        assert!(insight_blocked_reason("Tired.").is_some());
        assert!(insight_blocked_reason("Today I walked along the canal and felt calm.").is_none());
    }

    #[test]
    fn insight_gate_counts_trimmed_characters() {
        // Nine characters padded with whitespace still blocks.
        assert!(insight_blocked_reason("  DayNine!  \n").is_some());
        assert!(insight_blocked_reason("TenLetters").is_none());
    }
}
