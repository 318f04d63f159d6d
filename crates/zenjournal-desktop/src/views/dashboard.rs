//! Dashboard: the signed-in user's entries, newest first.

use dioxus::prelude::*;

use zenjournal_core::{EntryId, JournalEntry};

use crate::components::{Button, ButtonVariant};
use crate::state::AppState;

const PREVIEW_CHARS: usize = 160;
const INSIGHT_EXCERPT_CHARS: usize = 90;

#[component]
pub fn Dashboard() -> Element {
    let mut state = use_context::<AppState>();
    let mut entries = use_signal(Vec::<JournalEntry>::new);
    let mut loading = use_signal(|| true);
    let mut deleting_id = use_signal(|| None::<EntryId>);
    let mut status_message = use_signal(|| None::<String>);

    // Load the user's entries on mount. The list always reflects what the
    // store returned; nothing client-side survives a reload.
    use_future(move || async move {
        loading.set(true);

        let Some(user) = (state.current_user)() else {
            loading.set(false);
            return;
        };
        let Some(service) = (state.entry_service)() else {
            loading.set(false);
            return;
        };

        match service.get_entries(&user.id).await {
            Ok(loaded) => {
                tracing::debug!("Loaded {} entries", loaded.len());
                entries.set(loaded);
            }
            // Load failures are logged only; the dashboard just stays empty.
            Err(error) => tracing::error!("Failed to load entries: {}", error),
        }

        loading.set(false);
    });

    let mut on_delete = move |id: EntryId| {
        if deleting_id().is_some() {
            return;
        }
        let Some(service) = (state.entry_service)() else {
            return;
        };

        deleting_id.set(Some(id));
        status_message.set(None);

        spawn(async move {
            match service.delete_entry(id).await {
                // The entry leaves the list only after the store confirmed
                // the delete actually removed a row.
                Ok(()) => {
                    entries.write().retain(|entry| entry.id != Some(id));
                }
                Err(error) => {
                    status_message.set(Some(format!("Could not delete: {error}")));
                }
            }
            deleting_id.set(None);
        });
    };

    let entry_count = entries().len();
    let subtitle = if entry_count == 0 {
        "Start your first chapter today".to_string()
    } else {
        format!("{entry_count} memories captured")
    };

    rsx! {
        div {
            style: "max-width: 960px; margin: 0 auto; padding: 36px 24px;",

            div {
                style: "display: flex; justify-content: space-between; align-items: flex-end; margin-bottom: 28px;",
                div {
                    h2 {
                        style: "margin: 0 0 4px 0; font-size: 30px; color: #0f172a;",
                        "My Journey"
                    }
                    p {
                        style: "margin: 0; color: #64748b; font-weight: 500;",
                        "{subtitle}"
                    }
                }
                if entry_count > 0 {
                    Button {
                        variant: ButtonVariant::Primary,
                        onclick: move |_| state.navigate_new(),
                        "+ New Entry"
                    }
                }
            }

            if let Some(message) = status_message() {
                p {
                    style: "
                        margin: 0 0 16px 0;
                        padding: 10px 14px;
                        background: #fff1f2;
                        border: 1px solid #fecdd3;
                        border-radius: 10px;
                        color: #e11d48;
                        font-size: 13px;
                    ",
                    "{message}"
                }
            }

            if loading() {
                div {
                    style: "padding: 80px 0; text-align: center; color: #94a3b8;",
                    "Revisiting your memories..."
                }
            } else if entry_count == 0 {
                div {
                    style: "
                        background: #ffffff;
                        border: 2px dashed #e2e8f0;
                        border-radius: 20px;
                        padding: 64px 32px;
                        text-align: center;
                    ",
                    h3 {
                        style: "margin: 0 0 10px 0; font-size: 24px; color: #1e293b;",
                        "Every story has a beginning."
                    }
                    p {
                        style: "margin: 0 auto 28px auto; max-width: 380px; color: #64748b; line-height: 1.6;",
                        "Your personal space for reflection is ready. What would you like \
                         to remember about today?"
                    }
                    Button {
                        variant: ButtonVariant::Primary,
                        style: "padding: 14px 32px; font-size: 16px;".to_string(),
                        onclick: move |_| state.navigate_new(),
                        "Write Today's Story"
                    }
                }
            } else {
                div {
                    style: "display: grid; grid-template-columns: repeat(auto-fill, minmax(260px, 1fr)); gap: 18px;",
                    for entry in entries() {
                        EntryCard {
                            entry: entry.clone(),
                            busy: deleting_id() == entry.id,
                            on_open: move |entry: JournalEntry| state.navigate_edit(entry),
                            on_delete: move |id: EntryId| on_delete(id),
                        }
                    }
                }
            }
        }
    }
}

/// One entry in the dashboard grid. While its delete is in flight the card
/// dims and stops navigating.
#[component]
fn EntryCard(
    entry: JournalEntry,
    busy: bool,
    on_open: EventHandler<JournalEntry>,
    on_delete: EventHandler<EntryId>,
) -> Element {
    let title = entry.display_title().to_string();
    let preview = entry.content_preview(PREVIEW_CHARS);
    let created = entry
        .created_at
        .map(|timestamp| timestamp.format("%b %d, %H:%M").to_string())
        .unwrap_or_default();
    let insight_excerpt = (!entry.ai_insight.is_empty()).then(|| {
        entry
            .ai_insight
            .chars()
            .take(INSIGHT_EXCERPT_CHARS)
            .collect::<String>()
    });
    let opacity = if busy { "0.45" } else { "1" };

    let open_entry = entry.clone();
    let entry_id = entry.id;

    rsx! {
        div {
            style: "
                background: #ffffff;
                border: 1px solid #e2e8f0;
                border-radius: 16px;
                padding: 20px;
                cursor: pointer;
                display: flex;
                flex-direction: column;
                gap: 10px;
                opacity: {opacity};
            ",
            onclick: move |_| {
                if !busy {
                    on_open.call(open_entry.clone());
                }
            },

            div {
                style: "display: flex; justify-content: space-between; align-items: center;",
                span {
                    style: "
                        font-size: 10px;
                        font-weight: 700;
                        color: #94a3b8;
                        text-transform: uppercase;
                        letter-spacing: 0.08em;
                    ",
                    "{created}"
                }
                Button {
                    variant: ButtonVariant::Danger,
                    disabled: busy,
                    style: "padding: 4px 10px; font-size: 12px;".to_string(),
                    onclick: move |event: MouseEvent| {
                        // Keep the click from also opening the editor.
                        event.stop_propagation();
                        if let Some(id) = entry_id {
                            on_delete.call(id);
                        }
                    },
                    if busy { "Deleting..." } else { "Delete" }
                }
            }

            h3 {
                style: "margin: 0; font-size: 18px; color: #1e293b;",
                "{title}"
            }
            p {
                style: "margin: 0; font-size: 13px; color: #64748b; line-height: 1.5; flex: 1;",
                "{preview}"
            }

            if let Some(excerpt) = insight_excerpt {
                div {
                    style: "border-top: 1px solid #f1f5f9; padding-top: 10px;",
                    span {
                        style: "
                            font-size: 10px;
                            font-weight: 700;
                            color: #6366f1;
                            text-transform: uppercase;
                            letter-spacing: 0.08em;
                        ",
                        "Insight"
                    }
                    p {
                        style: "margin: 4px 0 0 0; font-size: 12px; color: #94a3b8; font-style: italic;",
                        "\"{excerpt}\""
                    }
                }
            }
        }
    }
}
