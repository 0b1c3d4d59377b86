//! Reference Cell
//!
//! Lazily resolves a foreign-key reference to its record for display.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::notify::use_notifications;
use crate::resource::{Ref, Resource};

/// Fetches the referenced record once and hands it to `render`.
///
/// An absent reference skips the network entirely and renders right away;
/// `render` must accept `None` (missing reference or failed fetch).
#[component]
pub fn ReferenceCell<R: Resource>(
    #[prop(optional)] reference: Option<Ref<R>>,
    #[prop(into)] render: Callback<Option<R>, AnyView>,
) -> impl IntoView {
    let notifications = use_notifications();
    let (record, set_record) = signal::<Option<R>>(None);
    let (loading, set_loading) = signal(reference.is_some());

    if let Some(reference) = reference {
        spawn_local(async move {
            match api::fetch_one(reference).await {
                Ok(found) => set_record.set(Some(found)),
                Err(err) => {
                    notifications.error(format!("Failed to fetch {}: {err}", R::KIND));
                }
            }
            set_loading.set(false);
        });
    }

    view! {
        <Show
            when=move || !loading.get()
            fallback=|| view! { <span class="cell-loading">"…"</span> }
        >
            {move || render.run(record.get())}
        </Show>
    }
}
