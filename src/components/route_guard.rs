//! Route Guard

use leptos::prelude::*;
use leptos_router::components::Redirect;

use crate::session::{use_session, SessionStateStoreFields};

/// Renders children only for an authenticated session; anonymous visitors
/// are sent to the login page. Re-evaluated reactively on navigation.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let session = use_session();

    view! {
        <Show
            when=move || session.authenticated().get()
            fallback=|| view! { <Redirect path="/login"/> }
        >
            {children()}
        </Show>
    }
}
