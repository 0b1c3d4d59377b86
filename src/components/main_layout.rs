//! Main Layout
//!
//! Header chrome with navigation, auth buttons and the user-info dialog.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::{Outlet, A};
use leptos_router::hooks::use_navigate;
use serde_json::Value;

use crate::api;
use crate::components::{AvatarUpload, EntityForm};
use crate::form::{collect_values, validate, FieldKind, FormField, FormModel, Rule};
use crate::models::User;
use crate::notify::use_notifications;
use crate::resource::merge_record;
use crate::session::{
    load_avatar, save_avatar, session_logout, use_session, SessionStateStoreFields,
};

/// Navigation entries shown only to authenticated users; Customers is
/// always visible.
const NAV_ITEMS: &[(&str, &str)] = &[
    ("/bills", "Bills"),
    ("/categories", "Categories"),
    ("/cities", "Cities"),
    ("/credit-cards", "Credit Cards"),
    ("/items", "Items"),
    ("/products", "Products"),
    ("/sellers", "Sellers"),
    ("/sub-categories", "Sub Categories"),
];

fn user_fields() -> Vec<FormField> {
    vec![
        FormField::new("name", "Name", FieldKind::Text).required(),
        FormField::new("email", "Email", FieldKind::Text)
            .required()
            .rule(Rule::Email),
        FormField::new("password", "Password", FieldKind::Password).required(),
    ]
}

#[component]
pub fn MainLayout() -> impl IntoView {
    let session = use_session();
    let notifications = use_notifications();
    let navigate = use_navigate();

    let user_info_open = RwSignal::new(false);
    let user_data = RwSignal::new(Option::<User>::None);
    let editing = RwSignal::new(false);
    let avatar_url = RwSignal::new(Option::<String>::None);
    let model = RwSignal::new(FormModel::new());
    let errors = RwSignal::new(Vec::<(String, String)>::new());

    // Avatar follows the signed-in identity.
    Effect::new(move |_| match session.identity().get() {
        Some(email) => avatar_url.set(load_avatar(&email)),
        None => avatar_url.set(None),
    });

    // Fetch the user record when the dialog opens.
    Effect::new(move |_| {
        if !user_info_open.get() {
            return;
        }
        let Some(email) = session.identity().get_untracked() else {
            return;
        };
        spawn_local(async move {
            match api::list_where::<User>("email", &Value::String(email)).await {
                Ok(users) => user_data.set(users.into_iter().next()),
                Err(err) => notifications.error(format!("Failed to fetch user: {err}")),
            }
        });
    });

    let logout_nav = navigate.clone();
    let on_logout = move |_| {
        session_logout(&session);
        logout_nav("/customers", Default::default());
    };

    let start_editing = move |_| {
        if let Some(user) = user_data.get_untracked() {
            if let Ok(Value::Object(map)) = serde_json::to_value(&user) {
                model.set(map);
            }
            errors.set(Vec::new());
            editing.set(true);
        }
    };

    let close_dialog = move |_| {
        user_info_open.set(false);
        editing.set(false);
        errors.set(Vec::new());
    };

    let on_save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(user) = user_data.get_untracked() else {
            return;
        };
        let fields = user_fields();
        let violations = model.with_untracked(|m| validate(&fields, m));
        if !violations.is_empty() {
            errors.set(violations);
            return;
        }
        errors.set(Vec::new());
        let values = model.with_untracked(|m| collect_values(&fields, m));
        spawn_local(async move {
            match api::update::<User>(user.id, &values).await {
                Ok(()) => {
                    if let Ok(updated) = merge_record(&user, &values) {
                        // Re-home the avatar under a possibly changed email.
                        if let Some(url) = avatar_url.get_untracked() {
                            save_avatar(&updated.email, &url);
                        }
                        user_data.set(Some(updated));
                    }
                    editing.set(false);
                    notifications.success("Profile updated");
                }
                Err(err) => notifications.error(format!("Failed to update user: {err}")),
            }
        });
    };

    let store_avatar = move |data_url: String| {
        if let Some(email) = session.identity().get_untracked() {
            save_avatar(&email, &data_url);
        }
        avatar_url.set(Some(data_url));
    };

    view! {
        <div class="app-layout">
            <header class="app-header">
                <div class="brand">"Admin Panel"</div>
                <nav class="main-nav">
                    <A href="/customers">"Customers"</A>
                    <Show when=move || session.authenticated().get()>
                        {NAV_ITEMS
                            .iter()
                            .map(|(href, label)| view! { <A href=*href>{*label}</A> })
                            .collect_view()}
                    </Show>
                </nav>
                <div class="auth-buttons">
                    <Show
                        when=move || session.authenticated().get()
                        fallback=|| {
                            view! {
                                <A href="/login">"Login"</A>
                                <A href="/register">"Register"</A>
                            }
                        }
                    >
                        <button class="user-info-btn" on:click=move |_| user_info_open.set(true)>
                            {move || match avatar_url.get() {
                                Some(url) => view! { <img class="avatar-small" src=url alt="avatar"/> }
                                    .into_any(),
                                None => view! { <span class="avatar-small placeholder">"👤"</span> }
                                    .into_any(),
                            }}
                            "User Info"
                        </button>
                        <button class="danger" on:click=on_logout.clone()>"Logout"</button>
                    </Show>
                </div>
            </header>

            <main class="app-content">
                <Outlet/>
            </main>

            <Show when=move || user_info_open.get()>
                <div class="modal-backdrop" on:click=close_dialog>
                    <div class="modal" on:click=|ev| ev.stop_propagation()>
                        <h3>"User Information"</h3>
                        {move || match (user_data.get(), editing.get()) {
                            (Some(user), false) => view! {
                                <div class="user-details">
                                    {match avatar_url.get() {
                                        Some(url) => view! { <img class="avatar-preview" src=url alt="avatar"/> }
                                            .into_any(),
                                        None => view! { <span class="avatar-placeholder">"👤"</span> }
                                            .into_any(),
                                    }}
                                    <p><strong>"Name: "</strong>{user.name.clone()}</p>
                                    <p><strong>"Email: "</strong>{user.email.clone()}</p>
                                    <div class="modal-actions">
                                        <button class="primary" on:click=start_editing>"Edit"</button>
                                    </div>
                                </div>
                            }
                            .into_any(),
                            (Some(_), true) => view! {
                                <form on:submit=on_save>
                                    <AvatarUpload
                                        avatar_url=Signal::derive(move || avatar_url.get())
                                        on_avatar_change=Callback::new(store_avatar)
                                    />
                                    <EntityForm fields=user_fields() model errors/>
                                    <div class="modal-actions">
                                        <button type="button" on:click=move |_| editing.set(false)>
                                            "Cancel"
                                        </button>
                                        <button type="submit" class="primary">"Save"</button>
                                    </div>
                                </form>
                            }
                            .into_any(),
                            (None, _) => view! { <p>"Loading user information..."</p> }.into_any(),
                        }}
                    </div>
                </div>
            </Show>
        </div>
    }
}
