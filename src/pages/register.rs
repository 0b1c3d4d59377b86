//! Register Page

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::api::{self, LoginArgs, RegisterArgs};
use crate::components::{AvatarUpload, EntityForm};
use crate::form::{text_value, validate, FieldKind, FormField, FormModel, Rule};
use crate::notify::use_notifications;
use crate::session::{save_avatar, session_set_credentials, use_session};

fn register_fields() -> Vec<FormField> {
    vec![
        FormField::new("name", "Name", FieldKind::Text)
            .required()
            .rule(Rule::MinLen(2)),
        FormField::new("email", "Email", FieldKind::Text)
            .required()
            .rule(Rule::Email),
        FormField::new("password", "Password", FieldKind::Password)
            .required()
            .rule(Rule::MinLen(6)),
        FormField::new("confirmPassword", "Confirm Password", FieldKind::Password)
            .required()
            .rule(Rule::Matches("password")),
    ]
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let session = use_session();
    let notifications = use_notifications();
    let navigate = use_navigate();

    let model = RwSignal::new(FormModel::new());
    let errors = RwSignal::new(Vec::<(String, String)>::new());
    let avatar_url = RwSignal::new(Option::<String>::None);
    let (error, set_error) = signal(Option::<String>::None);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let fields = register_fields();
        let violations = model.with_untracked(|m| validate(&fields, m));
        if !violations.is_empty() {
            errors.set(violations);
            return;
        }
        errors.set(Vec::new());
        set_error.set(None);

        let name = model.with_untracked(|m| text_value(m, "name"));
        let email = model.with_untracked(|m| text_value(m, "email"));
        let password = model.with_untracked(|m| text_value(m, "password"));
        let avatar = avatar_url.get_untracked();

        let navigate = navigate.clone();
        spawn_local(async move {
            if let Err(err) = api::register(&RegisterArgs {
                email: &email,
                password: &password,
                name: &name,
            })
            .await
            {
                set_error.set(Some(err));
                return;
            }
            if let Some(data_url) = avatar {
                save_avatar(&email, &data_url);
            }

            let result = api::login(&LoginArgs {
                email: &email,
                password: &password,
            })
            .await
            .and_then(|token| session_set_credentials(&session, token));
            match result {
                Ok(()) => {
                    notifications.success("Registration successful");
                    navigate("/", Default::default());
                }
                Err(err) => set_error.set(Some(err)),
            }
        });
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h2>"Register"</h2>
                <AvatarUpload
                    avatar_url=avatar_url
                    on_avatar_change=Callback::new(move |url: String| avatar_url.set(Some(url)))
                />
                <form on:submit=on_submit>
                    <EntityForm fields=register_fields() model errors/>
                    {move || error.get().map(|message| view! { <p class="form-error">{message}</p> })}
                    <button type="submit" class="primary">"Register"</button>
                </form>
                <A href="/login">"Already have an account? Login"</A>
            </div>
        </div>
    }
}
