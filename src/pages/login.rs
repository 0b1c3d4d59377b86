//! Login Page

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::api::{self, LoginArgs};
use crate::notify::use_notifications;
use crate::session::{session_set_credentials, use_session};

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session();
    let notifications = use_notifications();
    let navigate = use_navigate();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal(Option::<String>::None);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let email = email.get();
        let password = password.get();
        if email.is_empty() || password.is_empty() {
            set_error.set(Some("Please input your email and password!".to_string()));
            return;
        }
        set_error.set(None);

        let navigate = navigate.clone();
        spawn_local(async move {
            let result = api::login(&LoginArgs {
                email: &email,
                password: &password,
            })
            .await
            .and_then(|token| session_set_credentials(&session, token));
            match result {
                Ok(()) => {
                    notifications.success("Login successful");
                    navigate("/", Default::default());
                }
                Err(err) => set_error.set(Some(err)),
            }
        });
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h2>"Login"</h2>
                <form on:submit=on_submit>
                    <input
                        type="text"
                        placeholder="Email"
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                    <input
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                    {move || error.get().map(|message| view! { <p class="form-error">{message}</p> })}
                    <button type="submit" class="primary">"Log in"</button>
                </form>
                <A href="/register">"Don't have an account? Register"</A>
            </div>
        </div>
    }
}
