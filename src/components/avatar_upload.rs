//! Avatar Upload Component
//!
//! Image-only file input converted to a base64 data URL via FileReader.

use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::notify::use_notifications;

/// Avatar picker with preview.
///
/// The chosen image is read into a `data:` URL and handed to
/// `on_avatar_change`; persistence is the caller's concern.
#[component]
pub fn AvatarUpload(
    #[prop(into)] avatar_url: Signal<Option<String>>,
    #[prop(into)] on_avatar_change: Callback<String>,
) -> impl IntoView {
    let notifications = use_notifications();
    let (loading, set_loading) = signal(false);

    let on_file = move |ev: web_sys::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        let Some(file) = input.files().and_then(|list| list.get(0)) else {
            return;
        };
        if !file.type_().starts_with("image/") {
            notifications.error("You can only upload image files!");
            return;
        }

        set_loading.set(true);
        let reader = match web_sys::FileReader::new() {
            Ok(reader) => reader,
            Err(_) => {
                set_loading.set(false);
                return;
            }
        };

        let reader_handle = reader.clone();
        let onload = Closure::wrap(Box::new(move |_: web_sys::ProgressEvent| {
            match reader_handle.result().ok().and_then(|v| v.as_string()) {
                Some(data_url) => {
                    on_avatar_change.run(data_url);
                    notifications.success("Avatar uploaded successfully");
                }
                None => notifications.error("Failed to convert image"),
            }
            set_loading.set(false);
        }) as Box<dyn FnMut(web_sys::ProgressEvent)>);
        reader.set_onload(Some(onload.as_ref().unchecked_ref()));
        onload.forget();

        if reader.read_as_data_url(&file).is_err() {
            notifications.error("Failed to convert image");
            set_loading.set(false);
        }
    };

    view! {
        <label class="avatar-upload">
            {move || match avatar_url.get() {
                Some(url) => view! { <img class="avatar-preview" src=url alt="avatar"/> }.into_any(),
                None => view! {
                    <span class="avatar-placeholder">
                        {move || if loading.get() { "Uploading…" } else { "Upload Avatar" }}
                    </span>
                }
                .into_any(),
            }}
            <input
                type="file"
                accept="image/*"
                style="display:none"
                on:change=on_file
            />
        </label>
    }
}
