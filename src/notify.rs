//! Notifications
//!
//! App-wide toast tray provided via context; success and error notices
//! auto-dismiss after a few seconds.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

const DISMISS_MS: u32 = 4_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: u32,
    pub kind: NoticeKind,
    pub text: String,
}

/// Handle to the notification tray; cheap to copy into callbacks.
#[derive(Clone, Copy)]
pub struct Notifications {
    notices: RwSignal<Vec<Notice>>,
    next_id: StoredValue<u32>,
}

impl Notifications {
    pub fn new() -> Self {
        Self {
            notices: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(0),
        }
    }

    pub fn success(&self, text: impl Into<String>) {
        self.push(NoticeKind::Success, text.into());
    }

    pub fn error(&self, text: impl Into<String>) {
        self.push(NoticeKind::Error, text.into());
    }

    pub fn dismiss(&self, id: u32) {
        self.notices.update(|list| list.retain(|n| n.id != id));
    }

    fn push(&self, kind: NoticeKind, text: String) {
        let mut id = 0;
        self.next_id.update_value(|n| {
            *n += 1;
            id = *n;
        });
        self.notices.update(|list| list.push(Notice { id, kind, text }));

        let notices = self.notices;
        spawn_local(async move {
            TimeoutFuture::new(DISMISS_MS).await;
            notices.update(|list| list.retain(|n| n.id != id));
        });
    }
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new()
    }
}

/// Get the notification handle from context.
pub fn use_notifications() -> Notifications {
    expect_context::<Notifications>()
}

#[component]
pub fn NotificationTray() -> impl IntoView {
    let notifications = use_notifications();

    view! {
        <div class="notification-tray">
            <For
                each=move || notifications.notices.get()
                key=|notice| notice.id
                children=move |notice| {
                    let class = match notice.kind {
                        NoticeKind::Success => "notice success",
                        NoticeKind::Error => "notice error",
                    };
                    let id = notice.id;
                    view! {
                        <div class=class on:click=move |_| notifications.dismiss(id)>
                            {notice.text.clone()}
                        </div>
                    }
                }
            />
        </div>
    }
}
