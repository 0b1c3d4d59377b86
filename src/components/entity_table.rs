//! Entity Table
//!
//! Generic paginated, sortable, searchable table over one REST
//! collection, with a create/edit modal and per-row delete confirmation.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::Value;

use crate::api;
use crate::components::{DeleteConfirmButton, EntityForm};
use crate::form::{collect_values, validate, FormField, FormModel};
use crate::notify::use_notifications;
use crate::query::{QueryState, SortDirection};
use crate::resource::{merge_record, remove_by_id, replace_by_id, Resource};

/// Milliseconds of quiet time before a query change hits the network.
const DEBOUNCE_MS: u32 = 300;

const PAGE_SIZES: &[u32] = &[10, 20, 50];

/// Column descriptor: header title, optional server-side sort field, and
/// a cell renderer.
#[derive(Clone)]
pub struct Column<R: Resource> {
    pub title: &'static str,
    pub sort_field: Option<&'static str>,
    pub render: Callback<R, AnyView>,
}

impl<R: Resource> Column<R> {
    pub fn new(
        title: &'static str,
        render: impl Fn(R) -> AnyView + Send + Sync + 'static,
    ) -> Self {
        Self {
            title,
            sort_field: None,
            render: Callback::new(render),
        }
    }

    /// Make the column header sortable on `field`.
    pub fn sortable(mut self, field: &'static str) -> Self {
        self.sort_field = Some(field);
        self
    }
}

/// Paginated CRUD table over the `R` collection.
///
/// The table owns its query state and row list; entity-specific shape
/// comes in through `columns` and `fields`. Optional hooks mirror what
/// the pages need: a row-click handler, a post-edit-load hook, a
/// submit-value transform, an after-submit callback, and an externally
/// owned form model for pages that prefill extra fields.
#[component]
pub fn EntityTable<R: Resource>(
    #[prop(into)] title: String,
    columns: Vec<Column<R>>,
    fields: Vec<FormField>,
    #[prop(optional)] fixed_filters: Vec<(String, Value)>,
    #[prop(optional)] form: Option<RwSignal<FormModel>>,
    #[prop(optional, into)] on_row_click: Option<Callback<R>>,
    #[prop(optional, into)] on_edit: Option<Callback<R>>,
    #[prop(optional, into)] transform_submit: Option<Callback<FormModel, FormModel>>,
    #[prop(optional, into)] on_after_submit: Option<Callback<()>>,
) -> impl IntoView {
    let notifications = use_notifications();

    let query = RwSignal::new(QueryState::with_filters(fixed_filters));
    let rows = RwSignal::new(Vec::<R>::new());
    let total = RwSignal::new(0u32);
    let loading = RwSignal::new(true);

    let modal_open = RwSignal::new(false);
    let editing = RwSignal::new(Option::<R>::None);
    let model = form.unwrap_or_else(|| RwSignal::new(FormModel::new()));
    let errors = RwSignal::new(Vec::<(String, String)>::new());

    let columns = StoredValue::new(columns);
    let fields = StoredValue::new(fields);
    let title = StoredValue::new(title);

    // Debounce: a newer query change supersedes the armed timer. Each
    // fetch that does fire carries a token; a response whose token is no
    // longer current lost the race and is discarded.
    let debounce_generation = StoredValue::new(0u64);
    let fetch_token = StoredValue::new(0u64);

    Effect::new(move |_| {
        let snapshot = query.get();
        let generation = debounce_generation.with_value(|g| g + 1);
        debounce_generation.set_value(generation);

        spawn_local(async move {
            TimeoutFuture::new(DEBOUNCE_MS).await;
            if debounce_generation.get_value() != generation {
                return; // superseded while waiting
            }

            let token = fetch_token.with_value(|t| t + 1);
            fetch_token.set_value(token);
            loading.set(true);

            let result = api::list::<R>(&snapshot).await;
            if fetch_token.get_value() != token {
                return; // a newer fetch owns the table now
            }
            match result {
                Ok((list, count)) => {
                    rows.set(list);
                    total.set(count);
                }
                Err(err) => {
                    let entity = title.with_value(|t| t.to_lowercase());
                    notifications.error(format!("Failed to fetch {entity}: {err}"));
                }
            }
            loading.set(false);
        });
    });

    let open_create = move |_| {
        editing.set(None);
        model.set(FormModel::new());
        errors.set(Vec::new());
        modal_open.set(true);
    };

    let open_edit = move |record: R| {
        match serde_json::to_value(&record) {
            Ok(Value::Object(map)) => model.set(map),
            _ => model.set(FormModel::new()),
        }
        errors.set(Vec::new());
        editing.set(Some(record.clone()));
        modal_open.set(true);
        if let Some(hook) = on_edit {
            hook.run(record);
        }
    };

    let close_modal = move |_| {
        modal_open.set(false);
        editing.set(None);
        model.set(FormModel::new());
        errors.set(Vec::new());
    };

    let handle_delete = move |id: u32| {
        spawn_local(async move {
            match api::delete::<R>(id).await {
                Ok(()) => {
                    rows.update(|list| remove_by_id(list, id));
                    notifications.success("Deleted successfully");
                }
                Err(err) => notifications.error(format!("Failed to delete: {err}")),
            }
        });
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let violations =
            fields.with_value(|fields| model.with_untracked(|m| validate(fields, m)));
        if !violations.is_empty() {
            errors.set(violations);
            return;
        }
        errors.set(Vec::new());

        let mut values =
            fields.with_value(|fields| model.with_untracked(|m| collect_values(fields, m)));
        if let Some(transform) = transform_submit {
            values = transform.run(values);
        }
        let current = editing.get_untracked();

        spawn_local(async move {
            let outcome = match &current {
                Some(record) => api::update::<R>(record.id(), &values).await.and_then(|_| {
                    merge_record(record, &values).map(|merged| {
                        rows.update(|list| replace_by_id(list, merged));
                        notifications.success("Updated successfully");
                    })
                }),
                None => api::create::<R>(&values).await.map(|created| {
                    rows.update(|list| list.push(created));
                    notifications.success("Created successfully");
                }),
            };
            match outcome {
                Ok(()) => {
                    modal_open.set(false);
                    editing.set(None);
                    model.set(FormModel::new());
                    if let Some(after) = on_after_submit {
                        after.run(());
                    }
                }
                Err(err) => notifications.error(format!("Failed to save: {err}")),
            }
        });
    };

    let header_cells = move || {
        columns.with_value(|columns| {
            columns
                .iter()
                .map(|col| {
                    let text = col.title;
                    match col.sort_field {
                        Some(field) => {
                            let indicator = move || {
                                query.with(|q| match q.sort() {
                                    Some((active, dir)) if active == field => match dir {
                                        SortDirection::Ascending => " ▲",
                                        SortDirection::Descending => " ▼",
                                    },
                                    _ => "",
                                })
                            };
                            view! {
                                <th
                                    class="sortable"
                                    on:click=move |_| query.update(|q| q.cycle_sort(field))
                                >
                                    {text}
                                    {indicator}
                                </th>
                            }
                            .into_any()
                        }
                        None => view! { <th>{text}</th> }.into_any(),
                    }
                })
                .collect_view()
        })
    };

    let body = move || {
        rows.get()
            .into_iter()
            .map(|record| {
                let cells = columns.with_value(|columns| {
                    columns
                        .iter()
                        .map(|col| view! { <td>{col.render.run(record.clone())}</td> })
                        .collect_view()
                });
                let id = record.id();
                let record_for_edit = record.clone();
                view! {
                    <tr
                        class:clickable=on_row_click.is_some()
                        on:click=move |_| {
                            if let Some(handler) = on_row_click {
                                handler.run(record.clone());
                            }
                        }
                    >
                        {cells}
                        <td class="actions">
                            <button
                                class="edit-btn"
                                on:click=move |ev| {
                                    ev.stop_propagation();
                                    open_edit(record_for_edit.clone());
                                }
                            >
                                "Edit"
                            </button>
                            <DeleteConfirmButton
                                button_class="delete-btn"
                                on_confirm=Callback::new(move |_| handle_delete(id))
                            />
                        </td>
                    </tr>
                }
            })
            .collect_view()
    };

    view! {
        <section class="entity-card">
            <header class="entity-card-header">
                <h2>{title.get_value()}</h2>
                <div class="entity-card-tools">
                    <input
                        type="search"
                        placeholder="Search..."
                        prop:value=move || query.with(|q| q.search().to_string())
                        on:input=move |ev| {
                            query.update(|q| q.set_search(event_target_value(&ev)));
                        }
                    />
                    <button class="primary" on:click=open_create>"Add New"</button>
                </div>
            </header>

            <div class="table-wrapper">
                <table>
                    <thead>
                        <tr>
                            {header_cells}
                            <th class="actions">"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>{body}</tbody>
                </table>
                <Show when=move || loading.get()>
                    <div class="table-loading">"Loading…"</div>
                </Show>
            </div>

            <div class="pagination">
                <button
                    disabled=move || query.with(|q| q.page() <= 1)
                    on:click=move |_| {
                        query.update(|q| {
                            let page = q.page();
                            q.set_page(page - 1);
                        });
                    }
                >
                    "Prev"
                </button>
                <span>
                    {move || {
                        let page = query.with(|q| q.page());
                        let pages = query.with(|q| q.page_count(total.get()));
                        format!("Page {page} of {pages} ({} total)", total.get())
                    }}
                </span>
                <button
                    disabled=move || query.with(|q| q.page() >= q.page_count(total.get()))
                    on:click=move |_| {
                        query.update(|q| {
                            let page = q.page();
                            q.set_page(page + 1);
                        });
                    }
                >
                    "Next"
                </button>
                <select on:change=move |ev| {
                    if let Ok(size) = event_target_value(&ev).parse::<u32>() {
                        query.update(|q| q.set_page_size(size));
                    }
                }>
                    {PAGE_SIZES
                        .iter()
                        .map(|size| {
                            let size = *size;
                            view! {
                                <option
                                    value=size.to_string()
                                    selected=move || query.with(|q| q.page_size() == size)
                                >
                                    {format!("{size} / page")}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </div>

            <Show when=move || modal_open.get()>
                <div class="modal-backdrop" on:click=close_modal>
                    <div class="modal" on:click=|ev| ev.stop_propagation()>
                        <h3>
                            {move || {
                                let name = title.get_value();
                                if editing.with(|e| e.is_some()) {
                                    format!("Edit {name}")
                                } else {
                                    format!("Create {name}")
                                }
                            }}
                        </h3>
                        <form on:submit=on_submit>
                            <EntityForm fields=fields.get_value() model errors/>
                            <div class="modal-actions">
                                <button type="button" on:click=close_modal>"Cancel"</button>
                                <button type="submit" class="primary">"Save"</button>
                            </div>
                        </form>
                    </div>
                </div>
            </Show>
        </section>
    }
}
