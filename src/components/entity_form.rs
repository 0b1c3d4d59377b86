//! Entity Form
//!
//! Renders declarative form fields bound to a JSON form model, with
//! inline validation errors.

use leptos::prelude::*;
use serde_json::Value;

use crate::form::{bool_value, text_value, FieldKind, FormField, FormModel, SelectOption};

fn field_error(errors: &[(String, String)], name: &str) -> Option<String> {
    errors
        .iter()
        .find(|(field, _)| field == name)
        .map(|(_, message)| message.clone())
}

/// Vertical form layout over the supplied field descriptors.
#[component]
pub fn EntityForm(
    fields: Vec<FormField>,
    model: RwSignal<FormModel>,
    errors: RwSignal<Vec<(String, String)>>,
) -> impl IntoView {
    view! {
        <div class="entity-form">
            {fields
                .into_iter()
                .map(|field| view! { <FormFieldRow field model errors/> })
                .collect_view()}
        </div>
    }
}

#[component]
fn FormFieldRow(
    field: FormField,
    model: RwSignal<FormModel>,
    errors: RwSignal<Vec<(String, String)>>,
) -> impl IntoView {
    if matches!(field.kind, FieldKind::Hidden) {
        return ().into_any();
    }

    let name = field.name;
    let error = move || errors.with(|errs| field_error(errs, name));

    let input = match field.kind.clone() {
        FieldKind::Text => view! {
            <input
                type="text"
                prop:value=move || model.with(|m| text_value(m, name))
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    model.update(|m| {
                        m.insert(name.to_string(), Value::String(value));
                    });
                }
            />
        }
        .into_any(),
        FieldKind::Password => view! {
            <input
                type="password"
                prop:value=move || model.with(|m| text_value(m, name))
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    model.update(|m| {
                        m.insert(name.to_string(), Value::String(value));
                    });
                }
            />
        }
        .into_any(),
        FieldKind::Number { min } => view! {
            <input
                type="number"
                step="any"
                min=min.map(|m| m.to_string())
                prop:value=move || model.with(|m| text_value(m, name))
                on:input=move |ev| {
                    let raw = event_target_value(&ev);
                    model.update(|m| {
                        match parse_number(&raw) {
                            Some(number) => {
                                m.insert(name.to_string(), number);
                            }
                            None => {
                                m.remove(name);
                            }
                        }
                    });
                }
            />
        }
        .into_any(),
        FieldKind::Date => view! {
            <input
                type="date"
                prop:value=move || {
                    model.with(|m| text_value(m, name).chars().take(10).collect::<String>())
                }
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    model.update(|m| {
                        m.insert(name.to_string(), Value::String(value));
                    });
                }
            />
        }
        .into_any(),
        FieldKind::Switch => view! {
            <input
                type="checkbox"
                prop:checked=move || model.with(|m| bool_value(m, name))
                on:change=move |ev| {
                    let checked = event_target_checked(&ev);
                    model.update(|m| {
                        m.insert(name.to_string(), Value::Bool(checked));
                    });
                }
            />
        }
        .into_any(),
        FieldKind::Select { options, on_change } => {
            select_input(name, field.label, options, on_change, model)
        }
        FieldKind::Hidden => ().into_any(),
    };

    view! {
        <label class="form-field">
            <span class="form-label">{field.label}</span>
            {input}
            {move || error().map(|message| view! { <span class="form-error">{message}</span> })}
        </label>
    }
    .into_any()
}

fn select_input(
    name: &'static str,
    label: &'static str,
    options: Signal<Vec<SelectOption>>,
    on_change: Option<Callback<Value>>,
    model: RwSignal<FormModel>,
) -> AnyView {
    // Option elements carry their index; the JSON value lives in `options`.
    let selected = move || {
        let current = model.with(|m| m.get(name).cloned());
        current.and_then(|value| {
            options.with(|opts| opts.iter().position(|opt| opt.value == value))
        })
    };

    view! {
        <select on:change=move |ev| {
            let raw = event_target_value(&ev);
            let choice = raw
                .parse::<usize>()
                .ok()
                .and_then(|idx| options.with_untracked(|opts| opts.get(idx).cloned()));
            if let Some(option) = choice {
                model.update(|m| {
                    m.insert(name.to_string(), option.value.clone());
                });
                if let Some(on_change) = on_change {
                    on_change.run(option.value);
                }
            }
        }>
            <option value="" disabled selected=move || selected().is_none()>
                {format!("Select {}", label.to_lowercase())}
            </option>
            {move || {
                options
                    .get()
                    .into_iter()
                    .enumerate()
                    .map(|(idx, option)| {
                        view! {
                            <option
                                value=idx.to_string()
                                selected=move || selected() == Some(idx)
                            >
                                {option.label.clone()}
                            </option>
                        }
                    })
                    .collect_view()
            }}
        </select>
    }
    .into_any()
}

fn parse_number(raw: &str) -> Option<Value> {
    if raw.is_empty() {
        return None;
    }
    if let Ok(int) = raw.parse::<i64>() {
        return Some(Value::Number(int.into()));
    }
    raw.parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
}
