//! Sub Categories Page

use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::json;

use crate::api;
use crate::components::{Column, EntityTable};
use crate::form::{FieldKind, FormField, SelectOption};
use crate::models::{Category, SubCategory};

#[component]
pub fn SubCategoriesPage() -> impl IntoView {
    let categories = RwSignal::new(Vec::<SelectOption>::new());

    Effect::new(move |_| {
        spawn_local(async move {
            match api::list_all::<Category>().await {
                Ok(list) => categories.set(
                    list.into_iter()
                        .map(|category| SelectOption::new(category.id, category.name))
                        .collect(),
                ),
                Err(err) => web_sys::console::error_1(
                    &format!("Failed to fetch categories: {err}").into(),
                ),
            }
        });
    });

    let columns = vec![
        Column::new("ID", |sub: SubCategory| sub.id.to_string().into_any()).sortable("id"),
        Column::new("Name", |sub: SubCategory| sub.name.into_any()).sortable("name"),
        // Categories are already loaded for the form select; reuse them
        // instead of resolving per cell.
        Column::new("Category", move |sub: SubCategory| {
            let label = categories.with(|options| {
                options
                    .iter()
                    .find(|option| option.value == json!(sub.category_id.id()))
                    .map(|option| option.label.clone())
            });
            match label {
                Some(name) => view! { <span class="tag blue">{name}</span> }.into_any(),
                None => view! { <span class="tag">"No Category"</span> }.into_any(),
            }
        })
        .sortable("categoryId"),
    ];

    let fields = vec![
        FormField::new("name", "Name", FieldKind::Text).required(),
        FormField::new("categoryId", "Category", FieldKind::select(categories.into())).required(),
    ];

    view! { <EntityTable title="Sub Categories" columns=columns fields=fields/> }
}
