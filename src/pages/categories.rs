//! Categories Page

use leptos::prelude::*;

use crate::components::{Column, EntityTable};
use crate::form::{FieldKind, FormField};
use crate::models::Category;

#[component]
pub fn CategoriesPage() -> impl IntoView {
    let columns = vec![
        Column::new("ID", |category: Category| category.id.to_string().into_any()).sortable("id"),
        Column::new("Name", |category: Category| category.name.into_any()).sortable("name"),
    ];

    let fields = vec![FormField::new("name", "Name", FieldKind::Text).required()];

    view! { <EntityTable title="Categories" columns=columns fields=fields/> }
}
