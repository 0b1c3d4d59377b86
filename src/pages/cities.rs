//! Cities Page

use leptos::prelude::*;

use crate::components::{Column, EntityTable};
use crate::form::{FieldKind, FormField};
use crate::models::City;

#[component]
pub fn CitiesPage() -> impl IntoView {
    let columns = vec![
        Column::new("ID", |city: City| city.id.to_string().into_any()).sortable("id"),
        Column::new("Name", |city: City| city.name.into_any()).sortable("name"),
    ];

    let fields = vec![FormField::new("name", "Name", FieldKind::Text).required()];

    view! { <EntityTable title="Cities" columns=columns fields=fields/> }
}
