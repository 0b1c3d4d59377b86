//! Sellers Page

use leptos::prelude::*;

use crate::components::{Column, EntityTable};
use crate::form::{FieldKind, FormField};
use crate::models::Seller;

#[component]
pub fn SellersPage() -> impl IntoView {
    let columns = vec![
        Column::new("ID", |seller: Seller| seller.id.to_string().into_any()).sortable("id"),
        Column::new("Name", |seller: Seller| seller.name.into_any()).sortable("name"),
        Column::new("Surname", |seller: Seller| seller.surname.into_any()).sortable("surname"),
        Column::new("Permanent Employee", |seller: Seller| {
            let (class, text) = if seller.permanent_employee {
                ("tag green", "Yes")
            } else {
                ("tag red", "No")
            };
            view! { <span class=class>{text}</span> }.into_any()
        })
        .sortable("permanentEmployee"),
    ];

    let fields = vec![
        FormField::new("name", "Name", FieldKind::Text).required(),
        FormField::new("surname", "Surname", FieldKind::Text).required(),
        FormField::new("permanentEmployee", "Permanent Employee", FieldKind::Switch),
    ];

    view! { <EntityTable title="Sellers" columns=columns fields=fields/> }
}
