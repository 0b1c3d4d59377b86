//! Credit Cards Page

use leptos::prelude::*;

use crate::components::{Column, EntityTable};
use crate::form::{FieldKind, FormField, Rule, SelectOption};
use crate::models::CreditCard;

const CARD_TYPES: &[&str] = &[
    "visa",
    "mastercard",
    "american_express",
    "discover",
    "diners_club",
    "jcb",
    "maestro",
];

#[component]
pub fn CreditCardsPage() -> impl IntoView {
    let columns = vec![
        Column::new("ID", |card: CreditCard| card.id.to_string().into_any()).sortable("id"),
        Column::new("Type", |card: CreditCard| {
            view! { <span class="tag blue">{card.card_type.to_uppercase()}</span> }.into_any()
        })
        .sortable("type"),
        Column::new("Card Number", |card: CreditCard| card.card_number.into_any())
            .sortable("cardNumber"),
        Column::new("Expiration", |card: CreditCard| {
            format!("{}/{}", card.expiration_month, card.expiration_year).into_any()
        }),
    ];

    let card_types = Signal::stored(
        CARD_TYPES
            .iter()
            .map(|kind| SelectOption::new(*kind, kind.to_uppercase()))
            .collect::<Vec<_>>(),
    );

    let fields = vec![
        FormField::new("type", "Card Type", FieldKind::select(card_types)).required(),
        FormField::new("cardNumber", "Card Number", FieldKind::Text).required(),
        FormField::new(
            "expirationMonth",
            "Expiration Month",
            FieldKind::Number { min: Some(1.0) },
        )
        .required()
        .rule(Rule::Min(1.0)),
        FormField::new(
            "expirationYear",
            "Expiration Year",
            FieldKind::Number { min: Some(2000.0) },
        )
        .required()
        .rule(Rule::Min(2000.0)),
    ];

    view! { <EntityTable title="Credit Cards" columns=columns fields=fields/> }
}
