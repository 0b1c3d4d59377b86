//! Customers Page
//!
//! Customer table with a drill-down dialog listing the selected
//! customer's bills; clicking a bill jumps to its items.

use std::collections::HashMap;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use serde_json::json;

use crate::api;
use crate::components::{Column, EntityTable, ReferenceCell};
use crate::form::{FieldKind, FormField, Rule, SelectOption};
use crate::format::{format_date, format_money};
use crate::models::{Bill, City, CreditCard, Customer};
use crate::notify::use_notifications;

#[component]
pub fn CustomersPage() -> impl IntoView {
    let notifications = use_notifications();
    let navigate = use_navigate();

    let cities = RwSignal::new(Vec::<SelectOption>::new());
    // Credit cards are few; resolve bill cards from one preloaded map.
    let cards = RwSignal::new(HashMap::<u32, CreditCard>::new());

    let selected_customer = RwSignal::new(Option::<Customer>::None);
    let customer_bills = RwSignal::new(Vec::<Bill>::new());
    let bills_open = RwSignal::new(false);
    let bills_loading = RwSignal::new(false);

    Effect::new(move |_| {
        spawn_local(async move {
            match api::list_all::<City>().await {
                Ok(list) => cities.set(
                    list.into_iter()
                        .map(|city| SelectOption::new(city.id, city.name))
                        .collect(),
                ),
                Err(err) => {
                    web_sys::console::error_1(&format!("Failed to fetch cities: {err}").into())
                }
            }
            match api::list_all::<CreditCard>().await {
                Ok(list) => cards.set(list.into_iter().map(|card| (card.id, card)).collect()),
                Err(err) => web_sys::console::error_1(
                    &format!("Failed to fetch credit cards: {err}").into(),
                ),
            }
        });
    });

    let on_row_click = Callback::new(move |customer: Customer| {
        let id = customer.id;
        selected_customer.set(Some(customer));
        customer_bills.set(Vec::new());
        bills_open.set(true);
        bills_loading.set(true);
        spawn_local(async move {
            match api::list_where::<Bill>("customerId", &json!(id)).await {
                Ok(bills) => customer_bills.set(bills),
                Err(err) => {
                    notifications.error(format!("Failed to fetch customer bills: {err}"));
                }
            }
            bills_loading.set(false);
        });
    });

    let columns = vec![
        Column::new("ID", |customer: Customer| customer.id.to_string().into_any()).sortable("id"),
        Column::new("Name", |customer: Customer| customer.name.into_any()).sortable("name"),
        Column::new("Surname", |customer: Customer| customer.surname.into_any())
            .sortable("surname"),
        Column::new("Email", |customer: Customer| {
            view! {
                <a href=format!("mailto:{}", customer.email)>
                    <span class="tag blue">{customer.email.clone()}</span>
                </a>
            }
            .into_any()
        })
        .sortable("email"),
        Column::new("Telephone", |customer: Customer| customer.telephone.into_any())
            .sortable("telephone"),
        Column::new("City", |customer: Customer| match customer.city_id {
            Some(reference) => view! {
                <ReferenceCell
                    reference=reference
                    render={|city: Option<City>| match city {
                        Some(city) => view! { <span class="tag blue">{city.name}</span> }.into_any(),
                        None => view! { <span class="tag">"No City"</span> }.into_any(),
                    }}
                />
            }
            .into_any(),
            None => view! { <span class="tag">"No City"</span> }.into_any(),
        })
        .sortable("cityId"),
    ];

    let fields = vec![
        FormField::new("name", "Name", FieldKind::Text).required(),
        FormField::new("surname", "Surname", FieldKind::Text).required(),
        FormField::new("email", "Email", FieldKind::Text)
            .required()
            .rule(Rule::Email),
        FormField::new("telephone", "Telephone", FieldKind::Text).required(),
        FormField::new("cityId", "City", FieldKind::select(cities.into())),
    ];

    let close_bills = move |_| bills_open.set(false);

    view! {
        <EntityTable
            title="Customers"
            columns=columns
            fields=fields
            on_row_click=on_row_click
        />

        <Show when=move || bills_open.get()>
            <div class="modal-backdrop" on:click=close_bills>
                <div class="modal wide" on:click=|ev| ev.stop_propagation()>
                    <h3>
                        {move || {
                            selected_customer.with(|customer| match customer {
                                Some(c) => format!("Bills for {} {}", c.name, c.surname),
                                None => "Bills".to_string(),
                            })
                        }}
                    </h3>
                    <Show
                        when=move || !bills_loading.get()
                        fallback=|| view! { <p>"Loading…"</p> }
                    >
                        <table class="drill-down">
                            <thead>
                                <tr>
                                    <th>"ID"</th>
                                    <th>"Bill No."</th>
                                    <th>"Date"</th>
                                    <th>"Total"</th>
                                    <th>"Card Type"</th>
                                    <th>"Card Number"</th>
                                    <th>"Expiration"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {
                                    let navigate = StoredValue::new(navigate.clone());
                                    move || {
                                        let navigate = navigate.get_value();
                                        customer_bills
                                            .get()
                                            .into_iter()
                                            .map(|bill| {
                                                let navigate = navigate.clone();
                                                let card = bill.credit_card_id.and_then(|r| {
                                                    cards.with(|map| map.get(&r.id()).cloned())
                                                });
                                                let (card_type, card_number, expiration) = match card {
                                                    Some(card) => (
                                                        card.card_type.to_uppercase(),
                                                        card.card_number.clone(),
                                                        format!(
                                                            "{}/{}",
                                                            card.expiration_month,
                                                            card.expiration_year
                                                        ),
                                                    ),
                                                    None => (
                                                        "Cash".to_string(),
                                                        "-".to_string(),
                                                        "-".to_string(),
                                                    ),
                                                };
                                                let bill_id = bill.id;
                                                view! {
                                                    <tr
                                                        class="clickable"
                                                        on:click=move |_| {
                                                            bills_open.set(false);
                                                            navigate(
                                                                &format!("/items?billId={bill_id}"),
                                                                Default::default(),
                                                            );
                                                        }
                                                    >
                                                        <td>{bill.id.to_string()}</td>
                                                        <td>{bill.bill_number.clone()}</td>
                                                        <td>{format_date(&bill.date)}</td>
                                                        <td>{format_money(bill.total)}</td>
                                                        <td>{card_type}</td>
                                                        <td>{card_number}</td>
                                                        <td>{expiration}</td>
                                                    </tr>
                                                }
                                            })
                                            .collect_view()
                                    }
                                }
                            </tbody>
                        </table>
                    </Show>
                </div>
            </div>
        </Show>
    }
}
