//! Bills Page

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{Column, EntityTable, ReferenceCell};
use crate::form::{FieldKind, FormField, Rule, SelectOption};
use crate::format::{format_date, format_money};
use crate::models::{Bill, Customer, Seller};

#[component]
pub fn BillsPage() -> impl IntoView {
    let customers = RwSignal::new(Vec::<SelectOption>::new());
    let sellers = RwSignal::new(Vec::<SelectOption>::new());

    Effect::new(move |_| {
        spawn_local(async move {
            match api::list_all::<Customer>().await {
                Ok(list) => customers.set(
                    list.into_iter()
                        .map(|c| SelectOption::new(c.id, format!("{} {}", c.name, c.surname)))
                        .collect(),
                ),
                Err(err) => web_sys::console::error_1(
                    &format!("Failed to fetch customers: {err}").into(),
                ),
            }
            match api::list_all::<Seller>().await {
                Ok(list) => sellers.set(
                    list.into_iter()
                        .map(|s| SelectOption::new(s.id, format!("{} {}", s.name, s.surname)))
                        .collect(),
                ),
                Err(err) => web_sys::console::error_1(
                    &format!("Failed to fetch sellers: {err}").into(),
                ),
            }
        });
    });

    let columns = vec![
        Column::new("ID", |bill: Bill| bill.id.to_string().into_any()).sortable("id"),
        Column::new("Bill no.", |bill: Bill| bill.bill_number.into_any()).sortable("billNumber"),
        Column::new("Date", |bill: Bill| format_date(&bill.date).into_any()).sortable("date"),
        Column::new("Customer", |bill: Bill| match bill.customer_id {
            Some(reference) => view! {
                <ReferenceCell
                    reference=reference
                    render={|customer: Option<Customer>| match customer {
                        Some(customer) => view! {
                            <span class="tag blue">
                                {format!("{} {}", customer.name, customer.surname)}
                            </span>
                        }
                        .into_any(),
                        None => view! { <span class="tag">"No Customer"</span> }.into_any(),
                    }}
                />
            }
            .into_any(),
            None => view! { <span class="tag">"No Customer"</span> }.into_any(),
        })
        .sortable("customerId"),
        Column::new("Seller", |bill: Bill| match bill.seller_id {
            Some(reference) => view! {
                <ReferenceCell
                    reference=reference
                    render={|seller: Option<Seller>| match seller {
                        Some(seller) => view! {
                            <span class="tag green">
                                {format!("{} {}", seller.name, seller.surname)}
                            </span>
                        }
                        .into_any(),
                        None => view! { <span class="tag">"No Seller"</span> }.into_any(),
                    }}
                />
            }
            .into_any(),
            None => view! { <span class="tag">"No Seller"</span> }.into_any(),
        })
        .sortable("sellerId"),
        Column::new("Total", |bill: Bill| format_money(bill.total).into_any()).sortable("total"),
    ];

    let fields = vec![
        FormField::new("billNumber", "Bill Number", FieldKind::Text).required(),
        FormField::new("customerId", "Customer", FieldKind::select(customers.into())).required(),
        FormField::new("sellerId", "Seller", FieldKind::select(sellers.into())).required(),
        FormField::new("total", "Total", FieldKind::Number { min: Some(0.0) })
            .required()
            .rule(Rule::Min(0.0)),
        FormField::new("date", "Date", FieldKind::Date).required(),
    ];

    view! { <EntityTable title="Bills" columns=columns fields=fields/> }
}
