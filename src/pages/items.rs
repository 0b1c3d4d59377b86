//! Items Page
//!
//! All items, or one bill's items when `?billId=` is present. The scoped
//! view adds a bill header with running totals and cascading
//! category → subcategory → product selection in the form.

use std::collections::HashSet;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_query_map;
use serde_json::{json, Value};

use crate::api;
use crate::components::{Column, EntityTable, ReferenceCell};
use crate::form::{FieldKind, FormField, FormModel, Rule, SelectOption};
use crate::format::format_money;
use crate::models::{Bill, Category, Customer, Item, Product, SubCategory};
use crate::resource::Ref;

/// Distinct item count and summed price for one bill.
fn bill_totals(items: &[Item]) -> (usize, f64) {
    let distinct: HashSet<u32> = items.iter().map(|item| item.id).collect();
    let price = items.iter().map(|item| item.total_price).sum();
    (distinct.len(), price)
}

#[component]
pub fn ItemsPage() -> impl IntoView {
    let query_map = use_query_map();
    let bill_id = Memo::new(move |_| {
        query_map.with(|q| q.get("billId").and_then(|v| v.parse::<u32>().ok()))
    });

    // The form model lives here so the edit hook can prefill the cascade.
    let form = RwSignal::new(FormModel::new());

    let categories = RwSignal::new(Vec::<SelectOption>::new());
    let sub_categories = RwSignal::new(Vec::<SelectOption>::new());
    let product_options = RwSignal::new(Vec::<SelectOption>::new());
    let products = RwSignal::new(Vec::<Product>::new());
    let selected_category = RwSignal::new(Option::<u32>::None);
    let selected_sub_category = RwSignal::new(Option::<u32>::None);

    let bill_header = RwSignal::new(Option::<(Bill, Customer)>::None);
    let totals = RwSignal::new((0usize, 0.0f64));

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

    // Subcategories follow the selected category.
    Effect::new(move |_| match selected_category.get() {
        Some(category_id) => spawn_local(async move {
            match api::list_where::<SubCategory>("categoryId", &json!(category_id)).await {
                Ok(list) => sub_categories.set(
                    list.into_iter()
                        .map(|sub| SelectOption::new(sub.id, sub.name))
                        .collect(),
                ),
                Err(err) => web_sys::console::error_1(
                    &format!("Failed to fetch subcategories: {err}").into(),
                ),
            }
        }),
        None => sub_categories.set(Vec::new()),
    });

    // Products follow the selected subcategory.
    Effect::new(move |_| match selected_sub_category.get() {
        Some(sub_id) => spawn_local(async move {
            match api::list_where::<Product>("subCategoryId", &json!(sub_id)).await {
                Ok(list) => {
                    product_options.set(
                        list.iter()
                            .map(|p| {
                                SelectOption::new(
                                    p.id,
                                    format!("{} ({})", p.name, p.product_number),
                                )
                            })
                            .collect(),
                    );
                    products.set(list);
                }
                Err(err) => web_sys::console::error_1(
                    &format!("Failed to fetch products: {err}").into(),
                ),
            }
        }),
        None => {
            product_options.set(Vec::new());
            products.set(Vec::new());
        }
    });

    let refresh_totals = move || {
        let Some(id) = bill_id.get_untracked() else {
            return;
        };
        spawn_local(async move {
            match api::list_where::<Item>("billId", &json!(id)).await {
                Ok(items) => totals.set(bill_totals(&items)),
                Err(err) => {
                    web_sys::console::error_1(&format!("Failed to fetch items: {err}").into())
                }
            }
        });
    };

    // Bill header and totals follow ?billId=.
    Effect::new(move |_| match bill_id.get() {
        Some(id) => {
            spawn_local(async move {
                match api::fetch_one(Ref::<Bill>::new(id)).await {
                    Ok(bill) => {
                        let customer = match bill.customer_id {
                            Some(reference) => api::fetch_one(reference).await.ok(),
                            None => None,
                        };
                        if let Some(customer) = customer {
                            bill_header.set(Some((bill, customer)));
                        }
                    }
                    Err(err) => web_sys::console::error_1(
                        &format!("Failed to fetch bill information: {err}").into(),
                    ),
                }
            });
            refresh_totals();
        }
        None => {
            bill_header.set(None);
            totals.set((0, 0.0));
        }
    });

    let on_category_change = Callback::new(move |value: Value| {
        selected_category.set(value.as_u64().map(|v| v as u32));
        selected_sub_category.set(None);
        form.update(|m| {
            m.remove("subCategoryId");
            m.remove("productId");
        });
    });

    let on_sub_category_change = Callback::new(move |value: Value| {
        selected_sub_category.set(value.as_u64().map(|v| v as u32));
        form.update(|m| {
            m.remove("productId");
        });
    });

    // Editing an item needs the cascade pre-selected: resolve the product
    // and its subcategory first.
    let on_edit = Callback::new(move |item: Item| {
        spawn_local(async move {
            let product = match api::fetch_one(item.product_id).await {
                Ok(product) => product,
                Err(err) => {
                    web_sys::console::error_1(
                        &format!("Failed to fetch data for editing: {err}").into(),
                    );
                    return;
                }
            };
            let sub_category = match api::fetch_one(product.sub_category_id).await {
                Ok(sub) => sub,
                Err(err) => {
                    web_sys::console::error_1(
                        &format!("Failed to fetch data for editing: {err}").into(),
                    );
                    return;
                }
            };
            selected_category.set(Some(sub_category.category_id.id()));
            selected_sub_category.set(Some(product.sub_category_id.id()));
            form.update(|m| {
                m.insert("categoryId".to_string(), json!(sub_category.category_id.id()));
                m.insert(
                    "subCategoryId".to_string(),
                    json!(product.sub_category_id.id()),
                );
            });
        });
    });

    // The cascade fields are form-only; what the backend stores is the
    // product, the quantity, the owning bill and the derived total.
    let transform = Callback::new(move |values: FormModel| {
        let quantity = values.get("quantity").and_then(Value::as_f64).unwrap_or(0.0);
        let price = values
            .get("productId")
            .and_then(Value::as_u64)
            .and_then(|id| {
                products.with_untracked(|list| {
                    list.iter()
                        .find(|product| u64::from(product.id) == id)
                        .map(|product| product.price)
                })
            })
            .unwrap_or(0.0);

        let mut out = FormModel::new();
        if let Some(id) = values.get("id") {
            out.insert("id".to_string(), id.clone());
        }
        match values.get("billId") {
            Some(bill) if !bill.is_null() => {
                out.insert("billId".to_string(), bill.clone());
            }
            _ => {
                if let Some(id) = bill_id.get_untracked() {
                    out.insert("billId".to_string(), json!(id));
                }
            }
        }
        if let Some(product) = values.get("productId") {
            out.insert("productId".to_string(), product.clone());
        }
        if let Some(qty) = values.get("quantity") {
            out.insert("quantity".to_string(), qty.clone());
        }
        if let Some(total) = serde_json::Number::from_f64(price * quantity) {
            out.insert("totalPrice".to_string(), Value::Number(total));
        }
        out
    });

    let after_submit = Callback::new(move |_| refresh_totals());

    let columns = vec![
        Column::new("ID", |item: Item| item.id.to_string().into_any()).sortable("id"),
        Column::new("Product", |item: Item| {
            view! {
                <ReferenceCell
                    reference=item.product_id
                    render={|product: Option<Product>| {
                        product.map(|p| p.name).unwrap_or_default().into_any()
                    }}
                />
            }
            .into_any()
        })
        .sortable("productId"),
        Column::new("Product Number", |item: Item| {
            view! {
                <ReferenceCell
                    reference=item.product_id
                    render={|product: Option<Product>| {
                        product.map(|p| p.product_number).unwrap_or_default().into_any()
                    }}
                />
            }
            .into_any()
        }),
        Column::new("Color", |item: Item| {
            view! {
                <ReferenceCell
                    reference=item.product_id
                    render={|product: Option<Product>| match product {
                        Some(product) => view! {
                            <span
                                class="tag"
                                style=format!("background-color:{}", product.color)
                            >
                                {product.color.to_uppercase()}
                            </span>
                        }
                        .into_any(),
                        None => view! { <span class="tag">"-"</span> }.into_any(),
                    }}
                />
            }
            .into_any()
        }),
        Column::new("Quantity", |item: Item| item.quantity.to_string().into_any())
            .sortable("quantity"),
        Column::new("Price per Piece", |item: Item| {
            view! {
                <ReferenceCell
                    reference=item.product_id
                    render={|product: Option<Product>| {
                        product
                            .map(|p| format_money(p.price))
                            .unwrap_or_else(|| "-".to_string())
                            .into_any()
                    }}
                />
            }
            .into_any()
        }),
        Column::new("Total Price", |item: Item| {
            let quantity = item.quantity;
            view! {
                <ReferenceCell
                    reference=item.product_id
                    render={move |product: Option<Product>| {
                        let total = product.map(|p| p.price).unwrap_or(0.0) * f64::from(quantity);
                        view! { <strong>{format_money(total)}</strong> }.into_any()
                    }}
                />
            }
            .into_any()
        }),
    ];

    let fields = vec![
        FormField::new("id", "Id", FieldKind::Hidden),
        FormField::new("billId", "Bill", FieldKind::Hidden),
        FormField::new(
            "categoryId",
            "Category",
            FieldKind::select_with(categories.into(), on_category_change),
        )
        .required(),
        FormField::new(
            "subCategoryId",
            "Sub Category",
            FieldKind::select_with(sub_categories.into(), on_sub_category_change),
        )
        .required(),
        FormField::new("productId", "Product", FieldKind::select(product_options.into()))
            .required(),
        FormField::new("quantity", "Quantity", FieldKind::Number { min: Some(1.0) })
            .required()
            .rule(Rule::Min(1.0)),
    ];

    view! {
        {move || {
            bill_header
                .get()
                .map(|(bill, customer)| {
                    let (count, price) = totals.get();
                    view! {
                        <div class="bill-info">
                            <h1>{format!("{} {}", customer.name, customer.surname)}</h1>
                            <div class="bill-info-details">
                                <p><strong>"Customer ID: "</strong>{customer.id}</p>
                                <p><strong>"Bill ID: "</strong>{bill.id}</p>
                                <p><strong>"Telephone: "</strong>{customer.telephone.clone()}</p>
                                <p>
                                    <strong>"Email: "</strong>
                                    <a href=format!("mailto:{}", customer.email)>
                                        {customer.email.clone()}
                                    </a>
                                </p>
                                <p><strong>"Total items: "</strong>{count}</p>
                                <p><strong>{format!("Total price: {}", format_money(price))}</strong></p>
                            </div>
                        </div>
                    }
                })
        }}
        {move || {
            let scoped = bill_id.get();
            let title = match scoped {
                Some(id) => format!("Items for bill #{id}"),
                None => "Items".to_string(),
            };
            let filters = scoped
                .map(|id| vec![("billId".to_string(), json!(id))])
                .unwrap_or_default();
            view! {
                <EntityTable
                    title=title
                    columns=columns.clone()
                    fields=fields.clone()
                    fixed_filters=filters
                    form=form
                    on_edit=on_edit
                    transform_submit=transform
                    on_after_submit=after_submit
                />
            }
        }}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u32, total_price: f64) -> Item {
        Item {
            id,
            bill_id: Ref::new(1),
            product_id: Ref::new(1),
            quantity: 1,
            total_price,
        }
    }

    #[test]
    fn totals_count_distinct_items_and_sum_prices() {
        let items = vec![item(1, 10.0), item(2, 5.5), item(2, 5.5)];
        let (count, price) = bill_totals(&items);
        assert_eq!(count, 2);
        assert_eq!(price, 21.0);
    }

    #[test]
    fn totals_of_an_empty_bill_are_zero() {
        assert_eq!(bill_totals(&[]), (0, 0.0));
    }
}
