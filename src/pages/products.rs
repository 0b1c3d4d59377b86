//! Products Page

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{Column, EntityTable, ReferenceCell};
use crate::form::{FieldKind, FormField, Rule, SelectOption};
use crate::format::format_money;
use crate::models::{Category, Product, SubCategory};

#[component]
pub fn ProductsPage() -> impl IntoView {
    let sub_categories = RwSignal::new(Vec::<SelectOption>::new());

    Effect::new(move |_| {
        spawn_local(async move {
            match api::list_all::<SubCategory>().await {
                Ok(list) => sub_categories.set(
                    list.into_iter()
                        .map(|sub| SelectOption::new(sub.id, sub.name))
                        .collect(),
                ),
                Err(err) => web_sys::console::error_1(
                    &format!("Failed to fetch subcategories: {err}").into(),
                ),
            }
        });
    });

    let columns = vec![
        Column::new("ID", |product: Product| product.id.to_string().into_any()).sortable("id"),
        Column::new("Name", |product: Product| product.name.into_any()).sortable("name"),
        Column::new("Product Number", |product: Product| {
            product.product_number.into_any()
        })
        .sortable("productNumber"),
        Column::new("Color", |product: Product| {
            view! {
                <span class="tag" style=format!("background-color:{}", product.color)>
                    {product.color.to_uppercase()}
                </span>
            }
            .into_any()
        })
        .sortable("color"),
        Column::new("Price", |product: Product| {
            format_money(product.price).into_any()
        })
        .sortable("price"),
        // Parent category is two hops away: product → subcategory → category.
        Column::new("Category", |product: Product| {
            view! {
                <ReferenceCell
                    reference=product.sub_category_id
                    render={|sub: Option<SubCategory>| match sub {
                        Some(sub) => view! {
                            <ReferenceCell
                                reference=sub.category_id
                                render={|category: Option<Category>| match category {
                                    Some(category) => {
                                        view! { <span class="tag blue">{category.name}</span> }
                                            .into_any()
                                    }
                                    None => {
                                        view! { <span class="tag">"No Category"</span> }.into_any()
                                    }
                                }}
                            />
                        }
                        .into_any(),
                        None => view! { <span class="tag">"No Category"</span> }.into_any(),
                    }}
                />
            }
            .into_any()
        })
        .sortable("subCategoryId"),
        Column::new("SubCategory", |product: Product| {
            view! {
                <ReferenceCell
                    reference=product.sub_category_id
                    render={|sub: Option<SubCategory>| match sub {
                        Some(sub) => view! { <span class="tag green">{sub.name}</span> }.into_any(),
                        None => view! { <span class="tag">"No SubCategory"</span> }.into_any(),
                    }}
                />
            }
            .into_any()
        }),
    ];

    let fields = vec![
        FormField::new("name", "Name", FieldKind::Text).required(),
        FormField::new("productNumber", "Product Number", FieldKind::Text).required(),
        FormField::new("color", "Color", FieldKind::Text).required(),
        FormField::new("price", "Price", FieldKind::Number { min: Some(0.0) })
            .required()
            .rule(Rule::Min(0.0)),
        FormField::new(
            "subCategoryId",
            "SubCategory",
            FieldKind::select(sub_categories.into()),
        )
        .required(),
    ];

    view! { <EntityTable title="Products" columns=columns fields=fields/> }
}
