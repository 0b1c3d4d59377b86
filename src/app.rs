//! Application Root
//!
//! Router, route guard wiring and app-wide context (session store,
//! notification tray).

use leptos::prelude::*;
use leptos_router::components::{ParentRoute, Redirect, Route, Router, Routes};
use leptos_router::path;
use reactive_stores::Store;

use crate::components::{MainLayout, RequireAuth};
use crate::notify::{NotificationTray, Notifications};
use crate::pages::{
    BillsPage, CategoriesPage, CitiesPage, CreditCardsPage, CustomersPage, ItemsPage, LoginPage,
    ProductsPage, RegisterPage, SellersPage, SubCategoriesPage,
};
use crate::session::{restore_session, SessionStore};

#[component]
pub fn App() -> impl IntoView {
    // The session store is built exactly once, from persisted state, and
    // handed to everything else through context.
    provide_context::<SessionStore>(Store::new(restore_session()));
    provide_context(Notifications::new());

    view! {
        <Router>
            <NotificationTray/>
            <Routes fallback=|| view! { <p class="not-found">"Page not found"</p> }>
                <Route path=path!("/login") view=LoginPage/>
                <Route path=path!("/register") view=RegisterPage/>
                <ParentRoute path=path!("") view=MainLayout>
                    <Route path=path!("/customers") view=CustomersPage/>
                    <Route path=path!("/cities") view=CitiesPage/>
                    <Route
                        path=path!("/bills")
                        view=|| view! { <RequireAuth><BillsPage/></RequireAuth> }
                    />
                    <Route
                        path=path!("/categories")
                        view=|| view! { <RequireAuth><CategoriesPage/></RequireAuth> }
                    />
                    <Route
                        path=path!("/credit-cards")
                        view=|| view! { <RequireAuth><CreditCardsPage/></RequireAuth> }
                    />
                    <Route
                        path=path!("/items")
                        view=|| view! { <RequireAuth><ItemsPage/></RequireAuth> }
                    />
                    <Route
                        path=path!("/products")
                        view=|| view! { <RequireAuth><ProductsPage/></RequireAuth> }
                    />
                    <Route
                        path=path!("/sellers")
                        view=|| view! { <RequireAuth><SellersPage/></RequireAuth> }
                    />
                    <Route
                        path=path!("/sub-categories")
                        view=|| view! { <RequireAuth><SubCategoriesPage/></RequireAuth> }
                    />
                    <Route path=path!("") view=|| view! { <Redirect path="/customers"/> }/>
                </ParentRoute>
            </Routes>
        </Router>
    }
}
