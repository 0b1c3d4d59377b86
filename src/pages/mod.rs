//! Pages
//!
//! Entity tables and auth screens composed from the shared components.

mod bills;
mod categories;
mod cities;
mod credit_cards;
mod customers;
mod items;
mod login;
mod products;
mod register;
mod sellers;
mod sub_categories;

pub use bills::BillsPage;
pub use categories::CategoriesPage;
pub use cities::CitiesPage;
pub use credit_cards::CreditCardsPage;
pub use customers::CustomersPage;
pub use items::ItemsPage;
pub use login::LoginPage;
pub use products::ProductsPage;
pub use register::RegisterPage;
pub use sellers::SellersPage;
pub use sub_categories::SubCategoriesPage;
