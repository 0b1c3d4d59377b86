//! Domain Models
//!
//! Records served by the REST backend, one struct per collection. Field
//! names follow the backend's camelCase wire format.

use serde::{Deserialize, Serialize};

use crate::resource::{Ref, Resource};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub id: u32,
    pub name: String,
}

impl Resource for City {
    const KIND: &'static str = "City";
    fn id(&self) -> u32 {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: u32,
    pub name: String,
}

impl Resource for Category {
    const KIND: &'static str = "Category";
    fn id(&self) -> u32 {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubCategory {
    pub id: u32,
    pub name: String,
    pub category_id: Ref<Category>,
}

impl Resource for SubCategory {
    const KIND: &'static str = "SubCategory";
    fn id(&self) -> u32 {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: u32,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub telephone: String,
    pub city_id: Option<Ref<City>>,
}

impl Resource for Customer {
    const KIND: &'static str = "Customer";
    fn id(&self) -> u32 {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seller {
    pub id: u32,
    pub name: String,
    pub surname: String,
    pub permanent_employee: bool,
}

impl Resource for Seller {
    const KIND: &'static str = "Seller";
    fn id(&self) -> u32 {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCard {
    pub id: u32,
    #[serde(rename = "type")]
    pub card_type: String,
    pub card_number: String,
    pub expiration_month: u32,
    pub expiration_year: u32,
}

impl Resource for CreditCard {
    const KIND: &'static str = "CreditCard";
    fn id(&self) -> u32 {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub product_number: String,
    pub color: String,
    pub price: f64,
    pub sub_category_id: Ref<SubCategory>,
}

impl Resource for Product {
    const KIND: &'static str = "Product";
    fn id(&self) -> u32 {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: u32,
    pub bill_number: String,
    pub date: String,
    pub customer_id: Option<Ref<Customer>>,
    pub seller_id: Option<Ref<Seller>>,
    #[serde(default)]
    pub credit_card_id: Option<Ref<CreditCard>>,
    pub total: f64,
}

impl Resource for Bill {
    const KIND: &'static str = "Bill";
    fn id(&self) -> u32 {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: u32,
    pub bill_id: Ref<Bill>,
    pub product_id: Ref<Product>,
    pub quantity: u32,
    pub total_price: f64,
}

impl Resource for Item {
    const KIND: &'static str = "Item";
    fn id(&self) -> u32 {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u32,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl Resource for User {
    const KIND: &'static str = "User";
    fn id(&self) -> u32 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bill_reads_the_wire_format() {
        let bill: Bill = serde_json::from_value(json!({
            "id": 1,
            "billNumber": "B-0001",
            "date": "2024-01-15",
            "customerId": 2,
            "sellerId": null,
            "creditCardId": 3,
            "total": 99.5
        }))
        .unwrap();

        assert_eq!(bill.bill_number, "B-0001");
        assert_eq!(bill.customer_id.map(|r| r.id()), Some(2));
        assert_eq!(bill.seller_id, None);
        assert_eq!(bill.credit_card_id.map(|r| r.id()), Some(3));
    }

    #[test]
    fn credit_card_maps_the_type_field() {
        let card: CreditCard = serde_json::from_value(json!({
            "id": 4,
            "type": "visa",
            "cardNumber": "4111111111111111",
            "expirationMonth": 9,
            "expirationYear": 2027
        }))
        .unwrap();

        assert_eq!(card.card_type, "visa");
        assert_eq!(Resource::id(&card), 4);
    }
}
