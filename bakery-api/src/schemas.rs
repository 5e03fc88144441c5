//! Document schemas and request validation.
//!
//! Each stored type declares its collection through [`Collection`]; bounds are checked with
//! `validator` before anything reaches the store.

use std::fmt;

use bakery_store::document::Document;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

/// Declared mapping from stored entity to collection name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    BakeryItem,
    Order,
    User,
    Product,
}

impl Collection {
    pub const fn name(self) -> &'static str {
        match self {
            Collection::BakeryItem => "bakeryitem",
            Collection::Order => "order",
            Collection::User => "user",
            Collection::Product => "product",
        }
    }
}

fn default_true() -> bool {
    true
}

/// Bakery items available for sale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct BakeryItem {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Price in dollars
    #[validate(range(min = 0.0, message = "must be greater than or equal to 0"))]
    pub price: f64,
    /// e.g. Bread, Pastry, Cake, Cookie
    pub category: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_true")]
    pub is_available: bool,
}

impl Document for BakeryItem {
    fn collection_name() -> &'static str {
        Collection::BakeryItem.name()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct OrderItem {
    /// Identifier of the bakery item. Not checked against stored items.
    pub item_id: String,
    #[validate(range(min = 1, message = "must be greater than or equal to 1"))]
    pub quantity: i64,
    /// Any other keys the client sent with the item, stored as given.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Customer orders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Order {
    pub customer_name: String,
    pub customer_phone: String,
    #[validate(nested)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Document for Order {
    fn collection_name() -> &'static str {
        Collection::Order.name()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct User {
    pub name: String,
    pub email: String,
    pub address: String,
    #[serde(default)]
    #[validate(range(min = 0, max = 120, message = "must be between 0 and 120"))]
    pub age: Option<i32>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Document for User {
    fn collection_name() -> &'static str {
        Collection::User.name()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Product {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "must be greater than or equal to 0"))]
    pub price: f64,
    pub category: String,
    #[serde(default = "default_true")]
    pub in_stock: bool,
}

impl Document for Product {
    fn collection_name() -> &'static str {
        Collection::Product.name()
    }
}

/// A single failed constraint, addressed by its path in the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub constraint: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.constraint)
    }
}

/// Every constraint a payload violated, sorted by path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Validation failed: ")?;
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationErrors> for ValidationError {
    fn from(errors: ValidationErrors) -> Self {
        let mut violations = Vec::new();
        flatten(&errors, "", &mut violations);
        violations.sort_by(|a, b| a.field.cmp(&b.field));

        Self { violations }
    }
}

fn flatten(errors: &ValidationErrors, prefix: &str, out: &mut Vec<Violation>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };

        match kind {
            ValidationErrorsKind::Field(errors) => {
                out.extend(errors.iter().map(|error| Violation {
                    field: path.clone(),
                    constraint: error
                        .message
                        .as_ref()
                        .map(|message| message.to_string())
                        .unwrap_or_else(|| error.code.to_string()),
                }));
            }
            ValidationErrorsKind::Struct(inner) => flatten(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    flatten(inner, &format!("{path}[{index}]"), out);
                }
            }
        }
    }
}

/// Validates `value` and converts any failure into a [`ValidationError`].
pub fn validate<T: Validate>(value: &T) -> Result<(), ValidationError> {
    value.validate().map_err(ValidationError::from)
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderRequestError {
    #[error("Each item requires item_id and quantity")]
    IncompleteItem { index: usize },
    #[error("Invalid item at index {index}: {reason}")]
    MalformedItem { index: usize, reason: String },
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Body of `POST /api/orders`.
///
/// Items are accepted as raw JSON so that entries missing a key can be rejected with a
/// dedicated message before they are decoded.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderRequest {
    pub customer_name: String,
    pub customer_phone: String,
    #[serde(default)]
    pub notes: Option<String>,
    pub items: Vec<Value>,
}

impl CreateOrderRequest {
    pub fn into_order(self) -> Result<Order, OrderRequestError> {
        if let Some(index) = self.items.iter().position(|entry| !has_item_keys(entry)) {
            return Err(OrderRequestError::IncompleteItem { index });
        }

        let items = self
            .items
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                serde_json::from_value::<OrderItem>(entry).map_err(|e| {
                    OrderRequestError::MalformedItem {
                        index,
                        reason: e.to_string(),
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let order = Order {
            customer_name: self.customer_name,
            customer_phone: self.customer_phone,
            items,
            notes: self.notes,
        };
        validate(&order)?;

        Ok(order)
    }
}

fn has_item_keys(entry: &Value) -> bool {
    entry
        .as_object()
        .is_some_and(|object| object.contains_key("item_id") && object.contains_key("quantity"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bakery_store::document::DocumentExt;
    use serde_json::json;

    fn order_request(items: Value) -> CreateOrderRequest {
        serde_json::from_value(json!({
            "customer_name": "Ada",
            "customer_phone": "555-0100",
            "items": items,
        }))
        .unwrap()
    }

    #[test]
    fn collection_names_come_from_the_table() {
        assert_eq!(BakeryItem::collection_name(), "bakeryitem");
        assert_eq!(Order::collection_name(), "order");
        assert_eq!(User::collection_name(), "user");
        assert_eq!(Product::collection_name(), "product");
    }

    #[test]
    fn boolean_flags_default_to_true() {
        let item: BakeryItem =
            serde_json::from_value(json!({ "name": "Rye", "price": 6.0, "category": "Bread" }))
                .unwrap();
        let user: User = serde_json::from_value(json!({
            "name": "Ada",
            "email": "ada@example.com",
            "address": "1 Loaf Lane",
        }))
        .unwrap();
        let product: Product =
            serde_json::from_value(json!({ "title": "Tin", "price": 1.0, "category": "Tools" }))
                .unwrap();

        assert!(item.is_available);
        assert_eq!(item.description, None);
        assert!(user.is_active);
        assert!(product.in_stock);
    }

    #[test]
    fn negative_price_is_rejected() {
        let item = BakeryItem {
            name: "Rye".to_string(),
            description: None,
            price: -1.0,
            category: "Bread".to_string(),
            image_url: None,
            is_available: true,
        };

        let err = validate(&item).unwrap_err();

        assert_eq!(err.violations.len(), 1);
        assert_eq!(err.violations[0].field, "price");
    }

    #[test]
    fn zero_price_is_allowed() {
        let product = Product {
            title: "Sample".to_string(),
            description: None,
            price: 0.0,
            category: "Free".to_string(),
            in_stock: true,
        };

        assert!(validate(&product).is_ok());
    }

    #[test]
    fn user_age_is_bounded() {
        let mut user = User {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            address: "1 Loaf Lane".to_string(),
            age: Some(121),
            is_active: true,
        };
        assert_eq!(validate(&user).unwrap_err().violations[0].field, "age");

        user.age = None;
        assert!(validate(&user).is_ok());
    }

    #[test]
    fn valid_order_request_parses() {
        let order = order_request(json!([{ "item_id": "abc", "quantity": 2 }]))
            .into_order()
            .unwrap();

        assert_eq!(
            order.items,
            vec![OrderItem {
                item_id: "abc".to_string(),
                quantity: 2,
                extra: Map::new(),
            }]
        );
        assert_eq!(order.notes, None);
    }

    #[test]
    fn extra_item_keys_are_kept_for_storage() {
        let order = order_request(json!([
            { "item_id": "abc", "quantity": 1, "flavour": "vanilla", "gift": true },
        ]))
        .into_order()
        .unwrap();

        assert_eq!(order.items[0].extra.get("flavour"), Some(&json!("vanilla")));
        assert_eq!(
            order.to_bson_document().unwrap().get_array("items").unwrap()[0],
            bson::Bson::Document(bson::doc! {
                "item_id": "abc",
                "quantity": 1_i64,
                "flavour": "vanilla",
                "gift": true,
            })
        );
    }

    #[test]
    fn empty_item_list_is_accepted() {
        assert!(order_request(json!([])).into_order().unwrap().items.is_empty());
    }

    #[test]
    fn missing_quantity_is_an_incomplete_item() {
        let err = order_request(json!([
            { "item_id": "abc", "quantity": 1 },
            { "item_id": "def" },
        ]))
        .into_order()
        .unwrap_err();

        assert_eq!(err, OrderRequestError::IncompleteItem { index: 1 });
        assert_eq!(err.to_string(), "Each item requires item_id and quantity");
    }

    #[test]
    fn non_object_item_is_an_incomplete_item() {
        let err = order_request(json!(["abc"])).into_order().unwrap_err();

        assert_eq!(err, OrderRequestError::IncompleteItem { index: 0 });
    }

    #[test]
    fn wrongly_typed_item_is_malformed() {
        let err = order_request(json!([{ "item_id": 7, "quantity": 1 }]))
            .into_order()
            .unwrap_err();

        assert!(matches!(err, OrderRequestError::MalformedItem { index: 0, .. }));
    }

    #[test]
    fn zero_quantity_fails_validation_with_a_nested_path() {
        let err = order_request(json!([{ "item_id": "abc", "quantity": 0 }]))
            .into_order()
            .unwrap_err();

        let OrderRequestError::Invalid(validation) = err else {
            panic!("expected a validation error, got {err:?}");
        };
        assert_eq!(validation.violations[0].field, "items[0].quantity");
        assert_eq!(
            validation.to_string(),
            "Validation failed: items[0].quantity: must be greater than or equal to 1"
        );
    }
}
