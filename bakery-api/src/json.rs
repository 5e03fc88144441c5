//! Rendering stored documents as public JSON.

use bakery_store::document::{ID_KEY, id_to_string};
use bson::{Bson, Document as BsonDocument};
use chrono::SecondsFormat;
use serde_json::{Map, Number, Value};

/// Key under which the identifier is exposed to clients.
pub const PUBLIC_ID_KEY: &str = "id";

/// Converts a BSON value to JSON.
///
/// Object ids become hex strings and datetimes become RFC 3339 strings. Non-finite doubles
/// become `null`; other BSON-only types are rendered with their display form.
pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => Value::String(
            dt.to_chrono()
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        ),
        Bson::Document(doc) => Value::Object(document_to_json(doc)),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        Bson::Double(n) => Number::from_f64(n).map_or(Value::Null, Value::Number),
        Bson::Int32(n) => Value::from(n),
        Bson::Int64(n) => Value::from(n),
        Bson::String(s) => Value::String(s),
        Bson::Boolean(b) => Value::Bool(b),
        Bson::Null | Bson::Undefined => Value::Null,
        other => Value::String(other.to_string()),
    }
}

fn document_to_json(document: BsonDocument) -> Map<String, Value> {
    document
        .into_iter()
        .map(|(key, value)| (key, bson_to_json(value)))
        .collect()
}

/// Renders a stored document with its `_id` replaced by a string `id`.
pub fn with_public_id(mut document: BsonDocument) -> Value {
    let id = document.remove(ID_KEY);
    let mut object = document_to_json(document);

    if let Some(id) = id {
        object.insert(PUBLIC_ID_KEY.to_string(), Value::String(id_to_string(id)));
    }

    Value::Object(object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::{doc, oid::ObjectId};
    use serde_json::json;

    #[test]
    fn replaces_object_id_with_string_id() {
        let oid = ObjectId::new();

        let value = with_public_id(doc! { "_id": oid, "name": "Rye", "price": 6.0 });

        assert_eq!(value, json!({ "id": oid.to_hex(), "name": "Rye", "price": 6.0 }));
    }

    #[test]
    fn string_ids_are_kept_verbatim() {
        let value = with_public_id(doc! { "_id": "seed-1" });

        assert_eq!(value, json!({ "id": "seed-1" }));
    }

    #[test]
    fn documents_without_id_are_left_alone() {
        assert_eq!(with_public_id(doc! { "name": "Rye" }), json!({ "name": "Rye" }));
    }

    #[test]
    fn datetimes_render_as_rfc3339() {
        let dt = bson::DateTime::from_millis(0);

        assert_eq!(
            bson_to_json(Bson::DateTime(dt)),
            json!("1970-01-01T00:00:00.000Z")
        );
    }

    #[test]
    fn nested_values_are_converted() {
        let value = bson_to_json(Bson::Document(doc! {
            "items": [{ "item_id": "a", "quantity": 2 }],
            "notes": Bson::Null,
            "is_available": true,
        }));

        assert_eq!(
            value,
            json!({
                "items": [{ "item_id": "a", "quantity": 2 }],
                "notes": null,
                "is_available": true,
            })
        );
    }
}
