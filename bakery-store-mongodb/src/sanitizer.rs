//! Field name sanitization for MongoDB compatibility.
//!
//! MongoDB reserves dots and dollar signs in field names for query syntax, and field names
//! may not contain NUL. Keys are escaped before a document is written and restored when it is
//! read back. Values are stored untouched.
//!
//! The escape character `%` is itself escaped, so restoring is exact for any key.

use bson::{Bson, Document};

use bakery_store::document::ID_KEY;

pub(crate) struct KeySanitizer;

impl KeySanitizer {
    const ESCAPES: [(char, &'static str); 4] =
        [('%', "%25"), ('.', "%2E"), ('$', "%24"), ('\0', "%00")];

    /// Escapes every key of a document, recursing into nested documents and arrays.
    ///
    /// The top-level `_id` key is left as-is.
    pub(crate) fn sanitize_document(document: Document) -> Document {
        document
            .into_iter()
            .map(|(key, value)| {
                let key = if key == ID_KEY { key } else { Self::sanitize_key(&key) };
                (key, Self::map_value(value, Self::sanitize_key))
            })
            .collect()
    }

    /// Reverts [`sanitize_document`](Self::sanitize_document).
    pub(crate) fn restore_document(document: Document) -> Document {
        document
            .into_iter()
            .map(|(key, value)| {
                let key = if key == ID_KEY { key } else { Self::restore_key(&key) };
                (key, Self::map_value(value, Self::restore_key))
            })
            .collect()
    }

    pub(crate) fn sanitize_key(input: &str) -> String {
        let mut sanitized = String::with_capacity(input.len());
        for c in input.chars() {
            match Self::ESCAPES.iter().find(|(target, _)| *target == c) {
                Some((_, escaped)) => sanitized.push_str(escaped),
                None => sanitized.push(c),
            }
        }
        sanitized
    }

    pub(crate) fn restore_key(input: &str) -> String {
        let mut restored = String::with_capacity(input.len());
        let mut rest = input;
        while let Some(pos) = rest.find('%') {
            restored.push_str(&rest[..pos]);
            let tail = &rest[pos..];
            match Self::ESCAPES.iter().find(|(_, escaped)| tail.starts_with(*escaped)) {
                Some((target, escaped)) => {
                    restored.push(*target);
                    rest = &tail[escaped.len()..];
                }
                None => {
                    restored.push('%');
                    rest = &tail[1..];
                }
            }
        }
        restored.push_str(rest);
        restored
    }

    fn map_value(value: Bson, rename: fn(&str) -> String) -> Bson {
        match value {
            Bson::Array(arr) => Bson::Array(
                arr.into_iter()
                    .map(|item| Self::map_value(item, rename))
                    .collect(),
            ),
            Bson::Document(doc) => Bson::Document(
                doc.into_iter()
                    .map(|(k, v)| (rename(&k), Self::map_value(v, rename)))
                    .collect(),
            ),
            other => other,
        }
    }
}
