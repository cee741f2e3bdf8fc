//! Issued-book projection: a book joined with the user holding it

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use utoipa::openapi::schema::{AdditionalProperties, ObjectBuilder, Schema, SchemaType};
use utoipa::openapi::RefOr;
use utoipa::ToSchema;

use super::{book::Book, user::User};

/// Derived view, built on demand and never stored.
///
/// Serializes as the book's own fields followed by `issuedBy`,
/// `issuedDate` and `returnDate`. The user's values win when the book
/// carries fields of the same name, keeping that field's position.
#[derive(Debug, Clone, PartialEq)]
pub struct IssuedBook {
    pub book: Book,
    pub issued_by: String,
    pub issued_date: Option<String>,
    pub return_date: Option<String>,
}

impl IssuedBook {
    pub fn new(book: Book, user: &User) -> Self {
        Self {
            book,
            issued_by: user.name.clone(),
            issued_date: user.issued_date.clone(),
            return_date: user.return_date.clone(),
        }
    }

    /// Book fields first; the holder's values then replace same-named
    /// fields where they sit, or are appended. A missing date drops the key.
    fn to_map(&self) -> IndexMap<&str, Value> {
        let mut map = IndexMap::with_capacity(self.book.fields.len() + 4);
        map.insert("id", Value::String(self.book.id.clone()));
        for (key, value) in &self.book.fields {
            map.insert(key.as_str(), value.clone());
        }
        map.insert("issuedBy", Value::String(self.issued_by.clone()));
        for (key, date) in [("issuedDate", &self.issued_date), ("returnDate", &self.return_date)] {
            match date {
                Some(date) => {
                    map.insert(key, Value::String(date.clone()));
                }
                None => {
                    map.shift_remove(key);
                }
            }
        }
        map
    }
}

impl Serialize for IssuedBook {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_map().serialize(serializer)
    }
}

impl<'s> ToSchema<'s> for IssuedBook {
    fn schema() -> (&'s str, RefOr<Schema>) {
        let string = || ObjectBuilder::new().schema_type(SchemaType::String);
        let object = ObjectBuilder::new()
            .description(Some("Book fields joined with the holder's name and loan dates"))
            .property("id", string())
            .property("issuedBy", string())
            .property("issuedDate", string())
            .property("returnDate", string())
            .required("id")
            .required("issuedBy")
            .additional_properties(Some(AdditionalProperties::FreeForm(true)))
            .build();
        ("IssuedBook", RefOr::T(Schema::Object(object)))
    }
}
