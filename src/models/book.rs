//! Book (catalog entry) model and related types.
//!
//! Apart from its `id`, a book is an opaque, ordered set of descriptive
//! fields (title, author, genre, ...). Field order is kept as loaded so
//! responses mirror the seed documents.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::openapi::schema::{AdditionalProperties, ObjectBuilder, Schema, SchemaType};
use utoipa::openapi::RefOr;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// Catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    /// Every other field, in document order
    #[serde(flatten)]
    pub fields: IndexMap<String, Value>,
}

impl Book {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: IndexMap::new(),
        }
    }

    /// Builder-style helper, mostly for seeding and tests
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Build a book from the `data` member of a create request.
    pub fn from_payload(data: Value) -> AppResult<Self> {
        if !data.is_object() {
            return Err(invalid_book_data());
        }
        serde_json::from_value(data).map_err(|_| invalid_book_data())
    }

    /// Shallow merge: fields present in the patch overwrite or extend ours,
    /// everything else is kept. Existing fields keep their position.
    pub fn apply(&mut self, patch: BookPatch) {
        if let Some(id) = patch.id {
            self.id = id;
        }
        for (key, value) in patch.fields {
            self.fields.insert(key, value);
        }
    }
}

fn invalid_book_data() -> AppError {
    AppError::Validation("Book data must be an object with a string id".to_string())
}

fn invalid_patch_id() -> AppError {
    AppError::Validation("Book id must be a string".to_string())
}

impl<'s> ToSchema<'s> for Book {
    fn schema() -> (&'s str, RefOr<Schema>) {
        let object = ObjectBuilder::new()
            .description(Some("Catalog entry: a string `id` plus free-form descriptive fields"))
            .property("id", ObjectBuilder::new().schema_type(SchemaType::String))
            .required("id")
            .additional_properties(Some(AdditionalProperties::FreeForm(true)))
            .build();
        ("Book", RefOr::T(Schema::Object(object)))
    }
}

/// Partial update of a book.
///
/// `id` is split out so the store can check it for collisions before the
/// merge is applied.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BookPatch {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(flatten)]
    pub fields: IndexMap<String, Value>,
}

impl BookPatch {
    /// Build a patch from the `data` member of an update request.
    /// A missing or `null` payload is an empty patch.
    pub fn from_payload(data: Option<Value>) -> AppResult<Self> {
        match data {
            None | Some(Value::Null) => Ok(Self::default()),
            Some(Value::Object(map)) if map.get("id").is_some_and(Value::is_null) => {
                Err(invalid_patch_id())
            }
            Some(value @ Value::Object(_)) => {
                serde_json::from_value(value).map_err(|_| invalid_patch_id())
            }
            Some(_) => Err(AppError::Validation("Update data must be an object".to_string())),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.fields.is_empty()
    }
}
