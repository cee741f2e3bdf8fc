//! Library patron model

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User as loaded from the seed document. Read-only at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_date: Option<String>,
    /// Id of the book currently held; empty means none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued_book: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_date: Option<String>,
}

impl User {
    /// The issued book id, if the user actually holds one
    pub fn issued_book_id(&self) -> Option<&str> {
        self.issued_book.as_deref().filter(|id| !id.is_empty())
    }
}
