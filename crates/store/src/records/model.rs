// records/model.rs - records held by a resource store and the domain fields they carry

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use serde_json::Number;

/// A stored domain entry: a sequential id, the domain fields, and its creation time.
///
/// Serializes flat, e.g. `{"id":1,"name":"Alice","email":"a@x.com","createdAt":"..."}`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Record<T> {
    pub id: u64,
    #[serde(flatten)]
    pub fields: T,
    #[serde(serialize_with = "iso_millis")]
    pub created_at: DateTime<Utc>,
}

// ISO-8601 with millisecond precision and a `Z` suffix
fn iso_millis<S: Serializer>(time: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&time.to_rfc3339_opts(SecondsFormat::Millis, true))
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct User {
    pub name: String,
    pub email: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub user_id: u64,
    // Kept as received so the response echoes the client's number unchanged
    pub amount: Number,
    pub currency: String,
    pub status: OrderStatus,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Created,
}

impl Order {
    pub fn new(user_id: u64, amount: Number, currency: String) -> Self {
        Order {
            user_id,
            amount,
            currency,
            status: OrderStatus::Created,
        }
    }
}
