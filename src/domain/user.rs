use chrono::{DateTime, Utc};

/// A storefront customer. Authentication and sessions are handled outside
/// this crate; users exist so checkout can validate the purchaser and
/// ownership checks have a subject.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}
