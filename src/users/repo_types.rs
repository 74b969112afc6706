use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

/// User record held in the store.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: Uuid,                   // generated at registration
    pub full_name: String,
    pub email: String,              // unique across the store
    #[serde(skip_serializing)]
    pub phone: String,
    #[serde(skip_serializing)]
    pub password: String,           // stored verbatim
    #[serde(skip_serializing)]
    pub created_at: OffsetDateTime,
}

/// Fields accepted by the store when registering a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}
