use uuid::Uuid;

/// All entity ids are opaque strings (UUID v4 at creation time).
pub type EntityId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Generate a fresh entity id.
pub fn new_entity_id() -> EntityId {
    Uuid::new_v4().to_string()
}
