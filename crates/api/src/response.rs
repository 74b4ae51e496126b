//! Shared response envelope types for API handlers.

use serde::Serialize;

/// Standard `{ "items": [...], "count": N }` envelope for collection
/// endpoints. The web client depends on this exact shape.
#[derive(Debug, Serialize)]
pub struct ListResponse<T: Serialize> {
    pub items: Vec<T>,
    pub count: usize,
}

impl<T: Serialize> ListResponse<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            count: items.len(),
            items,
        }
    }
}
