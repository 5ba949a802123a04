//! Wire DTOs for the todo API.
//!
//! # Design
//! These types mirror the server's schema but are defined independently so
//! the client core does not depend on Axum. Integration tests catch any
//! schema drift between the two crates.

use serde::{Deserialize, Serialize};

/// A single todo item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoItem {
    pub id: String,
    pub description: String,
    #[serde(rename = "isCompleted")]
    pub is_completed: bool,
}

/// Request payload for both create and update. Never carries an id: the
/// server assigns ids and rejects bodies that name one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemFields {
    pub description: String,
    #[serde(rename = "isCompleted", default)]
    pub is_completed: bool,
}

impl TodoItem {
    /// This item's fields with the completion flag set.
    pub fn completed_fields(&self) -> ItemFields {
        ItemFields {
            description: self.description.clone(),
            is_completed: true,
        }
    }
}
