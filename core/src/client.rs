//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only the collection URL and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The caller executes the actual HTTP round-trip, keeping
//! the core deterministic and free of I/O dependencies.
//!
//! Create and update answer with an empty `{}` body, so their parse methods
//! return `()` rather than an item.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{ItemFields, TodoItem};

/// Path of the item collection below the server's base URL.
pub const ITEMS_PATH: &str = "/api/todoitems";

/// Synchronous, stateless client for the todo API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    items_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            items_url: format!("{}{ITEMS_PATH}", base_url.trim_end_matches('/')),
        }
    }

    pub fn build_list_items(&self) -> HttpRequest {
        self.bare(HttpMethod::Get, self.items_url.clone())
    }

    pub fn build_get_item(&self, id: &str) -> HttpRequest {
        self.bare(HttpMethod::Get, self.item_url(id))
    }

    pub fn build_create_item(&self, fields: &ItemFields) -> Result<HttpRequest, ApiError> {
        self.with_json(HttpMethod::Post, self.items_url.clone(), fields)
    }

    pub fn build_update_item(&self, id: &str, fields: &ItemFields) -> Result<HttpRequest, ApiError> {
        self.with_json(HttpMethod::Put, self.item_url(id), fields)
    }

    pub fn build_delete_item(&self, id: &str) -> HttpRequest {
        self.bare(HttpMethod::Delete, self.item_url(id))
    }

    pub fn parse_list_items(&self, response: HttpResponse) -> Result<Vec<TodoItem>, ApiError> {
        check_status(&response, 200)?;
        decode(&response)
    }

    pub fn parse_get_item(&self, response: HttpResponse) -> Result<TodoItem, ApiError> {
        check_status(&response, 200)?;
        decode(&response)
    }

    pub fn parse_create_item(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 201)
    }

    pub fn parse_update_item(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 200)
    }

    pub fn parse_delete_item(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 204)
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/{id}", self.items_url)
    }

    fn bare(&self, method: HttpMethod, path: String) -> HttpRequest {
        HttpRequest {
            method,
            path,
            headers: Vec::new(),
            body: None,
        }
    }

    fn with_json(
        &self,
        method: HttpMethod,
        path: String,
        fields: &ItemFields,
    ) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(fields).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method,
            path,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound {
            body: response.body.clone(),
        });
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}
