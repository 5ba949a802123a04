//! Synchronous client core for the todo service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). On top of that sits
//! `TodoApp`, the client state machine: it validates new-item text,
//! classifies failures into one user-facing message, and re-fetches the full
//! list after every action.
//!
//! # Design
//! - `TodoClient` is stateless; it holds only the collection URL.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - `TodoApp` runs requests through a host-supplied `Transport`.
//! - DTOs are defined independently from the server crate; integration
//!   tests catch schema drift.

pub mod app;
pub mod client;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;
pub mod validation;

pub use app::TodoApp;
pub use client::TodoClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::Transport;
pub use types::{ItemFields, TodoItem};
pub use validation::{FormControl, ValidationError};
