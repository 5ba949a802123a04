//! Client state machine: the cached list, the new-item form and the error
//! banner.
//!
//! # Design
//! Every action ends in `reconcile`, which re-fetches the full list and
//! replaces the cache, whether the action succeeded or not. The app never
//! patches its cache optimistically; the server's list is the only truth,
//! at the cost of one extra round-trip per action.

use std::cmp::Ordering;

use tracing::{debug, warn};

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{ItemFields, TodoItem};
use crate::validation::FormControl;

pub struct TodoApp<T> {
    client: TodoClient,
    transport: T,
    cached_items: Vec<TodoItem>,
    item_control: FormControl,
    error_message: String,
}

impl<T: Transport> TodoApp<T> {
    pub fn new(client: TodoClient, transport: T) -> Self {
        Self {
            client,
            transport,
            cached_items: Vec::new(),
            item_control: FormControl::new(),
            error_message: String::new(),
        }
    }

    /// Initial load.
    pub fn init(&mut self) {
        self.reconcile();
    }

    /// Cached items, sorted by description ignoring case.
    pub fn items(&self) -> &[TodoItem] {
        &self.cached_items
    }

    pub fn item_control(&self) -> &FormControl {
        &self.item_control
    }

    pub fn item_control_mut(&mut self) -> &mut FormControl {
        &mut self.item_control
    }

    /// The last classified server or transport error, or empty.
    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    pub fn validation_message(&self) -> String {
        self.item_control.validation_message()
    }

    /// Whether the cache already holds an item with exactly this description.
    pub fn detect_duplicate_description(&self, description: &str) -> bool {
        self.cached_items
            .iter()
            .any(|item| item.description == description)
    }

    /// Create an item from the form input, then reconcile.
    ///
    /// Invalid input sends nothing but still reconciles.
    pub fn submit(&mut self) {
        if self.item_control.is_valid() {
            let fields = ItemFields {
                description: self.item_control.value().to_string(),
                is_completed: false,
            };
            debug!(description = %fields.description, "submitting item");
            match self.create(&fields) {
                Ok(()) => self.reset_form(),
                Err(err) => {
                    self.item_control.reset();
                    self.handle_error(&err);
                }
            }
        }
        self.reconcile();
    }

    /// Mark `item` completed, then reconcile.
    pub fn mark_as_complete(&mut self, item: &TodoItem) {
        debug!(id = %item.id, "completing item");
        if let Err(err) = self.complete(item) {
            self.handle_error(&err);
        }
        self.reconcile();
    }

    /// Delete the item with `id`, then reconcile.
    pub fn mark_for_deletion(&mut self, id: &str) {
        debug!(id, "deleting item");
        if let Err(err) = self.delete(id) {
            self.handle_error(&err);
        }
        self.reconcile();
    }

    /// Replace the cache with the server's current list.
    pub fn reconcile(&mut self) {
        match self.fetch_items() {
            Ok(mut items) => {
                sort_items(&mut items);
                self.cached_items = items;
            }
            Err(err) => self.handle_error(&err),
        }
    }

    /// Clear the input and any error message.
    pub fn reset_form(&mut self) {
        self.item_control.reset();
        self.error_message.clear();
    }

    fn create(&mut self, fields: &ItemFields) -> Result<(), ApiError> {
        let request = self.client.build_create_item(fields)?;
        let response = self.transport.execute(request)?;
        self.client.parse_create_item(response)
    }

    fn complete(&mut self, item: &TodoItem) -> Result<(), ApiError> {
        let request = self.client.build_update_item(&item.id, &item.completed_fields())?;
        let response = self.transport.execute(request)?;
        self.client.parse_update_item(response)
    }

    fn delete(&mut self, id: &str) -> Result<(), ApiError> {
        let response = self.transport.execute(self.client.build_delete_item(id))?;
        self.client.parse_delete_item(response)
    }

    fn fetch_items(&mut self) -> Result<Vec<TodoItem>, ApiError> {
        let response = self.transport.execute(self.client.build_list_items())?;
        self.client.parse_list_items(response)
    }

    fn handle_error(&mut self, err: &ApiError) {
        warn!("request failed: {err}");
        if let Some(message) = err.user_message() {
            self.error_message = message;
        }
    }
}

/// Stable sort by upper-cased description.
pub fn sort_items(items: &mut [TodoItem]) {
    items.sort_by(|a, b| compare_descriptions(&a.description, &b.description));
}

fn compare_descriptions(a: &str, b: &str) -> Ordering {
    a.to_uppercase().cmp(&b.to_uppercase())
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::error::{AWRY_MESSAGE, SERVER_FAULT_MESSAGE};
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    /// Replays scripted outcomes in order and records every request.
    #[derive(Default)]
    struct ScriptedTransport {
        outcomes: VecDeque<Result<HttpResponse, ApiError>>,
        requests: Vec<HttpRequest>,
    }

    impl ScriptedTransport {
        fn reply(mut self, status: u16, body: &str) -> Self {
            self.outcomes.push_back(Ok(HttpResponse::new(status, body)));
            self
        }

        fn fail(mut self, message: &str) -> Self {
            self.outcomes
                .push_back(Err(ApiError::Transport(message.to_string())));
            self
        }

        fn methods(&self) -> Vec<HttpMethod> {
            self.requests.iter().map(|r| r.method).collect()
        }

        fn list_fetches(&self) -> usize {
            self.requests
                .iter()
                .filter(|r| r.method == HttpMethod::Get && r.path.ends_with("/api/todoitems"))
                .count()
        }
    }

    impl Transport for ScriptedTransport {
        fn execute(&mut self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.requests.push(request);
            self.outcomes
                .pop_front()
                .unwrap_or_else(|| Err(ApiError::Transport("script exhausted".to_string())))
        }
    }

    const ONE_ITEM: &str = r#"[{"id":"qwerty1","description":"This is a mock item","isCompleted":false}]"#;

    fn item(id: &str, description: &str) -> TodoItem {
        TodoItem {
            id: id.to_string(),
            description: description.to_string(),
            is_completed: false,
        }
    }

    fn app(transport: &mut ScriptedTransport) -> TodoApp<&mut ScriptedTransport> {
        TodoApp::new(TodoClient::new("http://localhost:7002"), transport)
    }

    #[test]
    fn init_sorts_case_insensitively_and_stably() {
        let body = r#"[
            {"id":"1","description":"banana","isCompleted":false},
            {"id":"2","description":"Apple","isCompleted":false},
            {"id":"3","description":"apple","isCompleted":true},
            {"id":"4","description":"cherry","isCompleted":false}
        ]"#;
        let mut transport = ScriptedTransport::default().reply(200, body);
        let mut app = app(&mut transport);
        app.init();

        let ids: Vec<&str> = app.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3", "1", "4"]);
    }

    #[test]
    fn submit_posts_then_refetches_and_resets() {
        let mut transport = ScriptedTransport::default()
            .reply(201, "{}")
            .reply(200, ONE_ITEM);
        {
            let mut app = app(&mut transport);
            app.item_control_mut().set_value("a todo item");
            app.submit();

            assert_eq!(app.items().len(), 1);
            assert_eq!(app.items()[0].description, "This is a mock item");
            assert_eq!(app.item_control().value(), "");
            assert!(!app.item_control().is_dirty());
            assert_eq!(app.error_message(), "");
        }

        assert_eq!(transport.methods(), vec![HttpMethod::Post, HttpMethod::Get]);
        let body: serde_json::Value =
            serde_json::from_str(transport.requests[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"description": "a todo item", "isCompleted": false}));
    }

    #[test]
    fn rejected_submit_surfaces_server_text_and_still_refetches() {
        let mut transport = ScriptedTransport::default()
            .reply(400, "Description already exists")
            .reply(200, ONE_ITEM);
        {
            let mut app = app(&mut transport);
            app.item_control_mut().set_value("This is a mock item");
            app.submit();

            assert_eq!(app.error_message(), "Description already exists");
            assert_eq!(app.item_control().value(), "");
            assert_eq!(app.items().len(), 1);
        }
        assert_eq!(transport.list_fetches(), 1);
    }

    #[test]
    fn invalid_submit_sends_nothing_but_refetches() {
        let mut transport = ScriptedTransport::default().reply(200, "[]");
        {
            let mut app = app(&mut transport);
            app.item_control_mut().set_value("computer says no");
            app.submit();
            assert_eq!(
                app.validation_message(),
                "Cannot contain the words cat, dog, yes or no."
            );
            assert_eq!(app.item_control().value(), "computer says no");
        }
        assert_eq!(transport.methods(), vec![HttpMethod::Get]);
    }

    #[test]
    fn mark_as_complete_puts_completed_fields() {
        let mut transport = ScriptedTransport::default()
            .reply(200, "{}")
            .reply(200, ONE_ITEM);
        {
            let mut app = app(&mut transport);
            app.mark_as_complete(&item("qwerty1", "This is a mock item"));
        }

        assert_eq!(transport.methods(), vec![HttpMethod::Put, HttpMethod::Get]);
        let put = &transport.requests[0];
        assert!(put.path.ends_with("/api/todoitems/qwerty1"));
        let body: serde_json::Value = serde_json::from_str(put.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"description": "This is a mock item", "isCompleted": true})
        );
    }

    #[test]
    fn failed_completion_shows_fault_and_refetches() {
        let mut transport = ScriptedTransport::default()
            .reply(500, "boom")
            .reply(200, "[]");
        {
            let mut app = app(&mut transport);
            app.mark_as_complete(&item("x", "y"));
            assert_eq!(app.error_message(), SERVER_FAULT_MESSAGE);
        }
        assert_eq!(transport.list_fetches(), 1);
    }

    #[test]
    fn deletion_refetches_even_when_transport_fails() {
        let mut transport = ScriptedTransport::default()
            .fail("connection reset")
            .reply(200, "[]");
        {
            let mut app = app(&mut transport);
            app.mark_for_deletion("qwerty1");
            assert_eq!(app.error_message(), AWRY_MESSAGE);
        }
        assert_eq!(transport.methods(), vec![HttpMethod::Delete, HttpMethod::Get]);
        assert!(transport.requests[0].path.ends_with("/api/todoitems/qwerty1"));
    }

    #[test]
    fn every_action_is_followed_by_exactly_one_list_fetch() {
        let mut transport = ScriptedTransport::default()
            .reply(201, "{}")
            .reply(200, ONE_ITEM)
            .reply(404, "TodoItem not found")
            .reply(200, ONE_ITEM)
            .reply(204, "")
            .reply(200, "[]");
        {
            let mut app = app(&mut transport);
            app.item_control_mut().set_value("water plants");
            app.submit();
            app.mark_as_complete(&item("gone", "old"));
            assert_eq!(app.error_message(), "TodoItem not found");
            app.mark_for_deletion("qwerty1");
            assert!(app.items().is_empty());
        }
        assert_eq!(
            transport.methods(),
            vec![
                HttpMethod::Post,
                HttpMethod::Get,
                HttpMethod::Put,
                HttpMethod::Get,
                HttpMethod::Delete,
                HttpMethod::Get,
            ]
        );
    }

    #[test]
    fn failed_refetch_keeps_previous_cache() {
        let mut transport = ScriptedTransport::default()
            .reply(200, ONE_ITEM)
            .reply(204, "")
            .reply(503, "unavailable");
        let mut app = app(&mut transport);
        app.init();
        app.mark_for_deletion("qwerty1");
        assert_eq!(app.items().len(), 1);
        assert_eq!(app.error_message(), SERVER_FAULT_MESSAGE);
    }

    #[test]
    fn successful_submit_clears_old_error() {
        let mut transport = ScriptedTransport::default()
            .reply(500, "boom")
            .reply(200, "[]")
            .reply(201, "{}")
            .reply(200, "[]");
        let mut app = app(&mut transport);
        app.mark_for_deletion("x");
        assert_eq!(app.error_message(), SERVER_FAULT_MESSAGE);

        app.item_control_mut().set_value("water plants");
        app.submit();
        assert_eq!(app.error_message(), "");
    }

    #[test]
    fn detects_duplicates_in_cache() {
        let mut transport = ScriptedTransport::default().reply(200, ONE_ITEM);
        let mut app = app(&mut transport);
        app.init();
        assert!(app.detect_duplicate_description("This is a mock item"));
        assert!(!app.detect_duplicate_description("this is a mock item"));
    }
}
