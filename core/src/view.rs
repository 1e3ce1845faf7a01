//! View state for the todo list and its synchronization with the server.
//!
//! # Design
//! `TodoView` owns the locally cached list, the draft input text, and the
//! initial-load flag. Each user action follows the same sans-I/O split as
//! `TodoClient`: a `begin_*` (or `submit_*`) method applies the pre-call
//! state change and returns the `HttpRequest` to execute, and a matching
//! `finish_*` method consumes the host's `Result<HttpResponse, ApiError>`
//! and merges the outcome into local state.
//!
//! Every mutation waits for server confirmation: nothing is applied
//! optimistically, there are no retries, and a failed call leaves the list
//! exactly as it was. Failures are logged via `tracing` and swallowed — the
//! only user-visible symptom of a failure is the absence of the expected
//! change. The local list is a best-effort mirror of server state; the last
//! successful response wins.

use tracing::error;

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{CreateTodo, Todo};

/// The todo list view: cached items, draft input, and loading flag.
#[derive(Debug)]
pub struct TodoView {
    client: TodoClient,
    items: Vec<Todo>,
    draft_title: String,
    is_loading: bool,
}

impl TodoView {
    /// `base_url` should include the API prefix, e.g.
    /// `http://localhost:8080/api`.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: TodoClient::new(base_url),
            items: Vec::new(),
            draft_title: String::new(),
            is_loading: false,
        }
    }

    pub fn items(&self) -> &[Todo] {
        &self.items
    }

    pub fn draft_title(&self) -> &str {
        &self.draft_title
    }

    /// True only between `begin_load` and the matching `finish_load`.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|t| t.completed).count()
    }

    pub fn remaining_count(&self) -> usize {
        self.items.len() - self.completed_count()
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft_title = text.into();
    }

    /// Start a full reload of the collection. Sets `is_loading` until the
    /// matching `finish_load`.
    pub fn begin_load(&mut self) -> HttpRequest {
        self.is_loading = true;
        self.client.build_list_todos()
    }

    /// On success the local list is replaced wholesale, in the order the
    /// server returned. On failure the previous list is kept. `is_loading`
    /// is cleared regardless of outcome.
    pub fn finish_load(&mut self, outcome: Result<HttpResponse, ApiError>) {
        match outcome.and_then(|resp| self.client.parse_list_todos(resp)) {
            Ok(todos) => self.items = todos,
            Err(err) => error!(error = %err, "failed to fetch todos"),
        }
        self.is_loading = false;
    }

    /// Submit the draft as a new todo. A draft that trims to empty is a pure
    /// no-op: no request, no state change. Otherwise the draft is cleared
    /// immediately — before the outcome is known — and the create request
    /// carries the raw (untrimmed) text.
    pub fn submit_draft(&mut self) -> Option<HttpRequest> {
        if self.draft_title.trim().is_empty() {
            return None;
        }
        let input = CreateTodo {
            title: std::mem::take(&mut self.draft_title),
        };
        match self.client.build_create_todo(&input) {
            Ok(req) => Some(req),
            Err(err) => {
                error!(error = %err, "failed to encode new todo");
                None
            }
        }
    }

    /// On success the created todo (server-assigned id, `completed` false)
    /// is prepended to the list. On failure the list is unchanged.
    pub fn finish_create(&mut self, outcome: Result<HttpResponse, ApiError>) {
        match outcome.and_then(|resp| self.client.parse_create_todo(resp)) {
            Ok(todo) => self.items.insert(0, todo),
            Err(err) => error!(error = %err, "failed to add todo"),
        }
    }

    /// Ask the server to flip the completion flag for `id`.
    pub fn begin_toggle(&self, id: i64) -> HttpRequest {
        self.client.build_toggle_todo(id)
    }

    /// On success only the entry with matching `id` is replaced by the
    /// server's representation, which is authoritative for `completed`. On
    /// failure the list is unchanged and the checkbox stays stale until the
    /// next load.
    pub fn finish_toggle(&mut self, id: i64, outcome: Result<HttpResponse, ApiError>) {
        match outcome.and_then(|resp| self.client.parse_toggle_todo(resp)) {
            Ok(updated) => {
                if let Some(slot) = self.items.iter_mut().find(|t| t.id == id) {
                    *slot = updated;
                }
            }
            Err(err) => error!(error = %err, todo_id = id, "failed to toggle todo"),
        }
    }

    pub fn begin_remove(&self, id: i64) -> HttpRequest {
        self.client.build_delete_todo(id)
    }

    /// On success the entry with matching `id` is dropped from the list. On
    /// failure the item remains visible despite the attempted deletion.
    pub fn finish_remove(&mut self, id: i64, outcome: Result<HttpResponse, ApiError>) {
        match outcome.and_then(|resp| self.client.parse_delete_todo(resp)) {
            Ok(()) => self.items.retain(|t| t.id != id),
            Err(err) => error!(error = %err, todo_id = id, "failed to delete todo"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;

    fn view() -> TodoView {
        TodoView::new("http://localhost:8080/api")
    }

    fn ok(status: u16, body: &str) -> Result<HttpResponse, ApiError> {
        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        })
    }

    fn seeded() -> TodoView {
        let mut v = view();
        v.begin_load();
        v.finish_load(ok(
            200,
            r#"[{"id":2,"title":"B","completed":true},{"id":1,"title":"A","completed":false}]"#,
        ));
        v
    }

    #[test]
    fn load_replaces_items_in_server_order() {
        let mut v = view();
        assert!(!v.is_loading());

        let req = v.begin_load();
        assert!(v.is_loading());
        assert_eq!(req.method, HttpMethod::Get);

        v.finish_load(ok(200, r#"[{"id":1,"title":"A","completed":false}]"#));
        assert!(!v.is_loading());
        assert_eq!(
            v.items(),
            [Todo {
                id: 1,
                title: "A".to_string(),
                completed: false,
            }]
        );
    }

    #[test]
    fn failed_load_keeps_previous_items_and_clears_loading() {
        let mut v = seeded();
        let before = v.items().to_vec();

        v.begin_load();
        v.finish_load(ok(500, "internal error"));
        assert!(!v.is_loading());
        assert_eq!(v.items(), before);
    }

    #[test]
    fn transport_error_on_load_is_swallowed() {
        let mut v = view();
        v.begin_load();
        v.finish_load(Err(ApiError::Transport("connection refused".to_string())));
        assert!(!v.is_loading());
        assert!(v.items().is_empty());
    }

    #[test]
    fn blank_draft_never_issues_a_request() {
        let mut v = seeded();
        let before = v.items().to_vec();

        v.set_draft("");
        assert!(v.submit_draft().is_none());

        v.set_draft("   ");
        assert!(v.submit_draft().is_none());
        assert_eq!(v.draft_title(), "   ");
        assert_eq!(v.items(), before);
    }

    #[test]
    fn submit_clears_draft_before_outcome_is_known() {
        let mut v = view();
        v.set_draft("Buy milk");
        let req = v.submit_draft().unwrap();
        assert_eq!(v.draft_title(), "");
        assert_eq!(req.method, HttpMethod::Post);
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["title"], "Buy milk");
    }

    #[test]
    fn submitted_title_is_sent_untrimmed() {
        let mut v = view();
        v.set_draft("  Buy milk ");
        let req = v.submit_draft().unwrap();
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["title"], "  Buy milk ");
    }

    #[test]
    fn create_prepends_and_shifts_prior_items() {
        let mut v = seeded();
        v.set_draft("Buy milk");
        v.submit_draft().unwrap();
        v.finish_create(ok(201, r#"{"id":3,"title":"Buy milk","completed":false}"#));

        assert_eq!(v.items().len(), 3);
        assert_eq!(v.items()[0].title, "Buy milk");
        assert!(!v.items()[0].completed);
        assert_eq!(v.items()[1].id, 2);
        assert_eq!(v.items()[2].id, 1);
    }

    #[test]
    fn failed_create_leaves_items_and_draft_stays_cleared() {
        let mut v = seeded();
        let before = v.items().to_vec();

        v.set_draft("Buy milk");
        v.submit_draft().unwrap();
        v.finish_create(ok(500, "internal error"));

        assert_eq!(v.items(), before);
        assert_eq!(v.draft_title(), "");
    }

    #[test]
    fn toggle_replaces_only_the_matching_entry() {
        let mut v = seeded();
        let untouched = v.items()[0].clone();

        v.begin_toggle(1);
        v.finish_toggle(1, ok(200, r#"{"id":1,"title":"A","completed":true}"#));

        assert_eq!(v.items()[0], untouched);
        assert!(v.items()[1].completed);
        assert_eq!(v.items()[1].title, "A");
    }

    #[test]
    fn failed_toggle_leaves_items_unchanged() {
        let mut v = seeded();
        let before = v.items().to_vec();

        v.finish_toggle(1, ok(404, r#"{"error":"Todo not found"}"#));
        assert_eq!(v.items(), before);
    }

    #[test]
    fn remove_drops_exactly_the_matching_entry() {
        let mut v = seeded();

        v.begin_remove(2);
        v.finish_remove(2, ok(200, r#"{"message":"Todo deleted successfully"}"#));

        assert_eq!(v.items().len(), 1);
        assert!(v.items().iter().all(|t| t.id != 2));
    }

    #[test]
    fn failed_remove_keeps_the_item_visible() {
        let mut v = seeded();
        let before = v.items().to_vec();

        v.finish_remove(2, Err(ApiError::Transport("connection reset".to_string())));
        assert_eq!(v.items(), before);
    }

    #[test]
    fn counts_track_completion() {
        let v = seeded();
        assert_eq!(v.completed_count(), 1);
        assert_eq!(v.remaining_count(), 1);
    }

    #[test]
    fn no_operation_other_than_load_touches_is_loading() {
        let mut v = seeded();
        v.set_draft("X");
        v.submit_draft().unwrap();
        v.finish_create(ok(201, r#"{"id":9,"title":"X","completed":false}"#));
        v.finish_toggle(9, ok(200, r#"{"id":9,"title":"X","completed":true}"#));
        v.finish_remove(9, ok(200, "{}"));
        assert!(!v.is_loading());
    }
}
