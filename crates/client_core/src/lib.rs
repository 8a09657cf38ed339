use serde::{de::DeserializeOwned, Serialize};
use tracing::{info, warn};

pub mod error;
pub mod resources;
pub mod transport;

pub use error::RequestError;
pub use resources::{Budgets, Users};
pub use transport::CollectionClient;

/// Fixed operator message for failures that produced no server response.
pub const TRANSPORT_FAILURE_MESSAGE: &str = "An error occurred.";

/// Everything entity-specific about one collection: its wire shapes, its
/// base path, how to flatten a listed row back into an editable draft,
/// and which draft fields must be filled before a write is attempted.
pub trait CrudResource {
    /// Read shape, as returned by `{base}/listar`.
    type View: DeserializeOwned + Clone + Send + Sync;
    /// Write shape, also the operator's draft. Defaults to every field
    /// present and empty.
    type Input: Serialize + Default + Clone + PartialEq + Send + Sync;

    /// Collection base path on the server, e.g. `/usuario`.
    const BASE_PATH: &'static str;
    /// Entity name used in status messages and logs.
    const LABEL: &'static str;

    fn id(view: &Self::View) -> i64;

    /// Maps a listed row into the write shape, flattening any nested
    /// references into flat foreign keys.
    fn input_from_view(view: &Self::View) -> Self::Input;

    /// Assigns one draft field by its wire name. Returns false for
    /// unknown field names.
    fn set_field(input: &mut Self::Input, field: &str, value: &str) -> bool;

    /// Reasons the draft cannot be submitted yet; empty means ready.
    fn draft_problems(input: &Self::Input) -> Vec<String>;

    /// One-line rendering of a row for list output.
    fn summarize(view: &Self::View) -> String;
}

/// Reconciles a local editable draft against one remote collection.
///
/// The controller never patches its cached list from a write response;
/// after every successful mutation it refetches the whole collection, so
/// `items` always reflects the last answer the server actually gave.
pub struct CrudController<R: CrudResource> {
    client: CollectionClient,
    items: Vec<R::View>,
    draft: R::Input,
    edit_target: Option<i64>,
    status: String,
}

impl<R: CrudResource> CrudController<R> {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(CollectionClient::new(base_url))
    }

    pub fn with_client(client: CollectionClient) -> Self {
        Self {
            client,
            items: Vec::new(),
            draft: R::Input::default(),
            edit_target: None,
            status: String::new(),
        }
    }

    /// Rows from the most recent successful list fetch, in server order.
    pub fn items(&self) -> &[R::View] {
        &self.items
    }

    pub fn draft(&self) -> &R::Input {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut R::Input {
        &mut self.draft
    }

    /// Some(id) while an existing row is being edited, None in create mode.
    pub fn edit_target(&self) -> Option<i64> {
        self.edit_target
    }

    /// Last human-readable outcome; cleared only by being overwritten.
    pub fn status_message(&self) -> &str {
        &self.status
    }

    pub fn set_field(&mut self, field: &str, value: &str) -> bool {
        R::set_field(&mut self.draft, field, value)
    }

    /// Replaces the cached list with server truth. A failed refresh keeps
    /// the previous list and is logged only: stale rows beat a blank
    /// panel, and list failures are deliberately not surfaced the way
    /// write failures are.
    pub async fn refresh(&mut self) {
        match self.client.list::<R::View>(R::BASE_PATH).await {
            Ok(items) => self.items = items,
            Err(err) => {
                warn!(resource = R::LABEL, error = %err, "list refresh failed, keeping stale rows");
            }
        }
    }

    /// Dispatches the current draft to create or update depending on
    /// whether a row is selected for editing.
    pub async fn submit(&mut self) {
        match self.edit_target {
            Some(id) => self.update(id).await,
            None => self.create().await,
        }
    }

    pub async fn create(&mut self) {
        if self.reject_incomplete_draft() {
            return;
        }
        match self.client.create(R::BASE_PATH, &self.draft).await {
            Ok(reply) => {
                self.status = format!("{} created with id {}", R::LABEL, reply.id);
                info!(resource = R::LABEL, id = reply.id, "created");
                self.refresh().await;
                self.draft = R::Input::default();
            }
            Err(err) => self.surface_failure(err),
        }
    }

    pub async fn update(&mut self, id: i64) {
        if self.reject_incomplete_draft() {
            return;
        }
        match self.client.update(R::BASE_PATH, id, &self.draft).await {
            Ok(reply) => {
                self.status = format!("{} updated with id {}", R::LABEL, reply.id);
                info!(resource = R::LABEL, id = reply.id, "updated");
                self.refresh().await;
                self.edit_target = None;
                self.draft = R::Input::default();
            }
            Err(err) => self.surface_failure(err),
        }
    }

    /// Loads a listed row into the draft and switches to update mode.
    /// Selecting another row mid-edit simply replaces draft and target.
    pub fn select_for_edit(&mut self, view: &R::View) {
        self.edit_target = Some(R::id(view));
        self.draft = R::input_from_view(view);
    }

    /// Deletes by id. The row is not removed locally until the follow-up
    /// refresh confirms the server no longer lists it.
    pub async fn remove(&mut self, id: i64) {
        match self.client.remove(R::BASE_PATH, id).await {
            Ok(()) => {
                self.status = format!("{} removed", R::LABEL);
                info!(resource = R::LABEL, id, "removed");
                self.refresh().await;
            }
            Err(err) => self.surface_failure(err),
        }
    }

    /// Abandons the draft and leaves edit mode.
    pub fn cancel(&mut self) {
        self.draft = R::Input::default();
        self.edit_target = None;
    }

    /// Validation gate for writes. The draft survives so the operator can
    /// fill in what is missing and resubmit.
    fn reject_incomplete_draft(&mut self) -> bool {
        let problems = R::draft_problems(&self.draft);
        if problems.is_empty() {
            return false;
        }
        self.status = format!("cannot submit: {}", problems.join(", "));
        true
    }

    /// Converts a write failure into the operator-visible status string.
    /// Rejections show the server payload verbatim; transport failures
    /// fall back to a fixed message. The draft is left untouched.
    fn surface_failure(&mut self, err: RequestError) {
        self.status = match err {
            RequestError::Rejected { body, .. } if !body.is_empty() => body,
            RequestError::Rejected { status, .. } => status.to_string(),
            RequestError::Transport(err) => {
                warn!(resource = R::LABEL, error = %err, "request failed in transport");
                TRANSPORT_FAILURE_MESSAGE.to_string()
            }
        };
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
