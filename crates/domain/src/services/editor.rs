//! Generic resource editor.
//!
//! Holds the state an admin screen needs for one resource type: the loaded
//! list, an optional open form with its draft, a transient loading flag and a
//! queue of notices for the user. Every operation is a single store call.
//! Failures never discard the list or the draft; they are logged and queued
//! as error notices, and nothing is retried.

use std::collections::VecDeque;

use tracing::{info, warn};
use uuid::Uuid;
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::resource::{prepare_and_validate, OrderBy, Resource, ResourceStore, Scope, StoreError};

/// A user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Notice::Success(m) | Notice::Error(m) => m,
        }
    }
}

/// The two states of an editor screen.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorMode<D> {
    List,
    Form {
        /// `None` while creating a new record.
        editing: Option<Uuid>,
        draft: D,
    },
}

pub struct ResourceEditor<R: Resource, S: ResourceStore<R>> {
    store: S,
    items: Vec<R>,
    order: OrderBy,
    mode: EditorMode<R::Draft>,
    loading: bool,
    notices: VecDeque<Notice>,
}

impl<R: Resource, S: ResourceStore<R>> ResourceEditor<R, S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            items: Vec::new(),
            order: R::DEFAULT_ORDER,
            mode: EditorMode::List,
            loading: false,
            notices: VecDeque::new(),
        }
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn order(&self) -> OrderBy {
        self.order
    }

    pub fn mode(&self) -> &EditorMode<R::Draft> {
        &self.mode
    }

    pub fn is_form_open(&self) -> bool {
        matches!(self.mode, EditorMode::Form { .. })
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn notices(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter()
    }

    /// Drains queued notices, oldest first.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }

    pub fn draft(&self) -> Option<&R::Draft> {
        match &self.mode {
            EditorMode::Form { draft, .. } => Some(draft),
            EditorMode::List => None,
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut R::Draft> {
        match &mut self.mode {
            EditorMode::Form { draft, .. } => Some(draft),
            EditorMode::List => None,
        }
    }

    /// Reloads the list. On failure the previous list is kept.
    pub async fn refresh(&mut self) -> bool {
        self.loading = true;
        let result = self.store.list(Scope::All, self.order).await;
        self.loading = false;

        match result {
            Ok(items) => {
                self.items = items;
                true
            }
            Err(e) => {
                self.fail(format!("Failed to load {}", R::NAME), &e);
                false
            }
        }
    }

    /// Changes the ordering and reloads. Unknown columns are rejected.
    pub async fn sort_by(&mut self, column: &str, ascending: bool) -> bool {
        match OrderBy::parse::<R>(Some(column), Some(ascending)) {
            Ok(order) => {
                self.order = order;
                self.refresh().await
            }
            Err(e) => {
                self.fail(format!("Cannot sort {}", R::NAME), &e);
                false
            }
        }
    }

    /// Opens an empty form for a new record.
    pub fn open_new(&mut self) {
        self.mode = EditorMode::Form {
            editing: None,
            draft: R::Draft::default(),
        };
    }

    /// Opens the form for an existing record in the list.
    pub fn open_edit(&mut self, id: Uuid) -> bool {
        match self.items.iter().find(|r| r.id() == id) {
            Some(record) => {
                self.mode = EditorMode::Form {
                    editing: Some(id),
                    draft: record.to_draft(),
                };
                true
            }
            None => {
                self.notices
                    .push_back(Notice::Error(format!("{} not found", R::LABEL)));
                false
            }
        }
    }

    /// Closes the form, discarding the draft.
    pub fn close_form(&mut self) {
        self.mode = EditorMode::List;
    }

    /// Creates or updates the record behind the open form.
    ///
    /// On success the returned record replaces (or joins) the list and the
    /// form closes. On failure the form stays open with the draft as typed.
    pub async fn submit(&mut self) -> bool {
        let (editing, draft) = match &self.mode {
            EditorMode::Form { editing, draft } => (*editing, draft.clone()),
            EditorMode::List => return false,
        };

        let existing = editing.and_then(|id| self.items.iter().find(|r| r.id() == id));
        let prepared = match prepare_and_validate::<R>(draft, existing) {
            Ok(prepared) => prepared,
            Err(errors) => {
                let message = describe_validation(&errors);
                warn!(resource = R::NAME, errors = %message, "Draft failed validation");
                self.notices.push_back(Notice::Error(message));
                return false;
            }
        };

        self.loading = true;
        let result = match editing {
            Some(id) => self.store.update(id, prepared).await,
            None => self.store.insert(prepared).await,
        };
        self.loading = false;

        match result {
            Ok(record) => {
                let id = record.id();
                match self.items.iter_mut().find(|r| r.id() == id) {
                    Some(slot) => *slot = record,
                    None => self.items.push(record),
                }
                self.mode = EditorMode::List;
                info!(resource = R::NAME, id = %id, "Record saved");
                let verb = if editing.is_some() { "updated" } else { "created" };
                self.notices
                    .push_back(Notice::Success(format!("{} {}", R::LABEL, verb)));
                true
            }
            Err(e) => {
                self.fail(format!("Failed to save {}", R::LABEL.to_lowercase()), &e);
                false
            }
        }
    }

    /// Deletes a record after `confirm` approves it.
    ///
    /// Declining the confirmation is not an error and leaves everything as is.
    pub async fn delete<F>(&mut self, id: Uuid, confirm: F) -> bool
    where
        F: FnOnce(&R) -> bool,
    {
        let Some(record) = self.items.iter().find(|r| r.id() == id) else {
            self.notices
                .push_back(Notice::Error(format!("{} not found", R::LABEL)));
            return false;
        };
        if !confirm(record) {
            return false;
        }

        self.loading = true;
        let result = self.store.delete(id).await;
        self.loading = false;

        match result {
            Ok(()) => {
                self.items.retain(|r| r.id() != id);
                if matches!(self.mode, EditorMode::Form { editing: Some(open), .. } if open == id) {
                    self.mode = EditorMode::List;
                }
                info!(resource = R::NAME, id = %id, "Record deleted");
                self.notices
                    .push_back(Notice::Success(format!("{} deleted", R::LABEL)));
                true
            }
            Err(e) => {
                self.fail(format!("Failed to delete {}", R::LABEL.to_lowercase()), &e);
                false
            }
        }
    }

    /// Flips a boolean flag on a listed record.
    pub async fn toggle_flag(&mut self, id: Uuid, flag: &str) -> bool {
        let flag = match crate::resource::parse_flag::<R>(flag) {
            Ok(flag) => flag,
            Err(e) => {
                self.fail(format!("Cannot toggle {}", flag), &e);
                return false;
            }
        };
        let Some(current) = self
            .items
            .iter()
            .find(|r| r.id() == id)
            .and_then(|r| r.flag(flag))
        else {
            self.notices
                .push_back(Notice::Error(format!("{} not found", R::LABEL)));
            return false;
        };

        self.loading = true;
        let result = self.store.set_flag(id, flag, !current).await;
        self.loading = false;

        match result {
            Ok(record) => {
                if let Some(slot) = self.items.iter_mut().find(|r| r.id() == id) {
                    *slot = record;
                }
                true
            }
            Err(e) => {
                self.fail(format!("Failed to update {}", flag), &e);
                false
            }
        }
    }

    fn fail(&mut self, context: String, err: &StoreError) {
        warn!(resource = R::NAME, error = %err, "{}", context);
        self.notices
            .push_back(Notice::Error(format!("{}: {}", context, err)));
    }
}

/// Flattens validation errors into one line for a notice.
///
/// Nested fields are named by path, e.g. `leaders[0].name`.
pub fn describe_validation(errors: &ValidationErrors) -> String {
    let mut parts = Vec::new();
    collect_reasons("", errors, &mut parts);

    if parts.is_empty() {
        return "Please check the form".to_string();
    }
    parts.sort();
    parts.join("; ")
}

fn collect_reasons(prefix: &str, errors: &ValidationErrors, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = match (prefix.is_empty(), *field) {
            (true, "__all__") => String::new(),
            (true, _) => field.to_string(),
            (false, "__all__") => prefix.to_string(),
            (false, _) => format!("{}.{}", prefix, field),
        };
        match kind {
            ValidationErrorsKind::Field(errs) => {
                let reason = errs
                    .first()
                    .and_then(|e| e.message.as_ref())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "is invalid".to_string());
                if path.is_empty() {
                    out.push(reason);
                } else {
                    out.push(format!("{}: {}", path, reason));
                }
            }
            ValidationErrorsKind::Struct(inner) => collect_reasons(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_reasons(&format!("{}[{}]", path, index), inner, out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BlogPost, BlogPostDraft, Event, EventDraft};
    use crate::services::MemoryStore;
    use chrono::NaiveDate;

    type EventEditor = ResourceEditor<Event, MemoryStore<Event>>;

    fn event(title: &str) -> EventDraft {
        EventDraft {
            title: title.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 12, 24),
            ..Default::default()
        }
    }

    async fn editor_with(titles: &[&str]) -> EventEditor {
        let store = MemoryStore::new();
        for title in titles {
            store.insert(event(title)).await.unwrap();
        }
        let mut editor = ResourceEditor::new(store);
        assert!(editor.refresh().await);
        editor
    }

    #[tokio::test]
    async fn test_refresh_loads_items() {
        let editor = editor_with(&["Carols", "Vigil"]).await;
        assert_eq!(editor.items().len(), 2);
        assert!(!editor.is_loading());
        assert!(!editor.is_form_open());
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_list() {
        let mut editor = editor_with(&["Carols"]).await;
        editor
            .store()
            .fail_next(StoreError::Backend("connection reset".into()));

        assert!(!editor.refresh().await);
        assert_eq!(editor.items().len(), 1);
        let notices = editor.take_notices();
        assert_eq!(notices.len(), 1);
        assert!(notices[0].is_error());
        assert!(notices[0].message().contains("connection reset"));
    }

    #[tokio::test]
    async fn test_create_appends_and_closes_form() {
        let mut editor = editor_with(&[]).await;
        editor.open_new();
        *editor.draft_mut().unwrap() = event("Christmas Eve");

        assert!(editor.submit().await);
        assert_eq!(editor.items().len(), 1);
        assert_eq!(editor.items()[0].title, "Christmas Eve");
        assert!(!editor.is_form_open());
        assert_eq!(
            editor.take_notices(),
            vec![Notice::Success("Event created".into())]
        );
    }

    #[tokio::test]
    async fn test_invalid_draft_keeps_form_open() {
        let mut editor = editor_with(&["Carols"]).await;
        editor.open_new();
        editor.draft_mut().unwrap().title = "   ".into();

        assert!(!editor.submit().await);
        assert!(editor.is_form_open());
        assert_eq!(editor.draft().unwrap().title, "   ");
        assert_eq!(editor.items().len(), 1);
        assert_eq!(editor.store().len().await, 1);

        let notices = editor.take_notices();
        assert!(notices[0].message().contains("title"));
    }

    #[tokio::test]
    async fn test_failed_create_retains_draft_and_list() {
        let mut editor = editor_with(&["Carols"]).await;
        editor.open_new();
        *editor.draft_mut().unwrap() = event("Nativity");
        editor
            .store()
            .fail_next(StoreError::Conflict("duplicate".into()));

        assert!(!editor.submit().await);
        assert!(editor.is_form_open());
        assert_eq!(editor.draft(), Some(&event("Nativity")));
        let titles: Vec<_> = editor.items().iter().map(|e| e.title.clone()).collect();
        assert_eq!(titles, vec!["Carols"]);
        assert!(editor.take_notices()[0].is_error());
    }

    #[tokio::test]
    async fn test_update_replaces_matching_entry() {
        let mut editor = editor_with(&["Carols", "Vigil"]).await;
        let id = editor.items()[0].id;

        assert!(editor.open_edit(id));
        editor.draft_mut().unwrap().title = "Lessons and Carols".into();
        assert!(editor.submit().await);

        assert_eq!(editor.items().len(), 2);
        let updated = editor.items().iter().find(|e| e.id == id).unwrap();
        assert_eq!(updated.title, "Lessons and Carols");
    }

    #[tokio::test]
    async fn test_failed_update_leaves_list_unchanged() {
        let mut editor = editor_with(&["Carols"]).await;
        let before = editor.items().to_vec();
        let id = before[0].id;

        editor.open_edit(id);
        editor.draft_mut().unwrap().title = "Changed".into();
        editor.store().fail_next(StoreError::Backend("timeout".into()));

        assert!(!editor.submit().await);
        assert_eq!(editor.items(), before.as_slice());
        assert_eq!(editor.draft().unwrap().title, "Changed");
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one() {
        let mut editor = editor_with(&["A", "B", "C"]).await;
        let target = editor.items()[1].id;

        assert!(editor.delete(target, |_| true).await);
        assert_eq!(editor.items().len(), 2);
        assert!(editor.items().iter().all(|e| e.id != target));
        assert_eq!(editor.store().len().await, 2);
    }

    #[tokio::test]
    async fn test_declined_delete_is_noop() {
        let mut editor = editor_with(&["A"]).await;
        let id = editor.items()[0].id;

        assert!(!editor.delete(id, |_| false).await);
        assert_eq!(editor.items().len(), 1);
        assert!(editor.take_notices().is_empty());
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_entry() {
        let mut editor = editor_with(&["A", "B"]).await;
        let id = editor.items()[0].id;
        editor.store().fail_next(StoreError::Backend("down".into()));

        assert!(!editor.delete(id, |_| true).await);
        assert_eq!(editor.items().len(), 2);
        assert!(editor.take_notices()[0].is_error());
    }

    #[tokio::test]
    async fn test_toggle_flag_round_trips() {
        let mut editor = editor_with(&["Gala"]).await;
        let id = editor.items()[0].id;

        assert!(editor.toggle_flag(id, "featured").await);
        assert!(editor.items()[0].featured);
        assert!(editor.toggle_flag(id, "featured").await);
        assert!(!editor.items()[0].featured);
    }

    #[tokio::test]
    async fn test_unknown_flag_rejected() {
        let mut editor = editor_with(&["Gala"]).await;
        let id = editor.items()[0].id;

        assert!(!editor.toggle_flag(id, "published").await);
        assert!(editor.take_notices()[0].is_error());
    }

    #[tokio::test]
    async fn test_sort_by_rejects_unknown_column() {
        let mut editor = editor_with(&["A"]).await;
        assert!(!editor.sort_by("password", true).await);
        assert_eq!(editor.order(), Event::DEFAULT_ORDER);

        assert!(editor.sort_by("title", false).await);
        assert_eq!(editor.order(), OrderBy::desc("title"));
    }

    #[tokio::test]
    async fn test_editing_post_title_keeps_slug() {
        let store = MemoryStore::<BlogPost>::new();
        let mut editor = ResourceEditor::new(store);
        editor.open_new();
        *editor.draft_mut().unwrap() = BlogPostDraft {
            title: "Hello, World! 2024".into(),
            content: "First post".into(),
            ..Default::default()
        };
        assert!(editor.submit().await);
        let id = editor.items()[0].id;
        assert_eq!(editor.items()[0].slug, "hello-world-2024");

        editor.open_edit(id);
        editor.draft_mut().unwrap().title = "Hello Again".into();
        assert!(editor.submit().await);

        assert_eq!(editor.items()[0].title, "Hello Again");
        assert_eq!(editor.items()[0].slug, "hello-world-2024");
    }

    #[test]
    fn test_describe_validation() {
        use validator::Validate;
        let errors = EventDraft::default().validate().unwrap_err();
        let message = describe_validation(&errors);
        assert!(message.contains("date: Date is required"));
        assert!(message.contains("title: This field is required"));
    }

    #[test]
    fn test_describe_validation_names_nested_fields() {
        use crate::models::{Leader, MinistryDraft};
        use validator::Validate;

        let draft = MinistryDraft {
            title: "Worship".to_string(),
            description: "Sunday music team".to_string(),
            leaders: vec![
                Leader {
                    name: "Ama".to_string(),
                    role: None,
                    image_url: None,
                },
                Leader {
                    name: "  ".to_string(),
                    role: Some("Choir lead".to_string()),
                    image_url: None,
                },
            ],
            ..Default::default()
        };
        let errors = draft.validate().unwrap_err();
        let message = describe_validation(&errors);
        assert_eq!(message, "leaders[1].name: This field is required");
    }
}
