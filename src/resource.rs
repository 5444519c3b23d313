//! Generic CRUD Resource
//!
//! One description of a backend collection (`AdminResource`), one transport
//! seam (`ResourceApi`) and one controller that runs the
//! fetch → render → mutate → refresh cycle for all of them.
//!
//! The controller never updates the list optimistically: every successful
//! mutation is followed by a fresh `list`, and a failed fetch leaves the
//! previous items in place.

use std::cell::RefCell;
use std::collections::HashMap;

use async_trait::async_trait;
use leptos::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::{ListParams, Payload};
use crate::config::AdminConfig;
use crate::error::{ApiError, ApiResult};
use crate::forms::{validate, FieldSpec, FormValues, Rule};
use crate::models::{Page, Pagination};

/// Colour hint for a card badge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Neutral,
    Good,
    Warn,
    Bad,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Badge {
    pub label: String,
    pub tone: Tone,
}

impl Badge {
    pub fn new(label: impl Into<String>, tone: Tone) -> Self {
        Self { label: label.into(), tone }
    }
}

/// What a list card shows for one item
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardView {
    pub title: String,
    pub subtitle: Option<String>,
    pub image: Option<String>,
    pub badges: Vec<Badge>,
    pub details: Vec<(&'static str, String)>,
}

/// A backend collection managed by a resource page
pub trait AdminResource: Copy + Send + Sync + 'static {
    type Item: Clone + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static;

    /// Collection path, e.g. `/banners`
    const ENDPOINT: &'static str;
    const SINGULAR: &'static str;
    const PLURAL: &'static str;

    const CAN_CREATE: bool = true;
    const CAN_EDIT: bool = true;
    const CAN_DELETE: bool = true;
    /// Whether the page sends `page`/`limit` and shows pagination controls
    const PAGINATED: bool = false;

    fn id(item: &Self::Item) -> String;

    /// Form schema (empty for read-only resources)
    fn fields() -> Vec<FieldSpec> {
        Vec::new()
    }

    fn rules() -> Vec<Rule> {
        Vec::new()
    }

    fn card(item: &Self::Item, config: &AdminConfig) -> CardView;

    fn item_path(id: &str) -> String {
        format!("{}/{}", Self::ENDPOINT, id)
    }
}

/// Call-to-action shown when a collection is empty
pub fn empty_state_cta(singular: &str) -> String {
    format!("Add Your First {}", singular)
}

/// Transport seam for one collection
#[async_trait(?Send)]
pub trait ResourceApi {
    type Item;
    type File;

    async fn list(&self, params: &ListParams) -> ApiResult<Page<Self::Item>>;
    async fn create(&self, payload: Payload<Self::File>) -> ApiResult<Option<String>>;
    async fn update(&self, id: &str, payload: Payload<Self::File>) -> ApiResult<Option<String>>;
    async fn remove(&self, id: &str) -> ApiResult<Option<String>>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadPhase {
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// Create or edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveTarget {
    Create,
    Update(String),
}

/// List state of one resource page
#[derive(Debug, Clone, PartialEq)]
pub struct CrudState<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
    pub params: ListParams,
    pub phase: LoadPhase,
    pub saving: bool,
}

impl<T> CrudState<T> {
    pub fn new(params: ListParams) -> Self {
        Self {
            items: Vec::new(),
            pagination: Pagination::default(),
            params,
            phase: LoadPhase::Idle,
            saving: false,
        }
    }

    pub fn begin_load(&mut self) {
        self.phase = LoadPhase::Loading;
    }

    /// Apply a list result; on failure the previous items stay untouched
    pub fn finish_load(&mut self, result: ApiResult<Page<T>>) -> Option<ApiError> {
        match result {
            Ok(page) => {
                self.items = page.items;
                self.pagination = page.pagination;
                self.phase = LoadPhase::Ready;
                None
            }
            Err(err) => {
                self.phase = LoadPhase::Failed(err.user_message());
                Some(err)
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    /// Loaded successfully and nothing came back
    pub fn is_empty(&self) -> bool {
        self.phase == LoadPhase::Ready && self.items.is_empty()
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            LoadPhase::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn current_page(&self) -> u32 {
        self.params.current_page()
    }

    /// Page to show after deleting one item from the current page
    pub fn page_after_removal(&self) -> u32 {
        let page = self.current_page();
        if page > 1 && self.items.len() <= 1 {
            page - 1
        } else {
            page
        }
    }

    pub fn set_page(&mut self, page: u32) {
        if self.params.page.is_some() || page > 1 {
            self.params.page = Some(page.max(1));
        }
    }
}

/// Where the controller keeps its `CrudState`
pub trait StateCell<T> {
    fn read<U>(&self, f: impl FnOnce(&CrudState<T>) -> U) -> U;
    fn write(&self, f: impl FnOnce(&mut CrudState<T>));
}

impl<T> StateCell<T> for RefCell<CrudState<T>> {
    fn read<U>(&self, f: impl FnOnce(&CrudState<T>) -> U) -> U {
        f(&self.borrow())
    }

    fn write(&self, f: impl FnOnce(&mut CrudState<T>)) {
        f(&mut self.borrow_mut());
    }
}

impl<T: Send + Sync + 'static> StateCell<T> for RwSignal<CrudState<T>> {
    fn read<U>(&self, f: impl FnOnce(&CrudState<T>) -> U) -> U {
        self.with_untracked(f)
    }

    fn write(&self, f: impl FnOnce(&mut CrudState<T>)) {
        self.update(f);
    }
}

/// Files picked in the open form, keyed by field name.
///
/// Lookups clone so a failed save can be resubmitted with the same
/// attachments; the map is only emptied when the form closes or resets.
#[derive(Debug, Clone)]
pub struct PendingFiles<F> {
    files: HashMap<String, F>,
}

impl<F> Default for PendingFiles<F> {
    fn default() -> Self {
        Self { files: HashMap::new() }
    }
}

impl<F: Clone> PendingFiles<F> {
    pub fn attach(&mut self, name: &str, file: Option<F>) {
        match file {
            Some(file) => {
                self.files.insert(name.to_string(), file);
            }
            None => {
                self.files.remove(name);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<F> {
        self.files.get(name).cloned()
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }
}

/// Runs list/save/remove against an API and writes results into a state cell
pub struct CrudController<A, C> {
    api: A,
    cell: C,
    label: &'static str,
}

impl<A, C> CrudController<A, C>
where
    A: ResourceApi,
    C: StateCell<A::Item>,
{
    pub fn new(api: A, cell: C, label: &'static str) -> Self {
        Self { api, cell, label }
    }

    pub fn cell(&self) -> &C {
        &self.cell
    }

    /// Fetch the current page
    pub async fn refresh(&self) -> ApiResult<()> {
        let params = self.cell.read(|s| s.params.clone());
        self.cell.write(CrudState::begin_load);

        let result = self.api.list(&params).await;
        if let Ok(page) = &result {
            log::info!("[crud] {}: loaded {} items (page {})", self.label, page.items.len(), page.pagination.page);
        }

        let mut failure = None;
        self.cell.write(|s| failure = s.finish_load(result));
        match failure {
            Some(err) => {
                log::warn!("[crud] {}: list failed: {}", self.label, err);
                Err(err)
            }
            None => Ok(()),
        }
    }

    pub async fn load_page(&self, page: u32) -> ApiResult<()> {
        self.cell.write(|s| s.set_page(page));
        self.refresh().await
    }

    /// Change filters and go back to page 1
    pub async fn filter(&self, change: impl FnOnce(&mut ListParams)) -> ApiResult<()> {
        self.cell.write(|s| {
            change(&mut s.params);
            s.set_page(1);
        });
        self.refresh().await
    }

    /// Validate, send, then refetch. Validation failures never reach the API.
    pub async fn save(
        &self,
        target: SaveTarget,
        specs: &[FieldSpec],
        rules: &[Rule],
        values: &FormValues,
        file_for: impl FnMut(&str) -> Option<A::File>,
    ) -> ApiResult<Option<String>> {
        validate(specs, rules, values)?;
        let payload = Payload::from_form(specs, values, file_for);

        self.cell.write(|s| s.saving = true);
        let result = match &target {
            SaveTarget::Create => self.api.create(payload).await,
            SaveTarget::Update(id) => self.api.update(id, payload).await,
        };
        self.cell.write(|s| s.saving = false);

        let message = result.map_err(|err| {
            log::warn!("[crud] {}: save failed: {}", self.label, err);
            err
        })?;
        log::info!("[crud] {}: saved ({:?})", self.label, target);

        // The save went through; a failed refetch shows up in the list state
        let _ = self.refresh().await;
        Ok(message)
    }

    /// Delete and refetch, stepping back a page if this emptied it
    pub async fn remove(&self, id: &str) -> ApiResult<Option<String>> {
        let next_page = self.cell.read(CrudState::page_after_removal);
        let message = self.api.remove(id).await.map_err(|err| {
            log::warn!("[crud] {}: delete {} failed: {}", self.label, id, err);
            err
        })?;
        log::info!("[crud] {}: deleted {}", self.label, id);

        self.cell.write(|s| s.set_page(next_page));
        let _ = self.refresh().await;
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Encoding;
    use crate::forms::{FieldKind, FieldValue};
    use futures::executor::block_on;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: String,
        title: String,
    }

    /// In-memory backend that records every call
    struct MockApi {
        rows: RefCell<Vec<Note>>,
        calls: RefCell<Vec<String>>,
        fail_next: RefCell<Option<ApiError>>,
        next_id: RefCell<u32>,
        encodings: RefCell<Vec<Encoding>>,
    }

    impl MockApi {
        fn with_rows(count: u32) -> Self {
            let rows = (1..=count)
                .map(|i| Note { id: format!("n{}", i), title: format!("Note {}", i) })
                .collect();
            Self {
                rows: RefCell::new(rows),
                calls: RefCell::new(Vec::new()),
                fail_next: RefCell::new(None),
                next_id: RefCell::new(count + 1),
                encodings: RefCell::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }

        fn take_failure(&self) -> ApiResult<()> {
            match self.fail_next.borrow_mut().take() {
                Some(err) => Err(err),
                None => Ok(()),
            }
        }
    }

    #[async_trait(?Send)]
    impl<'a> ResourceApi for &'a MockApi {
        type Item = Note;
        type File = &'static str;

        async fn list(&self, params: &ListParams) -> ApiResult<Page<Note>> {
            self.calls.borrow_mut().push(format!("list{}", params.to_query_string()));
            self.take_failure()?;
            let rows = self.rows.borrow();
            match (params.page, params.limit) {
                (Some(page), Some(limit)) => {
                    let start = ((page - 1) * limit) as usize;
                    let items: Vec<Note> = rows.iter().skip(start).take(limit as usize).cloned().collect();
                    let total = rows.len() as u64;
                    Ok(Page {
                        items,
                        pagination: Pagination {
                            page,
                            limit,
                            total,
                            total_pages: ((total + limit as u64 - 1) / limit as u64) as u32,
                        },
                    })
                }
                _ => Ok(Page { items: rows.clone(), pagination: Pagination::single_page(rows.len()) }),
            }
        }

        async fn create(&self, payload: Payload<&'static str>) -> ApiResult<Option<String>> {
            self.calls.borrow_mut().push("create".to_string());
            self.encodings.borrow_mut().push(payload.encoding());
            self.take_failure()?;
            let mut next_id = self.next_id.borrow_mut();
            let title = payload.to_json()["title"].as_str().unwrap_or_default().to_string();
            self.rows.borrow_mut().push(Note { id: format!("n{}", next_id), title });
            *next_id += 1;
            Ok(Some("Note created".to_string()))
        }

        async fn update(&self, id: &str, payload: Payload<&'static str>) -> ApiResult<Option<String>> {
            self.calls.borrow_mut().push(format!("update {}", id));
            self.encodings.borrow_mut().push(payload.encoding());
            self.take_failure()?;
            let title = payload.to_json()["title"].as_str().unwrap_or_default().to_string();
            if let Some(row) = self.rows.borrow_mut().iter_mut().find(|r| r.id == id) {
                row.title = title;
            }
            Ok(None)
        }

        async fn remove(&self, id: &str) -> ApiResult<Option<String>> {
            self.calls.borrow_mut().push(format!("remove {}", id));
            self.take_failure()?;
            self.rows.borrow_mut().retain(|r| r.id != id);
            Ok(Some("Deleted".to_string()))
        }
    }

    fn specs() -> Vec<FieldSpec> {
        vec![FieldSpec::new("title", "Title", FieldKind::Text).required()]
    }

    fn form(title: &str) -> FormValues {
        let mut values = FormValues::empty(&specs());
        values.set("title", FieldValue::Text(title.to_string()));
        values
    }

    fn controller(api: &MockApi, params: ListParams) -> CrudController<&MockApi, RefCell<CrudState<Note>>> {
        CrudController::new(api, RefCell::new(CrudState::new(params)), "notes")
    }

    fn titles(ctl: &CrudController<&MockApi, RefCell<CrudState<Note>>>) -> Vec<String> {
        ctl.cell().borrow().items.iter().map(|n| n.title.clone()).collect()
    }

    #[test]
    fn test_create_refreshes_from_server() {
        let api = MockApi::with_rows(1);
        let ctl = controller(&api, ListParams::default());
        block_on(ctl.refresh()).unwrap();

        let message = block_on(ctl.save(SaveTarget::Create, &specs(), &[], &form("Fresh"), |_| None)).unwrap();

        assert_eq!(message.as_deref(), Some("Note created"));
        assert_eq!(api.calls(), vec!["list", "create", "list"]);
        assert_eq!(titles(&ctl), vec!["Note 1", "Fresh"]);
        assert!(!ctl.cell().borrow().saving);
    }

    #[test]
    fn test_retry_after_failed_save_keeps_attachment() {
        let api = MockApi::with_rows(0);
        let ctl = controller(&api, ListParams::default());
        let specs = vec![
            FieldSpec::new("title", "Title", FieldKind::Text).required(),
            FieldSpec::new("image", "Image", FieldKind::File { accept: "image/*" }),
        ];
        let mut values = FormValues::empty(&specs);
        values.set("title", FieldValue::Text("Olive tree".to_string()));
        values.attach_file("image", Some("olive.png".to_string()));
        let mut pending = PendingFiles::default();
        pending.attach("image", Some("olive.png"));

        *api.fail_next.borrow_mut() = Some(ApiError::server(500, Some("try again".to_string())));
        let first = block_on(ctl.save(SaveTarget::Create, &specs, &[], &values, |name| pending.get(name)));
        assert!(first.is_err());

        block_on(ctl.save(SaveTarget::Create, &specs, &[], &values, |name| pending.get(name))).unwrap();

        assert_eq!(*api.encodings.borrow(), vec![Encoding::Multipart, Encoding::Multipart]);
        assert_eq!(pending.get("image"), Some("olive.png"));
    }

    #[test]
    fn test_update_refreshes_from_server() {
        let api = MockApi::with_rows(2);
        let ctl = controller(&api, ListParams::default());
        block_on(ctl.refresh()).unwrap();

        block_on(ctl.save(SaveTarget::Update("n2".to_string()), &specs(), &[], &form("Renamed"), |_| None)).unwrap();

        assert_eq!(api.calls(), vec!["list", "update n2", "list"]);
        assert_eq!(titles(&ctl), vec!["Note 1", "Renamed"]);
    }

    #[test]
    fn test_missing_required_field_never_hits_network() {
        let api = MockApi::with_rows(0);
        let ctl = controller(&api, ListParams::default());

        let result = block_on(ctl.save(SaveTarget::Create, &specs(), &[], &form("   "), |_| None));

        assert!(matches!(result, Err(ApiError::Validation(_))));
        assert!(api.calls().is_empty());
    }

    #[test]
    fn test_deleting_last_item_on_last_page_steps_back() {
        let api = MockApi::with_rows(11);
        let ctl = controller(&api, ListParams::paged(1, 5));
        block_on(ctl.load_page(3)).unwrap();
        assert_eq!(titles(&ctl), vec!["Note 11"]);

        block_on(ctl.remove("n11")).unwrap();

        assert_eq!(api.calls(), vec!["list?page=3&limit=5", "remove n11", "list?page=2&limit=5"]);
        let state = ctl.cell().borrow();
        assert_eq!(state.current_page(), 2);
        assert_eq!(state.items.len(), 5);
        assert_eq!(state.pagination.total_pages, 2);
    }

    #[test]
    fn test_deleting_on_first_page_stays() {
        let api = MockApi::with_rows(1);
        let ctl = controller(&api, ListParams::paged(1, 5));
        block_on(ctl.refresh()).unwrap();
        block_on(ctl.remove("n1")).unwrap();

        assert_eq!(api.calls(), vec!["list?page=1&limit=5", "remove n1", "list?page=1&limit=5"]);
        assert!(ctl.cell().borrow().is_empty());
    }

    #[test]
    fn test_failed_list_keeps_previous_items() {
        let api = MockApi::with_rows(3);
        let ctl = controller(&api, ListParams::default());
        block_on(ctl.refresh()).unwrap();

        *api.fail_next.borrow_mut() = Some(ApiError::Network("offline".to_string()));
        let result = block_on(ctl.refresh());

        assert!(matches!(result, Err(ApiError::Network(_))));
        let state = ctl.cell().borrow();
        assert_eq!(state.items.len(), 3);
        assert!(state.error().is_some());
    }

    #[test]
    fn test_failed_save_reports_server_message_and_skips_refresh() {
        let api = MockApi::with_rows(0);
        let ctl = controller(&api, ListParams::default());
        *api.fail_next.borrow_mut() = Some(ApiError::server(409, Some("Duplicate title".to_string())));

        let err = block_on(ctl.save(SaveTarget::Create, &specs(), &[], &form("Dup"), |_| None)).unwrap_err();

        assert_eq!(err.user_message(), "Duplicate title");
        assert_eq!(api.calls(), vec!["create"]);
        assert!(!ctl.cell().borrow().saving);
    }

    #[test]
    fn test_filter_resets_to_first_page() {
        let api = MockApi::with_rows(12);
        let ctl = controller(&api, ListParams::paged(1, 5));
        block_on(ctl.load_page(2)).unwrap();
        block_on(ctl.filter(|p| p.search = Some("note".to_string()))).unwrap();

        assert_eq!(api.calls().last().map(String::as_str), Some("list?page=1&limit=5&search=note"));
    }

    #[test]
    fn test_empty_collection() {
        let api = MockApi::with_rows(0);
        let ctl = controller(&api, ListParams::default());
        block_on(ctl.refresh()).unwrap();

        assert!(ctl.cell().borrow().is_empty());
        assert_eq!(api.calls(), vec!["list"]);
        assert_eq!(empty_state_cta("Banner"), "Add Your First Banner");
    }
}
