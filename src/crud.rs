//! CRUD Page Hook
//!
//! `use_crud::<R>()` wires a `CrudController` to signals, the status modal
//! and a task scope tied to the calling component.

use std::marker::PhantomData;

use leptos::prelude::*;

use crate::api::{HttpResourceApi, ListParams};
use crate::components::{use_status, StatusModalContext};
use crate::context::{use_app_context, AppContext};
use crate::forms::{FieldValue, FormValues};
use crate::resource::{AdminResource, CrudController, CrudState, PendingFiles, SaveTarget};
use crate::task::TaskScope;

/// Whether the form modal is open, and for what
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Closed,
    Create,
    Edit(String),
}

impl FormMode {
    pub fn is_open(&self) -> bool {
        *self != FormMode::Closed
    }

    fn target(&self) -> Option<SaveTarget> {
        match self {
            FormMode::Closed => None,
            FormMode::Create => Some(SaveTarget::Create),
            FormMode::Edit(id) => Some(SaveTarget::Update(id.clone())),
        }
    }
}

type Controller<R> = CrudController<HttpResourceApi<R>, RwSignal<CrudState<<R as AdminResource>::Item>>>;

/// Copyable handle to one resource page's state and actions
pub struct Crud<R: AdminResource> {
    pub state: RwSignal<CrudState<R::Item>>,
    pub mode: RwSignal<FormMode>,
    pub values: RwSignal<FormValues>,
    pub form_error: RwSignal<Option<String>>,
    files: StoredValue<PendingFiles<web_sys::File>, LocalStorage>,
    scope: StoredValue<TaskScope>,
    ctx: AppContext,
    status: StatusModalContext,
    _resource: PhantomData<R>,
}

impl<R: AdminResource> Clone for Crud<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: AdminResource> Copy for Crud<R> {}

/// Set up list state for `R` and fetch the first page once
pub fn use_crud<R: AdminResource>() -> Crud<R> {
    let ctx = use_app_context();
    let params = if R::PAGINATED {
        ListParams::paged(1, ctx.config().page_size)
    } else {
        ListParams::default()
    };
    let crud = Crud::<R>::new(ctx, params);
    crud.status.dismiss_blocking_on_cleanup();
    crud.reload();
    crud
}

impl<R: AdminResource> Crud<R> {
    fn new(ctx: AppContext, params: ListParams) -> Self {
        Self {
            state: RwSignal::new(CrudState::new(params)),
            mode: RwSignal::new(FormMode::Closed),
            values: RwSignal::new(FormValues::default()),
            form_error: RwSignal::new(None),
            files: StoredValue::new_local(PendingFiles::default()),
            scope: StoredValue::new(TaskScope::bound()),
            ctx,
            status: use_status(),
            _resource: PhantomData,
        }
    }

    fn controller(&self) -> Controller<R> {
        CrudController::new(HttpResourceApi::new(self.ctx.client()), self.state, R::PLURAL)
    }

    /// Run `fut` in this page's scope. Returns false once the page is gone.
    fn spawn(&self, fut: impl std::future::Future<Output = ()> + 'static) -> bool {
        self.scope.try_with_value(|scope| scope.spawn(fut)).is_some()
    }

    // ========================
    // List
    // ========================

    pub fn reload(&self) {
        let ctl = self.controller();
        let status = self.status;
        self.spawn(async move {
            if let Err(err) = ctl.refresh().await {
                status.error(err.user_message());
            }
        });
    }

    pub fn go_to_page(&self, page: u32) {
        let ctl = self.controller();
        let status = self.status;
        self.spawn(async move {
            if let Err(err) = ctl.load_page(page).await {
                status.error(err.user_message());
            }
        });
    }

    /// Change list filters and refetch from page 1
    pub fn apply_filter(&self, change: impl FnOnce(&mut ListParams) + 'static) {
        let ctl = self.controller();
        let status = self.status;
        self.spawn(async move {
            if let Err(err) = ctl.filter(change).await {
                status.error(err.user_message());
            }
        });
    }

    // ========================
    // Form
    // ========================

    pub fn open_create(&self) {
        self.reset_form(FormValues::empty(&R::fields()));
        self.mode.set(FormMode::Create);
    }

    pub fn open_edit(&self, item: &R::Item) {
        let json = serde_json::to_value(item).unwrap_or_default();
        self.reset_form(FormValues::from_item(&R::fields(), &json));
        self.mode.set(FormMode::Edit(R::id(item)));
    }

    pub fn close_form(&self) {
        self.mode.set(FormMode::Closed);
        self.files.update_value(PendingFiles::clear);
        self.form_error.set(None);
    }

    pub fn set_value(&self, name: &str, value: FieldValue) {
        self.values.update(|v| v.set(name, value));
    }

    /// Keep the picked file aside; the form only tracks its name
    pub fn attach_file(&self, name: &str, file: Option<web_sys::File>) {
        let file_name = file.as_ref().map(|f| f.name());
        self.files.update_value(|files| files.attach(name, file));
        self.values.update(|v| v.attach_file(name, file_name));
    }

    pub fn submit(&self) {
        let Some(target) = self.mode.with_untracked(FormMode::target) else {
            return;
        };
        let crud = *self;
        let ctl = self.controller();
        let values = self.values.get_untracked();
        self.form_error.set(None);

        self.spawn(async move {
            let files = crud.files;
            let result = ctl
                .save(target.clone(), &R::fields(), &R::rules(), &values, |name| {
                    files.try_with_value(|f| f.get(name)).flatten()
                })
                .await;
            match result {
                Ok(message) => {
                    crud.close_form();
                    let fallback = match target {
                        SaveTarget::Create => format!("{} created successfully", R::SINGULAR),
                        SaveTarget::Update(_) => format!("{} updated successfully", R::SINGULAR),
                    };
                    crud.status.success(message.unwrap_or(fallback));
                }
                Err(err) => {
                    if err.is_validation() {
                        crud.form_error.set(Some(err.user_message()));
                    }
                    crud.status.error(err.user_message());
                }
            }
        });
    }

    fn reset_form(&self, values: FormValues) {
        self.files.update_value(PendingFiles::clear);
        self.form_error.set(None);
        self.values.set(values);
    }

    // ========================
    // Delete
    // ========================

    /// Ask for confirmation, then delete
    pub fn request_delete(&self, id: String) {
        let crud = *self;
        self.status.confirm(
            format!("Delete {}?", R::SINGULAR.to_lowercase()),
            "This action cannot be undone.",
            move || crud.delete_now(id.clone()),
        );
    }

    fn delete_now(&self, id: String) {
        let ctl = self.controller();
        let status = self.status;
        let spawned = self.spawn(async move {
            match ctl.remove(&id).await {
                Ok(message) => status.success(message.unwrap_or_else(|| format!("{} deleted successfully", R::SINGULAR))),
                Err(err) => status.error(err.user_message()),
            }
        });
        if spawned {
            status.loading(format!("Deleting {}...", R::SINGULAR.to_lowercase()));
        }
    }

    pub fn config(&self) -> crate::config::AdminConfig {
        self.ctx.config()
    }
}
