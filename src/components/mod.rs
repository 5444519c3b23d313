//! UI Components
//!
//! Reusable Leptos components.

mod admin_shell;
mod form_modal;
mod pagination_bar;
mod resource_page;
mod status_modal;

pub use admin_shell::{AdminShell, RequireAuth, NAV_LINKS};
pub use form_modal::FormModal;
pub use pagination_bar::PaginationBar;
pub use resource_page::{tone_class, ErrorPanel, LoadingPanel, ResourcePage};
pub use status_modal::{use_status, StatusModal, StatusModalContext};
