//! Terminal rendering: components, views and colors.
//!
//! Everything here reads state; nothing in this module talks to the backend.

mod components;
pub mod theme;
mod views;

pub use components::{
    LoadingIndicator, TextInput, Toast, ToastKind, ERROR_TOAST_DURATION, SUCCESS_TOAST_DURATION,
};
pub use views::{header_chips, render_header, render_issue, render_status_panel, TestCasesView};
