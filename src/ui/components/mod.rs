//! Reusable UI components.

mod input;
mod loading;
mod toast;

pub use input::TextInput;
pub use loading::LoadingIndicator;
pub use toast::{Toast, ToastKind, ERROR_TOAST_DURATION, SUCCESS_TOAST_DURATION};
