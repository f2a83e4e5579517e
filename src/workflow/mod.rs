//! The client-side workflow: state and the controller that drives it.

mod controller;
pub mod state;

pub use controller::WorkflowController;
pub use state::{Action, WorkflowState};
