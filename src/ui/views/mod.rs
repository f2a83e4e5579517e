//! Screen regions of the main layout.

mod header;
mod issue;
mod test_cases;

pub use header::{header_chips, render_header, render_status_panel};
pub use issue::render_issue;
pub use test_cases::TestCasesView;
