pub mod entry;
pub mod panel;
pub mod render;
pub mod search;
pub mod status;

#[cfg(test)]
mod test_support;

pub use entry::{is_submit_success, ChoiceField, EntryField, EntryForm, EntrySubmitter, FormError, SubmitOutcome, CUSTOM_SENTINEL};
pub use panel::{PendingRequest, QueryDispatcher, QueryPanel, QueryResult, StalePolicy};
pub use render::{render, ResultView, RowSet, TableView, TabularData};
pub use search::{SearchController, SearchForm};
pub use status::{check_backend, BackendStatus};
