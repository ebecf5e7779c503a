pub mod canned;
pub mod error;
pub mod media_entry;
pub mod search;

pub use canned::CannedQuery;
pub use error::ModelError;
pub use media_entry::{MediaEntry, MediaStatus};
pub use search::{SearchCategory, SearchQuery, SortKey};
