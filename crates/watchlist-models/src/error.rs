use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("Unknown search category: {0} (expected media, user or genre)")]
    UnknownCategory(String),

    #[error("Unknown sort key: {0}")]
    UnknownSortKey(String),

    #[error("Sort '{sort}' is not available for category '{category}'")]
    SortNotInCategory { category: String, sort: String },

    #[error("Unknown status: {0} (expected Planning, Watching, Completed or Haven't Watched)")]
    UnknownStatus(String),

    #[error("Unknown report: {0}")]
    UnknownReport(String),
}
