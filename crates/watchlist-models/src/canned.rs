use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ModelError;

/// Fixed aggregate reports exposed by the backend, one endpoint each.
/// Row shape is owned by the backend and opaque here.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum CannedQuery {
    TopRatedMedia,
    TopUsersCompleted,
    TopMediaCompletions,
    AvgRatingGenre,
    UsersRatedHigh,
    LowRatedRecent,
}

impl CannedQuery {
    pub const ALL: [CannedQuery; 6] = [
        CannedQuery::TopRatedMedia,
        CannedQuery::TopUsersCompleted,
        CannedQuery::TopMediaCompletions,
        CannedQuery::AvgRatingGenre,
        CannedQuery::UsersRatedHigh,
        CannedQuery::LowRatedRecent,
    ];

    pub fn endpoint(&self) -> &'static str {
        match self {
            CannedQuery::TopRatedMedia => "/api/top-rated-media",
            CannedQuery::TopUsersCompleted => "/api/top-users-completed",
            CannedQuery::TopMediaCompletions => "/api/top-media-completions",
            CannedQuery::AvgRatingGenre => "/api/avg-rating-genre",
            CannedQuery::UsersRatedHigh => "/api/users-rated-high",
            CannedQuery::LowRatedRecent => "/api/low-rated-recent",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            CannedQuery::TopRatedMedia => "Top Rated Media",
            CannedQuery::TopUsersCompleted => "Top Users by Completions",
            CannedQuery::TopMediaCompletions => "Most Completed Media",
            CannedQuery::AvgRatingGenre => "Average Rating per Genre",
            CannedQuery::UsersRatedHigh => "Users Who Rated High",
            CannedQuery::LowRatedRecent => "Recent Low-Rated Media",
        }
    }

    /// Short name, which is also the endpoint's last path segment
    pub fn name(&self) -> &'static str {
        self.endpoint().trim_start_matches("/api/")
    }
}

impl FromStr for CannedQuery {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        CannedQuery::ALL
            .into_iter()
            .find(|q| q.name() == wanted)
            .ok_or_else(|| ModelError::UnknownReport(s.to_string()))
    }
}
