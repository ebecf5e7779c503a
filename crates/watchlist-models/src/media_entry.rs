use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// One user-submitted record describing a piece of consumed media.
///
/// Field names match the backend's JSON keys. Identity is owned by the
/// backend, so there is no id here. `releaseyear` and `rating` are sent as
/// `null` when the form value could not be read as a number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MediaEntry {
    pub firstname: String,
    pub lastname: String,
    pub profilename: String,
    pub mediatype: String,
    pub medianame: String,
    pub description: String,
    pub releaseyear: Option<i64>,
    pub genre: String,
    pub rating: Option<i64>,
    pub ratingtext: String,
    pub status: String,
    pub platform: String,
}

/// Consumption status. Closed set, no free-text alternative.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MediaStatus {
    Planning,
    Watching,
    Completed,
    #[serde(rename = "Haven't Watched")]
    HaventWatched,
}

impl MediaStatus {
    pub const ALL: [MediaStatus; 4] = [
        MediaStatus::Planning,
        MediaStatus::Watching,
        MediaStatus::Completed,
        MediaStatus::HaventWatched,
    ];

    /// Label as the backend stores it
    pub fn label(&self) -> &'static str {
        match self {
            MediaStatus::Planning => "Planning",
            MediaStatus::Watching => "Watching",
            MediaStatus::Completed => "Completed",
            MediaStatus::HaventWatched => "Haven't Watched",
        }
    }
}

impl fmt::Display for MediaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MediaStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "planning" => Ok(MediaStatus::Planning),
            "watching" => Ok(MediaStatus::Watching),
            "completed" => Ok(MediaStatus::Completed),
            "haventwatched" => Ok(MediaStatus::HaventWatched),
            _ => Err(ModelError::UnknownStatus(s.to_string())),
        }
    }
}
