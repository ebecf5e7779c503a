use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// What the search endpoint looks through
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum SearchCategory {
    #[default]
    Media,
    User,
    Genre,
}

/// Sort keys understood by the search endpoint. Which ones are valid depends
/// on the category, see [`SearchCategory::sort_keys`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Az,
    Za,
    RatingDesc,
    RatingAsc,
    YearDesc,
    YearAsc,
    CountDesc,
    CountAsc,
}

const MEDIA_SORTS: &[SortKey] = &[
    SortKey::Az,
    SortKey::Za,
    SortKey::RatingDesc,
    SortKey::RatingAsc,
    SortKey::YearDesc,
    SortKey::YearAsc,
];

const USER_SORTS: &[SortKey] = &[SortKey::Az, SortKey::Za, SortKey::CountDesc, SortKey::CountAsc];

const GENRE_SORTS: &[SortKey] = &[
    SortKey::Az,
    SortKey::Za,
    SortKey::CountDesc,
    SortKey::CountAsc,
    SortKey::RatingDesc,
    SortKey::RatingAsc,
];

impl SearchCategory {
    pub const ALL: [SearchCategory; 3] = [SearchCategory::Media, SearchCategory::User, SearchCategory::Genre];

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchCategory::Media => "media",
            SearchCategory::User => "user",
            SearchCategory::Genre => "genre",
        }
    }

    /// Valid sort keys for this category, in display order.
    /// The shared keys (`az`, `za`) always come first.
    pub fn sort_keys(&self) -> &'static [SortKey] {
        match self {
            SearchCategory::Media => MEDIA_SORTS,
            SearchCategory::User => USER_SORTS,
            SearchCategory::Genre => GENRE_SORTS,
        }
    }

    pub fn allows(&self, sort: SortKey) -> bool {
        self.sort_keys().contains(&sort)
    }

    /// Human label for a sort key within this category. The same key reads
    /// differently per category (`count_desc` is "Most Reviews" for users
    /// and "Most Media" for genres).
    pub fn sort_label(&self, sort: SortKey) -> &'static str {
        match (self, sort) {
            (_, SortKey::Az) => "A-Z",
            (_, SortKey::Za) => "Z-A",
            (SearchCategory::Genre, SortKey::RatingDesc) => "Highest Avg Rating",
            (SearchCategory::Genre, SortKey::RatingAsc) => "Lowest Avg Rating",
            (_, SortKey::RatingDesc) => "Highest Rated",
            (_, SortKey::RatingAsc) => "Lowest Rated",
            (_, SortKey::YearDesc) => "Newest",
            (_, SortKey::YearAsc) => "Oldest",
            (SearchCategory::User, SortKey::CountDesc) => "Most Reviews",
            (SearchCategory::User, SortKey::CountAsc) => "Least Reviews",
            (_, SortKey::CountDesc) => "Most Media",
            (_, SortKey::CountAsc) => "Least Media",
        }
    }
}

impl fmt::Display for SearchCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchCategory {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "media" => Ok(SearchCategory::Media),
            "user" => Ok(SearchCategory::User),
            "genre" => Ok(SearchCategory::Genre),
            _ => Err(ModelError::UnknownCategory(s.to_string())),
        }
    }
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Az => "az",
            SortKey::Za => "za",
            SortKey::RatingDesc => "rating_desc",
            SortKey::RatingAsc => "rating_asc",
            SortKey::YearDesc => "year_desc",
            SortKey::YearAsc => "year_asc",
            SortKey::CountDesc => "count_desc",
            SortKey::CountAsc => "count_asc",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "az" => Ok(SortKey::Az),
            "za" => Ok(SortKey::Za),
            "rating_desc" => Ok(SortKey::RatingDesc),
            "rating_asc" => Ok(SortKey::RatingAsc),
            "year_desc" => Ok(SortKey::YearDesc),
            "year_asc" => Ok(SortKey::YearAsc),
            "count_desc" => Ok(SortKey::CountDesc),
            "count_asc" => Ok(SortKey::CountAsc),
            _ => Err(ModelError::UnknownSortKey(s.to_string())),
        }
    }
}

/// A fully-formed search request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchQuery {
    pub term: String,
    pub category: SearchCategory,
    pub sort: SortKey,
}

impl SearchQuery {
    /// Build a query, rejecting a sort key the category does not offer
    pub fn new(term: impl Into<String>, category: SearchCategory, sort: SortKey) -> Result<Self, ModelError> {
        if !category.allows(sort) {
            return Err(ModelError::SortNotInCategory {
                category: category.to_string(),
                sort: sort.to_string(),
            });
        }
        Ok(Self {
            term: term.into(),
            category,
            sort,
        })
    }

    /// Query-string parameters in the order the endpoint documents them
    pub fn params(&self) -> [(&'static str, String); 3] {
        [
            ("q", self.term.clone()),
            ("category", self.category.as_str().to_string()),
            ("sort", self.sort.as_str().to_string()),
        ]
    }
}
