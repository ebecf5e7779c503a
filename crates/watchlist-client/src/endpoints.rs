//! Backend endpoint paths. Canned report paths live on
//! [`watchlist_models::CannedQuery`].

pub const HEALTH: &str = "/api/health";
pub const DB_PING: &str = "/api/db/ping";
pub const MEDIA_ENTRIES: &str = "/api/media-entries";
pub const SEARCH: &str = "/api/search";
