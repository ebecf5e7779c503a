//! The media entry form and its submission contract.
//!
//! The backend reports success either through the HTTP status or through the
//! body (`{"status": "ok"}` / `{"success": true}`), so the two signals are
//! reconciled explicitly in [`is_submit_success`].

use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};
use watchlist_client::{ApiClient, ApiError, ApiResponse};
use watchlist_models::{MediaEntry, MediaStatus};

/// Choice value that switches an enumerated field to free-text entry
pub const CUSTOM_SENTINEL: &str = "custom";

pub const MEDIA_TYPES: &[&str] = &["Movie", "TV Show", "Anime", "Video Game", "Book", "Podcast"];

pub const GENRES: &[&str] = &[
    "Action",
    "Adventure",
    "Comedy",
    "Documentary",
    "Drama",
    "Fantasy",
    "Horror",
    "Mystery",
    "Romance",
    "Sci-Fi",
    "Thriller",
];

pub const PLATFORMS: &[&str] = &[
    "Netflix",
    "Hulu",
    "Disney+",
    "Prime Video",
    "HBO Max",
    "Crunchyroll",
    "Theater",
    "Steam",
    "PlayStation",
    "Xbox",
    "Nintendo Switch",
];

pub const SAVED_MESSAGE: &str = "SAVED!";
pub const UNKNOWN_FAILURE: &str = "Unknown error";
pub const NETWORK_FAILURE_MESSAGE: &str = "Insert FAILED: Network error, could not reach the server";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("'{value}' is not an option for {field}")]
    NotAnOption { field: &'static str, value: String },
}

/// Every field of the form, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryField {
    FirstName,
    LastName,
    ProfileName,
    MediaType,
    MediaName,
    Description,
    ReleaseYear,
    Genre,
    Rating,
    RatingText,
    Status,
    Platform,
}

impl EntryField {
    pub const ALL: [EntryField; 12] = [
        EntryField::FirstName,
        EntryField::LastName,
        EntryField::ProfileName,
        EntryField::MediaType,
        EntryField::MediaName,
        EntryField::Description,
        EntryField::ReleaseYear,
        EntryField::Genre,
        EntryField::Rating,
        EntryField::RatingText,
        EntryField::Status,
        EntryField::Platform,
    ];

    /// JSON key of the field
    pub fn key(&self) -> &'static str {
        match self {
            EntryField::FirstName => "firstname",
            EntryField::LastName => "lastname",
            EntryField::ProfileName => "profilename",
            EntryField::MediaType => "mediatype",
            EntryField::MediaName => "medianame",
            EntryField::Description => "description",
            EntryField::ReleaseYear => "releaseyear",
            EntryField::Genre => "genre",
            EntryField::Rating => "rating",
            EntryField::RatingText => "ratingtext",
            EntryField::Status => "status",
            EntryField::Platform => "platform",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EntryField::FirstName => "First name",
            EntryField::LastName => "Last name",
            EntryField::ProfileName => "Profile name",
            EntryField::MediaType => "Media type",
            EntryField::MediaName => "Media name",
            EntryField::Description => "Description",
            EntryField::ReleaseYear => "Release year",
            EntryField::Genre => "Genre",
            EntryField::Rating => "Rating (1-5)",
            EntryField::RatingText => "Review",
            EntryField::Status => "Status",
            EntryField::Platform => "Platform",
        }
    }

    pub fn is_required(&self) -> bool {
        !matches!(self, EntryField::Description | EntryField::RatingText)
    }
}

/// A field chosen from a closed list, with an escape hatch to free text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceField {
    options: &'static [&'static str],
    selected: String,
    custom: bool,
    custom_text: String,
}

impl ChoiceField {
    pub fn new(options: &'static [&'static str]) -> Self {
        Self {
            options,
            selected: String::new(),
            custom: false,
            custom_text: String::new(),
        }
    }

    pub fn options(&self) -> &'static [&'static str] {
        self.options
    }

    pub fn is_custom(&self) -> bool {
        self.custom
    }

    /// Pick a listed option, or [`CUSTOM_SENTINEL`] to switch to free text
    pub fn select(&mut self, choice: &str, field: EntryField) -> Result<(), FormError> {
        if choice == CUSTOM_SENTINEL {
            self.custom = true;
            return Ok(());
        }
        if !self.options.contains(&choice) {
            return Err(FormError::NotAnOption {
                field: field.key(),
                value: choice.to_string(),
            });
        }
        self.custom = false;
        self.selected = choice.to_string();
        Ok(())
    }

    /// Switch to free text and set it
    pub fn set_custom_text(&mut self, text: impl Into<String>) {
        self.custom = true;
        self.custom_text = text.into();
    }

    /// Select `value` when listed, otherwise take it as custom text
    pub fn set_value(&mut self, value: &str) {
        if self.options.contains(&value) {
            self.custom = false;
            self.selected = value.to_string();
        } else {
            self.set_custom_text(value);
        }
    }

    /// The value that would be submitted
    pub fn value(&self) -> &str {
        if self.custom {
            &self.custom_text
        } else {
            &self.selected
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
        self.custom_text.clear();
        self.custom = false;
    }
}

/// Form state for one media entry. Numbers are kept as typed text and only
/// coerced when the payload is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryForm {
    pub firstname: String,
    pub lastname: String,
    pub profilename: String,
    pub mediatype: ChoiceField,
    pub medianame: String,
    pub description: String,
    pub releaseyear: String,
    pub genre: ChoiceField,
    pub rating: String,
    pub ratingtext: String,
    pub status: Option<MediaStatus>,
    pub platform: ChoiceField,
}

impl Default for EntryForm {
    fn default() -> Self {
        Self {
            firstname: String::new(),
            lastname: String::new(),
            profilename: String::new(),
            mediatype: ChoiceField::new(MEDIA_TYPES),
            medianame: String::new(),
            description: String::new(),
            releaseyear: String::new(),
            genre: ChoiceField::new(GENRES),
            rating: String::new(),
            ratingtext: String::new(),
            status: None,
            platform: ChoiceField::new(PLATFORMS),
        }
    }
}

impl EntryForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text of a field
    pub fn value(&self, field: EntryField) -> &str {
        match field {
            EntryField::FirstName => &self.firstname,
            EntryField::LastName => &self.lastname,
            EntryField::ProfileName => &self.profilename,
            EntryField::MediaType => self.mediatype.value(),
            EntryField::MediaName => &self.medianame,
            EntryField::Description => &self.description,
            EntryField::ReleaseYear => &self.releaseyear,
            EntryField::Genre => self.genre.value(),
            EntryField::Rating => &self.rating,
            EntryField::RatingText => &self.ratingtext,
            EntryField::Status => self.status.map(|s| s.label()).unwrap_or(""),
            EntryField::Platform => self.platform.value(),
        }
    }

    /// Set a free-text field, or an enumerated one through
    /// [`ChoiceField::set_value`]. Status must parse as a [`MediaStatus`].
    pub fn set(&mut self, field: EntryField, value: impl Into<String>) -> Result<(), FormError> {
        let value = value.into();
        match field {
            EntryField::FirstName => self.firstname = value,
            EntryField::LastName => self.lastname = value,
            EntryField::ProfileName => self.profilename = value,
            EntryField::MediaType => self.mediatype.set_value(&value),
            EntryField::MediaName => self.medianame = value,
            EntryField::Description => self.description = value,
            EntryField::ReleaseYear => self.releaseyear = value,
            EntryField::Genre => self.genre.set_value(&value),
            EntryField::Rating => self.rating = value,
            EntryField::RatingText => self.ratingtext = value,
            EntryField::Status => {
                let status = value.parse::<MediaStatus>().map_err(|_| FormError::NotAnOption {
                    field: field.key(),
                    value: value.clone(),
                })?;
                self.status = Some(status);
            }
            EntryField::Platform => self.platform.set_value(&value),
        }
        Ok(())
    }

    /// Required fields that are still blank
    pub fn missing_required(&self) -> Vec<EntryField> {
        EntryField::ALL
            .into_iter()
            .filter(|field| field.is_required() && self.value(*field).trim().is_empty())
            .collect()
    }

    pub fn payload(&self) -> MediaEntry {
        MediaEntry {
            firstname: self.firstname.clone(),
            lastname: self.lastname.clone(),
            profilename: self.profilename.clone(),
            mediatype: self.mediatype.value().to_string(),
            medianame: self.medianame.clone(),
            description: self.description.clone(),
            releaseyear: coerce_number(&self.releaseyear),
            genre: self.genre.value().to_string(),
            rating: coerce_number(&self.rating),
            ratingtext: self.ratingtext.clone(),
            status: self.value(EntryField::Status).to_string(),
            platform: self.platform.value().to_string(),
        }
    }

    /// Blank every field and drop all custom toggles
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Empty or non-numeric text becomes `None`
pub fn coerce_number(text: &str) -> Option<i64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    text.parse::<i64>().ok().or_else(|| {
        text.parse::<f64>()
            .ok()
            .filter(|n| n.is_finite() && n.fract() == 0.0)
            .map(|n| n as i64)
    })
}

/// The HTTP status alone says the insert went through
pub fn http_accepted(status: u16) -> bool {
    (200..300).contains(&status)
}

/// The body says the insert went through: `status == "ok"` or a truthy `success`
pub fn body_signals_success(body: Option<&Value>) -> bool {
    let Some(body) = body else {
        return false;
    };
    let status_ok = body.get("status").and_then(Value::as_str) == Some("ok");
    let success_flag = body.get("success").map(is_truthy).unwrap_or(false);
    status_ok || success_flag
}

pub fn is_submit_success(status: u16, body: Option<&Value>) -> bool {
    http_accepted(status) || body_signals_success(body)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// How a submission ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Saved,
    /// Server answered but did not accept; carries its `error`/`message`
    Rejected(Option<String>),
    NetworkFailure,
}

impl SubmitOutcome {
    pub fn from_response(result: Result<ApiResponse, ApiError>) -> Self {
        match result {
            Ok(response) if is_submit_success(response.status, response.body.as_ref()) => SubmitOutcome::Saved,
            Ok(response) => SubmitOutcome::Rejected(response.server_message()),
            Err(ApiError::Network(_)) => SubmitOutcome::NetworkFailure,
            Err(ApiError::Http { message, .. }) => SubmitOutcome::Rejected(message),
            Err(ApiError::Encode(e)) => SubmitOutcome::Rejected(Some(e.to_string())),
        }
    }

    pub fn is_saved(&self) -> bool {
        matches!(self, SubmitOutcome::Saved)
    }

    /// Inline status line shown under the form
    pub fn message(&self) -> String {
        match self {
            SubmitOutcome::Saved => SAVED_MESSAGE.to_string(),
            SubmitOutcome::Rejected(reason) => {
                format!("Insert FAILED: {}", reason.as_deref().unwrap_or(UNKNOWN_FAILURE))
            }
            SubmitOutcome::NetworkFailure => NETWORK_FAILURE_MESSAGE.to_string(),
        }
    }
}

pub struct EntrySubmitter {
    client: ApiClient,
}

impl EntrySubmitter {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// POST the form once. Clears it on success; leaves it as typed otherwise.
    pub async fn submit(&self, form: &mut EntryForm) -> SubmitOutcome {
        let payload = form.payload();
        info!(medianame = %payload.medianame, profilename = %payload.profilename, "Submitting media entry");

        let outcome = SubmitOutcome::from_response(self.client.create_media_entry(&payload).await);
        if outcome.is_saved() {
            form.clear();
        } else {
            warn!(message = %outcome.message(), "Media entry was not saved");
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeTransport, Reply};
    use serde_json::json;
    use std::sync::Arc;
    use watchlist_client::endpoints::MEDIA_ENTRIES;

    fn filled_form() -> EntryForm {
        let mut form = EntryForm::new();
        form.firstname = "John".to_string();
        form.lastname = "Doe".to_string();
        form.profilename = "jdoe".to_string();
        form.mediatype.select("Movie", EntryField::MediaType).unwrap();
        form.medianame = "Inception".to_string();
        form.releaseyear = "2010".to_string();
        form.genre.select("Sci-Fi", EntryField::Genre).unwrap();
        form.rating = "5".to_string();
        form.status = Some(MediaStatus::Completed);
        form.platform.select("Netflix", EntryField::Platform).unwrap();
        form
    }

    fn submitter(transport: Arc<FakeTransport>) -> EntrySubmitter {
        EntrySubmitter::new(ApiClient::new(transport))
    }

    #[test]
    fn test_empty_release_year_is_null() {
        let mut form = filled_form();
        form.releaseyear = String::new();
        let body = serde_json::to_value(form.payload()).unwrap();
        assert!(body["releaseyear"].is_null());
        assert_eq!(body["rating"], 5);
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number("2010"), Some(2010));
        assert_eq!(coerce_number(" 4 "), Some(4));
        assert_eq!(coerce_number("3.0"), Some(3));
        assert_eq!(coerce_number("3.5"), None);
        assert_eq!(coerce_number(""), None);
        assert_eq!(coerce_number("soon"), None);
    }

    #[test]
    fn test_custom_sentinel_swaps_to_free_text() {
        let mut form = filled_form();
        form.platform.select(CUSTOM_SENTINEL, EntryField::Platform).unwrap();
        assert!(form.platform.is_custom());
        assert_eq!(form.platform.value(), "");

        form.platform.set_custom_text("Criterion Channel");
        assert_eq!(form.payload().platform, "Criterion Channel");

        form.platform.select("Hulu", EntryField::Platform).unwrap();
        assert!(!form.platform.is_custom());
        assert_eq!(form.payload().platform, "Hulu");
    }

    #[test]
    fn test_select_rejects_unlisted_choice() {
        let mut field = ChoiceField::new(GENRES);
        let err = field.select("Polka", EntryField::Genre).unwrap_err();
        assert_eq!(
            err,
            FormError::NotAnOption {
                field: "genre",
                value: "Polka".to_string()
            }
        );
        field.set_value("Polka");
        assert!(field.is_custom());
        assert_eq!(field.value(), "Polka");
    }

    #[test]
    fn test_missing_required_ignores_optional_fields() {
        let form = filled_form();
        assert!(form.missing_required().is_empty());

        let mut form = EntryForm::new();
        form.description = "great".to_string();
        let missing = form.missing_required();
        assert_eq!(missing.len(), 10);
        assert!(!missing.contains(&EntryField::Description));
        assert!(!missing.contains(&EntryField::RatingText));

        let mut form = filled_form();
        form.genre.select(CUSTOM_SENTINEL, EntryField::Genre).unwrap();
        assert_eq!(form.missing_required(), vec![EntryField::Genre]);
    }

    #[test]
    fn test_set_status_parses_label() {
        let mut form = EntryForm::new();
        form.set(EntryField::Status, "Haven't Watched").unwrap();
        assert_eq!(form.payload().status, "Haven't Watched");
        assert!(form.set(EntryField::Status, "Dropped").is_err());
    }

    #[test]
    fn test_submit_success_reconciliation() {
        assert!(http_accepted(201));
        assert!(!http_accepted(400));

        assert!(body_signals_success(Some(&json!({"status": "ok"}))));
        assert!(body_signals_success(Some(&json!({"success": true}))));
        assert!(body_signals_success(Some(&json!({"success": "yes"}))));
        assert!(!body_signals_success(Some(&json!({"success": false}))));
        assert!(!body_signals_success(Some(&json!({"status": "error"}))));
        assert!(!body_signals_success(None));

        assert!(is_submit_success(200, None));
        assert!(is_submit_success(500, Some(&json!({"status": "ok"}))));
        assert!(!is_submit_success(400, Some(&json!({"error": "duplicate entry"}))));
    }

    #[test]
    fn test_outcome_messages() {
        assert_eq!(SubmitOutcome::Saved.message(), "SAVED!");
        assert_eq!(
            SubmitOutcome::Rejected(Some("duplicate entry".to_string())).message(),
            "Insert FAILED: duplicate entry"
        );
        assert_eq!(SubmitOutcome::Rejected(None).message(), "Insert FAILED: Unknown error");
        assert_ne!(SubmitOutcome::NetworkFailure.message(), SubmitOutcome::Rejected(None).message());
    }

    #[tokio::test]
    async fn test_submit_ok_clears_form() {
        let transport = Arc::new(FakeTransport::new().route(MEDIA_ENTRIES, Reply::json(201, json!({"status": "ok"}))));
        let mut form = filled_form();
        form.genre.set_custom_text("Cyberpunk");

        let outcome = submitter(transport.clone()).submit(&mut form).await;
        assert_eq!(outcome, SubmitOutcome::Saved);
        assert_eq!(outcome.message(), "SAVED!");
        assert_eq!(form, EntryForm::new());
        assert!(!form.genre.is_custom());

        let posts = transport.posts();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].1["genre"], "Cyberpunk");
        assert_eq!(posts[0].1["releaseyear"], 2010);
    }

    #[tokio::test]
    async fn test_submit_rejected_keeps_form() {
        let transport = Arc::new(
            FakeTransport::new().route(MEDIA_ENTRIES, Reply::json(400, json!({"error": "duplicate entry"}))),
        );
        let mut form = filled_form();

        let outcome = submitter(transport).submit(&mut form).await;
        assert_eq!(outcome.message(), "Insert FAILED: duplicate entry");
        assert_eq!(form, filled_form());
    }

    #[tokio::test]
    async fn test_submit_body_flag_wins_over_status() {
        let transport = Arc::new(FakeTransport::new().route(MEDIA_ENTRIES, Reply::json(500, json!({"success": true}))));
        let mut form = filled_form();

        let outcome = submitter(transport).submit(&mut form).await;
        assert!(outcome.is_saved());
        assert_eq!(form, EntryForm::new());
    }

    #[tokio::test]
    async fn test_submit_network_failure() {
        let mut form = filled_form();
        let outcome = submitter(Arc::new(FakeTransport::new())).submit(&mut form).await;
        assert_eq!(outcome, SubmitOutcome::NetworkFailure);
        assert_eq!(outcome.message(), NETWORK_FAILURE_MESSAGE);
        assert_eq!(form, filled_form());
    }
}
